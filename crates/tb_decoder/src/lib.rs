mod decode;
mod errors;
mod instruction;

#[cfg(test)]
mod test;

pub use decode::{decode_instruction, ReadExt};
pub use errors::{DecodeError, Result};
pub use instruction::{Immediate, Instruction};
