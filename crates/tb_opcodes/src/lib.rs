//! This crate turns the SM83 (Game Boy CPU) opcode data sheet into a typed instruction table.
//!
//! Operand names from the data sheet are classified into [OperandKind]s, a known ambiguity in the
//! sheet is corrected first (the carry condition is written `C`, the same as the register), and
//! each entry becomes an [OpcodeRecord]. The records of the unprefixed and the `0xCB` prefixed
//! opcode spaces are collected into an [InstructionTable].
//!
//! ```no_run
//! use tb_opcodes::{BuildOptions, InstructionTable};
//!
//! let sheet = data_sheet::get_data_sheet().unwrap();
//! let table = InstructionTable::build(&sheet, BuildOptions::default()).unwrap();
//! println!("{}", table.get(0xCA, false).unwrap());
//! ```

mod classify;
mod correct;
mod cycles;
mod display;
mod errors;
mod flags;
mod opcode;
mod operand;
mod register;
mod table;

#[cfg(test)]
mod test;

pub use classify::{classify, classify_name, classify_operand, INTERRUPT_MARKER, MAX_BIT_INDEX};
pub use correct::{AmbiguityCorrector, AMBIGUOUS_CARRY, CARRY_CONDITION_CODES};
pub use cycles::{CycleConvention, Cycles};
pub use display::Listing;
pub use errors::{Error, OperandError, Result};
pub use flags::{FlagEffect, FlagEffects};
pub use opcode::{OpcodeRecord, RecordBuilder};
pub use operand::{Condition, LiteralKind, Operand, OperandKind, Step};
pub use register::Register;
pub use table::{
    parse_code, BuildOptions, Completeness, InstructionTable, OpcodeMap, OpcodeSpace,
    TableBuilder,
};
