//! The SM83 (Game Boy CPU) opcode data sheet and the serde model used to read it.
//!
//! The data sheet uses the `opcodes.json` layout: two objects, `unprefixed` and `cbprefixed`,
//! each keyed by the opcode byte written as hex text (`"0xCA"`). Nothing in here interprets the
//! operand names; that is left to the table builder.

mod errors;
mod parser;

use std::path::Path;

pub use errors::{Error, Result};
pub use parser::{DataSheet, OpcodeSpaceSource, OperandDescriptor, RawFlags, RawOpcode};

/// The data sheet bundled with the crate, covering the full SM83 instruction set.
pub fn get_data_sheet() -> Result<DataSheet> {
    from_json(include_str!("../opcodes.json"))
}

pub fn from_json(json: &str) -> Result<DataSheet> {
    Ok(serde_json::from_str(json)?)
}

pub fn from_path<P: AsRef<Path>>(path: P) -> Result<DataSheet> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_json(&json)
}
