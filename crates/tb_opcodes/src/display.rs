use crate::{OpcodeMap, OpcodeRecord, OpcodeSpace};
use std::fmt::{Display, Formatter};

impl Display for OpcodeRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mnemonic)?;

        for (i, operand) in self.operands.iter().enumerate() {
            if i == 0 {
                write!(f, " {}", operand)?;
            } else {
                write!(f, ", {}", operand)?;
            }
        }

        Ok(())
    }
}

/// One line per opcode with the encoding, length, timing and flag effects.
pub struct Listing<'a, I> {
    pub item: &'a I,
}

impl<'a, I> Listing<'a, I> {
    pub fn new(item: &'a I) -> Self {
        Self { item }
    }
}

impl Display for Listing<'_, OpcodeRecord> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let record = self.item;

        match record.space() {
            OpcodeSpace::Unprefixed => write!(f, "   {:02X}", record.code)?,
            OpcodeSpace::Prefixed => write!(f, "{:02X} {:02X}", OpcodeSpace::PREFIX, record.code)?,
        }

        write!(
            f,
            "  {:<20} {}  {:<6} {}",
            record.to_string(),
            record.byte_length,
            record.cycles.to_string(),
            record.flags
        )
    }
}

impl Display for Listing<'_, OpcodeMap> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for record in self.item {
            writeln!(f, "{}", Listing::new(record))?;
        }
        Ok(())
    }
}
