use std::fmt::{Display, Formatter};
use tb_opcodes::{LiteralKind, OpcodeRecord, OpcodeSpace, Operand, OperandKind};

/// Base address of the I/O page addressed by `LDH`.
const IO_PAGE: u16 = 0xFF00;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Immediate {
    Byte(u8),
    Word(u16),
}

impl Immediate {
    pub fn byte_size(&self) -> u8 {
        match self {
            Immediate::Byte(_) => 1,
            Immediate::Word(_) => 2,
        }
    }

    pub fn to_le_bytes(self) -> Vec<u8> {
        match self {
            Immediate::Byte(value) => vec![value],
            Immediate::Word(value) => value.to_le_bytes().to_vec(),
        }
    }
}

/// A decoded instruction: the opcode it was decoded as and the operand bytes that followed it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction<'t> {
    pub opcode: &'t OpcodeRecord,
    pub data: Option<Immediate>,
}

impl<'t> Instruction<'t> {
    pub fn new(opcode: &'t OpcodeRecord, data: Option<Immediate>) -> Self {
        Self { opcode, data }
    }

    /// Total number of bytes the instruction occupies in the stream.
    pub fn byte_len(&self) -> usize {
        self.opcode.byte_length as usize
    }

    /// The bytes the instruction was encoded as.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.byte_len());
        if self.opcode.space() == OpcodeSpace::Prefixed {
            bytes.push(OpcodeSpace::PREFIX);
        }
        bytes.push(self.opcode.code);
        if let Some(data) = self.data {
            bytes.extend(data.to_le_bytes());
        }
        bytes
    }

    fn fmt_literal(&self, f: &mut Formatter<'_>, literal: LiteralKind) -> std::fmt::Result {
        match (literal, self.data) {
            (LiteralKind::Data8, Some(Immediate::Byte(value))) => write!(f, "${:02X}", value),
            (LiteralKind::IoOffset8, Some(Immediate::Byte(value))) => {
                write!(f, "${:04X}", IO_PAGE + value as u16)
            }
            (LiteralKind::Relative8, Some(Immediate::Byte(value))) => {
                write!(f, "{:+}", value as i8)
            }
            (_, Some(Immediate::Word(value))) => write!(f, "${:04X}", value),
            _ => write!(f, "{}", literal),
        }
    }

    fn fmt_operand(&self, f: &mut Formatter<'_>, operand: &Operand) -> std::fmt::Result {
        let literal = match operand.kind {
            OperandKind::Literal(literal) => literal,
            _ => return write!(f, "{}", operand),
        };

        if operand.immediate {
            self.fmt_literal(f, literal)
        } else {
            write!(f, "[")?;
            self.fmt_literal(f, literal)?;
            write!(f, "]")
        }
    }
}

impl Display for Instruction<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.opcode.mnemonic)?;

        for (i, operand) in self.opcode.operands.iter().enumerate() {
            write!(f, "{}", if i == 0 { " " } else { ", " })?;
            self.fmt_operand(f, operand)?;
        }

        Ok(())
    }
}
