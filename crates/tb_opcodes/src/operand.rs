use crate::Register;
use data_sheet::OperandDescriptor;
use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Condition {
    Carry,
    NoCarry,
    Zero,
    NotZero,
}

impl Condition {
    /// The name used for the condition in the data sheet.
    pub const fn token(self) -> &'static str {
        match self {
            Condition::Carry => "CY",
            Condition::NoCarry => "NC",
            Condition::Zero => "Z",
            Condition::NotZero => "NZ",
        }
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Assemblers spell the carry condition the same as the register.
        match self {
            Condition::Carry => write!(f, "C"),
            _ => write!(f, "{}", self.token()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    /// `n8`
    Data8,
    /// `n16`
    Data16,
    /// `a8`, an offset into the 0xFF00 page.
    IoOffset8,
    /// `a16`
    Address16,
    /// `e8`, a signed offset relative to the next instruction.
    Relative8,
}

impl LiteralKind {
    pub const fn token(self) -> &'static str {
        match self {
            LiteralKind::Data8 => "n8",
            LiteralKind::Data16 => "n16",
            LiteralKind::IoOffset8 => "a8",
            LiteralKind::Address16 => "a16",
            LiteralKind::Relative8 => "e8",
        }
    }

    /// Number of bytes the literal occupies in the instruction stream.
    pub const fn byte_size(self) -> u8 {
        match self {
            LiteralKind::Data16 | LiteralKind::Address16 => 2,
            LiteralKind::Data8 | LiteralKind::IoOffset8 | LiteralKind::Relative8 => 1,
        }
    }
}

impl Display for LiteralKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum OperandKind {
    Register(Register),
    Condition(Condition),
    Bit(u8),
    Literal(LiteralKind),
    Interrupt(u16),
}

impl OperandKind {
    /// The operand name as it would be written in the data sheet. Classifying this name again
    /// yields the same kind.
    pub fn source_name(&self) -> String {
        match self {
            OperandKind::Register(register) => register.name().to_owned(),
            OperandKind::Condition(condition) => condition.token().to_owned(),
            OperandKind::Bit(bit) => bit.to_string(),
            OperandKind::Literal(literal) => literal.token().to_owned(),
            OperandKind::Interrupt(vector) => format!("${:02X}", vector),
        }
    }
}

impl Display for OperandKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OperandKind::Register(register) => register.fmt(f),
            OperandKind::Condition(condition) => condition.fmt(f),
            OperandKind::Bit(bit) => write!(f, "{}", bit),
            OperandKind::Literal(literal) => literal.fmt(f),
            OperandKind::Interrupt(vector) => write!(f, "${:02X}", vector),
        }
    }
}

/// Register adjustment applied after the operand is used, as in `[HL+]` and `[HL-]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    Increment,
    Decrement,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Operand {
    pub kind: OperandKind,
    /// `false` when the operand is dereferenced (`[HL]`, `[a16]`).
    pub immediate: bool,
    pub step: Option<Step>,
}

impl Operand {
    pub fn new(kind: OperandKind, immediate: bool) -> Self {
        Self {
            kind,
            immediate,
            step: None,
        }
    }

    pub fn with_step(self, step: Step) -> Self {
        Self {
            step: Some(step),
            ..self
        }
    }

    /// Describe the operand the way the data sheet does.
    pub fn to_descriptor(&self) -> OperandDescriptor {
        OperandDescriptor {
            name: self.kind.source_name(),
            immediate: self.immediate,
            bytes: match self.kind {
                OperandKind::Literal(literal) => Some(literal.byte_size()),
                _ => None,
            },
            increment: self.step == Some(Step::Increment),
            decrement: self.step == Some(Step::Decrement),
        }
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if !self.immediate {
            write!(f, "[")?;
        }

        write!(f, "{}", self.kind)?;

        match self.step {
            Some(Step::Increment) => write!(f, "+")?,
            Some(Step::Decrement) => write!(f, "-")?,
            None => {}
        }

        if !self.immediate {
            write!(f, "]")?;
        }

        Ok(())
    }
}
