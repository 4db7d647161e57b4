use std::fmt::{Display, Formatter};

/// A register or register pair referenced by an operand.
///
/// Any name that is not part of the SM83 register file is carried in [`Register::Other`] exactly
/// as it was written, so an operand is never rejected just because its register is unknown.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Register {
    A,
    B,
    C,
    D,
    E,
    F,
    H,
    L,
    AF,
    BC,
    DE,
    HL,
    SP,
    PC,
    Other(String),
}

impl Register {
    pub fn name(&self) -> &str {
        use Register::*;

        match self {
            A => "A",
            B => "B",
            C => "C",
            D => "D",
            E => "E",
            F => "F",
            H => "H",
            L => "L",
            AF => "AF",
            BC => "BC",
            DE => "DE",
            HL => "HL",
            SP => "SP",
            PC => "PC",
            Other(name) => name.as_str(),
        }
    }

    /// `true` for the 16-bit registers and register pairs.
    pub fn is_wide(&self) -> bool {
        use Register::*;

        matches!(self, AF | BC | DE | HL | SP | PC)
    }
}

impl From<&str> for Register {
    fn from(name: &str) -> Self {
        use Register::*;

        match name {
            "A" => A,
            "B" => B,
            "C" => C,
            "D" => D,
            "E" => E,
            "F" => F,
            "H" => H,
            "L" => L,
            "AF" => AF,
            "BC" => BC,
            "DE" => DE,
            "HL" => HL,
            "SP" => SP,
            "PC" => PC,
            _ => Other(name.to_owned()),
        }
    }
}

impl Display for Register {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
