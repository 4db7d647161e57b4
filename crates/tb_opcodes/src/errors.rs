use crate::OpcodeSpace;

/// Failures while classifying a single operand name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OperandError {
    #[error("Malformed interrupt vector \"{0}\"")]
    MalformedInterruptVector(String),

    #[error("Bit index \"{0}\" is out of range (0..=7)")]
    BitIndexOutOfRange(String),

    #[error("Operand \"{0}\" both increments and decrements")]
    ConflictingStep(String),
}

/// Failures while building the instruction table. Every error aborts the opcode space it was
/// found in.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Malformed interrupt vector \"{name}\" ({space} {code:#04X})")]
    MalformedInterruptVector {
        space: OpcodeSpace,
        code: u8,
        name: String,
    },

    #[error("Bit index \"{name}\" is out of range ({space} {code:#04X})")]
    BitIndexOutOfRange {
        space: OpcodeSpace,
        code: u8,
        name: String,
    },

    #[error("Operand \"{name}\" both increments and decrements ({space} {code:#04X})")]
    ConflictingStep {
        space: OpcodeSpace,
        code: u8,
        name: String,
    },

    #[error("Opcode entry is missing a valid \"{field}\" ({space} {code:#04X})")]
    UnknownMnemonicFormat {
        space: OpcodeSpace,
        code: u8,
        field: &'static str,
    },

    #[error("Invalid \"{flag}\" flag effect \"{text}\" ({space} {code:#04X})")]
    MalformedFlagEffect {
        space: OpcodeSpace,
        code: u8,
        flag: char,
        text: String,
    },

    #[error("Opcode {code:#04X} is declared more than once in the {space} space")]
    DuplicateOpcode { space: OpcodeSpace, code: u8 },

    #[error("The {space} space is missing {} opcode(s): {}", .missing.len(), code_list(.missing))]
    IncompleteOpcodeSpace { space: OpcodeSpace, missing: Vec<u8> },

    #[error("Invalid opcode code \"{key}\" in the {space} space")]
    MalformedOpcodeCode { space: OpcodeSpace, key: String },
}

impl Error {
    pub(crate) fn from_operand(space: OpcodeSpace, code: u8, err: OperandError) -> Self {
        match err {
            OperandError::MalformedInterruptVector(name) => Error::MalformedInterruptVector {
                space,
                code,
                name,
            },
            OperandError::BitIndexOutOfRange(name) => Error::BitIndexOutOfRange {
                space,
                code,
                name,
            },
            OperandError::ConflictingStep(name) => Error::ConflictingStep { space, code, name },
        }
    }

    /// The opcode space the error was found in.
    pub fn space(&self) -> OpcodeSpace {
        match self {
            Error::MalformedInterruptVector { space, .. }
            | Error::BitIndexOutOfRange { space, .. }
            | Error::ConflictingStep { space, .. }
            | Error::UnknownMnemonicFormat { space, .. }
            | Error::MalformedFlagEffect { space, .. }
            | Error::DuplicateOpcode { space, .. }
            | Error::IncompleteOpcodeSpace { space, .. }
            | Error::MalformedOpcodeCode { space, .. } => *space,
        }
    }
}

pub(crate) fn code_list(codes: &[u8]) -> String {
    codes
        .iter()
        .map(|code| format!("{:#04X}", code))
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, Error>;
