#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("End of input")]
    EndOfInput,

    #[error("Could not fetch extra bytes from stream")]
    CouldNotReadExtraBytes,

    #[error("Invalid op code ({}{code:#04X})", prefix(.prefixed))]
    InvalidOpCode { code: u8, prefixed: bool },

    #[error("Op code {code:#04X} expects {length} operand bytes")]
    UnsupportedOperandLength { code: u8, prefixed: bool, length: u8 },
}

fn prefix(prefixed: &bool) -> &'static str {
    if *prefixed {
        "CB "
    } else {
        ""
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;
