use crate::errors::{DecodeError, Result};
use crate::{Immediate, Instruction};
use tb_opcodes::{InstructionTable, OpcodeSpace};

pub trait ReadExt {
    fn read_u8(&mut self) -> Result<u8>;

    fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes([self.read_u8()?, self.read_u8()?]))
    }
}

impl<T: Iterator<Item = u8>> ReadExt for T {
    fn read_u8(&mut self) -> Result<u8> {
        if let Some(byte) = self.next() {
            Ok(byte)
        } else {
            Err(DecodeError::CouldNotReadExtraBytes)
        }
    }
}

/// Reads one instruction from the stream and looks it up in `table`.
pub fn decode_instruction<'t>(
    it: &mut impl Iterator<Item = u8>,
    table: &'t InstructionTable,
) -> Result<Instruction<'t>> {
    let op_code = it.read_u8().map_err(|e| match e {
        DecodeError::CouldNotReadExtraBytes => DecodeError::EndOfInput,
        err => err,
    })?;

    let (code, prefixed) = if op_code == OpcodeSpace::PREFIX {
        (it.read_u8()?, true)
    } else {
        (op_code, false)
    };

    let opcode = table
        .get(code, prefixed)
        .ok_or(DecodeError::InvalidOpCode { code, prefixed })?;

    let data = match opcode.operand_bytes() {
        0 => None,
        1 => Some(Immediate::Byte(it.read_u8()?)),
        2 => Some(Immediate::Word(it.read_u16()?)),
        length => {
            return Err(DecodeError::UnsupportedOperandLength {
                code,
                prefixed,
                length,
            })
        }
    };

    Ok(Instruction::new(opcode, data))
}
