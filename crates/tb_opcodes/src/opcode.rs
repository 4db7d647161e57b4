use crate::classify::classify_operand;
use crate::errors::{Error, Result};
use crate::{AmbiguityCorrector, CycleConvention, Cycles, FlagEffect, FlagEffects, OpcodeSpace};
use crate::Operand;
use data_sheet::{OperandDescriptor, RawFlags, RawOpcode};
use std::borrow::Cow;
use tracing::warn;

/// Everything a decoder needs to know about one opcode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpcodeRecord {
    pub code: u8,
    /// `true` for opcodes that follow the `0xCB` prefix.
    pub prefixed: bool,
    pub mnemonic: String,
    /// Total length of the instruction, including the prefix and opcode bytes.
    pub byte_length: u8,
    pub cycles: Cycles,
    pub immediate: bool,
    pub operands: Vec<Operand>,
    pub flags: FlagEffects,
}

impl OpcodeRecord {
    pub fn space(&self) -> OpcodeSpace {
        OpcodeSpace::from_prefixed(self.prefixed)
    }

    /// Number of operand bytes that follow the opcode in the instruction stream.
    pub fn operand_bytes(&self) -> u8 {
        self.byte_length.saturating_sub(self.space().opcode_len())
    }

    /// The operands described the way the data sheet describes them.
    pub fn operand_descriptors(&self) -> Vec<OperandDescriptor> {
        self.operands.iter().map(Operand::to_descriptor).collect()
    }
}

/// Turns one data sheet entry into an [OpcodeRecord].
#[derive(Clone, Debug, Default)]
pub struct RecordBuilder {
    corrector: AmbiguityCorrector,
    cycles: CycleConvention,
}

impl RecordBuilder {
    pub fn new(corrector: AmbiguityCorrector, cycles: CycleConvention) -> Self {
        Self { corrector, cycles }
    }

    pub fn corrector(&self) -> &AmbiguityCorrector {
        &self.corrector
    }

    pub fn cycle_convention(&self) -> CycleConvention {
        self.cycles
    }

    pub fn build(&self, space: OpcodeSpace, code: u8, raw: &RawOpcode) -> Result<OpcodeRecord> {
        let missing = |field: &'static str| Error::UnknownMnemonicFormat { space, code, field };

        let mnemonic = raw
            .mnemonic
            .as_deref()
            .map(str::trim)
            .filter(|mnemonic| !mnemonic.is_empty())
            .ok_or_else(|| missing("mnemonic"))?;

        let byte_length = raw
            .bytes
            .filter(|bytes| *bytes >= space.opcode_len())
            .ok_or_else(|| missing("bytes"))?;

        // The collision only exists in the unprefixed space.
        let descriptors = match space {
            OpcodeSpace::Unprefixed => self.corrector.correct(code, &raw.operands),
            OpcodeSpace::Prefixed => Cow::Borrowed(raw.operands.as_slice()),
        };

        let operands = descriptors
            .iter()
            .map(classify_operand)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|err| Error::from_operand(space, code, err))?;

        if raw.cycles.first().copied().flatten().is_none() {
            warn!(
                "No usable cycle count for {} {:#04X} ({}), using 0",
                space, code, mnemonic
            );
        }

        if self.cycles == CycleConvention::Difference && Cycles::is_inverted(&raw.cycles) {
            warn!(
                "Cycle counts {:?} for {} {:#04X} ({}) are inverted, dropping the second",
                raw.cycles, space, code, mnemonic
            );
        }

        Ok(OpcodeRecord {
            code,
            prefixed: space.is_prefixed(),
            mnemonic: mnemonic.to_owned(),
            byte_length,
            cycles: Cycles::from_figures(&raw.cycles, self.cycles),
            immediate: raw.immediate,
            operands,
            flags: flag_effects(space, code, raw.flags.as_ref())?,
        })
    }
}

fn flag_effects(space: OpcodeSpace, code: u8, raw: Option<&RawFlags>) -> Result<FlagEffects> {
    let raw = match raw {
        Some(raw) => raw,
        None => return Ok(FlagEffects::default()),
    };

    let effect = |flag: char, text: &Option<String>| match text.as_deref() {
        None => Ok(FlagEffect::Unaffected),
        Some(text) => FlagEffect::parse(flag, text.trim()).ok_or_else(|| {
            Error::MalformedFlagEffect {
                space,
                code,
                flag,
                text: text.to_owned(),
            }
        }),
    };

    Ok(FlagEffects {
        z: effect('Z', &raw.z)?,
        n: effect('N', &raw.n)?,
        h: effect('H', &raw.h)?,
        c: effect('C', &raw.c)?,
    })
}
