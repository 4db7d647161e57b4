use crate::errors::{code_list, Error, Result};
use crate::{AmbiguityCorrector, CycleConvention, OpcodeRecord, RecordBuilder};
use data_sheet::{DataSheet, OpcodeSpaceSource};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use tracing::{debug, info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OpcodeSpace {
    Unprefixed,
    /// Opcodes following the [OpcodeSpace::PREFIX] byte.
    Prefixed,
}

impl OpcodeSpace {
    pub const PREFIX: u8 = 0xCB;

    pub const fn from_prefixed(prefixed: bool) -> Self {
        if prefixed {
            OpcodeSpace::Prefixed
        } else {
            OpcodeSpace::Unprefixed
        }
    }

    pub const fn is_prefixed(self) -> bool {
        matches!(self, OpcodeSpace::Prefixed)
    }

    /// Bytes taken up by the prefix and the opcode itself.
    pub const fn opcode_len(self) -> u8 {
        match self {
            OpcodeSpace::Unprefixed => 1,
            OpcodeSpace::Prefixed => 2,
        }
    }
}

impl Display for OpcodeSpace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OpcodeSpace::Unprefixed => write!(f, "unprefixed"),
            OpcodeSpace::Prefixed => write!(f, "cbprefixed"),
        }
    }
}

/// What to do when an opcode space does not define every code from 0x00 to 0xFF.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Completeness {
    /// Log the missing codes and keep the partial table.
    Warn,
    #[default]
    Fail,
}

impl Display for Completeness {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Completeness::Warn => write!(f, "warn"),
            Completeness::Fail => write!(f, "fail"),
        }
    }
}

impl FromStr for Completeness {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "warn" => Ok(Completeness::Warn),
            "fail" => Ok(Completeness::Fail),
            _ => Err(format!("unknown completeness policy \"{}\"", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    pub completeness: Completeness,
    pub cycles: CycleConvention,
}

/// Parse an opcode key such as `"0xCA"`. The `0x` prefix is optional and case is ignored.
pub fn parse_code(space: OpcodeSpace, key: &str) -> Result<u8> {
    let malformed = || Error::MalformedOpcodeCode {
        space,
        key: key.to_owned(),
    };

    let trimmed = key.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(malformed());
    }

    u8::from_str_radix(digits, 16).map_err(|_| malformed())
}

/// All the opcodes of one space, keyed by code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpcodeMap {
    space: OpcodeSpace,
    records: BTreeMap<u8, OpcodeRecord>,
}

impl OpcodeMap {
    pub fn space(&self) -> OpcodeSpace {
        self.space
    }

    pub fn get(&self, code: u8) -> Option<&OpcodeRecord> {
        self.records.get(&code)
    }

    /// Records in ascending code order.
    pub fn iter(&self) -> btree_map::Values<'_, u8, OpcodeRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn missing_codes(&self) -> Vec<u8> {
        (0..=u8::MAX)
            .filter(|code| !self.records.contains_key(code))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.records.len() == 256
    }
}

impl<'a> IntoIterator for &'a OpcodeMap {
    type Item = &'a OpcodeRecord;
    type IntoIter = btree_map::Values<'a, u8, OpcodeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The unprefixed and prefixed opcode spaces. Built once from a data sheet and only read
/// afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstructionTable {
    unprefixed: OpcodeMap,
    prefixed: OpcodeMap,
}

impl InstructionTable {
    /// Build both spaces with the SM83 ambiguity corrections.
    pub fn build(sheet: &DataSheet, options: BuildOptions) -> Result<Self> {
        TableBuilder::new(options).build(sheet)
    }

    pub fn get(&self, code: u8, prefixed: bool) -> Option<&OpcodeRecord> {
        self.space(OpcodeSpace::from_prefixed(prefixed)).get(code)
    }

    pub fn space(&self, space: OpcodeSpace) -> &OpcodeMap {
        match space {
            OpcodeSpace::Unprefixed => &self.unprefixed,
            OpcodeSpace::Prefixed => &self.prefixed,
        }
    }

    pub fn unprefixed(&self) -> &OpcodeMap {
        &self.unprefixed
    }

    pub fn prefixed(&self) -> &OpcodeMap {
        &self.prefixed
    }

    /// All records, unprefixed first.
    pub fn iter(&self) -> impl Iterator<Item = &OpcodeRecord> {
        self.unprefixed.iter().chain(self.prefixed.iter())
    }
}

#[derive(Clone, Debug, Default)]
pub struct TableBuilder {
    records: RecordBuilder,
    completeness: Completeness,
}

impl TableBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            records: RecordBuilder::new(AmbiguityCorrector::default(), options.cycles),
            completeness: options.completeness,
        }
    }

    pub fn with_corrector(self, corrector: AmbiguityCorrector) -> Self {
        let cycles = self.records.cycle_convention();
        Self {
            records: RecordBuilder::new(corrector, cycles),
            ..self
        }
    }

    /// Build every entry of one opcode space.
    pub fn assemble(&self, space: OpcodeSpace, source: &OpcodeSpaceSource) -> Result<OpcodeMap> {
        let mut records = BTreeMap::new();

        for (key, raw) in source {
            let code = parse_code(space, key)?;

            match records.entry(code) {
                btree_map::Entry::Occupied(_) => {
                    return Err(Error::DuplicateOpcode { space, code });
                }
                btree_map::Entry::Vacant(entry) => {
                    entry.insert(self.records.build(space, code, raw)?);
                }
            }
        }

        let map = OpcodeMap { space, records };

        let missing = map.missing_codes();
        if !missing.is_empty() {
            match self.completeness {
                Completeness::Fail => {
                    return Err(Error::IncompleteOpcodeSpace { space, missing });
                }
                Completeness::Warn => {
                    warn!(
                        "The {} space is missing {} opcode(s): {}",
                        space,
                        missing.len(),
                        code_list(&missing)
                    );
                }
            }
        }

        debug!("Assembled {} {} opcodes", map.len(), space);

        Ok(map)
    }

    pub fn build(&self, sheet: &DataSheet) -> Result<InstructionTable> {
        let unprefixed = self.assemble(OpcodeSpace::Unprefixed, &sheet.unprefixed)?;
        let prefixed = self.assemble(OpcodeSpace::Prefixed, &sheet.cbprefixed)?;

        info!(
            "Built instruction table ({} unprefixed, {} prefixed)",
            unprefixed.len(),
            prefixed.len()
        );

        Ok(InstructionTable {
            unprefixed,
            prefixed,
        })
    }
}
