use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One operand of an opcode entry, as written in the data sheet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct OperandDescriptor {
    pub name: String,
    pub immediate: bool,
    /// Width of the operand in bytes, only present for literal operands.
    #[serde(default)]
    pub bytes: Option<u8>,
    #[serde(default)]
    pub increment: bool,
    #[serde(default)]
    pub decrement: bool,
}

impl OperandDescriptor {
    pub fn new(name: impl Into<String>, immediate: bool) -> Self {
        Self {
            name: name.into(),
            immediate,
            ..Default::default()
        }
    }
}

/// Effect of an instruction on the `Z`, `N`, `H` and `C` flags. Each value is `-`, `0`, `1` or
/// the flag's own letter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RawFlags {
    #[serde(rename = "Z", default)]
    pub z: Option<String>,
    #[serde(rename = "N", default)]
    pub n: Option<String>,
    #[serde(rename = "H", default)]
    pub h: Option<String>,
    #[serde(rename = "C", default)]
    pub c: Option<String>,
}

/// Mnemonic and byte length of the wrong type read as missing, so the table builder can report
/// which opcode and field is at fault.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RawOpcode {
    #[serde(default, deserialize_with = "mnemonic")]
    pub mnemonic: Option<String>,
    #[serde(default, deserialize_with = "byte_length")]
    pub bytes: Option<u8>,
    /// Cycle figures in the order they are listed. Figures that are not numbers are kept as
    /// `None` so the table builder can decide what to do with them.
    #[serde(default, deserialize_with = "cycle_figures")]
    pub cycles: Vec<Option<u32>>,
    #[serde(default)]
    pub immediate: bool,
    #[serde(default)]
    pub operands: Vec<OperandDescriptor>,
    #[serde(default)]
    pub flags: Option<RawFlags>,
}

fn mnemonic<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(mnemonic) => Some(mnemonic),
        _ => None,
    })
}

fn byte_length<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?
        .as_u64()
        .and_then(|n| u8::try_from(n).ok()))
}

fn cycle_figures<'de, D>(deserializer: D) -> Result<Vec<Option<u32>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Figures {
        Many(Vec<Value>),
        One(Value),
    }

    let figures = match Figures::deserialize(deserializer)? {
        Figures::Many(figures) => figures,
        Figures::One(figure) => vec![figure],
    };

    Ok(figures.iter().map(cycle_figure).collect())
}

fn cycle_figure(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// All the entries of one opcode space, in the order they appear in the source.
///
/// A JSON object would normally collapse repeated keys, but two keys can still name the same
/// opcode (`"0xCA"` and `"0xca"`), so every entry is kept as written and validation is left to
/// the table builder.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OpcodeSpaceSource {
    entries: Vec<(String, RawOpcode)>,
}

impl OpcodeSpaceSource {
    pub fn from_entries(entries: Vec<(String, RawOpcode)>) -> Self {
        Self { entries }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (String, RawOpcode)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a OpcodeSpaceSource {
    type Item = &'a (String, RawOpcode);
    type IntoIter = std::slice::Iter<'a, (String, RawOpcode)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<(String, RawOpcode)> for OpcodeSpaceSource {
    fn from_iter<I: IntoIterator<Item = (String, RawOpcode)>>(iter: I) -> Self {
        Self::from_entries(iter.into_iter().collect())
    }
}

struct EntriesVisitor;

impl<'de> Visitor<'de> for EntriesVisitor {
    type Value = OpcodeSpaceSource;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a map of opcode codes to opcode entries")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(256));
        while let Some(entry) = map.next_entry::<String, RawOpcode>()? {
            entries.push(entry);
        }
        Ok(OpcodeSpaceSource { entries })
    }
}

impl<'de> Deserialize<'de> for OpcodeSpaceSource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct DataSheet {
    #[serde(default)]
    pub unprefixed: OpcodeSpaceSource,
    #[serde(default)]
    pub cbprefixed: OpcodeSpaceSource,
}
