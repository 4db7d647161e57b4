use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FlagEffect {
    #[default]
    Unaffected,
    Reset,
    Set,
    /// Depends on the result of the operation.
    Affected,
}

impl FlagEffect {
    /// Parse the data sheet notation for `flag`: `-`, `0`, `1` or the flag's own letter.
    pub fn parse(flag: char, text: &str) -> Option<Self> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some('-'), None) => Some(FlagEffect::Unaffected),
            (Some('0'), None) => Some(FlagEffect::Reset),
            (Some('1'), None) => Some(FlagEffect::Set),
            (Some(c), None) if c == flag => Some(FlagEffect::Affected),
            _ => None,
        }
    }

    pub fn symbol(self, flag: char) -> char {
        match self {
            FlagEffect::Unaffected => '-',
            FlagEffect::Reset => '0',
            FlagEffect::Set => '1',
            FlagEffect::Affected => flag,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FlagEffects {
    pub z: FlagEffect,
    pub n: FlagEffect,
    pub h: FlagEffect,
    pub c: FlagEffect,
}

impl FlagEffects {
    pub const FLAGS: [char; 4] = ['Z', 'N', 'H', 'C'];

    pub fn get(&self, flag: char) -> Option<FlagEffect> {
        match flag {
            'Z' => Some(self.z),
            'N' => Some(self.n),
            'H' => Some(self.h),
            'C' => Some(self.c),
            _ => None,
        }
    }

    pub fn is_unaffected(&self) -> bool {
        *self == Self::default()
    }
}

impl Display for FlagEffects {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for flag in Self::FLAGS {
            if let Some(effect) = self.get(flag) {
                write!(f, "{}", effect.symbol(flag))?;
            }
        }
        Ok(())
    }
}
