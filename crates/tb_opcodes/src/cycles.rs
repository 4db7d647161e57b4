use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// How the second cycle figure of a conditional instruction is read.
///
/// The data sheet lists conditional branches with two figures, the cost when the branch is taken
/// followed by the cost when it is not, e.g. `JP Z, a16` is `[16, 12]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleConvention {
    /// `branch_taken_extra` is the first figure minus the second: `[16, 12]` is `(16, 4)`.
    #[default]
    Difference,
    /// `branch_taken_extra` is the second figure as written: `[16, 12]` is `(16, 12)`.
    Verbatim,
}

impl Display for CycleConvention {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CycleConvention::Difference => write!(f, "difference"),
            CycleConvention::Verbatim => write!(f, "verbatim"),
        }
    }
}

impl FromStr for CycleConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "difference" => Ok(CycleConvention::Difference),
            "verbatim" => Ok(CycleConvention::Verbatim),
            _ => Err(format!("unknown cycle convention \"{}\"", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cycles {
    pub base: u32,
    pub branch_taken_extra: u32,
}

impl Cycles {
    pub const fn new(base: u32, branch_taken_extra: u32) -> Self {
        Self {
            base,
            branch_taken_extra,
        }
    }

    /// Normalize the figures listed in the data sheet. A missing or non-numeric first figure
    /// becomes 0, and a missing second figure means there is no extra cost.
    pub fn from_figures(figures: &[Option<u32>], convention: CycleConvention) -> Self {
        let base = figures.first().copied().flatten().unwrap_or(0);

        let branch_taken_extra = match (convention, figures.get(1).copied().flatten()) {
            (_, None) => 0,
            (CycleConvention::Difference, Some(second)) => base.saturating_sub(second),
            (CycleConvention::Verbatim, Some(second)) => second,
        };

        Self::new(base, branch_taken_extra)
    }

    /// `true` when the branch taken figure is below the not taken one (`[8, 12]`). Under
    /// [CycleConvention::Difference] such a pair has no extra cost and the second figure is lost.
    pub fn is_inverted(figures: &[Option<u32>]) -> bool {
        matches!(figures, [Some(taken), Some(not_taken), ..] if not_taken > taken)
    }

    /// The figures as they would be listed in the data sheet.
    pub fn to_figures(self, convention: CycleConvention) -> Vec<u32> {
        if self.branch_taken_extra == 0 {
            return vec![self.base];
        }

        match convention {
            CycleConvention::Difference => {
                vec![self.base, self.base.saturating_sub(self.branch_taken_extra)]
            }
            CycleConvention::Verbatim => vec![self.base, self.branch_taken_extra],
        }
    }
}

impl Display for Cycles {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.branch_taken_extra == 0 {
            write!(f, "{}", self.base)
        } else {
            write!(f, "{}/{}", self.base, self.branch_taken_extra)
        }
    }
}
