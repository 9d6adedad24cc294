// src/season.rs

use std::fmt;
use std::str::FromStr;

use crate::error::AnalysisError;

/// Three-month season groupings plus the annual aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    Djf,
    Mam,
    Jja,
    Son,
    Annual,
}

impl Season {
    /// The four three-month seasons, in plotting order.
    pub const FOUR: [Season; 4] = [Season::Djf, Season::Mam, Season::Jja, Season::Son];

    pub fn months(&self) -> &'static [u32] {
        match self {
            Season::Djf => &[12, 1, 2],
            Season::Mam => &[3, 4, 5],
            Season::Jja => &[6, 7, 8],
            Season::Son => &[9, 10, 11],
            Season::Annual => &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12],
        }
    }

    pub fn contains(&self, month: u32) -> bool {
        self.months().contains(&month)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Season::Djf => "DJF",
            Season::Mam => "MAM",
            Season::Jja => "JJA",
            Season::Son => "SON",
            Season::Annual => "annual",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Season {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DJF" => Ok(Season::Djf),
            "MAM" => Ok(Season::Mam),
            "JJA" => Ok(Season::Jja),
            "SON" => Ok(Season::Son),
            "annual" => Ok(Season::Annual),
            other => Err(AnalysisError::InvalidArgument(format!(
                "unknown season '{other}' (expected DJF, MAM, JJA, SON or annual)"
            ))),
        }
    }
}
