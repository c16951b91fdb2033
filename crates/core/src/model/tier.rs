use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown tier: {raw}")]
pub struct TierParseError {
    pub raw: String,
}

/// CEFR-style difficulty level selecting which vocabulary catalog to quiz from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    B1,
    B2,
    C1,
    C2,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::B1, Tier::B2, Tier::C1, Tier::C2];

    /// Short label, e.g. `"B1"`.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Tier::B1 => "B1",
            Tier::B2 => "B2",
            Tier::C1 => "C1",
            Tier::C2 => "C2",
        }
    }

    /// Name of the bundled resource backing this tier, e.g. `"B1Level"`.
    #[must_use]
    pub fn resource_name(self) -> &'static str {
        match self {
            Tier::B1 => "B1Level",
            Tier::B2 => "B2Level",
            Tier::C1 => "C1Level",
            Tier::C2 => "C2Level",
        }
    }

    #[must_use]
    pub fn file_name(self) -> String {
        format!("{}.json", self.resource_name())
    }

    #[must_use]
    pub fn display_name(self) -> String {
        format!("{} level", self.code())
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Tier {
    type Err = TierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Tier::ALL
            .into_iter()
            .find(|tier| {
                trimmed.eq_ignore_ascii_case(tier.code())
                    || trimmed.eq_ignore_ascii_case(tier.resource_name())
            })
            .ok_or_else(|| TierParseError {
                raw: s.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_and_resource_names() {
        assert_eq!("b2".parse::<Tier>().unwrap(), Tier::B2);
        assert_eq!(" C1 ".parse::<Tier>().unwrap(), Tier::C1);
        assert_eq!("C2Level".parse::<Tier>().unwrap(), Tier::C2);
        assert!("A1".parse::<Tier>().is_err());
    }

    #[test]
    fn file_name_matches_resource() {
        assert_eq!(Tier::B1.file_name(), "B1Level.json");
        assert_eq!(Tier::C2.to_string(), "C2");
    }
}
