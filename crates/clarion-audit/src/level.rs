//! WCAG conformance level.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::AuditError;

/// Target conformance level. Advisory: carried into reports, never used to
/// filter rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum WcagLevel {
    A,
    #[default]
    AA,
    AAA,
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WcagLevel::A => write!(f, "A"),
            WcagLevel::AA => write!(f, "AA"),
            WcagLevel::AAA => write!(f, "AAA"),
        }
    }
}

impl FromStr for WcagLevel {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "AA" => Ok(Self::AA),
            "AAA" => Ok(Self::AAA),
            _ => Err(AuditError::InvalidLevel(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_levels() {
        assert_eq!("a".parse::<WcagLevel>().unwrap(), WcagLevel::A);
        assert_eq!(" AA ".parse::<WcagLevel>().unwrap(), WcagLevel::AA);
        assert_eq!("aaa".parse::<WcagLevel>().unwrap(), WcagLevel::AAA);
    }

    #[test]
    fn test_parse_invalid_level() {
        let err = "AAAA".parse::<WcagLevel>().unwrap_err();
        assert!(err.to_string().contains("AAAA"));
    }

    #[test]
    fn test_display_round_trips() {
        for level in [WcagLevel::A, WcagLevel::AA, WcagLevel::AAA] {
            assert_eq!(level.to_string().parse::<WcagLevel>().unwrap(), level);
        }
    }
}
