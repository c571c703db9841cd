//! Core data models for hazgraph
//!
//! The severity scale is the one fixed vocabulary shared by ingestion,
//! propagation, pruning, and styling: six letter codes, `A` worst through
//! `F` least severe, each with an ordinal rank and a display colour.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Severity levels from the hazard worksheet.
///
/// Declaration order gives `F < E < D < C < B < A`, so the derived `Ord`
/// agrees with the worksheet convention that `A` is the worst outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    F,
    E,
    D,
    C,
    B,
    A,
}

impl Severity {
    /// All levels, least severe first.
    pub const ALL: [Severity; 6] = [
        Severity::F,
        Severity::E,
        Severity::D,
        Severity::C,
        Severity::B,
        Severity::A,
    ];

    /// Ordinal rank on the scale (1 = least severe, 6 = worst).
    pub fn rank(self) -> i64 {
        match self {
            Severity::F => 1,
            Severity::E => 2,
            Severity::D => 3,
            Severity::C => 4,
            Severity::B => 5,
            Severity::A => 6,
        }
    }

    /// Display colour consumed by the graph viewer.
    pub fn colour(self) -> &'static str {
        match self {
            Severity::F => "#008000",
            Severity::E => "#7A9A40",
            Severity::D => "#C2DE68",
            Severity::C => "#FFCC66",
            Severity::B => "#F4B98C",
            Severity::A => "#FA0018",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::F => write!(f, "F"),
            Severity::E => write!(f, "E"),
            Severity::D => write!(f, "D"),
            Severity::C => write!(f, "C"),
            Severity::B => write!(f, "B"),
            Severity::A => write!(f, "A"),
        }
    }
}

/// A severity code outside the fixed scale. Always fatal: a worksheet with
/// an unrecognized code is a configuration problem, not a skippable row.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown severity code {0:?} (expected one of A-F)")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Severity::A),
            "B" => Ok(Severity::B),
            "C" => Ok(Severity::C),
            "D" => Ok(Severity::D),
            "E" => Ok(Severity::E),
            "F" => Ok(Severity::F),
            _ => Err(UnknownSeverity(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_matches_ranks() {
        assert!(Severity::A > Severity::B);
        assert!(Severity::F < Severity::E);
        for pair in Severity::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].rank() < pair[1].rank());
        }
    }

    #[test]
    fn test_rank_endpoints() {
        assert_eq!(Severity::F.rank(), 1);
        assert_eq!(Severity::A.rank(), 6);
    }

    #[test]
    fn test_parse_codes() {
        assert_eq!("A".parse::<Severity>(), Ok(Severity::A));
        assert_eq!(" d ".parse::<Severity>(), Ok(Severity::D));
        assert_eq!("f".parse::<Severity>(), Ok(Severity::F));
        assert!("G".parse::<Severity>().is_err());
        assert!("".parse::<Severity>().is_err());
    }

    #[test]
    fn test_colour_lookup() {
        assert_eq!(Severity::A.colour(), "#FA0018");
        assert_eq!(Severity::F.colour(), "#008000");
    }
}
