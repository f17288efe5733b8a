//! Core types shared by every crate in the workspace
//!
//! Hole numbers are 1-based course hole numbers (`u8`), stroke counts are
//! non-negative (`u32`), money, ratings and handicap indexes are exact
//! decimals.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Player identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create new player ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Tee gender category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Men's tees
    Male,
    /// Women's tees
    Female,
}

/// Which nine is played in a 9-hole round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NineType {
    /// Holes 1-9
    #[default]
    Front,
    /// Holes 10-18
    Back,
}

/// Holes in play for a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HolesPlayed {
    /// Full 18 holes
    Eighteen,
    /// Front nine only
    FrontNine,
    /// Back nine only
    BackNine,
}

impl HolesPlayed {
    /// Build from the external `holes` + `nineType` pair
    pub fn from_parts(holes: u8, nine: NineType) -> Result<Self> {
        match (holes, nine) {
            (18, _) => Ok(HolesPlayed::Eighteen),
            (9, NineType::Front) => Ok(HolesPlayed::FrontNine),
            (9, NineType::Back) => Ok(HolesPlayed::BackNine),
            (other, _) => Err(Error::InvalidHoleCount(format!(
                "{} holes (expected 9 or 18)",
                other
            ))),
        }
    }

    /// Number of holes in play
    pub fn count(&self) -> u8 {
        match self {
            HolesPlayed::Eighteen => 18,
            HolesPlayed::FrontNine | HolesPlayed::BackNine => 9,
        }
    }

    /// Course hole numbers in play
    pub fn hole_range(&self) -> RangeInclusive<u8> {
        match self {
            HolesPlayed::Eighteen => 1..=18,
            HolesPlayed::FrontNine => 1..=9,
            HolesPlayed::BackNine => 10..=18,
        }
    }

    /// Check whether a hole number is in play
    pub fn contains(&self, hole: u8) -> bool {
        self.hole_range().contains(&hole)
    }

    /// Whether this is a 9-hole round
    pub fn is_nine(&self) -> bool {
        self.count() == 9
    }
}

/// Round lifecycle status (monotonic)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RoundStatus {
    /// Created, nobody joined yet
    #[default]
    Open,
    /// At least one player joined
    Active,
    /// Every scorecard accepted, round frozen
    Closed,
}

impl RoundStatus {
    /// Status name
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundStatus::Open => "open",
            RoundStatus::Active => "active",
            RoundStatus::Closed => "closed",
        }
    }

    /// Validate a transition; staying in place is allowed, going back is not
    pub fn advance_to(self, next: RoundStatus) -> Result<RoundStatus> {
        if next < self {
            return Err(Error::StatusRegression {
                from: self.to_string(),
                to: next.to_string(),
            });
        }
        Ok(next)
    }
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holes_played_ranges() {
        assert_eq!(HolesPlayed::Eighteen.hole_range(), 1..=18);
        assert_eq!(HolesPlayed::FrontNine.hole_range(), 1..=9);
        assert_eq!(HolesPlayed::BackNine.hole_range(), 10..=18);
        assert!(HolesPlayed::BackNine.contains(12));
        assert!(!HolesPlayed::BackNine.contains(3));
    }

    #[test]
    fn test_holes_played_from_parts() {
        assert_eq!(
            HolesPlayed::from_parts(18, NineType::Back).unwrap(),
            HolesPlayed::Eighteen
        );
        assert_eq!(
            HolesPlayed::from_parts(9, NineType::Back).unwrap(),
            HolesPlayed::BackNine
        );
        assert!(HolesPlayed::from_parts(12, NineType::Front).is_err());
    }

    #[test]
    fn test_status_never_regresses() {
        assert_eq!(
            RoundStatus::Open.advance_to(RoundStatus::Active).unwrap(),
            RoundStatus::Active
        );
        assert_eq!(
            RoundStatus::Active.advance_to(RoundStatus::Active).unwrap(),
            RoundStatus::Active
        );
        assert!(RoundStatus::Closed.advance_to(RoundStatus::Active).is_err());
        assert!(RoundStatus::Active.advance_to(RoundStatus::Open).is_err());
    }
}
