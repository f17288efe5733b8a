//! Tees and course snapshots
//!
//! A round copies the course's tee data at creation time, so later edits to
//! the course never change historical math.

use crate::{
    types::{Gender, HolesPlayed},
    Error, Result,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Holes on a regulation tee
pub const HOLES_PER_TEE: usize = 18;

/// Single hole of a tee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeeHole {
    /// Par
    pub par: u32,

    /// Length in yards
    #[serde(default)]
    pub yardage: Option<u32>,

    /// Stroke index (1 = hardest)
    pub handicap: u8,

    /// Length in meters
    #[serde(default)]
    pub meters: Option<u32>,
}

/// Hole number paired with its stroke index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleRank {
    /// Course hole number (1-based)
    pub hole: u8,

    /// Stroke index
    pub stroke_index: u8,
}

/// Tee box definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tee {
    /// Tee name (unique within a course)
    pub tee_name: String,

    /// Gender category
    #[serde(default)]
    pub gender: Option<Gender>,

    /// 18-hole course rating
    #[serde(default)]
    pub course_rating: Option<Decimal>,

    /// 18-hole slope rating
    #[serde(default)]
    pub slope_rating: Option<Decimal>,

    /// Front nine course rating
    #[serde(default)]
    pub front_course_rating: Option<Decimal>,

    /// Front nine slope rating
    #[serde(default)]
    pub front_slope_rating: Option<Decimal>,

    /// Back nine course rating
    #[serde(default)]
    pub back_course_rating: Option<Decimal>,

    /// Back nine slope rating
    #[serde(default)]
    pub back_slope_rating: Option<Decimal>,

    /// Published par total, if the source provides one
    #[serde(default)]
    pub par_total: Option<u32>,

    /// Holes in course order
    pub holes: Vec<TeeHole>,
}

impl Tee {
    /// Check hole count and that stroke indexes are a permutation of 1..=18
    pub fn validate(&self) -> Result<()> {
        if self.holes.len() != HOLES_PER_TEE {
            return Err(Error::invalid_tee(
                &self.tee_name,
                format!("expected {} holes, found {}", HOLES_PER_TEE, self.holes.len()),
            ));
        }

        let mut seen = [false; HOLES_PER_TEE];
        for (idx, hole) in self.holes.iter().enumerate() {
            let si = hole.handicap as usize;
            if si == 0 || si > HOLES_PER_TEE {
                return Err(Error::invalid_tee(
                    &self.tee_name,
                    format!("hole {} has stroke index {} outside 1..=18", idx + 1, si),
                ));
            }
            if seen[si - 1] {
                return Err(Error::invalid_tee(
                    &self.tee_name,
                    format!("stroke index {} assigned twice", si),
                ));
            }
            seen[si - 1] = true;
        }

        Ok(())
    }

    /// Hole by course number
    pub fn hole(&self, number: u8) -> Option<&TeeHole> {
        if number == 0 {
            return None;
        }
        self.holes.get(number as usize - 1)
    }

    /// Holes in play, with their course numbers
    pub fn holes_in_play(
        &self,
        holes_played: HolesPlayed,
    ) -> impl Iterator<Item = (u8, &TeeHole)> + '_ {
        holes_played
            .hole_range()
            .filter_map(move |number| self.hole(number).map(|hole| (number, hole)))
    }

    /// Stroke indexes for the holes in play
    pub fn hole_ranks(&self, holes_played: HolesPlayed) -> Vec<HoleRank> {
        self.holes_in_play(holes_played)
            .map(|(hole, h)| HoleRank {
                hole,
                stroke_index: h.handicap,
            })
            .collect()
    }

    /// Par over all 18 holes, preferring the published total
    pub fn total_par(&self) -> u32 {
        self.par_total
            .unwrap_or_else(|| self.holes.iter().map(|h| h.par).sum())
    }

    /// Par for the holes in play
    pub fn par_for(&self, holes_played: HolesPlayed) -> u32 {
        match holes_played {
            HolesPlayed::Eighteen => self.total_par(),
            nine => self.holes_in_play(nine).map(|(_, h)| h.par).sum(),
        }
    }
}

/// Tees grouped by gender, as stored in the course snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeeSet {
    /// Men's tees
    #[serde(default)]
    pub male: Vec<Tee>,

    /// Women's tees
    #[serde(default)]
    pub female: Vec<Tee>,
}

/// Immutable copy of course data taken when a round is created
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSnapshot {
    /// Club name
    #[serde(default)]
    pub club_name: String,

    /// Course name
    #[serde(default)]
    pub course_name: String,

    /// Tees
    #[serde(default)]
    pub tees: TeeSet,
}

impl CourseSnapshot {
    /// All tees, men's first
    pub fn all_tees(&self) -> impl Iterator<Item = &Tee> {
        self.tees.male.iter().chain(self.tees.female.iter())
    }

    /// Find a tee by name
    pub fn tee(&self, name: &str) -> Option<&Tee> {
        self.all_tees().find(|tee| tee.tee_name == name)
    }

    /// Check that a tee name exists
    pub fn ensure_tee(&self, name: &str) -> Result<&Tee> {
        self.tee(name)
            .ok_or_else(|| Error::UnknownTee(name.to_string()))
    }

    /// Resolve a tee: explicit selection, then the round default, then the first tee.
    ///
    /// An explicit selection that names no tee falls through to the defaults,
    /// mirroring how stale selections behaved in the scoring app.
    pub fn resolve_tee(&self, selection: Option<&str>, default: Option<&str>) -> Result<&Tee> {
        selection
            .and_then(|name| self.tee(name))
            .or_else(|| default.and_then(|name| self.tee(name)))
            .or_else(|| self.all_tees().next())
            .ok_or(Error::NoTees)
    }

    /// Validate every tee in the snapshot
    pub fn validate(&self) -> Result<()> {
        if self.all_tees().next().is_none() {
            return Err(Error::NoTees);
        }
        for tee in self.all_tees() {
            tee.validate()?;
        }
        Ok(())
    }
}
