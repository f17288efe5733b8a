//! Per-player scorecards
//!
//! One scorecard exists per (round, player). It is mutated by its owner or a
//! supervisor until accepted; acceptance is a one-way latch.

use crate::{
    types::{HolesPlayed, PlayerId},
    Error, Result,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Recorded result for one hole
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoleEntry {
    /// Course hole number
    pub hole: u8,

    /// Gross strokes, unset until recorded
    #[serde(default)]
    pub strokes: Option<u32>,

    /// Putts
    #[serde(default)]
    pub putts: Option<u32>,

    /// Par saved from a bunker
    #[serde(default)]
    pub sandy: bool,

    /// Ball found a water hazard
    #[serde(default)]
    pub water: bool,

    /// Par-3 tee shot on the green
    #[serde(default)]
    pub oh_yes: bool,

    /// Holed from off the green
    #[serde(default)]
    pub hole_out: bool,

    /// Penalty tags (display only)
    #[serde(default)]
    pub penalties: Vec<String>,

    /// Free-form note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl HoleEntry {
    /// Entry with strokes only
    pub fn strokes(hole: u8, strokes: u32) -> Self {
        Self {
            hole,
            strokes: Some(strokes),
            ..Default::default()
        }
    }

    /// Set putts
    pub fn with_putts(mut self, putts: u32) -> Self {
        self.putts = Some(putts);
        self
    }
}

/// Inputs the cached course handicap was computed from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandicapBasis {
    /// Tee the handicap applies to
    pub tee_name: String,

    /// Player's handicap index at computation time
    pub handicap_index: Decimal,
}

/// Scorecard for one player in one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scorecard {
    /// Round this card belongs to
    pub round: Uuid,

    /// Card owner
    pub player: PlayerId,

    /// Tee played
    #[serde(default)]
    pub tee_name: String,

    /// Cached course handicap
    #[serde(default)]
    pub course_handicap: i32,

    /// What the cached handicap was computed from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handicap_basis: Option<HandicapBasis>,

    /// Entries ordered by hole number
    #[serde(default, deserialize_with = "deserialize_entries")]
    pub holes: Vec<HoleEntry>,

    /// Cached gross total
    #[serde(default)]
    pub gross_total: u32,

    /// Cached net total
    #[serde(default)]
    pub net_total: i32,

    /// Cached putts total
    #[serde(default)]
    pub putts_total: u32,

    /// Accepted by a supervisor
    #[serde(default)]
    pub accepted: bool,

    /// Who accepted the card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_by: Option<PlayerId>,

    /// When the card was accepted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<DateTime<Utc>>,
}

impl Scorecard {
    /// Empty card created when a player joins
    pub fn new(round: Uuid, player: PlayerId, tee_name: impl Into<String>) -> Self {
        Self {
            round,
            player,
            tee_name: tee_name.into(),
            course_handicap: 0,
            handicap_basis: None,
            holes: Vec::new(),
            gross_total: 0,
            net_total: 0,
            putts_total: 0,
            accepted: false,
            accepted_by: None,
            accepted_at: None,
        }
    }

    /// Fail if the card is frozen
    pub fn ensure_editable(&self) -> Result<()> {
        if self.accepted {
            return Err(Error::ScorecardAccepted(self.player.to_string()));
        }
        Ok(())
    }

    /// Entry for a hole
    pub fn entry(&self, hole: u8) -> Option<&HoleEntry> {
        self.holes.iter().find(|entry| entry.hole == hole)
    }

    /// Recorded strokes for a hole
    pub fn strokes_on(&self, hole: u8) -> Option<u32> {
        self.entry(hole).and_then(|entry| entry.strokes)
    }

    /// Insert or replace the entry for a hole
    pub fn record_hole(&mut self, entry: HoleEntry, holes_played: HolesPlayed) -> Result<()> {
        self.ensure_editable()?;
        if !holes_played.contains(entry.hole) {
            return Err(Error::HoleNotInPlay { hole: entry.hole });
        }

        match self.holes.iter_mut().find(|e| e.hole == entry.hole) {
            Some(existing) => *existing = entry,
            None => {
                let pos = self.holes.partition_point(|e| e.hole < entry.hole);
                self.holes.insert(pos, entry);
            }
        }

        tracing::debug!(player = %self.player, holes = self.holes.len(), "hole recorded");
        Ok(())
    }

    /// Change the tee played; the cached handicap must be refreshed afterwards
    pub fn set_tee(&mut self, tee_name: impl Into<String>) -> Result<()> {
        self.ensure_editable()?;
        self.tee_name = tee_name.into();
        Ok(())
    }

    /// Accept the card (one-way latch)
    pub fn accept(&mut self, by: PlayerId, at: DateTime<Utc>) {
        if self.accepted {
            return;
        }
        self.accepted = true;
        self.accepted_by = Some(by);
        self.accepted_at = Some(at);
    }

    /// Holes in play with no strokes recorded
    pub fn missing_holes(&self, holes_played: HolesPlayed) -> Vec<u8> {
        holes_played
            .hole_range()
            .filter(|hole| self.strokes_on(*hole).is_none())
            .collect()
    }

    /// Every hole in play has strokes
    pub fn is_complete(&self, holes_played: HolesPlayed) -> bool {
        self.missing_holes(holes_played).is_empty()
    }

    /// Gross strokes over the holes in play; unscored holes count zero
    pub fn gross_total_for(&self, holes_played: HolesPlayed) -> u32 {
        holes_played
            .hole_range()
            .filter_map(|hole| self.strokes_on(hole))
            .sum()
    }

    /// Putts over the holes in play; unrecorded putts count zero
    pub fn putts_total_for(&self, holes_played: HolesPlayed) -> u32 {
        holes_played
            .hole_range()
            .filter_map(|hole| self.entry(hole).and_then(|e| e.putts))
            .sum()
    }

    /// Whether the cached handicap is stale for this tee and index
    pub fn needs_handicap_refresh(&self, tee_name: &str, handicap_index: Decimal) -> bool {
        match &self.handicap_basis {
            Some(basis) => basis.tee_name != tee_name || basis.handicap_index != handicap_index,
            None => true,
        }
    }

    /// Store a freshly computed course handicap
    pub fn set_course_handicap(&mut self, course_handicap: i32, basis: HandicapBasis) {
        self.course_handicap = course_handicap;
        self.handicap_basis = Some(basis);
    }
}

/// Loaded entries are sorted by hole; a hole listed twice is rejected
fn deserialize_entries<'de, D>(deserializer: D) -> std::result::Result<Vec<HoleEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut entries = Vec::<HoleEntry>::deserialize(deserializer)?;
    entries.sort_by_key(|e| e.hole);
    if let Some(pair) = entries.windows(2).find(|pair| pair[0].hole == pair[1].hole) {
        return Err(serde::de::Error::custom(format!(
            "hole {} recorded more than once",
            pair[0].hole
        )));
    }
    Ok(entries)
}
