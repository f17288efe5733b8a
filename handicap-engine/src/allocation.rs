//! Stroke allocation
//!
//! Handicaps are equalized against the lowest course handicap in the round,
//! so the best player receives nothing and everybody else receives the
//! difference, spread over the holes by stroke index.

use round_core::{HoleRank, HolesPlayed, PlayerId};
use serde::Serialize;
use std::collections::BTreeMap;

/// Extra strokes received per hole
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StrokeAllocation(BTreeMap<u8, u32>);

impl StrokeAllocation {
    /// Strokes received on a hole (zero when the hole is not allocated)
    pub fn strokes_on(&self, hole: u8) -> u32 {
        self.0.get(&hole).copied().unwrap_or(0)
    }

    /// Total strokes received
    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    /// Number of holes covered
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no hole is covered
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(hole, strokes)` in hole order
    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.0.iter().map(|(hole, strokes)| (*hole, *strokes))
    }
}

/// Distribute `relative_handicap` strokes over the holes in play.
///
/// Every hole gets `relative / holes`; the `relative % holes` hardest holes
/// (lowest stroke index, then lowest hole number) get one more. Negative
/// handicaps clamp to zero.
pub fn allocate_strokes(
    relative_handicap: i32,
    hole_ranks: &[HoleRank],
    holes_played: HolesPlayed,
) -> StrokeAllocation {
    let relative = relative_handicap.max(0) as u32;
    let holes = u32::from(holes_played.count());
    let base = relative / holes;
    let remainder = (relative % holes) as usize;

    let mut ranked: Vec<HoleRank> = hole_ranks
        .iter()
        .copied()
        .filter(|rank| holes_played.contains(rank.hole))
        .collect();
    ranked.sort_by_key(|rank| (rank.stroke_index, rank.hole));

    let allocation = ranked
        .iter()
        .enumerate()
        .map(|(idx, rank)| {
            let extra = if idx < remainder { 1 } else { 0 };
            (rank.hole, base + extra)
        })
        .collect();

    StrokeAllocation(allocation)
}

/// Handicap of each player relative to the lowest course handicap present
pub fn relative_handicaps<'a>(
    course_handicaps: impl IntoIterator<Item = (&'a PlayerId, i32)>,
) -> BTreeMap<PlayerId, u32> {
    let handicaps: Vec<(&PlayerId, i32)> = course_handicaps.into_iter().collect();
    let lowest = handicaps.iter().map(|(_, hcp)| *hcp).min().unwrap_or(0);

    handicaps
        .into_iter()
        .map(|(player, hcp)| (player.clone(), (hcp - lowest).max(0) as u32))
        .collect()
}
