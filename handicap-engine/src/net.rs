//! Net score derivation
//!
//! Net per hole is gross strokes minus strokes received. Unscored holes
//! count zero in the displayed aggregates and mark the card incomplete.

use crate::{
    allocation::{allocate_strokes, relative_handicaps, StrokeAllocation},
    Result,
};
use round_core::{HolesPlayed, PlayerId, Round, Scorecard, Tee};
use serde::Serialize;
use std::ops::RangeInclusive;

/// Front nine hole numbers
pub const FRONT_NINE: RangeInclusive<u8> = 1..=9;

/// Back nine hole numbers
pub const BACK_NINE: RangeInclusive<u8> = 10..=18;

/// Net result for one hole
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoleNet {
    /// Course hole number
    pub hole: u8,

    /// Par from the player's tee
    pub par: u32,

    /// Gross strokes, if recorded
    pub strokes: Option<u32>,

    /// Strokes received on this hole
    pub received: u32,

    /// Net strokes, if recorded
    pub net: Option<i32>,
}

/// Display aggregates for a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetTotals {
    /// Net over holes 1-9, when they are in play
    pub front: Option<i32>,

    /// Net over holes 10-18, 18-hole rounds only
    pub back: Option<i32>,

    /// Net over all holes in play
    pub total: i32,

    /// Gross over all holes in play
    pub gross: u32,
}

/// A scorecard with strokes received applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetCard {
    /// Card owner
    pub player: PlayerId,

    /// Holes in play
    pub holes_played: HolesPlayed,

    /// Per-hole results in hole order
    pub holes: Vec<HoleNet>,
}

impl NetCard {
    /// Apply an allocation to a card's recorded strokes
    pub fn derive(
        card: &Scorecard,
        tee: &Tee,
        allocation: &StrokeAllocation,
        holes_played: HolesPlayed,
    ) -> Self {
        let holes = tee
            .holes_in_play(holes_played)
            .map(|(hole, tee_hole)| {
                let strokes = card.strokes_on(hole);
                let received = allocation.strokes_on(hole);
                HoleNet {
                    hole,
                    par: tee_hole.par,
                    strokes,
                    received,
                    net: strokes.map(|s| s as i32 - received as i32),
                }
            })
            .collect();

        Self {
            player: card.player.clone(),
            holes_played,
            holes,
        }
    }

    /// Result for a hole
    pub fn hole(&self, hole: u8) -> Option<&HoleNet> {
        self.holes.iter().find(|h| h.hole == hole)
    }

    /// Net strokes on a hole, if recorded
    pub fn net_on(&self, hole: u8) -> Option<i32> {
        self.hole(hole).and_then(|h| h.net)
    }

    /// Every hole in play has strokes
    pub fn is_complete(&self) -> bool {
        self.holes.len() == self.holes_played.count() as usize
            && self.holes.iter().all(|h| h.strokes.is_some())
    }

    /// Net over a range of holes; unscored holes count zero
    pub fn net_over(&self, range: RangeInclusive<u8>) -> i32 {
        self.holes
            .iter()
            .filter(|h| range.contains(&h.hole))
            .filter_map(|h| h.net)
            .sum()
    }

    /// Net over every hole in play
    pub fn net_total(&self) -> i32 {
        self.net_over(self.holes_played.hole_range())
    }

    /// Gross over every hole in play
    pub fn gross_total(&self) -> u32 {
        self.holes.iter().filter_map(|h| h.strokes).sum()
    }

    /// Front, back and full aggregates
    pub fn totals(&self) -> NetTotals {
        let front = match self.holes_played {
            HolesPlayed::Eighteen | HolesPlayed::FrontNine => Some(self.net_over(FRONT_NINE)),
            HolesPlayed::BackNine => None,
        };
        let back = match self.holes_played {
            HolesPlayed::Eighteen => Some(self.net_over(BACK_NINE)),
            _ => None,
        };

        NetTotals {
            front,
            back,
            total: self.net_total(),
            gross: self.gross_total(),
        }
    }
}

/// Write gross, net and putts totals back onto the card
pub fn refresh_totals(card: &mut Scorecard, net: &NetCard) {
    card.gross_total = net.gross_total();
    card.net_total = net.net_total();
    card.putts_total = card.putts_total_for(net.holes_played);
}

/// Derive net cards for every scorecard of a round.
///
/// Tees resolve per card (card tee, player selection, round default) and are
/// validated; strokes are allocated from the cached course handicaps relative
/// to the lowest one. Output order matches input order.
pub fn net_cards(round: &Round, scorecards: &[Scorecard]) -> Result<Vec<NetCard>> {
    let holes_played = round.holes_played()?;
    let relative = relative_handicaps(
        scorecards
            .iter()
            .map(|card| (&card.player, card.course_handicap)),
    );

    scorecards
        .iter()
        .map(|card| {
            let tee = round.tee_for_card(card)?;
            tee.validate()?;

            let received = relative.get(&card.player).copied().unwrap_or(0);
            let allocation = allocate_strokes(
                received as i32,
                &tee.hole_ranks(holes_played),
                holes_played,
            );

            tracing::debug!(
                round = %round.id,
                player = %card.player,
                relative_handicap = received,
                "strokes allocated"
            );

            Ok(NetCard::derive(card, tee, &allocation, holes_played))
        })
        .collect()
}
