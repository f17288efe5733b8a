//! Shared fixtures for settlement integration tests

#![allow(dead_code)]

use chrono::Utc;
use round_core::{
    BetConfig, CourseSnapshot, HoleEntry, HolesPlayed, PlayerId, Round, Scorecard, Tee, TeeHole,
    TeeSet,
};
use rust_decimal::Decimal;

pub const PARS: [u32; 18] = [4, 4, 3, 5, 4, 4, 3, 4, 5, 4, 3, 4, 5, 4, 4, 3, 5, 4];
pub const STROKE_INDEX: [u8; 18] = [7, 3, 15, 1, 11, 5, 17, 9, 13, 8, 16, 2, 12, 6, 10, 18, 4, 14];

pub fn tee() -> Tee {
    Tee {
        tee_name: "Azules".to_string(),
        gender: None,
        course_rating: Some(Decimal::from(72)),
        slope_rating: Some(Decimal::from(113)),
        front_course_rating: None,
        front_slope_rating: None,
        back_course_rating: None,
        back_slope_rating: None,
        par_total: Some(72),
        holes: PARS
            .iter()
            .zip(STROKE_INDEX.iter())
            .map(|(&par, &handicap)| TeeHole {
                par,
                yardage: None,
                handicap,
                meters: None,
            })
            .collect(),
    }
}

pub fn round(players: &[&str], bets: BetConfig, holes_played: HolesPlayed) -> Round {
    let snapshot = CourseSnapshot {
        club_name: "Club Campestre".into(),
        course_name: "Campo Norte".into(),
        tees: TeeSet {
            male: vec![tee()],
            female: vec![],
        },
    };
    let mut round = Round::new(snapshot, Some("Azules".into()), holes_played, bets).unwrap();
    for player in players {
        round.join(PlayerId::new(*player), "Azules", Utc::now()).unwrap();
    }
    round
}

/// Signed card from per-hole entries covering every hole in play
pub fn signed_card(round: &Round, player: &str, entries: Vec<HoleEntry>) -> Scorecard {
    let holes_played = round.holes_played().unwrap();
    let mut card = Scorecard::new(round.id, PlayerId::new(player), "Azules");
    for entry in entries {
        card.record_hole(entry, holes_played).unwrap();
    }
    card.accept(PlayerId::new(player), Utc::now());
    card
}

/// Signed card with plain strokes on the holes in play
pub fn card(round: &Round, player: &str, strokes: &[u32]) -> Scorecard {
    let holes_played = round.holes_played().unwrap();
    let entries = holes_played
        .hole_range()
        .zip(strokes.iter())
        .map(|(hole, &count)| HoleEntry::strokes(hole, count))
        .collect();
    signed_card(round, player, entries)
}
