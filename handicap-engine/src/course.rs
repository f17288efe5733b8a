//! Course handicap calculator
//!
//! `round(index × slope / 113 + (rating − par))`, using nine-specific
//! ratings for 9-hole rounds. Missing ratings fall back to the raw index.

use crate::Result;
use round_core::{HandicapBasis, HolesPlayed, PlayerId, Round, Scorecard, Tee};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Slope of a course of standard difficulty
const STANDARD_SLOPE: i64 = 113;

/// Rating pair used by the formula
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseRating {
    /// Course rating for the holes played
    pub course_rating: Decimal,

    /// Slope rating for the holes played
    pub slope_rating: Decimal,
}

/// Ratings for the holes played, deriving a nine's rating from the full one when needed
pub fn ratings_for(tee: &Tee, holes_played: HolesPlayed) -> Option<CourseRating> {
    let (nine_rating, nine_slope) = match holes_played {
        HolesPlayed::Eighteen => {
            return Some(CourseRating {
                course_rating: tee.course_rating?,
                slope_rating: tee.slope_rating?,
            })
        }
        HolesPlayed::FrontNine => (tee.front_course_rating, tee.front_slope_rating),
        HolesPlayed::BackNine => (tee.back_course_rating, tee.back_slope_rating),
    };

    let course_rating = match nine_rating {
        Some(rating) => rating,
        None => {
            // Share of the full rating proportional to the nine's share of par
            let total_par = tee.total_par();
            if total_par == 0 {
                return None;
            }
            tee.course_rating? * Decimal::from(tee.par_for(holes_played))
                / Decimal::from(total_par)
        }
    };

    Some(CourseRating {
        course_rating,
        slope_rating: nine_slope.or(tee.slope_rating)?,
    })
}

/// Playing handicap for a tee and hole count. May be negative; never clamped.
pub fn course_handicap(handicap_index: Decimal, tee: &Tee, holes_played: HolesPlayed) -> i32 {
    let raw = match ratings_for(tee, holes_played) {
        Some(CourseRating {
            course_rating,
            slope_rating,
        }) => {
            let par = Decimal::from(tee.par_for(holes_played));
            handicap_index * slope_rating / Decimal::from(STANDARD_SLOPE) + (course_rating - par)
        }
        None => handicap_index,
    };

    round_half_up(raw)
}

/// Round to the nearest whole stroke, halves toward +∞
fn round_half_up(value: Decimal) -> i32 {
    (value + Decimal::new(5, 1)).floor().to_i32().unwrap_or(0)
}

/// Recompute the cached handicap when the tee or base index changed.
///
/// Returns `true` when the card was updated.
pub fn refresh_course_handicap(
    card: &mut Scorecard,
    tee: &Tee,
    handicap_index: Decimal,
    holes_played: HolesPlayed,
) -> bool {
    if !card.needs_handicap_refresh(&tee.tee_name, handicap_index) {
        return false;
    }

    let value = course_handicap(handicap_index, tee, holes_played);
    tracing::debug!(
        player = %card.player,
        tee = %tee.tee_name,
        index = %handicap_index,
        course_handicap = value,
        "course handicap refreshed"
    );
    card.set_course_handicap(
        value,
        HandicapBasis {
            tee_name: tee.tee_name.clone(),
            handicap_index,
        },
    );
    true
}

/// Empty scorecard for a player who joined, with their course handicap computed
pub fn open_scorecard(round: &Round, player: &PlayerId, handicap_index: Decimal) -> Result<Scorecard> {
    if !round.is_participant(player) {
        return Err(round_core::Error::PlayerNotInRound(player.to_string()).into());
    }

    let tee = round.tee_for(player)?;
    tee.validate()?;
    let holes_played = round.holes_played()?;

    let mut card = Scorecard::new(round.id, player.clone(), tee.tee_name.clone());
    refresh_course_handicap(&mut card, tee, handicap_index, holes_played);
    Ok(card)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_round, sample_tee};

    #[test]
    fn test_standard_course_returns_index() {
        let tee = sample_tee("Azules", Decimal::from(72), Decimal::from(113));
        assert_eq!(course_handicap(Decimal::from(14), &tee, HolesPlayed::Eighteen), 14);
        assert_eq!(course_handicap(Decimal::from(-2), &tee, HolesPlayed::Eighteen), -2);
    }

    #[test]
    fn test_slope_and_rating_adjustment() {
        // 10.4 × 131/113 + (71.8 − 72) = 11.856… → 12
        let tee = sample_tee("Azules", Decimal::new(718, 1), Decimal::from(131));
        assert_eq!(course_handicap(Decimal::new(104, 1), &tee, HolesPlayed::Eighteen), 12);
    }

    #[test]
    fn test_plus_handicap_not_clamped() {
        // 1.0 × 113/113 + (69 − 72) = −2
        let tee = sample_tee("Azules", Decimal::from(69), Decimal::from(113));
        assert_eq!(course_handicap(Decimal::ONE, &tee, HolesPlayed::Eighteen), -2);
    }

    #[test]
    fn test_missing_ratings_fall_back_to_index() {
        let mut tee = sample_tee("Azules", Decimal::from(72), Decimal::from(113));
        tee.slope_rating = None;
        assert_eq!(course_handicap(Decimal::from(17), &tee, HolesPlayed::Eighteen), 17);
        assert_eq!(course_handicap(Decimal::new(175, 1), &tee, HolesPlayed::Eighteen), 18);
    }

    #[test]
    fn test_front_nine_specific_ratings() {
        let mut tee = sample_tee("Azules", Decimal::from(72), Decimal::from(113));
        tee.front_course_rating = Some(Decimal::from(37));
        tee.front_slope_rating = Some(Decimal::from(113));
        // 10 + (37 − 36) = 11
        assert_eq!(course_handicap(Decimal::from(10), &tee, HolesPlayed::FrontNine), 11);
    }

    #[test]
    fn test_nine_rating_derived_from_par_share() {
        // Full rating 74 over par 72; back nine par 36 → 37
        let tee = sample_tee("Azules", Decimal::from(74), Decimal::from(113));
        let ratings = ratings_for(&tee, HolesPlayed::BackNine).unwrap();
        assert_eq!(ratings.course_rating, Decimal::from(37));
        assert_eq!(course_handicap(Decimal::from(6), &tee, HolesPlayed::BackNine), 7);
    }

    #[test]
    fn test_half_rounds_up() {
        assert_eq!(round_half_up(Decimal::new(25, 1)), 3);
        assert_eq!(round_half_up(Decimal::new(-25, 1)), -2);
        assert_eq!(round_half_up(Decimal::new(-26, 1)), -3);
    }

    #[test]
    fn test_refresh_only_when_basis_changes() {
        let round = sample_round(&["ana"]);
        let tee = sample_tee("Azules", Decimal::from(72), Decimal::from(113));
        let mut card = Scorecard::new(round.id, PlayerId::new("ana"), "Azules");
        assert!(refresh_course_handicap(&mut card, &tee, Decimal::from(9), HolesPlayed::Eighteen));
        assert_eq!(card.course_handicap, 9);
        assert!(!refresh_course_handicap(&mut card, &tee, Decimal::from(9), HolesPlayed::Eighteen));
        assert!(refresh_course_handicap(&mut card, &tee, Decimal::from(11), HolesPlayed::Eighteen));
        assert_eq!(card.course_handicap, 11);
    }

    #[test]
    fn test_open_scorecard_for_participant() {
        let round = sample_round(&["ana", "beto"]);
        let card = open_scorecard(&round, &PlayerId::new("ana"), Decimal::from(8)).unwrap();
        assert_eq!(card.round, round.id);
        assert_eq!(card.course_handicap, 8);
        assert!(card.holes.is_empty());

        assert!(open_scorecard(&round, &PlayerId::new("zoe"), Decimal::from(8)).is_err());
    }
}
