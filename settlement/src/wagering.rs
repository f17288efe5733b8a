//! Wagering settlement
//!
//! Turns a finished round into the complete set of directed payments.
//!
//! # Categories
//!
//! Evaluated independently and emitted in a fixed order:
//!
//! 1. **Medal**: lowest net per nine (one medal for a 9-hole round)
//! 2. **Hole winner**: lowest net on each hole
//! 3. **Bonuses**: per card, per hole: birdie, eagle, albatross, sandy par,
//!    hole out, wet par, oh yes
//! 4. **Match**: lowest 18-hole net (18-hole rounds only)
//!
//! Every award is paid by each other participant. A tie at the minimum pays
//! nothing. Penalty tags never produce payments.

use crate::{Error, Result};
use handicap_engine::{
    net::{BACK_NINE, FRONT_NINE},
    net_cards, NetCard,
};
use round_core::{
    BetConfig, HoleEntry, HolesPlayed, Payment, PaymentItem, PlayerId, Round, Scorecard,
};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use uuid::Uuid;

/// Generate every payment for a round.
///
/// Fails with [`Error::IncompleteRound`] unless each participant has a card
/// with strokes on every hole in play that has been accepted. Output order is
/// deterministic for identical inputs.
pub fn settle(round: &Round, scorecards: &[Scorecard], bets: &BetConfig) -> Result<Vec<Payment>> {
    let holes_played = round.holes_played()?;
    ensure_settleable(round, scorecards, holes_played)?;

    let cards = net_cards(round, scorecards)?;
    let mut wager = Wager::new(round.id, bets, &cards);

    match holes_played {
        HolesPlayed::Eighteen => {
            wager.medal(FRONT_NINE, PaymentItem::MedalFront);
            wager.medal(BACK_NINE, PaymentItem::MedalBack);
        }
        HolesPlayed::FrontNine => wager.medal(FRONT_NINE, PaymentItem::MedalFront),
        HolesPlayed::BackNine => wager.medal(BACK_NINE, PaymentItem::MedalBack),
    }

    for hole in holes_played.hole_range() {
        wager.hole_winner(hole);
    }

    for (card, net) in scorecards.iter().zip(cards.iter()) {
        for hole in holes_played.hole_range() {
            let (Some(entry), Some(result)) = (card.entry(hole), net.hole(hole)) else {
                continue;
            };
            for item in bonus_events(entry, result.par) {
                wager.award(&card.player, item, Some(hole));
            }
        }
    }

    if holes_played == HolesPlayed::Eighteen {
        wager.medal(holes_played.hole_range(), PaymentItem::Match);
    }

    let payments = wager.into_payments();
    tracing::info!(
        round = %round.id,
        players = cards.len(),
        payments = payments.len(),
        "payments generated"
    );

    Ok(payments)
}

/// Bonus categories a hole triggers, in payment order
pub fn bonus_events(entry: &HoleEntry, par: u32) -> Vec<PaymentItem> {
    let Some(strokes) = entry.strokes else {
        return Vec::new();
    };

    let mut events = Vec::new();
    match i64::from(strokes) - i64::from(par) {
        -1 => events.push(PaymentItem::Birdie),
        -2 => events.push(PaymentItem::Eagle),
        diff if diff <= -3 => events.push(PaymentItem::Albatross),
        _ => {}
    }
    if entry.sandy {
        events.push(PaymentItem::SandyPar);
    }
    if entry.putts == Some(0) && (entry.hole_out || strokes <= par) {
        events.push(PaymentItem::HoleOut);
    }
    if entry.water && strokes == par {
        events.push(PaymentItem::WetPar);
    }
    if par == 3 && entry.oh_yes {
        events.push(PaymentItem::OhYes);
    }
    events
}

fn ensure_settleable(
    round: &Round,
    scorecards: &[Scorecard],
    holes_played: HolesPlayed,
) -> Result<()> {
    let mut seen = BTreeSet::new();
    for card in scorecards {
        if !round.is_participant(&card.player) {
            return Err(round_core::Error::PlayerNotInRound(card.player.to_string()).into());
        }
        if !seen.insert(&card.player) {
            return Err(Error::Other(format!(
                "duplicate scorecard for {}",
                card.player
            )));
        }

        let missing_holes = card.missing_holes(holes_played);
        if !missing_holes.is_empty() || !card.accepted {
            return Err(Error::IncompleteRound {
                player: card.player.clone(),
                missing_holes,
                accepted: card.accepted,
            });
        }
    }

    if let Some(player) = round.players().iter().find(|p| !seen.contains(p)) {
        return Err(Error::IncompleteRound {
            player: player.clone(),
            missing_holes: holes_played.hole_range().collect(),
            accepted: false,
        });
    }

    Ok(())
}

/// Unique lowest score; `None` on an empty field or a tie at the minimum
fn unique_winner<'c>(scores: impl Iterator<Item = (&'c PlayerId, i32)>) -> Option<&'c PlayerId> {
    let mut best: Option<(&PlayerId, i32)> = None;
    let mut tied = false;

    for (player, score) in scores {
        match best {
            Some((_, low)) if score > low => {}
            Some((_, low)) if score == low => tied = true,
            _ => {
                best = Some((player, score));
                tied = false;
            }
        }
    }

    if tied {
        None
    } else {
        best.map(|(player, _)| player)
    }
}

struct Wager<'a> {
    round_id: Uuid,
    bets: &'a BetConfig,
    cards: &'a [NetCard],
    payments: Vec<Payment>,
}

impl<'a> Wager<'a> {
    fn new(round_id: Uuid, bets: &'a BetConfig, cards: &'a [NetCard]) -> Self {
        Self {
            round_id,
            bets,
            cards,
            payments: Vec::new(),
        }
    }

    /// Lowest net over a range of holes
    fn medal(&mut self, range: RangeInclusive<u8>, item: PaymentItem) {
        let cards = self.cards;
        let winner = unique_winner(
            cards
                .iter()
                .map(|card| (&card.player, card.net_over(range.clone()))),
        );
        if let Some(winner) = winner {
            self.award(winner, item, None);
        }
    }

    fn hole_winner(&mut self, hole: u8) {
        let cards = self.cards;
        let winner = unique_winner(
            cards
                .iter()
                .filter_map(|card| card.net_on(hole).map(|net| (&card.player, net))),
        );
        if let Some(winner) = winner {
            self.award(winner, PaymentItem::HoleWinner, Some(hole));
        }
    }

    /// Every other participant pays `winner` the category amount
    fn award(&mut self, winner: &PlayerId, item: PaymentItem, hole: Option<u8>) {
        let Some(amount) = self.bets.amount(item.category()) else {
            return;
        };

        let cards = self.cards;
        for card in cards.iter().filter(|card| &card.player != winner) {
            self.payments.push(Payment {
                round: self.round_id,
                from: card.player.clone(),
                to: winner.clone(),
                amount,
                item,
                hole,
                note: None,
            });
        }
    }

    fn into_payments(self) -> Vec<Payment> {
        self.payments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{accepted_card, sample_round, sample_round_nine};
    use round_core::{BetCategory, NineType};
    use rust_decimal::Decimal;

    const PARS: [u32; 18] = [4, 4, 3, 5, 4, 4, 3, 4, 5, 4, 3, 4, 5, 4, 4, 3, 5, 4];

    fn only(category: BetCategory, amount: i64) -> BetConfig {
        BetConfig::empty().with_amount(category, Decimal::from(amount))
    }

    fn pars_with(changes: &[(usize, u32)]) -> Vec<u32> {
        let mut strokes = PARS.to_vec();
        for &(hole, value) in changes {
            strokes[hole - 1] = value;
        }
        strokes
    }

    #[test]
    fn test_hole_winner_pays_per_hole() {
        let bets = only(BetCategory::HoleWinner, 10);
        let round = sample_round(&["a", "b"], bets.clone());
        let a = accepted_card(&round, "a", &pars_with(&[(1, 6), (2, 6), (3, 6)]));
        let b = accepted_card(&round, "b", &pars_with(&[(1, 4), (2, 5), (3, 5)]));

        let payments = settle(&round, &[a, b], &bets).unwrap();

        assert_eq!(payments.len(), 3);
        for (payment, hole) in payments.iter().zip(1u8..) {
            assert_eq!(payment.from, PlayerId::new("a"));
            assert_eq!(payment.to, PlayerId::new("b"));
            assert_eq!(payment.amount, Decimal::from(10));
            assert_eq!(payment.item, PaymentItem::HoleWinner);
            assert_eq!(payment.hole, Some(hole));
        }
    }

    #[test]
    fn test_even_round_produces_nothing() {
        let bets = BetConfig::default();
        let round = sample_round(&["a", "b"], bets.clone());
        let a = accepted_card(&round, "a", &PARS);
        let b = accepted_card(&round, "b", &PARS);

        assert!(settle(&round, &[a, b], &bets).unwrap().is_empty());
    }

    #[test]
    fn test_medal_tie_pays_nothing() {
        let bets = only(BetCategory::Medal, 120);
        let round = sample_round(&["a", "b", "c"], bets.clone());
        // a and b tie the front on 35, c shoots 38; back nine all level
        let a = accepted_card(&round, "a", &pars_with(&[(1, 3)]));
        let b = accepted_card(&round, "b", &pars_with(&[(2, 3)]));
        let c = accepted_card(&round, "c", &pars_with(&[(1, 5), (2, 5)]));

        assert!(settle(&round, &[a, b, c], &bets).unwrap().is_empty());
    }

    #[test]
    fn test_medals_and_match_on_eighteen() {
        let bets = only(BetCategory::Medal, 120).with_amount(BetCategory::Match, Decimal::from(50));
        let round = sample_round(&["a", "b"], bets.clone());
        // a wins the front by one, b wins the back by two
        let a = accepted_card(&round, "a", &pars_with(&[(1, 3)]));
        let b = accepted_card(&round, "b", &pars_with(&[(10, 3), (12, 3)]));

        let payments = settle(&round, &[a, b], &bets).unwrap();
        let items: Vec<PaymentItem> = payments.iter().map(|p| p.item).collect();

        assert_eq!(
            items,
            vec![PaymentItem::MedalFront, PaymentItem::MedalBack, PaymentItem::Match]
        );
        assert_eq!(payments[0].to, PlayerId::new("a"));
        assert_eq!(payments[1].to, PlayerId::new("b"));
        assert_eq!(payments[2].to, PlayerId::new("b"));
        assert_eq!(payments[2].amount, Decimal::from(50));
        assert!(payments.iter().all(|p| p.hole.is_none()));
    }

    #[test]
    fn test_nine_hole_round_has_single_medal_and_no_match() {
        let bets = BetConfig::default();
        let round = sample_round_nine(&["a", "b"], bets.clone(), NineType::Back);
        let mut a_strokes = PARS[9..].to_vec();
        a_strokes[0] = 5;
        let a = accepted_card(&round, "a", &a_strokes);
        let b = accepted_card(&round, "b", &PARS[9..]);

        let payments = settle(&round, &[a, b], &bets).unwrap();
        let items: Vec<PaymentItem> = payments.iter().map(|p| p.item).collect();

        assert_eq!(items, vec![PaymentItem::MedalBack, PaymentItem::HoleWinner]);
        assert_eq!(payments[1].hole, Some(10));
    }

    #[test]
    fn test_bonus_order_on_one_hole() {
        let bets = BetConfig::default();
        let round = sample_round(&["a", "b", "c"], bets.clone());

        let mut a = accepted_card(&round, "a", &PARS);
        a.accepted = false;
        let mut entry = HoleEntry::strokes(3, 2).with_putts(0);
        entry.sandy = true;
        entry.oh_yes = true;
        a.record_hole(entry, HolesPlayed::Eighteen).unwrap();
        a.accepted = true;

        let b = accepted_card(&round, "b", &PARS);
        let c = accepted_card(&round, "c", &PARS);

        let payments = settle(&round, &[a, b, c], &bets).unwrap();
        let bonus: Vec<PaymentItem> = payments
            .iter()
            .filter(|p| p.item.is_bonus())
            .map(|p| p.item)
            .collect();

        assert_eq!(
            bonus,
            vec![
                PaymentItem::Birdie,
                PaymentItem::Birdie,
                PaymentItem::SandyPar,
                PaymentItem::SandyPar,
                PaymentItem::HoleOut,
                PaymentItem::HoleOut,
                PaymentItem::OhYes,
                PaymentItem::OhYes,
            ]
        );
        assert!(payments.iter().all(|p| p.to == PlayerId::new("a")));
    }

    #[test]
    fn test_four_players_bonus_count() {
        let bets = only(BetCategory::Birdie, 30).with_amount(BetCategory::WetPar, Decimal::from(20));
        let round = sample_round(&["a", "b", "c", "d"], bets.clone());

        let mut a = accepted_card(&round, "a", &pars_with(&[(1, 3), (5, 3)]));
        a.accepted = false;
        let mut wet = HoleEntry::strokes(7, 3);
        wet.water = true;
        a.record_hole(wet, HolesPlayed::Eighteen).unwrap();
        a.accepted = true;

        let b = accepted_card(&round, "b", &pars_with(&[(18, 3)]));
        let c = accepted_card(&round, "c", &PARS);
        let d = accepted_card(&round, "d", &PARS);

        // 3 birdies and 1 wet par: 4 events, 3 payers each
        let payments = settle(&round, &[a, b, c, d], &bets).unwrap();
        assert_eq!(payments.len(), 12);
    }

    #[test]
    fn test_disabled_category_is_skipped() {
        let bets = only(BetCategory::Eagle, 50);
        let round = sample_round(&["a", "b"], bets.clone());
        let a = accepted_card(&round, "a", &pars_with(&[(1, 3)]));
        let b = accepted_card(&round, "b", &PARS);

        assert!(settle(&round, &[a, b], &bets).unwrap().is_empty());
    }

    #[test]
    fn test_penalties_never_pay() {
        let bets = BetConfig::default();
        let round = sample_round(&["a", "b"], bets.clone());
        let mut a = accepted_card(&round, "a", &PARS);
        a.accepted = false;
        let mut entry = HoleEntry::strokes(1, 4);
        entry.penalties = vec!["cuatriputt".into(), "paloma".into()];
        a.record_hole(entry, HolesPlayed::Eighteen).unwrap();
        a.accepted = true;
        let b = accepted_card(&round, "b", &PARS);

        assert!(settle(&round, &[a, b], &bets).unwrap().is_empty());
    }

    #[test]
    fn test_strokes_received_decide_hole() {
        let bets = only(BetCategory::HoleWinner, 30);
        let round = sample_round(&["a", "b"], bets.clone());
        let a = accepted_card(&round, "a", &PARS);

        // b receives one stroke on stroke index 1 (hole 4): a bogey there halves
        let mut b = accepted_card(&round, "b", &pars_with(&[(4, 6)]));
        b.course_handicap = 1;
        assert!(settle(&round, &[a.clone(), b], &bets).unwrap().is_empty());

        // and a par wins it
        let mut b = accepted_card(&round, "b", &PARS);
        b.course_handicap = 1;
        let payments = settle(&round, &[a, b], &bets).unwrap();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].hole, Some(4));
        assert_eq!(payments[0].from, PlayerId::new("a"));
        assert_eq!(payments[0].to, PlayerId::new("b"));
    }

    #[test]
    fn test_incomplete_or_unsigned_cards_are_rejected() {
        let bets = BetConfig::default();
        let round = sample_round(&["a", "b"], bets.clone());
        let a = accepted_card(&round, "a", &PARS);

        let mut short = accepted_card(&round, "b", &PARS[..17]);
        short.accepted = true;
        match settle(&round, &[a.clone(), short], &bets) {
            Err(Error::IncompleteRound { player, missing_holes, .. }) => {
                assert_eq!(player, PlayerId::new("b"));
                assert_eq!(missing_holes, vec![18]);
            }
            other => panic!("expected incomplete round, got {other:?}"),
        }

        let mut unsigned = accepted_card(&round, "b", &PARS);
        unsigned.accepted = false;
        assert!(matches!(
            settle(&round, &[a.clone(), unsigned], &bets),
            Err(Error::IncompleteRound { accepted: false, .. })
        ));

        assert!(matches!(
            settle(&round, &[a], &bets),
            Err(Error::IncompleteRound { .. })
        ));
    }

    #[test]
    fn test_bonus_events_rules() {
        let birdie_out = HoleEntry::strokes(1, 3).with_putts(0);
        assert_eq!(
            bonus_events(&birdie_out, 4),
            vec![PaymentItem::Birdie, PaymentItem::HoleOut]
        );

        let mut chip_in_bogey = HoleEntry::strokes(1, 5).with_putts(0);
        assert!(bonus_events(&chip_in_bogey, 4).is_empty());
        chip_in_bogey.hole_out = true;
        assert_eq!(bonus_events(&chip_in_bogey, 4), vec![PaymentItem::HoleOut]);

        let mut wet_bogey = HoleEntry::strokes(1, 5);
        wet_bogey.water = true;
        assert!(bonus_events(&wet_bogey, 4).is_empty());

        let mut oh_yes_par4 = HoleEntry::strokes(1, 4);
        oh_yes_par4.oh_yes = true;
        assert!(bonus_events(&oh_yes_par4, 4).is_empty());

        assert_eq!(bonus_events(&HoleEntry::strokes(1, 2), 5), vec![PaymentItem::Albatross]);
        assert_eq!(bonus_events(&HoleEntry::strokes(1, 1), 5), vec![PaymentItem::Albatross]);
        assert_eq!(bonus_events(&HoleEntry::strokes(1, 3), 5), vec![PaymentItem::Eagle]);
        assert!(bonus_events(&HoleEntry::default(), 4).is_empty());
    }

    #[test]
    fn test_settle_is_deterministic() {
        let bets = BetConfig::default();
        let round = sample_round(&["a", "b", "c"], bets.clone());
        let cards = vec![
            accepted_card(&round, "a", &pars_with(&[(1, 3), (9, 6)])),
            accepted_card(&round, "b", &pars_with(&[(2, 3), (11, 2)])),
            accepted_card(&round, "c", &pars_with(&[(4, 4), (17, 6)])),
        ];

        let first = settle(&round, &cards, &bets).unwrap();
        let second = settle(&round, &cards, &bets).unwrap();
        assert_eq!(first, second);
    }
}
