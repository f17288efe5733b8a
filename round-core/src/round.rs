//! Round lifecycle
//!
//! A round is created `open`, becomes `active` when the first player joins and
//! is `closed` only once every scorecard has been accepted. Course and bet
//! configuration are snapshotted at creation and never change afterwards.

use crate::{
    bets::BetConfig,
    config::Config,
    scorecard::Scorecard,
    tee::{CourseSnapshot, Tee},
    types::{HolesPlayed, NineType, PlayerId, RoundStatus},
    Error, Result,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tee chosen by a player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerTee {
    /// Player
    pub player: PlayerId,

    /// Tee name
    pub tee_name: String,
}

/// One played outing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    /// Round ID (UUIDv7)
    pub id: Uuid,

    /// 9 or 18
    pub holes: u8,

    /// Which nine, for 9-hole rounds
    #[serde(default)]
    pub nine_type: NineType,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    course_snapshot: CourseSnapshot,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    tee_name: Option<String>,

    #[serde(default)]
    config_snapshot: BetConfig,

    #[serde(default)]
    status: RoundStatus,

    #[serde(default)]
    players: Vec<PlayerId>,

    #[serde(default)]
    player_tees: Vec<PlayerTee>,

    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    ended_at: Option<DateTime<Utc>>,
}

impl Round {
    /// Create a round from validated course data
    pub fn new(
        course_snapshot: CourseSnapshot,
        default_tee: Option<String>,
        holes_played: HolesPlayed,
        bets: BetConfig,
    ) -> Result<Self> {
        course_snapshot.validate()?;
        if let Some(name) = default_tee.as_deref() {
            course_snapshot.ensure_tee(name)?;
        }

        let nine_type = match holes_played {
            HolesPlayed::BackNine => NineType::Back,
            _ => NineType::Front,
        };

        let round = Self {
            id: Uuid::now_v7(),
            holes: holes_played.count(),
            nine_type,
            description: None,
            course_snapshot,
            tee_name: default_tee,
            config_snapshot: bets,
            status: RoundStatus::Open,
            players: Vec::new(),
            player_tees: Vec::new(),
            created_at: Utc::now(),
            started_at: None,
            ended_at: None,
        };

        tracing::info!(
            round = %round.id,
            holes = round.holes,
            course = %round.course_snapshot.course_name,
            "round created"
        );

        Ok(round)
    }

    /// Create a round using the configured defaults
    pub fn from_config(course_snapshot: CourseSnapshot, config: &Config) -> Result<Self> {
        let holes_played = HolesPlayed::from_parts(config.round.holes, config.round.nine_type)?;
        Self::new(
            course_snapshot,
            config.round.default_tee.clone(),
            holes_played,
            config.bets.clone(),
        )
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Holes in play
    pub fn holes_played(&self) -> Result<HolesPlayed> {
        HolesPlayed::from_parts(self.holes, self.nine_type)
    }

    /// Course data as it was when the round was created
    pub fn course(&self) -> &CourseSnapshot {
        &self.course_snapshot
    }

    /// Bet configuration as it was when the round was created
    pub fn bets(&self) -> &BetConfig {
        &self.config_snapshot
    }

    /// Round default tee name
    pub fn default_tee(&self) -> Option<&str> {
        self.tee_name.as_deref()
    }

    /// Current status
    pub fn status(&self) -> RoundStatus {
        self.status
    }

    /// Participants in join order
    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    /// Tee selections
    pub fn player_tees(&self) -> &[PlayerTee] {
        &self.player_tees
    }

    /// Creation time
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// First join time
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Close time
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Whether a player joined
    pub fn is_participant(&self, player: &PlayerId) -> bool {
        self.players.contains(player)
    }

    /// Fail once the round is closed
    pub fn ensure_not_closed(&self) -> Result<()> {
        if self.status == RoundStatus::Closed {
            return Err(Error::RoundClosed(self.id.to_string()));
        }
        Ok(())
    }

    /// Join the round with a tee; re-joining just updates the tee
    pub fn join(&mut self, player: PlayerId, tee_name: &str, now: DateTime<Utc>) -> Result<()> {
        self.ensure_not_closed()?;
        self.course_snapshot.ensure_tee(tee_name)?;

        if !self.is_participant(&player) {
            self.players.push(player.clone());
        }
        self.upsert_tee(player.clone(), tee_name);

        self.status = self.status.advance_to(RoundStatus::Active)?;
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }

        tracing::info!(round = %self.id, player = %player, tee = tee_name, "player joined");
        Ok(())
    }

    /// Reassign a participant's tee
    pub fn set_player_tee(&mut self, player: &PlayerId, tee_name: &str) -> Result<()> {
        self.ensure_not_closed()?;
        if !self.is_participant(player) {
            return Err(Error::PlayerNotInRound(player.to_string()));
        }
        self.course_snapshot.ensure_tee(tee_name)?;
        self.upsert_tee(player.clone(), tee_name);
        Ok(())
    }

    /// Remove a participant and their tee selection
    pub fn remove_player(&mut self, player: &PlayerId) -> Result<()> {
        self.ensure_not_closed()?;
        if !self.is_participant(player) {
            return Err(Error::PlayerNotInRound(player.to_string()));
        }
        self.players.retain(|p| p != player);
        self.player_tees.retain(|entry| &entry.player != player);
        tracing::info!(round = %self.id, player = %player, "player removed");
        Ok(())
    }

    fn upsert_tee(&mut self, player: PlayerId, tee_name: &str) {
        match self.player_tees.iter_mut().find(|entry| entry.player == player) {
            Some(entry) => entry.tee_name = tee_name.to_string(),
            None => self.player_tees.push(PlayerTee {
                player,
                tee_name: tee_name.to_string(),
            }),
        }
    }

    /// Player's tee selection, if any
    pub fn tee_selection(&self, player: &PlayerId) -> Option<&str> {
        self.player_tees
            .iter()
            .find(|entry| &entry.player == player)
            .map(|entry| entry.tee_name.as_str())
    }

    /// Tee a player plays from: selection, round default, first tee
    pub fn tee_for(&self, player: &PlayerId) -> Result<&Tee> {
        self.course_snapshot
            .resolve_tee(self.tee_selection(player), self.default_tee())
    }

    /// Tee for a scorecard: the card's tee, then the player's selection
    pub fn tee_for_card(&self, card: &Scorecard) -> Result<&Tee> {
        let selection = Some(card.tee_name.as_str())
            .filter(|name| !name.is_empty())
            .or_else(|| self.tee_selection(&card.player));
        self.course_snapshot.resolve_tee(selection, self.default_tee())
    }

    /// Check the close precondition: at least one card, all accepted
    pub fn ensure_ready_to_close(&self, scorecards: &[Scorecard]) -> Result<()> {
        if scorecards.is_empty() {
            return Err(Error::NotReadyToClose("no scorecards".to_string()));
        }
        let pending: Vec<String> = scorecards
            .iter()
            .filter(|card| !card.accepted)
            .map(|card| card.player.to_string())
            .collect();
        if !pending.is_empty() {
            return Err(Error::NotReadyToClose(format!(
                "scorecards pending acceptance: {}",
                pending.join(", ")
            )));
        }
        Ok(())
    }

    /// Close the round once every scorecard is accepted
    pub fn close(&mut self, scorecards: &[Scorecard], now: DateTime<Utc>) -> Result<()> {
        self.ensure_not_closed()?;
        self.ensure_ready_to_close(scorecards)?;
        self.status = self.status.advance_to(RoundStatus::Closed)?;
        self.ended_at = Some(now);
        tracing::info!(round = %self.id, cards = scorecards.len(), "round closed");
        Ok(())
    }
}
