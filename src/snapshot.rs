//! Event snapshots: the JSON document the CLI feeds into the generator.
//!
//! A snapshot holds what a caller's match store would supply between rounds:
//! the eligible participants, their game counters and the matches played so far.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::generator::GenerateRoundInput;
use crate::models::{
    games_played_map, match_history, CourtAssignment, GamesPlayedMap, GamesPlayedRecord, MatchId,
    PairingRecord, PastMatch, Player, PlayerId, RoundResult,
};
use crate::scoring::Weights;

/// Errors that can occur while loading a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown player id in {context}: {id}")]
    UnknownPlayer { context: String, id: String },

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),
}

/// State of an event before the next round is generated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventSnapshot {
    /// Number of rounds already generated
    #[serde(default)]
    pub rounds_played: u32,

    /// Court count for the next round, if the event fixes one
    #[serde(default)]
    pub courts_available: Option<u32>,

    pub participants: Vec<Player>,

    #[serde(default)]
    pub games_played: Vec<GamesPlayedRecord>,

    #[serde(default)]
    pub matches: Vec<PastMatch>,
}

impl EventSnapshot {
    /// Read a snapshot from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, SnapshotError> {
        if !path.exists() {
            return Err(SnapshotError::PathNotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path)?;
        let snapshot: EventSnapshot = serde_json::from_str(&contents)?;
        debug!(
            "Loaded snapshot with {} participants and {} past matches from {:?}",
            snapshot.participants.len(),
            snapshot.matches.len(),
            path
        );
        Ok(snapshot)
    }

    /// Round number the next generated round will carry.
    pub fn next_round_number(&self) -> u32 {
        self.rounds_played + 1
    }

    pub fn games_played_map(&self) -> GamesPlayedMap {
        games_played_map(&self.games_played)
    }

    pub fn match_history(&self) -> Vec<PairingRecord> {
        match_history(&self.matches)
    }

    /// Look up participants by id, preserving the requested order.
    pub fn players_by_id(
        &self,
        ids: &[PlayerId],
        context: &str,
    ) -> Result<Vec<Player>, SnapshotError> {
        ids.iter()
            .map(|id| {
                self.participants
                    .iter()
                    .find(|p| &p.id == id)
                    .cloned()
                    .ok_or_else(|| SnapshotError::UnknownPlayer {
                        context: context.to_string(),
                        id: id.to_string(),
                    })
            })
            .collect()
    }

    /// Build generator input. `courts` overrides the snapshot's own court count,
    /// which in turn overrides `default_courts`.
    pub fn to_round_input(
        &self,
        courts: Option<u32>,
        default_courts: u32,
        weights: Weights,
    ) -> GenerateRoundInput {
        let courts = courts.or(self.courts_available).unwrap_or(default_courts);

        GenerateRoundInput::new(self.participants.clone(), courts)
            .with_games_played(self.games_played_map())
            .with_history(self.match_history())
            .with_weights(weights)
    }
}

/// A generated round ready to hand back to the caller.
#[derive(Debug, Serialize)]
pub struct RoundPlan<'a> {
    pub round_number: u32,
    pub courts: Vec<PlannedCourt<'a>>,
    pub resting_players: &'a [Player],
}

/// One court of a [`RoundPlan`].
#[derive(Debug, Serialize)]
pub struct PlannedCourt<'a> {
    pub match_id: MatchId,
    #[serde(flatten)]
    pub assignment: CourtAssignment<'a>,
}

impl<'a> RoundPlan<'a> {
    pub fn new(round_number: u32, result: &'a RoundResult) -> Self {
        Self {
            round_number,
            courts: result
                .court_assignments()
                .map(|assignment| PlannedCourt {
                    match_id: assignment.assigned.id(),
                    assignment,
                })
                .collect(),
            resting_players: &result.resting_players,
        }
    }
}
