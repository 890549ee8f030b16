//! Pairing history and games-played bookkeeping.
//!
//! The generator only ever reads these. Callers rebuild them from their own
//! match store between rounds with [`games_played_map`] and [`match_history`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// Games played so far in the event, keyed by player.
pub type GamesPlayedMap = HashMap<PlayerId, u32>;

/// One historical fact: two players met as opponents or partnered together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingRecord {
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,

    /// `true` when they played against each other, `false` when partnered
    pub as_opponents: bool,
}

impl PairingRecord {
    pub fn opponents(player1_id: PlayerId, player2_id: PlayerId) -> Self {
        Self {
            player1_id,
            player2_id,
            as_opponents: true,
        }
    }

    pub fn partners(player1_id: PlayerId, player2_id: PlayerId) -> Self {
        Self {
            player1_id,
            player2_id,
            as_opponents: false,
        }
    }

    /// Whether the player is on either side of this record.
    pub fn involves(&self, player_id: &PlayerId) -> bool {
        &self.player1_id == player_id || &self.player2_id == player_id
    }
}

/// Per-participant games counter as stored by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamesPlayedRecord {
    pub player_id: PlayerId,
    pub games_played: u32,
}

/// A player slot in a previously generated match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchParticipant {
    pub player_id: PlayerId,
}

/// A previously generated match; players are ordered team 1 first, then team 2.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PastMatch {
    pub players: Vec<MatchParticipant>,
}

impl PastMatch {
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PlayerId>,
    {
        Self {
            players: ids
                .into_iter()
                .map(|id| MatchParticipant {
                    player_id: id.into(),
                })
                .collect(),
        }
    }
}

/// Build the games-played lookup. A later record for the same player wins.
pub fn games_played_map(records: &[GamesPlayedRecord]) -> GamesPlayedMap {
    records
        .iter()
        .map(|r| (r.player_id.clone(), r.games_played))
        .collect()
}

/// Flatten past matches into pairing records.
///
/// - fewer than 2 players: skipped
/// - 1v1 singles: the opponent pair, recorded twice
/// - 2v1 singles: the lone player against each of the pair
/// - doubles: the two cross-team opponent pairs `(p0, p2)` and `(p1, p3)`
pub fn match_history(matches: &[PastMatch]) -> Vec<PairingRecord> {
    let mut history = Vec::new();

    for past in matches {
        let ids: Vec<&PlayerId> = past.players.iter().map(|p| &p.player_id).collect();

        match ids.as_slice() {
            [] | [_] => continue,
            [p0, p1] => {
                history.push(PairingRecord::opponents((*p0).clone(), (*p1).clone()));
                history.push(PairingRecord::opponents((*p0).clone(), (*p1).clone()));
            }
            [p0, p1, p2] => {
                history.push(PairingRecord::opponents((*p0).clone(), (*p2).clone()));
                history.push(PairingRecord::opponents((*p0).clone(), (*p1).clone()));
            }
            [p0, p1, p2, p3, ..] => {
                history.push(PairingRecord::opponents((*p0).clone(), (*p2).clone()));
                history.push(PairingRecord::opponents((*p1).clone(), (*p3).clone()));
            }
        }
    }

    history
}
