//! Generated matches and round results.

use serde::{Deserialize, Serialize};

use super::{EntityId, MatchId, Player, PlayerId};

/// Match format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchType {
    /// Two players per side
    Doubles,
    /// A pair against a single player
    Singles,
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchType::Doubles => write!(f, "DOUBLES"),
            MatchType::Singles => write!(f, "SINGLES"),
        }
    }
}

/// A scored match proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMatch {
    pub team1: Vec<Player>,
    pub team2: Vec<Player>,
    pub score: f64,
    pub match_type: MatchType,
}

impl CandidateMatch {
    /// All players in the match, team 1 first.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.team1.iter().chain(self.team2.iter())
    }

    pub fn contains(&self, player_id: &PlayerId) -> bool {
        self.players().any(|p| &p.id == player_id)
    }

    /// Whether the two matches share any player.
    pub fn overlaps(&self, other: &CandidateMatch) -> bool {
        self.players().any(|p| other.contains(&p.id))
    }

    /// Deterministic id derived from the ordered player ids.
    pub fn id(&self) -> MatchId {
        let ids: Vec<&str> = self.players().map(|p| p.id.as_str()).collect();
        EntityId::generate(&ids)
    }
}

/// A match placed on a numbered court.
#[derive(Debug, Clone, Serialize)]
pub struct CourtAssignment<'a> {
    /// 1-based court number
    pub court_number: u32,
    #[serde(rename = "match")]
    pub assigned: &'a CandidateMatch,
}

/// Outcome of one generation call: committed matches plus everyone left over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub matches: Vec<CandidateMatch>,
    pub resting_players: Vec<Player>,
}

impl RoundResult {
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when no match could be formed.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Number of players placed in a match.
    pub fn assigned_count(&self) -> usize {
        self.matches.iter().map(|m| m.players().count()).sum()
    }

    /// Courts numbered from 1 in match order.
    pub fn court_assignments(&self) -> impl Iterator<Item = CourtAssignment<'_>> {
        self.matches
            .iter()
            .enumerate()
            .map(|(i, m)| CourtAssignment {
                court_number: i as u32 + 1,
                assigned: m,
            })
    }
}
