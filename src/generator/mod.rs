//! Round generation.
//!
//! A round is assembled greedily: each step asks [`find_best_matches`] for up
//! to two non-overlapping matches over the players still available, commits
//! them, and removes their players from the pool. The loop stops when the
//! step budget is spent, fewer than two players remain, or no match can be
//! formed. Nothing persists between calls; round numbers, game counts and
//! pairing history are threaded through by the caller.

mod candidates;

pub use candidates::*;

use thiserror::Error;
use tracing::{debug, info};

use crate::models::{
    CandidateMatch, GamesPlayedMap, PairingRecord, Player, PlayerId, RoundResult,
};
use crate::scoring::{ScoringContext, Weights};

/// Errors that can occur during round generation.
#[derive(Debug, Error, PartialEq)]
pub enum GeneratorError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Everything one generation call needs.
#[derive(Debug, Clone)]
pub struct GenerateRoundInput {
    /// Eligible players, in the order the enumeration should visit them
    pub participants: Vec<Player>,

    /// Courts open for this round; must be at least 1
    pub courts_available: u32,

    pub games_played: GamesPlayedMap,

    pub history: Vec<PairingRecord>,

    pub weights: Weights,
}

impl GenerateRoundInput {
    pub fn new(participants: Vec<Player>, courts_available: u32) -> Self {
        Self {
            participants,
            courts_available,
            games_played: GamesPlayedMap::new(),
            history: Vec::new(),
            weights: Weights::default(),
        }
    }

    pub fn with_games_played(mut self, games_played: GamesPlayedMap) -> Self {
        self.games_played = games_played;
        self
    }

    pub fn with_history(mut self, history: Vec<PairingRecord>) -> Self {
        self.history = history;
        self
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    pub fn context(&self) -> ScoringContext<'_> {
        ScoringContext::new(&self.games_played, &self.history)
    }
}

/// Generate the matches for the next round.
///
/// Runs at most `min(ceil(participants / 2), courts_available)` greedy steps.
/// Each step may commit up to two matches, so the match count is bounded by
/// the step budget times [`MAX_MATCHES_PER_STEP`] rather than by the court count.
pub fn generate_round(input: &GenerateRoundInput) -> Result<RoundResult, GeneratorError> {
    if input.participants.is_empty() {
        return Ok(RoundResult::empty());
    }

    if input.courts_available == 0 {
        return Err(GeneratorError::InvalidInput(
            "courts_available must be greater than 0".to_string(),
        ));
    }

    let ctx = input.context();
    let max_steps = input.participants.len().div_ceil(2);
    let steps = max_steps.min(input.courts_available as usize);

    let mut available = input.participants.clone();
    let mut matches = Vec::new();

    for step in 0..steps {
        if available.len() < 2 {
            break;
        }

        let best = find_best_matches(&available, &input.weights, &ctx);
        if best.is_empty() {
            debug!(
                "No match can be formed from {} remaining players at step {}",
                available.len(),
                step
            );
            break;
        }

        for candidate in best {
            available.retain(|p| !candidate.contains(&p.id));
            debug!(
                "Committed {} match {} (score {:.4}), {} players left",
                candidate.match_type,
                candidate.id(),
                candidate.score,
                available.len()
            );
            matches.push(candidate);
        }
    }

    let result = RoundResult {
        matches,
        resting_players: available,
    };

    info!(
        "Generated {} matches placing {} of {} participants, {} resting",
        result.matches.len(),
        result.assigned_count(),
        input.participants.len(),
        result.resting_players.len()
    );

    Ok(result)
}

/// Propose matches for the players not already placed in `current`.
pub fn find_next_round_matches(
    current: &[CandidateMatch],
    available: &[Player],
    weights: &Weights,
    ctx: &ScoringContext<'_>,
) -> Vec<CandidateMatch> {
    let used: Vec<&PlayerId> = current
        .iter()
        .flat_map(|m| m.players().map(|p| &p.id))
        .collect();

    let remaining: Vec<Player> = available
        .iter()
        .filter(|p| !used.contains(&&p.id))
        .cloned()
        .collect();

    if remaining.is_empty() {
        return Vec::new();
    }

    find_best_matches(&remaining, weights, ctx)
}
