//! Candidate enumeration for a single greedy step.
//!
//! Every call walks all index quadruples `i < j < k < l` of the available
//! list, so one step costs O(n^4) scorings, each linear in the history
//! length. That is fine for club-night sized pools (a few dozen players) and
//! is the reason the generator should not be pointed at large rosters.

use tracing::trace;

use crate::models::{CandidateMatch, MatchType, Player};
use crate::scoring::{calculate_total_score, ScoringContext, Weights};

/// Most matches a single step may propose.
pub const MAX_MATCHES_PER_STEP: usize = 2;

fn scored(
    team1: Vec<Player>,
    team2: Vec<Player>,
    match_type: MatchType,
    weights: &Weights,
    ctx: &ScoringContext<'_>,
) -> CandidateMatch {
    let score = calculate_total_score(&team1, &team2, weights, ctx);
    CandidateMatch {
        team1,
        team2,
        score,
        match_type,
    }
}

/// Enumerate and score every proposal over `available`, in index order.
///
/// Doubles always pair `{i, j}` against `{k, l}`; the other two splits of the
/// same four players are never tried. When the pool size is odd, each pair
/// `{i, j}` with `j` before the last slot also faces the last player as singles.
pub fn enumerate_candidates(
    available: &[Player],
    weights: &Weights,
    ctx: &ScoringContext<'_>,
) -> Vec<CandidateMatch> {
    let n = available.len();
    let mut candidates = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            let team1 = || vec![available[i].clone(), available[j].clone()];

            for k in (j + 1)..n {
                for l in (k + 1)..n {
                    let team2 = vec![available[k].clone(), available[l].clone()];
                    candidates.push(scored(team1(), team2, MatchType::Doubles, weights, ctx));
                }
            }

            let last = n - 1;
            if n % 2 == 1 && j < last {
                let team2 = vec![available[last].clone()];
                candidates.push(scored(team1(), team2, MatchType::Singles, weights, ctx));
            }
        }
    }

    trace!("Enumerated {} candidates over {} players", candidates.len(), n);
    candidates
}

/// Propose up to two non-overlapping matches from `available`.
///
/// Candidates are ranked by descending score with ties kept in enumeration
/// order. The best candidate is taken first, then the best remaining one that
/// shares no player with it.
pub fn find_best_matches(
    available: &[Player],
    weights: &Weights,
    ctx: &ScoringContext<'_>,
) -> Vec<CandidateMatch> {
    let mut candidates = enumerate_candidates(available, weights, ctx);
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut selected: Vec<CandidateMatch> = Vec::with_capacity(MAX_MATCHES_PER_STEP);
    for candidate in candidates {
        if selected.len() == MAX_MATCHES_PER_STEP {
            break;
        }
        if selected.iter().all(|s| !s.overlaps(&candidate)) {
            selected.push(candidate);
        }
    }

    selected
}
