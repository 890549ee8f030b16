//! Match desirability scoring.
//!
//! A proposal is scored as the sum of five weight-scaled components:
//! - level balance (average tier per side)
//! - gender balance (male count per side)
//! - game-count fairness (average games played per side)
//! - opponent diversity (opponent records of team 1)
//! - partner diversity (partner records of every player)
//!
//! Each component lies in `[0, weight]` for non-negative weights. Degenerate
//! shapes (empty teams, zero baselines) score 0 instead of producing NaN.

mod weights;

pub use weights::*;

use serde::Serialize;

use crate::models::{GamesPlayedMap, PairingRecord, Player, PlayerId};

/// Largest possible gap between two level averages (A=4 vs D=1).
const MAX_LEVEL_DIFF: f64 = 3.0;

/// Read-only data the scorer consults besides the teams themselves.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub games_played: &'a GamesPlayedMap,
    pub history: &'a [PairingRecord],
}

impl<'a> ScoringContext<'a> {
    pub fn new(games_played: &'a GamesPlayedMap, history: &'a [PairingRecord]) -> Self {
        Self {
            games_played,
            history,
        }
    }
}

/// Per-component scores of one proposal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScoreBreakdown {
    pub level_balance: f64,
    pub gender_balance: f64,
    pub game_count_fairness: f64,
    pub opponent_diversity: f64,
    pub partner_diversity: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.level_balance
            + self.gender_balance
            + self.game_count_fairness
            + self.opponent_diversity
            + self.partner_diversity
    }
}

/// `1 - diff / max_diff`, or 0 when there is no range to normalise against.
fn closeness(diff: f64, max_diff: f64) -> f64 {
    if max_diff <= 0.0 {
        0.0
    } else {
        1.0 - diff / max_diff
    }
}

/// `min(count, expected) / expected`, or 0 for a zero baseline.
fn capped_ratio(count: usize, expected: usize) -> f64 {
    if expected == 0 {
        0.0
    } else {
        count.min(expected) as f64 / expected as f64
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

fn average_level(team: &[Player]) -> f64 {
    mean(team.iter().map(|p| p.level.value()))
}

fn average_games(team: &[Player], games_played: &GamesPlayedMap) -> f64 {
    mean(
        team.iter()
            .map(|p| games_played.get(&p.id).copied().unwrap_or(0) as f64),
    )
}

fn count_records(player_id: &PlayerId, history: &[PairingRecord], as_opponents: bool) -> usize {
    history
        .iter()
        .filter(|r| r.as_opponents == as_opponents && r.involves(player_id))
        .count()
}

/// Level balance. Zero for teams of different sizes.
pub fn level_balance_score(team1: &[Player], team2: &[Player], weights: &Weights) -> f64 {
    if team1.len() != team2.len() {
        return 0.0;
    }

    let diff = (average_level(team1) - average_level(team2)).abs();
    closeness(diff, MAX_LEVEL_DIFF) * weights.level_balance
}

/// Gender balance. Zero for teams of different sizes.
pub fn gender_balance_score(team1: &[Player], team2: &[Player], weights: &Weights) -> f64 {
    if team1.len() != team2.len() {
        return 0.0;
    }

    let males1 = team1.iter().filter(|p| p.is_male()).count() as f64;
    let males2 = team2.iter().filter(|p| p.is_male()).count() as f64;
    let max_diff = team1.len().max(team2.len()) as f64;

    closeness((males1 - males2).abs(), max_diff) * weights.gender_balance
}

/// Game-count fairness. Defined for unequal sides too.
pub fn game_count_fairness_score(
    team1: &[Player],
    team2: &[Player],
    weights: &Weights,
    games_played: &GamesPlayedMap,
) -> f64 {
    let diff = (average_games(team1, games_played) - average_games(team2, games_played)).abs();
    let max_diff = team1.len().max(team2.len()) as f64;

    closeness(diff, max_diff) * weights.game_count_fairness
}

/// Opponent diversity, averaged over team 1 only.
///
/// The baseline `team1/2 + team2/2` is 2 for doubles and 1 for a pair against
/// a single player.
pub fn opponent_diversity_score(
    team1: &[Player],
    team2: &[Player],
    weights: &Weights,
    history: &[PairingRecord],
) -> f64 {
    let expected = team1.len() / 2 + team2.len() / 2;

    let ratio = mean(
        team1
            .iter()
            .map(|p| capped_ratio(count_records(&p.id, history, true), expected)),
    );

    ratio * weights.opponent_diversity
}

/// Partner diversity, averaged over every player in the match.
///
/// The baseline `total/2 - 1` is 1 for doubles and 0 (scoring nothing) for singles.
pub fn partner_diversity_score(
    team1: &[Player],
    team2: &[Player],
    weights: &Weights,
    history: &[PairingRecord],
) -> f64 {
    let total = team1.len() + team2.len();
    let expected = (total / 2).saturating_sub(1);

    let ratio = mean(
        team1
            .iter()
            .chain(team2.iter())
            .map(|p| capped_ratio(count_records(&p.id, history, false), expected)),
    );

    ratio * weights.partner_diversity
}

/// Score every component of a proposal.
pub fn score_breakdown(
    team1: &[Player],
    team2: &[Player],
    weights: &Weights,
    ctx: &ScoringContext<'_>,
) -> ScoreBreakdown {
    ScoreBreakdown {
        level_balance: level_balance_score(team1, team2, weights),
        gender_balance: gender_balance_score(team1, team2, weights),
        game_count_fairness: game_count_fairness_score(team1, team2, weights, ctx.games_played),
        opponent_diversity: opponent_diversity_score(team1, team2, weights, ctx.history),
        partner_diversity: partner_diversity_score(team1, team2, weights, ctx.history),
    }
}

/// Total desirability of pitting `team1` against `team2`.
pub fn calculate_total_score(
    team1: &[Player],
    team2: &[Player],
    weights: &Weights,
    ctx: &ScoringContext<'_>,
) -> f64 {
    score_breakdown(team1, team2, weights, ctx).total()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Level};

    const EPS: f64 = 1e-9;

    fn p(id: &str, gender: Gender, level: Level) -> Player {
        Player::new(id, id, gender, level)
    }

    fn male(id: &str, level: Level) -> Player {
        p(id, Gender::Male, level)
    }

    fn female(id: &str, level: Level) -> Player {
        p(id, Gender::Female, level)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_level_balance_equal_teams_scores_full_weight() {
        let w = Weights::default();
        let t1 = [male("a", Level::A), male("b", Level::D)];
        let t2 = [male("c", Level::B), male("d", Level::C)];

        assert!(approx(level_balance_score(&t1, &t2, &w), w.level_balance));
    }

    #[test]
    fn test_level_balance_worst_case_is_zero() {
        let w = Weights::default();
        let t1 = [male("a", Level::A), male("b", Level::A)];
        let t2 = [male("c", Level::D), male("d", Level::D)];

        assert!(approx(level_balance_score(&t1, &t2, &w), 0.0));
    }

    #[test]
    fn test_level_balance_partial() {
        let w = Weights::default();
        // averages 3.5 vs 2.0, diff 1.5 -> half of the weight
        let t1 = [male("a", Level::A), male("b", Level::B)];
        let t2 = [male("c", Level::C), male("d", Level::C)];

        assert!(approx(level_balance_score(&t1, &t2, &w), 0.15));
    }

    #[test]
    fn test_level_balance_unknown_counts_as_c() {
        let w = Weights::default();
        let t1 = [male("a", Level::Unknown), male("b", Level::B)];
        let t2 = [male("c", Level::C), male("d", Level::B)];

        assert!(approx(level_balance_score(&t1, &t2, &w), w.level_balance));
    }

    #[test]
    fn test_balance_scores_zero_for_unequal_teams() {
        let w = Weights::default();
        let t1 = [male("a", Level::B), male("b", Level::B)];
        let t2 = [male("c", Level::B)];

        assert_eq!(level_balance_score(&t1, &t2, &w), 0.0);
        assert_eq!(gender_balance_score(&t1, &t2, &w), 0.0);
    }

    #[test]
    fn test_gender_balance() {
        let w = Weights::default();
        let mixed1 = [male("a", Level::B), female("b", Level::B)];
        let mixed2 = [female("c", Level::B), male("d", Level::B)];
        let men = [male("e", Level::B), male("f", Level::B)];
        let women = [female("g", Level::B), female("h", Level::B)];

        assert!(approx(gender_balance_score(&mixed1, &mixed2, &w), w.gender_balance));
        assert!(approx(gender_balance_score(&men, &women, &w), 0.0));
        assert!(approx(gender_balance_score(&men, &mixed1, &w), w.gender_balance / 2.0));
    }

    #[test]
    fn test_game_count_fairness_uses_missing_as_zero() {
        let w = Weights::default();
        let t1 = [male("a", Level::B), male("b", Level::B)];
        let t2 = [male("c", Level::B), male("d", Level::B)];

        let mut games = GamesPlayedMap::new();
        games.insert(PlayerId::from("a"), 2);
        games.insert(PlayerId::from("b"), 0);
        // team1 averages 1.0, team2 averages 0.0; max diff is 2
        assert!(approx(
            game_count_fairness_score(&t1, &t2, &w, &games),
            0.5 * w.game_count_fairness
        ));

        let empty = GamesPlayedMap::new();
        assert!(approx(
            game_count_fairness_score(&t1, &t2, &w, &empty),
            w.game_count_fairness
        ));
    }

    #[test]
    fn test_game_count_fairness_defined_for_singles() {
        let w = Weights::default();
        let t1 = [male("a", Level::B), male("b", Level::B)];
        let t2 = [male("c", Level::B)];

        let score = game_count_fairness_score(&t1, &t2, &w, &GamesPlayedMap::new());
        assert!(approx(score, w.game_count_fairness));
    }

    #[test]
    fn test_opponent_diversity_counts_team1_only() {
        let w = Weights::default();
        let t1 = [male("a", Level::B), male("b", Level::B)];
        let t2 = [male("c", Level::B), male("d", Level::B)];

        let history = vec![
            PairingRecord::opponents(PlayerId::from("x"), PlayerId::from("a")),
            PairingRecord::opponents(PlayerId::from("a"), PlayerId::from("y")),
            PairingRecord::opponents(PlayerId::from("a"), PlayerId::from("z")),
            PairingRecord::partners(PlayerId::from("b"), PlayerId::from("z")),
            PairingRecord::opponents(PlayerId::from("c"), PlayerId::from("z")),
        ];

        // a: 3 capped to 2 -> 1.0, b: 0 opponent records -> 0.0
        assert!(approx(
            opponent_diversity_score(&t1, &t2, &w, &history),
            0.5 * w.opponent_diversity
        ));
    }

    #[test]
    fn test_partner_diversity_counts_all_players() {
        let w = Weights::default();
        let t1 = [male("a", Level::B), male("b", Level::B)];
        let t2 = [male("c", Level::B), male("d", Level::B)];

        let history = vec![
            PairingRecord::partners(PlayerId::from("a"), PlayerId::from("c")),
            PairingRecord::opponents(PlayerId::from("b"), PlayerId::from("d")),
        ];

        // a and c each have one partner record; b and d have none
        assert!(approx(
            partner_diversity_score(&t1, &t2, &w, &history),
            0.5 * w.partner_diversity
        ));
    }

    #[test]
    fn test_opponent_diversity_two_on_one_baseline_is_one() {
        let w = Weights::default();
        let t1 = [male("a", Level::B), male("b", Level::B)];
        let t2 = [male("c", Level::B)];
        let history = vec![PairingRecord::opponents(PlayerId::from("a"), PlayerId::from("x"))];

        // a: min(1, 1) / 1 = 1.0, b: 0.0
        let score = opponent_diversity_score(&t1, &t2, &w, &history);
        assert!(approx(score, 0.05));
    }

    #[test]
    fn test_diversity_guards_for_degenerate_shapes() {
        let w = Weights::default();
        let history = vec![
            PairingRecord::partners(PlayerId::from("a"), PlayerId::from("b")),
            PairingRecord::opponents(PlayerId::from("a"), PlayerId::from("c")),
        ];
        let single = [male("a", Level::B)];
        let other = [male("c", Level::B)];

        let opp = opponent_diversity_score(&single, &other, &w, &history);
        let partner = partner_diversity_score(&single, &other, &w, &history);
        assert_eq!(opp, 0.0);
        assert_eq!(partner, 0.0);

        assert_eq!(opponent_diversity_score(&[], &[], &w, &history), 0.0);
        assert_eq!(partner_diversity_score(&[], &[], &w, &history), 0.0);
    }

    #[test]
    fn test_singles_partner_baseline_is_zero() {
        let w = Weights::default();
        let t1 = [male("a", Level::B), male("b", Level::B)];
        let t2 = [male("c", Level::B)];
        let history = vec![PairingRecord::partners(PlayerId::from("a"), PlayerId::from("b"))];

        let score = partner_diversity_score(&t1, &t2, &w, &history);
        assert!(score.is_finite());
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_total_score_balanced_teams_within_unit_interval() {
        let w = Weights::default();
        let t1 = [male("a", Level::B), female("b", Level::C)];
        let t2 = [female("c", Level::C), male("d", Level::B)];
        let games = GamesPlayedMap::new();
        let ctx = ScoringContext::new(&games, &[]);

        let total = calculate_total_score(&t1, &t2, &w, &ctx);
        assert!((0.0..=1.0).contains(&total));
        assert!(approx(total, 0.8));
    }

    #[test]
    fn test_total_score_matches_breakdown() {
        let w = Weights::default();
        let t1 = [male("a", Level::A), female("b", Level::C)];
        let t2 = [female("c", Level::D), male("d", Level::B)];
        let mut games = GamesPlayedMap::new();
        games.insert(PlayerId::from("c"), 1);
        let history = vec![PairingRecord::opponents(PlayerId::from("a"), PlayerId::from("c"))];
        let ctx = ScoringContext::new(&games, &history);

        let breakdown = score_breakdown(&t1, &t2, &w, &ctx);
        assert_eq!(breakdown.total(), calculate_total_score(&t1, &t2, &w, &ctx));
        assert!(breakdown.total().is_finite());
    }

    #[test]
    fn test_total_score_is_deterministic() {
        let w = Weights::default();
        let t1 = [male("a", Level::A), female("b", Level::C)];
        let t2 = [female("c", Level::D), male("d", Level::B)];
        let games = GamesPlayedMap::new();
        let history = vec![PairingRecord::partners(PlayerId::from("b"), PlayerId::from("d"))];
        let ctx = ScoringContext::new(&games, &history);

        let first = calculate_total_score(&t1, &t2, &w, &ctx);
        for _ in 0..10 {
            assert_eq!(calculate_total_score(&t1, &t2, &w, &ctx).to_bits(), first.to_bits());
        }
    }
}
