//! Prediction scoring rules.
//!
//! A pool's rule set awards points for an exact score, a correct result
//! sign (win/draw/loss), and a matching goal difference. The scoring
//! function is pure; the worker's final-match scorer feeds it every
//! unscored prediction of a finished match.

use serde::{Deserialize, Serialize};

/// Default points for an exact score.
pub const DEFAULT_EXACT_SCORE: i32 = 5;
/// Default points for a correct result sign.
pub const DEFAULT_CORRECT_SIGN: i32 = 3;
/// Default bonus when the goal difference also matches.
pub const DEFAULT_GOAL_DIFF_BONUS: i32 = 1;

/// Points configuration for one pool.
///
/// Stored as JSONB on the `pools` row; a NULL column falls back to
/// [`RuleSet::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    pub exact_score: i32,
    pub correct_sign: i32,
    pub goal_diff_bonus: i32,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            exact_score: DEFAULT_EXACT_SCORE,
            correct_sign: DEFAULT_CORRECT_SIGN,
            goal_diff_bonus: DEFAULT_GOAL_DIFF_BONUS,
        }
    }
}

/// A (home, away) score pair, predicted or actual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scoreline {
    pub home: i32,
    pub away: i32,
}

impl Scoreline {
    pub fn new(home: i32, away: i32) -> Self {
        Self { home, away }
    }

    /// Signed goal difference (home - away).
    fn diff(&self) -> i32 {
        self.home - self.away
    }

    /// Result sign: -1 away win, 0 draw, 1 home win.
    fn sign(&self) -> i32 {
        self.diff().signum()
    }
}

/// Outcome of scoring a single prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreOutcome {
    pub points: i32,
    pub is_exact: bool,
}

/// Score one prediction against the actual result.
///
/// - Exact scoreline: `exact_score` points.
/// - Correct sign (win/draw/loss class, draws included): `correct_sign`
///   points, plus `goal_diff_bonus` when the signed goal difference also
///   matches.
/// - Wrong sign: zero points.
pub fn score_prediction(predicted: Scoreline, actual: Scoreline, rules: &RuleSet) -> ScoreOutcome {
    if predicted == actual {
        return ScoreOutcome {
            points: rules.exact_score,
            is_exact: true,
        };
    }

    if predicted.sign() == actual.sign() {
        let mut points = rules.correct_sign;
        if predicted.diff() == actual.diff() {
            points += rules.goal_diff_bonus;
        }
        return ScoreOutcome {
            points,
            is_exact: false,
        };
    }

    ScoreOutcome {
        points: 0,
        is_exact: false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn default_rules() -> RuleSet {
        RuleSet::default()
    }

    // -- exact ----------------------------------------------------------------

    #[test]
    fn exact_score_awards_exact_points() {
        let out = score_prediction(
            Scoreline::new(2, 1),
            Scoreline::new(2, 1),
            &default_rules(),
        );
        assert_eq!(out.points, 5);
        assert!(out.is_exact);
    }

    #[test]
    fn exact_nil_nil_is_exact_not_sign() {
        let out = score_prediction(
            Scoreline::new(0, 0),
            Scoreline::new(0, 0),
            &default_rules(),
        );
        assert_eq!(out.points, 5);
        assert!(out.is_exact);
    }

    // -- sign -----------------------------------------------------------------

    #[test]
    fn correct_sign_wrong_diff() {
        // Predicted 2-1 (+1), actual 3-0 (+3): home win either way, diff differs.
        let out = score_prediction(
            Scoreline::new(2, 1),
            Scoreline::new(3, 0),
            &default_rules(),
        );
        assert_eq!(out.points, 3);
        assert!(!out.is_exact);
    }

    #[test]
    fn draw_sign_with_matching_diff_gets_bonus() {
        // Predicted 1-1, actual 2-2: both draws, both diff 0.
        let out = score_prediction(
            Scoreline::new(1, 1),
            Scoreline::new(2, 2),
            &default_rules(),
        );
        assert_eq!(out.points, 4);
        assert!(!out.is_exact);
    }

    #[test]
    fn home_win_with_matching_diff_gets_bonus() {
        // Predicted 2-1 (+1), actual 3-2 (+1).
        let out = score_prediction(
            Scoreline::new(2, 1),
            Scoreline::new(3, 2),
            &default_rules(),
        );
        assert_eq!(out.points, 4);
        assert!(!out.is_exact);
    }

    #[test]
    fn away_win_sign_matches() {
        let out = score_prediction(
            Scoreline::new(0, 2),
            Scoreline::new(1, 3),
            &default_rules(),
        );
        assert_eq!(out.points, 4); // sign + diff (both -2)
        assert!(!out.is_exact);
    }

    // -- miss -----------------------------------------------------------------

    #[test]
    fn opposite_sign_scores_zero() {
        let out = score_prediction(
            Scoreline::new(0, 1),
            Scoreline::new(1, 0),
            &default_rules(),
        );
        assert_eq!(out.points, 0);
        assert!(!out.is_exact);
    }

    #[test]
    fn predicted_draw_actual_win_scores_zero() {
        let out = score_prediction(
            Scoreline::new(1, 1),
            Scoreline::new(2, 0),
            &default_rules(),
        );
        assert_eq!(out.points, 0);
        assert!(!out.is_exact);
    }

    // -- custom rule sets -----------------------------------------------------

    #[test]
    fn custom_rule_set_is_honored() {
        let rules = RuleSet {
            exact_score: 10,
            correct_sign: 2,
            goal_diff_bonus: 5,
        };
        let exact = score_prediction(Scoreline::new(1, 0), Scoreline::new(1, 0), &rules);
        assert_eq!(exact.points, 10);

        let sign_and_diff = score_prediction(Scoreline::new(2, 1), Scoreline::new(3, 2), &rules);
        assert_eq!(sign_and_diff.points, 7);
    }

    #[test]
    fn default_rule_set_is_5_3_1() {
        let rules = RuleSet::default();
        assert_eq!(rules.exact_score, 5);
        assert_eq!(rules.correct_sign, 3);
        assert_eq!(rules.goal_diff_bonus, 1);
    }

    // -- serde ----------------------------------------------------------------

    #[test]
    fn rule_set_json_round_trip() {
        let rules = RuleSet {
            exact_score: 7,
            correct_sign: 3,
            goal_diff_bonus: 2,
        };
        let json = serde_json::to_value(rules).unwrap();
        assert_eq!(json["exact_score"], 7);
        let back: RuleSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, rules);
    }
}
