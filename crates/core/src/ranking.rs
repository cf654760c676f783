//! Leaderboard aggregation and ranking.
//!
//! The leaderboard builder feeds every scored prediction of a pool through
//! [`aggregate_standings`], which groups by user and applies the fixed
//! tie-break chain: total points desc, exact count desc, prediction count
//! asc, user id asc. Two builds over unchanged data therefore produce
//! identical orderings.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// One scored prediction row, as loaded by the leaderboard builder.
#[derive(Debug, Clone)]
pub struct PredictionEntry {
    pub user_id: DbId,
    /// Registration display name when set, account name otherwise.
    pub display_name: String,
    pub awarded_points: i32,
    pub is_exact: bool,
    /// Whether the scorer has processed this prediction yet.
    pub scored: bool,
}

/// One ranked row of a leaderboard snapshot. Serialized into the
/// snapshot's JSONB `entries` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStanding {
    pub rank: i32,
    pub user_id: DbId,
    pub display_name: String,
    pub total_points: i64,
    pub exact_count: i64,
    /// Heuristic count of sign-only hits: `awarded_points > 0 && !is_exact`.
    /// This conflates "correct sign" with "any positive non-exact score"
    /// when rule sets overlap; kept as-is to match the scoring model.
    pub sign_count: i64,
    pub prediction_count: i64,
}

/// Aggregate prediction rows into ranked standings.
///
/// Unscored predictions count toward `prediction_count` but contribute no
/// points. Returns standings sorted and ranked 1..n.
pub fn aggregate_standings(entries: &[PredictionEntry]) -> Vec<PlayerStanding> {
    let mut by_user: HashMap<DbId, PlayerStanding> = HashMap::new();

    for entry in entries {
        let standing = by_user
            .entry(entry.user_id)
            .or_insert_with(|| PlayerStanding {
                rank: 0,
                user_id: entry.user_id,
                display_name: entry.display_name.clone(),
                total_points: 0,
                exact_count: 0,
                sign_count: 0,
                prediction_count: 0,
            });

        standing.prediction_count += 1;
        if entry.scored {
            standing.total_points += i64::from(entry.awarded_points);
            if entry.is_exact {
                standing.exact_count += 1;
            } else if entry.awarded_points > 0 {
                standing.sign_count += 1;
            }
        }
    }

    let mut standings: Vec<PlayerStanding> = by_user.into_values().collect();
    standings.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then(b.exact_count.cmp(&a.exact_count))
            .then(a.prediction_count.cmp(&b.prediction_count))
            .then(a.user_id.cmp(&b.user_id))
    });

    for (i, standing) in standings.iter_mut().enumerate() {
        standing.rank = i as i32 + 1;
    }

    standings
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(user_id: DbId, name: &str, points: i32, is_exact: bool) -> PredictionEntry {
        PredictionEntry {
            user_id,
            display_name: name.to_string(),
            awarded_points: points,
            is_exact,
            scored: true,
        }
    }

    fn unscored(user_id: DbId, name: &str) -> PredictionEntry {
        PredictionEntry {
            user_id,
            display_name: name.to_string(),
            awarded_points: 0,
            is_exact: false,
            scored: false,
        }
    }

    // -- aggregation ----------------------------------------------------------

    #[test]
    fn sums_points_per_user() {
        let standings = aggregate_standings(&[
            scored(1, "ana", 5, true),
            scored(1, "ana", 3, false),
            scored(2, "bruno", 4, false),
        ]);
        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].user_id, 1);
        assert_eq!(standings[0].total_points, 8);
        assert_eq!(standings[0].exact_count, 1);
        assert_eq!(standings[0].sign_count, 1);
        assert_eq!(standings[0].prediction_count, 2);
    }

    #[test]
    fn unscored_predictions_count_but_add_no_points() {
        let standings = aggregate_standings(&[
            scored(1, "ana", 3, false),
            unscored(1, "ana"),
        ]);
        assert_eq!(standings[0].total_points, 3);
        assert_eq!(standings[0].prediction_count, 2);
        assert_eq!(standings[0].sign_count, 1);
    }

    #[test]
    fn zero_point_scored_prediction_is_not_a_sign_hit() {
        let standings = aggregate_standings(&[scored(1, "ana", 0, false)]);
        assert_eq!(standings[0].sign_count, 0);
        assert_eq!(standings[0].prediction_count, 1);
    }

    #[test]
    fn empty_input_yields_empty_board() {
        assert!(aggregate_standings(&[]).is_empty());
    }

    // -- ordering -------------------------------------------------------------

    #[test]
    fn orders_by_total_points_desc() {
        let standings = aggregate_standings(&[
            scored(1, "ana", 3, false),
            scored(2, "bruno", 5, true),
        ]);
        assert_eq!(standings[0].user_id, 2);
        assert_eq!(standings[0].rank, 1);
        assert_eq!(standings[1].user_id, 1);
        assert_eq!(standings[1].rank, 2);
    }

    #[test]
    fn tie_breaks_on_exact_count() {
        // Both users on 5 points; user 2 got there with an exact hit.
        let standings = aggregate_standings(&[
            scored(1, "ana", 3, false),
            scored(1, "ana", 2, false),
            scored(2, "bruno", 5, true),
            scored(2, "bruno", 0, false),
        ]);
        assert_eq!(standings[0].user_id, 2);
    }

    #[test]
    fn tie_breaks_on_fewer_predictions() {
        // Same points, same exacts; user 2 needed fewer predictions.
        let standings = aggregate_standings(&[
            scored(1, "ana", 3, false),
            scored(1, "ana", 3, false),
            scored(1, "ana", 0, false),
            scored(2, "bruno", 3, false),
            scored(2, "bruno", 3, false),
        ]);
        assert_eq!(standings[0].user_id, 2);
    }

    #[test]
    fn final_tie_break_is_user_id() {
        let standings = aggregate_standings(&[
            scored(7, "g", 3, false),
            scored(2, "b", 3, false),
            scored(5, "e", 3, false),
        ]);
        let order: Vec<DbId> = standings.iter().map(|s| s.user_id).collect();
        assert_eq!(order, vec![2, 5, 7]);
    }

    #[test]
    fn repeated_builds_are_deterministic() {
        let entries = vec![
            scored(3, "c", 4, false),
            scored(1, "a", 4, false),
            scored(2, "b", 5, true),
            unscored(4, "d"),
        ];
        let first = aggregate_standings(&entries);
        let second = aggregate_standings(&entries);
        assert_eq!(first, second);
    }

    // -- end-to-end scenario --------------------------------------------------

    #[test]
    fn two_player_scenario_ranks_exact_over_sign() {
        // Match finished 3-1. User A predicted 3-1 (exact, 5 pts); user B
        // predicted 2-1 (home win, diff 1 vs 2: sign only, 3 pts).
        use crate::scoring::{score_prediction, RuleSet, Scoreline};

        let rules = RuleSet::default();
        let actual = Scoreline::new(3, 1);
        let a = score_prediction(Scoreline::new(3, 1), actual, &rules);
        let b = score_prediction(Scoreline::new(2, 1), actual, &rules);
        assert_eq!(a.points, 5);
        assert_eq!(b.points, 3);

        let standings = aggregate_standings(&[
            scored(1, "user-a", a.points, a.is_exact),
            scored(2, "user-b", b.points, b.is_exact),
        ]);
        assert_eq!(standings[0].user_id, 1);
        assert_eq!(standings[0].rank, 1);
        assert_eq!(standings[0].total_points, 5);
        assert_eq!(standings[1].user_id, 2);
        assert_eq!(standings[1].rank, 2);
        assert_eq!(standings[1].total_points, 3);
    }

    // -- serde ----------------------------------------------------------------

    #[test]
    fn standing_serializes_for_snapshot_column() {
        let standings = aggregate_standings(&[scored(1, "ana", 5, true)]);
        let json = serde_json::to_value(&standings).unwrap();
        assert_eq!(json[0]["rank"], 1);
        assert_eq!(json[0]["display_name"], "ana");
        assert_eq!(json[0]["total_points"], 5);
    }
}
