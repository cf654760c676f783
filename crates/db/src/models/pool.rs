//! Prediction pool rows.

use serde::Serialize;
use sqlx::FromRow;

use penca_core::scoring::RuleSet;
use penca_core::types::{DbId, Timestamp};

/// A row from the `pools` table. Read-only to the pipeline.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Pool {
    pub id: DbId,
    pub tenant_id: DbId,
    pub season_id: DbId,
    pub name: String,
    /// Pool-specific rule set override; NULL falls back to the default.
    pub rule_set: Option<serde_json::Value>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl Pool {
    /// The effective rule set for this pool.
    ///
    /// A malformed JSONB value is treated like an absent one and logged;
    /// the scorer must not stall an entire run on one bad pool config.
    pub fn effective_rule_set(&self) -> RuleSet {
        match &self.rule_set {
            Some(value) => match serde_json::from_value::<RuleSet>(value.clone()) {
                Ok(rules) => rules,
                Err(e) => {
                    tracing::warn!(
                        pool_id = self.id,
                        error = %e,
                        "Malformed rule_set JSON, falling back to default",
                    );
                    RuleSet::default()
                }
            },
            None => RuleSet::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn pool_with(rule_set: Option<serde_json::Value>) -> Pool {
        Pool {
            id: 1,
            tenant_id: 1,
            season_id: 1,
            name: "test".into(),
            rule_set,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn absent_rule_set_uses_default() {
        assert_eq!(pool_with(None).effective_rule_set(), RuleSet::default());
    }

    #[test]
    fn valid_rule_set_is_parsed() {
        let pool = pool_with(Some(serde_json::json!({
            "exact_score": 10,
            "correct_sign": 4,
            "goal_diff_bonus": 2,
        })));
        let rules = pool.effective_rule_set();
        assert_eq!(rules.exact_score, 10);
        assert_eq!(rules.correct_sign, 4);
        assert_eq!(rules.goal_diff_bonus, 2);
    }

    #[test]
    fn malformed_rule_set_falls_back() {
        let pool = pool_with(Some(serde_json::json!({"exact": "nope"})));
        assert_eq!(pool.effective_rule_set(), RuleSet::default());
    }
}
