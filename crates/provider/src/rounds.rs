//! Round/matchday extraction from free-text round labels.
//!
//! Providers report rounds as prose ("Regular Season - 12", "Jornada 3",
//! "Quarter-finals"). We take the first integer in the label as both the
//! round and the matchday. Labels without a number fall back to round 1
//! with no matchday. This is a known lossy transform: distinct knockout
//! labels can collapse onto round 1. Do not "fix" it here; disambiguation
//! belongs upstream in the provider data.

use std::sync::OnceLock;

use regex::Regex;

fn number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("static regex"))
}

/// Parsed round information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedRound {
    pub round: i32,
    pub matchday: Option<i32>,
}

/// Extract round and matchday from a free-text label.
pub fn parse_round(label: &str) -> ParsedRound {
    match number_re()
        .find(label)
        .and_then(|m| m.as_str().parse::<i32>().ok())
    {
        Some(n) => ParsedRound {
            round: n,
            matchday: Some(n),
        },
        None => ParsedRound {
            round: 1,
            matchday: None,
        },
    }
}
