//! Match status state machine.
//!
//! Statuses move one way only: `SCHEDULED -> LIVE -> FINISHED`, with
//! `POSTPONED` and `CANCELLED` as side exits from the non-terminal states.
//! No backward transitions exist. [`MatchStatus::can_transition`] encodes
//! the machine for Rust callers; the match upsert and the kickoff lock
//! enforce the same rules in SQL so concurrent writers cannot reopen a
//! settled match.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status string constants (database representation)
// ---------------------------------------------------------------------------

/// Match has not kicked off yet; predictions are editable.
pub const STATUS_SCHEDULED: &str = "SCHEDULED";
/// Match is in progress; predictions are locked.
pub const STATUS_LIVE: &str = "LIVE";
/// Match has a final score.
pub const STATUS_FINISHED: &str = "FINISHED";
/// Match was postponed before or during play.
pub const STATUS_POSTPONED: &str = "POSTPONED";
/// Match was cancelled, abandoned, or awarded.
pub const STATUS_CANCELLED: &str = "CANCELLED";

/// All valid match statuses.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_SCHEDULED,
    STATUS_LIVE,
    STATUS_FINISHED,
    STATUS_POSTPONED,
    STATUS_CANCELLED,
];

// ---------------------------------------------------------------------------
// Enum
// ---------------------------------------------------------------------------

/// Canonical match status enum with string conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchStatus {
    Scheduled,
    Live,
    Finished,
    Postponed,
    Cancelled,
}

impl MatchStatus {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => STATUS_SCHEDULED,
            Self::Live => STATUS_LIVE,
            Self::Finished => STATUS_FINISHED,
            Self::Postponed => STATUS_POSTPONED,
            Self::Cancelled => STATUS_CANCELLED,
        }
    }

    /// Parse from a string, returning an error for unknown statuses.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_SCHEDULED => Ok(Self::Scheduled),
            STATUS_LIVE => Ok(Self::Live),
            STATUS_FINISHED => Ok(Self::Finished),
            STATUS_POSTPONED => Ok(Self::Postponed),
            STATUS_CANCELLED => Ok(Self::Cancelled),
            other => Err(CoreError::Validation(format!(
                "Unknown match status: '{other}'. Valid statuses: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }

    /// Whether the status admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Postponed | Self::Cancelled)
    }

    /// Whether a transition from `self` to `to` is allowed.
    ///
    /// Self-transitions are allowed (re-syncing an unchanged status is a
    /// no-op, not an error).
    pub fn can_transition(&self, to: MatchStatus) -> bool {
        if *self == to {
            return true;
        }
        match self {
            Self::Scheduled => matches!(to, Self::Live | Self::Finished | Self::Postponed | Self::Cancelled),
            Self::Live => matches!(to, Self::Finished | Self::Postponed | Self::Cancelled),
            Self::Finished | Self::Postponed | Self::Cancelled => false,
        }
    }

    /// Whether a match in this status must have locked predictions.
    ///
    /// Anything past `SCHEDULED` is no longer editable by players.
    pub fn requires_lock(&self) -> bool {
        !matches!(self, Self::Scheduled)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- string round-trips ---------------------------------------------------

    #[test]
    fn as_str_matches_constants() {
        assert_eq!(MatchStatus::Scheduled.as_str(), "SCHEDULED");
        assert_eq!(MatchStatus::Live.as_str(), "LIVE");
        assert_eq!(MatchStatus::Finished.as_str(), "FINISHED");
        assert_eq!(MatchStatus::Postponed.as_str(), "POSTPONED");
        assert_eq!(MatchStatus::Cancelled.as_str(), "CANCELLED");
    }

    #[test]
    fn from_str_valid() {
        for s in VALID_STATUSES {
            assert_eq!(MatchStatus::from_str(s).unwrap().as_str(), *s);
        }
    }

    #[test]
    fn from_str_invalid() {
        assert!(MatchStatus::from_str("IN_PLAY").is_err());
        assert!(MatchStatus::from_str("scheduled").is_err());
        assert!(MatchStatus::from_str("").is_err());
    }

    // -- transitions ----------------------------------------------------------

    #[test]
    fn scheduled_can_go_live() {
        assert!(MatchStatus::Scheduled.can_transition(MatchStatus::Live));
    }

    #[test]
    fn scheduled_can_finish_directly() {
        // A match imported after the fact jumps straight to FINISHED.
        assert!(MatchStatus::Scheduled.can_transition(MatchStatus::Finished));
    }

    #[test]
    fn live_can_finish() {
        assert!(MatchStatus::Live.can_transition(MatchStatus::Finished));
    }

    #[test]
    fn no_backward_transitions() {
        assert!(!MatchStatus::Live.can_transition(MatchStatus::Scheduled));
        assert!(!MatchStatus::Finished.can_transition(MatchStatus::Live));
        assert!(!MatchStatus::Finished.can_transition(MatchStatus::Scheduled));
    }

    #[test]
    fn terminal_statuses_admit_nothing() {
        for terminal in [
            MatchStatus::Finished,
            MatchStatus::Postponed,
            MatchStatus::Cancelled,
        ] {
            assert!(terminal.is_terminal());
            assert!(!terminal.can_transition(MatchStatus::Scheduled));
            assert!(!terminal.can_transition(MatchStatus::Live));
        }
        assert!(!MatchStatus::Finished.can_transition(MatchStatus::Cancelled));
    }

    #[test]
    fn side_exits_from_non_terminal() {
        assert!(MatchStatus::Scheduled.can_transition(MatchStatus::Postponed));
        assert!(MatchStatus::Scheduled.can_transition(MatchStatus::Cancelled));
        assert!(MatchStatus::Live.can_transition(MatchStatus::Cancelled));
    }

    #[test]
    fn self_transition_is_allowed() {
        assert!(MatchStatus::Finished.can_transition(MatchStatus::Finished));
        assert!(MatchStatus::Scheduled.can_transition(MatchStatus::Scheduled));
    }

    // -- requires_lock --------------------------------------------------------

    #[test]
    fn only_scheduled_is_editable() {
        assert!(!MatchStatus::Scheduled.requires_lock());
        assert!(MatchStatus::Live.requires_lock());
        assert!(MatchStatus::Finished.requires_lock());
        assert!(MatchStatus::Postponed.requires_lock());
        assert!(MatchStatus::Cancelled.requires_lock());
    }
}
