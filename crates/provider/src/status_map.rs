//! Fixed lookup from upstream status codes to canonical match statuses.
//!
//! Codes follow the API-Football short-status vocabulary. Unknown codes
//! default to `SCHEDULED` so a new upstream code never crashes a sync;
//! the match simply stays pending until the code is added here.

use penca_core::status::MatchStatus;

/// Translate an upstream short status code.
pub fn map_status(code: &str) -> MatchStatus {
    match code {
        // not started / to be defined
        "NS" | "TBD" => MatchStatus::Scheduled,
        // first half, halftime, second half, extra time, break,
        // penalties, generic live
        "1H" | "HT" | "2H" | "ET" | "BT" | "P" | "LIVE" | "INT" => MatchStatus::Live,
        // full time, after extra time, after penalties
        "FT" | "AET" | "PEN" => MatchStatus::Finished,
        "PST" => MatchStatus::Postponed,
        // cancelled, abandoned, technical loss, walkover
        "CANC" | "ABD" | "AWD" | "WO" => MatchStatus::Cancelled,
        _ => MatchStatus::Scheduled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheduled_codes() {
        assert_eq!(map_status("NS"), MatchStatus::Scheduled);
        assert_eq!(map_status("TBD"), MatchStatus::Scheduled);
    }

    #[test]
    fn live_codes() {
        for code in ["1H", "HT", "2H", "ET", "BT", "P", "LIVE", "INT"] {
            assert_eq!(map_status(code), MatchStatus::Live, "code {code}");
        }
    }

    #[test]
    fn finished_codes() {
        for code in ["FT", "AET", "PEN"] {
            assert_eq!(map_status(code), MatchStatus::Finished, "code {code}");
        }
    }

    #[test]
    fn side_exit_codes() {
        assert_eq!(map_status("PST"), MatchStatus::Postponed);
        for code in ["CANC", "ABD", "AWD", "WO"] {
            assert_eq!(map_status(code), MatchStatus::Cancelled, "code {code}");
        }
    }

    #[test]
    fn unknown_code_defaults_to_scheduled() {
        assert_eq!(map_status("SUSP2"), MatchStatus::Scheduled);
        assert_eq!(map_status(""), MatchStatus::Scheduled);
    }
}
