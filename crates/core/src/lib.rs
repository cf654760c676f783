//! `penca-core` -- pure domain logic for the prediction-pool pipeline.
//!
//! No I/O lives here. Match status transitions, scoring rule sets,
//! leaderboard aggregation/ranking, and retention-window helpers are all
//! plain functions so the worker jobs stay testable without a database.

pub mod error;
pub mod ranking;
pub mod retention;
pub mod scoring;
pub mod status;
pub mod types;

pub use error::CoreError;
