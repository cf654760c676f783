//! `penca-worker` -- background jobs for the prediction-pool pipeline.
//!
//! Five job families: fixture synchronization, prediction locking at
//! kickoff, final-match scoring, leaderboard snapshots, and retention
//! purges. The binary runs them either on fixed intervals (scheduler
//! mode) or one-shot from the command line (`run <job-name>`).

pub mod config;
pub mod error;
pub mod jobs;
pub mod runner;
pub mod scheduler;

pub use error::JobError;
