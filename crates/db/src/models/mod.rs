//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - Insert/upsert DTOs where a repository needs one

pub mod audit;
pub mod external;
pub mod leaderboard;
pub mod matches;
pub mod pool;
pub mod prediction;
pub mod season;
pub mod team;
pub mod user;
