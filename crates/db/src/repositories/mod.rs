//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod external_repo;
pub mod leaderboard_repo;
pub mod maintenance_repo;
pub mod match_repo;
pub mod pool_repo;
pub mod prediction_repo;
pub mod score_audit_repo;
pub mod season_repo;
pub mod team_repo;

pub use external_repo::ExternalRepo;
pub use leaderboard_repo::LeaderboardRepo;
pub use maintenance_repo::MaintenanceRepo;
pub use match_repo::MatchRepo;
pub use pool_repo::PoolRepo;
pub use prediction_repo::PredictionRepo;
pub use score_audit_repo::ScoreAuditRepo;
pub use season_repo::SeasonRepo;
pub use team_repo::TeamRepo;
