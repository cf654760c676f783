use penca_core::types::DbId;
use penca_provider::error::ProviderError;

/// Errors that abort one job invocation.
///
/// Per-item failures inside a batch are handled locally (logged and
/// counted) and never become a `JobError`; only run-level failures --
/// a missing season, an exhausted provider, a batch-level query --
/// surface here. The scheduler absorbs them per tick; the CLI maps
/// them to a non-zero exit code.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Provider failure: {0}")]
    Provider(#[from] ProviderError),

    #[error("Database failure: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
