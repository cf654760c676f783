//! Errors from the provider adapter layer.

/// Errors surfaced to the sync jobs. Rate-limit and network failures are
/// only raised after the retry budget is exhausted -- never silently
/// suppressed.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP 429 persisted through every retry attempt.
    #[error("Rate limited by provider after {attempts} attempts")]
    RateLimited { attempts: u32 },

    /// Transport failure (DNS, TLS, connection reset) after retries.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Provider returned a non-retryable, non-2xx status.
    #[error("Provider API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Response body did not match the expected shape.
    #[error("Failed to decode provider response: {0}")]
    Decode(String),

    /// Provider name not in the closed registry.
    #[error("Unknown provider: '{0}'. Valid providers: mock, api-football")]
    UnknownProvider(String),

    /// Missing or inconsistent provider configuration.
    #[error("Provider configuration error: {0}")]
    Config(String),
}
