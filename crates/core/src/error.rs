use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum PulseError {
    #[error("config error: {0}")]
    Config(String),

    #[error("system error: {0}")]
    System(String),

    /// The blocking sampling worker failed to run to completion.
    #[error("sampler error: {0}")]
    Sampler(String),
}

pub type Result<T, E = PulseError> = std::result::Result<T, E>;
