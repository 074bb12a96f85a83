//! Error types for socialcal.

use thiserror::Error;

/// Errors that can occur outside the pure store/calculator core.
#[derive(Error, Debug)]
pub enum SocialCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Provider '{0}' not found in PATH. Install it with:\n  cargo install socialcal-provider-{0}")]
    ProviderNotInstalled(String),

    #[error("Provider request timed out after {0}s")]
    ProviderTimeout(u64),

    #[error("{0}")]
    InvalidEntry(String),

    #[error("Birthday not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for socialcal operations.
pub type SocialCalResult<T> = Result<T, SocialCalError>;
