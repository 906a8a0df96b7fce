/// Error types for session setup
use thiserror::Error;

/// Result type alias for configuration checks
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Reasons a game configuration is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Board width outside the supported range
    #[error("Invalid board width {width}: must be between {min} and {max}")]
    InvalidWidth { width: usize, min: usize, max: usize },

    /// Board height outside the supported range
    #[error("Invalid board height {height}: must be between {min} and {max}")]
    InvalidHeight {
        height: usize,
        min: usize,
        max: usize,
    },
}
