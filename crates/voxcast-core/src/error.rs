//! Error types for the Voxcast playback core.

/// Result type alias for Voxcast operations
pub type VoxcastResult<T> = Result<T, VoxcastError>;

/// Main error type for Voxcast playback operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VoxcastError {
    /// Speech engine failure
    #[error("Speech engine error: {message}")]
    EngineError {
        /// Error message describing the engine failure
        message: String,
    },

    /// Invalid input error
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Error message describing the invalid input
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// Error message describing the configuration issue
        message: String,
    },

    /// Thread or concurrency error
    #[error("Concurrency error: {message}")]
    ConcurrencyError {
        /// Error message describing the concurrency issue
        message: String,
    },
}

impl VoxcastError {
    /// Create a new engine error
    #[must_use]
    pub fn engine<S: Into<String>>(message: S) -> Self {
        Self::EngineError {
            message: message.into(),
        }
    }

    /// Create a new invalid input error
    #[must_use]
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    #[must_use]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// Create a new concurrency error
    #[must_use]
    pub fn concurrency<S: Into<String>>(message: S) -> Self {
        Self::ConcurrencyError {
            message: message.into(),
        }
    }

    /// Check if this error is due to invalid user input
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. } | Self::ConfigurationError { .. }
        )
    }

    /// Get the error category for logging/metrics
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::EngineError { .. } => "engine",
            Self::InvalidInput { .. } => "input",
            Self::ConfigurationError { .. } => "configuration",
            Self::ConcurrencyError { .. } => "concurrency",
        }
    }
}

impl From<anyhow::Error> for VoxcastError {
    fn from(err: anyhow::Error) -> Self {
        Self::engine(err.to_string())
    }
}

impl From<std::io::Error> for VoxcastError {
    fn from(err: std::io::Error) -> Self {
        Self::engine(format!("I/O error: {err}"))
    }
}
