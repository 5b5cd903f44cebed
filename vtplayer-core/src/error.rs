//! Error types for the playback layer
//!
//! Errors are split by where they surface: construction failures are
//! returned to the caller, while transport diagnostics from a running
//! engine never appear here and are delivered through the adapter's
//! error event instead.

use thiserror::Error;

/// Main error type for playback operations
#[derive(Error, Debug)]
pub enum PlayerError {
    /// The runtime environment cannot host the requested engine
    #[error("Environment not supported by {engine} engine")]
    EnvironmentUnsupported {
        /// Engine that rejected the environment
        engine: String,
    },

    /// The engine module could not be loaded
    #[error("Failed to load {engine} engine: {reason}")]
    EngineLoad {
        /// Engine being loaded
        engine: String,
        /// Failure reason
        reason: String,
    },

    /// Attaching the engine to the video element failed
    #[error("Failed to attach engine to video element: {reason}")]
    Attach {
        /// Failure reason
        reason: String,
    },

    /// Loading a manifest failed
    #[error("Failed to load source {source_url}: {reason}")]
    SourceLoad {
        /// Manifest URL that failed
        source_url: String,
        /// Failure reason
        reason: String,
    },

    /// A newer source replaced this one before its load finished
    #[error("Load of {source_url} interrupted by a newer source")]
    LoadInterrupted {
        /// Manifest URL whose load was abandoned
        source_url: String,
    },

    /// Operation attempted on an adapter that has been destroyed
    #[error("Adapter has been destroyed")]
    AdapterDestroyed,

    /// Operation requires an attached adapter
    #[error("No adapter is attached to the session")]
    NoActiveAdapter,

    /// Invalid configuration provided
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Error message
        message: String,
    },

    /// Generic engine failure reported by the underlying media engine
    #[error("Engine error: {reason}")]
    Engine {
        /// Failure reason
        reason: String,
    },

    /// Configuration (de)serialization failed
    #[error("Serialization error: {source}")]
    Serialization {
        /// Underlying serde error
        #[from]
        source: serde_json::Error,
    },
}

/// Result type alias for playback operations
pub type PlayerResult<T> = Result<T, PlayerError>;

impl PlayerError {
    /// Create an engine error from any displayable reason
    pub fn engine(reason: impl Into<String>) -> Self {
        PlayerError::Engine {
            reason: reason.into(),
        }
    }

    /// Check if the surrounding UI may reasonably retry the operation
    pub fn is_recoverable(&self) -> bool {
        match self {
            PlayerError::SourceLoad { .. } => true,
            PlayerError::LoadInterrupted { .. } => true,
            PlayerError::Engine { .. } => true,
            PlayerError::EngineLoad { .. } => true,
            PlayerError::NoActiveAdapter => true,
            PlayerError::EnvironmentUnsupported { .. } => false,
            PlayerError::Attach { .. } => false,
            PlayerError::AdapterDestroyed => false,
            PlayerError::InvalidConfiguration { .. } => false,
            PlayerError::Serialization { .. } => false,
        }
    }

    /// Get error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            PlayerError::EnvironmentUnsupported { .. } => ErrorCategory::Environment,
            PlayerError::EngineLoad { .. } => ErrorCategory::Environment,
            PlayerError::Attach { .. } => ErrorCategory::Engine,
            PlayerError::Engine { .. } => ErrorCategory::Engine,
            PlayerError::SourceLoad { .. } => ErrorCategory::Source,
            PlayerError::LoadInterrupted { .. } => ErrorCategory::Source,
            PlayerError::AdapterDestroyed => ErrorCategory::State,
            PlayerError::NoActiveAdapter => ErrorCategory::State,
            PlayerError::InvalidConfiguration { .. } => ErrorCategory::Configuration,
            PlayerError::Serialization { .. } => ErrorCategory::Configuration,
        }
    }
}

/// Error categories for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Runtime environment or engine availability
    Environment,
    /// Failures inside the media engine
    Engine,
    /// Manifest/source problems
    Source,
    /// Adapter or session lifecycle misuse
    State,
    /// Configuration and parameter errors
    Configuration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let unsupported = PlayerError::EnvironmentUnsupported {
            engine: "shaka".to_string(),
        };
        assert_eq!(unsupported.category(), ErrorCategory::Environment);
        assert!(!unsupported.is_recoverable());

        let load = PlayerError::SourceLoad {
            source_url: "https://cdn.example/manifest.mpd".to_string(),
            reason: "404".to_string(),
        };
        assert_eq!(load.category(), ErrorCategory::Source);
        assert!(load.is_recoverable());

        let interrupted = PlayerError::LoadInterrupted {
            source_url: "x.mpd".to_string(),
        };
        assert_eq!(interrupted.category(), ErrorCategory::Source);
        assert!(interrupted.is_recoverable());
        assert_eq!(
            interrupted.to_string(),
            "Load of x.mpd interrupted by a newer source"
        );
    }

    #[test]
    fn test_error_display() {
        let error = PlayerError::EnvironmentUnsupported {
            engine: "shaka".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Environment not supported by shaka engine"
        );
    }

    #[test]
    fn test_error_from_serde() {
        let parse_error = serde_json::from_str::<u32>("not a number").unwrap_err();
        let error = PlayerError::from(parse_error);

        match error {
            PlayerError::Serialization { .. } => (),
            _ => panic!("Expected Serialization error variant"),
        }
    }
}
