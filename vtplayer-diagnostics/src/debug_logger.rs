//! Structured debug logging system

use tracing::metadata::LevelFilter;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use vtplayer_core::{PlayerError, PlayerResult};

/// Installs the process-wide `tracing` subscriber
#[derive(Debug, Clone)]
pub struct DebugLogger {
    level: Level,
    with_target: bool,
}

impl DebugLogger {
    /// Create a logger whose default directive is `level`
    pub fn new(level: Level) -> Self {
        Self {
            level,
            with_target: true,
        }
    }

    /// Include the event target (module path) in each line
    pub fn with_target(mut self, enabled: bool) -> Self {
        self.with_target = enabled;
        self
    }

    /// Filter used for the subscriber. `RUST_LOG` wins when it is set and
    /// parses.
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::default().add_directive(LevelFilter::from_level(self.level).into())
        })
    }

    /// Install the subscriber. Returns `false` when another subscriber was
    /// already installed, which is not treated as an error.
    pub fn install(&self) -> bool {
        let installed = tracing_subscriber::fmt()
            .with_env_filter(self.filter())
            .with_target(self.with_target)
            .try_init()
            .is_ok();

        if installed {
            tracing::debug!("Logging initialised at {}", self.level);
        }
        installed
    }

    /// Initialize logging system
    pub fn init_logging(level: Level) -> PlayerResult<()> {
        Self::new(level).install();
        Ok(())
    }

    /// Parse a textual level such as `"info"` or `"DEBUG"`
    pub fn parse_level(level: &str) -> PlayerResult<Level> {
        level
            .trim()
            .parse::<Level>()
            .map_err(|e| PlayerError::InvalidConfiguration {
                message: format!("invalid log level '{}': {}", level, e),
            })
    }
}

impl Default for DebugLogger {
    fn default() -> Self {
        Self::new(Level::INFO)
    }
}
