//! Configuration types and defaults

use serde::{Deserialize, Serialize};
use vtplayer_core::{PlayerError, PlayerResult};
use vtplayer_media::{EngineFlavor, SeekBarConfig};

/// Adapter construction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Engine expected behind the adapter
    pub engine: EngineFlavor,
    /// Log low-level engine diagnostics
    pub log_engine_diagnostics: bool,
    /// Start position when the caller gives none
    pub default_start_time: f64,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            engine: EngineFlavor::Shaka,
            log_engine_diagnostics: true,
            default_start_time: 0.0,
        }
    }
}

/// Player configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Adapter settings
    pub adapter: AdapterConfig,
    /// Seek-bar settings
    pub seekbar: SeekBarConfig,
}

impl PlayerConfig {
    /// Parse and validate a JSON document. Missing fields take their
    /// defaults.
    ///
    /// # Example
    /// ```rust
    /// use vtplayer::PlayerConfig;
    ///
    /// let config = PlayerConfig::from_json_str(
    ///     r#"{ "adapter": { "engine": "dashjs" }, "seekbar": { "viewport_width": 854 } }"#,
    /// )?;
    /// assert_eq!(config.seekbar.viewport_width, 854.0);
    /// # Ok::<(), vtplayer::PlayerError>(())
    /// ```
    pub fn from_json_str(json: &str) -> PlayerResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_string(&self) -> PlayerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check value ranges
    pub fn validate(&self) -> PlayerResult<()> {
        let seekbar = &self.seekbar;
        let allowance = seekbar.geometry.horizontal_allowance;

        if !seekbar.viewport_width.is_finite() || seekbar.viewport_width <= allowance {
            return Err(PlayerError::InvalidConfiguration {
                message: format!(
                    "viewport_width {} must exceed the horizontal allowance {}",
                    seekbar.viewport_width, allowance
                ),
            });
        }
        if !seekbar.geometry.left_inset.is_finite() || !allowance.is_finite() {
            return Err(PlayerError::InvalidConfiguration {
                message: "seek bar geometry must be finite".to_string(),
            });
        }
        validate_start_time(self.adapter.default_start_time)
    }
}

/// Reject negative or non-finite start positions
pub(crate) fn validate_start_time(start_time: f64) -> PlayerResult<()> {
    if !start_time.is_finite() || start_time < 0.0 {
        return Err(PlayerError::InvalidConfiguration {
            message: format!("start time {} must be a non-negative number", start_time),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_defaults_are_valid() {
        let config = PlayerConfig::default();
        assert_ok!(config.validate());
        assert_eq!(config.adapter.engine, EngineFlavor::Shaka);
        assert_eq!(config.seekbar.geometry.left_inset, 10.0);
        assert_eq!(config.seekbar.geometry.horizontal_allowance, 27.5);
    }

    #[test]
    fn test_from_json_partial() {
        let config = PlayerConfig::from_json_str(
            r#"{ "adapter": { "engine": "dashjs", "default_start_time": 42.0 } }"#,
        )
        .unwrap();

        assert_eq!(config.adapter.engine, EngineFlavor::DashJs);
        assert_eq!(config.adapter.default_start_time, 42.0);
        assert!(config.adapter.log_engine_diagnostics);
        assert_eq!(config.seekbar, SeekBarConfig::default());
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = PlayerConfig::default();
        config.seekbar.cancel_on_out_of_bounds = false;

        let json = assert_ok!(config.to_json_string());
        assert_eq!(assert_ok!(PlayerConfig::from_json_str(&json)), config);
        assert_err!(PlayerConfig::from_json_str(r#"{ "seekbar": { "viewport_width": -1 } }"#));
    }

    #[test]
    fn test_rejects_narrow_viewport() {
        let result = PlayerConfig::from_json_str(r#"{ "seekbar": { "viewport_width": 20 } }"#);
        assert!(matches!(
            result,
            Err(PlayerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_rejects_negative_start_time() {
        let mut config = PlayerConfig::default();
        config.adapter.default_start_time = -1.0;
        assert!(matches!(
            config.validate(),
            Err(PlayerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let result = PlayerConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(PlayerError::Serialization { .. })));
    }
}
