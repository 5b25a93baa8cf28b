//! TOML settings parsing

use super::types::{ConfigError, ControllerConfig};

impl ControllerConfig {
    /// Parse controller settings from TOML text
    ///
    /// Keys that are absent keep their default values. The parsed settings
    /// are validated before being returned.
    ///
    /// ```toml
    /// direct_dwell_ms = 120000
    /// min_rssi_dbm = -70
    /// poll_trigger = "interval_or_state_change"
    /// ```
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: ControllerConfig = ::toml::from_str(text).map_err(|_e| {
            crate::fmt::warning!("controller settings parse error");
            ConfigError::Parse
        })?;
        config.validate()?;
        Ok(config)
    }
}
