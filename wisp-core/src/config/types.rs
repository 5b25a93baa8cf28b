//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minimum time between state evaluations (ms)
pub const DEFAULT_SAMPLE_INTERVAL_MS: u32 = 1_000;

/// Time spent in direct mode before looking for stored networks again (ms)
pub const DEFAULT_DIRECT_DWELL_MS: u32 = 60_000;

/// Time allowed to find a stored network with usable signal (ms)
pub const DEFAULT_CHECK_TIMEOUT_MS: u32 = 15_000;

/// Time allowed for one connection attempt (ms)
pub const DEFAULT_CONNECT_TIMEOUT_MS: u32 = 15_000;

/// Interval between session clock synchronizations (ms)
pub const DEFAULT_CLOCK_SYNC_INTERVAL_MS: u32 = 24 * 60 * 60 * 1000;

/// Signal strength a stored network must exceed before connecting (dBm)
pub const DEFAULT_MIN_RSSI_DBM: i16 = -75;

/// Upper bound on waiting for broadcast mode before the first scan (ms)
pub const DEFAULT_LISTEN_CONFIRM_TIMEOUT_MS: u32 = 5_000;

/// Delay between broadcast mode checks while waiting (ms)
pub const DEFAULT_LISTEN_POLL_STEP_MS: u32 = 10;

/// When `poll` runs an evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PollTrigger {
    /// Only once per sample interval
    #[default]
    IntervalOnly,
    /// Once per sample interval, and immediately after an evaluation that
    /// changed state
    IntervalOrStateChange,
}

/// Controller configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerConfig {
    /// Minimum time between evaluations (ms)
    pub sample_interval_ms: u32,
    /// Dwell time in direct mode before re-checking credentials (ms)
    pub direct_dwell_ms: u32,
    /// Credential check timeout (ms)
    pub check_timeout_ms: u32,
    /// Connection attempt timeout (ms)
    pub connect_timeout_ms: u32,
    /// Session clock sync interval (ms)
    pub clock_sync_interval_ms: u32,
    /// Signal must be strictly stronger than this to connect (dBm)
    pub min_rssi_dbm: i16,
    /// Bound on the first-scan broadcast mode wait (ms)
    pub listen_confirm_timeout_ms: u32,
    /// Delay between checks during that wait (ms)
    pub listen_poll_step_ms: u32,
    /// Evaluation trigger policy
    pub poll_trigger: PollTrigger,
    /// Run one evaluation from `setup` instead of waiting for the first poll
    pub evaluate_on_setup: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: DEFAULT_SAMPLE_INTERVAL_MS,
            direct_dwell_ms: DEFAULT_DIRECT_DWELL_MS,
            check_timeout_ms: DEFAULT_CHECK_TIMEOUT_MS,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            clock_sync_interval_ms: DEFAULT_CLOCK_SYNC_INTERVAL_MS,
            min_rssi_dbm: DEFAULT_MIN_RSSI_DBM,
            listen_confirm_timeout_ms: DEFAULT_LISTEN_CONFIRM_TIMEOUT_MS,
            listen_poll_step_ms: DEFAULT_LISTEN_POLL_STEP_MS,
            poll_trigger: PollTrigger::IntervalOnly,
            evaluate_on_setup: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A timing field that must be non-zero is zero
    ZeroInterval(&'static str),
    /// Listen confirmation bound is shorter than one poll step
    ListenBoundTooShort,
    /// Settings text could not be parsed
    Parse,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroInterval(field) => write!(f, "{} must be non-zero", field),
            ConfigError::ListenBoundTooShort => {
                f.write_str("listen_confirm_timeout_ms is shorter than listen_poll_step_ms")
            }
            ConfigError::Parse => f.write_str("invalid controller settings"),
        }
    }
}

impl ControllerConfig {
    /// Check that the configuration can drive the controller
    pub fn validate(&self) -> Result<(), ConfigError> {
        let intervals = [
            ("sample_interval_ms", self.sample_interval_ms),
            ("direct_dwell_ms", self.direct_dwell_ms),
            ("check_timeout_ms", self.check_timeout_ms),
            ("connect_timeout_ms", self.connect_timeout_ms),
            ("clock_sync_interval_ms", self.clock_sync_interval_ms),
            ("listen_poll_step_ms", self.listen_poll_step_ms),
        ];
        for (field, value) in intervals {
            if value == 0 {
                return Err(ConfigError::ZeroInterval(field));
            }
        }

        if self.listen_confirm_timeout_ms < self.listen_poll_step_ms {
            return Err(ConfigError::ListenBoundTooShort);
        }

        Ok(())
    }

    /// Number of broadcast mode checks allowed during the first-scan wait
    pub fn listen_poll_budget(&self) -> u32 {
        self.listen_confirm_timeout_ms / self.listen_poll_step_ms.max(1)
    }
}
