//! Channel access configuration
//!
//! Where the PWM class lives in sysfs and how long `open` waits for an
//! exported channel to appear.  The defaults match the kernel's layout and
//! a 1 s export budget (10 checks, 100 ms apart).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default location of the PWM class directory.
pub const DEFAULT_SYSFS_ROOT: &str = "/sys/class/pwm";

/// Upper bound accepted for the export poll interval.
const MAX_POLL_INTERVAL_MS: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PwmConfig {
    /// Root of the PWM class (`/sys/class/pwm`).
    pub sysfs_root: PathBuf,
    /// Existence checks performed after writing `export`.
    pub export_retries: u32,
    /// Sleep between two existence checks (milliseconds).
    pub export_poll_interval_ms: u32,
}

impl Default for PwmConfig {
    fn default() -> Self {
        Self {
            sysfs_root: PathBuf::from(DEFAULT_SYSFS_ROOT),
            export_retries: 10,
            export_poll_interval_ms: 100,
        }
    }
}

impl PwmConfig {
    /// Config rooted somewhere other than `/sys/class/pwm`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            sysfs_root: root.into(),
            ..Self::default()
        }
    }

    /// Reject values that would make `open` meaningless.
    ///
    /// Invalid ranges are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sysfs_root.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed("sysfs_root is empty"));
        }
        if self.export_retries == 0 {
            return Err(ConfigError::ValidationFailed(
                "export_retries must be at least 1",
            ));
        }
        if self.export_poll_interval_ms > MAX_POLL_INTERVAL_MS {
            return Err(ConfigError::ValidationFailed(
                "export_poll_interval_ms exceeds 10000",
            ));
        }
        Ok(())
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        Ok(config)
    }

    /// Total time `open` may spend waiting for an export, in milliseconds.
    pub fn export_budget_ms(&self) -> u64 {
        u64::from(self.export_retries.saturating_sub(1)) * u64::from(self.export_poll_interval_ms)
    }
}

/// Errors from loading or validating a [`PwmConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The document is not valid JSON for this schema.
    Corrupted,
    /// A field failed range validation.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
