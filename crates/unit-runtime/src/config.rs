//! # Runtime Configuration
//!
//! Defaults, overridden by environment variables, overridden by CLI flags.
//!
//! | Variable                   | Field              | Values                 |
//! |----------------------------|--------------------|------------------------|
//! | `SRCUNIT_LOG`              | `log_level`        | any `EnvFilter` string |
//! | `SRCUNIT_DUPLICATE_POLICY` | `duplicate_policy` | `reject`, `replace`    |

use thiserror::Error;
use unit_core::DuplicatePolicy;

pub const ENV_LOG: &str = "SRCUNIT_LOG";
pub const ENV_DUPLICATE_POLICY: &str = "SRCUNIT_DUPLICATE_POLICY";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {reason}")]
    InvalidEnv { var: &'static str, reason: String },
}

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// What the registry does with a second registration of a kind key.
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            duplicate_policy: DuplicatePolicy::Reject,
        }
    }
}

impl RuntimeConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(level) = lookup(ENV_LOG).filter(|l| !l.trim().is_empty()) {
            config.log_level = level;
        }

        if let Some(policy) = lookup(ENV_DUPLICATE_POLICY) {
            config.duplicate_policy = policy.parse().map_err(|reason| ConfigError::InvalidEnv {
                var: ENV_DUPLICATE_POLICY,
                reason,
            })?;
        }

        Ok(config)
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }
}
