//! Engine policy configuration.
//!
//! Defaults match the behaviour of deployed clients: any status may be
//! selected directly, removing the project head clears the head, and a
//! supervisor may take on ten students.

use crate::project::domain::{HeadRemovalPolicy, StatusTransitionPolicy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of students a supervisor may take on.
pub const DEFAULT_SUPERVISOR_CAPACITY: u32 = 10;

/// Environment variable selecting the status transition policy.
pub const STATUS_POLICY_ENV: &str = "CAPSTONE_STATUS_POLICY";
/// Environment variable selecting the head removal policy.
pub const HEAD_REMOVAL_ENV: &str = "CAPSTONE_HEAD_REMOVAL";
/// Environment variable overriding the default supervisor capacity.
pub const SUPERVISOR_CAPACITY_ENV: &str = "CAPSTONE_SUPERVISOR_CAPACITY";

/// Workflow engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkflowConfig {
    /// How `update_status` treats moves along the project pipeline.
    pub status_policy: StatusTransitionPolicy,
    /// What happens when the current project head is removed from a group.
    pub head_removal: HeadRemovalPolicy,
    /// Capacity given to supervisors registered without an explicit one.
    pub default_supervisor_capacity: u32,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            status_policy: StatusTransitionPolicy::AnyToAny,
            head_removal: HeadRemovalPolicy::ClearHead,
            default_supervisor_capacity: DEFAULT_SUPERVISOR_CAPACITY,
        }
    }
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A value could not be parsed.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// Offending key or environment variable.
        key: String,
        /// Parse failure description.
        message: String,
    },
    /// The JSON document is malformed.
    #[error("invalid configuration document: {0}")]
    Document(#[from] serde_json::Error),
}

impl WorkflowConfig {
    /// Returns this configuration with a different status policy.
    #[must_use]
    pub const fn with_status_policy(mut self, policy: StatusTransitionPolicy) -> Self {
        self.status_policy = policy;
        self
    }

    /// Returns this configuration with a different head removal policy.
    #[must_use]
    pub const fn with_head_removal(mut self, policy: HeadRemovalPolicy) -> Self {
        self.head_removal = policy;
        self
    }

    /// Loads configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default       |
    /// |--------------------------------|---------------|
    /// | `CAPSTONE_STATUS_POLICY`       | `any_to_any`  |
    /// | `CAPSTONE_HEAD_REMOVAL`        | `clear_head`  |
    /// | `CAPSTONE_SUPERVISOR_CAPACITY` | `10`          |
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set to an
    /// unrecognised value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a value is unrecognised.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(STATUS_POLICY_ENV) {
            config.status_policy = StatusTransitionPolicy::try_from(raw.as_str())
                .map_err(|err| invalid(STATUS_POLICY_ENV, err))?;
        }
        if let Some(raw) = lookup(HEAD_REMOVAL_ENV) {
            config.head_removal = HeadRemovalPolicy::try_from(raw.as_str())
                .map_err(|err| invalid(HEAD_REMOVAL_ENV, err))?;
        }
        if let Some(raw) = lookup(SUPERVISOR_CAPACITY_ENV) {
            let capacity: u32 = raw
                .trim()
                .parse()
                .map_err(|err| invalid(SUPERVISOR_CAPACITY_ENV, err))?;
            if capacity == 0 {
                return Err(invalid(SUPERVISOR_CAPACITY_ENV, "capacity must be positive"));
            }
            config.default_supervisor_capacity = capacity;
        }

        Ok(config)
    }

    /// Parses configuration from a JSON document; absent keys keep defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Document`] for malformed JSON or unknown keys
    /// and [`ConfigError::InvalidValue`] for a zero capacity.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(document)?;
        if config.default_supervisor_capacity == 0 {
            return Err(invalid(
                "default_supervisor_capacity",
                "capacity must be positive",
            ));
        }
        Ok(config)
    }
}

fn invalid(key: &str, message: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_owned(),
        message: message.to_string(),
    }
}
