//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the admin mount point so it can be reserved and routed
//! - Validate value ranges (timeouts > 0, metrics address parseable)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: HostConfig → Result<(), Vec<InvalidSetting>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::HostConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {reason}")]
pub struct InvalidSetting {
    pub field: &'static str,
    pub reason: String,
}

impl InvalidSetting {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

pub fn validate_config(config: &HostConfig) -> Result<(), Vec<InvalidSetting>> {
    let mut issues = Vec::new();

    let prefix = &config.admin.prefix;
    if !prefix.starts_with('/') {
        issues.push(InvalidSetting::new("admin.prefix", "must start with /"));
    }
    if prefix == "/" {
        issues.push(InvalidSetting::new("admin.prefix", "must not be the root path"));
    } else if prefix.ends_with('/') {
        issues.push(InvalidSetting::new("admin.prefix", "must not end with /"));
    }

    if config.admin.username.is_empty() {
        issues.push(InvalidSetting::new("admin.username", "must not be empty"));
    }

    if config.timeouts.connect_secs == 0 {
        issues.push(InvalidSetting::new("timeouts.connect_secs", "must be greater than 0"));
    }
    if config.timeouts.request_secs == 0 {
        issues.push(InvalidSetting::new("timeouts.request_secs", "must be greater than 0"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        issues.push(InvalidSetting::new(
            "observability.metrics_address",
            format!("{:?} is not a socket address", config.observability.metrics_address),
        ));
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}
