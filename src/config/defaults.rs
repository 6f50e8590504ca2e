//! Default values and environment overrides.

use super::types::AppConfig;
use super::validation::ConfigError;
use std::path::PathBuf;
use std::str::FromStr;

/// Default RBAC service port.
pub const DEFAULT_RBAC_PORT: u16 = 8000;

/// Default RBAC request timeout in seconds.
pub const DEFAULT_RBAC_TIMEOUT_SECS: u64 = 10;

/// Default near-retirement threshold for RHEL rows, in months.
pub const DEFAULT_RHEL_THRESHOLD_MONTHS: u32 = 6;

/// Default near-retirement threshold for app stream rows, in months.
pub const DEFAULT_APP_STREAM_THRESHOLD_MONTHS: u32 = 3;

/// Prefix shared by all environment overrides.
pub const ENV_PREFIX: &str = "ROADMAP_";

impl AppConfig {
    /// Overlay `ROADMAP_*` variables from the process environment.
    pub fn apply_env(&mut self) -> Vec<ConfigError> {
        self.apply_env_from(|name| std::env::var(name).ok())
    }

    /// Overlay `ROADMAP_*` variables from a lookup function.
    ///
    /// Empty values are ignored. Values that fail to parse leave the field
    /// unchanged and are reported.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Vec<ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |suffix: &str| {
            lookup(&format!("{ENV_PREFIX}{suffix}")).filter(|value| !value.is_empty())
        };
        let mut errors = Vec::new();

        if let Some(value) = get("RBAC_HOSTNAME") {
            self.rbac.hostname = value;
        }
        if let Some(value) = get("RBAC_PORT") {
            parse_into(&mut self.rbac.port, "RBAC_PORT", &value, &mut errors);
        }
        if let Some(value) = get("RBAC_TIMEOUT") {
            parse_into(&mut self.rbac.timeout_secs, "RBAC_TIMEOUT", &value, &mut errors);
        }
        if let Some(value) = get("DEV") {
            match parse_bool(&value) {
                Some(dev) => self.dev = dev,
                None => errors.push(env_error("DEV", &value)),
            }
        }
        if let Some(value) = get("HOSTS_FILE") {
            self.inventory.hosts_file = Some(PathBuf::from(value));
        }
        if let Some(value) = get("APP_STREAMS_FILE") {
            self.catalog.app_streams_file = Some(PathBuf::from(value));
        }
        if let Some(value) = get("RHEL_FILE") {
            self.catalog.rhel_file = Some(PathBuf::from(value));
        }
        if let Some(value) = get("UPCOMING_FILE") {
            self.upcoming.changes_file = Some(PathBuf::from(value));
        }
        if let Some(value) = get("RHEL_THRESHOLD_MONTHS") {
            parse_into(
                &mut self.status.rhel_threshold_months,
                "RHEL_THRESHOLD_MONTHS",
                &value,
                &mut errors,
            );
        }
        if let Some(value) = get("APP_STREAM_THRESHOLD_MONTHS") {
            parse_into(
                &mut self.status.app_stream_threshold_months,
                "APP_STREAM_THRESHOLD_MONTHS",
                &value,
                &mut errors,
            );
        }

        errors
    }
}

fn parse_into<T: FromStr>(slot: &mut T, suffix: &str, value: &str, errors: &mut Vec<ConfigError>) {
    match value.trim().parse() {
        Ok(parsed) => *slot = parsed,
        Err(_) => errors.push(env_error(suffix, value)),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_error(suffix: &str, value: &str) -> ConfigError {
    ConfigError {
        field: format!("{ENV_PREFIX}{suffix}"),
        message: format!("Cannot parse value '{value}'"),
    }
}
