//! Configuration types for lifecycle-roadmap.
//!
//! Provides structured configuration for catalog loading, the host feed,
//! the RBAC service and support-status thresholds.

use super::defaults::{
    DEFAULT_APP_STREAM_THRESHOLD_MONTHS, DEFAULT_RBAC_PORT, DEFAULT_RBAC_TIMEOUT_SECS,
    DEFAULT_RHEL_THRESHOLD_MONTHS,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration.
///
/// Layered from a config file, then `ROADMAP_*` environment variables, then
/// CLI arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Catalog override files
    pub catalog: CatalogConfig,
    /// Host inventory feed
    pub inventory: InventoryConfig,
    /// RBAC service location
    pub rbac: RbacConfig,
    /// Support-status thresholds
    pub status: StatusConfig,
    /// Planned changes source
    pub upcoming: UpcomingConfig,
    /// Development mode: unrestricted access, fixture data
    pub dev: bool,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Base URL of the RBAC service, or empty when none is configured.
    #[must_use]
    pub fn rbac_url(&self) -> String {
        if self.rbac.hostname.is_empty() {
            String::new()
        } else {
            format!("http://{}:{}", self.rbac.hostname, self.rbac.port)
        }
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Replace the bundled app stream catalog.
    pub fn app_streams_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.catalog.app_streams_file = file;
        self
    }

    /// Replace the built-in RHEL lifecycle table.
    pub fn rhel_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.catalog.rhel_file = file;
        self
    }

    /// Set the host feed file.
    pub fn hosts_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.inventory.hosts_file = file;
        self
    }

    /// Set the RBAC service host name.
    pub fn rbac_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.config.rbac.hostname = hostname.into();
        self
    }

    /// Set the RBAC service port.
    pub const fn rbac_port(mut self, port: u16) -> Self {
        self.config.rbac.port = port;
        self
    }

    /// Set the near-retirement threshold for RHEL rows.
    pub const fn rhel_threshold_months(mut self, months: u32) -> Self {
        self.config.status.rhel_threshold_months = months;
        self
    }

    /// Set the near-retirement threshold for app stream rows.
    pub const fn app_stream_threshold_months(mut self, months: u32) -> Self {
        self.config.status.app_stream_threshold_months = months;
        self
    }

    /// Set the planned changes file.
    pub fn changes_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.upcoming.changes_file = file;
        self
    }

    /// Enable development mode.
    pub const fn dev(mut self, dev: bool) -> Self {
        self.config.dev = dev;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Section Types
// ============================================================================

/// Catalog sources. Absent files fall back to the bundled data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CatalogConfig {
    /// App stream catalog (YAML or JSON list)
    pub app_streams_file: Option<PathBuf>,
    /// RHEL lifecycle table (YAML or JSON list)
    pub rhel_file: Option<PathBuf>,
}

/// Host inventory feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct InventoryConfig {
    /// JSON-lines file with one host record per line
    pub hosts_file: Option<PathBuf>,
}

/// RBAC service location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RbacConfig {
    /// Host name; empty disables the service
    pub hostname: String,
    /// Port
    pub port: u16,
    /// Request timeout in seconds
    #[schemars(range(min = 1))]
    pub timeout_secs: u64,
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self {
            hostname: String::new(),
            port: DEFAULT_RBAC_PORT,
            timeout_secs: DEFAULT_RBAC_TIMEOUT_SECS,
        }
    }
}

/// Near-retirement thresholds, in months of 30 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct StatusConfig {
    /// Threshold for RHEL rows
    pub rhel_threshold_months: u32,
    /// Threshold for app stream rows
    pub app_stream_threshold_months: u32,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            rhel_threshold_months: DEFAULT_RHEL_THRESHOLD_MONTHS,
            app_stream_threshold_months: DEFAULT_APP_STREAM_THRESHOLD_MONTHS,
        }
    }
}

/// Planned changes source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct UpcomingConfig {
    /// JSON file with the list of planned changes
    pub changes_file: Option<PathBuf>,
}
