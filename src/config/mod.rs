//! Configuration module for lifecycle-roadmap.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - `ROADMAP_*` environment overrides and CLI argument merging
//!
//! # Configuration File
//!
//! Place a `.roadmap.yaml` file in your project root or `~/.config/roadmap/`:
//!
//! ```yaml
//! rbac:
//!   hostname: rbac-service.svc
//!   port: 8000
//! status:
//!   rhel_threshold_months: 6
//!   app_stream_threshold_months: 3
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    DEFAULT_APP_STREAM_THRESHOLD_MONTHS, DEFAULT_RBAC_PORT, DEFAULT_RBAC_TIMEOUT_SECS,
    DEFAULT_RHEL_THRESHOLD_MONTHS, ENV_PREFIX,
};
pub use types::{
    AppConfig, AppConfigBuilder, CatalogConfig, InventoryConfig, RbacConfig, StatusConfig,
    UpcomingConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// The schema documents every option accepted in `.roadmap.yaml`.
pub fn generate_json_schema() -> crate::error::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
        .map_err(|e| crate::error::RoadmapError::config(format!("schema serialization: {e}")))
}
