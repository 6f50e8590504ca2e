//! Configuration validation for lifecycle-roadmap.

use super::types::{AppConfig, CatalogConfig, InventoryConfig, RbacConfig, StatusConfig, UpcomingConfig};
use std::path::Path;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.catalog.validate());
        errors.extend(self.inventory.validate());
        errors.extend(self.rbac.validate());
        errors.extend(self.status.validate());
        errors.extend(self.upcoming.validate());
        errors
    }
}

impl Validatable for CatalogConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        check_file("catalog.app_streams_file", self.app_streams_file.as_deref(), &mut errors);
        check_file("catalog.rhel_file", self.rhel_file.as_deref(), &mut errors);
        errors
    }
}

impl Validatable for InventoryConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        check_file("inventory.hosts_file", self.hosts_file.as_deref(), &mut errors);
        errors
    }
}

impl Validatable for RbacConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.hostname.contains("://") || self.hostname.contains('/') {
            errors.push(ConfigError {
                field: "rbac.hostname".to_string(),
                message: format!(
                    "Expected a bare host name, got '{}'",
                    self.hostname
                ),
            });
        }
        if self.port == 0 {
            errors.push(ConfigError {
                field: "rbac.port".to_string(),
                message: "Port must be non-zero".to_string(),
            });
        }
        if self.timeout_secs == 0 {
            errors.push(ConfigError {
                field: "rbac.timeout_secs".to_string(),
                message: "Timeout must be at least 1 second".to_string(),
            });
        }
        errors
    }
}

impl Validatable for StatusConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        for (field, months) in [
            ("status.rhel_threshold_months", self.rhel_threshold_months),
            ("status.app_stream_threshold_months", self.app_stream_threshold_months),
        ] {
            if months > 120 {
                errors.push(ConfigError {
                    field: field.to_string(),
                    message: format!("Threshold must be at most 120 months, got {months}"),
                });
            }
        }
        errors
    }
}

impl Validatable for UpcomingConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        check_file("upcoming.changes_file", self.changes_file.as_deref(), &mut errors);
        errors
    }
}

fn check_file(field: &str, path: Option<&Path>, errors: &mut Vec<ConfigError>) {
    if let Some(path) = path {
        if !path.is_file() {
            errors.push(ConfigError {
                field: field.to_string(),
                message: format!("File does not exist: {}", path.display()),
            });
        }
    }
}
