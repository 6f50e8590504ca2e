//! Unified error types for lifecycle-roadmap.
//!
//! This module provides the error hierarchy for the library, with enough
//! context to tell a caller mistake from an upstream outage.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for lifecycle-roadmap operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RoadmapError {
    /// Errors while loading or indexing the lifecycle catalog
    #[error("Catalog error: {context}")]
    Catalog {
        context: String,
        #[source]
        source: CatalogErrorKind,
    },

    /// Errors while resolving host access from authorization grants
    #[error("Access denied: {context}")]
    Access {
        context: String,
        #[source]
        source: AccessErrorKind,
    },

    /// Errors raised by the host inventory feed
    #[error("Inventory error: {context}")]
    Inventory {
        context: String,
        #[source]
        source: InventoryErrorKind,
    },

    /// The authorization service answered with a failure
    #[error("Upstream service returned {status}: {detail}")]
    Upstream { status: u16, detail: String },

    /// A result row failed validation during construction
    #[error("Invalid result row: {0}")]
    InvalidRow(String),

    /// Aggregation was cancelled before the host feed was exhausted
    #[error("Aggregation cancelled")]
    Cancelled,

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific catalog error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CatalogErrorKind {
    #[error("Invalid YAML: {0}")]
    InvalidYaml(String),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Entry '{name}' has no OS major version")]
    MissingOsMajor { name: String },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid product version '{0}'")]
    InvalidProductVersion(String),

    #[error("Duplicate entry for key {0}")]
    DuplicateKey(String),
}

/// Specific access error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AccessErrorKind {
    #[error("Not authorized to access host inventory")]
    Unauthorized,

    #[error("Invalid upstream authorization data: {0}")]
    InvalidResourceDefinition(String),

    #[error("Invalid host group UUID '{0}'")]
    InvalidGroupId(String),
}

/// Specific inventory error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum InventoryErrorKind {
    #[error("Malformed host record on line {line}: {message}")]
    MalformedRecord { line: usize, message: String },

    #[error("Host feed unavailable: {0}")]
    Unavailable(String),
}

/// Coarse classification used by outer layers (HTTP status, exit code).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// No usable inventory grant
    Unauthorized,
    /// The request or its upstream data cannot be served as-is
    BadRequest,
    /// An upstream collaborator failed
    Upstream,
    /// Anything else
    Internal,
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for lifecycle-roadmap operations
pub type Result<T> = std::result::Result<T, RoadmapError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl RoadmapError {
    /// Create a catalog error with context
    pub fn catalog(context: impl Into<String>, source: CatalogErrorKind) -> Self {
        Self::Catalog {
            context: context.into(),
            source,
        }
    }

    /// Create an access error with context
    pub fn access(context: impl Into<String>, source: AccessErrorKind) -> Self {
        Self::Access {
            context: context.into(),
            source,
        }
    }

    /// No grant allows reading the inventory
    pub fn unauthorized() -> Self {
        Self::access(String::new(), AccessErrorKind::Unauthorized)
    }

    /// Resource definition that cannot be interpreted safely
    pub fn invalid_resource_definition(message: impl Into<String>) -> Self {
        Self::access(
            "invalid upstream authorization data",
            AccessErrorKind::InvalidResourceDefinition(message.into()),
        )
    }

    /// Create an inventory error with context
    pub fn inventory(context: impl Into<String>, source: InventoryErrorKind) -> Self {
        Self::Inventory {
            context: context.into(),
            source,
        }
    }

    /// Create an upstream failure, preserving status and detail
    pub fn upstream(status: u16, detail: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            detail: detail.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Classify this error for outer layers.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Access {
                source: AccessErrorKind::Unauthorized,
                ..
            } => ErrorClass::Unauthorized,
            Self::Access { .. } | Self::InvalidRow(_) | Self::Validation(_) => {
                ErrorClass::BadRequest
            }
            Self::Upstream { .. } | Self::Inventory { .. } => ErrorClass::Upstream,
            _ => ErrorClass::Internal,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for RoadmapError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for RoadmapError {
    fn from(err: serde_json::Error) -> Self {
        Self::catalog(
            "JSON deserialization",
            CatalogErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<serde_yaml::Error> for RoadmapError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::catalog(
            "YAML deserialization",
            CatalogErrorKind::InvalidYaml(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are prepended to the error's existing context, so the
/// final message reads outermost-first.
///
/// # Example
///
/// ```ignore
/// use lifecycle_roadmap::error::ErrorContext;
///
/// let catalog = Catalog::from_yaml_str(&content)
///     .with_context(|| format!("loading {}", path.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<RoadmapError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: RoadmapError, new_ctx: &str) -> RoadmapError {
    match err {
        RoadmapError::Catalog {
            context: existing,
            source,
        } => RoadmapError::Catalog {
            context: chain_context(new_ctx, &existing),
            source,
        },
        RoadmapError::Access {
            context: existing,
            source,
        } => RoadmapError::Access {
            context: chain_context(new_ctx, &existing),
            source,
        },
        RoadmapError::Inventory {
            context: existing,
            source,
        } => RoadmapError::Inventory {
            context: chain_context(new_ctx, &existing),
            source,
        },
        RoadmapError::Io {
            path,
            message,
            source,
        } => RoadmapError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        RoadmapError::InvalidRow(msg) => RoadmapError::InvalidRow(chain_context(new_ctx, &msg)),
        RoadmapError::Config(msg) => RoadmapError::Config(chain_context(new_ctx, &msg)),
        RoadmapError::Validation(msg) => RoadmapError::Validation(chain_context(new_ctx, &msg)),
        // Upstream detail is passed through untouched.
        other => other,
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RoadmapError::unauthorized();
        assert!(
            err.to_string().contains("Not authorized")
                || err.to_string().contains("Access denied"),
            "unexpected message: {err}"
        );

        let err = RoadmapError::upstream(401, "Raised intentionally");
        assert_eq!(err.to_string(), "Upstream service returned 401: Raised intentionally");
    }

    #[test]
    fn test_error_class() {
        assert_eq!(RoadmapError::unauthorized().class(), ErrorClass::Unauthorized);
        assert_eq!(
            RoadmapError::invalid_resource_definition("bad key").class(),
            ErrorClass::BadRequest
        );
        assert_eq!(
            RoadmapError::InvalidRow("boom".to_string()).class(),
            ErrorClass::BadRequest
        );
        assert_eq!(RoadmapError::upstream(503, "down").class(), ErrorClass::Upstream);
        assert_eq!(RoadmapError::Cancelled.class(), ErrorClass::Internal);
    }

    #[test]
    fn test_context_chaining() {
        let initial: Result<()> = Err(RoadmapError::catalog(
            "initial context",
            CatalogErrorKind::DuplicateKey("nodejs/8/18".to_string()),
        ));

        match initial.context("outer context") {
            Err(RoadmapError::Catalog { context, .. }) => {
                assert_eq!(context, "outer context: initial context");
            }
            other => panic!("Expected Catalog error, got {other:?}"),
        }
    }

    #[test]
    fn test_upstream_detail_untouched_by_context() {
        let err: Result<()> = Err(RoadmapError::upstream(500, "detail"));
        match err.context("querying rbac") {
            Err(RoadmapError::Upstream { status, detail }) => {
                assert_eq!(status, 500);
                assert_eq!(detail, "detail");
            }
            other => panic!("Expected Upstream error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(RoadmapError::validation("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
