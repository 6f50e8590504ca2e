//! Catalog entry types: RHEL releases and application streams.

use super::lifecycle::{LifecycleDate, LifecycleType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How an application stream is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppStreamKind {
    Module,
    Package,
    Scl,
}

impl AppStreamKind {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Package => "package",
            Self::Scl => "scl",
        }
    }

    /// Parse a kind name, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "module" => Some(Self::Module),
            "package" => Some(Self::Package),
            "scl" => Some(Self::Scl),
            _ => None,
        }
    }
}

impl fmt::Display for AppStreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An application stream lifecycle entry as it appears in a catalog file.
///
/// Entries are normalized by the catalog loader: an `initial_product_version`
/// fills in `os_major`, `os_minor` and a missing start date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogAppStream {
    /// Module or package name
    pub name: String,
    /// Human readable stream group, e.g. "Node.js 20"
    pub application_stream_name: String,
    /// Product family used to relate streams, e.g. "Node.js"
    #[serde(default)]
    pub display_name: String,
    /// Stream identifier, e.g. "20", "1.24", "rhel8"
    pub stream: String,
    #[serde(default)]
    pub os_major: Option<u32>,
    #[serde(default)]
    pub os_minor: Option<u32>,
    #[serde(default)]
    pub start_date: LifecycleDate,
    #[serde(default)]
    pub end_date: LifecycleDate,
    pub kind: AppStreamKind,
    /// Follows the OS lifecycle instead of its own dates
    #[serde(default)]
    pub rolling: bool,
    /// RHEL release that introduced the stream ("9.2" or "9")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_product_version: Option<String>,
}

impl CatalogAppStream {
    /// Placeholder for an installed module the catalog has no stream for.
    #[must_use]
    pub fn placeholder(name: &str, stream: &str, os_major: u32) -> Self {
        Self {
            name: name.to_string(),
            application_stream_name: "Unknown".to_string(),
            display_name: format!("{name} {stream}"),
            stream: stream.to_string(),
            os_major: Some(os_major),
            os_minor: None,
            start_date: LifecycleDate::Unknown,
            end_date: LifecycleDate::Unknown,
            kind: AppStreamKind::Module,
            rolling: false,
            initial_product_version: None,
        }
    }

    /// OS major after normalization. Entries without one never reach an index.
    #[must_use]
    pub fn major(&self) -> u32 {
        self.os_major.unwrap_or_default()
    }
}

/// Lifecycle dates of a RHEL release, or of a whole major when `minor` is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRhelLifecycle {
    #[serde(default = "default_rhel_name")]
    pub name: String,
    pub major: u32,
    #[serde(default)]
    pub minor: Option<u32>,
    pub start_date: LifecycleDate,
    pub end_date: LifecycleDate,
    #[serde(default)]
    pub end_date_eus: LifecycleDate,
    #[serde(default)]
    pub end_date_e4s: LifecycleDate,
    #[serde(default)]
    pub end_date_els: LifecycleDate,
}

fn default_rhel_name() -> String {
    "RHEL".to_string()
}

impl CatalogRhelLifecycle {
    /// Catalog key: "{major}" or "{major}.{minor}".
    #[must_use]
    pub fn key(&self) -> String {
        rhel_key(self.major, self.minor)
    }

    /// End date for a support program.
    ///
    /// Falls back to the mainline end when the release does not offer the
    /// program.
    #[must_use]
    pub fn end_date_for(&self, lifecycle: LifecycleType) -> LifecycleDate {
        let extended = match lifecycle {
            LifecycleType::Mainline => return self.end_date,
            LifecycleType::Eus => self.end_date_eus,
            LifecycleType::E4s => self.end_date_e4s,
            LifecycleType::Els => self.end_date_els,
        };
        if extended.is_known() {
            extended
        } else {
            self.end_date
        }
    }
}

/// Build the RHEL catalog key for a version.
#[must_use]
pub fn rhel_key(major: u32, minor: Option<u32>) -> String {
    match minor {
        Some(minor) => format!("{major}.{minor}"),
        None => major.to_string(),
    }
}
