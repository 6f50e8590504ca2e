//! **Lifecycle roadmap for RHEL fleets.**
//!
//! `lifecycle-roadmap` answers two questions about a tenant's registered
//! hosts: which RHEL releases and application streams are in use, and how
//! far along their support lifecycle each one is. It combines a catalog of
//! lifecycle facts with a streamed host feed and the caller's RBAC grants.
//!
//! ## Core Concepts & Modules
//!
//! - **[`catalog`]**: the immutable, indexed [`Catalog`] of RHEL release
//!   windows and application stream windows, built once per process.
//! - **[`parsers`]**: the NEVRA parser for installed package strings.
//! - **[`matching`]**: resolves installed modules and packages to catalog
//!   entries and finds newer related streams and releases.
//! - **[`access`]**: turns RBAC grants into unrestricted access or an
//!   allowed host group set.
//! - **[`inventory`]**: lazy host feeds, filtered by organization, access
//!   and OS version.
//! - **[`aggregate`]**: single-pass aggregators that keep host IDs per key.
//! - **[`lifecycle`]**: support status and support program rules.
//! - **[`engine`]**: the relevance operations tying all of the above
//!   together.
//! - **[`upcoming`]**: planned package changes matched to affected hosts.
//!
//! ## Getting Started
//!
//! ```no_run
//! use lifecycle_roadmap::aggregate::CancelFlag;
//! use lifecycle_roadmap::engine::{relevant_app_streams, RelevanceOptions};
//! use lifecycle_roadmap::inventory::{HostQuery, JsonlInventory};
//! use lifecycle_roadmap::{access::HostAccess, Catalog};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = Catalog::builtin()?;
//!     let inventory = JsonlInventory::new("hosts.jsonl");
//!     let query = HostQuery::new(HostAccess::Unrestricted).os_version(Some(9), None);
//!     let today = chrono::Utc::now().date_naive();
//!
//!     let report = relevant_app_streams(
//!         &catalog,
//!         &inventory,
//!         &query,
//!         &RelevanceOptions::new(today).related(true),
//!         &CancelFlag::new(),
//!     )?;
//!     for row in &report.data {
//!         println!("{} on RHEL {}: {} hosts, {}", row.application_stream_name,
//!             row.os_major, row.count, row.support_status);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `rbac` (default): queries the RBAC service over HTTP with `reqwest`.
//!   Without it, only development mode and the no-service path resolve
//!   access.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_excessive_bools
)]

pub mod access;
pub mod aggregate;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod inventory;
pub mod lifecycle;
pub mod matching;
pub mod model;
pub mod parsers;
pub mod upcoming;
pub mod utils;

// Re-export main types for convenience
pub use access::{resolve_access, HostAccess, Permission};
pub use catalog::Catalog;
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Validatable};
pub use engine::{relevant_app_streams, relevant_rhel, upcoming_changes, RelevanceOptions};
pub use error::{ErrorClass, ErrorContext, Result, RoadmapError};
pub use lifecycle::calculate_support_status;
pub use model::{
    AppStreamKey, LifecycleDate, LifecycleType, RelevanceReport, RelevantAppStream,
    RelevantSystem, SupportStatus,
};
pub use parsers::{Nevra, NevraError};
