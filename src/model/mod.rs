//! Data model for lifecycle relevance.
//!
//! Catalog entries describe what Red Hat ships and when it is supported.
//! Host records describe what a tenant runs. Result rows join the two and
//! carry the computed support status.
//!
//! ```ignore
//! let entry: CatalogAppStream = serde_yaml::from_str(yaml)?;
//! let key = AppStreamKey::from_entry(&entry);
//! ```

mod catalog;
mod host;
mod key;
mod lifecycle;
mod results;

pub use catalog::*;
pub use host::*;
pub use key::*;
pub use lifecycle::*;
pub use results::*;
