//! Matching host data against the catalog.
//!
//! - [`AppStreamMatcher`]: installed modules and packages to catalog entries,
//!   with per-request caching
//! - [`related_app_streams`] and [`related_rhel_releases`]: newer catalog
//!   entries that share a product family with what hosts run
//!
//! # Example
//!
//! ```ignore
//! let mut matcher = AppStreamMatcher::new(&catalog);
//! if let Some(entry) = matcher.resolve_module(&module, 9).entry() {
//!     println!("{}", entry.application_stream_name);
//! }
//! ```

mod app_stream;
mod related;

pub use app_stream::{match_module, match_package, AppStreamMatcher, ModuleMatch, PackageMatch};
pub use related::{is_ahead_of, related_app_streams, related_rhel_releases};
