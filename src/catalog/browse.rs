//! Catalog listings.

use super::Catalog;
use crate::model::{AppStreamKind, CatalogAppStream, CatalogRhelLifecycle};
use std::cmp::Reverse;
use std::collections::BTreeSet;

/// Filters for app stream listings. Text filters are case-insensitive
/// substring matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppStreamFilter {
    pub name: Option<String>,
    pub application_stream_name: Option<String>,
    pub kind: Option<AppStreamKind>,
    pub os_major: Option<u32>,
}

impl AppStreamFilter {
    #[must_use]
    pub fn matches(&self, entry: &CatalogAppStream) -> bool {
        contains_ci(self.name.as_deref(), &entry.name)
            && contains_ci(
                self.application_stream_name.as_deref(),
                &entry.application_stream_name,
            )
            && self.kind.map_or(true, |kind| kind == entry.kind)
            && self.os_major.map_or(true, |major| entry.os_major == Some(major))
    }
}

fn contains_ci(needle: Option<&str>, haystack: &str) -> bool {
    needle.map_or(true, |needle| haystack.to_lowercase().contains(&needle.to_lowercase()))
}

/// Which names a name listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    /// Distinct module and package names
    Packages,
    /// Distinct application stream names
    Streams,
}

impl Catalog {
    /// RHEL rows filtered by version, newest first.
    ///
    /// A minor filter only applies together with a major. `full` keeps only
    /// the whole-major summary rows.
    #[must_use]
    pub fn list_rhel(
        &self,
        major: Option<u32>,
        minor: Option<u32>,
        full: bool,
    ) -> Vec<CatalogRhelLifecycle> {
        let mut rows: Vec<_> = self
            .rhel_lifecycles()
            .iter()
            .filter(|row| match (major, minor) {
                (Some(major), Some(minor)) => row.major == major && row.minor == Some(minor),
                (Some(major), None) => row.major == major,
                _ => true,
            })
            .filter(|row| !full || row.minor.is_none())
            .cloned()
            .collect();
        // Whole-major rows sort as minor 0
        rows.sort_by_key(|row| Reverse((row.major, row.minor.unwrap_or(0))));
        rows
    }

    /// App stream entries matching a filter, sorted by name.
    ///
    /// Rolling entries report the end date of their OS major.
    #[must_use]
    pub fn list_app_streams(&self, filter: &AppStreamFilter) -> Vec<CatalogAppStream> {
        let mut rows: Vec<_> = self
            .app_streams()
            .iter()
            .filter(|entry| filter.matches(entry))
            .map(|entry| {
                let mut entry = entry.clone();
                if entry.rolling {
                    if let Some(os) = self.rhel_release(entry.major(), None) {
                        entry.end_date = os.end_date;
                    }
                }
                entry
            })
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        rows
    }

    /// Distinct, sorted names of entries matching a filter.
    #[must_use]
    pub fn list_names(&self, filter: &AppStreamFilter, kind: NameKind) -> Vec<String> {
        let names: BTreeSet<&str> = self
            .app_streams()
            .iter()
            .filter(|entry| filter.matches(entry))
            .map(|entry| match kind {
                NameKind::Packages => entry.name.as_str(),
                NameKind::Streams => entry.application_stream_name.as_str(),
            })
            .collect();
        names.into_iter().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LifecycleDate;
    use chrono::NaiveDate;

    #[test]
    fn test_list_rhel_order_and_filters() {
        let catalog = Catalog::builtin().unwrap();

        let all = catalog.list_rhel(None, None, false);
        assert_eq!(all.first().map(CatalogRhelLifecycle::key).as_deref(), Some("10.2"));

        let nine = catalog.list_rhel(Some(9), None, false);
        assert!(nine.iter().all(|row| row.major == 9));
        assert_eq!(nine[0].key(), "9.10");

        let exact = catalog.list_rhel(Some(8), Some(6), false);
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].key(), "8.6");

        let full = catalog.list_rhel(None, None, true);
        let keys: Vec<_> = full.iter().map(CatalogRhelLifecycle::key).collect();
        assert_eq!(keys, vec!["9", "8"]);
    }

    #[test]
    fn test_list_app_streams_filters() {
        let catalog = Catalog::builtin().unwrap();
        let filter = AppStreamFilter {
            name: Some("NODE".to_string()),
            kind: Some(AppStreamKind::Module),
            os_major: Some(9),
            ..Default::default()
        };
        let rows = catalog.list_app_streams(&filter);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.name == "nodejs"));
    }

    #[test]
    fn test_rolling_listing_uses_os_end_date() {
        let catalog = Catalog::builtin().unwrap();
        let filter = AppStreamFilter {
            name: Some("aardvark".to_string()),
            ..Default::default()
        };
        let rows = catalog.list_app_streams(&filter);
        assert_eq!(
            rows[0].end_date,
            LifecycleDate::from(NaiveDate::from_ymd_opt(2032, 5, 31).unwrap())
        );
    }

    #[test]
    fn test_list_names() {
        let catalog = Catalog::builtin().unwrap();
        let filter = AppStreamFilter {
            os_major: Some(9),
            application_stream_name: Some("container".to_string()),
            ..Default::default()
        };
        assert_eq!(
            catalog.list_names(&filter, NameKind::Packages),
            vec!["aardvark-dns", "netavark", "podman"]
        );
        assert_eq!(catalog.list_names(&filter, NameKind::Streams), vec!["container-tools"]);
    }
}
