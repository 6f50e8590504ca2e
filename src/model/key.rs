//! Accumulation keys for app stream aggregation.

use super::catalog::{AppStreamKind, CatalogAppStream, CatalogRhelLifecycle};
use super::lifecycle::{LifecycleDate, LifecycleType};

/// Identity of an app stream as observed on hosts.
///
/// Built from a catalog entry's structural fields. Rolling streams also carry
/// the host's OS minor and support program, because their dates come from
/// that RHEL release rather than from the catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AppStreamKey {
    pub name: String,
    pub application_stream_name: String,
    pub display_name: String,
    pub stream: String,
    pub kind: AppStreamKind,
    pub os_major: u32,
    pub os_minor: Option<u32>,
    pub start_date: LifecycleDate,
    pub end_date: LifecycleDate,
    pub rolling: bool,
    pub os_lifecycle: Option<LifecycleType>,
}

/// Fields that identify a catalog stream regardless of how it was observed.
pub type CatalogIdentity<'a> = (&'a str, &'a str, &'a str, u32, Option<u32>);

impl AppStreamKey {
    /// Key for a stream with its own lifecycle dates.
    #[must_use]
    pub fn from_entry(entry: &CatalogAppStream) -> Self {
        Self {
            name: entry.name.clone(),
            application_stream_name: entry.application_stream_name.clone(),
            display_name: entry.display_name.clone(),
            stream: entry.stream.clone(),
            kind: entry.kind,
            os_major: entry.major(),
            os_minor: entry.os_minor,
            start_date: entry.start_date,
            end_date: entry.end_date,
            rolling: entry.rolling,
            os_lifecycle: None,
        }
    }

    /// Key for a rolling stream observed on a host.
    ///
    /// Dates are borrowed from the host's RHEL release and support program;
    /// both stay unknown when the RHEL catalog has no such release.
    #[must_use]
    pub fn rolling(
        entry: &CatalogAppStream,
        host_minor: Option<u32>,
        lifecycle: LifecycleType,
        rhel: Option<&CatalogRhelLifecycle>,
    ) -> Self {
        let (start_date, end_date) = rhel.map_or(
            (LifecycleDate::Unknown, LifecycleDate::Unknown),
            |rhel| (rhel.start_date, rhel.end_date_for(lifecycle)),
        );
        Self {
            os_minor: host_minor,
            start_date,
            end_date,
            rolling: true,
            os_lifecycle: Some(lifecycle),
            ..Self::from_entry(entry)
        }
    }

    /// Identity used to tell whether a catalog stream was already observed.
    #[must_use]
    pub fn catalog_identity(&self) -> CatalogIdentity<'_> {
        (
            &self.display_name,
            &self.application_stream_name,
            &self.stream,
            self.os_major,
            self.os_minor,
        )
    }
}
