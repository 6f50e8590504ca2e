//! Relevance operations: access, host feed, aggregation and rows.
//!
//! Each call recomputes from the live host feed. Nothing is cached between
//! calls apart from the catalog and the NEVRA memo.

use crate::access::{query_access, resolve_access, HostAccess};
use crate::aggregate::{run, AppStreamAggregator, CancelFlag, HostAggregator, RhelAggregator};
use crate::catalog::Catalog;
use crate::config::{AppConfig, StatusConfig};
use crate::error::Result;
use crate::inventory::{HostInventory, HostQuery};
use crate::model::{RelevanceReport, RelevantAppStream, RelevantSystem};
use crate::upcoming::{match_changes, PlannedChange, UpcomingChange};
use chrono::NaiveDate;

/// Per-call relevance settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelevanceOptions {
    /// Day support status is computed for
    pub today: NaiveDate,
    /// Add newer catalog entries as empty related rows
    pub related: bool,
    pub status: StatusConfig,
}

impl RelevanceOptions {
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            related: false,
            status: StatusConfig::default(),
        }
    }

    #[must_use]
    pub const fn related(mut self, related: bool) -> Self {
        self.related = related;
        self
    }

    #[must_use]
    pub const fn status(mut self, status: StatusConfig) -> Self {
        self.status = status;
        self
    }
}

/// Resolve the caller's host access through the RBAC service.
pub fn authorize(config: &AppConfig, identity: Option<&str>) -> Result<HostAccess> {
    let grants = query_access(config, identity)?;
    resolve_access(&grants)
}

/// RHEL versions in use, with support status per program.
pub fn relevant_rhel(
    catalog: &Catalog,
    inventory: &dyn HostInventory,
    query: &HostQuery,
    options: &RelevanceOptions,
    cancel: &CancelFlag,
) -> Result<RelevanceReport<RelevantSystem>> {
    let aggregator = run(RhelAggregator::new(catalog), inventory.hosts(query)?, cancel)?;
    aggregator.stats().log_summary("rhel");
    let rows = aggregator.into_rows(
        options.today,
        options.status.rhel_threshold_months,
        options.related,
    )?;
    Ok(RelevanceReport::from_rows(rows))
}

/// App streams in use, with support status.
pub fn relevant_app_streams(
    catalog: &Catalog,
    inventory: &dyn HostInventory,
    query: &HostQuery,
    options: &RelevanceOptions,
    cancel: &CancelFlag,
) -> Result<RelevanceReport<RelevantAppStream>> {
    let aggregator = run(AppStreamAggregator::new(catalog), inventory.hosts(query)?, cancel)?;
    aggregator.stats().log_summary("app_streams");
    let rows = aggregator.into_rows(
        options.today,
        options.status.app_stream_threshold_months,
        options.related,
    )?;
    Ok(RelevanceReport::from_rows(rows))
}

/// Planned changes with the hosts they would affect.
pub fn upcoming_changes(
    catalog: &Catalog,
    inventory: &dyn HostInventory,
    query: &HostQuery,
    changes: &[PlannedChange],
    all: bool,
    options: &RelevanceOptions,
    cancel: &CancelFlag,
) -> Result<RelevanceReport<UpcomingChange>> {
    let options = options.related(false);
    let in_use = relevant_app_streams(catalog, inventory, query, &options, cancel)?;
    Ok(RelevanceReport::from_rows(match_changes(changes, &in_use.data, all)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::MemoryInventory;
    use crate::model::LifecycleType;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_dev_fixture_rhel() {
        let catalog = Catalog::builtin().unwrap();
        let inventory = MemoryInventory::dev_fixture().unwrap();
        let query = HostQuery::new(HostAccess::Unrestricted);
        let report = relevant_rhel(
            &catalog,
            &inventory,
            &query,
            &RelevanceOptions::new(day(2024, 6, 1)),
            &CancelFlag::new(),
        )
        .unwrap();

        assert_eq!(report.meta.count, report.data.len());
        assert_eq!(report.meta.total, 6);
        let eus = report
            .data
            .iter()
            .find(|row| row.major == 9 && row.minor == Some(2))
            .unwrap();
        assert_eq!(eus.lifecycle_type, LifecycleType::Eus);
    }

    #[test]
    fn test_upcoming_from_fixture() {
        let catalog = Catalog::builtin().unwrap();
        let inventory = MemoryInventory::dev_fixture().unwrap();
        let query = HostQuery::new(HostAccess::Unrestricted);
        let changes = crate::upcoming::configured_changes(&Default::default()).unwrap();
        let report = upcoming_changes(
            &catalog,
            &inventory,
            &query,
            &changes,
            false,
            &RelevanceOptions::new(day(2024, 6, 1)),
            &CancelFlag::new(),
        )
        .unwrap();
        assert!(report.data.iter().all(|c| c.details.affected_count > 0));
        assert!(report.data.iter().any(|c| c.package == "postgresql"));
    }

    #[test]
    fn test_authorize_dev() {
        let config = AppConfig::builder().dev(true).build();
        assert_eq!(authorize(&config, None).unwrap(), HostAccess::Unrestricted);
    }
}
