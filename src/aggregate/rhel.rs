//! RHEL version relevance.

use super::stats::MissingStats;
use super::HostAggregator;
use crate::catalog::Catalog;
use crate::error::Result;
use crate::lifecycle::{calculate_support_status, lifecycle_type_from_products};
use crate::matching::related_rhel_releases;
use crate::model::{HostRecord, LifecycleDate, LifecycleType, RelevantSystem};
use chrono::NaiveDate;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// Accumulation key: one RHEL release under one support program.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RhelKey {
    pub name: String,
    pub major: u32,
    pub minor: Option<u32>,
    pub lifecycle: LifecycleType,
}

/// Groups hosts by OS version and support program.
#[derive(Debug, Clone)]
pub struct RhelAggregator<'c> {
    catalog: &'c Catalog,
    systems: BTreeMap<RhelKey, BTreeSet<Uuid>>,
    stats: MissingStats,
}

impl<'c> RhelAggregator<'c> {
    #[must_use]
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            systems: BTreeMap::new(),
            stats: MissingStats::default(),
        }
    }

    /// Accumulated host sets by key.
    #[must_use]
    pub const fn systems(&self) -> &BTreeMap<RhelKey, BTreeSet<Uuid>> {
        &self.systems
    }

    /// Build result rows, newest release first.
    ///
    /// Rows sort by (major, minor, lifecycle type) descending, so the EUS
    /// row of a release comes before its mainline row.
    ///
    /// With `related`, later minors of every observed major that are still
    /// supported are added as empty mainline rows.
    pub fn into_rows(self, today: NaiveDate, months: u32, related: bool) -> Result<Vec<RelevantSystem>> {
        let mut rows = Vec::with_capacity(self.systems.len());
        for (key, systems) in &self.systems {
            let release = self.catalog.rhel_release(key.major, key.minor);
            let (start_date, end_date) = match release {
                Some(release) => (release.start_date, release.end_date_for(key.lifecycle)),
                None => {
                    tracing::warn!(
                        "No lifecycle data for {} {}",
                        key.name,
                        crate::model::rhel_key(key.major, key.minor)
                    );
                    (LifecycleDate::Unknown, LifecycleDate::Unknown)
                }
            };
            rows.push(
                RelevantSystem {
                    name: key.name.clone(),
                    major: key.major,
                    minor: key.minor,
                    lifecycle_type: key.lifecycle,
                    start_date,
                    end_date,
                    support_status: calculate_support_status(start_date, end_date, today, months),
                    count: systems.len(),
                    related: false,
                    systems: systems.iter().copied().collect(),
                }
                .validated()?,
            );
        }

        if related {
            let observed = self.systems.keys().map(|key| (key.major, key.minor));
            for release in related_rhel_releases(self.catalog, observed, today) {
                rows.push(
                    RelevantSystem {
                        name: release.name.clone(),
                        major: release.major,
                        minor: release.minor,
                        lifecycle_type: LifecycleType::Mainline,
                        start_date: release.start_date,
                        end_date: release.end_date,
                        support_status: calculate_support_status(
                            release.start_date,
                            release.end_date,
                            today,
                            months,
                        ),
                        count: 0,
                        related: true,
                        systems: Vec::new(),
                    }
                    .validated()?,
                );
            }
        }

        rows.sort_by_key(|row| Reverse((row.major, row.minor, row.lifecycle_type)));
        Ok(rows)
    }
}

impl HostAggregator for RhelAggregator<'_> {
    fn observe(&mut self, host: &HostRecord) {
        let Some(profile) = &host.system_profile_facts else {
            self.stats.system_profile += 1;
            return;
        };
        let Some(os) = &profile.operating_system else {
            self.stats.os_profile += 1;
            return;
        };
        let Some(name) = os.name.as_deref().filter(|name| !name.is_empty()) else {
            self.stats.os_profile += 1;
            return;
        };
        let Some(major) = os.major else {
            self.stats.os_version += 1;
            return;
        };

        if self.catalog.rhel_release(major, os.minor).is_none() {
            self.stats.rhel_lifecycle += 1;
        }

        let key = RhelKey {
            name: name.to_string(),
            major,
            minor: os.minor,
            lifecycle: lifecycle_type_from_products(&profile.installed_products),
        };
        self.systems.entry(key).or_default().insert(host.id);
    }

    fn merge(&mut self, other: Self) {
        for (key, systems) in other.systems {
            self.systems.entry(key).or_default().extend(systems);
        }
        self.stats.merge(&other.stats);
    }

    fn stats(&self) -> &MissingStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InstalledProduct, OperatingSystem, SupportStatus, SystemProfile};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn host(major: u32, minor: Option<u32>, products: &[&str]) -> HostRecord {
        HostRecord {
            id: Uuid::new_v4(),
            org_id: "1234".to_string(),
            system_profile_facts: Some(SystemProfile {
                operating_system: Some(OperatingSystem {
                    name: Some("RHEL".to_string()),
                    major: Some(major),
                    minor,
                }),
                installed_products: products
                    .iter()
                    .map(|id| InstalledProduct {
                        id: Some((*id).to_string()),
                    })
                    .collect(),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_hosts_grouped_by_program() {
        let catalog = Catalog::builtin().unwrap();
        let mut aggregator = RhelAggregator::new(&catalog);
        aggregator.observe(&host(9, Some(2), &["479"]));
        aggregator.observe(&host(9, Some(2), &["479", "70"]));
        aggregator.observe(&host(9, Some(2), &[]));

        let rows = aggregator.into_rows(day(2024, 6, 1), 6, false).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].lifecycle_type, LifecycleType::Eus);
        assert_eq!(rows[0].count, 1);
        assert_eq!(rows[0].end_date, LifecycleDate::from(day(2025, 5, 31)));
        assert_eq!(rows[0].support_status, SupportStatus::Supported);
        assert_eq!(rows[1].lifecycle_type, LifecycleType::Mainline);
        assert_eq!(rows[1].count, 2);
        assert_eq!(rows[1].support_status, SupportStatus::Retired);
    }

    #[test]
    fn test_missing_data_counted() {
        let catalog = Catalog::builtin().unwrap();
        let mut aggregator = RhelAggregator::new(&catalog);
        aggregator.observe(&HostRecord::default());

        let mut no_name = host(9, Some(2), &[]);
        if let Some(os) = no_name
            .system_profile_facts
            .as_mut()
            .and_then(|p| p.operating_system.as_mut())
        {
            os.name = None;
        }
        aggregator.observe(&no_name);
        aggregator.observe(&host(7, Some(9), &[]));

        assert_eq!(aggregator.stats().system_profile, 1);
        assert_eq!(aggregator.stats().os_profile, 1);
        assert_eq!(aggregator.stats().rhel_lifecycle, 1);

        let rows = aggregator.into_rows(day(2024, 6, 1), 6, false).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].start_date, LifecycleDate::Unknown);
        assert_eq!(rows[0].support_status, SupportStatus::Unknown);
    }

    #[test]
    fn test_related_rows_are_empty() {
        let catalog = Catalog::builtin().unwrap();
        let mut aggregator = RhelAggregator::new(&catalog);
        aggregator.observe(&host(9, Some(4), &[]));

        let rows = aggregator.into_rows(day(2025, 6, 1), 6, true).unwrap();
        let related: Vec<_> = rows.iter().filter(|row| row.related).collect();
        assert!(!related.is_empty());
        assert!(related.iter().all(|row| row.count == 0 && row.systems.is_empty()));
        assert!(related.iter().all(|row| row.minor > Some(4)));
        assert!(rows.windows(2).all(|pair| (pair[0].major, pair[0].minor) >= (pair[1].major, pair[1].minor)));
    }
}
