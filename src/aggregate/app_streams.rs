//! App stream relevance.

use super::stats::MissingStats;
use super::HostAggregator;
use crate::catalog::Catalog;
use crate::error::Result;
use crate::lifecycle::{calculate_support_status, lifecycle_type_from_products};
use crate::matching::{related_app_streams, AppStreamMatcher, ModuleMatch, PackageMatch};
use crate::model::{AppStreamKey, CatalogAppStream, HostRecord, LifecycleType, RelevantAppStream};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// Operating system name app stream hosts must report.
pub const RHEL_OS_NAME: &str = "RHEL";

/// Groups hosts by the app streams installed on them.
///
/// A host lands under every stream its modules and packages resolve to.
#[derive(Debug)]
pub struct AppStreamAggregator<'c> {
    matcher: AppStreamMatcher<'c>,
    systems: BTreeMap<AppStreamKey, BTreeSet<Uuid>>,
    stats: MissingStats,
}

impl<'c> AppStreamAggregator<'c> {
    #[must_use]
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            matcher: AppStreamMatcher::new(catalog),
            systems: BTreeMap::new(),
            stats: MissingStats::default(),
        }
    }

    #[must_use]
    pub const fn systems(&self) -> &BTreeMap<AppStreamKey, BTreeSet<Uuid>> {
        &self.systems
    }

    fn key_for(
        &mut self,
        entry: &CatalogAppStream,
        major: u32,
        minor: Option<u32>,
        lifecycle: LifecycleType,
    ) -> AppStreamKey {
        if !entry.rolling {
            return AppStreamKey::from_entry(entry);
        }
        let catalog = self.matcher.catalog();
        let release = catalog
            .rhel_release(major, minor)
            .or_else(|| catalog.rhel_release(major, None));
        if release.is_none() {
            self.stats.rhel_lifecycle += 1;
        }
        AppStreamKey::rolling(entry, minor, lifecycle, release)
    }

    /// Build result rows sorted by name, OS major and OS minor.
    ///
    /// With `related`, newer catalog streams sharing a display name with an
    /// observed stream are added as empty rows.
    pub fn into_rows(self, today: NaiveDate, months: u32, related: bool) -> Result<Vec<RelevantAppStream>> {
        let mut rows = Vec::with_capacity(self.systems.len());
        for (key, systems) in &self.systems {
            let systems: Vec<Uuid> = systems.iter().copied().collect();
            rows.push(row(key, systems, false, today, months)?);
        }

        if related {
            let catalog = self.matcher.catalog();
            for key in related_app_streams(catalog, self.systems.keys(), today) {
                rows.push(row(&key, Vec::new(), true, today, months)?);
            }
        }

        rows.sort_by(|a, b| {
            (&a.name, a.os_major, a.os_minor).cmp(&(&b.name, b.os_major, b.os_minor))
        });
        Ok(rows)
    }
}

fn row(
    key: &AppStreamKey,
    systems: Vec<Uuid>,
    related: bool,
    today: NaiveDate,
    months: u32,
) -> Result<RelevantAppStream> {
    RelevantAppStream {
        name: key.name.clone(),
        application_stream_name: key.application_stream_name.clone(),
        display_name: key.display_name.clone(),
        os_major: key.os_major,
        os_minor: key.os_minor,
        start_date: key.start_date,
        end_date: key.end_date,
        support_status: calculate_support_status(key.start_date, key.end_date, today, months),
        count: systems.len(),
        rolling: key.rolling,
        related,
        systems,
    }
    .validated()
}

impl HostAggregator for AppStreamAggregator<'_> {
    fn observe(&mut self, host: &HostRecord) {
        let Some(profile) = &host.system_profile_facts else {
            self.stats.system_profile += 1;
            return;
        };
        let Some(os) = profile
            .operating_system
            .as_ref()
            .filter(|os| os.name.as_deref() == Some(RHEL_OS_NAME))
        else {
            self.stats.os += 1;
            return;
        };
        let Some(major) = os.major else {
            self.stats.os_version += 1;
            return;
        };
        let minor = os.minor;
        let lifecycle = lifecycle_type_from_products(&profile.installed_products);

        // Packages are still resolved for hosts without modules
        if profile.dnf_modules.is_empty() {
            self.stats.dnf_modules += 1;
        }

        let mut keys = Vec::new();
        for module in &profile.dnf_modules {
            match self.matcher.resolve_module(module, major) {
                ModuleMatch::Catalog(entry) => keys.push(self.key_for(entry, major, minor, lifecycle)),
                ModuleMatch::Placeholder(entry) => {
                    keys.push(self.key_for(&entry, major, minor, lifecycle));
                }
                ModuleMatch::Untracked => self.stats.untracked_module += 1,
                ModuleMatch::SkippedPerl => {}
            }
        }
        for package in &profile.installed_packages {
            match self.matcher.resolve_package(package, major) {
                PackageMatch::Catalog(entry) => keys.push(self.key_for(entry, major, minor, lifecycle)),
                PackageMatch::Malformed(err) => {
                    tracing::debug!("Skipping package {}: {}", package, err);
                    self.stats.malformed_package += 1;
                }
                PackageMatch::NoMatch => {}
            }
        }

        for key in keys {
            self.systems.entry(key).or_default().insert(host.id);
        }
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
