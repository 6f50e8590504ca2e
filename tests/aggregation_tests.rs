//! End-to-end relevance reports over a host feed.

use chrono::NaiveDate;
use lifecycle_roadmap::aggregate::CancelFlag;
use lifecycle_roadmap::engine::{relevant_app_streams, relevant_rhel, RelevanceOptions};
use lifecycle_roadmap::inventory::{HostQuery, JsonlInventory, MemoryInventory};
use lifecycle_roadmap::model::{
    DnfModule, HostRecord, InstalledProduct, OperatingSystem, SystemProfile,
};
use lifecycle_roadmap::{Catalog, HostAccess, LifecycleDate, LifecycleType, RoadmapError};
use std::collections::HashSet;
use std::io::Write;
use uuid::Uuid;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn rhel_host(id: u128, minor: u32, modules: &[(&str, &str)], packages: &[&str], products: &[&str]) -> HostRecord {
    HostRecord {
        id: Uuid::from_u128(id),
        org_id: "1234".to_string(),
        system_profile_facts: Some(SystemProfile {
            operating_system: Some(OperatingSystem {
                name: Some("RHEL".to_string()),
                major: Some(9),
                minor: Some(minor),
            }),
            dnf_modules: modules
                .iter()
                .map(|(name, stream)| DnfModule {
                    name: (*name).to_string(),
                    stream: (*stream).to_string(),
                })
                .collect(),
            installed_packages: packages.iter().map(|p| (*p).to_string()).collect(),
            installed_products: products
                .iter()
                .map(|id| InstalledProduct {
                    id: Some((*id).to_string()),
                })
                .collect(),
            groups: Vec::new(),
        }),
    }
}

fn fleet() -> MemoryInventory {
    MemoryInventory::new(vec![
        rhel_host(1, 2, &[("nodejs", "18")], &["podman-4:4.4.1-12.el9_2.x86_64"], &["479", "70"]),
        rhel_host(2, 2, &[("nodejs", "18"), ("nginx", "1.22")], &[], &["479"]),
        rhel_host(3, 4, &[("nodejs", "20")], &["python3.12-3.12.1-4.el9.x86_64", "bad"], &[]),
        HostRecord {
            id: Uuid::from_u128(4),
            org_id: "1234".to_string(),
            system_profile_facts: None,
        },
    ])
}

fn unrestricted() -> HostQuery {
    HostQuery::new(HostAccess::Unrestricted)
}

#[test]
fn test_app_stream_counts_match_systems() {
    let catalog = Catalog::builtin().unwrap();
    let options = RelevanceOptions::new(day(2025, 1, 15)).related(true);
    let report = relevant_app_streams(&catalog, &fleet(), &unrestricted(), &options, &CancelFlag::new()).unwrap();

    assert_eq!(report.meta.count, report.data.len());
    assert_eq!(report.meta.total, report.data.iter().map(|row| row.count).sum::<usize>());
    for row in &report.data {
        let unique: HashSet<_> = row.systems.iter().collect();
        assert_eq!(row.count, unique.len());
        assert_eq!(row.count, row.systems.len());
    }

    let node18 = report
        .data
        .iter()
        .find(|row| row.application_stream_name == "Node.js 18" && !row.related)
        .unwrap();
    assert_eq!(node18.systems, vec![Uuid::from_u128(1), Uuid::from_u128(2)]);
}

#[test]
fn test_related_streams_are_new_and_empty() {
    let catalog = Catalog::builtin().unwrap();
    let options = RelevanceOptions::new(day(2025, 1, 15)).related(true);
    let report = relevant_app_streams(&catalog, &fleet(), &unrestricted(), &options, &CancelFlag::new()).unwrap();

    let observed: HashSet<_> = report
        .data
        .iter()
        .filter(|row| !row.related)
        .map(|row| (row.application_stream_name.clone(), row.os_major, row.os_minor))
        .collect();
    let related: Vec<_> = report.data.iter().filter(|row| row.related).collect();
    assert!(related.iter().any(|row| row.application_stream_name == "Node.js 22"));
    for row in related {
        assert_eq!(row.count, 0);
        assert!(row.systems.is_empty());
        assert!(!row.rolling);
        assert!(!observed.contains(&(row.application_stream_name.clone(), row.os_major, row.os_minor)));
    }
}

#[test]
fn test_rolling_stream_on_eus_host() {
    let catalog = Catalog::builtin().unwrap();
    let options = RelevanceOptions::new(day(2024, 6, 1));
    let report = relevant_app_streams(&catalog, &fleet(), &unrestricted(), &options, &CancelFlag::new()).unwrap();

    let podman = report.data.iter().find(|row| row.name == "podman").unwrap();
    assert!(podman.rolling);
    assert_eq!(podman.os_minor, Some(2));
    assert_eq!(podman.start_date, LifecycleDate::from(day(2023, 5, 10)));
    assert_eq!(podman.end_date, LifecycleDate::from(day(2025, 5, 31)));
}

#[test]
fn test_rhel_rows_sorted_descending() {
    let catalog = Catalog::builtin().unwrap();
    let options = RelevanceOptions::new(day(2024, 6, 1));
    let report = relevant_rhel(&catalog, &fleet(), &unrestricted(), &options, &CancelFlag::new()).unwrap();

    let keys: Vec<_> = report
        .data
        .iter()
        .map(|row| (row.major, row.minor, row.lifecycle_type))
        .collect();
    assert_eq!(
        keys,
        vec![
            (9, Some(4), LifecycleType::Mainline),
            (9, Some(2), LifecycleType::Eus),
            (9, Some(2), LifecycleType::Mainline),
        ]
    );
    assert_eq!(report.meta.total, 3);
}

#[test]
fn test_version_filter() {
    let catalog = Catalog::builtin().unwrap();
    let options = RelevanceOptions::new(day(2024, 6, 1));
    let query = unrestricted().os_version(Some(9), Some(4));
    let report = relevant_rhel(&catalog, &fleet(), &query, &options, &CancelFlag::new()).unwrap();
    assert_eq!(report.data.len(), 1);
    assert_eq!(report.data[0].minor, Some(4));
}

#[test]
fn test_cancellation_discards_everything() {
    let catalog = Catalog::builtin().unwrap();
    let cancel = CancelFlag::new();
    cancel.cancel();
    let result = relevant_app_streams(
        &catalog,
        &fleet(),
        &unrestricted(),
        &RelevanceOptions::new(day(2024, 6, 1)),
        &cancel,
    );
    assert!(matches!(result, Err(RoadmapError::Cancelled)));
}

#[test]
fn test_malformed_feed_fails_request() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"id":"{}"}}"#, Uuid::from_u128(1)).unwrap();
    writeln!(file, "{{truncated").unwrap();

    let catalog = Catalog::builtin().unwrap();
    let inventory = JsonlInventory::new(file.path());
    let result = relevant_rhel(
        &catalog,
        &inventory,
        &unrestricted(),
        &RelevanceOptions::new(day(2024, 6, 1)),
        &CancelFlag::new(),
    );
    assert!(matches!(result, Err(RoadmapError::Inventory { .. })));
}
