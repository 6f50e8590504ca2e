//! Planned package changes cross-referenced with the hosts they affect.

use crate::config::UpcomingConfig;
use crate::error::{ErrorContext, Result, RoadmapError};
use crate::model::{HostCounted, RelevantAppStream};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;
use uuid::Uuid;

const BUNDLED_CHANGES: &str = include_str!("../../data/upcoming.json");

/// A planned change as authored upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedChange {
    pub name: String,
    #[serde(rename = "type")]
    pub change_type: String,
    pub package: String,
    /// OS release the change lands in: "9", "9.6" or empty
    #[serde(default)]
    pub release: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub details: IndexMap<String, Value>,
}

impl PlannedChange {
    /// OS major named by the release, if any.
    #[must_use]
    pub fn os_major(&self) -> Option<u32> {
        let major = self.release.split('.').next()?;
        major.trim().parse().ok()
    }

    /// Whether an app stream row is affected by this change.
    #[must_use]
    pub fn affects(&self, row: &RelevantAppStream) -> bool {
        let package = self.package.as_str();
        let named = row.name.eq_ignore_ascii_case(package)
            || row.application_stream_name.eq_ignore_ascii_case(package);
        named && self.os_major().map_or(true, |major| major == row.os_major)
    }
}

/// A planned change with the hosts it would affect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingChange {
    pub name: String,
    #[serde(rename = "type")]
    pub change_type: String,
    pub package: String,
    pub release: String,
    pub date: String,
    pub details: ChangeDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeDetails {
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
    #[serde(rename = "potentiallyAffectedSystemsCount")]
    pub affected_count: usize,
    #[serde(rename = "potentiallyAffectedSystems")]
    pub affected_systems: Vec<Uuid>,
}

impl HostCounted for UpcomingChange {
    fn host_count(&self) -> usize {
        self.details.affected_count
    }
}

/// Parse planned changes from JSON.
pub fn parse_changes(content: &str) -> Result<Vec<PlannedChange>> {
    Ok(serde_json::from_str(content)?)
}

/// Load planned changes from a JSON file.
pub fn load_changes(path: &Path) -> Result<Vec<PlannedChange>> {
    let content = std::fs::read_to_string(path).map_err(|e| RoadmapError::io(path, e))?;
    parse_changes(&content).with_context(|| format!("planned changes {}", path.display()))
}

/// Configured planned changes, or the bundled list when no file is set.
pub fn configured_changes(config: &UpcomingConfig) -> Result<Vec<PlannedChange>> {
    match &config.changes_file {
        Some(path) => load_changes(path),
        None => parse_changes(BUNDLED_CHANGES).context("bundled planned changes"),
    }
}

/// Attach affected hosts to each planned change.
///
/// Input order is kept. Changes affecting no host are dropped unless `all`
/// is set.
#[must_use]
pub fn match_changes(changes: &[PlannedChange], rows: &[RelevantAppStream], all: bool) -> Vec<UpcomingChange> {
    changes
        .iter()
        .filter_map(|change| {
            let systems: BTreeSet<Uuid> = rows
                .iter()
                .filter(|row| change.affects(row))
                .flat_map(|row| row.systems.iter().copied())
                .collect();
            if systems.is_empty() && !all {
                return None;
            }
            Some(UpcomingChange {
                name: change.name.clone(),
                change_type: change.change_type.clone(),
                package: change.package.clone(),
                release: change.release.clone(),
                date: change.date.clone(),
                details: ChangeDetails {
                    extra: change.details.clone(),
                    affected_count: systems.len(),
                    affected_systems: systems.into_iter().collect(),
                },
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LifecycleDate, SupportStatus};

    fn row(name: &str, stream_name: &str, os_major: u32, systems: Vec<Uuid>) -> RelevantAppStream {
        RelevantAppStream {
            name: name.to_string(),
            application_stream_name: stream_name.to_string(),
            display_name: name.to_string(),
            os_major,
            os_minor: None,
            start_date: LifecycleDate::Unknown,
            end_date: LifecycleDate::Unknown,
            support_status: SupportStatus::Unknown,
            count: systems.len(),
            rolling: false,
            related: false,
            systems,
        }
    }

    fn change(package: &str, release: &str) -> PlannedChange {
        PlannedChange {
            name: format!("Change {package}"),
            change_type: "addition".to_string(),
            package: package.to_string(),
            release: release.to_string(),
            date: "2025-01-01".to_string(),
            details: IndexMap::new(),
        }
    }

    #[test]
    fn test_bundled_changes_parse() {
        let changes = configured_changes(&UpcomingConfig::default()).unwrap();
        assert!(!changes.is_empty());
        assert!(changes.iter().all(|c| !c.package.is_empty()));
    }

    #[test]
    fn test_release_major() {
        assert_eq!(change("x", "9.6").os_major(), Some(9));
        assert_eq!(change("x", "10").os_major(), Some(10));
        assert_eq!(change("x", "").os_major(), None);
    }

    #[test]
    fn test_affected_hosts_unioned_and_sorted() {
        let a = Uuid::from_u128(1);
        let b = Uuid::from_u128(2);
        let rows = vec![
            row("nodejs", "Node.js 18", 9, vec![b]),
            row("nodejs", "Node.js 20", 9, vec![a, b]),
            row("nodejs", "Node.js 18", 8, vec![Uuid::from_u128(3)]),
        ];
        let matched = match_changes(&[change("NodeJS", "9.5")], &rows, false);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].details.affected_systems, vec![a, b]);
        assert_eq!(matched[0].details.affected_count, 2);
    }

    #[test]
    fn test_all_flag_keeps_order_and_unaffected() {
        let rows = vec![row("redis", "Redis 7", 9, vec![Uuid::from_u128(1)])];
        let changes = vec![change("valkey", "10"), change("redis", "9")];

        let affected = match_changes(&changes, &rows, false);
        assert_eq!(affected.len(), 1);
        assert_eq!(affected[0].package, "redis");

        let all = match_changes(&changes, &rows, true);
        let packages: Vec<_> = all.iter().map(|c| c.package.as_str()).collect();
        assert_eq!(packages, vec!["valkey", "redis"]);
        assert_eq!(all[0].details.affected_count, 0);
    }

    #[test]
    fn test_details_flattened() {
        let mut planned = change("redis", "9");
        planned.details.insert("summary".to_string(), Value::from("Redis 7 EOL"));
        let rows = vec![row("redis", "Redis 7", 9, vec![Uuid::from_u128(7)])];
        let matched = match_changes(&[planned], &rows, false);

        let json = serde_json::to_value(&matched[0]).unwrap();
        assert_eq!(json["type"], "addition");
        assert_eq!(json["details"]["summary"], "Redis 7 EOL");
        assert_eq!(json["details"]["potentiallyAffectedSystemsCount"], 1);
    }
}
