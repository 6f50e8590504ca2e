//! JSON-lines host feed.

use super::{HostInventory, HostQuery, HostStream};
use crate::error::{InventoryErrorKind, Result, RoadmapError};
use crate::model::HostRecord;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Reads one host record per line from a file, streaming.
///
/// Blank lines are skipped. A line that is not a host record ends the feed
/// with an error.
#[derive(Debug, Clone)]
pub struct JsonlInventory {
    path: PathBuf,
}

impl JsonlInventory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HostInventory for JsonlInventory {
    fn hosts<'a>(&'a self, query: &'a HostQuery) -> Result<HostStream<'a>> {
        let file = File::open(&self.path).map_err(|e| {
            RoadmapError::inventory(
                format!("opening {}", self.path.display()),
                InventoryErrorKind::Unavailable(e.to_string()),
            )
        })?;
        let path = &self.path;

        let records = BufReader::new(file)
            .lines()
            .enumerate()
            .filter_map(move |(index, line)| {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => return Some(Err(RoadmapError::io(path, e))),
                };
                if line.trim().is_empty() {
                    return None;
                }
                match serde_json::from_str::<HostRecord>(&line) {
                    Ok(host) => query.matches(&host).then_some(Ok(host)),
                    Err(e) => Some(Err(RoadmapError::inventory(
                        format!("reading {}", path.display()),
                        InventoryErrorKind::MalformedRecord {
                            line: index + 1,
                            message: e.to_string(),
                        },
                    ))),
                }
            });
        Ok(Box::new(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::HostAccess;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_streams_matching_hosts() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"id":"f0f0e6a4-4b0a-4d3c-9a2a-6c2f44f5a001","org_id":"1"}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"id":"f0f0e6a4-4b0a-4d3c-9a2a-6c2f44f5a002","org_id":"2"}}"#).unwrap();

        let inventory = JsonlInventory::new(file.path());
        let query = HostQuery::new(HostAccess::Unrestricted).org_id("2");
        let hosts: Vec<_> = inventory.hosts(&query).unwrap().collect::<Result<_>>().unwrap();
        assert_eq!(hosts.len(), 1);
        assert_eq!(hosts[0].org_id, "2");
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"id":"f0f0e6a4-4b0a-4d3c-9a2a-6c2f44f5a001"}}"#).unwrap();
        writeln!(file, "not json").unwrap();

        let inventory = JsonlInventory::new(file.path());
        let query = HostQuery::new(HostAccess::Unrestricted);
        let results: Vec<_> = inventory.hosts(&query).unwrap().collect();
        assert!(results[0].is_ok());
        match &results[1] {
            Err(RoadmapError::Inventory {
                source: InventoryErrorKind::MalformedRecord { line, .. },
                ..
            }) => assert_eq!(*line, 2),
            other => panic!("expected malformed record, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let inventory = JsonlInventory::new("/nonexistent/hosts.jsonl");
        let query = HostQuery::new(HostAccess::Unrestricted);
        assert!(inventory.hosts(&query).is_err());
    }
}
