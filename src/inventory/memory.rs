//! In-memory host feed.

use super::{HostInventory, HostQuery, HostStream};
use crate::error::{InventoryErrorKind, Result, RoadmapError};
use crate::model::HostRecord;

const DEV_HOSTS: &str = include_str!("../../data/dev_hosts.jsonl");

/// Host feed backed by a vector.
#[derive(Debug, Clone, Default)]
pub struct MemoryInventory {
    hosts: Vec<HostRecord>,
}

impl MemoryInventory {
    #[must_use]
    pub const fn new(hosts: Vec<HostRecord>) -> Self {
        Self { hosts }
    }

    /// Parse JSON-lines content. Blank lines are skipped.
    pub fn from_jsonl_str(content: &str) -> Result<Self> {
        let hosts = content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                serde_json::from_str(line).map_err(|e| {
                    RoadmapError::inventory(
                        "parsing host records",
                        InventoryErrorKind::MalformedRecord {
                            line: index + 1,
                            message: e.to_string(),
                        },
                    )
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { hosts })
    }

    /// Hosts bundled for development mode.
    pub fn dev_fixture() -> Result<Self> {
        Self::from_jsonl_str(DEV_HOSTS)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

impl From<Vec<HostRecord>> for MemoryInventory {
    fn from(hosts: Vec<HostRecord>) -> Self {
        Self::new(hosts)
    }
}

impl HostInventory for MemoryInventory {
    fn hosts<'a>(&'a self, query: &'a HostQuery) -> Result<HostStream<'a>> {
        Ok(Box::new(
            self.hosts
                .iter()
                .filter(move |host| query.matches(host))
                .cloned()
                .map(Ok),
        ))
    }
}
