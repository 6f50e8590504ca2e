//! Result rows returned by the relevance operations.
//!
//! Rows are validated once, at construction: a row whose count disagrees
//! with its host list, or a related row that carries hosts, is rejected.

use super::lifecycle::{LifecycleDate, LifecycleType, SupportStatus};
use crate::error::{Result, RoadmapError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Summary attached to every list response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Number of rows
    pub count: usize,
    /// Sum of host counts over all rows
    pub total: usize,
}

/// A list of rows plus its summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevanceReport<T> {
    pub meta: Meta,
    pub data: Vec<T>,
}

/// Anything that contributes hosts to a report total.
pub trait HostCounted {
    fn host_count(&self) -> usize;
}

impl<T: HostCounted> RelevanceReport<T> {
    #[must_use]
    pub fn from_rows(data: Vec<T>) -> Self {
        let meta = Meta {
            count: data.len(),
            total: data.iter().map(HostCounted::host_count).sum(),
        };
        Self { meta, data }
    }
}

/// RHEL version in use, with its support window for the host's program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevantSystem {
    pub name: String,
    pub major: u32,
    pub minor: Option<u32>,
    pub lifecycle_type: LifecycleType,
    pub start_date: LifecycleDate,
    pub end_date: LifecycleDate,
    pub support_status: SupportStatus,
    pub count: usize,
    pub related: bool,
    pub systems: Vec<Uuid>,
}

impl RelevantSystem {
    /// Check the row invariants.
    pub fn validated(self) -> Result<Self> {
        if self.name.is_empty() {
            return Err(RoadmapError::InvalidRow(format!(
                "RHEL {} row has no name",
                self.major
            )));
        }
        check_counts(self.count, &self.systems, self.related)?;
        Ok(self)
    }
}

impl HostCounted for RelevantSystem {
    fn host_count(&self) -> usize {
        self.count
    }
}

/// App stream in use (or related to one in use), with its support status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevantAppStream {
    pub name: String,
    pub application_stream_name: String,
    pub display_name: String,
    pub os_major: u32,
    pub os_minor: Option<u32>,
    pub start_date: LifecycleDate,
    pub end_date: LifecycleDate,
    pub support_status: SupportStatus,
    pub count: usize,
    pub rolling: bool,
    pub related: bool,
    pub systems: Vec<Uuid>,
}

impl RelevantAppStream {
    /// Check the row invariants.
    pub fn validated(self) -> Result<Self> {
        if self.name.is_empty() {
            return Err(RoadmapError::InvalidRow(format!(
                "app stream '{}' row has no name",
                self.application_stream_name
            )));
        }
        if self.related && self.rolling {
            return Err(RoadmapError::InvalidRow(format!(
                "rolling app stream '{}' cannot be reported as related",
                self.name
            )));
        }
        check_counts(self.count, &self.systems, self.related)?;
        Ok(self)
    }
}

impl HostCounted for RelevantAppStream {
    fn host_count(&self) -> usize {
        self.count
    }
}

fn check_counts(count: usize, systems: &[Uuid], related: bool) -> Result<()> {
    if count != systems.len() {
        return Err(RoadmapError::InvalidRow(format!(
            "count {count} does not match {} systems",
            systems.len()
        )));
    }
    if related && count != 0 {
        return Err(RoadmapError::InvalidRow(format!(
            "related row has {count} systems"
        )));
    }
    if systems.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(RoadmapError::InvalidRow(
            "systems must be sorted and unique".to_string(),
        ));
    }
    Ok(())
}
