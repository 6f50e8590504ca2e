//! Host inventory readers.
//!
//! A reader yields the hosts of one organization that the caller may see,
//! optionally narrowed to one OS version. Hosts are produced lazily so the
//! aggregators never hold the whole feed.

mod jsonl;
mod memory;

pub use jsonl::JsonlInventory;
pub use memory::MemoryInventory;

use crate::access::HostAccess;
use crate::config::AppConfig;
use crate::error::{Result, RoadmapError};
use crate::model::HostRecord;

/// Lazy sequence of host records.
pub type HostStream<'a> = Box<dyn Iterator<Item = Result<HostRecord>> + 'a>;

/// Source of host records.
pub trait HostInventory {
    /// Hosts matching `query`, in feed order.
    fn hosts<'a>(&'a self, query: &'a HostQuery) -> Result<HostStream<'a>>;
}

/// Which hosts a reader yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostQuery {
    /// Only hosts of this organization, when set
    pub org_id: Option<String>,
    pub access: HostAccess,
    /// Only hosts with this OS major, when set
    pub major: Option<u32>,
    /// Only hosts with this OS minor; ignored without `major`
    pub minor: Option<u32>,
}

impl HostQuery {
    #[must_use]
    pub const fn new(access: HostAccess) -> Self {
        Self {
            org_id: None,
            access,
            major: None,
            minor: None,
        }
    }

    #[must_use]
    pub fn org_id(mut self, org_id: impl Into<String>) -> Self {
        self.org_id = Some(org_id.into());
        self
    }

    #[must_use]
    pub const fn os_version(mut self, major: Option<u32>, minor: Option<u32>) -> Self {
        self.major = major;
        self.minor = minor;
        self
    }

    /// Whether a host passes every filter of this query.
    #[must_use]
    pub fn matches(&self, host: &HostRecord) -> bool {
        if self.org_id.as_ref().is_some_and(|org| *org != host.org_id) {
            return false;
        }
        if !self.access.permits(host.groups()) {
            return false;
        }

        let Some(major) = self.major else {
            return true;
        };
        let os = host
            .system_profile_facts
            .as_ref()
            .and_then(|profile| profile.operating_system.as_ref());
        match os {
            Some(os) => os.major == Some(major) && self.minor.map_or(true, |minor| os.minor == Some(minor)),
            None => false,
        }
    }
}

/// Open the inventory configured for this process.
///
/// Development mode serves the bundled fixture hosts.
pub fn open_inventory(config: &AppConfig) -> Result<Box<dyn HostInventory>> {
    if config.dev {
        tracing::debug!("Serving development fixture hosts");
        return Ok(Box::new(MemoryInventory::dev_fixture()?));
    }
    match &config.inventory.hosts_file {
        Some(path) => Ok(Box::new(JsonlInventory::new(path))),
        None => Err(RoadmapError::config(
            "no host feed configured (set inventory.hosts_file or ROADMAP_HOSTS_FILE)",
        )),
    }
}
