//! Per-request counters of hosts and records skipped for missing data.

use serde::{Deserialize, Serialize};

/// Counts of skipped or degraded inputs, by reason.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingStats {
    /// Hosts without a system profile
    pub system_profile: usize,
    /// Hosts whose OS is missing or not RHEL
    pub os: usize,
    /// Hosts whose profile has no OS name
    pub os_profile: usize,
    /// Hosts without an OS major version
    pub os_version: usize,
    /// Hosts reporting no installed modules
    pub dnf_modules: usize,
    /// Installed modules the catalog does not track
    pub untracked_module: usize,
    /// Installed package strings that are not valid NEVRAs
    pub malformed_package: usize,
    /// Observations without RHEL lifecycle data
    pub rhel_lifecycle: usize,
}

impl MissingStats {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.system_profile
            + self.os
            + self.os_profile
            + self.os_version
            + self.dnf_modules
            + self.untracked_module
            + self.malformed_package
            + self.rhel_lifecycle
    }

    pub fn merge(&mut self, other: &Self) {
        self.system_profile += other.system_profile;
        self.os += other.os;
        self.os_profile += other.os_profile;
        self.os_version += other.os_version;
        self.dnf_modules += other.dnf_modules;
        self.untracked_module += other.untracked_module;
        self.malformed_package += other.malformed_package;
        self.rhel_lifecycle += other.rhel_lifecycle;
    }

    /// Log the counters for one aggregation.
    pub fn log_summary(&self, aggregation: &str) {
        if self.total() == 0 {
            return;
        }
        tracing::info!(
            aggregation,
            system_profile = self.system_profile,
            os = self.os,
            os_profile = self.os_profile,
            os_version = self.os_version,
            dnf_modules = self.dnf_modules,
            untracked_module = self.untracked_module,
            malformed_package = self.malformed_package,
            rhel_lifecycle = self.rhel_lifecycle,
            "Missing data"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_and_total() {
        let mut stats = MissingStats {
            os: 1,
            malformed_package: 2,
            ..Default::default()
        };
        stats.merge(&MissingStats {
            os: 3,
            rhel_lifecycle: 1,
            ..Default::default()
        });
        assert_eq!(stats.os, 4);
        assert_eq!(stats.total(), 7);
    }
}
