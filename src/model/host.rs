//! Host records as delivered by the inventory feed.
//!
//! Every field below the host ID is optional on the wire: hosts with partial
//! profiles are valid input and are skipped (and counted) by the aggregators.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of the host inventory feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    pub id: Uuid,
    #[serde(default)]
    pub org_id: String,
    #[serde(default, alias = "system_profile")]
    pub system_profile_facts: Option<SystemProfile>,
}

impl HostRecord {
    /// Groups the host belongs to; empty when the profile is absent.
    #[must_use]
    pub fn groups(&self) -> &[HostGroup] {
        self.system_profile_facts
            .as_ref()
            .map_or(&[], |profile| profile.groups.as_slice())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemProfile {
    #[serde(default)]
    pub operating_system: Option<OperatingSystem>,
    #[serde(default)]
    pub dnf_modules: Vec<DnfModule>,
    #[serde(default)]
    pub installed_packages: Vec<String>,
    #[serde(default)]
    pub installed_products: Vec<InstalledProduct>,
    #[serde(default)]
    pub groups: Vec<HostGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingSystem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub major: Option<u32>,
    #[serde(default)]
    pub minor: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnfModule {
    pub name: String,
    pub stream: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledProduct {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostGroup {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub ungrouped: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_profile_deserializes() {
        let json = r#"{
            "id": "f0f0e6a4-4b0a-4d3c-9a2a-6c2f44f5a001",
            "org_id": "1234",
            "system_profile_facts": {
                "operating_system": {"name": "RHEL", "major": 9}
            }
        }"#;
        let host: HostRecord = serde_json::from_str(json).unwrap();
        let profile = host.system_profile_facts.unwrap();
        let os = profile.operating_system.unwrap();
        assert_eq!(os.major, Some(9));
        assert_eq!(os.minor, None);
        assert!(profile.dnf_modules.is_empty());
        assert!(profile.groups.is_empty());
    }

    #[test]
    fn test_missing_profile() {
        let json = r#"{"id": "f0f0e6a4-4b0a-4d3c-9a2a-6c2f44f5a002"}"#;
        let host: HostRecord = serde_json::from_str(json).unwrap();
        assert!(host.system_profile_facts.is_none());
        assert!(host.groups().is_empty());
    }
}
