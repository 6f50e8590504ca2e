//! Host access from RBAC grants.
//!
//! A caller's grants resolve to either unrestricted access or an explicit set
//! of host group IDs. The group set may include the ungrouped sentinel (a
//! `null` value upstream), which admits hosts that belong to no group.

mod client;

pub use client::{query_access, RbacClient, IDENTITY_HEADER};

use crate::error::{Result, RoadmapError};
use crate::model::HostGroup;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use uuid::Uuid;

/// Permissions that allow reading hosts.
pub const INVENTORY_READ_PERMISSIONS: &[&str] = &[
    "inventory:*:*",
    "inventory:hosts:*",
    "inventory:*:read",
    "inventory:hosts:read",
];

/// Attribute key the resource filters must restrict on.
pub const GROUP_ID_KEY: &str = "group.id";

/// One grant as returned by the RBAC service.
///
/// Every field is optional on the wire; an empty object is a grant of
/// nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
    #[serde(
        default,
        rename = "resourceDefinitions",
        skip_serializing_if = "Option::is_none"
    )]
    pub resource_definitions: Option<Vec<ResourceDefinition>>,
}

impl Permission {
    /// Grant of the given permission without resource restrictions.
    #[must_use]
    pub fn unrestricted(permission: &str) -> Self {
        Self {
            permission: Some(permission.to_string()),
            resource_definitions: Some(Vec::new()),
        }
    }

    fn reads_inventory(&self) -> bool {
        self.permission
            .as_deref()
            .is_some_and(|permission| INVENTORY_READ_PERMISSIONS.contains(&permission))
    }

    fn definitions(&self) -> &[ResourceDefinition] {
        self.resource_definitions.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    #[serde(default, rename = "attributeFilter", skip_serializing_if = "Option::is_none")]
    pub attribute_filter: Option<AttributeFilter>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeFilter {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub operation: Option<String>,
    #[serde(default)]
    pub value: Value,
}

/// Host groups a restricted caller may read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedGroups {
    pub ids: BTreeSet<Uuid>,
    /// Hosts without a group are readable
    pub ungrouped: bool,
}

impl AllowedGroups {
    fn extend(&mut self, other: Self) {
        self.ids.extend(other.ids);
        self.ungrouped |= other.ungrouped;
    }

    /// Whether a host with these groups is readable.
    ///
    /// A host with no groups counts as ungrouped.
    #[must_use]
    pub fn admits(&self, groups: &[HostGroup]) -> bool {
        if groups.is_empty() {
            return self.ungrouped;
        }
        groups.iter().any(|group| {
            (self.ungrouped && group.ungrouped)
                || group
                    .id
                    .as_deref()
                    .and_then(|id| Uuid::parse_str(id).ok())
                    .is_some_and(|id| self.ids.contains(&id))
        })
    }
}

/// Resolved host access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostAccess {
    Unrestricted,
    Restricted(AllowedGroups),
}

impl HostAccess {
    /// Whether a host with these groups is readable.
    #[must_use]
    pub fn permits(&self, groups: &[HostGroup]) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Restricted(allowed) => allowed.admits(groups),
        }
    }
}

/// Resolve grants into host access.
///
/// Grants are kept only if their permission reads the inventory. No such
/// grant is unauthorized. Any kept grant without resource definitions
/// makes access unrestricted, whatever the other grants say. Otherwise the
/// group sets of every resource definition are unioned.
pub fn resolve_access(permissions: &[Permission]) -> Result<HostAccess> {
    let grants: Vec<&Permission> = permissions.iter().filter(|p| p.reads_inventory()).collect();
    if grants.is_empty() {
        return Err(RoadmapError::unauthorized());
    }

    if grants.iter().any(|grant| grant.definitions().is_empty()) {
        return Ok(HostAccess::Unrestricted);
    }

    let mut allowed = AllowedGroups::default();
    for definition in grants.iter().flat_map(|grant| grant.definitions()) {
        allowed.extend(groups_from_resource_definition(definition)?);
    }
    Ok(HostAccess::Restricted(allowed))
}

/// Group set of one resource definition.
///
/// Accepts `group.id` filters with `in` (list value) or `equal` (string or
/// null value). Every value must be `null` or a UUID.
pub fn groups_from_resource_definition(definition: &ResourceDefinition) -> Result<AllowedGroups> {
    let filter = definition
        .attribute_filter
        .as_ref()
        .ok_or_else(|| RoadmapError::invalid_resource_definition("missing attributeFilter"))?;

    let key = filter.key.as_deref().unwrap_or_default();
    if key != GROUP_ID_KEY {
        return Err(RoadmapError::invalid_resource_definition(format!(
            "unsupported attribute filter key '{key}'"
        )));
    }

    let values: Vec<&Value> = match (filter.operation.as_deref(), &filter.value) {
        (Some("in"), Value::Array(values)) => values.iter().collect(),
        (Some("in"), other) => {
            return Err(RoadmapError::invalid_resource_definition(format!(
                "operation 'in' expects a list, got {other}"
            )))
        }
        (Some("equal"), value @ (Value::String(_) | Value::Null)) => vec![value],
        (Some("equal"), other) => {
            return Err(RoadmapError::invalid_resource_definition(format!(
                "operation 'equal' expects a string, got {other}"
            )))
        }
        (operation, _) => {
            return Err(RoadmapError::invalid_resource_definition(format!(
                "unsupported attribute filter operation '{}'",
                operation.unwrap_or_default()
            )))
        }
    };

    let mut allowed = AllowedGroups::default();
    for value in values {
        match value {
            Value::Null => allowed.ungrouped = true,
            Value::String(id) => {
                let id = Uuid::parse_str(id).map_err(|_| {
                    RoadmapError::access(
                        "invalid upstream authorization data",
                        crate::error::AccessErrorKind::InvalidGroupId(id.clone()),
                    )
                })?;
                allowed.ids.insert(id);
            }
            other => {
                return Err(RoadmapError::invalid_resource_definition(format!(
                    "group ID must be a string or null, got {other}"
                )))
            }
        }
    }
    Ok(allowed)
}
