//! RBAC service client.

use super::Permission;
use crate::config::AppConfig;
use crate::error::{Result, RoadmapError};
use std::time::Duration;

/// Header carrying the caller's identity assertion.
pub const IDENTITY_HEADER: &str = "x-rh-identity";

const ACCESS_PATH: &str = "/api/rbac/v1/access/?application=inventory&limit=1000";

/// Grant list for the caller.
///
/// Development mode grants everything. Without a configured RBAC URL the
/// caller gets a single empty grant, which resolves to unauthorized.
pub fn query_access(config: &AppConfig, identity: Option<&str>) -> Result<Vec<Permission>> {
    if config.dev {
        return Ok(vec![Permission::unrestricted("inventory:*:*")]);
    }

    let url = config.rbac_url();
    if url.is_empty() {
        tracing::debug!("No RBAC URL configured");
        return Ok(vec![Permission::default()]);
    }

    RbacClient::new(url, Duration::from_secs(config.rbac.timeout_secs)).access(identity)
}

/// Client for the RBAC access endpoint.
#[derive(Debug, Clone)]
pub struct RbacClient {
    base_url: String,
    timeout: Duration,
}

#[derive(serde::Deserialize)]
struct AccessPage {
    #[serde(default)]
    data: Vec<Permission>,
}

impl RbacClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }

    #[must_use]
    pub fn access_url(&self) -> String {
        format!("{}{ACCESS_PATH}", self.base_url.trim_end_matches('/'))
    }

    /// Fetch the inventory grants, forwarding the identity header.
    #[cfg(feature = "rbac")]
    pub fn access(&self, identity: Option<&str>) -> Result<Vec<Permission>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| network_error(&e))?;

        let url = self.access_url();
        tracing::debug!("Querying RBAC: {}", url);

        let mut request = client.get(&url).header("Accept", "application/json");
        if let Some(identity) = identity {
            request = request.header(IDENTITY_HEADER, identity);
        }

        let response = request.send().map_err(|e| network_error(&e))?;
        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .ok()
                .filter(|body| !body.trim().is_empty())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or_default().to_string());
            return Err(RoadmapError::upstream(status.as_u16(), detail));
        }

        let page: AccessPage = response
            .json()
            .map_err(|e| RoadmapError::upstream(status.as_u16(), format!("invalid RBAC response: {e}")))?;
        Ok(page.data)
    }

    #[cfg(not(feature = "rbac"))]
    pub fn access(&self, _identity: Option<&str>) -> Result<Vec<Permission>> {
        Err(RoadmapError::config(format!(
            "RBAC URL {} configured but the 'rbac' feature is disabled",
            self.base_url
        )))
    }
}

/// Transport failures surface as a bad gateway.
#[cfg(feature = "rbac")]
fn network_error(e: &reqwest::Error) -> RoadmapError {
    RoadmapError::upstream(502, format!("RBAC request failed: {e}"))
}
