//! Package identifier (NEVRA) parsing.
//!
//! Installed packages arrive as `name-[epoch:]version-release.arch`:
//!
//! ```text
//! cairo-1.15.12-3.el8.x86_64
//! ansible-core-1:2.14.17-1.el9.x86_64
//! NetworkManager-1:1.46.0-26.el9_4.x86_64
//! basesystem-0:11-13.el9.noarch
//! ```

use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};
use thiserror::Error;

/// Errors for package strings that do not follow the NEVRA layout
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NevraError {
    #[error("Package '{0}' has no architecture separator")]
    MissingArch(String),

    #[error("Package '{0}' has no release separator")]
    MissingRelease(String),

    #[error("Package '{0}' has no name")]
    EmptyName(String),

    #[error("Package '{0}' has an epoch but no name separator")]
    MissingEpochSeparator(String),
}

/// Parsed package identifier.
///
/// `minor` and `z` are empty strings when the version has fewer components.
/// `z` holds everything after the second `.` of the version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nevra {
    pub name: String,
    pub epoch: String,
    pub major: String,
    pub minor: String,
    pub z: String,
    pub release: String,
    pub arch: String,
}

impl Nevra {
    /// Parse a package string.
    pub fn parse(package: &str) -> Result<Self, NevraError> {
        let (name, epoch, vra) = match package.split_once(':') {
            Some((name_epoch, vra)) => {
                let (name, epoch) = name_epoch
                    .rsplit_once('-')
                    .ok_or_else(|| NevraError::MissingEpochSeparator(package.to_string()))?;
                (name, epoch, vra)
            }
            // No epoch: name ends at the first '-'
            None => match package.split_once('-') {
                Some((name, vra)) => (name, "0", vra),
                None => (package, "0", ""),
            },
        };
        if name.is_empty() {
            return Err(NevraError::EmptyName(package.to_string()));
        }

        let arch_idx = vra
            .rfind('.')
            .ok_or_else(|| NevraError::MissingArch(package.to_string()))?;
        let arch = &vra[arch_idx + 1..];

        // Release runs from the last '-' before the arch
        let rel_idx = vra[..arch_idx]
            .rfind('-')
            .ok_or_else(|| NevraError::MissingRelease(package.to_string()))?;
        let release = &vra[rel_idx + 1..arch_idx];

        let version = &vra[..rel_idx];
        let (major, minor_z) = version.split_once('.').unwrap_or((version, ""));
        let (minor, z) = minor_z.split_once('.').unwrap_or((minor_z, ""));

        Ok(Self {
            name: name.to_string(),
            epoch: epoch.to_string(),
            major: major.to_string(),
            minor: minor.to_string(),
            z: z.to_string(),
            release: release.to_string(),
            arch: arch.to_string(),
        })
    }

    /// Parse through the process-wide memo table.
    ///
    /// Only successful parses are remembered.
    pub fn parse_cached(package: &str) -> Result<Self, NevraError> {
        static MEMO: LazyLock<Mutex<HashMap<String, Nevra>>> =
            LazyLock::new(|| Mutex::new(HashMap::new()));

        if let Ok(memo) = MEMO.lock() {
            if let Some(hit) = memo.get(package) {
                return Ok(hit.clone());
            }
        }

        let parsed = Self::parse(package)?;
        if let Ok(mut memo) = MEMO.lock() {
            memo.insert(package.to_string(), parsed.clone());
        }
        Ok(parsed)
    }
}
