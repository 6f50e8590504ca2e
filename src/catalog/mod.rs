//! Catalog store: RHEL and app stream lifecycle tables.
//!
//! The catalog is built once and then shared read-only. Lookups on the
//! matching hot path go through prebuilt indexes:
//!
//! - (name, OS major, stream) to module entry
//! - name to package entries
//! - module name to the OS majors that ship it
//! - display name to entries
//!
//! ```ignore
//! let catalog = Catalog::builtin()?;
//! let nginx = catalog.module("nginx", 9, "1.24");
//! ```

mod browse;
mod rhel;

pub use browse::{AppStreamFilter, NameKind};
pub use rhel::builtin_rhel_lifecycles;

use crate::config::CatalogConfig;
use crate::error::{CatalogErrorKind, ErrorContext, Result, RoadmapError};
use crate::model::{rhel_key, AppStreamKind, CatalogAppStream, CatalogRhelLifecycle, LifecycleDate};
use serde::de::DeserializeOwned;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Bundled app stream catalog.
const BUNDLED_APP_STREAMS: &str = include_str!("../../data/app_streams.yaml");

type ModuleKey = (String, u32, String);

/// Indexed, immutable lifecycle catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    rhel: Vec<CatalogRhelLifecycle>,
    rhel_by_key: HashMap<String, usize>,
    app_streams: Vec<CatalogAppStream>,
    modules_by_key: HashMap<ModuleKey, usize>,
    packages_by_name: HashMap<String, Vec<usize>>,
    module_majors: HashMap<String, BTreeSet<u32>>,
    by_display_name: HashMap<String, Vec<usize>>,
}

impl Catalog {
    /// Built-in RHEL table plus the bundled app stream catalog.
    pub fn builtin() -> Result<Self> {
        let rhel = builtin_rhel_lifecycles()?;
        let app_streams = parse_app_streams_yaml(BUNDLED_APP_STREAMS)
            .context("bundled app stream catalog")?;
        Self::from_parts(rhel, app_streams)
    }

    /// Build from configuration, falling back to bundled data for any
    /// table without an override file.
    pub fn load(config: &CatalogConfig) -> Result<Self> {
        let rhel = match &config.rhel_file {
            Some(path) => read_list(path)?,
            None => builtin_rhel_lifecycles()?,
        };
        let app_streams = match &config.app_streams_file {
            Some(path) => read_list(path)?,
            None => parse_app_streams_yaml(BUNDLED_APP_STREAMS)
                .context("bundled app stream catalog")?,
        };
        Self::from_parts(rhel, app_streams)
    }

    /// Built-in RHEL table plus app streams from a YAML document.
    pub fn from_yaml_str(app_streams_yaml: &str) -> Result<Self> {
        let rhel = builtin_rhel_lifecycles()?;
        Self::from_parts(rhel, parse_app_streams_yaml(app_streams_yaml)?)
    }

    /// Normalize entries and build every index.
    pub fn from_parts(
        rhel: Vec<CatalogRhelLifecycle>,
        app_streams: Vec<CatalogAppStream>,
    ) -> Result<Self> {
        let mut rhel_by_key = HashMap::with_capacity(rhel.len());
        for (idx, entry) in rhel.iter().enumerate() {
            if rhel_by_key.insert(entry.key(), idx).is_some() {
                return Err(RoadmapError::catalog(
                    "RHEL lifecycle table",
                    CatalogErrorKind::DuplicateKey(entry.key()),
                ));
            }
        }

        let mut catalog = Self {
            rhel,
            rhel_by_key,
            app_streams: Vec::with_capacity(app_streams.len()),
            modules_by_key: HashMap::new(),
            packages_by_name: HashMap::new(),
            module_majors: HashMap::new(),
            by_display_name: HashMap::new(),
        };

        for entry in app_streams {
            let entry = catalog.normalize(entry)?;
            catalog.index(entry)?;
        }

        tracing::debug!(
            rhel = catalog.rhel.len(),
            app_streams = catalog.app_streams.len(),
            "Catalog indexed"
        );
        Ok(catalog)
    }

    /// Fill OS version and start date from `initial_product_version`.
    fn normalize(&self, mut entry: CatalogAppStream) -> Result<CatalogAppStream> {
        if let Some(version) = entry.initial_product_version.clone() {
            let (major, minor) = parse_product_version(&version).ok_or_else(|| {
                RoadmapError::catalog(
                    format!("app stream '{}'", entry.name),
                    CatalogErrorKind::InvalidProductVersion(version.clone()),
                )
            })?;
            entry.os_major = Some(major);
            entry.os_minor = minor;
            if !entry.start_date.is_known() {
                entry.start_date = self
                    .rhel_release(major, minor)
                    .map_or(LifecycleDate::Unknown, |rhel| rhel.start_date);
            }
        }

        if entry.os_major.is_none() {
            return Err(RoadmapError::catalog(
                "app stream catalog",
                CatalogErrorKind::MissingOsMajor { name: entry.name },
            ));
        }
        if entry.display_name.is_empty() {
            entry.display_name.clone_from(&entry.name);
        }
        Ok(entry)
    }

    fn index(&mut self, entry: CatalogAppStream) -> Result<()> {
        let idx = self.app_streams.len();
        let major = entry.major();

        match entry.kind {
            AppStreamKind::Module => {
                let key = (entry.name.clone(), major, entry.stream.clone());
                if self.modules_by_key.insert(key, idx).is_some() {
                    return Err(RoadmapError::catalog(
                        "app stream catalog",
                        CatalogErrorKind::DuplicateKey(format!(
                            "{} {} {}",
                            entry.name, major, entry.stream
                        )),
                    ));
                }
                self.module_majors
                    .entry(entry.name.clone())
                    .or_default()
                    .insert(major);
            }
            AppStreamKind::Package | AppStreamKind::Scl => {
                self.packages_by_name
                    .entry(entry.name.clone())
                    .or_default()
                    .push(idx);
            }
        }

        self.by_display_name
            .entry(entry.display_name.clone())
            .or_default()
            .push(idx);

        self.app_streams.push(entry);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------------

    /// All RHEL lifecycle rows in table order.
    #[must_use]
    pub fn rhel_lifecycles(&self) -> &[CatalogRhelLifecycle] {
        &self.rhel
    }

    /// RHEL row by catalog key ("9" or "9.2").
    #[must_use]
    pub fn rhel(&self, key: &str) -> Option<&CatalogRhelLifecycle> {
        self.rhel_by_key.get(key).map(|&idx| &self.rhel[idx])
    }

    /// RHEL row for a version; `None` minor selects the whole-major row.
    #[must_use]
    pub fn rhel_release(&self, major: u32, minor: Option<u32>) -> Option<&CatalogRhelLifecycle> {
        self.rhel(&rhel_key(major, minor))
    }

    /// All app stream entries in catalog order.
    #[must_use]
    pub fn app_streams(&self) -> &[CatalogAppStream] {
        &self.app_streams
    }

    /// Module entry by exact key.
    #[must_use]
    pub fn module(&self, name: &str, os_major: u32, stream: &str) -> Option<&CatalogAppStream> {
        self.modules_by_key
            .get(&(name.to_string(), os_major, stream.to_string()))
            .map(|&idx| &self.app_streams[idx])
    }

    /// Whether any stream of the module ships for an OS major.
    #[must_use]
    pub fn tracks_module(&self, name: &str, os_major: u32) -> bool {
        self.module_majors
            .get(name)
            .is_some_and(|majors| majors.contains(&os_major))
    }

    /// Package and SCL entries with the given name.
    pub fn packages(&self, name: &str) -> impl Iterator<Item = &CatalogAppStream> + '_ {
        self.packages_by_name
            .get(name)
            .into_iter()
            .flatten()
            .map(|&idx| &self.app_streams[idx])
    }

    /// Entries sharing a display name.
    pub fn by_display_name(&self, display_name: &str) -> impl Iterator<Item = &CatalogAppStream> + '_ {
        self.by_display_name
            .get(display_name)
            .into_iter()
            .flatten()
            .map(|&idx| &self.app_streams[idx])
    }
}

/// Split "9.2" into `(9, Some(2))` and "9" into `(9, None)`.
#[must_use]
pub fn parse_product_version(version: &str) -> Option<(u32, Option<u32>)> {
    let mut parts = version.trim().split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = match parts.next() {
        Some(minor) => Some(minor.parse().ok()?),
        None => None,
    };
    if parts.next().is_some() {
        return None;
    }
    Some((major, minor))
}

fn parse_app_streams_yaml(content: &str) -> Result<Vec<CatalogAppStream>> {
    Ok(serde_yaml::from_str(content)?)
}

/// Read a YAML or JSON list, chosen by file extension.
fn read_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = std::fs::read_to_string(path).map_err(|e| RoadmapError::io(path, e))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let parsed = if is_json {
        serde_json::from_str(&content).map_err(RoadmapError::from)
    } else {
        serde_yaml::from_str(&content).map_err(RoadmapError::from)
    };
    parsed.with_context(|| format!("loading {}", path.display()))
}
