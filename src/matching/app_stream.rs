//! Resolve installed modules and packages to catalog app streams.

use crate::catalog::Catalog;
use crate::model::{CatalogAppStream, DnfModule};
use crate::parsers::{Nevra, NevraError};
use std::collections::HashMap;

/// Outcome of resolving one installed module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleMatch<'c> {
    /// Exact catalog entry
    Catalog(&'c CatalogAppStream),
    /// Tracked module with a stream the catalog does not list
    Placeholder(CatalogAppStream),
    /// Perl modules are not resolved
    SkippedPerl,
    /// The catalog does not track this module name for the OS major
    Untracked,
}

impl ModuleMatch<'_> {
    /// The resolved entry, if any.
    #[must_use]
    pub fn entry(&self) -> Option<&CatalogAppStream> {
        match self {
            Self::Catalog(entry) => Some(*entry),
            Self::Placeholder(entry) => Some(entry),
            Self::SkippedPerl | Self::Untracked => None,
        }
    }
}

/// Outcome of resolving one installed package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageMatch<'c> {
    Catalog(&'c CatalogAppStream),
    /// Not an app stream package, or no stream matches its version
    NoMatch,
    /// The package string is not a valid NEVRA
    Malformed(NevraError),
}

/// Resolves host modules and packages against a catalog.
///
/// Results are cached per matcher, so one matcher should live for one
/// aggregation request.
#[derive(Debug)]
pub struct AppStreamMatcher<'c> {
    catalog: &'c Catalog,
    modules: HashMap<(String, u32, String), ModuleMatch<'c>>,
    packages: HashMap<(String, u32), PackageMatch<'c>>,
}

impl<'c> AppStreamMatcher<'c> {
    #[must_use]
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            modules: HashMap::new(),
            packages: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Resolve an installed module on a host of the given OS major.
    pub fn resolve_module(&mut self, module: &DnfModule, os_major: u32) -> ModuleMatch<'c> {
        let cache_key = (module.name.clone(), os_major, module.stream.clone());
        if let Some(hit) = self.modules.get(&cache_key) {
            return hit.clone();
        }

        let resolved = match_module(self.catalog, module, os_major);
        self.modules.insert(cache_key, resolved.clone());
        resolved
    }

    /// Resolve an installed package string on a host of the given OS major.
    pub fn resolve_package(&mut self, package: &str, os_major: u32) -> PackageMatch<'c> {
        let cache_key = (package.to_string(), os_major);
        if let Some(hit) = self.packages.get(&cache_key) {
            return hit.clone();
        }

        let resolved = match Nevra::parse_cached(package) {
            Ok(nevra) => match_package(self.catalog, &nevra, os_major)
                .map_or(PackageMatch::NoMatch, PackageMatch::Catalog),
            Err(err) => PackageMatch::Malformed(err),
        };
        self.packages.insert(cache_key, resolved.clone());
        resolved
    }
}

/// Exact module lookup with a placeholder for unknown streams.
pub fn match_module<'c>(catalog: &'c Catalog, module: &DnfModule, os_major: u32) -> ModuleMatch<'c> {
    if module.name.to_lowercase().contains("perl") {
        return ModuleMatch::SkippedPerl;
    }
    if !catalog.tracks_module(&module.name, os_major) {
        return ModuleMatch::Untracked;
    }

    match catalog.module(&module.name, os_major, &module.stream) {
        Some(entry) => ModuleMatch::Catalog(entry),
        None => {
            tracing::debug!(
                "Did not find matching app stream module {}, {}, {}",
                module.name,
                os_major,
                module.stream
            );
            ModuleMatch::Placeholder(CatalogAppStream::placeholder(
                &module.name,
                &module.stream,
                os_major,
            ))
        }
    }
}

/// Find the package entry whose stream matches the package version.
///
/// The stream's leading component must equal the package major, and its
/// second component, when present, the package minor. Package versions do
/// not always track stream versions, so this can report a wrong stream.
pub fn match_package<'c>(catalog: &'c Catalog, nevra: &Nevra, os_major: u32) -> Option<&'c CatalogAppStream> {
    catalog
        .packages(&nevra.name)
        .filter(|entry| entry.os_major == Some(os_major))
        .find(|entry| stream_matches_version(&entry.stream, nevra))
}

fn stream_matches_version(stream: &str, nevra: &Nevra) -> bool {
    let mut parts = stream.split('.');
    let major_matches = parts.next() == Some(nevra.major.as_str());
    let minor_matches = parts.next().map_or(true, |minor| minor == nevra.minor);
    major_matches && minor_matches
}
