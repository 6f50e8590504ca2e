//! Related streams and releases: newer catalog entries a tenant could move to.

use crate::catalog::Catalog;
use crate::model::{rhel_key, AppStreamKey, CatalogAppStream, CatalogRhelLifecycle};
use crate::utils::streams_lt;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashSet};

/// Whether catalog entry `candidate` is ahead of the observed `seed`.
///
/// When both start dates are known and differ, the later start wins.
/// Otherwise the candidate must have a higher stream and an end date after
/// `today`; a candidate ending today is excluded.
#[must_use]
pub fn is_ahead_of(candidate: &CatalogAppStream, seed: &AppStreamKey, today: NaiveDate) -> bool {
    match (candidate.start_date.as_date(), seed.start_date.as_date()) {
        (Some(candidate_start), Some(seed_start)) if candidate_start != seed_start => {
            candidate_start > seed_start
        }
        _ => {
            streams_lt(&seed.stream, &candidate.stream)
                && candidate.end_date.as_date().map_or(true, |end| end > today)
        }
    }
}

/// Catalog streams related to the observed ones and not observed themselves.
///
/// Rolling streams are neither seeds nor candidates. The result is sorted
/// and free of duplicates.
pub fn related_app_streams<'a, I>(catalog: &Catalog, observed: I, today: NaiveDate) -> Vec<AppStreamKey>
where
    I: IntoIterator<Item = &'a AppStreamKey>,
{
    let observed: Vec<&AppStreamKey> = observed.into_iter().collect();
    let seen: HashSet<_> = observed.iter().map(|key| key.catalog_identity()).collect();

    let mut related = BTreeSet::new();
    for seed in observed.iter().filter(|key| !key.rolling) {
        for candidate in catalog.by_display_name(&seed.display_name) {
            if candidate.rolling || !is_ahead_of(candidate, seed, today) {
                continue;
            }
            let key = AppStreamKey::from_entry(candidate);
            if !seen.contains(&key.catalog_identity()) {
                related.insert(key);
            }
        }
    }

    related.into_iter().collect()
}

/// Later minor releases of each observed major that are still supported
/// and not observed themselves.
///
/// An observed whole-major version counts as minor -1, so every minor of
/// that major qualifies.
pub fn related_rhel_releases<'c, I>(
    catalog: &'c Catalog,
    observed: I,
    today: NaiveDate,
) -> Vec<&'c CatalogRhelLifecycle>
where
    I: IntoIterator<Item = (u32, Option<u32>)>,
{
    let observed: Vec<(u32, Option<u32>)> = observed.into_iter().collect();
    let seen: HashSet<String> = observed
        .iter()
        .map(|&(major, minor)| rhel_key(major, minor))
        .collect();

    let mut related: Vec<&CatalogRhelLifecycle> = Vec::new();
    for &(major, minor) in &observed {
        let floor = minor.map_or(-1, i64::from);
        for release in catalog.rhel_lifecycles() {
            let Some(release_minor) = release.minor else {
                continue;
            };
            let ahead = release.major == major && i64::from(release_minor) > floor;
            let supported = release.end_date.as_date().is_some_and(|end| end > today);
            if ahead
                && supported
                && !seen.contains(&release.key())
                && !related.iter().any(|r| r.key() == release.key())
            {
                related.push(release);
            }
        }
    }

    related
}
