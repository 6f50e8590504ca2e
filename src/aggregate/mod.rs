//! Single-pass relevance aggregation over a host feed.
//!
//! Aggregators keep host IDs per key and discard the rest of each record,
//! so memory grows with the number of distinct keys rather than hosts.
//! Accumulation is a set union, which makes feed order irrelevant and lets
//! partial aggregators built on separate threads be merged.

mod app_streams;
mod rhel;
mod stats;

pub use app_streams::{AppStreamAggregator, RHEL_OS_NAME};
pub use rhel::{RhelAggregator, RhelKey};
pub use stats::MissingStats;

use crate::error::{Result, RoadmapError};
use crate::model::HostRecord;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Consumer of host records.
pub trait HostAggregator {
    /// Account for one host. Hosts with missing data are counted, not
    /// rejected.
    fn observe(&mut self, host: &HostRecord);

    /// Fold another partial aggregation into this one.
    fn merge(&mut self, other: Self)
    where
        Self: Sized;

    fn stats(&self) -> &MissingStats;
}

/// Shared flag that stops an aggregation between hosts.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Feed every host into `aggregator`.
///
/// The first feed error ends the run. Cancellation is checked before each
/// host; a cancelled run returns [`RoadmapError::Cancelled`] and drops
/// everything accumulated so far.
pub fn run<A, I>(mut aggregator: A, hosts: I, cancel: &CancelFlag) -> Result<A>
where
    A: HostAggregator,
    I: IntoIterator<Item = Result<HostRecord>>,
{
    let mut seen = 0usize;
    for host in hosts {
        if cancel.is_cancelled() {
            tracing::debug!("Aggregation cancelled after {} hosts", seen);
            return Err(RoadmapError::Cancelled);
        }
        aggregator.observe(&host?);
        seen += 1;
    }
    tracing::debug!("Aggregated {} hosts", seen);
    Ok(aggregator)
}

/// Aggregate an in-memory batch across the rayon pool.
///
/// `make` builds an empty aggregator per chunk; the partial results are
/// merged.
pub fn run_batch<A, F>(hosts: &[HostRecord], chunk_size: usize, make: F) -> A
where
    A: HostAggregator + Send,
    F: Fn() -> A + Sync + Send,
{
    hosts
        .par_chunks(chunk_size.max(1))
        .map(|chunk| {
            let mut aggregator = make();
            for host in chunk {
                aggregator.observe(host);
            }
            aggregator
        })
        .reduce(&make, |mut left, right| {
            left.merge(right);
            left
        })
}
