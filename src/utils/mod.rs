//! Shared utilities.

mod version;

pub use version::{compare_streams, stream_tuple, streams_lt};
