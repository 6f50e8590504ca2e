//! Stream ordering.

use std::cmp::Ordering;

/// Normalize a stream to `(major, minor, micro)`.
///
/// `"rhel8"` maps to `(8, 0, 0)`; other streams are split on `.` with
/// missing trailing components set to zero. Returns `None` when any
/// component is not numeric.
#[must_use]
pub fn stream_tuple(stream: &str) -> Option<(u64, u64, u64)> {
    if stream == "rhel8" {
        return Some((8, 0, 0));
    }
    let mut parts = [0u64; 3];
    for (slot, part) in parts.iter_mut().zip(stream.split('.')) {
        *slot = part.parse().ok()?;
    }
    // A fourth component is ignored but must still be numeric.
    if stream.split('.').skip(3).any(|part| part.parse::<u64>().is_err()) {
        return None;
    }
    Some((parts[0], parts[1], parts[2]))
}

/// Compare two streams
pub fn compare_streams(a: &str, b: &str) -> Ordering {
    if let (Some(tuple_a), Some(tuple_b)) = (stream_tuple(a), stream_tuple(b)) {
        return tuple_a.cmp(&tuple_b);
    }

    // Fall back to string comparison
    a.cmp(b)
}

/// `true` when stream `a` sorts strictly before stream `b`.
#[must_use]
pub fn streams_lt(a: &str, b: &str) -> bool {
    compare_streams(a, b) == Ordering::Less
}
