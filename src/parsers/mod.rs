//! Parsers for identifiers found in host profiles.

mod nevra;

pub use nevra::{Nevra, NevraError};
