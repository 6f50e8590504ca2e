//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler writes pretty JSON and returns the desired exit code.

mod catalog;
mod relevant;
mod upcoming;

pub use catalog::{run_app_streams, run_rhel, AppStreamsCommand, RhelCommand};
pub use relevant::{run_relevant_app_streams, run_relevant_rhel, RelevantCommand};
pub use upcoming::{run_upcoming, UpcomingCommand};

use crate::error::{ErrorClass, RoadmapError};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

/// Process exit codes.
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// The request or its upstream data cannot be served
    pub const BAD_REQUEST: i32 = 1;
    /// No usable inventory grant
    pub const UNAUTHORIZED: i32 = 2;
    /// An error occurred
    pub const ERROR: i32 = 3;
    /// An upstream service failed
    pub const UPSTREAM: i32 = 4;
}

/// Exit code for a failed command.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<RoadmapError>().map(RoadmapError::class) {
        Some(ErrorClass::Unauthorized) => exit_codes::UNAUTHORIZED,
        Some(ErrorClass::BadRequest) => exit_codes::BAD_REQUEST,
        Some(ErrorClass::Upstream) => exit_codes::UPSTREAM,
        Some(ErrorClass::Internal) | None => exit_codes::ERROR,
    }
}

/// Target for output - either stdout or a file
#[derive(Debug, Clone)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }
}

/// Listing wrapper for catalog output.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Serialize `value` as pretty JSON to the target.
pub fn write_json<T: Serialize>(value: &T, target: &OutputTarget, quiet: bool) -> Result<()> {
    let content = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    match target {
        OutputTarget::Stdout => {
            println!("{content}");
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            if !quiet {
                tracing::info!("Output written to {}", path.display());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_by_class() {
        let unauthorized = anyhow::Error::new(RoadmapError::unauthorized());
        assert_eq!(exit_code_for(&unauthorized), exit_codes::UNAUTHORIZED);

        let upstream = anyhow::Error::new(RoadmapError::upstream(500, "boom"));
        assert_eq!(exit_code_for(&upstream), exit_codes::UPSTREAM);

        let row = anyhow::Error::new(RoadmapError::InvalidRow("bad".to_string()));
        assert_eq!(exit_code_for(&row), exit_codes::BAD_REQUEST);

        assert_eq!(exit_code_for(&anyhow::anyhow!("other")), exit_codes::ERROR);
    }

    #[test]
    fn test_write_json_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let target = OutputTarget::from_option(Some(path.clone()));
        write_json(&DataResponse { data: vec![1, 2] }, &target, true).unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written["data"][1], 2);
    }
}
