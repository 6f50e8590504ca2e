//! Catalog listing handlers.

use super::{exit_codes, write_json, DataResponse, OutputTarget};
use crate::catalog::{AppStreamFilter, Catalog, NameKind};
use crate::config::AppConfig;
use anyhow::Result;

/// Options of the `rhel` command.
#[derive(Debug, Clone, Default)]
pub struct RhelCommand {
    pub config: AppConfig,
    pub major: Option<u32>,
    pub minor: Option<u32>,
    /// Whole-major summary rows only
    pub full: bool,
    pub output: Option<std::path::PathBuf>,
    pub quiet: bool,
}

/// Options of the `app-streams` command.
#[derive(Debug, Clone, Default)]
pub struct AppStreamsCommand {
    pub config: AppConfig,
    pub filter: AppStreamFilter,
    /// List distinct names instead of entries
    pub names: Option<NameKind>,
    pub output: Option<std::path::PathBuf>,
    pub quiet: bool,
}

/// Run the `rhel` command.
pub fn run_rhel(command: RhelCommand) -> Result<i32> {
    let catalog = Catalog::load(&command.config.catalog)?;
    let rows = catalog.list_rhel(command.major, command.minor, command.full);
    write_json(
        &DataResponse { data: rows },
        &OutputTarget::from_option(command.output),
        command.quiet,
    )?;
    Ok(exit_codes::SUCCESS)
}

/// Run the `app-streams` command.
pub fn run_app_streams(command: AppStreamsCommand) -> Result<i32> {
    let catalog = Catalog::load(&command.config.catalog)?;
    let target = OutputTarget::from_option(command.output);
    match command.names {
        Some(kind) => write_json(
            &DataResponse {
                data: catalog.list_names(&command.filter, kind),
            },
            &target,
            command.quiet,
        )?,
        None => write_json(
            &DataResponse {
                data: catalog.list_app_streams(&command.filter),
            },
            &target,
            command.quiet,
        )?,
    }
    Ok(exit_codes::SUCCESS)
}
