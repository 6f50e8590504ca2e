//! Upcoming changes handler.

use super::relevant::RelevantCommand;
use super::{exit_codes, write_json, OutputTarget};
use crate::aggregate::CancelFlag;
use crate::catalog::Catalog;
use crate::engine::upcoming_changes;
use crate::inventory::open_inventory;
use crate::upcoming::configured_changes;
use anyhow::Result;

/// Options of the `upcoming` command.
#[derive(Debug, Clone, Default)]
pub struct UpcomingCommand {
    pub relevant: RelevantCommand,
    /// Keep changes that affect no host
    pub all: bool,
}

/// Run the `upcoming` command.
pub fn run_upcoming(command: UpcomingCommand) -> Result<i32> {
    let relevant = &command.relevant;
    let query = relevant.query()?;
    let changes = configured_changes(&relevant.config.upcoming)?;
    let catalog = Catalog::load(&relevant.config.catalog)?;
    let inventory = open_inventory(&relevant.config)?;
    let report = upcoming_changes(
        &catalog,
        inventory.as_ref(),
        &query,
        &changes,
        command.all,
        &relevant.options(),
        &CancelFlag::new(),
    )?;
    write_json(
        &report,
        &OutputTarget::from_option(relevant.output.clone()),
        relevant.quiet,
    )?;
    Ok(exit_codes::SUCCESS)
}
