//! Relevance handlers.

use super::{exit_codes, write_json, OutputTarget};
use crate::aggregate::CancelFlag;
use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::engine::{authorize, relevant_app_streams, relevant_rhel, RelevanceOptions};
use crate::inventory::{open_inventory, HostQuery};
use anyhow::Result;
use chrono::NaiveDate;
use std::path::PathBuf;

/// Options shared by the `relevant` commands.
#[derive(Debug, Clone, Default)]
pub struct RelevantCommand {
    pub config: AppConfig,
    /// Identity assertion forwarded to the RBAC service
    pub identity: Option<String>,
    pub org_id: Option<String>,
    pub major: Option<u32>,
    pub minor: Option<u32>,
    pub related: bool,
    /// Defaults to the current UTC date
    pub today: Option<NaiveDate>,
    pub output: Option<PathBuf>,
    pub quiet: bool,
}

impl RelevantCommand {
    pub(crate) fn options(&self) -> RelevanceOptions {
        let today = self.today.unwrap_or_else(|| chrono::Utc::now().date_naive());
        RelevanceOptions::new(today)
            .related(self.related)
            .status(self.config.status)
    }

    /// Authorize the caller and build the host query.
    pub(crate) fn query(&self) -> Result<HostQuery> {
        let access = authorize(&self.config, self.identity.as_deref())?;
        let mut query = HostQuery::new(access).os_version(self.major, self.minor);
        if let Some(org_id) = &self.org_id {
            query = query.org_id(org_id.clone());
        }
        Ok(query)
    }
}

/// Run `relevant rhel`.
pub fn run_relevant_rhel(command: RelevantCommand) -> Result<i32> {
    let query = command.query()?;
    let catalog = Catalog::load(&command.config.catalog)?;
    let inventory = open_inventory(&command.config)?;
    let report = relevant_rhel(
        &catalog,
        inventory.as_ref(),
        &query,
        &command.options(),
        &CancelFlag::new(),
    )?;
    if !command.quiet {
        tracing::info!("{} RHEL rows covering {} hosts", report.meta.count, report.meta.total);
    }
    write_json(&report, &OutputTarget::from_option(command.output), command.quiet)?;
    Ok(exit_codes::SUCCESS)
}

/// Run `relevant app-streams`.
pub fn run_relevant_app_streams(command: RelevantCommand) -> Result<i32> {
    let query = command.query()?;
    let catalog = Catalog::load(&command.config.catalog)?;
    let inventory = open_inventory(&command.config)?;
    let report = relevant_app_streams(
        &catalog,
        inventory.as_ref(),
        &query,
        &command.options(),
        &CancelFlag::new(),
    )?;
    if !command.quiet {
        tracing::info!("{} app stream rows", report.meta.count);
    }
    write_json(&report, &OutputTarget::from_option(command.output), command.quiet)?;
    Ok(exit_codes::SUCCESS)
}
