//! roadmap: lifecycle and support status of the RHEL versions and
//! application streams in use across a host inventory.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use lifecycle_roadmap::{
    catalog::{AppStreamFilter, NameKind},
    cli::{self, exit_code_for, AppStreamsCommand, RelevantCommand, RhelCommand, UpcomingCommand},
    config::{AppConfig, Validatable},
    model::AppStreamKind,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "roadmap")]
#[command(version)]
#[command(about = "Lifecycle roadmap for RHEL versions and application streams in use", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Invalid request or upstream authorization data
    2  Not authorized to access host inventory
    3  Error occurred
    4  Upstream service failure

EXAMPLES:
    # RHEL 9 lifecycle dates
    roadmap rhel --major 9

    # App streams in use, with newer alternatives
    roadmap --hosts-file hosts.jsonl relevant app-streams --related

    # Planned changes affecting the fleet
    roadmap --dev upcoming")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Development mode: unrestricted access and fixture hosts
    #[arg(long, global = true)]
    dev: bool,

    /// JSON-lines host feed
    #[arg(long, global = true)]
    hosts_file: Option<PathBuf>,

    /// Replacement app stream catalog (YAML or JSON)
    #[arg(long, global = true)]
    app_streams_file: Option<PathBuf>,

    /// Replacement RHEL lifecycle table (YAML or JSON)
    #[arg(long, global = true)]
    rhel_file: Option<PathBuf>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long, global = true)]
    output_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments shared by the host-based commands
#[derive(clap::Args, Clone)]
struct HostArgs {
    /// Identity assertion forwarded to the RBAC service
    #[arg(long, env = "ROADMAP_IDENTITY", hide_env_values = true)]
    identity: Option<String>,

    /// Only hosts of this organization
    #[arg(long)]
    org_id: Option<String>,

    /// Only hosts with this OS major version
    #[arg(long)]
    major: Option<u32>,

    /// Only hosts with this OS minor version (requires --major)
    #[arg(long, requires = "major")]
    minor: Option<u32>,

    /// Compute support status for this day (YYYY-MM-DD) instead of today
    #[arg(long)]
    today: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// List RHEL lifecycle dates
    Rhel {
        /// Major version
        major: Option<u32>,
        /// Minor version
        #[arg(requires = "major")]
        minor: Option<u32>,
        /// Only whole-major summary rows
        #[arg(long)]
        full: bool,
    },

    /// List application stream lifecycle dates
    AppStreams {
        /// Filter by module or package name (substring, case-insensitive)
        #[arg(long)]
        name: Option<String>,
        /// Filter by application stream name (substring, case-insensitive)
        #[arg(long)]
        application_stream_name: Option<String>,
        /// Filter by kind
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
        /// Filter by OS major version
        #[arg(long)]
        os_major: Option<u32>,
        /// List distinct names instead of entries
        #[arg(long, value_enum)]
        names: Option<NamesArg>,
    },

    /// Support status of what the host feed runs
    Relevant {
        #[command(subcommand)]
        target: RelevantTarget,
    },

    /// Planned changes matched against the host feed
    Upcoming {
        #[command(flatten)]
        hosts: HostArgs,
        /// Include changes that affect no host
        #[arg(long)]
        all: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print an example config file
    ConfigExample,
}

#[derive(Subcommand)]
enum RelevantTarget {
    /// RHEL versions in use
    Rhel {
        #[command(flatten)]
        hosts: HostArgs,
        /// Add later minor releases as related rows
        #[arg(long)]
        related: bool,
    },
    /// Application streams in use
    AppStreams {
        #[command(flatten)]
        hosts: HostArgs,
        /// Add newer streams of the same product as related rows
        #[arg(long)]
        related: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Module,
    Package,
    Scl,
}

impl From<KindArg> for AppStreamKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Module => Self::Module,
            KindArg::Package => Self::Package,
            KindArg::Scl => Self::Scl,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum NamesArg {
    Packages,
    Streams,
}

impl From<NamesArg> for NameKind {
    fn from(names: NamesArg) -> Self {
        match names {
            NamesArg::Packages => Self::Packages,
            NamesArg::Streams => Self::Streams,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    match dispatch(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(exit_code_for(&err));
        }
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let overrides = AppConfig::builder()
        .dev(cli.dev)
        .hosts_file(cli.hosts_file.clone())
        .app_streams_file(cli.app_streams_file.clone())
        .rhel_file(cli.rhel_file.clone())
        .build();
    let (config, loaded_from) = AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
    if let Some(path) = loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }

    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("invalid configuration: {}", messages.join("; "));
    }
    Ok(config)
}

fn relevant_command(cli: &Cli, config: AppConfig, hosts: HostArgs, related: bool) -> RelevantCommand {
    RelevantCommand {
        config,
        identity: hosts.identity,
        org_id: hosts.org_id,
        major: hosts.major,
        minor: hosts.minor,
        related,
        today: hosts.today,
        output: cli.output_file.clone(),
        quiet: cli.quiet,
    }
}

fn dispatch(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "roadmap", &mut io::stdout());
            return Ok(cli::exit_codes::SUCCESS);
        }
        Commands::ConfigSchema { output } => {
            let schema = lifecycle_roadmap::config::generate_json_schema()?;
            match output {
                Some(path) => {
                    std::fs::write(path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            return Ok(cli::exit_codes::SUCCESS);
        }
        Commands::ConfigExample => {
            print!("{}", lifecycle_roadmap::config::generate_example_config());
            return Ok(cli::exit_codes::SUCCESS);
        }
        _ => {}
    }

    let config = load_config(&cli)?;
    match &cli.command {
        Commands::Rhel { major, minor, full } => cli::run_rhel(RhelCommand {
            config,
            major: *major,
            minor: *minor,
            full: *full,
            output: cli.output_file.clone(),
            quiet: cli.quiet,
        }),
        Commands::AppStreams {
            name,
            application_stream_name,
            kind,
            os_major,
            names,
        } => cli::run_app_streams(AppStreamsCommand {
            config,
            filter: AppStreamFilter {
                name: name.clone(),
                application_stream_name: application_stream_name.clone(),
                kind: kind.map(Into::into),
                os_major: *os_major,
            },
            names: names.map(Into::into),
            output: cli.output_file.clone(),
            quiet: cli.quiet,
        }),
        Commands::Relevant { target } => match target {
            RelevantTarget::Rhel { hosts, related } => {
                cli::run_relevant_rhel(relevant_command(&cli, config, hosts.clone(), *related))
            }
            RelevantTarget::AppStreams { hosts, related } => cli::run_relevant_app_streams(
                relevant_command(&cli, config, hosts.clone(), *related),
            ),
        },
        Commands::Upcoming { hosts, all } => cli::run_upcoming(UpcomingCommand {
            relevant: relevant_command(&cli, config, hosts.clone(), false),
            all: *all,
        }),
        Commands::Completions { .. } | Commands::ConfigSchema { .. } | Commands::ConfigExample => {
            Ok(cli::exit_codes::SUCCESS)
        }
    }
}
