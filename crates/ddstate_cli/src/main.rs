//! # Commands
//!
//! - `ddstate downtime` - Schedule or cancel a monitor downtime for a scope
//! - `ddstate tag` - Add tags to, or remove tags from, a host

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod commands;
mod output;
mod ui;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use console::style;
use ddstate_core::prelude::*;

use crate::ui::{colors, exit};

fn parse_state(s: &str) -> Result<State, String> {
    s.parse::<State>().map_err(|e| e.to_string())
}

const REPO_URL: &str = "https://github.com/ddstate/ddstate";

#[derive(Debug, Parser)]
#[command(
    name = "ddstate",
    version,
    styles = ui::clap_styles(),
    arg_required_else_help = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Schedule or cancel a downtime.
    #[command(visible_alias = "d")]
    Downtime(DowntimeArgs),

    /// Add tags to, or remove tags from, a host.
    #[command(visible_alias = "t")]
    Tag(TagArgs),
}

impl Command {
    const fn connection(&self) -> &ConnectionArgs {
        match self {
            Self::Downtime(args) => &args.connection,
            Self::Tag(args) => &args.connection,
        }
    }
}

/// Report format written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `{"changed": ..., "msg": ...}` or `{"failed": true, "msg": ...}`.
    #[default]
    Json,
    /// Human-readable terminal output.
    Text,
}

/// Connection and output options shared by every command.
#[derive(Debug, Args)]
pub struct ConnectionArgs {
    /// Datadog API key.
    #[arg(long, env = "DD_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Datadog application key.
    #[arg(long, env = "DD_APP_KEY", hide_env_values = true)]
    pub app_key: Option<String>,

    /// Datadog site (e.g. datadoghq.eu).
    #[arg(long, env = "DD_SITE")]
    pub site: Option<String>,

    /// Full API base URL; overrides --site.
    #[arg(long, env = "DD_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Path to `.ddstate.toml` configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report format.
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Arguments for the `ddstate downtime` command.
#[derive(Debug, Parser)]
pub struct DowntimeArgs {
    /// Desired state of the downtime (present or absent).
    #[arg(short, long, value_parser = parse_state)]
    pub state: State,

    /// Comma-separated scopes the downtime applies to (e.g. "env:prod,team:x").
    #[arg(long)]
    pub scope: String,

    /// POSIX timestamp at which the downtime starts.
    #[arg(long)]
    pub start: Option<i64>,

    /// POSIX timestamp at which the downtime ends.
    #[arg(long)]
    pub end: Option<i64>,

    /// Message included with notifications for the downtime.
    #[arg(short, long)]
    pub message: Option<String>,

    /// Downtime id. Accepted for compatibility; downtimes are matched by scope.
    #[arg(long)]
    pub id: Option<u64>,

    /// Only consider downtimes that are active right now.
    #[arg(long)]
    pub current_only: bool,

    #[allow(missing_docs, reason = "flattened clap argument group")]
    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// Arguments for the `ddstate tag` command.
#[derive(Debug, Parser)]
pub struct TagArgs {
    /// Host to tag, resolved through infrastructure search.
    #[arg(long)]
    pub host: String,

    /// Desired state of the host's tags (present or absent).
    #[arg(short, long, value_parser = parse_state)]
    pub state: State,

    /// Comma-separated tags to add (required when present).
    #[arg(short, long)]
    pub tags: Option<String>,

    /// Source the tags are grouped under.
    #[arg(long)]
    pub source: Option<String>,

    /// Read existing tags grouped by source.
    #[arg(long)]
    pub by_source: bool,

    #[allow(missing_docs, reason = "flattened clap argument group")]
    #[command(flatten)]
    pub connection: ConnectionArgs,
}

fn main() {
    #[cfg(feature = "tracing")]
    {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .without_time(),
            )
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
            .init();
    }

    let cli = parse_cli();
    let format = cli.command.connection().format;
    let start = Instant::now();

    let (report, code) = match run(cli.command) {
        Ok(report) if report.is_failure() => (report, exit::FAILED),
        Ok(report) => (report, exit::SUCCESS),
        Err(e) => (Report::failed(format!("{e:#}")), exit::ERROR),
    };

    if let Err(e) = output::write_report(&report, format, start.elapsed()) {
        ui::print_error(&format!("{e:#}"));
        std::process::exit(exit::ERROR);
    }

    std::process::exit(code);
}

fn parse_cli() -> Cli {
    let cmd = Cli::command().about(build_about()).after_help(build_after_help());

    let matches = cmd.get_matches();

    #[expect(clippy::expect_used, reason = "clap already validated args; this cannot fail")]
    Cli::from_arg_matches(&matches).expect("failed to parse arguments")
}

fn run(command: Command) -> anyhow::Result<Report> {
    match command {
        Command::Downtime(args) => commands::downtime::run(&args),
        Command::Tag(args) => commands::tag::run(&args),
    }
}

fn build_about() -> String {
    format!(
        r"
  {} reconciles Datadog downtimes and host tags.

  Each run compares the desired state with what Datadog reports,
  makes the corrective call, and prints a single JSON report.",
        colors::accent().apply_to("ddstate").bold()
    )
}

fn build_after_help() -> String {
    format!(
        r"
  {}
    ddstate downtime -s present --scope env:prod --end 1767225600
    ddstate downtime -s absent --scope env:prod,team:x
    ddstate tag -s present --host web-01 --tags role:web,team:x
    ddstate tag -s absent --host web-01 --source chef

  Credentials are read from --api-key/--app-key, DD_API_KEY/DD_APP_KEY,
  or {}.

  Learn more: {}",
        style("Examples:").bold(),
        colors::accent().apply_to(ddstate_core::CONFIG_FILENAME),
        colors::accent().apply_to(REPO_URL).underlined()
    )
}
