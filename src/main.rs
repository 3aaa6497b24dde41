use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use serde_json::Value;
use tracing::debug;

use pingping::logging::{self, LogFormat};
use pingping::outcome;
use pingping::{
    CheckKind, CheckParams, CheckReconciler, CheckState, Invocation, ModuleHost, MonitorParams,
    MonitorReconciler, MonitorState, Overrides, Settings,
};

#[derive(Parser, Debug)]
#[command(name = "pingping", version)]
#[command(about = "Idempotent management of pingping.io monitors and checks")]
struct Args {
    /// API token (falls back to PINGPING_API_TOKEN or the config file)
    #[arg(long, global = true)]
    api_token: Option<String>,

    /// Request timeout in seconds [default: 30]
    #[arg(long, global = true)]
    api_timeout: Option<u64>,

    /// Base URL of the web API
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Settings file (TOML, YAML or JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Report what would change without changing anything
    #[arg(long = "check", global = true)]
    dry_run: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create, update or delete a monitor
    Monitor(MonitorArgs),
    /// Update the timing or enabled state of a check
    Check(CheckArgs),
}

#[derive(ClapArgs, Debug)]
struct MonitorArgs {
    /// Alias of the monitor
    #[arg(long, visible_alias = "alias")]
    name: Option<String>,

    /// Look the monitor up by id instead of by name
    #[arg(long)]
    id: Option<u64>,

    /// URL to monitor
    #[arg(long)]
    url: Option<String>,

    #[arg(long, value_enum, default_value_t = MonitorState::Present)]
    state: MonitorState,
}

impl From<MonitorArgs> for MonitorParams {
    fn from(args: MonitorArgs) -> Self {
        MonitorParams {
            id: args.id,
            name: args.name,
            url: args.url,
            state: args.state,
        }
    }
}

#[derive(ClapArgs, Debug)]
struct CheckArgs {
    /// Check to modify (uptime or certificate_health)
    #[arg(long)]
    name: CheckKind,

    /// Alias of the monitor owning the check
    #[arg(long)]
    monitor: String,

    /// Seconds between two probes
    #[arg(long)]
    interval: Option<u64>,

    /// Seconds of failure before notifying
    #[arg(long)]
    notification_threshold: Option<u64>,

    #[arg(long, value_enum, default_value_t = CheckState::Enabled)]
    state: CheckState,
}

impl From<CheckArgs> for CheckParams {
    fn from(args: CheckArgs) -> Self {
        CheckParams {
            name: args.name,
            monitor: args.monitor,
            interval: args.interval,
            notification_threshold: args.notification_threshold,
            state: args.state,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logging::init(args.verbose, args.log_format) {
        eprintln!("failed to initialize logging: {e}");
    }

    match run(args) {
        Ok(result) => {
            println!("{result}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{}", outcome::failure(format!("{e:#}")));
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<Value> {
    let overrides = Overrides {
        api_token: args.api_token,
        api_timeout: args.api_timeout,
        api_url: args.api_url,
    };

    match args.command {
        Command::Monitor(monitor) => {
            let invocation = Invocation::new(MonitorParams::from(monitor)).dry_run(args.dry_run);
            invocation.params().validate()?;

            let client = connect(args.config, overrides)?;
            let outcome = runtime()?.block_on(MonitorReconciler::new(&client, &invocation).run())?;
            Ok(outcome.to_json()?)
        }
        Command::Check(check) => {
            let invocation = Invocation::new(CheckParams::from(check)).dry_run(args.dry_run);
            invocation.params().validate()?;

            let client = connect(args.config, overrides)?;
            let outcome = runtime()?.block_on(CheckReconciler::new(&client, &invocation).run())?;
            Ok(outcome.to_json()?)
        }
    }
}

/// Load settings and build the API client.
fn connect(config: Option<PathBuf>, overrides: Overrides) -> Result<pingping::PingpingClient> {
    let settings =
        Settings::load(config.as_deref(), overrides).context("failed to load settings")?;
    debug!(?settings, "loaded settings");
    Ok(settings.client()?)
}

/// Each invocation is a strictly sequential series of requests.
fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")
}
