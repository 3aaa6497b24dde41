//! # pingping
//!
//! Idempotent management of monitors and checks on
//! [pingping.io](https://pingping.io).
//!
//! Each invocation reads the current remote state, diffs it against the
//! desired state and, unless running in dry-run mode, issues only the API
//! calls needed to converge. The result reports whether anything changed
//! (or would change) along with a before/after diff.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌──────────────────┐
//! │  ModuleHost  │──▶│   Reconciler     │──▶│   PingpingApi    │──▶ web API
//! │ (params,     │   │ monitor | check  │   │ (pingping-client)│
//! │  dry-run)    │   └────────┬─────────┘   └──────────────────┘
//! └──────────────┘            │
//!                             ▼
//!                      Outcome {changed, diff, resource}
//! ```
//!
//! - **[`monitor`]**: resolves a monitor by id or alias, then creates,
//!   updates or deletes it
//! - **[`check`]**: updates a check's timing and enabled state
//! - **[`url`]**: URL equality that tolerates re-serialization by the API
//! - **[`host`]**: the [`ModuleHost`] contract and the [`Invocation`] host
//! - **[`config`]** and **[`logging`]**: settings and log setup for the CLI
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! export PINGPING_API_TOKEN=xxxxxx
//!
//! # Ensure a monitor exists
//! pingping monitor --name my-site --url https://example.com
//!
//! # Disable the certificate check, reporting only
//! pingping --check check --name certificate_health --monitor my-site --state disabled
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use pingping::{Invocation, MonitorParams, MonitorReconciler, PingpingClient};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PingpingClient::builder().api_token("xxxxxx").build()?;
//! let invocation = Invocation::new(MonitorParams::present("my-site", "https://example.com"));
//!
//! let outcome = MonitorReconciler::new(&client, &invocation).run().await?;
//! println!("{}", outcome.to_json()?);
//! # Ok(())
//! # }
//! ```

pub mod check;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod monitor;
pub mod outcome;
pub mod params;
pub mod url;

#[cfg(test)]
mod fake;

pub use check::CheckReconciler;
pub use self::config::{Overrides, Settings};
pub use error::ReconcileError;
pub use host::{Invocation, ModuleHost};
pub use monitor::{find_monitor_by_alias, resolve_monitor, MonitorReconciler};
pub use outcome::{Diff, Outcome, CHECK_NAMESPACE, MONITOR_NAMESPACE};
pub use params::{CheckParams, CheckState, MonitorParams, MonitorState};
pub use self::url::{urls_equal, NormalizedUrl};

// Re-export the client and data model for convenience
pub use pingping_client::{ApiError, PingpingApi, PingpingClient};
pub use pingping_types::{Check, CheckKind, Monitor};
