//! # pingping-types
//!
//! Data model for the [pingping.io](https://pingping.io) web API.
//!
//! Two remote entities are modelled:
//!
//! - **[`Monitor`]**: a tracked target URL with a unique, human-assigned alias.
//!   The server computes host, port, scheme, status page and identifier.
//! - **[`Check`]**: a named sub-resource of a monitor (see [`CheckKind`])
//!   controlling how often the target is probed and when to notify.
//!
//! Write bodies ([`MonitorRequest`], [`CheckUpdate`]) carry optional fields
//! that are skipped during serialization, so a partial update only sends
//! what was set.
//!
//! ## Example
//!
//! ```rust
//! use pingping_types::{CheckKind, MonitorList};
//!
//! let body = r#"{"data": [{
//!     "id": 27736,
//!     "alias": "my monitor",
//!     "url": "https://example.com",
//!     "checks": {"uptime": {"id": 55471, "interval": 900, "is_enabled": true}}
//! }]}"#;
//!
//! let monitors = serde_json::from_str::<MonitorList>(body).unwrap().into_monitors();
//! let uptime = monitors[0].check(CheckKind::Uptime).unwrap();
//! assert_eq!(uptime.interval, 900);
//! ```

mod check;
mod monitor;
mod request;

pub use check::*;
pub use monitor::*;
pub use request::*;

/// Base URL of the public pingping.io web API.
pub const DEFAULT_API_URL: &str = "https://pingping.io/webapi/";
