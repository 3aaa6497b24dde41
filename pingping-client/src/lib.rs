//! # pingping-client
//!
//! Authenticated client for the [pingping.io](https://pingping.io) web API.
//!
//! Every request carries a bearer token and the configured timeout. A `404`
//! on a read is reported as `None` (the resource is absent); any other
//! non-success status is an [`ApiError::Status`] carrying the method, path,
//! status and response body. Nothing is retried or cached.
//!
//! The typed operations used by reconcilers live on the [`PingpingApi`]
//! trait, so reconciliation logic can be exercised against an in-memory
//! implementation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pingping_client::{PingpingApi, PingpingClient};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PingpingClient::builder()
//!         .api_token("xxxxxx")
//!         .timeout(Duration::from_secs(30))
//!         .build()?;
//!
//!     for monitor in client.list_monitors().await? {
//!         println!("{} -> {}", monitor.alias, monitor.url);
//!     }
//!     Ok(())
//! }
//! ```

mod api;
mod client;
pub mod error;

#[cfg(test)]
mod stub;

pub use api::PingpingApi;
pub use client::{PingpingClient, PingpingClientBuilder, DEFAULT_TIMEOUT};
pub use error::ApiError;

// Re-export types for convenience
pub use pingping_types::{
    Check, CheckKind, CheckUpdate, Monitor, MonitorList, MonitorRef, MonitorRequest,
    DEFAULT_API_URL,
};
