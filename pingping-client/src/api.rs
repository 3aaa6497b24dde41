//! Typed operations on the web API.

use async_trait::async_trait;

use pingping_types::{Check, CheckUpdate, Monitor, MonitorRequest};

use crate::ApiError;

/// The remote operations reconcilers rely on.
///
/// [`PingpingClient`](crate::PingpingClient) implements this over HTTP.
/// Write operations return `None` when the API answers with an empty body.
#[async_trait]
pub trait PingpingApi: Send + Sync {
    /// `GET monitors`, unwrapped from its `data` envelope.
    async fn list_monitors(&self) -> Result<Vec<Monitor>, ApiError>;

    /// `GET monitors/{id}`; `None` when the monitor does not exist.
    async fn get_monitor(&self, id: u64) -> Result<Option<Monitor>, ApiError>;

    /// `POST monitors`.
    async fn create_monitor(&self, request: &MonitorRequest) -> Result<Option<Monitor>, ApiError>;

    /// `PUT monitors/{id}`.
    async fn update_monitor(
        &self,
        id: u64,
        request: &MonitorRequest,
    ) -> Result<Option<Monitor>, ApiError>;

    /// `DELETE monitors/{id}`.
    async fn delete_monitor(&self, id: u64) -> Result<(), ApiError>;

    /// `PUT checks/{id}`.
    async fn update_check(&self, id: u64, update: &CheckUpdate) -> Result<Option<Check>, ApiError>;

    /// `POST checks/{id}/enable` or `POST checks/{id}/disable`.
    async fn set_check_enabled(&self, id: u64, enabled: bool) -> Result<Option<Check>, ApiError>;
}
