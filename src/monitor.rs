//! Monitor reconciliation.
//!
//! A monitor is resolved by id when one is given, otherwise by exact alias
//! match over all monitors visible to the token. It is then created,
//! updated or deleted to match the desired state.

use pingping_client::PingpingApi;
use pingping_types::{Monitor, MonitorRequest};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::host::ModuleHost;
use crate::outcome::{Fields, Outcome, MONITOR_NAMESPACE};
use crate::params::{MonitorParams, MonitorState};
use crate::url::urls_equal;
use crate::ReconcileError;

/// Find the single monitor carrying `name` as alias.
///
/// No match is `Ok(None)`; more than one match is
/// [`ReconcileError::Ambiguous`].
pub async fn find_monitor_by_alias<A>(api: &A, name: &str) -> Result<Option<Monitor>, ReconcileError>
where
    A: PingpingApi + ?Sized,
{
    let mut matching: Vec<Monitor> = api
        .list_monitors()
        .await?
        .into_iter()
        .filter(|m| m.alias == name)
        .collect();

    match matching.len() {
        0 => {
            debug!(name, "no monitor with this alias");
            Ok(None)
        }
        1 => Ok(matching.pop()),
        count => {
            warn!(name, count, "alias matches several monitors");
            Err(ReconcileError::Ambiguous {
                name: name.to_string(),
            })
        }
    }
}

/// Resolve a monitor by id, falling back to its alias.
pub async fn resolve_monitor<A>(
    api: &A,
    id: Option<u64>,
    name: Option<&str>,
) -> Result<Option<Monitor>, ReconcileError>
where
    A: PingpingApi + ?Sized,
{
    match (id, name) {
        (Some(id), _) => {
            let monitor = api.get_monitor(id).await?;
            debug!(id, found = monitor.is_some(), "looked up monitor by id");
            Ok(monitor)
        }
        (None, Some(name)) => find_monitor_by_alias(api, name).await,
        (None, None) => Err(ReconcileError::InvalidParams(
            "one of the following is required: name, id".to_string(),
        )),
    }
}

/// Brings one monitor to the desired state.
pub struct MonitorReconciler<'a, A: ?Sized, H> {
    api: &'a A,
    host: &'a H,
}

impl<'a, A, H> MonitorReconciler<'a, A, H>
where
    A: PingpingApi + ?Sized,
    H: ModuleHost<Params = MonitorParams>,
{
    pub fn new(api: &'a A, host: &'a H) -> Self {
        Self { api, host }
    }

    /// Validate the parameters and converge to `state`.
    pub async fn run(&self) -> Result<Outcome<Monitor>, ReconcileError> {
        let params = self.host.params();
        params.validate()?;

        match params.state {
            MonitorState::Present => self.present().await,
            MonitorState::Absent => self.absent().await,
        }
    }

    /// Current remote monitor, if any.
    pub async fn resolve(&self) -> Result<Option<Monitor>, ReconcileError> {
        let params = self.host.params();
        resolve_monitor(self.api, params.id, params.name.as_deref()).await
    }

    /// Ensure the monitor exists with the desired alias and URL.
    pub async fn present(&self) -> Result<Outcome<Monitor>, ReconcileError> {
        let desired = self.desired()?;
        let mut outcome = Outcome::new(MONITOR_NAMESPACE);

        match self.resolve().await? {
            None => {
                outcome.changed = true;
                outcome.diff.after = request_fields(&desired);

                if self.host.is_dry_run() {
                    info!(alias = ?desired.alias, "would create monitor");
                } else {
                    info!(alias = ?desired.alias, "creating monitor");
                    outcome.resource = self.api.create_monitor(&desired).await?;
                }
            }
            Some(current) => {
                outcome.diff.before = monitor_fields(&current);
                outcome.diff.after = request_fields(&desired);

                let alias_differs = desired.alias.as_deref() != Some(current.alias.as_str());
                let url_differs = !desired
                    .url
                    .as_deref()
                    .is_some_and(|url| urls_equal(url, &current.url));

                if !(alias_differs || url_differs) {
                    debug!(id = current.id, "monitor up to date");
                    outcome.resource = Some(current);
                    return Ok(outcome);
                }

                outcome.changed = true;
                if self.host.is_dry_run() {
                    info!(id = current.id, alias_differs, url_differs, "would update monitor");
                    outcome.resource = Some(current);
                } else {
                    info!(id = current.id, alias_differs, url_differs, "updating monitor");
                    let updated = self.api.update_monitor(current.id, &desired).await?;
                    outcome.resource = updated.or(Some(current));
                }
            }
        }

        Ok(outcome)
    }

    /// Ensure the monitor does not exist.
    pub async fn absent(&self) -> Result<Outcome<Monitor>, ReconcileError> {
        let mut outcome = Outcome::new(MONITOR_NAMESPACE);

        if let Some(current) = self.resolve().await? {
            outcome.changed = true;
            outcome.diff.before = monitor_fields(&current);

            if self.host.is_dry_run() {
                info!(id = current.id, "would delete monitor");
            } else {
                info!(id = current.id, "deleting monitor");
                self.api.delete_monitor(current.id).await?;
            }
            outcome.resource = Some(current);
        }

        Ok(outcome)
    }

    fn desired(&self) -> Result<MonitorRequest, ReconcileError> {
        let params = self.host.params();
        match (&params.name, &params.url) {
            (Some(name), Some(url)) => Ok(MonitorRequest::new(name, url)),
            _ => Err(ReconcileError::InvalidParams(
                "name and url are required to ensure a monitor is present".to_string(),
            )),
        }
    }
}

fn monitor_fields(monitor: &Monitor) -> Fields {
    reconciled_fields(
        Value::String(monitor.alias.clone()),
        Value::String(monitor.url.clone()),
    )
}

fn request_fields(request: &MonitorRequest) -> Fields {
    reconciled_fields(json!(request.alias), json!(request.url))
}

fn reconciled_fields(alias: Value, url: Value) -> Fields {
    let mut fields = Fields::new();
    fields.insert("alias".to_string(), alias);
    fields.insert("url".to_string(), url);
    fields
}
