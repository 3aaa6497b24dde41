//! Check reconciliation.
//!
//! A check is addressed by its kind and the alias of the monitor it belongs
//! to. Converging takes up to two independent writes: a `PUT` carrying the
//! timing fields, then an enable or disable action. The writes are not
//! atomic. When either was issued the check is read again so the reported
//! resource is the server's view; a failed re-read fails the invocation
//! without undoing the writes.

use pingping_client::PingpingApi;
use pingping_types::{Check, CheckUpdate};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::host::ModuleHost;
use crate::monitor::find_monitor_by_alias;
use crate::outcome::{fields_of, Outcome, CHECK_NAMESPACE};
use crate::params::CheckParams;
use crate::ReconcileError;

/// Brings one check to the desired timing and enabled state.
pub struct CheckReconciler<'a, A: ?Sized, H> {
    api: &'a A,
    host: &'a H,
}

impl<'a, A, H> CheckReconciler<'a, A, H>
where
    A: PingpingApi + ?Sized,
    H: ModuleHost<Params = CheckParams>,
{
    pub fn new(api: &'a A, host: &'a H) -> Self {
        Self { api, host }
    }

    /// Validate the parameters and converge.
    pub async fn run(&self) -> Result<Outcome<Check>, ReconcileError> {
        self.host.params().validate()?;
        self.present().await
    }

    /// Look up the check on its monitor.
    ///
    /// The monitor must match exactly one alias and carry a check of the
    /// requested kind.
    pub async fn resolve(&self) -> Result<Check, ReconcileError> {
        let params = self.host.params();

        let monitor = find_monitor_by_alias(self.api, &params.monitor)
            .await?
            .ok_or_else(|| ReconcileError::MonitorNotFound {
                name: params.monitor.clone(),
            })?;

        let check = monitor
            .check(params.name)
            .cloned()
            .ok_or_else(|| ReconcileError::CheckNotFound {
                monitor: monitor.alias.clone(),
                check: params.name,
            })?;

        debug!(monitor = monitor.id, check = check.id, kind = %params.name, "resolved check");
        Ok(check.owned_by(params.name, &monitor))
    }

    /// Apply timing and enabled state, then report the check.
    pub async fn present(&self) -> Result<Outcome<Check>, ReconcileError> {
        let current = self.resolve().await?;

        let mut outcome = Outcome::new(CHECK_NAMESPACE);
        outcome.diff.before = fields_of(&current);
        outcome.diff.after = fields_of(&current);

        self.update_interval_and_threshold(&current, &mut outcome)
            .await?;
        self.toggle_enabled(&current, &mut outcome).await?;

        outcome.resource = if outcome.changed && !self.host.is_dry_run() {
            debug!(check = current.id, "re-reading check after update");
            Some(self.resolve().await?)
        } else {
            Some(current)
        };

        Ok(outcome)
    }

    /// Send interval and threshold together when the interval differs.
    ///
    /// The threshold alone never triggers an update since the API ignores it
    /// without an interval change.
    pub async fn update_interval_and_threshold(
        &self,
        current: &Check,
        outcome: &mut Outcome<Check>,
    ) -> Result<(), ReconcileError> {
        let params = self.host.params();
        let Some(interval) = params.interval else {
            return Ok(());
        };

        if interval == current.interval {
            debug!(check = current.id, interval, "interval up to date");
            return Ok(());
        }

        let update = CheckUpdate {
            interval: Some(interval),
            notification_threshold: params.notification_threshold,
        };

        outcome.changed = true;
        outcome.diff.after.insert("interval".to_string(), json!(interval));
        outcome.diff.after.insert(
            "notification_threshold".to_string(),
            json!(update.notification_threshold),
        );

        if self.host.is_dry_run() {
            info!(check = current.id, from = current.interval, to = interval, "would update check timing");
        } else {
            info!(check = current.id, from = current.interval, to = interval, "updating check timing");
            self.api.update_check(current.id, &update).await?;
        }
        Ok(())
    }

    /// Enable or disable the check when its state differs.
    pub async fn toggle_enabled(
        &self,
        current: &Check,
        outcome: &mut Outcome<Check>,
    ) -> Result<(), ReconcileError> {
        let enabled = self.host.params().state.is_enabled();
        if enabled == current.is_enabled {
            debug!(check = current.id, enabled, "enabled state up to date");
            return Ok(());
        }

        outcome.changed = true;
        outcome
            .diff
            .after
            .insert("is_enabled".to_string(), Value::Bool(enabled));

        if self.host.is_dry_run() {
            info!(check = current.id, enabled, "would toggle check");
        } else {
            info!(check = current.id, enabled, "toggling check");
            self.api.set_check_enabled(current.id, enabled).await?;
        }
        Ok(())
    }
}
