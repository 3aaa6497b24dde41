//! Desired state supplied by the caller, and its validation.
//!
//! Validation runs before any network call, so an invalid combination never
//! reaches the API.

use clap::ValueEnum;
use pingping_types::CheckKind;
use serde::{Deserialize, Serialize};

use crate::ReconcileError;

/// Target state of a monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MonitorState {
    #[default]
    Present,
    Absent,
}

/// Target state of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    #[default]
    Enabled,
    Disabled,
}

impl CheckState {
    pub fn is_enabled(self) -> bool {
        self == CheckState::Enabled
    }
}

/// Parameters of the monitor operation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonitorParams {
    /// Look the monitor up by id instead of by name.
    #[serde(default)]
    pub id: Option<u64>,

    /// Alias of the monitor.
    #[serde(default, alias = "alias")]
    pub name: Option<String>,

    /// URL to monitor.
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub state: MonitorState,
}

impl MonitorParams {
    /// A monitor that should exist with the given alias and URL.
    pub fn present(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// A monitor, looked up by name, that should not exist.
    pub fn absent(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            state: MonitorState::Absent,
            ..Self::default()
        }
    }

    /// Look the monitor up by id.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Check the parameter combination.
    ///
    /// One of `name`/`id` is required; `state=present` also requires `name`
    /// and `url`.
    pub fn validate(&self) -> Result<(), ReconcileError> {
        if self.id.is_none() && self.name.is_none() {
            return Err(ReconcileError::InvalidParams(
                "one of the following is required: name, id".to_string(),
            ));
        }

        if self.state == MonitorState::Present {
            let missing: Vec<&str> = [("url", self.url.is_none()), ("name", self.name.is_none())]
                .into_iter()
                .filter_map(|(field, is_missing)| is_missing.then_some(field))
                .collect();

            if !missing.is_empty() {
                return Err(ReconcileError::InvalidParams(format!(
                    "state is present but all of the following are missing: {}",
                    missing.join(", ")
                )));
            }
        }

        Ok(())
    }
}

/// Parameters of the check operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckParams {
    /// Kind of check to modify.
    pub name: CheckKind,

    /// Alias of the monitor the check belongs to.
    pub monitor: String,

    /// Seconds between two probes.
    #[serde(default)]
    pub interval: Option<u64>,

    /// Seconds of failure before notifying. Only applied together with
    /// `interval`.
    #[serde(default)]
    pub notification_threshold: Option<u64>,

    #[serde(default)]
    pub state: CheckState,
}

impl CheckParams {
    /// Parameters that only ensure the check is enabled.
    pub fn new(name: CheckKind, monitor: impl Into<String>) -> Self {
        Self {
            name,
            monitor: monitor.into(),
            interval: None,
            notification_threshold: None,
            state: CheckState::Enabled,
        }
    }

    /// Set interval and notification threshold together.
    pub fn with_timing(mut self, interval: u64, notification_threshold: u64) -> Self {
        self.interval = Some(interval);
        self.notification_threshold = Some(notification_threshold);
        self
    }

    pub fn with_state(mut self, state: CheckState) -> Self {
        self.state = state;
        self
    }

    /// Check the parameter combination.
    pub fn validate(&self) -> Result<(), ReconcileError> {
        if self.monitor.trim().is_empty() {
            return Err(ReconcileError::InvalidParams(
                "missing required arguments: monitor".to_string(),
            ));
        }

        if self.interval.is_some() != self.notification_threshold.is_some() {
            return Err(ReconcileError::InvalidParams(
                "parameters are required together: interval, notification_threshold".to_string(),
            ));
        }

        Ok(())
    }
}
