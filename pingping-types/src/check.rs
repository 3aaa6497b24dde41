//! Checks - named sub-resources of a monitor.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Monitor, MonitorRef};

/// The kinds of check every monitor carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Availability of the target URL.
    Uptime,
    /// Validity and expiry of the target's TLS certificate.
    CertificateHealth,
}

impl CheckKind {
    /// All check kinds, in API order.
    pub const ALL: [CheckKind; 2] = [CheckKind::CertificateHealth, CheckKind::Uptime];

    /// Name used as key in a monitor's `checks` mapping.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CheckKind::Uptime => "uptime",
            CheckKind::CertificateHealth => "certificate_health",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CheckKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                format!("unknown check '{s}', expected one of: certificate_health, uptime")
            })
    }
}

/// A check as returned by the web API.
///
/// `name` and `monitor` are not part of the nested representation inside a
/// monitor; they are filled in by [`Check::owned_by`] so that a check can be
/// reported on its own.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Check {
    pub id: u64,

    /// Seconds between two probes.
    #[serde(default)]
    pub interval: u64,

    /// Seconds of sustained failure before a notification goes out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_threshold: Option<u64>,

    #[serde(default)]
    pub is_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_check_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,

    /// Check name, denormalized from the monitor's `checks` key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Owning monitor, denormalized for reporting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitor: Option<MonitorRef>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Check {
    /// Create a check with the reconciled fields set.
    pub fn new(id: u64, interval: u64, is_enabled: bool) -> Self {
        Self {
            id,
            interval,
            is_enabled,
            ..Self::default()
        }
    }

    /// Attach the check name and owning monitor summary.
    pub fn owned_by(mut self, kind: CheckKind, monitor: &Monitor) -> Self {
        self.name = Some(kind.as_str().to_string());
        self.monitor = Some(monitor.summary());
        self
    }
}
