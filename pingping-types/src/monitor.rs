//! Monitor - a tracked target URL on pingping.io.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{Check, CheckKind};

/// A monitor as returned by the web API.
///
/// Only `alias` and `url` are reconciled. Everything else is computed by the
/// server and carried along for reporting.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Monitor {
    /// Numeric identifier assigned by the server.
    pub id: u64,

    /// Human-assigned name, expected to be unique per account.
    #[serde(default)]
    pub alias: String,

    /// Target URL being monitored.
    #[serde(default)]
    pub url: String,

    /// Host part of the URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Port part of the URL. The API reports an empty string when the
    /// scheme's default port is used.
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub port: Option<String>,

    /// Scheme part of the URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,

    /// Public status page of the monitor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_page: Option<String>,

    /// Short identifier used in status page links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    /// Checks of this monitor, keyed by check name.
    #[serde(default)]
    pub checks: BTreeMap<String, Check>,

    /// Fields not modelled above, kept so reports show the full response.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Monitor {
    /// Create a monitor with just the reconciled fields set.
    pub fn new(id: u64, alias: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            alias: alias.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    /// Add a check under the name of its kind.
    pub fn with_check(mut self, kind: CheckKind, check: Check) -> Self {
        self.checks.insert(kind.as_str().to_string(), check);
        self
    }

    /// Look up a check by kind.
    pub fn check(&self, kind: CheckKind) -> Option<&Check> {
        self.checks.get(kind.as_str())
    }

    /// The `{id, alias}` summary attached to resolved checks.
    pub fn summary(&self) -> MonitorRef {
        MonitorRef {
            id: self.id,
            alias: self.alias.clone(),
        }
    }
}

/// Short reference to the monitor a check belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorRef {
    pub id: u64,
    pub alias: String,
}

/// Envelope of `GET monitors`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonitorList {
    #[serde(default)]
    pub data: Option<Vec<Monitor>>,
}

impl MonitorList {
    /// Unwrap the envelope; a missing or null `data` is an empty list.
    pub fn into_monitors(self) -> Vec<Monitor> {
        self.data.unwrap_or_default()
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "id": 27736,
            "alias": "my monitor",
            "host": "example.com",
            "identifier": "MNhCfPrb",
            "port": "",
            "scheme": "https",
            "status_page": "https://pingping.io/MNhCfPrb",
            "url": "https://example.com?foo=",
            "created_at": "2020-05-17 20:59:38",
            "checks": {
                "uptime": {
                    "id": 55471,
                    "interval": 900,
                    "is_enabled": true,
                    "status": "ok",
                    "error": null,
                    "last_check_at": "2020-05-17 20:59:38",
                    "meta": {"average_response_time": null, "offline_since": null}
                },
                "certificate_health": {
                    "id": 55472,
                    "interval": 43200,
                    "is_enabled": false
                }
            }
        }"#
    }

    #[test]
    fn test_deserialize_full_monitor() {
        let monitor: Monitor = serde_json::from_str(sample_json()).unwrap();

        assert_eq!(monitor.id, 27736);
        assert_eq!(monitor.alias, "my monitor");
        assert_eq!(monitor.url, "https://example.com?foo=");
        assert_eq!(monitor.port.as_deref(), Some(""));
        assert_eq!(monitor.identifier.as_deref(), Some("MNhCfPrb"));
        assert_eq!(monitor.checks.len(), 2);
        assert_eq!(
            monitor.extra.get("created_at"),
            Some(&Value::String("2020-05-17 20:59:38".into()))
        );

        let uptime = monitor.check(CheckKind::Uptime).unwrap();
        assert_eq!(uptime.id, 55471);
        assert!(uptime.is_enabled);

        let cert = monitor.check(CheckKind::CertificateHealth).unwrap();
        assert_eq!(cert.interval, 43200);
        assert!(!cert.is_enabled);
    }

    #[test]
    fn test_numeric_port() {
        let monitor: Monitor =
            serde_json::from_str(r#"{"id": 1, "alias": "a", "url": "u", "port": 8080}"#).unwrap();
        assert_eq!(monitor.port.as_deref(), Some("8080"));
    }

    #[test]
    fn test_minimal_monitor() {
        let monitor: Monitor = serde_json::from_str(r#"{"id": 5}"#).unwrap();
        assert_eq!(monitor.alias, "");
        assert!(monitor.checks.is_empty());
        assert!(monitor.port.is_none());
    }

    #[test]
    fn test_monitor_list_envelope() {
        let list: MonitorList =
            serde_json::from_str(r#"{"data": [{"id": 1, "alias": "a", "url": "u"}]}"#).unwrap();
        assert_eq!(list.into_monitors().len(), 1);

        let list: MonitorList = serde_json::from_str(r#"{"data": null}"#).unwrap();
        assert!(list.into_monitors().is_empty());

        let list: MonitorList = serde_json::from_str("{}").unwrap();
        assert!(list.into_monitors().is_empty());
    }

    #[test]
    fn test_summary() {
        let monitor = Monitor::new(7, "web", "https://example.com");
        assert_eq!(
            monitor.summary(),
            MonitorRef {
                id: 7,
                alias: "web".into()
            }
        );
    }
}
