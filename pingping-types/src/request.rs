//! Request bodies for write calls.
//!
//! Unset fields are skipped when serializing, so only present fields reach
//! the API.

use serde::Serialize;

/// Body of `POST monitors` and `PUT monitors/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MonitorRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl MonitorRequest {
    /// Request setting both reconciled fields.
    pub fn new(alias: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            alias: Some(alias.into()),
            url: Some(url.into()),
        }
    }
}

/// Body of `PUT checks/{id}`.
///
/// The API only applies `notification_threshold` reliably when `interval` is
/// part of the same request, so callers should always set both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CheckUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_threshold: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_monitor_request_both_fields() {
        let body = serde_json::to_value(MonitorRequest::new("my-name", "https://example.com"))
            .unwrap();
        assert_eq!(body, json!({"alias": "my-name", "url": "https://example.com"}));
    }

    #[test]
    fn test_unset_fields_are_stripped() {
        let body = serde_json::to_value(MonitorRequest {
            alias: None,
            url: Some("https://example.com".into()),
        })
        .unwrap();
        assert_eq!(body, json!({"url": "https://example.com"}));

        let body = serde_json::to_value(CheckUpdate {
            interval: Some(900),
            notification_threshold: None,
        })
        .unwrap();
        assert_eq!(body, json!({"interval": 900}));

        let body = serde_json::to_value(CheckUpdate {
            interval: Some(900),
            notification_threshold: Some(0),
        })
        .unwrap();
        assert_eq!(body, json!({"interval": 900, "notification_threshold": 0}));
    }
}
