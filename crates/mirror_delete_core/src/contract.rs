use serde::{Deserialize, Serialize};

/// Fixed redelivery delay applied to every retried message.
pub const RETRY_DELAY_SECONDS: u32 = 5;

/// Notification emitted by the source bucket when an object changes.
///
/// Field names follow the upstream notification payload. Only the object key
/// participates in control flow; the remaining fields are descriptive
/// metadata carried for logging. Missing metadata defaults to empty values so
/// that key validation, not deserialization, decides whether an event is
/// processable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageEvent {
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub bucket: String,
    #[serde(default, rename = "eventTime")]
    pub event_time: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub object: StorageObject,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageObject {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default, rename = "eTag")]
    pub e_tag: String,
}

/// Outcome of a successful delete call against the target store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteReceipt {
    pub request_id: Option<String>,
    pub http_status_code: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

pub fn validate_event(event: &StorageEvent) -> Result<(), ValidationError> {
    if event.object.key.trim().is_empty() {
        return Err(ValidationError::new("object key cannot be empty"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_notification_payload() {
        let body = r#"{
            "account": "acc-123",
            "bucket": "source-bucket",
            "eventTime": "2026-02-14T09:30:00Z",
            "action": "DeleteObject",
            "object": {
                "key": "reports/2026/summary.csv",
                "size": 2048,
                "eTag": "d41d8cd98f00b204e9800998ecf8427e"
            }
        }"#;

        let event: StorageEvent = serde_json::from_str(body).expect("payload should parse");
        assert_eq!(event.object.key, "reports/2026/summary.csv");
        assert_eq!(event.object.size, 2048);
        assert_eq!(event.event_time, "2026-02-14T09:30:00Z");
        assert_eq!(event.action, "DeleteObject");
    }

    #[test]
    fn missing_metadata_defaults_instead_of_failing() {
        let body = r#"{"object": {"key": "a.txt"}}"#;

        let event: StorageEvent = serde_json::from_str(body).expect("payload should parse");
        assert_eq!(event.object.key, "a.txt");
        assert!(event.account.is_empty());
        assert!(event.bucket.is_empty());
        assert!(event.object.e_tag.is_empty());
        assert!(validate_event(&event).is_ok());
    }

    #[test]
    fn rejects_empty_object_key() {
        let body = r#"{"object": {"key": "  "}}"#;

        let event: StorageEvent = serde_json::from_str(body).expect("payload should parse");
        let error = validate_event(&event).expect_err("blank key should fail");
        assert_eq!(error.message(), "object key cannot be empty");
    }

    #[test]
    fn rejects_payload_without_object_record() {
        let body = r#"{"bucket": "source-bucket"}"#;

        let event: StorageEvent = serde_json::from_str(body).expect("payload should parse");
        assert!(validate_event(&event).is_err());
    }
}
