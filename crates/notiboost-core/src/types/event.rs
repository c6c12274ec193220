use super::Properties;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A behavioral event submitted for notification orchestration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event name (e.g., "order_created")
    pub event_name: String,

    /// Caller-supplied unique identifier
    pub event_id: String,

    /// When the event happened; filled with the submission time if unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurred_at: Option<DateTime<Utc>>,

    /// Subject user identifier
    pub user_id: String,

    /// Arbitrary event attributes
    #[serde(default)]
    pub properties: Properties,
}

impl Event {
    /// Create an event with no properties and no timestamp
    #[must_use]
    pub fn new(
        event_name: impl Into<String>,
        event_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            event_name: event_name.into(),
            event_id: event_id.into(),
            occurred_at: None,
            user_id: user_id.into(),
            properties: Properties::new(),
        }
    }

    /// Set the occurrence time
    #[must_use]
    pub fn occurred_at(mut self, at: DateTime<Utc>) -> Self {
        self.occurred_at = Some(at);
        self
    }

    /// Add a property
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Fill `occurred_at` with the current time if the caller left it unset.
    /// An existing timestamp is kept as-is.
    #[must_use]
    pub fn with_default_timestamp(mut self) -> Self {
        self.occurred_at.get_or_insert_with(Utc::now);
        self
    }
}

/// Body of `POST /api/v1/events/batch`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventBatch {
    /// Events, submitted without any defaulting
    pub events: Vec<Event>,
}

/// Response to a single event ingestion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestResponse {
    /// Whether the server accepted the event; `None` if the reply did not say
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,

    /// Server-side trace identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,

    /// Echo of the event identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,

    /// Human-readable status message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Any other fields the server sent
    #[serde(flatten)]
    pub extra: Properties,
}

impl IngestResponse {
    /// Returns true only if the server explicitly reported success
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success == Some(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn default_timestamp_fills_missing_value() {
        let before = Utc::now();
        let event = Event::new("signup", "evt_1", "u_1").with_default_timestamp();

        let at = event.occurred_at.unwrap();
        assert!(at >= before);
        assert!(at <= Utc::now());
    }

    #[test]
    fn default_timestamp_keeps_existing_value() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        let event = Event::new("signup", "evt_1", "u_1")
            .occurred_at(at)
            .with_default_timestamp();

        assert_eq!(event.occurred_at, Some(at));
    }

    #[test]
    fn serializes_to_wire_shape() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        let event = Event::new("order_created", "evt_001", "u_123")
            .occurred_at(at)
            .property("order_id", "A001")
            .property("amount", 350_000)
            .property("items", json!([{"sku": "X1", "qty": 2}]));

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event_name"], "order_created");
        assert_eq!(value["occurred_at"], "2024-05-01T08:30:00Z");
        assert_eq!(value["properties"]["amount"], 350_000);
        assert_eq!(value["properties"]["items"][0]["qty"], 2);
    }

    #[test]
    fn unset_timestamp_is_omitted() {
        let value = serde_json::to_value(Event::new("a", "b", "c")).unwrap();
        assert!(value.get("occurred_at").is_none());
    }

    #[test]
    fn ingest_response_tolerates_missing_fields() {
        let resp: IngestResponse =
            serde_json::from_value(json!({"success": true, "trace_id": "trc_1"})).unwrap();

        assert!(resp.is_success());
        assert_eq!(resp.trace_id.as_deref(), Some("trc_1"));
        assert!(resp.event_id.is_none());
        assert!(resp.message.is_none());
    }

    #[test]
    fn ingest_response_without_success_is_unknown() {
        let resp: IngestResponse = serde_json::from_value(json!({"trace_id": "trc_1"})).unwrap();

        assert_eq!(resp.success, None);
        assert!(!resp.is_success());
    }

    #[test]
    fn ingest_response_keeps_unknown_fields() {
        let body = json!({"success": false, "message": "quota", "retry_in": 60});
        let resp: IngestResponse = serde_json::from_value(body.clone()).unwrap();

        assert_eq!(resp.success, Some(false));
        assert_eq!(resp.extra["retry_in"], 60);
        assert_eq!(serde_json::to_value(&resp).unwrap(), body);
    }
}
