//! Event ingestion API endpoints.

use crate::{NotiboostClient, RequestOptions};
use notiboost_core::{Event, EventBatch, IngestResponse, Result};
use serde_json::Value;

/// Event ingestion API endpoints
pub struct EventsApi<'a> {
    client: &'a NotiboostClient,
}

impl<'a> EventsApi<'a> {
    pub(crate) fn new(client: &'a NotiboostClient) -> Self {
        Self { client }
    }

    /// Submit a single event
    ///
    /// `occurred_at` is set to the current time when the event has none.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let event = Event::new("order_created", "evt_001", "u_123")
    ///     .property("order_id", "A001");
    /// let resp = client.events().ingest(event).await?;
    /// println!("trace: {:?}", resp.trace_id);
    /// ```
    pub async fn ingest(&self, event: Event) -> Result<IngestResponse> {
        self.ingest_with_options(event, &RequestOptions::default())
            .await
    }

    /// Submit a single event with extra request options (e.g., an idempotency key)
    pub async fn ingest_with_options(
        &self,
        event: Event,
        options: &RequestOptions,
    ) -> Result<IngestResponse> {
        let event = event.with_default_timestamp();
        self.client
            .post("/api/v1/events", &event, Some(options))
            .await
    }

    /// Submit several events in one request.
    ///
    /// Events are sent exactly as given; no timestamp is filled in.
    pub async fn ingest_batch(&self, events: Vec<Event>) -> Result<Value> {
        let batch = EventBatch { events };
        self.client
            .post("/api/v1/events/batch", &batch, None)
            .await
    }
}
