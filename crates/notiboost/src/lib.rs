//! Rust client for the NotiBoost notification orchestration API.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use notiboost::{Event, NotiboostClient, UserPreferences};
//!
//! #[tokio::main]
//! async fn main() -> notiboost::Result<()> {
//!     let client = NotiboostClient::new("nb_live_xxx")?;
//!
//!     // Submit an event; occurred_at defaults to now
//!     let resp = client
//!         .events()
//!         .ingest(
//!             Event::new("order_created", "evt_001", "u_123")
//!                 .property("order_id", "A001")
//!                 .property("amount", 350_000),
//!         )
//!         .await?;
//!     println!("Trace: {:?}", resp.trace_id);
//!
//!     // Opt the user out of SMS
//!     let prefs = UserPreferences::new().channel("sms", false);
//!     client.users().set_preferences("u_123", &prefs).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/notiboost/1.0.0")]

// Re-export core types
pub use notiboost_core::*;

// Re-export client
pub use notiboost_client::{
    api, Method, NotiboostClient, NotiboostClientBuilder, RequestOptions, RetryConfig,
    API_KEY_ENV, BASE_URL_ENV,
};

// Re-export runtime for convenience
pub use tokio;
pub use serde;
pub use serde_json;
