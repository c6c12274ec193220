//! Core types and errors for the NotiBoost API client.
//!
//! This crate provides the foundational types used across the NotiBoost library:
//!
//! - **Types**: Strongly-typed request and response payloads for events and users
//! - **Errors**: A single discriminated error type, [`NotiboostError`]
//!
//! # Example
//!
//! ```rust
//! use notiboost_core::Event;
//!
//! let event = Event::new("order_created", "evt_001", "u_123")
//!     .property("order_id", "A001")
//!     .property("amount", 350_000);
//!
//! assert!(event.occurred_at.is_none());
//! assert_eq!(event.properties["amount"], 350_000);
//! ```

#![doc(html_root_url = "https://docs.rs/notiboost-core/1.0.0")]

mod error;
pub mod types;

pub use error::{ErrorKind, NotiboostError, Result};
pub use types::*;
