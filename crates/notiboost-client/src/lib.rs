//! HTTP client for the NotiBoost notification API.
//!
//! This crate provides the main [`NotiboostClient`] and its two endpoint
//! groups: [`api::EventsApi`] for event ingestion and [`api::UsersApi`] for
//! user records, channel data and preferences.
//!
//! Requests are authenticated with a bearer token, bounded by a per-attempt
//! timeout and retried on HTTP 429 (honoring `Retry-After`) and on
//! transport failures (exponential backoff). See [`RetryConfig`].

#![doc(html_root_url = "https://docs.rs/notiboost-client/1.0.0")]

mod client;
mod config;
pub mod api;

pub use client::{NotiboostClient, NotiboostClientBuilder, API_KEY_ENV, BASE_URL_ENV};
pub use config::*;
pub use notiboost_core::{ErrorKind, NotiboostError, Result};
pub use reqwest::Method;
