//! Main NotiBoost API client implementation.

use crate::api::{EventsApi, UsersApi};
use crate::config::{RequestOptions, RetryConfig};
use notiboost_core::{NotiboostError, Result};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER,
};
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// The NotiBoost API base URL
const DEFAULT_BASE_URL: &str = "https://api.notiboost.com";

/// Default per-attempt timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Wait applied to a 429 without a usable `Retry-After`
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(1);

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "NOTIBOOST_API_KEY";

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "NOTIBOOST_BASE_URL";

/// Main NotiBoost API client
#[derive(Clone)]
pub struct NotiboostClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    auth_header: HeaderValue,
    base_url: String,
    timeout: Duration,
    retry_config: RetryConfig,
}

/// Result of one round trip that reached the server
struct Attempt {
    status: StatusCode,
    retry_after: Duration,
    body: Option<Value>,
}

impl NotiboostClient {
    /// Create a new client with the given API key using default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        NotiboostClientBuilder::new(api_key).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(api_key: impl Into<String>) -> NotiboostClientBuilder {
        NotiboostClientBuilder::new(api_key)
    }

    /// Create a client from `NOTIBOOST_API_KEY` and, if set, `NOTIBOOST_BASE_URL`
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| NotiboostError::Config(format!("{API_KEY_ENV} is not set")))?;

        let mut builder = NotiboostClientBuilder::new(api_key);
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            builder = builder.base_url(base_url);
        }

        builder.build()
    }

    /// Access event ingestion endpoints
    #[must_use]
    pub fn events(&self) -> EventsApi<'_> {
        EventsApi::new(self)
    }

    /// Access user endpoints
    #[must_use]
    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Per-attempt timeout
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// Retry settings
    #[must_use]
    pub fn retry_config(&self) -> &RetryConfig {
        &self.inner.retry_config
    }

    /// Send a request and return the parsed JSON response body.
    ///
    /// `body` is only attached to POST and PUT requests. A successful response
    /// without a JSON body yields an empty object.
    ///
    /// HTTP 429 is retried after the server's `Retry-After` delay and transport
    /// failures after an exponential backoff, while attempts remain. Any other
    /// non-2xx status fails immediately with [`NotiboostError::Api`].
    pub async fn request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: Option<&RequestOptions>,
    ) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.inner.base_url, path);
        let headers = self.build_headers(options)?;
        let payload = match body {
            Some(body) if carries_body(&method) => Some(serde_json::to_vec(body)?),
            _ => None,
        };

        let retry = &self.inner.retry_config;
        let mut attempt: u32 = 0;

        loop {
            debug!(method = %method, url = %url, attempt, "sending request");
            let has_budget = attempt < retry.max_retries;

            match self
                .send_once(method.clone(), &url, &headers, payload.as_deref())
                .await
            {
                Ok(response) if response.status.is_success() => {
                    return Ok(response.body.unwrap_or_else(empty_object));
                }
                Ok(response) if response.status == StatusCode::TOO_MANY_REQUESTS && has_budget => {
                    warn!(
                        url = %url,
                        attempt,
                        delay_secs = response.retry_after.as_secs(),
                        "rate limited by NotiBoost API, retrying"
                    );
                    tokio::time::sleep(response.retry_after).await;
                }
                Ok(response) => {
                    debug!(status = response.status.as_u16(), url = %url, "request failed");
                    return Err(NotiboostError::from_response(
                        response.status.as_u16(),
                        response.body,
                    ));
                }
                Err(e) if has_budget => {
                    let delay = retry.backoff_for(attempt);
                    warn!(
                        url = %url,
                        attempt,
                        error = %e,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(self.transport_error(&e)),
            }

            attempt += 1;
        }
    }

    /// Send a request and deserialize the response body into `T`
    pub async fn request_as<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: Option<&RequestOptions>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let value = self.request(method, path, body, options).await?;
        serde_json::from_value(value).map_err(NotiboostError::Json)
    }

    /// Perform a GET request
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request_as::<T, ()>(Method::GET, path, None, None).await
    }

    /// Perform a POST request with JSON body
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: Option<&RequestOptions>,
    ) -> Result<T> {
        self.request_as(Method::POST, path, Some(body), options)
            .await
    }

    /// Perform a PUT request with JSON body
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: Option<&RequestOptions>,
    ) -> Result<T> {
        self.request_as(Method::PUT, path, Some(body), options)
            .await
    }

    /// Perform a DELETE request
    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request_as::<T, ()>(Method::DELETE, path, None, None)
            .await
    }

    /// Default headers with caller headers merged over them
    fn build_headers(&self, options: Option<&RequestOptions>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.inner.auth_header.clone());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in options.map(RequestOptions::headers).into_iter().flatten() {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| NotiboostError::Config(format!("invalid header name {name:?}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| NotiboostError::Config(format!("invalid value for header {name}: {e}")))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }

    /// Perform a single attempt and read the whole response
    async fn send_once(
        &self,
        method: Method,
        url: &str,
        headers: &HeaderMap,
        payload: Option<&[u8]>,
    ) -> std::result::Result<Attempt, reqwest::Error> {
        let mut request = self.inner.http.request(method, url).headers(headers.clone());
        if let Some(bytes) = payload {
            request = request.body(bytes.to_vec());
        }

        let response = request.send().await?;
        let status = response.status();
        let retry_after = retry_after_delay(response.headers());
        let text = response.text().await?;

        Ok(Attempt {
            status,
            retry_after,
            body: serde_json::from_str(&text).ok(),
        })
    }

    /// Convert a final transport failure to a NotiboostError
    fn transport_error(&self, err: &reqwest::Error) -> NotiboostError {
        if err.is_timeout() {
            NotiboostError::Timeout {
                timeout_ms: u64::try_from(self.inner.timeout.as_millis()).unwrap_or(u64::MAX),
            }
        } else if err.is_connect() {
            NotiboostError::Connection(err.to_string())
        } else {
            NotiboostError::Http(err.to_string())
        }
    }
}

impl std::fmt::Debug for NotiboostClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotiboostClient")
            .field("base_url", &self.inner.base_url)
            .field("timeout", &self.inner.timeout)
            .field("retry_config", &self.inner.retry_config)
            .finish_non_exhaustive()
    }
}

/// Builder for configuring a [`NotiboostClient`]
pub struct NotiboostClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
    user_agent: String,
    retry_config: RetryConfig,
}

impl NotiboostClientBuilder {
    /// Create a new builder with the given API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("notiboost-rust/{}", env!("CARGO_PKG_VERSION")),
            retry_config: RetryConfig::default(),
        }
    }

    /// Set the base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the per-attempt timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set the maximum number of retries, keeping the backoff unit
    #[must_use]
    pub fn max_retries(mut self, max: u32) -> Self {
        self.retry_config = self.retry_config.max_retries(max);
        self
    }

    /// Set retry configuration
    #[must_use]
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Build the client.
    ///
    /// Fails without touching the network if the API key is empty, the base
    /// URL does not parse, or the HTTP client cannot be created.
    pub fn build(self) -> Result<NotiboostClient> {
        if self.api_key.trim().is_empty() {
            return Err(NotiboostError::Config("API key is required".to_string()));
        }

        url::Url::parse(&self.base_url).map_err(|e| {
            NotiboostError::Config(format!("invalid base URL {:?}: {e}", self.base_url))
        })?;

        let mut auth_header = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|_| {
                NotiboostError::Config("API key contains invalid header characters".to_string())
            })?;
        auth_header.set_sensitive(true);

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| NotiboostError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(NotiboostClient {
            inner: Arc::new(ClientInner {
                http,
                auth_header,
                base_url: self.base_url.trim_end_matches('/').to_string(),
                timeout: self.timeout,
                retry_config: self.retry_config,
            }),
        })
    }
}

/// Only POST and PUT requests carry a JSON body
fn carries_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Delay requested by a `Retry-After` header given in whole seconds
fn retry_after_delay(headers: &HeaderMap) -> Duration {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map_or(DEFAULT_RETRY_AFTER, Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notiboost_core::ErrorKind;

    fn headers_with_retry_after(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn retry_after_seconds() {
        assert_eq!(
            retry_after_delay(&headers_with_retry_after("7")),
            Duration::from_secs(7)
        );
        assert_eq!(
            retry_after_delay(&headers_with_retry_after("0")),
            Duration::ZERO
        );
    }

    #[test]
    fn retry_after_defaults_to_one_second() {
        assert_eq!(retry_after_delay(&HeaderMap::new()), Duration::from_secs(1));
        assert_eq!(
            retry_after_delay(&headers_with_retry_after("soon")),
            Duration::from_secs(1)
        );
        assert_eq!(
            retry_after_delay(&headers_with_retry_after("Wed, 21 Oct 2015 07:28:00 GMT")),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn only_post_and_put_carry_a_body() {
        assert!(carries_body(&Method::POST));
        assert!(carries_body(&Method::PUT));
        assert!(!carries_body(&Method::GET));
        assert!(!carries_body(&Method::DELETE));
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let err = NotiboostClient::new("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);

        let err = NotiboostClient::new("   ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = NotiboostClient::builder("nb_key")
            .base_url("not a url")
            .build()
            .unwrap_err();

        assert!(matches!(err, NotiboostError::Config(_)));
    }

    #[test]
    fn defaults() {
        let client = NotiboostClient::new("nb_key").unwrap();

        assert_eq!(client.base_url(), "https://api.notiboost.com");
        assert_eq!(client.timeout(), Duration::from_secs(30));
        assert_eq!(client.retry_config().max_retries, 3);
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = NotiboostClient::builder("nb_key")
            .base_url("http://localhost:8080/")
            .build()
            .unwrap();

        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn custom_headers_override_defaults() {
        let client = NotiboostClient::new("nb_key").unwrap();
        let options = RequestOptions::new()
            .header("Content-Type", "application/merge-patch+json")
            .idempotency_key("idem-1");

        let headers = client.build_headers(Some(&options)).unwrap();

        assert_eq!(headers[CONTENT_TYPE], "application/merge-patch+json");
        assert_eq!(headers["idempotency-key"], "idem-1");
        assert_eq!(headers[AUTHORIZATION], "Bearer nb_key");
    }

    #[test]
    fn invalid_custom_header_is_a_config_error() {
        let client = NotiboostClient::new("nb_key").unwrap();
        let options = RequestOptions::new().header("bad header", "x");

        let err = client.build_headers(Some(&options)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
