//! `ApiClient` and the request plumbing shared by every resource.
//!
//! Resource operations live next door (`employees`, `attendance`,
//! `settings`, `dashboard`), each as an `impl ApiClient` block.

use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::ResponseCache;
use crate::notify::Notifier;

use super::transport::{ApiRequest, HttpTransport, Method, RawResponse, Transport};
use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Base address used when neither the environment nor the config names one.
pub const DEFAULT_BASE_URL: &str = "https://api.peppypresence.com";

pub(super) const EMPLOYEE_PATH: &str = "/api/employee";
pub(super) const ATTENDANCE_PATH: &str = "/api/attendance";
pub(super) const CONFIG_PATH: &str = "/api/config";
pub(super) const DASHBOARD_PATH: &str = "/api/dashboard";

/// Organisation config changes rarely; keep it for an hour.
pub(super) const CONFIG_TTL: Duration = Duration::from_secs(60 * 60);

/// Response envelope wrapped around every payload.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    data: Option<T>,
}

/// API client for the attendance service.
/// Clone is cheap: the transport, cache, and notifier are all shared handles.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    cache: ResponseCache,
    notifier: Notifier,
    base_url: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("cache", &self.cache)
            .finish()
    }
}

impl ApiClient {
    /// Create a client talking HTTP to `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(timeout)?;
        Ok(Self::with_transport(base_url, Arc::new(transport)))
    }

    pub fn with_transport(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            cache: ResponseCache::new(),
            notifier: Notifier::disabled(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Report failures through `notifier` instead of dropping them.
    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = notifier;
        self
    }

    /// Share an existing cache instead of starting with an empty one.
    pub fn with_cache(mut self, cache: ResponseCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ===== Request plumbing =====

    /// Send a request and decode the envelope. `data` may be absent.
    async fn send_envelope(&self, request: ApiRequest) -> Result<Option<Value>, ApiError> {
        let url = request.url.clone();
        let raw = self.transport.send(request).await?;
        let raw = check_response(raw)?;

        if raw.body.trim().is_empty() {
            return Ok(None);
        }
        let envelope: ApiResponse<Value> = serde_json::from_str(&raw.body)?;
        if !envelope.success {
            debug!(url = %url, message = ?envelope.message, "Envelope without success flag");
        }
        Ok(envelope.data)
    }

    /// Send a request whose envelope must carry `data`.
    async fn execute(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let url = request.url.clone();
        self.send_envelope(request)
            .await?
            .ok_or_else(|| ApiError::MalformedResponse(format!("no data in response from {}", url)))
    }

    /// GET through the response cache.
    ///
    /// The payload is decoded before it is stored, so a body that does not
    /// match `T` is reported as malformed and never cached.
    pub(super) async fn get_cached<T: DeserializeOwned>(
        &self,
        url: &str,
        ttl: Duration,
    ) -> Result<T, ApiError> {
        let data = self
            .cache
            .get_or_fetch(
                url,
                || async {
                    let data = self.execute(ApiRequest::get(url)).await?;
                    T::deserialize(&data)?;
                    Ok::<_, ApiError>(data)
                },
                ttl,
            )
            .await?;
        Ok(serde_json::from_value(data)?)
    }

    /// Write request that returns the affected record in `data`.
    pub(super) async fn send_json<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        url: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        let data = self.execute(ApiRequest::with_body(method, url, body)).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// Write request whose reply may or may not echo the record.
    pub(super) async fn send_json_optional<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        url: &str,
        body: &B,
    ) -> Result<Option<T>, ApiError> {
        let body = serde_json::to_value(body)?;
        match self.send_envelope(ApiRequest::with_body(method, url, body)).await? {
            Some(data) => Ok(Some(serde_json::from_value(data)?)),
            None => Ok(None),
        }
    }

    /// Request where only the status matters.
    pub(super) async fn send_no_content(&self, method: Method, url: &str) -> Result<(), ApiError> {
        let request = ApiRequest {
            method,
            url: url.to_string(),
            body: None,
        };
        let raw = self.transport.send(request).await?;
        check_response(raw)?;
        Ok(())
    }

    /// Surface a failure once to the user as "action: error", then hand it back.
    pub(super) fn report<T>(
        &self,
        action: &str,
        result: Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        if let Err(ref e) = result {
            warn!(action, error = %e, "API request failed");
            self.notifier.error(format!("{}: {}", action, e));
        }
        result
    }
}

fn check_response(raw: RawResponse) -> Result<RawResponse, ApiError> {
    if raw.is_success() {
        Ok(raw)
    } else {
        Err(ApiError::from_status(raw.status, &raw.body))
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use crate::api::{ApiError, ApiRequest, Method, RawResponse, Transport};

    pub const BASE: &str = "http://presence.test";

    /// In-memory server: canned replies per (method, url), and a request log.
    #[derive(Default)]
    pub struct FakeTransport {
        replies: Mutex<HashMap<(Method, String), RawResponse>>,
        log: Mutex<Vec<ApiRequest>>,
    }

    impl FakeTransport {
        pub fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        pub fn reply(&self, method: Method, path: &str, status: u16, body: Value) {
            let raw = RawResponse {
                status,
                body: body.to_string(),
            };
            self.replies
                .lock()
                .unwrap()
                .insert((method, format!("{}{}", BASE, path)), raw);
        }

        /// 200 with `{"success": true, "data": data}`.
        pub fn reply_data(&self, method: Method, path: &str, data: Value) {
            self.reply(method, path, 200, json!({ "success": true, "data": data }));
        }

        pub fn calls(&self, method: Method, path: &str) -> usize {
            let url = format!("{}{}", BASE, path);
            self.log
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.method == method && r.url == url)
                .count()
        }

        pub fn last_body(&self, method: Method, path: &str) -> Option<Value> {
            let url = format!("{}{}", BASE, path);
            self.log
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|r| r.method == method && r.url == url)
                .and_then(|r| r.body.clone())
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
            let key = (request.method, request.url.clone());
            self.log.lock().unwrap().push(request);
            Ok(self
                .replies
                .lock()
                .unwrap()
                .get(&key)
                .cloned()
                .unwrap_or(RawResponse {
                    status: 404,
                    body: "not found".to_string(),
                }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::{FakeTransport, BASE};
    use super::*;
    use crate::notify::NoticeLevel;
    use serde_json::json;

    #[tokio::test(start_paused = true)]
    async fn test_cached_read_skips_transport() {
        let fake = FakeTransport::new();
        fake.reply_data(Method::Get, "/api/employee/all", json!([{"id": "E-1", "name": "Asha"}]));
        let client = ApiClient::with_transport(BASE, fake.clone());

        let first = client.get_all_employees().await.unwrap();
        let second = client.get_all_employees().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(fake.calls(Method::Get, "/api/employee/all"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_data_is_malformed_and_not_cached() {
        let fake = FakeTransport::new();
        fake.reply(Method::Get, "/api/employee/all", 200, json!({"success": true}));
        let client = ApiClient::with_transport(BASE, fake.clone());

        let err = client.get_all_employees().await.unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse(_)));
        assert!(client.cache().is_empty());

        fake.reply(Method::Get, "/api/employee/all", 200, json!({"success": true, "data": null}));
        assert!(matches!(
            client.get_all_employees().await,
            Err(ApiError::MalformedResponse(_))
        ));
        assert_eq!(fake.calls(Method::Get, "/api/employee/all"), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wrong_payload_shape_is_not_cached() {
        let fake = FakeTransport::new();
        fake.reply_data(Method::Get, "/api/employee/all", json!({"not": "a list"}));
        let client = ApiClient::with_transport(BASE, fake.clone());

        assert!(matches!(
            client.get_all_employees().await,
            Err(ApiError::MalformedResponse(_))
        ));
        assert!(client.cache().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_http_error_is_notified_once() {
        let fake = FakeTransport::new();
        fake.reply(Method::Get, "/api/employee/all", 500, json!("boom"));
        let (notifier, mut notices) = Notifier::channel();
        let client = ApiClient::with_transport(BASE, fake.clone()).with_notifier(notifier);

        let err = client.get_all_employees().await.unwrap_err();
        assert_eq!(err.status(), Some(500));

        let notice = notices.try_recv().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.message.starts_with("Failed to fetch employees: "));
        assert!(notices.try_recv().is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::with_transport("http://x.test/", FakeTransport::new());
        assert_eq!(client.url("/api/config"), "http://x.test/api/config");
    }
}
