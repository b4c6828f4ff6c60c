use crate::adapters::{FileTokenStore, NoToken, TracingDiagnostics};
use crate::domain::ports::{ConfigProvider, Diagnostics, FailureRecord, TokenStore};
use crate::utils::error::{DashboardError, Result, ServiceError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Configured request issuer shared by every service call: base URL,
/// default headers, bearer-token injection and error normalization.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token_store: Arc<dyn TokenStore>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl ApiClient {
    /// Builds the client from resolved settings. The token is read from the
    /// configured token file; with no token file, requests go out unauthenticated.
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in config.default_headers() {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                DashboardError::InvalidConfigValueError {
                    field: "api.headers".to_string(),
                    value: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                DashboardError::InvalidConfigValueError {
                    field: format!("api.headers.{}", name),
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
            headers.insert(header_name, header_value);
        }

        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent())
            .default_headers(headers)
            .build()?;

        let token_store: Arc<dyn TokenStore> = if config.token_file().is_empty() {
            Arc::new(NoToken)
        } else {
            Arc::new(FileTokenStore::new(config.token_file()))
        };

        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            token_store,
            diagnostics: Arc::new(TracingDiagnostics),
        })
    }

    pub fn with_token_store(mut self, store: impl TokenStore + 'static) -> Self {
        self.token_store = Arc::new(store);
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: impl Diagnostics + 'static) -> Self {
        self.diagnostics = Arc::new(diagnostics);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token_store(&self) -> &dyn TokenStore {
        self.token_store.as_ref()
    }

    pub(crate) fn diagnostics(&self) -> &dyn Diagnostics {
        self.diagnostics.as_ref()
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Issues one GET against `endpoint` and decodes the body as `T`.
    ///
    /// Every failure is reported once to the diagnostics channel with the
    /// status, body and underlying message, then replaced by a
    /// [`ServiceError`]: the shared auth message for 401, `failure_message`
    /// for everything else.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        failure_message: &str,
    ) -> Result<T> {
        let url = self.endpoint_url(endpoint);
        let mut request = self.client.get(&url);

        match self.token_store.load().await {
            Ok(Some(token)) => request = request.bearer_auth(token),
            Ok(None) => {}
            Err(e) => {
                self.report(endpoint, None, None, format!("Token store unreadable: {}", e));
                return Err(ServiceError::credentials_unreadable(failure_message).into());
            }
        }

        tracing::debug!("GET {}", url);
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                return Err(self.fail(endpoint, None, None, e.to_string(), false, failure_message))
            }
        };

        let status = response.status();
        tracing::debug!("GET {} -> {}", url, status);

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Err(self.fail(
                    endpoint,
                    Some(status.as_u16()),
                    None,
                    e.to_string(),
                    false,
                    failure_message,
                ))
            }
        };

        if !status.is_success() {
            return Err(self.fail(
                endpoint,
                Some(status.as_u16()),
                Some(body),
                format!("HTTP {}", status),
                false,
                failure_message,
            ));
        }

        match serde_json::from_str::<T>(&body) {
            Ok(value) => Ok(value),
            Err(e) => Err(self.fail(
                endpoint,
                Some(status.as_u16()),
                Some(body),
                format!("Malformed response body: {}", e),
                true,
                failure_message,
            )),
        }
    }

    fn fail(
        &self,
        endpoint: &str,
        status: Option<u16>,
        body: Option<String>,
        message: String,
        decode_failed: bool,
        failure_message: &str,
    ) -> DashboardError {
        self.report(endpoint, status, body, message);
        ServiceError::classify(status, decode_failed, failure_message).into()
    }

    fn report(&self, endpoint: &str, status: Option<u16>, body: Option<String>, message: String) {
        self.diagnostics.request_failed(&FailureRecord {
            endpoint: endpoint.to_string(),
            status,
            body,
            message,
        });
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{CollectingDiagnostics, MemoryTokenStore};
    use crate::config::ApiSettings;
    use crate::utils::error::ServiceErrorKind;
    use httpmock::prelude::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Ping {
        ok: bool,
    }

    fn client_for(server: &MockServer) -> (ApiClient, CollectingDiagnostics) {
        let diagnostics = CollectingDiagnostics::default();
        let client = ApiClient::new(&ApiSettings::new(server.base_url()))
            .unwrap()
            .with_diagnostics(diagnostics.clone());
        (client, diagnostics)
    }

    #[test]
    fn endpoint_url_joins_slashes() {
        let client = ApiClient::new(&ApiSettings::new("http://api.test/v1/")).unwrap();
        assert_eq!(client.endpoint_url("/dashboard/stats/"), "http://api.test/v1/dashboard/stats/");
        assert_eq!(client.endpoint_url("revenue/monthly/"), "http://api.test/v1/revenue/monthly/");
    }

    #[test]
    fn invalid_default_header_is_a_config_error() {
        let mut settings = ApiSettings::new("http://api.test");
        settings
            .default_headers
            .insert("Bad Header".to_string(), "x".to_string());

        let err = ApiClient::new(&settings).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidConfigValueError { .. }));
    }

    #[tokio::test]
    async fn success_decodes_body_without_diagnostics() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/ping/");
            then.status(200).json_body(serde_json::json!({"ok": true}));
        });

        let (client, diagnostics) = client_for(&server);
        let ping: Ping = client.fetch_json("/ping/", "Ping failed").await.unwrap();

        mock.assert();
        assert_eq!(ping, Ping { ok: true });
        assert!(diagnostics.failures().is_empty());
    }

    #[tokio::test]
    async fn server_error_records_status_and_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/ping/");
            then.status(502).body("upstream down");
        });

        let (client, diagnostics) = client_for(&server);
        let err = client.fetch_json::<Ping>("/ping/", "Ping failed").await.unwrap_err();

        let service = err.as_service().unwrap();
        assert_eq!(service.kind, ServiceErrorKind::Server);
        assert_eq!(service.status, Some(502));
        assert_eq!(service.message, "Ping failed");

        let failures = diagnostics.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].endpoint, "/ping/");
        assert_eq!(failures[0].status, Some(502));
        assert_eq!(failures[0].body.as_deref(), Some("upstream down"));
    }

    #[tokio::test]
    async fn default_headers_and_token_are_sent() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/ping/")
                .header("accept-language", "uz")
                .header("authorization", "Bearer secret");
            then.status(200).json_body(serde_json::json!({"ok": true}));
        });

        let mut settings = ApiSettings::new(server.base_url());
        settings
            .default_headers
            .insert("Accept-Language".to_string(), "uz".to_string());
        let client = ApiClient::new(&settings)
            .unwrap()
            .with_token_store(MemoryTokenStore::with_token("secret"));

        let _: Ping = client.fetch_json("/ping/", "Ping failed").await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn no_token_means_no_authorization_header() {
        let server = MockServer::start();
        let with_auth = server.mock(|when, then| {
            when.method(GET).path("/ping/").header_exists("authorization");
            then.status(401);
        });
        let without_auth = server.mock(|when, then| {
            when.method(GET).path("/ping/");
            then.status(200).json_body(serde_json::json!({"ok": true}));
        });

        let (client, _) = client_for(&server);
        let _: Ping = client.fetch_json("/ping/", "Ping failed").await.unwrap();

        with_auth.assert_hits(0);
        without_auth.assert();
    }

    struct BrokenStore;

    #[async_trait::async_trait]
    impl TokenStore for BrokenStore {
        async fn load(&self) -> Result<Option<String>> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "locked").into())
        }

        async fn save(&self, _token: &str) -> Result<()> {
            Ok(())
        }

        async fn clear(&self) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn unreadable_token_store_is_reported_and_sends_nothing() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/ping/");
            then.status(200).json_body(serde_json::json!({"ok": true}));
        });

        let (client, diagnostics) = client_for(&server);
        let client = client.with_token_store(BrokenStore);
        let err = client.fetch_json::<Ping>("/ping/", "Ping failed").await.unwrap_err();

        mock.assert_hits(0);
        assert_eq!(err.to_string(), "Ping failed");
        let service = err.as_service().unwrap();
        assert_eq!(service.kind, ServiceErrorKind::Credentials);
        assert_eq!(service.status, None);

        let failures = diagnostics.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].endpoint, "/ping/");
        assert!(failures[0].message.contains("locked"));
    }

    #[tokio::test]
    async fn truncated_success_body_is_not_a_decode_failure() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            // promise 100 bytes, send a few, hang up
            let _ = socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n{\"ok\"")
                .await;
            let _ = socket.shutdown().await;
        });

        let diagnostics = CollectingDiagnostics::default();
        let client = ApiClient::new(&ApiSettings::new(format!("http://{}", addr)))
            .unwrap()
            .with_diagnostics(diagnostics.clone());
        let err = client.fetch_json::<Ping>("/ping/", "Ping failed").await.unwrap_err();

        let service = err.as_service().unwrap();
        assert_eq!(service.kind, ServiceErrorKind::Server);
        assert_eq!(service.status, Some(200));
        assert_eq!(service.message, "Ping failed");
        assert_eq!(diagnostics.failures().len(), 1);
        assert_eq!(diagnostics.failures()[0].body, None);
    }
}
