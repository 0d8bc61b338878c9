//! reqwest-backed transport for the VSD REST API

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use serde_json::Value;
use url::Url;

use super::DEFAULT_PAGE_SIZE;
use super::InvokeRequest;
use super::Transport;
use super::TransportResponse;
use crate::error::TransportError;
use crate::error::VsdErrorDetail;
use crate::model::EntityRef;

/// Request header: organization the credentials belong to.
pub const ORGANIZATION_HEADER: &str = "X-Nuage-Organization";
/// Request header: zero-based page index.
pub const PAGE_REQUEST_HEADER: &str = "X-Nuage-Page";
/// Request header: page size.
pub const PAGE_SIZE_HEADER: &str = "X-Nuage-PageSize";
/// Request header: filter expression.
pub const FILTER_HEADER: &str = "X-Nuage-Filter";
/// Request header: order-by expression.
pub const ORDER_BY_HEADER: &str = "X-Nuage-OrderBy";
/// Request header: user to act on behalf of.
pub const PROXY_USER_HEADER: &str = "X-Nuage-ProxyUser";

/// Username, password (or API key) and organization for VSD requests.
#[derive(Clone)]
pub struct Credentials {
    /// Login name.
    pub username: String,
    /// Password or API key.
    pub password: String,
    /// Enterprise the user logs into (e.g. "csp").
    pub organization: String,
}

impl Credentials {
    /// Creates a credential set.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        organization: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            organization: organization.into(),
        }
    }

    /// Returns the `Authorization` header value (`XREST <base64(user:password)>`).
    pub fn authorization(&self) -> String {
        let raw = format!("{}:{}", self.username, self.password);
        format!("XREST {}", STANDARD.encode(raw))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("organization", &self.organization)
            .finish()
    }
}

/// [`Transport`] over HTTP using `reqwest`.
///
/// This transport is cheap to clone (uses `Arc` internally) and can be
/// shared across threads safely.
///
/// # Example
///
/// ```ignore
/// use vsd_lib::transport::{Credentials, HttpTransport};
///
/// let transport = HttpTransport::builder()
///     .url("https://vsd.example.com:8443")
///     .credentials(Credentials::new("csproot", "csproot", "csp"))
///     .page_size(100)
///     .build()?;
/// ```
#[derive(Clone)]
pub struct HttpTransport {
    inner: Arc<HttpTransportInner>,
}

struct HttpTransportInner {
    base_url: String,
    api_version: String,
    credentials: Credentials,
    page_size: u32,
    http_client: Client,
    timeout: Option<Duration>,
    connected: AtomicBool,
}

impl HttpTransport {
    /// Creates a new builder for constructing a transport.
    pub fn builder() -> HttpTransportBuilder<Missing, Missing> {
        HttpTransportBuilder::new()
    }

    /// Returns the base URL of the VSD endpoint.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns the API version being used.
    pub fn api_version(&self) -> &str {
        &self.inner.api_version
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn build_url(
        &self,
        target: &EntityRef,
        route_suffix: Option<&str>,
        parent: &EntityRef,
    ) -> Result<String, TransportError> {
        let mut url = Url::parse(&self.inner.base_url)
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", self.inner.base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| TransportError::InvalidUrl(self.inner.base_url.clone()))?
            .pop_if_empty()
            .extend(["nuage", "api", self.inner.api_version.as_str()])
            .extend(parent.segments())
            .extend(target.segments())
            .extend(route_suffix.filter(|s| !s.is_empty()));

        Ok(url.into())
    }

    fn compute_headers(
        &self,
        page: u32,
        filter: Option<&str>,
        order_by: Option<&str>,
        proxy_user: Option<&str>,
        page_size: u32,
    ) -> Result<HeaderMap, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));

        headers.insert(
            "Authorization",
            header_value("Authorization", &self.inner.credentials.authorization())?,
        );
        headers.insert(
            ORGANIZATION_HEADER,
            header_value(ORGANIZATION_HEADER, &self.inner.credentials.organization)?,
        );
        headers.insert(PAGE_REQUEST_HEADER, HeaderValue::from(page));
        headers.insert(PAGE_SIZE_HEADER, HeaderValue::from(page_size));

        if let Some(filter) = filter.filter(|f| !f.is_empty()) {
            headers.insert(FILTER_HEADER, header_value(FILTER_HEADER, filter)?);
        }
        if let Some(order_by) = order_by.filter(|o| !o.is_empty()) {
            headers.insert(ORDER_BY_HEADER, header_value(ORDER_BY_HEADER, order_by)?);
        }
        if let Some(proxy_user) = proxy_user {
            headers.insert(PROXY_USER_HEADER, header_value(PROXY_USER_HEADER, proxy_user)?);
        }

        Ok(headers)
    }

    async fn invoke_request(
        &self,
        request: InvokeRequest,
    ) -> Result<TransportResponse, TransportError> {
        let mut builder = self
            .inner
            .http_client
            .request(request.verb, &request.url)
            .headers(request.headers);

        if let Some(timeout) = self.inner.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                let error = TransportError::from(e);
                if error.is_connection_failure() {
                    self.inner.connected.store(false, Ordering::Relaxed);
                }
                return Err(error);
            }
        };
        self.inner.connected.store(true, Ordering::Relaxed);

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<VsdErrorDetail>(&body) {
                Ok(detail) if !detail.errors.is_empty() => {
                    TransportError::http_with_detail(status.as_u16(), detail)
                }
                _ => TransportError::http(status.as_u16(), body),
            });
        }

        Ok(TransportResponse {
            headers,
            data: parse_rows(&body)?,
        })
    }

    fn page_size(&self) -> u32 {
        self.inner.page_size
    }

    fn is_connected(&self) -> bool {
        self.inner.connected.load(Ordering::Relaxed)
    }
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, TransportError> {
    HeaderValue::from_str(value).map_err(|_| TransportError::InvalidHeader {
        name,
        value: value.to_string(),
    })
}

/// Decodes a response body into rows. VSD answers an empty page with an
/// empty body.
fn parse_rows(body: &str) -> Result<Vec<Value>, TransportError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str(body) {
        Ok(Value::Array(rows)) => Ok(rows),
        Ok(Value::Null) => Ok(Vec::new()),
        Ok(_) => Err(TransportError::parse_with_body("expected a JSON array", body)),
        Err(e) => Err(TransportError::parse_with_body(e.to_string(), body)),
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`HttpTransport`].
///
/// Uses the typestate pattern to ensure required fields are set at compile time.
///
/// # Required Fields
///
/// - `url` - The VSD endpoint URL
/// - `credentials` - Username, password and organization
pub struct HttpTransportBuilder<U, C> {
    url: U,
    credentials: C,
    api_version: String,
    page_size: u32,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl HttpTransportBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            credentials: Missing,
            api_version: "v6".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }
}

impl Default for HttpTransportBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> HttpTransportBuilder<Missing, C> {
    /// Sets the VSD endpoint URL (e.g. `https://vsd.example.com:8443`).
    pub fn url(self, url: impl Into<String>) -> HttpTransportBuilder<Set<String>, C> {
        HttpTransportBuilder {
            url: Set(url.into()),
            credentials: self.credentials,
            api_version: self.api_version,
            page_size: self.page_size,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U> HttpTransportBuilder<U, Missing> {
    /// Sets the credentials used to authenticate every request.
    pub fn credentials(
        self,
        credentials: Credentials,
    ) -> HttpTransportBuilder<U, Set<Credentials>> {
        HttpTransportBuilder {
            url: self.url,
            credentials: Set(credentials),
            api_version: self.api_version,
            page_size: self.page_size,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U, C> HttpTransportBuilder<U, C> {
    /// Sets the API version to use.
    ///
    /// Defaults to `v6`.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Sets the default page size.
    ///
    /// Defaults to [`DEFAULT_PAGE_SIZE`].
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl HttpTransportBuilder<Set<String>, Set<Credentials>> {
    /// Builds the [`HttpTransport`].
    ///
    /// Fails only if the default HTTP client cannot be created.
    pub fn build(self) -> Result<HttpTransport, TransportError> {
        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(HttpTransport {
            inner: Arc::new(HttpTransportInner {
                base_url: self.url.0,
                api_version: self.api_version,
                credentials: self.credentials.0,
                page_size: self.page_size,
                http_client,
                timeout: self.timeout,
                connected: AtomicBool::new(false),
            }),
        })
    }
}
