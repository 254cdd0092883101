//! Request building, dispatch, and response processing.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use tracing::{debug, warn};
use url::Url;

use crate::auth::DEFAULT_SCHEME;
use crate::body::RequestBody;
use crate::config::ClientConfig;
use crate::decode::DecodePayload;
use crate::envelope::{collect_headers, Envelope};
use crate::error::Failure;
use crate::DEFAULT_ACCEPT;

/// Header names the builder owns; callers may not set them directly.
const MANAGED_HEADERS: [&str; 3] = ["accept", "authorization", "content-type"];

/// Per-call request parameters.
///
/// Everything is optional; `CallOptions::default()` is a plain unauthenticated
/// JSON call. Headers and query pairs keep their insertion order.
#[derive(Debug, Clone)]
pub struct CallOptions {
    /// Authorization scheme name, resolved through the client's registry.
    pub auth_scheme: String,
    /// Access token; when non-empty, an `Authorization` header is attached.
    pub access_token: Option<String>,
    /// Extra request headers as ordered name/value pairs.
    ///
    /// Names must be unique (case-insensitive) and must not collide with the
    /// builder-managed `accept`, `authorization`, or `content-type` headers;
    /// violations fail the call before anything is dispatched.
    pub headers: Vec<(String, String)>,
    /// Query parameters appended to the URL, URL-encoded, in order.
    pub query: Vec<(String, String)>,
    /// `Accept` media type; defaults to `application/json`.
    pub accept: Option<String>,
    /// Per-call deadline overriding the configured default timeout.
    pub deadline: Option<Duration>,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            auth_scheme: DEFAULT_SCHEME.to_owned(),
            access_token: None,
            headers: Vec::new(),
            query: Vec::new(),
            accept: None,
            deadline: None,
        }
    }
}

impl CallOptions {
    /// Select an authorization scheme by name.
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.auth_scheme = scheme.into();
        self
    }

    /// Attach an access token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Add a request header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Override the `Accept` media type.
    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    /// Bound this call with a deadline.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Typed HTTP client returning uniform [`Envelope`] results.
///
/// One shared transport backs every call; the client is cheap to clone.
///
/// # Examples
///
/// ```rust,no_run
/// use courier::{CallOptions, Client, Json};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Widget { id: u64 }
///
/// # async fn example() -> Result<(), courier::Failure> {
/// let client = Client::new()?;
/// let call = CallOptions::default().with_token("tok123");
/// let response = client
///     .get::<Json<Widget>>("https://api.example.com/widgets/1", &call)
///     .await;
/// assert!(response.success || response.failure.is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    transport: Arc<reqwest::Client>,
    config: ClientConfig,
}

impl Client {
    /// Create a client with default configuration.
    pub fn new() -> Result<Self, Failure> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self, Failure> {
        let transport = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .build()
            .map_err(|err| Failure::build(format!("transport construction failed: {err}")))?;

        Ok(Self {
            transport: Arc::new(transport),
            config,
        })
    }

    /// The underlying transport, for assembling fully custom requests to
    /// pass to [`Client::send_raw`].
    pub fn transport(&self) -> &reqwest::Client {
        &self.transport
    }

    /// Issue a GET request.
    pub async fn get<D: DecodePayload>(&self, url: &str, call: &CallOptions) -> Envelope<D> {
        self.dispatch(Method::GET, url, None, call).await
    }

    /// Issue a DELETE request.
    pub async fn delete<D: DecodePayload>(&self, url: &str, call: &CallOptions) -> Envelope<D> {
        self.dispatch(Method::DELETE, url, None, call).await
    }

    /// Issue a POST request with a body.
    pub async fn post<D: DecodePayload>(
        &self,
        url: &str,
        body: RequestBody,
        call: &CallOptions,
    ) -> Envelope<D> {
        self.dispatch(Method::POST, url, Some(body), call).await
    }

    /// Issue a PUT request with a body.
    pub async fn put<D: DecodePayload>(
        &self,
        url: &str,
        body: RequestBody,
        call: &CallOptions,
    ) -> Envelope<D> {
        self.dispatch(Method::PUT, url, Some(body), call).await
    }

    /// Issue a PATCH request with a body.
    pub async fn patch<D: DecodePayload>(
        &self,
        url: &str,
        body: RequestBody,
        call: &CallOptions,
    ) -> Envelope<D> {
        self.dispatch(Method::PATCH, url, Some(body), call).await
    }

    /// Dispatch a pre-built request as-is, bypassing the builder.
    ///
    /// The response still flows through the ordinary decode path, so the
    /// result is the same envelope shape as every other call.
    pub async fn send_raw<D: DecodePayload>(&self, request: reqwest::Request) -> Envelope<D> {
        self.execute(request).await
    }

    async fn dispatch<D: DecodePayload>(
        &self,
        method: Method,
        url: &str,
        body: Option<RequestBody>,
        call: &CallOptions,
    ) -> Envelope<D> {
        let request = match self.build_request(method, url, body, call) {
            Ok(request) => request,
            Err(failure) => return Envelope::failed(failure),
        };
        self.execute(request).await
    }

    async fn execute<D: DecodePayload>(&self, request: reqwest::Request) -> Envelope<D> {
        debug!(method = %request.method(), url = %request.url(), "dispatching request");
        match self.transport.execute(request).await {
            Ok(response) => process(response).await,
            Err(err) => Envelope::failed(Failure::from_send_error(err)),
        }
    }

    fn build_request(
        &self,
        method: Method,
        url: &str,
        body: Option<RequestBody>,
        call: &CallOptions,
    ) -> Result<reqwest::Request, Failure> {
        let url = append_query(url, &call.query)?;
        let mut request = reqwest::Request::new(method, url);
        let headers = request.headers_mut();

        let accept = call.accept.as_deref().unwrap_or(DEFAULT_ACCEPT);
        headers.insert(
            ACCEPT,
            HeaderValue::from_str(accept)
                .map_err(|err| Failure::build(format!("invalid accept value {accept}: {err}")))?,
        );

        apply_caller_headers(headers, &call.headers)?;

        if let Some(token) = call.access_token.as_deref().filter(|token| !token.is_empty()) {
            let value = self.config.schemes.header_value(&call.auth_scheme, token)?;
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&value)
                    .map_err(|err| Failure::build(format!("invalid access token: {err}")))?,
            );
        }

        if let Some(body) = body {
            let (content_type, data) = body.into_parts();
            headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_str(&content_type).map_err(|err| {
                    Failure::build(format!("invalid content type {content_type}: {err}"))
                })?,
            );
            *request.body_mut() = Some(data.into());
        }

        if let Some(deadline) = call.deadline {
            *request.timeout_mut() = Some(deadline);
        }

        Ok(request)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new().expect("default transport configuration is valid")
    }
}

/// Decode a raw transport response into an envelope.
async fn process<D: DecodePayload>(response: reqwest::Response) -> Envelope<D> {
    let status = response.status();
    let headers = collect_headers(response.headers());
    debug!(status = %status, "response received");

    if !status.is_success() {
        let raw_body = response.bytes().await.ok();
        return Envelope::rejected(status, headers, raw_body);
    }

    match D::decode(response).await {
        Ok(payload) => Envelope::ok(status, headers, payload),
        Err(err) => {
            warn!(status = %status, failure = %err.failure, "response decode failed");
            Envelope::undecodable(status, headers, err.raw_body, err.failure)
        }
    }
}

fn append_query(raw: &str, query: &[(String, String)]) -> Result<Url, Failure> {
    let mut url =
        Url::parse(raw).map_err(|err| Failure::build(format!("invalid url {raw}: {err}")))?;
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

fn apply_caller_headers(
    target: &mut HeaderMap,
    headers: &[(String, String)],
) -> Result<(), Failure> {
    let mut seen = HashSet::with_capacity(headers.len());
    for (name, value) in headers {
        let lower = name.to_ascii_lowercase();
        if MANAGED_HEADERS.contains(&lower.as_str()) {
            return Err(Failure::build(format!(
                "header {name} is managed by the client"
            )));
        }
        if !seen.insert(lower) {
            return Err(Failure::build(format!("duplicate header key: {name}")));
        }

        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|err| Failure::build(format!("invalid header name {name}: {err}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|err| Failure::build(format!("invalid value for header {name}: {err}")))?;
        target.insert(header_name, header_value);
    }
    Ok(())
}
