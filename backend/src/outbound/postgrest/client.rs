//! Reqwest-backed client for a PostgREST-compatible REST backend.
//!
//! The client owns transport details only: authentication headers, filter
//! query strings, timeout and status mapping, and JSON decoding. Table
//! semantics live in the repository adapters built on top of it.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, InvalidHeaderValue};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{REQUEST_ID_HEADER, TraceId};

const API_KEY_HEADER: &str = "apikey";
const PREFER_HEADER: &str = "prefer";
const RETURN_MINIMAL: &str = "return=minimal";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Failures raised while talking to the backend.
///
/// Repository adapters convert these into their port errors: anything that
/// suggests the backend is unreachable becomes a connection error, the rest
/// a query error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostgrestError {
    /// The request did not complete in time.
    #[error("request timed out: {message}")]
    Timeout { message: String },
    /// The request could not be sent or the response not read.
    #[error("transport failed: {message}")]
    Transport { message: String },
    /// The backend answered with a 5xx status.
    #[error("backend unavailable: {message}")]
    Unavailable { message: String },
    /// The backend rejected the request.
    #[error("backend rejected the request: {message}")]
    Rejected { status: u16, message: String },
    /// The response body did not match the expected rows.
    #[error("response decode failed: {message}")]
    Decode { message: String },
}

impl PostgrestError {
    /// Whether the failure points at the backend being unreachable.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Transport { .. } | Self::Unavailable { .. }
        )
    }
}

/// Errors raised while building a [`PostgrestClient`].
#[derive(Debug, thiserror::Error)]
pub enum PostgrestClientError {
    /// The API key cannot be sent as a header.
    #[error("backend API key is not a valid header value")]
    InvalidApiKey(#[source] InvalidHeaderValue),
    /// The base URL cannot carry table paths.
    #[error("backend URL `{0}` cannot be a base URL")]
    InvalidBaseUrl(Url),
    /// The underlying HTTP client failed to build.
    #[error("HTTP client construction failed")]
    Build(#[source] reqwest::Error),
}

/// A `column=op.value` filter.
///
/// # Examples
/// ```
/// use ward_ops::outbound::postgrest::Filter;
///
/// let filter = Filter::eq("staff_type", "nurse");
/// assert_eq!(filter.pair(), ("staff_type", "eq.nurse".to_owned()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    column: &'static str,
    expression: String,
}

impl Filter {
    /// Column equals `value`.
    pub fn eq(column: &'static str, value: impl AsRef<str>) -> Self {
        Self {
            column,
            expression: format!("eq.{}", value.as_ref()),
        }
    }

    /// Query-string pair for the filter.
    #[must_use]
    pub fn pair(&self) -> (&'static str, String) {
        (self.column, self.expression.clone())
    }
}

/// Ordering and window for a select.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Select {
    filters: Vec<Filter>,
    order: Option<String>,
    limit: Option<usize>,
}

impl Select {
    /// Every row of the table.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Add a filter.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Order by `column` descending.
    #[must_use]
    pub fn order_desc(mut self, column: &str) -> Self {
        self.order = Some(format!("{column}.desc"));
        self
    }

    /// Order by `column` ascending.
    #[must_use]
    pub fn order_asc(mut self, column: &str) -> Self {
        self.order = Some(format!("{column}.asc"));
        self
    }

    /// Return at most `limit` rows.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("select", "*".to_owned())];
        pairs.extend(self.filters.iter().map(Filter::pair));
        if let Some(order) = &self.order {
            pairs.push(("order", order.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

/// Shared HTTP client bound to one backend.
#[derive(Debug, Clone)]
pub struct PostgrestClient {
    client: Client,
    base_url: Url,
}

impl PostgrestClient {
    /// Build a client sending `api_key` both as `apikey` and as a bearer token.
    ///
    /// The header values are marked sensitive so they never appear in debug
    /// output.
    ///
    /// # Errors
    ///
    /// Returns [`PostgrestClientError`] when the key is not a valid header
    /// value, the URL cannot be a base, or the client fails to build.
    pub fn new(base_url: Url, api_key: &str, timeout: Duration) -> Result<Self, PostgrestClientError> {
        if base_url.cannot_be_a_base() {
            return Err(PostgrestClientError::InvalidBaseUrl(base_url));
        }
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(api_key).map_err(PostgrestClientError::InvalidApiKey)?;
        key.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(PostgrestClientError::InvalidApiKey)?;
        bearer.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(PostgrestClientError::Build)?;
        Ok(Self {
            client,
            base_url: with_trailing_slash(base_url),
        })
    }

    /// Rows matching `select`.
    ///
    /// # Errors
    ///
    /// Returns [`PostgrestError`] on transport, status or decode failures.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        select: &Select,
    ) -> Result<Vec<T>, PostgrestError> {
        let request = self.request(Method::GET, table)?.query(&select.query());
        let body = send(request, table).await?;
        decode_rows(&body)
    }

    /// Insert one row, discarding the representation.
    ///
    /// # Errors
    ///
    /// Returns [`PostgrestError`] on transport or status failures.
    pub async fn insert<B: Serialize + Sync>(&self, table: &str, row: &B) -> Result<(), PostgrestError> {
        let request = self
            .request(Method::POST, table)?
            .header(PREFER_HEADER, RETURN_MINIMAL)
            .json(row);
        send(request, table).await.map(drop)
    }

    /// Insert one row and return the stored rows.
    ///
    /// # Errors
    ///
    /// Returns [`PostgrestError`] on transport, status or decode failures.
    pub async fn insert_returning<B, T>(&self, table: &str, row: &B) -> Result<Vec<T>, PostgrestError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let request = self
            .request(Method::POST, table)?
            .header(PREFER_HEADER, RETURN_REPRESENTATION)
            .json(row);
        let body = send(request, table).await?;
        decode_rows(&body)
    }

    /// Patch rows matching `filters` and return them.
    ///
    /// # Errors
    ///
    /// Returns [`PostgrestError`] on transport, status or decode failures.
    pub async fn update_returning<B, T>(
        &self,
        table: &str,
        filters: &[Filter],
        patch: &B,
    ) -> Result<Vec<T>, PostgrestError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let request = self
            .request(Method::PATCH, table)?
            .query(&filter_pairs(filters))
            .header(PREFER_HEADER, RETURN_REPRESENTATION)
            .json(patch);
        let body = send(request, table).await?;
        decode_rows(&body)
    }

    /// Delete rows matching `filters`.
    ///
    /// # Errors
    ///
    /// Returns [`PostgrestError`] on transport or status failures.
    pub async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), PostgrestError> {
        let request = self
            .request(Method::DELETE, table)?
            .query(&filter_pairs(filters))
            .header(PREFER_HEADER, RETURN_MINIMAL);
        send(request, table).await.map(drop)
    }

    /// Delete rows matching `filters` and return them.
    ///
    /// # Errors
    ///
    /// Returns [`PostgrestError`] on transport, status or decode failures.
    pub async fn delete_returning<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[Filter],
    ) -> Result<Vec<T>, PostgrestError> {
        let request = self
            .request(Method::DELETE, table)?
            .query(&filter_pairs(filters))
            .header(PREFER_HEADER, RETURN_REPRESENTATION);
        let body = send(request, table).await?;
        decode_rows(&body)
    }

    fn request(&self, method: Method, table: &str) -> Result<RequestBuilder, PostgrestError> {
        let url = table_url(&self.base_url, table)?;
        Ok(self.client.request(method, url))
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn table_url(base_url: &Url, table: &str) -> Result<Url, PostgrestError> {
    base_url
        .join(table)
        .map_err(|err| PostgrestError::Rejected {
            status: 0,
            message: format!("invalid table path `{table}`: {err}"),
        })
}

fn filter_pairs(filters: &[Filter]) -> Vec<(&'static str, String)> {
    filters.iter().map(Filter::pair).collect()
}

/// Forward the current request's trace id so backend logs can be correlated.
fn with_trace_id(request: RequestBuilder) -> RequestBuilder {
    match TraceId::current_string() {
        Some(id) => request.header(REQUEST_ID_HEADER, id),
        None => request,
    }
}

async fn send(request: RequestBuilder, table: &str) -> Result<Vec<u8>, PostgrestError> {
    let response = with_trace_id(request)
        .send()
        .await
        .map_err(map_transport_error)?;
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    debug!(table, status = status.as_u16(), bytes = body.len(), "backend responded");
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    Ok(body.to_vec())
}

fn decode_rows<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>, PostgrestError> {
    serde_json::from_slice(body).map_err(|err| PostgrestError::Decode {
        message: err.to_string(),
    })
}

fn map_transport_error(error: reqwest::Error) -> PostgrestError {
    if error.is_timeout() {
        PostgrestError::Timeout {
            message: error.to_string(),
        }
    } else {
        PostgrestError::Transport {
            message: error.to_string(),
        }
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> PostgrestError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            PostgrestError::Timeout { message }
        }
        _ if status.is_server_error() => PostgrestError::Unavailable { message },
        _ => PostgrestError::Rejected {
            status: status.as_u16(),
            message,
        },
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
