// SPDX-License-Identifier: MPL-2.0

//! Data sources supplying cascade records.
//!
//! Two stock implementations cover the common cases: [`StaticSource`] wraps
//! an in-memory collection and [`RemoteSource`] fetches a JSON array per
//! parent key over HTTP. [`CascadeSource`] picks between them from the
//! configuration. Callers needing error visibility beyond the log channel
//! can implement [`DataSource`] themselves and wrap a stock source.

use std::future::Future;
use std::time::Duration;

use crate::config::CascadeConfig;
use crate::record::Record;

/// Errors produced while fetching records.
#[derive(Debug, Clone)]
pub enum SourceError {
    /// The request could not be issued or the transport failed mid-flight.
    ConnectionFailed(String),
    /// The server answered with a non-success status.
    RequestFailed(String),
    /// The request did not complete within the configured timeout.
    TimedOut,
    /// The response body was not a JSON array of records.
    InvalidResponse(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            SourceError::RequestFailed(msg) => write!(f, "Request failed: {}", msg),
            SourceError::TimedOut => write!(f, "Request timed out"),
            SourceError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for SourceError {}

/// Supplies the raw candidate records for one parent key.
///
/// Implementations return the material the cache layer then filters down to
/// the actual children, so a static source may simply hand back its whole
/// collection on every call.
pub trait DataSource {
    /// Fetches candidate records for `parent_key`.
    fn fetch(
        &self,
        parent_key: &str,
    ) -> impl Future<Output = Result<Vec<Record>, SourceError>> + Send;
}

/// In-memory source: the whole dataset is configured up front.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<Record>,
}

impl StaticSource {
    /// Creates a static source over `records`.
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl DataSource for StaticSource {
    /// Returns the entire collection regardless of `parent_key`.
    async fn fetch(&self, _parent_key: &str) -> Result<Vec<Record>, SourceError> {
        Ok(self.records.clone())
    }
}

/// HTTP source: one GET per parent key, parent passed as a query parameter.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    client: reqwest::Client,
    url: String,
    parent_field: String,
    timeout: Duration,
}

impl RemoteSource {
    /// Creates a remote source for `url`.
    ///
    /// Every fetch appends `parent_field=<key>` to the URL, reusing the
    /// query separator the URL already carries.
    pub fn new(
        url: impl Into<String>,
        parent_field: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| SourceError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
            parent_field: parent_field.into(),
            timeout,
        })
    }

    /// Builds the request URL for one parent key.
    fn child_url(&self, parent_key: &str) -> String {
        let joiner = if self.url.ends_with('?') || self.url.ends_with('&') {
            ""
        } else if self.url.contains('?') {
            "&"
        } else {
            "?"
        };
        format!("{}{}{}={}", self.url, joiner, self.parent_field, parent_key)
    }

    async fn request(&self, url: &str) -> Result<Vec<Record>, SourceError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        // 304 counts as success; its empty body then fails the parse and
        // degrades to an empty level like any malformed payload.
        if !(status.is_success() || status == reqwest::StatusCode::NOT_MODIFIED) {
            return Err(SourceError::RequestFailed(format!(
                "server returned status: {}",
                status
            )));
        }

        response
            .json::<Vec<Record>>()
            .await
            .map_err(|e| SourceError::InvalidResponse(e.to_string()))
    }
}

impl DataSource for RemoteSource {
    async fn fetch(&self, parent_key: &str) -> Result<Vec<Record>, SourceError> {
        let url = self.child_url(parent_key);
        match tokio::time::timeout(self.timeout, self.request(&url)).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::TimedOut),
        }
    }
}

/// Config-driven source: remote when a URL is configured, static otherwise.
///
/// A configured `url` takes precedence over inline `data`.
#[derive(Debug, Clone)]
pub enum CascadeSource {
    /// Backed by the configured in-memory dataset.
    Static(StaticSource),
    /// Backed by the configured endpoint.
    Remote(RemoteSource),
}

impl CascadeSource {
    /// Builds the source a configuration asks for.
    pub fn from_config(config: &CascadeConfig) -> Result<Self, SourceError> {
        match config.url.as_deref() {
            Some(url) if !url.is_empty() => Ok(Self::Remote(RemoteSource::new(
                url,
                config.parent_field.clone(),
                config.fetch_timeout,
            )?)),
            _ => Ok(Self::Static(StaticSource::new(config.data.clone()))),
        }
    }
}

impl DataSource for CascadeSource {
    async fn fetch(&self, parent_key: &str) -> Result<Vec<Record>, SourceError> {
        match self {
            Self::Static(source) => source.fetch(parent_key).await,
            Self::Remote(source) => source.fetch(parent_key).await,
        }
    }
}
