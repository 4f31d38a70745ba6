//! Reqwest-backed remote resource.
//!
//! Owns transport details only: request building, status mapping, and JSON
//! decoding into records. `GET` and `POST` both target the collection URL.

use super::RemoteResource;
use crate::error::RemoteError;
use async_trait::async_trait;
use log::debug;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode, Url};
use roster_config::RemoteConfig;
use roster_protocol::Record;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default `User-Agent` sent with every request.
const DEFAULT_USER_AGENT: &str = concat!("roster/", env!("CARGO_PKG_VERSION"));
/// Longest body excerpt carried in a status error.
const PREVIEW_CHAR_LIMIT: usize = 160;

/// Remote resource talking JSON over HTTP to a single collection URL.
#[derive(Debug, Clone)]
pub struct HttpRemoteResource {
    client: Client,
    endpoint: Url,
    user_agent: String,
}

impl HttpRemoteResource {
    /// Build a resource for `endpoint` with no request timeout.
    pub fn new(endpoint: Url) -> Result<Self, RemoteError> {
        Self::with_options(endpoint, None, DEFAULT_USER_AGENT.to_string())
    }

    /// Build a resource from the `remote` config block.
    pub fn from_config(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let endpoint = Url::parse(&config.base_url)
            .map_err(|err| RemoteError::InvalidEndpoint(format!("{}: {err}", config.base_url)))?;
        Self::with_options(
            endpoint,
            config.timeout_secs.map(Duration::from_secs),
            config
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        )
    }

    fn with_options(
        endpoint: Url,
        timeout: Option<Duration>,
        user_agent: String,
    ) -> Result<Self, RemoteError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(map_transport_error)?;
        Ok(Self {
            client,
            endpoint,
            user_agent,
        })
    }

    /// Collection URL used for every request.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
        what: &str,
    ) -> Result<T, RemoteError> {
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        serde_json::from_slice(body.as_ref())
            .map_err(|err| RemoteError::Decode(format!("invalid {what} payload: {err}")))
    }
}

#[async_trait]
impl RemoteResource for HttpRemoteResource {
    async fn fetch_all(&self) -> Result<Vec<Record>, RemoteError> {
        debug!("fetching records (endpoint={})", self.endpoint);
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(USER_AGENT, self.user_agent.as_str())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;
        Self::read_json(response, "record list").await
    }

    async fn persist(&self, record: &Record) -> Result<Record, RemoteError> {
        debug!("persisting record (endpoint={})", self.endpoint);
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(USER_AGENT, self.user_agent.as_str())
            .header(ACCEPT, "application/json")
            .json(record)
            .send()
            .await
            .map_err(map_transport_error)?;
        Self::read_json(response, "record").await
    }
}

fn map_transport_error(error: reqwest::Error) -> RemoteError {
    if error.is_timeout() {
        RemoteError::Timeout(error.to_string())
    } else {
        RemoteError::Transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RemoteError {
    RemoteError::Status {
        status: status.as_u16(),
        body: body_preview(body),
    }
}

/// Whitespace-compacted, length-capped excerpt of a response body.
fn body_preview(body: &[u8]) -> String {
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
