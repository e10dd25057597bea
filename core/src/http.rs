//! HTTP request/response as plain data, and the transport that moves them.
//!
//! # Design
//! `AccountsClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network. Only a `Transport` performs I/O,
//! so the request/response logic stays deterministic and a test can swap
//! in a canned transport.
//!
//! `UreqTransport` is the default. Its agent returns 4xx/5xx responses as
//! data so status interpretation stays with `error::check_status`, and it
//! reads bodies of any size.

use std::fmt;
use std::time::Duration;

use crate::error::TransportError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        })
    }
}

/// An HTTP request described as plain data. `url` is absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

/// A fully read HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Executes one request and returns the complete response.
///
/// Implementations must return any status code as `Ok` and reserve `Err`
/// for failures that prevent a response (connect, timeout, invalid URL,
/// body read). One call is one network round trip: no retries.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking transport backed by a single `ureq::Agent`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::from_config(ureq::Agent::config_builder().http_status_as_error(false).build())
    }

    /// Like `new`, but every request is bounded by `timeout` end to end.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::from_config(
            ureq::Agent::config_builder()
                .http_status_as_error(false)
                .timeout_global(Some(timeout))
                .build(),
        )
    }

    fn from_config(config: ureq::config::Config) -> Self {
        Self {
            agent: config.new_agent(),
        }
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.as_str();
        let result = match request.method {
            HttpMethod::Get => with_headers(self.agent.get(url), &request.headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(url), &request.headers).call(),
            HttpMethod::Post => {
                let body = request.body.as_deref().unwrap_or_default();
                with_headers(self.agent.post(url), &request.headers).send(body)
            }
        };
        let mut response = result.map_err(TransportError::new)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(TransportError::new)?;

        Ok(HttpResponse { status, headers, body })
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
