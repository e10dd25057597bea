//! Error types for the accounts client.
//!
//! # Design
//! Three failure kinds reach callers. `Transport` covers everything the
//! HTTP layer reports before a status code exists (connect, timeout, bad
//! URL, body read). `Encode` happens before any I/O. `Api` is the only
//! one with a stable shape: the HTTP status and whatever `error_message`
//! the server sent.
//!
//! A malformed body on a successful response is not an error here; see
//! `envelope`.

use serde::Deserialize;

use crate::http::HttpResponse;
use crate::types::nullable;

/// An HTTP status of 400 or above, with the server's message if it sent one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, thiserror::Error)]
#[error("api: {status_code}: {error_message}")]
pub struct ApiError {
    #[serde(skip)]
    pub status_code: u16,
    #[serde(default, deserialize_with = "nullable")]
    pub error_message: String,
}

/// The HTTP layer failed before producing a response.
#[derive(Debug, thiserror::Error)]
#[error("transport: {0}")]
pub struct TransportError(#[source] pub Box<dyn std::error::Error + Send + Sync>);

impl TransportError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(source.into())
    }
}

/// Errors returned by account operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The account could not be serialized; no request was sent.
    #[error("encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl Error {
    /// The structured API error, if this is one.
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }

    /// The HTTP status, for API errors.
    pub fn status_code(&self) -> Option<u16> {
        self.api().map(|e| e.status_code)
    }
}

/// Judge a response: `Ok` below 400 regardless of body, otherwise an
/// `ApiError` carrying the status and a best-effort message.
pub fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.status < 400 {
        return Ok(());
    }
    let mut error = serde_json::from_slice::<ApiError>(&response.body).unwrap_or_default();
    error.status_code = response.status;
    Err(error)
}
