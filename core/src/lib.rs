//! Blocking client for the organisation accounts API.
//!
//! # Overview
//! `Client::new(base_url)` builds a transport and exposes
//! `client.organisation.accounts`, which lists, fetches, creates and deletes
//! accounts over the API's `{"data": ...}` JSON envelope.
//!
//! # Design
//! - Requests and responses are plain data (`HttpRequest`, `HttpResponse`);
//!   every operation is `build_*`, one `Transport::execute`, then `parse_*`.
//! - Any status of 400 or above becomes `ApiError` with the server's
//!   `error_message`; transport and encoding failures are separate variants
//!   of `Error`.
//! - A malformed body on a successful response decodes to an empty value
//!   instead of an error (see `envelope`).
//! - Nothing is retried, cached or paged automatically.

pub mod accounts;
pub mod client;
pub mod envelope;
pub mod error;
pub mod http;
pub mod query;
pub mod types;

pub use accounts::AccountsClient;
pub use client::{Client, Organisation};
pub use error::{ApiError, Error, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use types::{Account, Attributes, UrlParameters};
