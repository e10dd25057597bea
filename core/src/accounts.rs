//! Resource client for `/v1/organisation/accounts`.
//!
//! # Design
//! Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! `list`, `fetch`, `create` and `delete` compose the two around a single
//! `Transport::execute` call. The client holds only the base URL and a
//! shared, immutable transport, so it can be cloned and used from several
//! threads at once.

use std::sync::Arc;

use tracing::{instrument, Span};

use crate::envelope;
use crate::error::{check_status, ApiError, Error};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::query;
use crate::types::{Account, UrlParameters};

/// Collection path, relative to the base URL.
pub const RESOURCE_PATH: &str = "/v1/organisation/accounts";

/// Typed access to organisation accounts.
#[derive(Debug)]
pub struct AccountsClient<T = UreqTransport> {
    base_url: String,
    transport: Arc<T>,
}

impl<T> Clone for AccountsClient<T> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T> AccountsClient<T> {
    pub fn new(base_url: &str, transport: Arc<T>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}{RESOURCE_PATH}", self.base_url)
    }

    pub fn build_list(&self, params: Option<&UrlParameters>) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}{}", self.collection_url(), query::encode(params)),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_fetch(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/{id}", self.collection_url()),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Fails only if `account` cannot be serialized.
    pub fn build_create(&self, account: &Account) -> Result<HttpRequest, Error> {
        let body = envelope::encode(account)?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.collection_url(),
            headers: vec![("content-type".to_string(), envelope::CONTENT_TYPE.to_string())],
            body: Some(body),
        })
    }

    pub fn build_delete(&self, id: &str, version: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: format!("{}/{id}?version={version}", self.collection_url()),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list(&self, response: &HttpResponse) -> Result<Vec<Account>, ApiError> {
        check_status(response)?;
        Ok(envelope::decode_collection(&response.body))
    }

    pub fn parse_fetch(&self, response: &HttpResponse) -> Result<Account, ApiError> {
        check_status(response)?;
        Ok(envelope::decode_single(&response.body))
    }

    pub fn parse_create(&self, response: &HttpResponse) -> Result<Account, ApiError> {
        check_status(response)?;
        Ok(envelope::decode_single(&response.body))
    }

    pub fn parse_delete(&self, response: &HttpResponse) -> Result<(), ApiError> {
        check_status(response)
    }
}

impl<T: Transport> AccountsClient<T> {
    /// List accounts, optionally one page at a time. Paging is manual: pass
    /// the next `page[number]` yourself.
    pub fn list(&self, params: Option<&UrlParameters>) -> Result<Vec<Account>, Error> {
        let response = self.send(&self.build_list(params))?;
        Ok(self.parse_list(&response)?)
    }

    /// Fetch one account by id.
    ///
    /// A 2xx response whose body is not a valid envelope returns
    /// `Account::default()` rather than an error.
    pub fn fetch(&self, id: &str) -> Result<Account, Error> {
        let response = self.send(&self.build_fetch(id))?;
        Ok(self.parse_fetch(&response)?)
    }

    /// Create `account`, returning the server's representation of it.
    ///
    /// Serialization happens first; if it fails nothing is sent.
    pub fn create(&self, account: &Account) -> Result<Account, Error> {
        let request = self.build_create(account)?;
        let response = self.send(&request)?;
        Ok(self.parse_create(&response)?)
    }

    /// Delete `id` at `version`. A stale version comes back as the server's
    /// conflict status; nothing is retried.
    pub fn delete(&self, id: &str, version: i64) -> Result<(), Error> {
        let response = self.send(&self.build_delete(id, version))?;
        Ok(self.parse_delete(&response)?)
    }

    #[instrument(
        name = "accounts_request",
        level = "debug",
        skip_all,
        fields(
            http.method = %request.method,
            http.url = %request.url,
            http.status_code = tracing::field::Empty,
        )
    )]
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let response = self.transport.execute(request)?;
        Span::current().record("http.status_code", response.status);
        Ok(response)
    }
}
