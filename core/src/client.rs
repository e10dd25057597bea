//! Entry point: one transport, one base URL, one accounts client.

use std::sync::Arc;
use std::time::Duration;

use crate::accounts::AccountsClient;
use crate::http::{Transport, UreqTransport};

/// Handle to the organisation API.
///
/// Owns the transport for its lifetime and shares it, read-only, with the
/// resource clients it exposes.
#[derive(Debug)]
pub struct Client<T = UreqTransport> {
    url: String,
    pub organisation: Organisation<T>,
}

/// Resources under `/v1/organisation`.
#[derive(Debug)]
pub struct Organisation<T = UreqTransport> {
    pub accounts: AccountsClient<T>,
}

impl Client {
    /// Client backed by a default ureq transport.
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::new())
    }

    /// Client whose requests each give up after `timeout`.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        Self::with_transport(base_url, UreqTransport::with_timeout(timeout))
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        let transport = Arc::new(transport);
        Self {
            url: base_url.to_string(),
            organisation: Organisation {
                accounts: AccountsClient::new(base_url, transport),
            },
        }
    }

    /// The base URL as given at construction.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn accounts(&self) -> &AccountsClient<T> {
        &self.organisation.accounts
    }
}
