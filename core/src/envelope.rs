//! The `{"data": ...}` wrapper used for both single resources and
//! collections.
//!
//! # Design
//! Single and collection payloads get separate decode functions over the
//! same `Account` type. Decoding on the success path is lenient: a malformed
//! body or a missing `data` member yields `Account::default()` or an empty
//! `Vec` rather than an error. Callers must not assume a successful call
//! returned a populated value. Decoding is all-or-nothing: one field of the
//! wrong type (say `"version":"5"`) discards the whole account, and in a
//! collection discards every account, rather than keeping the fields that
//! did parse.

use serde::{Deserialize, Serialize};

use crate::types::{nullable, Account};

/// Media type sent with encoded request bodies.
pub const CONTENT_TYPE: &str = "application/vnd.api+json";

#[derive(Serialize)]
struct Single<'a> {
    data: &'a Account,
}

#[derive(Deserialize)]
struct SingleOwned {
    #[serde(default, deserialize_with = "nullable")]
    data: Account,
}

#[derive(Deserialize)]
struct Collection {
    #[serde(default, deserialize_with = "nullable")]
    data: Vec<Account>,
}

/// Wrap `account` under `data` and serialize it.
pub fn encode(account: &Account) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&Single { data: account })
}

/// Recover one account from a single-resource envelope.
pub fn decode_single(body: &[u8]) -> Account {
    match serde_json::from_slice::<SingleOwned>(body) {
        Ok(envelope) => envelope.data,
        Err(e) => {
            tracing::debug!(error = %e, "single-resource body did not decode; using empty account");
            Account::default()
        }
    }
}

/// Recover the accounts of a collection envelope, in server order.
pub fn decode_collection(body: &[u8]) -> Vec<Account> {
    match serde_json::from_slice::<Collection>(body) {
        Ok(envelope) => envelope.data,
        Err(e) => {
            tracing::debug!(error = %e, "collection body did not decode; using empty list");
            Vec::new()
        }
    }
}
