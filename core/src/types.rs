//! Domain DTOs for the organisation accounts API.
//!
//! # Design
//! The client is a transparent carrier: no attribute is validated locally.
//! Every attribute field is emitted on the wire (including empty strings and
//! `false` flags) and a JSON `null` for any of them decodes to the field's
//! default, so one odd value never discards the whole resource.

use serde::{Deserialize, Deserializer, Serialize};

/// Resource type literal carried by every account.
pub const ACCOUNT_TYPE: &str = "accounts";

/// One organisation account as exposed by the API.
///
/// `version` is the optimistic-concurrency token. The client never tracks it
/// across calls; callers pass the current value back to `delete`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "type", default, deserialize_with = "nullable")]
    pub kind: String,
    #[serde(default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub organisation_id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub version: i64,
    #[serde(default)]
    pub attributes: Option<Attributes>,
}

impl Account {
    /// A fresh account of type `accounts` at version 0.
    pub fn new(id: impl Into<String>, organisation_id: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            kind: ACCOUNT_TYPE.to_string(),
            id: id.into(),
            organisation_id: organisation_id.into(),
            version: 0,
            attributes: Some(attributes),
        }
    }
}

/// Account metadata. `name` is ordered; the first entry is the primary name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attributes {
    #[serde(deserialize_with = "nullable")]
    pub country: String,
    #[serde(deserialize_with = "nullable")]
    pub base_currency: String,
    #[serde(deserialize_with = "nullable")]
    pub account_number: String,
    #[serde(deserialize_with = "nullable")]
    pub bank_id: String,
    #[serde(deserialize_with = "nullable")]
    pub bank_id_code: String,
    #[serde(deserialize_with = "nullable")]
    pub bic: String,
    #[serde(deserialize_with = "nullable")]
    pub iban: String,
    #[serde(deserialize_with = "nullable")]
    pub name: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub alternative_names: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub account_classification: String,
    #[serde(deserialize_with = "nullable")]
    pub joint_account: bool,
    #[serde(deserialize_with = "nullable")]
    pub account_matching_opt_out: bool,
    #[serde(deserialize_with = "nullable")]
    pub secondary_identification: String,
    #[serde(deserialize_with = "nullable")]
    pub switched: bool,
    #[serde(deserialize_with = "nullable")]
    pub status: String,
}

/// Pagination request for `list`.
///
/// Values are opaque, pre-formatted strings; they are neither validated nor
/// escaped before being placed in the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParameters {
    pub page_number: String,
    pub page_size: String,
}

impl UrlParameters {
    pub fn page(number: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            page_number: number.into(),
            page_size: size.into(),
        }
    }
}

/// Treat an explicit JSON `null` like a missing field.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
