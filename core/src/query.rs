//! Query-string encoding for `list` pagination.
//!
//! Field order and key names come from a static table, so the output order
//! is fixed at compile time: `page[number]` always precedes `page[size]`.
//! Every declared field is emitted, even when its value is empty. Brackets
//! and values are written verbatim, with no percent-encoding.

use crate::types::UrlParameters;

type Accessor = fn(&UrlParameters) -> &str;

const FIELDS: [(&str, Accessor); 2] = [("page[number]", page_number), ("page[size]", page_size)];

fn page_number(params: &UrlParameters) -> &str {
    &params.page_number
}

fn page_size(params: &UrlParameters) -> &str {
    &params.page_size
}

/// Encode `params` as a query suffix: `""` when absent, otherwise `?` plus
/// `key=value` pairs joined by `&`.
pub fn encode(params: Option<&UrlParameters>) -> String {
    let Some(params) = params else {
        return String::new();
    };
    let pairs: Vec<String> = FIELDS
        .iter()
        .map(|(key, get)| format!("{key}={}", get(params)))
        .collect();
    format!("?{}", pairs.join("&"))
}
