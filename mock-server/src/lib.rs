//! In-memory fake of the organisation accounts API.
//!
//! Accounts are kept in creation order. Ids must be UUIDs, creation assigns
//! version 0, and deletes must present the current version. Every failure
//! answers with `{"error_message": ...}`.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub const RESOURCE_PATH: &str = "/v1/organisation/accounts";
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Stored account. `attributes` is kept opaque so the fake never drifts
/// from what the client sends.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub id: String,
    #[serde(default)]
    pub organisation_id: String,
    #[serde(default)]
    pub version: i64,
    #[serde(default)]
    pub attributes: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error_message: String,
}

#[derive(Deserialize)]
pub struct PageQuery {
    #[serde(rename = "page[number]")]
    pub number: Option<String>,
    #[serde(rename = "page[size]")]
    pub size: Option<String>,
}

#[derive(Deserialize)]
pub struct VersionQuery {
    pub version: Option<String>,
}

pub type Db = Arc<RwLock<Vec<Account>>>;

type ApiResult<T> = Result<T, (StatusCode, Json<ErrorBody>)>;

fn reject(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ErrorBody>) {
    (
        status,
        Json(ErrorBody {
            error_message: message.into(),
        }),
    )
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route(RESOURCE_PATH, get(list_accounts).post(create_account))
        .route(
            &format!("{RESOURCE_PATH}/{{id}}"),
            get(fetch_account).delete(delete_account),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn parse_page_value(raw: Option<&str>, default: usize, key: &str) -> ApiResult<usize> {
    match raw {
        None | Some("") => Ok(default),
        Some(v) => v
            .parse()
            .map_err(|_| reject(StatusCode::BAD_REQUEST, format!("{key} must be a non-negative integer"))),
    }
}

fn check_id(id: &str) -> ApiResult<()> {
    Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| reject(StatusCode::BAD_REQUEST, "id is not a valid uuid"))
}

async fn list_accounts(
    State(db): State<Db>,
    Query(page): Query<PageQuery>,
) -> ApiResult<Json<Envelope<Vec<Account>>>> {
    let number = parse_page_value(page.number.as_deref(), 0, "page[number]")?;
    let size = parse_page_value(page.size.as_deref(), DEFAULT_PAGE_SIZE, "page[size]")?;
    let accounts = db.read().await;
    let data = accounts
        .iter()
        .skip(number.saturating_mul(size))
        .take(size)
        .cloned()
        .collect();
    Ok(Json(Envelope { data }))
}

async fn fetch_account(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<Account>>> {
    check_id(&id)?;
    let accounts = db.read().await;
    accounts
        .iter()
        .find(|a| a.id == id)
        .cloned()
        .map(|data| Json(Envelope { data }))
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, format!("record {id} does not exist")))
}

async fn create_account(
    State(db): State<Db>,
    input: Result<Json<Envelope<Account>>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Envelope<Account>>)> {
    let Json(input) = input.map_err(|e| reject(StatusCode::BAD_REQUEST, e.body_text()))?;
    let mut account = input.data;
    check_id(&account.id)?;
    let mut accounts = db.write().await;
    if accounts.iter().any(|a| a.id == account.id) {
        return Err(reject(
            StatusCode::CONFLICT,
            "Account cannot be created as it violates a duplicate constraint",
        ));
    }
    account.version = 0;
    accounts.push(account.clone());
    tracing::info!(id = %account.id, "account created");
    Ok((StatusCode::CREATED, Json(Envelope { data: account })))
}

async fn delete_account(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(query): Query<VersionQuery>,
) -> ApiResult<StatusCode> {
    check_id(&id)?;
    let version: i64 = query
        .version
        .as_deref()
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| reject(StatusCode::BAD_REQUEST, "version is required"))?;
    let mut accounts = db.write().await;
    let index = accounts
        .iter()
        .position(|a| a.id == id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, format!("record {id} does not exist")))?;
    if accounts[index].version != version {
        return Err(reject(StatusCode::CONFLICT, "invalid version"));
    }
    accounts.remove(index);
    tracing::info!(%id, "account deleted");
    Ok(StatusCode::NO_CONTENT)
}
