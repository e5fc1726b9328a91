//! In-memory imitation of a subset of the Bandwidth REST API.
//!
//! # Design
//! - One axum `Router` over shared state: the expected credentials plus a
//!   `Store` behind a tokio `RwLock`. Nothing is persisted.
//! - Every route checks basic auth first. Voice and messaging routes expect
//!   the API token and secret, dashboard routes expect the username and
//!   password. Failures answer 401 in the API's own error format.
//! - Errors use the vendor shapes the client parses: JSON `{code, message}`
//!   for voice and messaging, XML `ResponseStatus` for the dashboard.
//! - The route modules mirror the API split: [`voice`], [`messaging`],
//!   [`accounts`].

pub mod accounts;
mod auth;
pub mod messaging;
pub mod voice;

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tracing::info;

pub use auth::Credentials;

/// Everything the mock remembers between requests.
#[derive(Debug, Default)]
pub struct Store {
    pub calls: Vec<voice::Call>,
    pub messages: Vec<voice::Message>,
    pub media: HashMap<String, voice::MediaFile>,
    pub orders: HashMap<String, accounts::StoredOrder>,
}

#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<Credentials>,
    pub store: Arc<RwLock<Store>>,
}

pub fn app(credentials: Credentials) -> Router {
    let state = AppState {
        credentials: Arc::new(credentials),
        store: Arc::new(RwLock::new(Store::default())),
    };
    Router::new()
        .merge(voice::routes())
        .merge(messaging::routes())
        .merge(accounts::routes())
        .fallback(unknown_route)
        .with_state(state)
}

pub async fn run(listener: TcpListener, credentials: Credentials) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock server ready");
    }
    axum::serve(listener, app(credentials)).await
}

async fn unknown_route() -> Response {
    json_error(StatusCode::NOT_FOUND, "not-found", "The requested resource was not found")
}

/// Error body of the voice and messaging APIs.
pub(crate) fn json_error(status: StatusCode, code: &str, message: impl Into<String>) -> Response {
    (status, Json(json!({ "code": code, "message": message.into() }))).into_response()
}

/// Error body of the dashboard API.
pub(crate) fn xml_error(status: StatusCode, code: &str, description: &str) -> Response {
    let body = format!(
        "<ErrorResponse><ResponseStatus><ErrorCode>{}</ErrorCode><Description>{}</Description></ResponseStatus></ErrorResponse>",
        quick_xml::escape::escape(code),
        quick_xml::escape::escape(description)
    );
    (status, [(header::CONTENT_TYPE, "application/xml")], body).into_response()
}

pub(crate) fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn new_id(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4().simple())
}
