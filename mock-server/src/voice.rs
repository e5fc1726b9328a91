//! Voice API routes: account, calls, v1 messages and media.

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::{json_error, new_id, now, AppState};

const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Call {
    pub id: String,
    pub direction: String,
    pub from: String,
    pub to: String,
    pub state: String,
    pub start_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub recording_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_to: Option<String>,
    pub events: String,
}

impl Call {
    fn is_ended(&self) -> bool {
        matches!(self.state.as_str(), "completed" | "rejected")
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateCall {
    from: String,
    to: String,
    #[serde(default)]
    callback_url: Option<String>,
    #[serde(default)]
    recording_enabled: Option<Value>,
    #[serde(default)]
    tag: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateCall {
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    recording_enabled: Option<Value>,
    #[serde(default)]
    transfer_to: Option<String>,
    #[serde(default)]
    tag: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ListFilter {
    from: Option<String>,
    to: Option<String>,
    size: Option<usize>,
}

impl ListFilter {
    fn admits(&self, from: &str, to: &str) -> bool {
        self.from.as_deref().map_or(true, |f| f == from) && self.to.as_deref().map_or(true, |t| t == to)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub from: String,
    pub to: String,
    pub text: String,
    pub media: Vec<String>,
    pub direction: String,
    pub state: String,
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateMessage {
    from: String,
    to: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    media: Vec<String>,
    #[serde(default)]
    callback_url: Option<String>,
    #[serde(default)]
    tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaFile {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub(crate) fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/users/{user_id}/account", get(get_account))
        .route("/v1/users/{user_id}/calls", get(list_calls).post(create_call))
        .route("/v1/users/{user_id}/calls/{id}", get(get_call).post(update_call))
        .route("/v1/users/{user_id}/messages", get(list_messages).post(create_message))
        .route("/v1/users/{user_id}/messages/{id}", get(get_message))
        .route("/v1/users/{user_id}/media", get(list_media))
        .route(
            "/v1/users/{user_id}/media/{name}",
            get(download_media).put(upload_media).delete(delete_media),
        )
}

/// Booleans arrive either as JSON booleans or as `"true"`/`"false"`.
fn flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn bad_request(rejection: JsonRejection) -> Response {
    json_error(StatusCode::BAD_REQUEST, "invalid-request", rejection.body_text())
}

fn created(location: String) -> Response {
    (StatusCode::CREATED, [(header::LOCATION, location)]).into_response()
}

async fn get_account(State(state): State<AppState>, Path(user_id): Path<String>, headers: HeaderMap) -> Response {
    if let Err(denied) = state.credentials.check_user(&headers, &user_id) {
        return denied;
    }
    Json(json!({ "balance": "100.00", "accountType": "pre-pay" })).into_response()
}

async fn list_calls(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(filter): Query<ListFilter>,
    headers: HeaderMap,
) -> Response {
    if let Err(denied) = state.credentials.check_user(&headers, &user_id) {
        return denied;
    }
    let store = state.store.read().await;
    let calls: Vec<&Call> = store
        .calls
        .iter()
        .filter(|c| filter.admits(&c.from, &c.to))
        .take(filter.size.unwrap_or(usize::MAX))
        .collect();
    Json(calls).into_response()
}

async fn create_call(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<CreateCall>, JsonRejection>,
) -> Response {
    if let Err(denied) = state.credentials.check_user(&headers, &user_id) {
        return denied;
    }
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_request(rejection),
    };
    if body.from.is_empty() || body.to.is_empty() {
        return json_error(StatusCode::BAD_REQUEST, "invalid-request", "Both from and to are required");
    }
    let id = new_id("c");
    let location = format!("/v1/users/{user_id}/calls/{id}");
    let call = Call {
        events: format!("{location}/events"),
        id: id.clone(),
        direction: "out".to_string(),
        from: body.from,
        to: body.to,
        state: "started".to_string(),
        start_time: now(),
        recording_enabled: body.recording_enabled.as_ref().and_then(flag).unwrap_or(false),
        callback_url: body.callback_url,
        tag: body.tag,
        ..Call::default()
    };
    info!(%id, from = %call.from, to = %call.to, "call created");
    state.store.write().await.calls.push(call);
    created(location)
}

async fn get_call(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if let Err(denied) = state.credentials.check_user(&headers, &user_id) {
        return denied;
    }
    let store = state.store.read().await;
    match store.calls.iter().find(|c| c.id == id) {
        Some(call) => Json(call).into_response(),
        None => json_error(StatusCode::NOT_FOUND, "not-found", format!("Call {id} not found")),
    }
}

async fn update_call(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, String)>,
    headers: HeaderMap,
    body: Result<Json<UpdateCall>, JsonRejection>,
) -> Response {
    if let Err(denied) = state.credentials.check_user(&headers, &user_id) {
        return denied;
    }
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_request(rejection),
    };
    let mut store = state.store.write().await;
    let Some(call) = store.calls.iter_mut().find(|c| c.id == id) else {
        return json_error(StatusCode::NOT_FOUND, "not-found", format!("Call {id} not found"));
    };
    if let Some(next) = body.state.as_deref() {
        if call.is_ended() {
            return json_error(StatusCode::BAD_REQUEST, "call-already-ended", format!("Call {id} has ended"));
        }
        match next {
            "active" => call.active_time = Some(now()),
            "rejected" | "completed" => call.end_time = Some(now()),
            "transferring" => match body.transfer_to.as_deref() {
                Some(target) if !target.is_empty() => call.transfer_to = Some(target.to_string()),
                _ => {
                    return json_error(StatusCode::BAD_REQUEST, "invalid-request", "transferTo is required")
                }
            },
            other => {
                return json_error(StatusCode::BAD_REQUEST, "invalid-state", format!("Unknown call state {other}"))
            }
        }
        call.state = next.to_string();
    }
    if let Some(enabled) = body.recording_enabled.as_ref().and_then(flag) {
        call.recording_enabled = enabled;
    }
    if body.tag.is_some() {
        call.tag = body.tag;
    }
    debug!(%id, state = %call.state, "call updated");
    StatusCode::OK.into_response()
}

async fn list_messages(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(filter): Query<ListFilter>,
    headers: HeaderMap,
) -> Response {
    if let Err(denied) = state.credentials.check_user(&headers, &user_id) {
        return denied;
    }
    let store = state.store.read().await;
    let messages: Vec<&Message> = store
        .messages
        .iter()
        .filter(|m| filter.admits(&m.from, &m.to))
        .take(filter.size.unwrap_or(usize::MAX))
        .collect();
    Json(messages).into_response()
}

async fn create_message(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<CreateMessage>, JsonRejection>,
) -> Response {
    if let Err(denied) = state.credentials.check_user(&headers, &user_id) {
        return denied;
    }
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_request(rejection),
    };
    if body.text.is_empty() && body.media.is_empty() {
        return json_error(StatusCode::BAD_REQUEST, "invalid-request", "A message needs text or media");
    }
    let id = new_id("m");
    let message = Message {
        id: id.clone(),
        from: body.from,
        to: body.to,
        text: body.text,
        media: body.media,
        direction: "out".to_string(),
        state: "sent".to_string(),
        time: now(),
        callback_url: body.callback_url,
        tag: body.tag,
    };
    info!(%id, to = %message.to, "message stored");
    state.store.write().await.messages.push(message);
    created(format!("/v1/users/{user_id}/messages/{id}"))
}

async fn get_message(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if let Err(denied) = state.credentials.check_user(&headers, &user_id) {
        return denied;
    }
    let store = state.store.read().await;
    match store.messages.iter().find(|m| m.id == id) {
        Some(message) => Json(message).into_response(),
        None => json_error(StatusCode::NOT_FOUND, "not-found", format!("Message {id} not found")),
    }
}

async fn list_media(State(state): State<AppState>, Path(user_id): Path<String>, headers: HeaderMap) -> Response {
    if let Err(denied) = state.credentials.check_user(&headers, &user_id) {
        return denied;
    }
    let store = state.store.read().await;
    let mut names: Vec<&String> = store.media.keys().collect();
    names.sort();
    let listing: Vec<Value> = names
        .into_iter()
        .map(|name| {
            json!({
                "mediaName": name,
                "contentLength": store.media[name].bytes.len(),
                "content": format!("/v1/users/{user_id}/media/{name}"),
            })
        })
        .collect();
    Json(listing).into_response()
}

async fn upload_media(
    State(state): State<AppState>,
    Path((user_id, name)): Path<(String, String)>,
    headers: HeaderMap,
    bytes: Bytes,
) -> Response {
    if let Err(denied) = state.credentials.check_user(&headers, &user_id) {
        return denied;
    }
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(DEFAULT_MEDIA_TYPE)
        .to_string();
    debug!(%name, len = bytes.len(), %content_type, "media uploaded");
    state.store.write().await.media.insert(
        name,
        MediaFile {
            content_type,
            bytes: bytes.to_vec(),
        },
    );
    StatusCode::OK.into_response()
}

async fn download_media(
    State(state): State<AppState>,
    Path((user_id, name)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if let Err(denied) = state.credentials.check_user(&headers, &user_id) {
        return denied;
    }
    let store = state.store.read().await;
    match store.media.get(&name) {
        Some(file) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, file.content_type.clone())],
            file.bytes.clone(),
        )
            .into_response(),
        None => json_error(StatusCode::NOT_FOUND, "not-found", format!("Media {name} not found")),
    }
}

async fn delete_media(
    State(state): State<AppState>,
    Path((user_id, name)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if let Err(denied) = state.credentials.check_user(&headers, &user_id) {
        return denied;
    }
    match state.store.write().await.media.remove(&name) {
        Some(_) => StatusCode::OK.into_response(),
        None => json_error(StatusCode::NOT_FOUND, "not-found", format!("Media {name} not found")),
    }
}
