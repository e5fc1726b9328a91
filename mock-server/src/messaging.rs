//! Messaging v2 route. Accepted messages are echoed back, not stored.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::{json_error, new_id, now, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendMessage {
    from: String,
    to: Value,
    #[serde(default)]
    text: String,
    #[serde(default)]
    media: Vec<String>,
    #[serde(default)]
    application_id: String,
    #[serde(default)]
    tag: String,
}

pub(crate) fn routes() -> Router<AppState> {
    Router::new().route("/api/v2/users/{user_id}/messages", post(send_message))
}

/// A single number or a non-empty list of numbers.
fn recipients(to: &Value) -> Option<Vec<String>> {
    match to {
        Value::String(one) if !one.is_empty() => Some(vec![one.clone()]),
        Value::Array(many) if !many.is_empty() => many.iter().map(|v| v.as_str().map(str::to_string)).collect(),
        _ => None,
    }
}

async fn send_message(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<SendMessage>, JsonRejection>,
) -> Response {
    if let Err(denied) = state.credentials.check_user(&headers, &user_id) {
        return denied;
    }
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return json_error(StatusCode::BAD_REQUEST, "invalid-request", rejection.body_text()),
    };
    let Some(to) = recipients(&body.to) else {
        return json_error(StatusCode::BAD_REQUEST, "invalid-request", "to must name at least one number");
    };
    if body.from.is_empty() || body.application_id.is_empty() {
        return json_error(StatusCode::BAD_REQUEST, "invalid-request", "from and applicationId are required");
    }
    let id = new_id("m");
    info!(%id, recipients = to.len(), "v2 message accepted");
    let reply = json!({
        "id": id,
        "owner": body.from,
        "applicationId": body.application_id,
        "time": now(),
        "segmentCount": 1,
        "direction": "out",
        "to": to,
        "from": body.from,
        "text": body.text,
        "media": body.media,
        "tag": body.tag,
    });
    (StatusCode::ACCEPTED, Json(reply)).into_response()
}
