//! Basic-auth checks for the voice, messaging and dashboard routes.

use axum::http::{header, HeaderMap, StatusCode};
use axum::response::Response;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::warn;

use crate::{json_error, xml_error};

/// Identity the mock accepts. The default matches the values the client
/// crate's tests use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_id: String,
    pub api_token: String,
    pub api_secret: String,
    pub account_id: String,
    pub username: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            user_id: "userId".to_string(),
            api_token: "apiToken".to_string(),
            api_secret: "apiSecret".to_string(),
            account_id: "accountId".to_string(),
            username: "username".to_string(),
            password: "password".to_string(),
        }
    }
}

impl Credentials {
    /// Token auth plus a matching user id in the path.
    pub(crate) fn check_user(&self, headers: &HeaderMap, user_id: &str) -> Result<(), Response> {
        if !matches_basic(headers, &self.api_token, &self.api_secret) {
            warn!(user_id, "rejected api credentials");
            return Err(json_error(StatusCode::UNAUTHORIZED, "unauthorized", "Invalid credentials"));
        }
        if user_id != self.user_id {
            return Err(json_error(StatusCode::NOT_FOUND, "not-found", format!("User {user_id} not found")));
        }
        Ok(())
    }

    /// Username/password auth plus a matching account id in the path.
    pub(crate) fn check_account(&self, headers: &HeaderMap, account_id: &str) -> Result<(), Response> {
        if !matches_basic(headers, &self.username, &self.password) {
            warn!(account_id, "rejected dashboard credentials");
            return Err(xml_error(StatusCode::UNAUTHORIZED, "401", "Invalid credentials"));
        }
        if account_id != self.account_id {
            return Err(xml_error(
                StatusCode::NOT_FOUND,
                "404",
                &format!("Account {account_id} not found"),
            ));
        }
        Ok(())
    }
}

fn matches_basic(headers: &HeaderMap, user: &str, password: &str) -> bool {
    basic_auth(headers).is_some_and(|(u, p)| u == user && p == password)
}

/// `(user, password)` from an `Authorization: Basic ...` header.
pub(crate) fn basic_auth(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let text = String::from_utf8(decoded).ok()?;
    let (user, password) = text.split_once(':')?;
    Some((user.to_string(), password.to_string()))
}
