//! Applications: callback configuration shared by phone numbers.

use serde::{Deserialize, Serialize};

use crate::client::{Api, Client};
use crate::codec::{lenient, stringify};
use crate::error::ApiError;
use crate::resources::PageQuery;
use crate::transport::Transport;

const APPLICATIONS_PATH: &str = "applications";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Application {
    pub id: String,
    pub name: String,
    #[serde(rename = "incomingCallUrl")]
    pub incoming_call_url: String,
    #[serde(rename = "incomingMessageUrl")]
    pub incoming_message_url: String,
    #[serde(deserialize_with = "lenient::bool_or_string")]
    pub auto_answer: bool,
    pub callback_http_method: String,
}

/// Payload for creating or updating an application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationData {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "incomingCallUrl", skip_serializing_if = "Option::is_none")]
    pub incoming_call_url: Option<String>,
    #[serde(rename = "incomingCallUrlCallbackTimeout", skip_serializing_if = "Option::is_none", serialize_with = "stringify::option")]
    pub incoming_call_url_callback_timeout: Option<u32>,
    #[serde(rename = "incomingCallFallbackUrl", skip_serializing_if = "Option::is_none")]
    pub incoming_call_fallback_url: Option<String>,
    #[serde(rename = "incomingMessageUrl", skip_serializing_if = "Option::is_none")]
    pub incoming_message_url: Option<String>,
    #[serde(rename = "incomingMessageUrlCallbackTimeout", skip_serializing_if = "Option::is_none", serialize_with = "stringify::option")]
    pub incoming_message_url_callback_timeout: Option<u32>,
    #[serde(rename = "incomingMessageFallbackUrl", skip_serializing_if = "Option::is_none")]
    pub incoming_message_fallback_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_http_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "stringify::option")]
    pub auto_answer: Option<bool>,
}

impl<T: Transport> Client<T> {
    pub fn get_applications(&self, query: Option<&PageQuery>) -> Result<Vec<Application>, ApiError> {
        self.get(Api::Voice, &self.user_url(APPLICATIONS_PATH), &query)
    }

    /// Create an application. Returns the new application id.
    pub fn create_application(&self, data: &ApplicationData) -> Result<String, ApiError> {
        self.create(Api::Voice, &self.user_url(APPLICATIONS_PATH), data)
    }

    pub fn get_application(&self, id: &str) -> Result<Application, ApiError> {
        self.get(Api::Voice, &self.user_url(&format!("{APPLICATIONS_PATH}/{id}")), &())
    }

    pub fn update_application(&self, id: &str, data: &ApplicationData) -> Result<(), ApiError> {
        self.update(Api::Voice, &self.user_url(&format!("{APPLICATIONS_PATH}/{id}")), data)
    }

    pub fn delete_application(&self, id: &str) -> Result<(), ApiError> {
        self.delete(Api::Voice, &self.user_url(&format!("{APPLICATIONS_PATH}/{id}")))
    }
}
