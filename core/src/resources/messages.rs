//! SMS and MMS: the v1 message resource and the v2 messaging API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{Api, Client};
use crate::codec::lenient;
use crate::error::ApiError;
use crate::transport::Transport;

const MESSAGES_PATH: &str = "messages";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Message {
    pub id: String,
    pub from: String,
    pub to: String,
    pub direction: String,
    pub text: String,
    pub media: Vec<String>,
    pub state: String,
    pub time: String,
    pub callback_url: String,
    pub receipt_requested: String,
    pub delivery_state: String,
    pub delivery_code: String,
    pub delivery_description: String,
    pub tag: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

/// Payload for sending a message through the v1 API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageData {
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<String>,
    #[serde(rename = "callbackUrl", skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_http_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_requested: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// One number or a group of numbers. Group messages use the list form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageRecipients {
    One(String),
    Many(Vec<String>),
}

impl Default for MessageRecipients {
    fn default() -> Self {
        MessageRecipients::Many(Vec::new())
    }
}

impl MessageRecipients {
    pub fn len(&self) -> usize {
        match self {
            MessageRecipients::One(_) => 1,
            MessageRecipients::Many(numbers) => numbers.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&str> for MessageRecipients {
    fn from(number: &str) -> Self {
        MessageRecipients::One(number.to_string())
    }
}

impl From<Vec<String>> for MessageRecipients {
    fn from(numbers: Vec<String>) -> Self {
        MessageRecipients::Many(numbers)
    }
}

/// Payload for the v2 messaging API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateMessageDataV2 {
    pub from: String,
    pub to: MessageRecipients,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub application_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tag: String,
}

/// The accepted message as echoed back by the v2 API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateMessageResultV2 {
    pub id: String,
    pub time: Option<DateTime<Utc>>,
    pub from: String,
    pub to: MessageRecipients,
    pub text: String,
    pub media: Vec<String>,
    pub application_id: String,
    pub tag: String,
    pub owner: String,
    pub direction: String,
    #[serde(deserialize_with = "lenient::i64_or_string")]
    pub segment_count: i64,
}

impl<T: Transport> Client<T> {
    pub fn get_messages(&self, query: Option<&MessageQuery>) -> Result<Vec<Message>, ApiError> {
        self.get(Api::Voice, &self.user_url(MESSAGES_PATH), &query)
    }

    /// Send a message. Returns the new message id.
    pub fn create_message(&self, data: &CreateMessageData) -> Result<String, ApiError> {
        self.create(Api::Voice, &self.user_url(MESSAGES_PATH), data)
    }

    pub fn get_message(&self, id: &str) -> Result<Message, ApiError> {
        self.get(Api::Voice, &self.user_url(&format!("{MESSAGES_PATH}/{id}")), &())
    }

    /// Send `text` from `from` to `to`, with any extra settings taken from
    /// `options`.
    pub fn send_message_to(
        &self,
        from: &str,
        to: &str,
        text: &str,
        options: Option<CreateMessageData>,
    ) -> Result<String, ApiError> {
        let data = CreateMessageData {
            from: from.to_string(),
            to: to.to_string(),
            text: Some(text.to_string()),
            ..options.unwrap_or_default()
        };
        self.create_message(&data)
    }

    /// Send a message through the v2 messaging API.
    pub fn create_message_v2(&self, data: &CreateMessageDataV2) -> Result<CreateMessageResultV2, ApiError> {
        self.post(Api::Messaging, &self.messaging_url(), data)
    }
}
