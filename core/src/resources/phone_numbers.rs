//! Phone numbers allocated to the user.

use serde::{Deserialize, Serialize};

use crate::client::{Api, Client};
use crate::codec::{escape_segment, lenient};
use crate::error::ApiError;
use crate::transport::Transport;

const PHONE_NUMBERS_PATH: &str = "phoneNumbers";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhoneNumber {
    pub id: String,
    pub name: String,
    pub number: String,
    pub national_number: String,
    pub city: String,
    pub state: String,
    pub application_id: String,
    pub fallback_number: String,
    pub created_time: String,
    pub number_state: String,
    #[serde(deserialize_with = "lenient::f64_or_string")]
    pub price: f64,
}

/// Payload for allocating or changing a phone number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumberData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_number: Option<String>,
}

impl<T: Transport> Client<T> {
    pub fn get_phone_numbers(&self) -> Result<Vec<PhoneNumber>, ApiError> {
        self.get(Api::Voice, &self.user_url(PHONE_NUMBERS_PATH), &())
    }

    /// Allocate a number. Returns the new phone number id.
    pub fn create_phone_number(&self, data: &PhoneNumberData) -> Result<String, ApiError> {
        self.create(Api::Voice, &self.user_url(PHONE_NUMBERS_PATH), data)
    }

    /// Look a number up by id or by E.164 number.
    pub fn get_phone_number(&self, id_or_number: &str) -> Result<PhoneNumber, ApiError> {
        let url = self.user_url(&format!("{PHONE_NUMBERS_PATH}/{}", escape_segment(id_or_number)));
        self.get(Api::Voice, &url, &())
    }

    pub fn update_phone_number(&self, id_or_number: &str, data: &PhoneNumberData) -> Result<(), ApiError> {
        let url = self.user_url(&format!("{PHONE_NUMBERS_PATH}/{}", escape_segment(id_or_number)));
        self.update(Api::Voice, &url, data)
    }

    pub fn delete_phone_number(&self, id: &str) -> Result<(), ApiError> {
        self.delete(Api::Voice, &self.user_url(&format!("{PHONE_NUMBERS_PATH}/{id}")))
    }

    /// Allocate `number`, with any extra settings taken from `options`.
    pub fn reserve_phone_number(&self, number: &str, options: Option<PhoneNumberData>) -> Result<String, ApiError> {
        let data = PhoneNumberData {
            number: Some(number.to_string()),
            ..options.unwrap_or_default()
        };
        self.create_phone_number(&data)
    }
}
