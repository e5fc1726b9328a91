//! Searching, and optionally ordering, numbers that nobody owns yet.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::client::{Api, Client};
use crate::codec::{self, lenient};
use crate::error::ApiError;
use crate::http::{id_from_location, HttpMethod};
use crate::transport::Transport;

const AVAILABLE_NUMBERS_PATH: &str = "availableNumbers";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvailableNumberType {
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "tollFree")]
    TollFree,
}

impl AvailableNumberType {
    pub fn as_str(self) -> &'static str {
        match self {
            AvailableNumberType::Local => "local",
            AvailableNumberType::TollFree => "tollFree",
        }
    }
}

impl fmt::Display for AvailableNumberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search criteria. Local searches take location fields, toll-free
/// searches take `pattern`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableNumberQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_local_calling_area: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AvailableNumber {
    pub number: String,
    pub national_number: String,
    pub pattern_match: String,
    pub city: String,
    pub lata: String,
    pub rate_center: String,
    pub state: String,
    #[serde(deserialize_with = "lenient::f64_or_string")]
    pub price: f64,
}

/// A number allocated by [`Client::get_and_order_available_numbers`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderedNumber {
    pub number: String,
    pub national_number: String,
    #[serde(deserialize_with = "lenient::f64_or_string")]
    pub price: f64,
    #[serde(alias = "Location")]
    pub location: String,
    /// Phone number id, taken from the last segment of `location`.
    #[serde(skip)]
    pub id: String,
}

impl<T: Transport> Client<T> {
    fn available_numbers_url(&self, number_type: AvailableNumberType) -> String {
        self.global_url(&format!("{AVAILABLE_NUMBERS_PATH}/{number_type}"))
    }

    pub fn get_available_numbers(
        &self,
        number_type: AvailableNumberType,
        query: &AvailableNumberQuery,
    ) -> Result<Vec<AvailableNumber>, ApiError> {
        self.get(Api::Voice, &self.available_numbers_url(number_type), query)
    }

    /// Search and allocate in one step. The criteria travel in the query
    /// string of a body-less POST.
    pub fn get_and_order_available_numbers(
        &self,
        number_type: AvailableNumberType,
        query: &AvailableNumberQuery,
    ) -> Result<Vec<OrderedNumber>, ApiError> {
        let pairs = codec::query_pairs(query)?;
        let url = self.available_numbers_url(number_type);
        let response = self.send(Api::Voice, HttpMethod::Post, &url, &pairs, None)?;
        let mut numbers: Vec<OrderedNumber> = codec::decode(Api::Voice.format(), &response.body)?;
        for number in numbers.iter_mut().filter(|n| !n.location.is_empty()) {
            number.id = id_from_location(&number.location);
        }
        Ok(numbers)
    }
}
