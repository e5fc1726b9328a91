//! Caller-id (CNAM) lookup.

use serde_json::{Map, Value};

use crate::client::{Api, Client};
use crate::codec::escape_segment;
use crate::error::ApiError;
use crate::transport::Transport;

const NUMBER_INFO_PATH: &str = "phoneNumbers/numberInfo";

impl<T: Transport> Client<T> {
    /// Registered name and timestamps for `number`, as returned by the vendor.
    pub fn get_number_info(&self, number: &str) -> Result<Map<String, Value>, ApiError> {
        let url = self.global_url(&format!("{NUMBER_INFO_PATH}/{}", escape_segment(number)));
        self.get(Api::Voice, &url, &())
    }
}
