//! Call recordings.

use serde::{Deserialize, Serialize};

use crate::client::{Api, Client};
use crate::error::ApiError;
use crate::resources::PageQuery;
use crate::transport::Transport;

pub(crate) const RECORDINGS_PATH: &str = "recordings";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Recording {
    pub id: String,
    pub start_time: String,
    pub end_time: String,
    /// URL of the media file holding the audio.
    pub media: String,
    pub call: String,
    pub state: String,
}

impl<T: Transport> Client<T> {
    pub fn get_recordings(&self, query: Option<&PageQuery>) -> Result<Vec<Recording>, ApiError> {
        self.get(Api::Voice, &self.user_url(RECORDINGS_PATH), &query)
    }

    pub fn get_recording(&self, id: &str) -> Result<Recording, ApiError> {
        self.get(Api::Voice, &self.user_url(&format!("{RECORDINGS_PATH}/{id}")), &())
    }
}
