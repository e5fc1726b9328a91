//! Transcriptions of call recordings.

use serde::{Deserialize, Serialize};

use crate::client::{Api, Client};
use crate::codec::lenient;
use crate::error::ApiError;
use crate::resources::recordings::RECORDINGS_PATH;
use crate::transport::Transport;

const TRANSCRIPTIONS_PATH: &str = "transcriptions";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transcription {
    pub id: String,
    pub state: String,
    #[serde(deserialize_with = "lenient::i64_or_string")]
    pub chargeable_duration: i64,
    pub text: String,
    #[serde(deserialize_with = "lenient::i64_or_string")]
    pub text_size: i64,
    #[serde(rename = "textUrl")]
    pub text_url: String,
    pub time: String,
}

impl<T: Transport> Client<T> {
    fn transcriptions_url(&self, recording_id: &str) -> String {
        self.user_url(&format!("{RECORDINGS_PATH}/{recording_id}/{TRANSCRIPTIONS_PATH}"))
    }

    pub fn get_recording_transcriptions(&self, recording_id: &str) -> Result<Vec<Transcription>, ApiError> {
        self.get(Api::Voice, &self.transcriptions_url(recording_id), &())
    }

    /// Start transcribing a recording. Returns the new transcription id.
    pub fn create_recording_transcription(&self, recording_id: &str) -> Result<String, ApiError> {
        self.create(Api::Voice, &self.transcriptions_url(recording_id), &serde_json::Map::new())
    }

    pub fn get_recording_transcription(&self, recording_id: &str, transcription_id: &str) -> Result<Transcription, ApiError> {
        let url = format!("{}/{transcription_id}", self.transcriptions_url(recording_id));
        self.get(Api::Voice, &url, &())
    }
}
