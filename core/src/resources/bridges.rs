//! Bridges: joining calls so they can hear each other.

use serde::{Deserialize, Serialize};

use crate::client::{Api, Client};
use crate::codec::lenient;
use crate::error::ApiError;
use crate::resources::calls::{Call, PlayAudioData};
use crate::transport::Transport;

const BRIDGES_PATH: &str = "bridges";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Bridge {
    pub id: String,
    pub state: String,
    #[serde(deserialize_with = "lenient::bool_or_string")]
    pub bridge_audio: bool,
    pub calls: String,
    pub created_time: String,
    pub activated_time: String,
    pub completed_time: String,
}

/// Payload for creating or updating a bridge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bridge_audio: Option<bool>,
    #[serde(rename = "callIds", skip_serializing_if = "Vec::is_empty")]
    pub call_ids: Vec<String>,
}

impl<T: Transport> Client<T> {
    fn bridge_url(&self, id: &str, rest: &str) -> String {
        match rest {
            "" => self.user_url(&format!("{BRIDGES_PATH}/{id}")),
            rest => self.user_url(&format!("{BRIDGES_PATH}/{id}/{rest}")),
        }
    }

    pub fn get_bridges(&self) -> Result<Vec<Bridge>, ApiError> {
        self.get(Api::Voice, &self.user_url(BRIDGES_PATH), &())
    }

    /// Create a bridge. Returns the new bridge id.
    pub fn create_bridge(&self, data: &BridgeData) -> Result<String, ApiError> {
        self.create(Api::Voice, &self.user_url(BRIDGES_PATH), data)
    }

    pub fn get_bridge(&self, id: &str) -> Result<Bridge, ApiError> {
        self.get(Api::Voice, &self.bridge_url(id, ""), &())
    }

    /// Replace the bridged calls or toggle bridge audio.
    pub fn update_bridge(&self, id: &str, data: &BridgeData) -> Result<(), ApiError> {
        self.update(Api::Voice, &self.bridge_url(id, ""), data)
    }

    pub fn play_audio_to_bridge(&self, id: &str, data: &PlayAudioData) -> Result<(), ApiError> {
        self.update(Api::Voice, &self.bridge_url(id, "audio"), data)
    }

    pub fn get_bridge_calls(&self, id: &str) -> Result<Vec<Call>, ApiError> {
        self.get(Api::Voice, &self.bridge_url(id, "calls"), &())
    }
}
