//! Calls: outbound calls, call control, events, gathers.

use serde::{Deserialize, Serialize};

use crate::client::{Api, Client};
use crate::codec::{lenient, stringify};
use crate::error::ApiError;
use crate::resources::recordings::Recording;
use crate::resources::transcriptions::Transcription;
use crate::transport::Transport;

const CALLS_PATH: &str = "calls";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Call {
    pub id: String,
    pub active_time: String,
    #[serde(deserialize_with = "lenient::i64_or_string")]
    pub chargeable_duration: i64,
    pub direction: String,
    pub events: String,
    pub end_time: String,
    pub from: String,
    pub recording_file_format: String,
    #[serde(deserialize_with = "lenient::bool_or_string")]
    pub recording_enabled: bool,
    pub start_time: String,
    pub state: String,
    pub to: String,
    #[serde(deserialize_with = "lenient::bool_or_string")]
    pub transcription_enabled: bool,
    pub callback_url: String,
    pub tag: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bridge_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conference_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

/// Payload for placing an outbound call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCallData {
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "stringify::option")]
    pub call_timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "stringify::option")]
    pub callback_timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_http_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bridge_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conference_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "stringify::option")]
    pub recording_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording_file_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "stringify::option")]
    pub recording_max_duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "stringify::option")]
    pub transcription_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// Payload for changing an active call. Only the fields present are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCallData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "stringify::option")]
    pub recording_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording_file_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_caller_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whisper_audio: Option<PlayAudioData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// Audio file or spoken sentence played into a call, bridge or conference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayAudioData {
    #[serde(rename = "fileUrl", skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "stringify::option")]
    pub loop_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendDtmfData {
    pub dtmf_out: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CallEvent {
    pub id: String,
    pub time: String,
    pub name: String,
}

/// Payload for collecting DTMF digits from a call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGatherData {
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "stringify::option")]
    pub max_digits: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "stringify::option")]
    pub inter_digit_timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminating_digits: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<GatherPrompt>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatherPrompt {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(rename = "fileUrl", skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "stringify::option")]
    pub bargeable: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGatherData {
    pub state: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Gather {
    pub id: String,
    pub state: String,
    pub reason: String,
    pub created_time: String,
    pub completed_time: String,
    pub call: String,
    pub digits: String,
}

impl<T: Transport> Client<T> {
    fn call_url(&self, id: &str, rest: &str) -> String {
        if rest.is_empty() {
            self.user_url(&format!("{CALLS_PATH}/{id}"))
        } else {
            self.user_url(&format!("{CALLS_PATH}/{id}/{rest}"))
        }
    }

    /// List previous calls that were made or received.
    pub fn get_calls(&self, query: Option<&CallQuery>) -> Result<Vec<Call>, ApiError> {
        self.get(Api::Voice, &self.user_url(CALLS_PATH), &query)
    }

    /// Place an outbound call. Returns the new call id.
    pub fn create_call(&self, data: &CreateCallData) -> Result<String, ApiError> {
        self.create(Api::Voice, &self.user_url(CALLS_PATH), data)
    }

    pub fn get_call(&self, id: &str) -> Result<Call, ApiError> {
        self.get(Api::Voice, &self.call_url(id, ""), &())
    }

    /// Answer, reject, transfer, hang up, or toggle recording on a call.
    pub fn update_call(&self, id: &str, data: &UpdateCallData) -> Result<(), ApiError> {
        self.update(Api::Voice, &self.call_url(id, ""), data)
    }

    pub fn play_audio_to_call(&self, id: &str, data: &PlayAudioData) -> Result<(), ApiError> {
        self.update(Api::Voice, &self.call_url(id, "audio"), data)
    }

    pub fn send_dtmf_to_call(&self, id: &str, data: &SendDtmfData) -> Result<(), ApiError> {
        self.update(Api::Voice, &self.call_url(id, "dtmf"), data)
    }

    pub fn get_call_events(&self, id: &str) -> Result<Vec<CallEvent>, ApiError> {
        self.get(Api::Voice, &self.call_url(id, "events"), &())
    }

    pub fn get_call_event(&self, id: &str, event_id: &str) -> Result<CallEvent, ApiError> {
        self.get(Api::Voice, &self.call_url(id, &format!("events/{event_id}")), &())
    }

    pub fn get_call_recordings(&self, id: &str) -> Result<Vec<Recording>, ApiError> {
        self.get(Api::Voice, &self.call_url(id, "recordings"), &())
    }

    pub fn get_call_transcriptions(&self, id: &str) -> Result<Vec<Transcription>, ApiError> {
        self.get(Api::Voice, &self.call_url(id, "transcriptions"), &())
    }

    /// Start collecting DTMF digits. Returns the gather id.
    pub fn create_gather(&self, id: &str, data: &CreateGatherData) -> Result<String, ApiError> {
        self.create(Api::Voice, &self.call_url(id, "gather"), data)
    }

    pub fn get_gather(&self, id: &str, gather_id: &str) -> Result<Gather, ApiError> {
        self.get(Api::Voice, &self.call_url(id, &format!("gather/{gather_id}")), &())
    }

    pub fn update_gather(&self, id: &str, gather_id: &str, data: &UpdateGatherData) -> Result<(), ApiError> {
        self.update(Api::Voice, &self.call_url(id, &format!("gather/{gather_id}")), data)
    }

    // --- helpers ---

    /// Call `to` from `from`, with any extra settings taken from `options`.
    pub fn call_to(&self, from: &str, to: &str, options: Option<CreateCallData>) -> Result<String, ApiError> {
        let data = CreateCallData {
            from: from.to_string(),
            to: to.to_string(),
            ..options.unwrap_or_default()
        };
        self.create_call(&data)
    }

    pub fn answer_incoming_call(&self, id: &str) -> Result<(), ApiError> {
        self.set_call_state(id, "active")
    }

    pub fn reject_incoming_call(&self, id: &str) -> Result<(), ApiError> {
        self.set_call_state(id, "rejected")
    }

    pub fn hang_up_call(&self, id: &str) -> Result<(), ApiError> {
        self.set_call_state(id, "completed")
    }

    pub fn set_call_recording_enabled(&self, id: &str, enabled: bool) -> Result<(), ApiError> {
        let data = UpdateCallData {
            recording_enabled: Some(enabled),
            ..Default::default()
        };
        self.update_call(id, &data)
    }

    pub fn transfer_call_to(&self, id: &str, transfer_to: &str, options: Option<UpdateCallData>) -> Result<(), ApiError> {
        let data = UpdateCallData {
            state: Some("transferring".to_string()),
            transfer_to: Some(transfer_to.to_string()),
            ..options.unwrap_or_default()
        };
        self.update_call(id, &data)
    }

    pub fn stop_gather(&self, id: &str, gather_id: &str) -> Result<(), ApiError> {
        let data = UpdateGatherData {
            state: "completed".to_string(),
        };
        self.update_gather(id, gather_id, &data)
    }

    pub fn send_dtmf_characters_to_call(&self, id: &str, dtmf_out: &str) -> Result<(), ApiError> {
        let data = SendDtmfData {
            dtmf_out: dtmf_out.to_string(),
        };
        self.send_dtmf_to_call(id, &data)
    }

    fn set_call_state(&self, id: &str, state: &str) -> Result<(), ApiError> {
        let data = UpdateCallData {
            state: Some(state.to_string()),
            ..Default::default()
        };
        self.update_call(id, &data)
    }
}
