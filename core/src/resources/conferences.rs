//! Conferences and their members.

use serde::{Deserialize, Serialize};

use crate::client::{Api, Client};
use crate::codec::{lenient, stringify};
use crate::error::ApiError;
use crate::resources::calls::PlayAudioData;
use crate::transport::Transport;

const CONFERENCES_PATH: &str = "conferences";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Conference {
    pub id: String,
    pub state: String,
    pub from: String,
    pub created_time: String,
    pub completed_time: String,
    #[serde(deserialize_with = "lenient::i64_or_string")]
    pub active_members: i64,
    pub callback_url: String,
    #[serde(deserialize_with = "lenient::i64_or_string")]
    pub callback_timeout: i64,
    pub fallback_url: String,
    #[serde(deserialize_with = "lenient::bool_or_string")]
    pub hold: bool,
    #[serde(deserialize_with = "lenient::bool_or_string")]
    pub mute: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConferenceData {
    pub from: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "stringify::option")]
    pub callback_timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_http_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "stringify::option")]
    pub profanity_filter: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConferenceData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "stringify::option")]
    pub mute: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "stringify::option")]
    pub hold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "stringify::option")]
    pub callback_timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConferenceMember {
    pub id: String,
    pub state: String,
    pub added_time: String,
    pub removed_time: String,
    pub call: String,
    #[serde(deserialize_with = "lenient::bool_or_string")]
    pub hold: bool,
    #[serde(deserialize_with = "lenient::bool_or_string")]
    pub mute: bool,
    #[serde(deserialize_with = "lenient::bool_or_string")]
    pub join_tone: bool,
    #[serde(deserialize_with = "lenient::bool_or_string")]
    pub leaving_tone: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConferenceMemberData {
    pub call_id: String,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "stringify::option")]
    pub join_tone: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "stringify::option")]
    pub leaving_tone: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "stringify::option")]
    pub mute: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "stringify::option")]
    pub hold: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConferenceMemberData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "stringify::option")]
    pub mute: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "stringify::option")]
    pub hold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "stringify::option")]
    pub join_tone: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "stringify::option")]
    pub leaving_tone: Option<bool>,
}

impl<T: Transport> Client<T> {
    fn conference_url(&self, id: &str, rest: &str) -> String {
        match rest {
            "" => self.user_url(&format!("{CONFERENCES_PATH}/{id}")),
            rest => self.user_url(&format!("{CONFERENCES_PATH}/{id}/{rest}")),
        }
    }

    fn member_url(&self, id: &str, member_id: &str, rest: &str) -> String {
        match rest {
            "" => self.conference_url(id, &format!("members/{member_id}")),
            rest => self.conference_url(id, &format!("members/{member_id}/{rest}")),
        }
    }

    /// Create a conference. Returns the new conference id.
    pub fn create_conference(&self, data: &CreateConferenceData) -> Result<String, ApiError> {
        self.create(Api::Voice, &self.user_url(CONFERENCES_PATH), data)
    }

    pub fn get_conference(&self, id: &str) -> Result<Conference, ApiError> {
        self.get(Api::Voice, &self.conference_url(id, ""), &())
    }

    pub fn update_conference(&self, id: &str, data: &UpdateConferenceData) -> Result<(), ApiError> {
        self.update(Api::Voice, &self.conference_url(id, ""), data)
    }

    pub fn play_audio_to_conference(&self, id: &str, data: &PlayAudioData) -> Result<(), ApiError> {
        self.update(Api::Voice, &self.conference_url(id, "audio"), data)
    }

    /// Add a call to a conference. Returns the new member id.
    pub fn create_conference_member(&self, id: &str, data: &CreateConferenceMemberData) -> Result<String, ApiError> {
        self.create(Api::Voice, &self.conference_url(id, "members"), data)
    }

    pub fn get_conference_members(&self, id: &str) -> Result<Vec<ConferenceMember>, ApiError> {
        self.get(Api::Voice, &self.conference_url(id, "members"), &())
    }

    pub fn get_conference_member(&self, id: &str, member_id: &str) -> Result<ConferenceMember, ApiError> {
        self.get(Api::Voice, &self.member_url(id, member_id, ""), &())
    }

    pub fn update_conference_member(
        &self,
        id: &str,
        member_id: &str,
        data: &UpdateConferenceMemberData,
    ) -> Result<(), ApiError> {
        self.update(Api::Voice, &self.member_url(id, member_id, ""), data)
    }

    pub fn play_audio_to_conference_member(&self, id: &str, member_id: &str, data: &PlayAudioData) -> Result<(), ApiError> {
        self.update(Api::Voice, &self.member_url(id, member_id, "audio"), data)
    }

    // --- helpers ---

    pub fn terminate_conference(&self, id: &str) -> Result<(), ApiError> {
        let data = UpdateConferenceData {
            state: Some("completed".to_string()),
            ..Default::default()
        };
        self.update_conference(id, &data)
    }

    pub fn mute_conference(&self, id: &str, mute: bool) -> Result<(), ApiError> {
        let data = UpdateConferenceData {
            mute: Some(mute),
            ..Default::default()
        };
        self.update_conference(id, &data)
    }

    /// Remove a member from the conference.
    pub fn delete_conference_member(&self, id: &str, member_id: &str) -> Result<(), ApiError> {
        let data = UpdateConferenceMemberData {
            state: Some("completed".to_string()),
            ..Default::default()
        };
        self.update_conference_member(id, member_id, &data)
    }

    pub fn mute_conference_member(&self, id: &str, member_id: &str, mute: bool) -> Result<(), ApiError> {
        let data = UpdateConferenceMemberData {
            mute: Some(mute),
            ..Default::default()
        };
        self.update_conference_member(id, member_id, &data)
    }

    pub fn hold_conference_member(&self, id: &str, member_id: &str, hold: bool) -> Result<(), ApiError> {
        let data = UpdateConferenceMemberData {
            hold: Some(hold),
            ..Default::default()
        };
        self.update_conference_member(id, member_id, &data)
    }
}
