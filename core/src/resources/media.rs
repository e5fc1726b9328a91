//! Media files stored with the vendor (audio for playback, MMS attachments).
//!
//! Uploads and downloads carry raw bytes, not JSON. Status handling is the
//! same as for every other endpoint.

use std::path::Path;

use serde_json::{Map, Value};

use crate::client::{Api, Client, Payload};
use crate::codec::escape_segment;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::transport::Transport;

const MEDIA_PATH: &str = "media";

/// Content type sent when the caller does not name one.
pub const DEFAULT_MEDIA_CONTENT_TYPE: &str = "application/octet-stream";

/// A downloaded media file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaContent {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl<T: Transport> Client<T> {
    fn media_url(&self, name: &str) -> String {
        self.user_url(&format!("{MEDIA_PATH}/{}", escape_segment(name)))
    }

    /// List stored media. Each entry is the vendor's record as is
    /// (`mediaName`, `content`, `contentLength`).
    pub fn get_media_files(&self) -> Result<Vec<Map<String, Value>>, ApiError> {
        self.get(Api::Voice, &self.user_url(MEDIA_PATH), &())
    }

    pub fn upload_media_file(&self, name: &str, bytes: impl Into<Vec<u8>>, content_type: Option<&str>) -> Result<(), ApiError> {
        let payload = Payload::raw(content_type.unwrap_or(DEFAULT_MEDIA_CONTENT_TYPE), bytes.into());
        self.send(Api::Voice, HttpMethod::Put, &self.media_url(name), &[], Some(payload))?;
        Ok(())
    }

    /// Upload the contents of a local file.
    pub fn upload_media_file_from_path(
        &self,
        name: &str,
        path: impl AsRef<Path>,
        content_type: Option<&str>,
    ) -> Result<(), ApiError> {
        let bytes = std::fs::read(path)?;
        self.upload_media_file(name, bytes, content_type)
    }

    pub fn download_media_file(&self, name: &str) -> Result<MediaContent, ApiError> {
        let response = self.send(Api::Voice, HttpMethod::Get, &self.media_url(name), &[], None)?;
        let content_type = response.header("Content-Type").unwrap_or_default().to_string();
        Ok(MediaContent {
            content_type,
            bytes: response.body,
        })
    }

    pub fn delete_media_file(&self, name: &str) -> Result<(), ApiError> {
        self.delete(Api::Voice, &self.media_url(name))
    }
}
