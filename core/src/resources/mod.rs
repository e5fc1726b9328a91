//! Endpoint functions, one module per vendor resource.
//!
//! # Design
//! Every module adds methods to [`Client`](crate::Client) through its own
//! `impl<T: Transport> Client<T>` block and defines the DTOs and request
//! payloads for its resource. Path templates live next to the functions that
//! use them. Helpers (`hang_up_call`, `reserve_phone_number`, ...) are thin
//! wrappers that fill in a payload and call the plain endpoint.

pub mod account;
pub mod applications;
pub mod available_numbers;
pub mod bridges;
pub mod calls;
pub mod conferences;
pub mod domains;
pub mod endpoints;
pub mod media;
pub mod messages;
pub mod number_info;
pub mod orders;
pub mod phone_numbers;
pub mod recordings;
pub mod transcriptions;
pub mod user_errors;

use serde::{Deserialize, Serialize};

/// Paging parameters shared by the list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

impl PageQuery {
    pub fn size(size: u32) -> Self {
        Self {
            page: None,
            size: Some(size),
        }
    }
}
