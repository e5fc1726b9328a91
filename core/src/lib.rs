//! Synchronous client for the Bandwidth voice, messaging and dashboard APIs.
//!
//! # Overview
//! One method on [`Client`] per vendor endpoint. Each method builds a path,
//! encodes the payload (JSON for the voice and messaging APIs, XML for the
//! dashboard API), runs one HTTP round-trip through a [`Transport`], checks
//! the status code and decodes the body into a typed struct or a generic map.
//!
//! # Design
//! - Requests and responses are plain data ([`HttpRequest`],
//!   [`HttpResponse`]); the network sits behind the `Transport` trait so
//!   every endpoint can be driven from canned fixtures.
//! - `Client` is stateless apart from its configuration and transport.
//! - DTOs mirror the vendor's wire schema field for field. Fields the vendor
//!   sends as either strings or natives go through `codec::lenient`.
//! - The [`bxml`] module builds the XML documents that webhooks answer with.
//!
//! ```no_run
//! use bandwidth_core::{Client, ClientConfig};
//!
//! # fn main() -> Result<(), bandwidth_core::ApiError> {
//! let client = Client::new(ClientConfig::from_env())?;
//! let id = client.send_message_to("+19195551212", "+19195553434", "Hello", None)?;
//! println!("sent {id}");
//! # Ok(())
//! # }
//! ```

pub mod bxml;
pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod http;
pub mod resources;
pub mod response;
pub mod transport;

#[cfg(test)]
mod testing;

pub use client::{Api, Client, Payload};
pub use config::{AccountsCredentials, ClientConfig};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use resources::PageQuery;
pub use transport::{Transport, UreqTransport};
