//! SIP endpoints that belong to a domain, and their auth tokens.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::client::{Api, Client};
use crate::codec::{self, lenient, stringify};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::resources::domains::DOMAINS_PATH;
use crate::transport::Transport;

const ENDPOINTS_PATH: &str = "endpoints";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DomainEndpoint {
    pub id: String,
    pub name: String,
    pub description: String,
    pub domain_id: String,
    pub application_id: String,
    #[serde(deserialize_with = "lenient::bool_or_string")]
    pub enabled: bool,
    pub sip_uri: String,
    pub credentials: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointCredentials {
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Payload for creating or updating a domain endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainEndpointData {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "stringify::option")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<EndpointCredentials>,
}

/// Short-lived token a SIP endpoint can use instead of its password.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainEndpointToken {
    pub token: String,
    #[serde(deserialize_with = "lenient::i64_or_string")]
    pub expires: i64,
}

impl<T: Transport> Client<T> {
    fn endpoints_url(&self, domain_id: &str, rest: &str) -> String {
        match rest {
            "" => self.user_url(&format!("{DOMAINS_PATH}/{domain_id}/{ENDPOINTS_PATH}")),
            rest => self.user_url(&format!("{DOMAINS_PATH}/{domain_id}/{ENDPOINTS_PATH}/{rest}")),
        }
    }

    pub fn get_domain_endpoints(&self, domain_id: &str) -> Result<Vec<DomainEndpoint>, ApiError> {
        self.get(Api::Voice, &self.endpoints_url(domain_id, ""), &())
    }

    /// Create an endpoint in a domain. Returns the new endpoint id.
    pub fn create_domain_endpoint(&self, domain_id: &str, data: &DomainEndpointData) -> Result<String, ApiError> {
        self.create(Api::Voice, &self.endpoints_url(domain_id, ""), data)
    }

    pub fn get_domain_endpoint(&self, domain_id: &str, endpoint_id: &str) -> Result<DomainEndpoint, ApiError> {
        self.get(Api::Voice, &self.endpoints_url(domain_id, endpoint_id), &())
    }

    pub fn update_domain_endpoint(
        &self,
        domain_id: &str,
        endpoint_id: &str,
        data: &DomainEndpointData,
    ) -> Result<(), ApiError> {
        self.update(Api::Voice, &self.endpoints_url(domain_id, endpoint_id), data)
    }

    pub fn delete_domain_endpoint(&self, domain_id: &str, endpoint_id: &str) -> Result<(), ApiError> {
        self.delete(Api::Voice, &self.endpoints_url(domain_id, endpoint_id))
    }

    /// Issue an auth token for an endpoint. The request has no body.
    pub fn create_domain_endpoint_token(&self, domain_id: &str, endpoint_id: &str) -> Result<DomainEndpointToken, ApiError> {
        let url = self.endpoints_url(domain_id, &format!("{endpoint_id}/tokens"));
        let response = self.send(Api::Voice, HttpMethod::Post, &url, &[], None)?;
        codec::decode(Api::Voice.format(), &response.body)
    }
}
