//! SIP domains.

use serde::{Deserialize, Serialize};

use crate::client::{Api, Client};
use crate::error::ApiError;
use crate::transport::Transport;

pub(crate) const DOMAINS_PATH: &str = "domains";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Domain {
    pub id: String,
    pub name: String,
    pub description: String,
    pub endpoints_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDomainData {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl<T: Transport> Client<T> {
    pub fn get_domains(&self) -> Result<Vec<Domain>, ApiError> {
        self.get(Api::Voice, &self.user_url(DOMAINS_PATH), &())
    }

    /// Create a domain. Returns the new domain id.
    pub fn create_domain(&self, data: &CreateDomainData) -> Result<String, ApiError> {
        self.create(Api::Voice, &self.user_url(DOMAINS_PATH), data)
    }

    pub fn delete_domain(&self, id: &str) -> Result<(), ApiError> {
        self.delete(Api::Voice, &self.user_url(&format!("{DOMAINS_PATH}/{id}")))
    }
}
