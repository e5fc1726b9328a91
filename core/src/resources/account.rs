//! Account data: the voice API account record and the dashboard's SIP peer
//! lookups.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::{Api, Client};
use crate::codec::escape_segment;
use crate::error::ApiError;
use crate::transport::Transport;

const ACCOUNT_PATH: &str = "account";

/// A SIP peer (location) associated with an application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssociatedSipPeer {
    #[serde(rename = "SiteId")]
    pub site_id: String,
    #[serde(rename = "SiteName")]
    pub site_name: String,
    /// Used together with `site_id` to list the peer's numbers.
    #[serde(rename = "PeerId")]
    pub peer_id: String,
    #[serde(rename = "PeerName")]
    pub peer_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssociatedSipPeers {
    #[serde(rename = "AssociatedSipPeer")]
    pub associated: Vec<AssociatedSipPeer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename = "AssociatedSipPeersResponse")]
pub struct AssociatedSipPeersResponse {
    #[serde(rename = "AssociatedSipPeers")]
    pub peers: AssociatedSipPeers,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelephoneNumber {
    #[serde(rename = "FullNumber")]
    pub full_number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SipPeerTelephoneNumbers {
    #[serde(rename = "SipPeerTelephoneNumber")]
    pub numbers: Vec<TelephoneNumber>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename = "SipPeerTelephoneNumbersResponse")]
pub struct SipPeerTelephoneNumbersResponse {
    #[serde(rename = "SipPeerTelephoneNumbers")]
    pub peers: SipPeerTelephoneNumbers,
}

impl<T: Transport> Client<T> {
    /// Balance and account type of the voice API account.
    pub fn get_account(&self) -> Result<Map<String, Value>, ApiError> {
        self.get(Api::Voice, &self.user_url(ACCOUNT_PATH), &())
    }

    pub fn get_associated_peers(&self, application_id: &str) -> Result<AssociatedSipPeersResponse, ApiError> {
        let url = self.accounts_url(&format!("applications/{}/associatedsippeers", escape_segment(application_id)))?;
        self.get(Api::Accounts, &url, &())
    }

    /// Numbers assigned to one SIP peer of a site.
    pub fn get_numbers(&self, site_id: &str, peer_id: &str) -> Result<SipPeerTelephoneNumbersResponse, ApiError> {
        let url = self.accounts_url(&format!(
            "sites/{}/sippeers/{}/tns",
            escape_segment(site_id),
            escape_segment(peer_id)
        ))?;
        self.get(Api::Accounts, &url, &())
    }
}
