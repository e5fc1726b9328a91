//! The request pipeline shared by every endpoint function.
//!
//! # Design
//! `Client` holds the configuration and a `Transport` and carries no mutable
//! state between calls. Each endpoint goes through the same steps:
//! `build_request` composes the URL, auth and content headers, the transport
//! executes it, `check_response` branches on the status code, and the codec
//! decodes the body into the caller's type. The per-resource modules only
//! choose a path template and the request/response types.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::codec::{self, Format};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::response::check_response;
use crate::transport::{Transport, UreqTransport};

pub const USER_AGENT: &str = concat!("bandwidth-core/", env!("CARGO_PKG_VERSION"));

/// Which vendor API a request targets. Decides the base URL, credentials
/// and body format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Api {
    /// Voice and catalogue API (`/{version}/users/{user_id}/...`), JSON.
    Voice,
    /// Messaging API v2 (`/api/v2/users/{user_id}/messages`), JSON.
    Messaging,
    /// Dashboard API (`/api/accounts/{account_id}/...`), XML.
    Accounts,
}

impl Api {
    pub fn format(self) -> Format {
        match self {
            Api::Voice | Api::Messaging => Format::Json,
            Api::Accounts => Format::Xml,
        }
    }
}

/// An encoded request body and its content type.
#[derive(Debug, Clone)]
pub struct Payload {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Payload {
    pub fn encode<B: Serialize + ?Sized>(format: Format, body: &B) -> Result<Self, ApiError> {
        Ok(Self {
            content_type: format.mime().to_string(),
            bytes: codec::encode(format, body)?,
        })
    }

    pub fn raw(content_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            content_type: content_type.to_string(),
            bytes,
        }
    }
}

/// Synchronous client for the vendor API.
#[derive(Debug, Clone)]
pub struct Client<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl Client<UreqTransport> {
    /// Validate `config` and create a client over a shared ureq agent.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        config.validate()?;
        let transport = UreqTransport::new(config.timeout).with_body_limit(config.max_body_size.unwrap_or(u64::MAX));
        Ok(Self { config, transport })
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, ApiError> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// URL of a resource owned by the configured user on the voice API.
    pub fn user_url(&self, path: &str) -> String {
        let base = format!(
            "{}/{}/users/{}",
            self.config.api_endpoint, self.config.api_version, self.config.user_id
        );
        join(base, path)
    }

    /// URL of a resource on the voice API that is not user-scoped.
    pub fn global_url(&self, path: &str) -> String {
        join(format!("{}/{}", self.config.api_endpoint, self.config.api_version), path)
    }

    pub fn messaging_url(&self) -> String {
        format!("{}/api/v2/users/{}/messages", self.config.messaging_endpoint, self.config.user_id)
    }

    pub fn accounts_url(&self, path: &str) -> Result<String, ApiError> {
        let accounts = self.config.accounts.as_ref().ok_or(ApiError::MissingAccountsCredentials)?;
        let base = format!("{}/api/accounts/{}", self.config.accounts_endpoint, accounts.account_id);
        Ok(join(base, path))
    }

    /// Compose a request: query string, basic auth, `Accept`, `User-Agent`
    /// and, when there is a payload, `Content-Type`.
    pub fn build_request(
        &self,
        api: Api,
        method: HttpMethod,
        url: &str,
        query: &[(String, String)],
        payload: Option<Payload>,
    ) -> Result<HttpRequest, ApiError> {
        let url = if query.is_empty() {
            url.to_string()
        } else {
            let mut parsed = Url::parse(url)?;
            parsed.query_pairs_mut().extend_pairs(query);
            parsed.to_string()
        };

        let (user, password) = match api {
            Api::Voice | Api::Messaging => (self.config.api_token.as_str(), self.config.api_secret.as_str()),
            Api::Accounts => {
                let accounts = self.config.accounts.as_ref().ok_or(ApiError::MissingAccountsCredentials)?;
                (accounts.username.as_str(), accounts.password.as_str())
            }
        };
        let credentials = STANDARD.encode(format!("{user}:{password}"));

        let mut headers = vec![
            ("Authorization".to_string(), format!("Basic {credentials}")),
            ("Accept".to_string(), api.format().mime().to_string()),
            ("User-Agent".to_string(), USER_AGENT.to_string()),
        ];
        let body = payload.map(|p| {
            headers.push(("Content-Type".to_string(), p.content_type));
            p.bytes
        });

        Ok(HttpRequest { method, url, headers, body })
    }

    /// Run a request through the transport and the status-code check.
    pub fn execute(&self, api: Api, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(?api, method = %request.method, url = %request.url, "sending request");
        let response = self.transport.execute(request)?;
        check_response(api.format(), response)
    }

    pub(crate) fn send(
        &self,
        api: Api,
        method: HttpMethod,
        url: &str,
        query: &[(String, String)],
        payload: Option<Payload>,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.build_request(api, method, url, query, payload)?;
        self.execute(api, request)
    }

    pub(crate) fn get<R, Q>(&self, api: Api, url: &str, query: &Q) -> Result<R, ApiError>
    where
        R: DeserializeOwned + Default,
        Q: Serialize + ?Sized,
    {
        let query = codec::query_pairs(query)?;
        let response = self.send(api, HttpMethod::Get, url, &query, None)?;
        codec::decode(api.format(), &response.body)
    }

    /// POST a body and return the id of the created resource from `Location`.
    pub(crate) fn create<B: Serialize + ?Sized>(&self, api: Api, url: &str, body: &B) -> Result<String, ApiError> {
        let payload = Payload::encode(api.format(), body)?;
        let response = self.send(api, HttpMethod::Post, url, &[], Some(payload))?;
        Ok(response.location_id())
    }

    /// POST a body and decode the response.
    pub(crate) fn post<B, R>(&self, api: Api, url: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned + Default,
    {
        let payload = Payload::encode(api.format(), body)?;
        let response = self.send(api, HttpMethod::Post, url, &[], Some(payload))?;
        codec::decode(api.format(), &response.body)
    }

    /// POST a body where only the status matters.
    pub(crate) fn update<B: Serialize + ?Sized>(&self, api: Api, url: &str, body: &B) -> Result<(), ApiError> {
        let payload = Payload::encode(api.format(), body)?;
        self.send(api, HttpMethod::Post, url, &[], Some(payload))?;
        Ok(())
    }

    pub(crate) fn delete(&self, api: Api, url: &str) -> Result<(), ApiError> {
        self.send(api, HttpMethod::Delete, url, &[], None)?;
        Ok(())
    }
}

fn join(base: String, path: &str) -> String {
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base
    } else {
        format!("{base}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{client, Fixture};

    #[test]
    fn urls_follow_api_layout() {
        let c = client(Vec::new());
        assert_eq!(c.user_url("calls"), "http://mock/v1/users/userId/calls");
        assert_eq!(c.user_url(""), "http://mock/v1/users/userId");
        assert_eq!(c.global_url("availableNumbers/local"), "http://mock/v1/availableNumbers/local");
        assert_eq!(c.messaging_url(), "http://mock/api/v2/users/userId/messages");
        assert_eq!(c.accounts_url("orders").unwrap(), "http://mock/api/accounts/accountId/orders");
    }

    #[test]
    fn voice_requests_use_token_auth_and_json() {
        let c = client(Vec::new());
        let req = c
            .build_request(Api::Voice, HttpMethod::Get, &c.user_url("calls"), &[], None)
            .unwrap();
        // base64("apiToken:apiSecret")
        assert_eq!(req.header("authorization"), Some("Basic YXBpVG9rZW46YXBpU2VjcmV0"));
        assert_eq!(req.header("accept"), Some("application/json"));
        assert_eq!(req.header("user-agent"), Some(USER_AGENT));
        assert!(req.header("content-type").is_none());
        assert!(req.body.is_none());
    }

    #[test]
    fn accounts_requests_use_password_auth_and_xml() {
        let c = client(Vec::new());
        let payload = Payload::raw("application/xml", b"<Order/>".to_vec());
        let req = c
            .build_request(Api::Accounts, HttpMethod::Post, &c.accounts_url("orders").unwrap(), &[], Some(payload))
            .unwrap();
        // base64("username:password")
        assert_eq!(req.header("authorization"), Some("Basic dXNlcm5hbWU6cGFzc3dvcmQ="));
        assert_eq!(req.header("accept"), Some("application/xml"));
        assert_eq!(req.header("content-type"), Some("application/xml"));
        assert_eq!(req.body_text(), Some("<Order/>"));
    }

    #[test]
    fn query_is_form_encoded() {
        let c = client(Vec::new());
        let query = vec![
            ("city".to_string(), "Cary".to_string()),
            ("name".to_string(), "a b+c".to_string()),
        ];
        let req = c
            .build_request(Api::Voice, HttpMethod::Get, &c.global_url("x"), &query, None)
            .unwrap();
        assert_eq!(req.url, "http://mock/v1/x?city=Cary&name=a+b%2Bc");
    }

    #[test]
    fn accounts_api_requires_credentials() {
        let config = ClientConfig::new("userId", "apiToken", "apiSecret").with_base_url("http://mock");
        let c = Client::with_transport(config, crate::testing::FakeTransport::new(Vec::new())).unwrap();
        assert!(matches!(c.accounts_url("orders"), Err(ApiError::MissingAccountsCredentials)));
        let err = c
            .build_request(Api::Accounts, HttpMethod::Get, "http://mock/api/accounts/x", &[], None)
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingAccountsCredentials));
        assert!(c.transport().requests().is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ClientConfig::new("", "apiToken", "apiSecret");
        assert!(matches!(Client::new(config), Err(ApiError::MissingAuthData(_))));
    }

    #[test]
    fn create_returns_location_id() {
        let c = client(vec![Fixture::post("/v1/users/userId/domains")
            .expect_body(r#"{"name":"d"}"#)
            .respond(201, "")
            .respond_header("Location", "/v1/users/userId/domains/dom-1")]);
        let id = c
            .create(Api::Voice, &c.user_url("domains"), &serde_json::json!({"name": "d"}))
            .unwrap();
        assert_eq!(id, "dom-1");
    }

    #[test]
    fn unmatched_route_surfaces_status_error() {
        let c = client(Vec::new());
        let err = c.delete(Api::Voice, &c.user_url("domains/1")).unwrap_err();
        assert!(err.is_not_found());
    }
}
