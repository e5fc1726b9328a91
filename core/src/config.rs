//! Client configuration: credentials, endpoints and API version.

use std::time::Duration;

use crate::error::ApiError;

pub const DEFAULT_API_ENDPOINT: &str = "https://api.catapult.inetwork.com";
pub const DEFAULT_API_VERSION: &str = "v1";
pub const DEFAULT_MESSAGING_ENDPOINT: &str = "https://messaging.bandwidth.com";
pub const DEFAULT_ACCOUNTS_ENDPOINT: &str = "https://dashboard.bandwidth.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Dashboard credentials. The accounts API authenticates with a
/// username/password pair rather than the API token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountsCredentials {
    pub account_id: String,
    pub username: String,
    pub password: String,
}

/// Everything a `Client` needs to address and authenticate against the API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub user_id: String,
    pub api_token: String,
    pub api_secret: String,
    pub accounts: Option<AccountsCredentials>,
    pub api_endpoint: String,
    pub api_version: String,
    pub messaging_endpoint: String,
    pub accounts_endpoint: String,
    pub timeout: Duration,
    /// Upper bound on a response body in bytes. `None` reads bodies of any
    /// size, which media downloads need.
    pub max_body_size: Option<u64>,
}

impl ClientConfig {
    pub fn new(user_id: &str, api_token: &str, api_secret: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            api_token: api_token.to_string(),
            api_secret: api_secret.to_string(),
            accounts: None,
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            messaging_endpoint: DEFAULT_MESSAGING_ENDPOINT.to_string(),
            accounts_endpoint: DEFAULT_ACCOUNTS_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_body_size: None,
        }
    }

    /// Build a configuration from `BANDWIDTH_*` environment variables.
    ///
    /// Missing mandatory variables surface as `MissingAuthData` from
    /// [`validate`](Self::validate), not here.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        let mut config = Self::new(
            &var("BANDWIDTH_USER_ID").unwrap_or_default(),
            &var("BANDWIDTH_API_TOKEN").unwrap_or_default(),
            &var("BANDWIDTH_API_SECRET").unwrap_or_default(),
        );
        if let Some(endpoint) = var("BANDWIDTH_API_ENDPOINT") {
            config = config.with_api_endpoint(&endpoint);
        }
        if let Some(version) = var("BANDWIDTH_API_VERSION") {
            config = config.with_api_version(&version);
        }
        if let Some(endpoint) = var("BANDWIDTH_MESSAGING_ENDPOINT") {
            config = config.with_messaging_endpoint(&endpoint);
        }
        if let Some(endpoint) = var("BANDWIDTH_ACCOUNTS_ENDPOINT") {
            config = config.with_accounts_endpoint(&endpoint);
        }
        if let (Some(account_id), Some(username), Some(password)) = (
            var("BANDWIDTH_ACCOUNT_ID"),
            var("BANDWIDTH_USERNAME"),
            var("BANDWIDTH_PASSWORD"),
        ) {
            config = config.with_accounts_credentials(&account_id, &username, &password);
        }
        config
    }

    pub fn with_api_version(mut self, version: &str) -> Self {
        self.api_version = version.trim_matches('/').to_string();
        self
    }

    pub fn with_api_endpoint(mut self, endpoint: &str) -> Self {
        self.api_endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    pub fn with_messaging_endpoint(mut self, endpoint: &str) -> Self {
        self.messaging_endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    pub fn with_accounts_endpoint(mut self, endpoint: &str) -> Self {
        self.accounts_endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    /// Point all three APIs at one base URL. Used against the mock server.
    pub fn with_base_url(self, base_url: &str) -> Self {
        self.with_api_endpoint(base_url)
            .with_messaging_endpoint(base_url)
            .with_accounts_endpoint(base_url)
    }

    pub fn with_accounts_credentials(mut self, account_id: &str, username: &str, password: &str) -> Self {
        self.accounts = Some(AccountsCredentials {
            account_id: account_id.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        });
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_body_size(mut self, limit: u64) -> Self {
        self.max_body_size = Some(limit);
        self
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if self.user_id.is_empty() {
            return Err(ApiError::MissingAuthData("user id"));
        }
        if self.api_token.is_empty() {
            return Err(ApiError::MissingAuthData("api token"));
        }
        if self.api_secret.is_empty() {
            return Err(ApiError::MissingAuthData("api secret"));
        }
        if let Some(accounts) = &self.accounts {
            if accounts.account_id.is_empty() || accounts.username.is_empty() || accounts.password.is_empty() {
                return Err(ApiError::MissingAuthData("accounts credentials"));
            }
        }
        Ok(())
    }
}
