//! Fixture-replaying transport for unit tests.
//!
//! Each `Fixture` matches on method plus path-and-query, optionally checks
//! the request body and headers, and answers with a canned response.
//! Unmatched requests get an empty 404.

use std::sync::Mutex;

use crate::client::Client;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;

pub(crate) const BASE_URL: &str = "http://mock";

#[derive(Debug, Clone)]
pub(crate) struct Fixture {
    method: HttpMethod,
    path_and_query: String,
    expected_body: Option<String>,
    expected_headers: Vec<(String, String)>,
    response: HttpResponse,
}

impl Fixture {
    pub fn new(method: HttpMethod, path_and_query: &str) -> Self {
        Self {
            method,
            path_and_query: path_and_query.to_string(),
            expected_body: None,
            expected_headers: Vec::new(),
            response: HttpResponse::new(200, ""),
        }
    }

    pub fn get(path_and_query: &str) -> Self {
        Self::new(HttpMethod::Get, path_and_query)
    }

    pub fn post(path_and_query: &str) -> Self {
        Self::new(HttpMethod::Post, path_and_query)
    }

    pub fn put(path_and_query: &str) -> Self {
        Self::new(HttpMethod::Put, path_and_query)
    }

    pub fn delete(path_and_query: &str) -> Self {
        Self::new(HttpMethod::Delete, path_and_query)
    }

    /// JSON bodies are compared structurally, anything else byte for byte.
    pub fn expect_body(mut self, body: &str) -> Self {
        self.expected_body = Some(body.to_string());
        self
    }

    pub fn expect_header(mut self, name: &str, value: &str) -> Self {
        self.expected_headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn respond(mut self, status: u16, body: &str) -> Self {
        self.response.status = status;
        self.response.body = body.as_bytes().to_vec();
        self
    }

    pub fn respond_json(self, body: &str) -> Self {
        self.respond(200, body).respond_header("Content-Type", "application/json")
    }

    pub fn respond_xml(self, body: &str) -> Self {
        self.respond(200, body).respond_header("Content-Type", "application/xml")
    }

    pub fn respond_header(mut self, name: &str, value: &str) -> Self {
        self.response.headers.push((name.to_string(), value.to_string()));
        self
    }

    fn check(&self, request: &HttpRequest) {
        if let Some(expected) = &self.expected_body {
            let actual = request.body_text().unwrap_or_default();
            match (
                serde_json::from_str::<serde_json::Value>(expected),
                serde_json::from_str::<serde_json::Value>(actual),
            ) {
                (Ok(expected), Ok(actual)) => assert_eq!(actual, expected, "{}: body", self.path_and_query),
                _ => assert_eq!(actual, expected.as_str(), "{}: body", self.path_and_query),
            }
        }
        for (name, value) in &self.expected_headers {
            assert_eq!(request.header(name), Some(value.as_str()), "{}: header {name}", self.path_and_query);
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeTransport {
    fixtures: Vec<Fixture>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn new(fixtures: Vec<Fixture>) -> Self {
        Self {
            fixtures,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl Transport for FakeTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let path_and_query = request.url.strip_prefix(BASE_URL).unwrap_or(&request.url).to_string();
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        let fixture = self
            .fixtures
            .iter()
            .find(|f| f.method == request.method && f.path_and_query == path_and_query);
        match fixture {
            Some(fixture) => {
                fixture.check(&request);
                Ok(fixture.response.clone())
            }
            None => Ok(HttpResponse::new(404, "")),
        }
    }
}

pub(crate) fn config() -> ClientConfig {
    ClientConfig::new("userId", "apiToken", "apiSecret")
        .with_base_url(BASE_URL)
        .with_accounts_credentials("accountId", "username", "password")
}

pub(crate) fn client(fixtures: Vec<Fixture>) -> Client<FakeTransport> {
    match Client::with_transport(config(), FakeTransport::new(fixtures)) {
        Ok(client) => client,
        Err(err) => panic!("test client: {err}"),
    }
}
