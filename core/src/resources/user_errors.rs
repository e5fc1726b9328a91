//! Errors the vendor recorded against the user's applications.

use serde::{Deserialize, Serialize};

use crate::client::{Api, Client};
use crate::error::ApiError;
use crate::resources::PageQuery;
use crate::transport::Transport;

const ERRORS_PATH: &str = "errors";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserError {
    pub id: String,
    pub category: String,
    pub time: String,
    pub code: String,
    pub message: String,
    pub details: Vec<ErrorDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorDetail {
    pub id: String,
    pub name: String,
    pub value: String,
}

impl<T: Transport> Client<T> {
    pub fn get_errors(&self, query: Option<&PageQuery>) -> Result<Vec<UserError>, ApiError> {
        self.get(Api::Voice, &self.user_url(ERRORS_PATH), &query)
    }

    pub fn get_error(&self, id: &str) -> Result<UserError, ApiError> {
        self.get(Api::Voice, &self.user_url(&format!("{ERRORS_PATH}/{id}")), &())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{client, Fixture};

    const ERRORS: &str = r#"[
        {
            "time": "2012-11-15T01:30:16.208Z",
            "category": "unavailable",
            "id": "{userErrorId1}",
            "code": "no-callback-for-call"
        },
        {
            "time": "2012-11-15T01:29:24.512Z",
            "category": "unavailable",
            "id": "{userErrorId2}",
            "message": "No application is configured for number +19195556666",
            "code": "no-application-for-number"
        }
    ]"#;

    #[test]
    fn get_errors() {
        let c = client(vec![Fixture::get("/v1/users/userId/errors").respond_json(ERRORS)]);
        let errors = c.get_errors(None).unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].message, "");
        assert_eq!(errors[1].code, "no-application-for-number");
    }

    #[test]
    fn get_errors_with_query() {
        let c = client(vec![Fixture::get("/v1/users/userId/errors?size=2").respond_json(ERRORS)]);
        assert_eq!(c.get_errors(Some(&PageQuery::size(2))).unwrap().len(), 2);
    }

    #[test]
    fn get_errors_fail() {
        let c = client(vec![Fixture::get("/v1/users/userId/errors").respond(400, "")]);
        assert!(c.get_errors(None).is_err());
    }

    #[test]
    fn get_error_with_details() {
        let c = client(vec![Fixture::get("/v1/users/userId/errors/123").respond_json(
            r#"{
                "time": "2012-11-15T01:29:24.512Z",
                "category": "unavailable",
                "id": "{userErrorId}",
                "message": "No application is configured for number +19195556666",
                "code": "no-application-for-number",
                "details": [
                    {"id": "{errorDetailId1}", "name": "requestPath", "value": "users/{userId}/calls"},
                    {"id": "{errorDetailId2}", "name": "remoteAddress", "value": "216.82.234.65"}
                ]
            }"#,
        )]);
        let error = c.get_error("123").unwrap();
        assert_eq!(error.id, "{userErrorId}");
        assert_eq!(error.details.len(), 2);
        assert_eq!(error.details[1].value, "216.82.234.65");
    }
}
