use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{app, Credentials};
use serde_json::Value;
use tower::ServiceExt;

// base64("apiToken:apiSecret") and base64("username:password")
const TOKEN_AUTH: &str = "Basic YXBpVG9rZW46YXBpU2VjcmV0";
const PASSWORD_AUTH: &str = "Basic dXNlcm5hbWU6cGFzc3dvcmQ=";

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

async fn body_text(response: axum::response::Response) -> String {
    String::from_utf8(body_bytes(response).await.to_vec()).unwrap()
}

fn request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, TOKEN_AUTH)
        .body(String::new())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, TOKEN_AUTH)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn xml_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, PASSWORD_AUTH)
        .header(http::header::CONTENT_TYPE, "application/xml")
        .body(body.to_string())
        .unwrap()
}

fn location_id(response: &axum::response::Response) -> String {
    let location = response.headers()[http::header::LOCATION].to_str().unwrap();
    location.rsplit('/').next().unwrap().to_string()
}

fn mock() -> Router {
    app(Credentials::default())
}

// --- auth ---

#[tokio::test]
async fn missing_credentials_are_rejected() {
    let resp = mock()
        .oneshot(
            Request::builder()
                .uri("/v1/users/userId/calls")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["code"], "unauthorized");
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let resp = mock().oneshot(request("GET", "/v1/users/someoneElse/calls")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_route_answers_json_404() {
    let resp = mock().oneshot(request("GET", "/v1/nothing/here")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["code"], "not-found");
}

// --- account ---

#[tokio::test]
async fn account_reports_balance() {
    let resp = mock().oneshot(request("GET", "/v1/users/userId/account")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["balance"], "100.00");
}

// --- calls ---

#[tokio::test]
async fn list_calls_empty() {
    let resp = mock().oneshot(request("GET", "/v1/users/userId/calls")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, serde_json::json!([]));
}

#[tokio::test]
async fn create_then_answer_and_hang_up_call() {
    let app = mock();
    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/users/userId/calls",
            r#"{"from":"+1234567890","to":"+1234567891","recordingEnabled":true}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let id = location_id(&resp);

    let resp = app
        .clone()
        .oneshot(json_request("POST", &format!("/v1/users/userId/calls/{id}"), r#"{"state":"active"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .clone()
        .oneshot(json_request("POST", &format!("/v1/users/userId/calls/{id}"), r#"{"state":"completed"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .clone()
        .oneshot(request("GET", &format!("/v1/users/userId/calls/{id}")))
        .await
        .unwrap();
    let call = body_json(resp).await;
    assert_eq!(call["state"], "completed");
    assert_eq!(call["recordingEnabled"], true);
    assert!(call["activeTime"].is_string());
    assert!(call["endTime"].is_string());

    let resp = app
        .oneshot(json_request("POST", &format!("/v1/users/userId/calls/{id}"), r#"{"state":"active"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["code"], "call-already-ended");
}

#[tokio::test]
async fn unknown_call_state_is_rejected() {
    let app = mock();
    let resp = app
        .clone()
        .oneshot(json_request("POST", "/v1/users/userId/calls", r#"{"from":"+1","to":"+2"}"#))
        .await
        .unwrap();
    let id = location_id(&resp);

    let resp = app
        .oneshot(json_request("POST", &format!("/v1/users/userId/calls/{id}"), r#"{"state":"dancing"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["code"], "invalid-state");
}

#[tokio::test]
async fn transfer_requires_target() {
    let app = mock();
    let resp = app
        .clone()
        .oneshot(json_request("POST", "/v1/users/userId/calls", r#"{"from":"+1","to":"+2"}"#))
        .await
        .unwrap();
    let id = location_id(&resp);

    let resp = app
        .oneshot(json_request("POST", &format!("/v1/users/userId/calls/{id}"), r#"{"state":"transferring"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_call_body_is_a_vendor_error() {
    let resp = mock()
        .oneshot(json_request("POST", "/v1/users/userId/calls", r#"{"to":"+2"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["code"], "invalid-request");
}

#[tokio::test]
async fn get_missing_call_returns_404() {
    let resp = mock().oneshot(request("GET", "/v1/users/userId/calls/c-missing")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- messages ---

#[tokio::test]
async fn messages_are_stored_and_filtered() {
    let app = mock();
    for to in ["+2", "+3"] {
        let body = format!(r#"{{"from":"+1","to":"{to}","text":"hi"}}"#);
        let resp = app
            .clone()
            .oneshot(json_request("POST", "/v1/users/userId/messages", &body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = app
        .clone()
        .oneshot(request("GET", "/v1/users/userId/messages?to=%2B3"))
        .await
        .unwrap();
    let messages = body_json(resp).await;
    assert_eq!(messages.as_array().unwrap().len(), 1);
    assert_eq!(messages[0]["to"], "+3");

    let id = messages[0]["id"].as_str().unwrap().to_string();
    let resp = app
        .oneshot(request("GET", &format!("/v1/users/userId/messages/{id}")))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["text"], "hi");
}

#[tokio::test]
async fn empty_message_is_rejected() {
    let resp = mock()
        .oneshot(json_request("POST", "/v1/users/userId/messages", r#"{"from":"+1","to":"+2"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn v2_message_is_accepted_and_echoed() {
    let resp = mock()
        .oneshot(json_request(
            "POST",
            "/api/v2/users/userId/messages",
            r#"{"from":"+1","to":["+2","+3"],"text":"hey","applicationId":"app"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    let body = body_json(resp).await;
    assert_eq!(body["owner"], "+1");
    assert_eq!(body["to"], serde_json::json!(["+2", "+3"]));
    assert_eq!(body["segmentCount"], 1);
    assert!(body["id"].as_str().unwrap().starts_with("m-"));
}

#[tokio::test]
async fn v2_message_without_recipients_is_rejected() {
    let resp = mock()
        .oneshot(json_request(
            "POST",
            "/api/v2/users/userId/messages",
            r#"{"from":"+1","to":[],"applicationId":"app"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- media ---

#[tokio::test]
async fn media_upload_download_delete() {
    let app = mock();
    let upload = Request::builder()
        .method("PUT")
        .uri("/v1/users/userId/media/hello.txt")
        .header(http::header::AUTHORIZATION, TOKEN_AUTH)
        .header(http::header::CONTENT_TYPE, "text/plain")
        .body("hello".to_string())
        .unwrap();
    let resp = app.clone().oneshot(upload).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.clone().oneshot(request("GET", "/v1/users/userId/media")).await.unwrap();
    let listing = body_json(resp).await;
    assert_eq!(listing[0]["mediaName"], "hello.txt");
    assert_eq!(listing[0]["contentLength"], 5);

    let resp = app
        .clone()
        .oneshot(request("GET", "/v1/users/userId/media/hello.txt"))
        .await
        .unwrap();
    assert_eq!(resp.headers()[http::header::CONTENT_TYPE], "text/plain");
    assert_eq!(body_bytes(resp).await.as_ref(), b"hello");

    let resp = app
        .clone()
        .oneshot(request("DELETE", "/v1/users/userId/media/hello.txt"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(request("DELETE", "/v1/users/userId/media/hello.txt"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- orders ---

const AREA_CODE_ORDER: &str = "<Order><SiteId>12345</SiteId><PeerId>123123</PeerId><PartialAllowed>false</PartialAllowed>\
<AreaCodeSearchAndOrderType><AreaCode>734</AreaCode><Quantity>2</Quantity></AreaCodeSearchAndOrderType></Order>";

#[tokio::test]
async fn order_is_received_then_complete() {
    let app = mock();
    let resp = app
        .clone()
        .oneshot(xml_request("POST", "/api/accounts/accountId/orders", AREA_CODE_ORDER))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_text(resp).await;
    assert!(body.contains("<OrderStatus>RECEIVED</OrderStatus>"));
    let start = body.find("<id>").unwrap() + 4;
    let end = body.find("</id>").unwrap();
    let id = body[start..end].to_string();

    let resp = app
        .clone()
        .oneshot(xml_request("GET", &format!("/api/accounts/accountId/orders/{id}"), ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("<OrderStatus>COMPLETE</OrderStatus>"));
    assert!(body.contains("<FullNumber>7345550001</FullNumber>"));
    assert!(body.contains("<FullNumber>7345550002</FullNumber>"));

    let resp = app
        .oneshot(xml_request("GET", "/api/accounts/accountId/sites/12345/sippeers/123123/tns", ""))
        .await
        .unwrap();
    let body = body_text(resp).await;
    assert!(body.starts_with("<SipPeerTelephoneNumbersResponse>"));
    assert!(body.contains("<SipPeerTelephoneNumber><FullNumber>7345550001</FullNumber></SipPeerTelephoneNumber>"));
}

#[tokio::test]
async fn order_without_search_type_is_rejected() {
    let resp = mock()
        .oneshot(xml_request(
            "POST",
            "/api/accounts/accountId/orders",
            "<Order><SiteId>1</SiteId><PeerId>2</PeerId></Order>",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_text(resp).await;
    assert!(body.contains("<ErrorCode>12001</ErrorCode>"));
}

#[tokio::test]
async fn accounts_routes_reject_token_auth_with_xml() {
    let resp = mock()
        .oneshot(request("GET", "/api/accounts/accountId/orders/o-1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_text(resp).await;
    assert!(body.contains("<Description>Invalid credentials</Description>"));
}

#[tokio::test]
async fn missing_order_is_xml_404() {
    let resp = mock()
        .oneshot(xml_request("GET", "/api/accounts/accountId/orders/o-missing", ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_text(resp).await.contains("<ErrorCode>404</ErrorCode>"));
}

#[tokio::test]
async fn order_quantity_is_bounded() {
    let app = mock();
    for quantity in ["0", "10000", "4000000000"] {
        let body = format!(
            "<Order><SiteId>1</SiteId><PeerId>2</PeerId>\
             <AreaCodeSearchAndOrderType><AreaCode>919</AreaCode><Quantity>{quantity}</Quantity></AreaCodeSearchAndOrderType></Order>"
        );
        let resp = app
            .clone()
            .oneshot(xml_request("POST", "/api/accounts/accountId/orders", &body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "quantity {quantity}");
        assert!(body_text(resp).await.contains("<ErrorCode>12002</ErrorCode>"));
    }

    let body = "<Order><SiteId>1</SiteId><PeerId>2</PeerId>\
                <TollFreeWildCharSearchAndOrderType><TollFreeWildCardPattern>8**</TollFreeWildCardPattern><Quantity>9999</Quantity></TollFreeWildCharSearchAndOrderType></Order>";
    let resp = app
        .oneshot(xml_request("POST", "/api/accounts/accountId/orders", body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
}
