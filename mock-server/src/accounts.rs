//! Dashboard (accounts) routes: number orders and the numbers of a SIP peer.
//!
//! Orders are answered `RECEIVED` and report `COMPLETE` on the first read,
//! with numbers invented from the area code or toll-free pattern.

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{new_id, now, xml_error, AppState};

/// Invented numbers end in a four-digit counter.
const MAX_ORDER_QUANTITY: u32 = 9999;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AreaCodeSearch {
    #[serde(rename = "AreaCode")]
    pub area_code: String,
    #[serde(rename = "Quantity")]
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TollFreeSearch {
    #[serde(rename = "TollFreeWildCardPattern")]
    pub pattern: String,
    #[serde(rename = "Quantity")]
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
struct OrderRequest {
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "SiteId")]
    site_id: String,
    #[serde(rename = "PeerId")]
    peer_id: String,
    #[serde(rename = "PartialAllowed", default)]
    partial_allowed: bool,
    #[serde(rename = "CustomerOrderId", default)]
    customer_order_id: String,
    #[serde(rename = "AreaCodeSearchAndOrderType")]
    area_code: Option<AreaCodeSearch>,
    #[serde(rename = "TollFreeWildCharSearchAndOrderType")]
    toll_free: Option<TollFreeSearch>,
}

/// `<Order>` as echoed inside an `<OrderResponse>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDetails {
    #[serde(rename = "id")]
    pub id: String,
    #[serde(rename = "Name", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "OrderCreateDate")]
    pub order_create_date: String,
    #[serde(rename = "SiteId")]
    pub site_id: String,
    #[serde(rename = "PeerId")]
    pub peer_id: String,
    #[serde(rename = "BackOrderRequested")]
    pub back_order_requested: bool,
    #[serde(rename = "PartialAllowed")]
    pub partial_allowed: bool,
    #[serde(rename = "CustomerOrderId", skip_serializing_if = "String::is_empty")]
    pub customer_order_id: String,
    #[serde(rename = "AreaCodeSearchAndOrderType", skip_serializing_if = "Option::is_none")]
    pub area_code: Option<AreaCodeSearch>,
    #[serde(rename = "TollFreeWildCharSearchAndOrderType", skip_serializing_if = "Option::is_none")]
    pub toll_free: Option<TollFreeSearch>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredOrder {
    pub details: OrderDetails,
    pub numbers: Vec<String>,
}

#[derive(Debug, Serialize)]
struct FullNumber {
    #[serde(rename = "FullNumber")]
    full_number: String,
}

#[derive(Debug, Serialize)]
struct CompletedNumbers {
    #[serde(rename = "TelephoneNumber")]
    numbers: Vec<FullNumber>,
}

#[derive(Debug, Serialize)]
#[serde(rename = "OrderResponse")]
struct OrderResponse<'a> {
    #[serde(rename = "Order")]
    order: &'a OrderDetails,
    #[serde(rename = "OrderStatus")]
    status: &'static str,
    #[serde(rename = "CompletedQuantity", skip_serializing_if = "Option::is_none")]
    completed_quantity: Option<usize>,
    #[serde(rename = "CompletedNumbers", skip_serializing_if = "Option::is_none")]
    completed_numbers: Option<CompletedNumbers>,
    #[serde(rename = "OrderCompleteDate", skip_serializing_if = "Option::is_none")]
    order_complete_date: Option<String>,
}

#[derive(Debug, Serialize)]
struct SipPeerNumbers {
    #[serde(rename = "SipPeerTelephoneNumber")]
    numbers: Vec<FullNumber>,
}

#[derive(Debug, Serialize)]
#[serde(rename = "SipPeerTelephoneNumbersResponse")]
struct SipPeerNumbersResponse {
    #[serde(rename = "SipPeerTelephoneNumbers")]
    peers: SipPeerNumbers,
}

pub(crate) fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/accounts/{account_id}/orders", post(create_order))
        .route("/api/accounts/{account_id}/orders/{id}", get(get_order))
        .route(
            "/api/accounts/{account_id}/sites/{site_id}/sippeers/{peer_id}/tns",
            get(get_peer_numbers),
        )
}

fn xml<T: Serialize>(status: StatusCode, value: &T) -> Response {
    match quick_xml::se::to_string(value) {
        Ok(body) => (status, [(header::CONTENT_TYPE, "application/xml")], body).into_response(),
        Err(err) => xml_error(StatusCode::INTERNAL_SERVER_ERROR, "500", &err.to_string()),
    }
}

/// Numbers an order would be filled with. `*` in a toll-free pattern
/// becomes `0`.
fn invent_numbers(details: &OrderDetails) -> Vec<String> {
    let (prefix, quantity) = match (&details.area_code, &details.toll_free) {
        (Some(search), _) => (search.area_code.clone(), search.quantity),
        (None, Some(search)) => (search.pattern.replace('*', "0"), search.quantity),
        (None, None) => return Vec::new(),
    };
    (1..=quantity).map(|n| format!("{prefix}555{n:04}")).collect()
}

async fn create_order(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    headers: HeaderMap,
    body: String,
) -> Response {
    if let Err(denied) = state.credentials.check_account(&headers, &account_id) {
        return denied;
    }
    let request: OrderRequest = match quick_xml::de::from_str(body.trim_start()) {
        Ok(request) => request,
        Err(err) => {
            warn!(error = %err, "unreadable order");
            return xml_error(StatusCode::BAD_REQUEST, "12000", &format!("Invalid order: {err}"));
        }
    };
    let quantity = match (&request.area_code, &request.toll_free) {
        (Some(search), None) => search.quantity,
        (None, Some(search)) => search.quantity,
        _ => {
            return xml_error(
                StatusCode::BAD_REQUEST,
                "12001",
                "Exactly one search and order type is required",
            )
        }
    };
    if !(1..=MAX_ORDER_QUANTITY).contains(&quantity) {
        return xml_error(
            StatusCode::BAD_REQUEST,
            "12002",
            &format!("Quantity must be between 1 and {MAX_ORDER_QUANTITY}"),
        );
    }
    let details = OrderDetails {
        id: new_id("o"),
        name: request.name,
        order_create_date: now(),
        site_id: request.site_id,
        peer_id: request.peer_id,
        back_order_requested: false,
        partial_allowed: request.partial_allowed,
        customer_order_id: request.customer_order_id,
        area_code: request.area_code,
        toll_free: request.toll_free,
    };
    let numbers = invent_numbers(&details);
    info!(id = %details.id, quantity, "order received");
    let response = xml(
        StatusCode::CREATED,
        &OrderResponse {
            order: &details,
            status: "RECEIVED",
            completed_quantity: None,
            completed_numbers: None,
            order_complete_date: None,
        },
    );
    let id = details.id.clone();
    state.store.write().await.orders.insert(id, StoredOrder { details, numbers });
    response
}

async fn get_order(
    State(state): State<AppState>,
    Path((account_id, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if let Err(denied) = state.credentials.check_account(&headers, &account_id) {
        return denied;
    }
    let store = state.store.read().await;
    let Some(order) = store.orders.get(&id) else {
        return xml_error(StatusCode::NOT_FOUND, "404", &format!("Order {id} not found"));
    };
    xml(
        StatusCode::OK,
        &OrderResponse {
            order: &order.details,
            status: "COMPLETE",
            completed_quantity: Some(order.numbers.len()),
            completed_numbers: Some(CompletedNumbers {
                numbers: order
                    .numbers
                    .iter()
                    .map(|n| FullNumber { full_number: n.clone() })
                    .collect(),
            }),
            order_complete_date: Some(now()),
        },
    )
}

async fn get_peer_numbers(
    State(state): State<AppState>,
    Path((account_id, site_id, peer_id)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Response {
    if let Err(denied) = state.credentials.check_account(&headers, &account_id) {
        return denied;
    }
    let store = state.store.read().await;
    let mut numbers: Vec<&String> = store
        .orders
        .values()
        .filter(|o| o.details.site_id == site_id && o.details.peer_id == peer_id)
        .flat_map(|o| o.numbers.iter())
        .collect();
    numbers.sort();
    xml(
        StatusCode::OK,
        &SipPeerNumbersResponse {
            peers: SipPeerNumbers {
                numbers: numbers
                    .into_iter()
                    .map(|n| FullNumber { full_number: n.clone() })
                    .collect(),
            },
        },
    )
}
