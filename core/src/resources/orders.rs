//! Number orders placed through the dashboard (accounts) XML API.
//!
//! An order is created with `POST orders` and answered with status
//! `RECEIVED`. The vendor fills it asynchronously; `get_order` reports
//! `COMPLETE` together with the numbers that were assigned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{Api, Client};
use crate::codec::escape_segment;
use crate::error::ApiError;
use crate::resources::account::TelephoneNumber;
use crate::transport::Transport;

const ORDERS_PATH: &str = "orders";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaCodeSearchAndOrderType {
    #[serde(rename = "AreaCode")]
    pub area_code: String,
    #[serde(rename = "Quantity")]
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TollFreeWildCharSearchAndOrderType {
    #[serde(rename = "TollFreeWildCardPattern")]
    pub toll_free_wild_card_pattern: String,
    #[serde(rename = "Quantity")]
    pub quantity: u32,
}

/// `<Order>` body searching by area code.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename = "Order")]
pub struct AreaCodeOrder {
    #[serde(rename = "Name", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "SiteId")]
    pub site_id: String,
    #[serde(rename = "PeerId")]
    pub peer_id: String,
    #[serde(rename = "PartialAllowed")]
    pub partial_allowed: bool,
    #[serde(rename = "CustomerOrderId", skip_serializing_if = "String::is_empty")]
    pub customer_order_id: String,
    #[serde(rename = "AreaCodeSearchAndOrderType")]
    pub search: AreaCodeSearchAndOrderType,
}

/// `<Order>` body searching toll-free numbers by wildcard pattern (`8**`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename = "Order")]
pub struct TollFreeOrder {
    #[serde(rename = "Name", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "SiteId")]
    pub site_id: String,
    #[serde(rename = "PeerId")]
    pub peer_id: String,
    #[serde(rename = "PartialAllowed")]
    pub partial_allowed: bool,
    #[serde(rename = "CustomerOrderId", skip_serializing_if = "String::is_empty")]
    pub customer_order_id: String,
    #[serde(rename = "TollFreeWildCharSearchAndOrderType")]
    pub search: TollFreeWildCharSearchAndOrderType,
}

/// The order as the vendor echoes it back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderResponseOrder {
    #[serde(rename = "id")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "OrderCreateDate")]
    pub order_create_date: Option<DateTime<Utc>>,
    #[serde(rename = "SiteId")]
    pub site_id: String,
    #[serde(rename = "PeerId")]
    pub peer_id: String,
    #[serde(rename = "BackOrderRequested")]
    pub back_order_requested: bool,
    #[serde(rename = "PartialAllowed")]
    pub partial_allowed: bool,
    #[serde(rename = "CustomerOrderId")]
    pub customer_order_id: String,
    #[serde(rename = "AreaCodeSearchAndOrderType")]
    pub area_code_search: Option<AreaCodeSearchAndOrderType>,
    #[serde(rename = "TollFreeWildCharSearchAndOrderType")]
    pub toll_free_search: Option<TollFreeWildCharSearchAndOrderType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletedNumbers {
    #[serde(rename = "TelephoneNumber")]
    pub telephone_numbers: Vec<TelephoneNumber>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename = "OrderResponse")]
pub struct OrderResponse {
    #[serde(rename = "Order")]
    pub order: OrderResponseOrder,
    /// `RECEIVED`, `PROCESSING`, `COMPLETE`, `PARTIAL` or `FAILED`.
    #[serde(rename = "OrderStatus")]
    pub order_status: String,
    /// Filled only once `order_status` is `COMPLETE`.
    #[serde(rename = "CompletedNumbers")]
    pub completed_numbers: CompletedNumbers,
    #[serde(rename = "CompletedQuantity")]
    pub completed_quantity: u32,
    #[serde(rename = "FailedQuantity")]
    pub failed_quantity: u32,
    #[serde(rename = "CreatedByUser")]
    pub created_by_user: String,
    #[serde(rename = "LastModifiedDate")]
    pub last_modified_date: Option<DateTime<Utc>>,
    #[serde(rename = "OrderCompleteDate")]
    pub order_complete_date: Option<DateTime<Utc>>,
    #[serde(rename = "Summary")]
    pub summary: String,
}

impl OrderResponse {
    pub fn is_complete(&self) -> bool {
        self.order_status == "COMPLETE"
    }
}

impl<T: Transport> Client<T> {
    /// Order `quantity` numbers in `area_code` for a site's SIP peer.
    pub fn order_numbers_by_area_code(
        &self,
        site_id: &str,
        peer_id: &str,
        area_code: &str,
        quantity: u32,
    ) -> Result<OrderResponse, ApiError> {
        let order = AreaCodeOrder {
            site_id: site_id.to_string(),
            peer_id: peer_id.to_string(),
            search: AreaCodeSearchAndOrderType {
                area_code: area_code.to_string(),
                quantity,
            },
            ..Default::default()
        };
        self.post(Api::Accounts, &self.accounts_url(ORDERS_PATH)?, &order)
    }

    /// Order `quantity` toll-free numbers matching `pattern`.
    pub fn order_toll_free_numbers(
        &self,
        site_id: &str,
        peer_id: &str,
        pattern: &str,
        quantity: u32,
    ) -> Result<OrderResponse, ApiError> {
        let order = TollFreeOrder {
            site_id: site_id.to_string(),
            peer_id: peer_id.to_string(),
            search: TollFreeWildCharSearchAndOrderType {
                toll_free_wild_card_pattern: pattern.to_string(),
                quantity,
            },
            ..Default::default()
        };
        self.post(Api::Accounts, &self.accounts_url(ORDERS_PATH)?, &order)
    }

    pub fn get_order(&self, id: &str) -> Result<OrderResponse, ApiError> {
        let url = self.accounts_url(&format!("{ORDERS_PATH}/{}", escape_segment(id)))?;
        self.get(Api::Accounts, &url, &())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{client, Fixture};

    const RECEIVED_AREA_CODE: &str = r#"
        <?xml version="1.0" encoding="UTF-8" standalone="yes"?>
        <OrderResponse>
            <Order>
                <OrderCreateDate>2019-11-05T13:48:43.238Z</OrderCreateDate>
                <PeerId>123123</PeerId>
                <BackOrderRequested>false</BackOrderRequested>
                <id>1-2-3-4</id>
                <AreaCodeSearchAndOrderType>
                    <AreaCode>734</AreaCode>
                    <Quantity>1</Quantity>
                </AreaCodeSearchAndOrderType>
                <PartialAllowed>true</PartialAllowed>
                <SiteId>12345</SiteId>
            </Order>
            <OrderStatus>RECEIVED</OrderStatus>
        </OrderResponse>"#;

    #[test]
    fn order_numbers_by_area_code() {
        let c = client(vec![Fixture::post("/api/accounts/accountId/orders")
            .expect_body("<Order><SiteId>12345</SiteId><PeerId>123123</PeerId><PartialAllowed>false</PartialAllowed><AreaCodeSearchAndOrderType><AreaCode>734</AreaCode><Quantity>1</Quantity></AreaCodeSearchAndOrderType></Order>")
            .expect_header("Content-Type", "application/xml")
            .respond_xml(RECEIVED_AREA_CODE)]);
        let result = c.order_numbers_by_area_code("12345", "123123", "734", 1).unwrap();
        assert_eq!(result.order_status, "RECEIVED");
        assert_eq!(result.order.id, "1-2-3-4");
        assert_eq!(
            result.order.order_create_date.map(|d| d.timestamp_millis()),
            Some(1572961723238)
        );
        let search = result.order.area_code_search.as_ref().unwrap();
        assert_eq!(search.area_code, "734");
        assert!(result.order.toll_free_search.is_none());
        assert!(!result.is_complete());
    }

    #[test]
    fn order_toll_free_numbers() {
        let c = client(vec![Fixture::post("/api/accounts/accountId/orders")
            .expect_body("<Order><SiteId>12345</SiteId><PeerId>123123</PeerId><PartialAllowed>false</PartialAllowed><TollFreeWildCharSearchAndOrderType><TollFreeWildCardPattern>8**</TollFreeWildCardPattern><Quantity>1</Quantity></TollFreeWildCharSearchAndOrderType></Order>")
            .respond_xml(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
                <OrderResponse>
                    <Order>
                        <OrderCreateDate>2019-11-05T13:48:43.238Z</OrderCreateDate>
                        <PeerId>123123</PeerId>
                        <id>1-2-3-4</id>
                        <TollFreeWildCharSearchAndOrderType>
                            <TollFreeWildCardPattern>8**</TollFreeWildCardPattern>
                            <Quantity>1</Quantity>
                        </TollFreeWildCharSearchAndOrderType>
                        <SiteId>12345</SiteId>
                    </Order>
                    <OrderStatus>RECEIVED</OrderStatus>
                </OrderResponse>"#,
            )]);
        let result = c.order_toll_free_numbers("12345", "123123", "8**", 1).unwrap();
        assert_eq!(result.order_status, "RECEIVED");
        assert_eq!(result.order.toll_free_search.unwrap().toll_free_wild_card_pattern, "8**");
    }

    #[test]
    fn order_fail_carries_description() {
        let c = client(vec![Fixture::post("/api/accounts/accountId/orders").respond(
            400,
            "<OrderResponse><ErrorList><Error><Code>5005</Code><Description>The site id was not found</Description></Error></ErrorList></OrderResponse>",
        )]);
        let err = c.order_numbers_by_area_code("1", "2", "734", 1).unwrap_err();
        match err {
            ApiError::Vendor { status, code, message } => {
                assert_eq!(status, 400);
                assert_eq!(code.as_deref(), Some("5005"));
                assert_eq!(message, "The site id was not found");
            }
            other => panic!("expected Vendor, got {other:?}"),
        }
    }

    #[test]
    fn get_completed_order() {
        let c = client(vec![Fixture::get("/api/accounts/accountId/orders/1-2-3-4").respond_xml(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
            <OrderResponse>
                <CompletedQuantity>1</CompletedQuantity>
                <CreatedByUser>user@example.com</CreatedByUser>
                <LastModifiedDate>2019-11-05T15:04:50.531Z</LastModifiedDate>
                <OrderCompleteDate>2019-11-05T15:04:50.531Z</OrderCompleteDate>
                <Order>
                    <OrderCreateDate>2019-11-05T15:04:50.327Z</OrderCreateDate>
                    <PeerId>123123</PeerId>
                    <BackOrderRequested>false</BackOrderRequested>
                    <TollFreeWildCharSearchAndOrderType>
                        <Quantity>1</Quantity>
                        <TollFreeWildCardPattern>8**</TollFreeWildCardPattern>
                    </TollFreeWildCharSearchAndOrderType>
                    <PartialAllowed>true</PartialAllowed>
                    <SiteId>12345</SiteId>
                </Order>
                <OrderStatus>COMPLETE</OrderStatus>
                <CompletedNumbers>
                    <TelephoneNumber>
                        <FullNumber>8441231234</FullNumber>
                    </TelephoneNumber>
                </CompletedNumbers>
                <Summary>1 number ordered in (844)</Summary>
                <FailedQuantity>0</FailedQuantity>
            </OrderResponse>"#,
        )]);
        let result = c.get_order("1-2-3-4").unwrap();
        assert!(result.is_complete());
        assert_eq!(result.order.peer_id, "123123");
        assert!(result.order.partial_allowed);
        assert_eq!(result.completed_numbers.telephone_numbers[0].full_number, "8441231234");
        assert_eq!(result.completed_quantity, 1);
        assert_eq!(result.summary, "1 number ordered in (844)");
    }

    #[test]
    fn get_order_fail() {
        let c = client(vec![Fixture::get("/api/accounts/accountId/orders/1-2-3-4").respond(400, "")]);
        let err = c.get_order("1-2-3-4").unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 400 }));
    }
}
