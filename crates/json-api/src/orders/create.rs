//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use barrique::{cart::CartLine, payment::PaymentMethod, pricing::Fulfilment};
use barrique_app::domain::orders::models::{Customer, Order, OrderSubmission};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    /// Customer contact details
    pub customer: CustomerRequest,

    /// Fulfilment: pickup, delivery or on_site
    pub fulfilment: String,

    /// Requested fulfilment slot
    pub slot: Option<Uuid>,

    /// Payment method: bank_transfer or on_site
    pub payment: String,

    /// Cart lines
    pub lines: Vec<LineRequest>,

    /// Optional promo code
    pub promo_code: Option<String>,
}

/// Customer contact details
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerRequest {
    /// Customer name
    pub name: String,

    /// Customer email address
    pub email: String,

    /// Optional phone number
    pub phone: Option<String>,
}

/// A requested cart line
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LineRequest {
    /// Product UUID
    pub product: Uuid,

    /// Requested quantity
    pub quantity: u32,
}

impl CreateOrderRequest {
    fn into_submission(self) -> Result<OrderSubmission, StatusError> {
        let fulfilment = Fulfilment::parse(&self.fulfilment).ok_or_else(|| {
            StatusError::unprocessable_entity()
                .brief(format!("unknown fulfilment: {}", self.fulfilment))
        })?;

        let payment = PaymentMethod::parse(&self.payment).ok_or_else(|| {
            StatusError::unprocessable_entity()
                .brief(format!("unknown payment method: {}", self.payment))
        })?;

        Ok(OrderSubmission {
            customer: Customer {
                name: self.customer.name,
                email: self.customer.email,
                phone: self.customer.phone,
            },
            fulfilment,
            slot: self.slot,
            payment,
            lines: self
                .lines
                .into_iter()
                .map(|line| CartLine {
                    product: line.product,
                    quantity: line.quantity,
                })
                .collect(),
            promo_code: self.promo_code,
        })
    }
}

/// Created Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// Human-readable order code
    pub code: String,

    /// Structured bank-transfer communication
    pub payment_reference: String,

    /// Order status
    pub status: String,

    /// Authoritative totals, server-computed
    pub totals: TotalsResponse,

    /// Priced order lines
    pub lines: Vec<OrderLineResponse>,

    /// Submission time
    pub created_at: String,
}

/// Order totals in cents
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TotalsResponse {
    /// Sum of unit price times quantity over all lines
    pub subtotal_cents: u64,

    /// Tiered quantity discount
    pub tiered_discount_cents: u64,

    /// Promo code discount
    pub promo_discount_cents: u64,

    /// Delivery fee
    pub delivery_fee_cents: u64,

    /// Amount due
    pub total_cents: u64,
}

/// A priced order line
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineResponse {
    /// Product UUID
    pub product: Uuid,

    /// Ordered quantity
    pub quantity: u32,

    /// Unit price in cents captured at order time
    pub unit_price_cents: u64,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            uuid: order.uuid,
            code: order.code,
            payment_reference: order.payment_reference,
            status: order.status.as_str().to_string(),
            totals: TotalsResponse {
                subtotal_cents: order.totals.subtotal,
                tiered_discount_cents: order.totals.tiered_discount,
                promo_discount_cents: order.totals.promo_discount,
                delivery_fee_cents: order.totals.delivery_fee,
                total_cents: order.totals.total,
            },
            lines: order
                .lines
                .into_iter()
                .map(|line| OrderLineResponse {
                    product: line.product,
                    quantity: line.quantity,
                    unit_price_cents: line.unit_price,
                })
                .collect(),
            created_at: order.created_at.to_string(),
        }
    }
}

/// Create Order Handler
///
/// Validates, prices and persists a submission. Amounts are always
/// recomputed server-side; client-sent prices are never trusted.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown event, product or slot"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock or full slot"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid submission"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    event: PathParam<Uuid>,
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let event = event.into_inner();
    let submission = json.into_inner().into_submission()?;

    let order = state
        .app
        .orders
        .submit_order(event, submission)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/events/{event}/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use barrique::{
        availability::AvailabilityError,
        pricing::Totals,
        status::OrderStatus,
    };
    use barrique_app::domain::orders::{
        MockOrdersService, OrdersServiceError, models::OrderLine,
    };

    use crate::test_helpers::{service_with, state_with_orders};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        service_with(
            state_with_orders(orders),
            Router::with_path("events/{event}/orders").post(handler),
        )
    }

    fn request_body(product: Uuid) -> serde_json::Value {
        json!({
            "customer": { "name": "Ada Lovelace", "email": "ada@example.org", "phone": null },
            "fulfilment": "pickup",
            "slot": null,
            "payment": "bank_transfer",
            "lines": [{ "product": product, "quantity": 3 }],
            "promo_code": null,
        })
    }

    fn make_order(event: Uuid, product: Uuid) -> Order {
        Order {
            uuid: Uuid::now_v7(),
            event,
            number: 42,
            code: "BAABN".to_string(),
            customer: Customer {
                name: "Ada Lovelace".to_string(),
                email: "ada@example.org".to_string(),
                phone: None,
            },
            fulfilment: Fulfilment::Pickup,
            slot: None,
            payment: PaymentMethod::BankTransfer,
            payment_reference: "+++000/0000/04242+++".to_string(),
            totals: Totals {
                subtotal: 3_450,
                tiered_discount: 0,
                promo_discount: 0,
                delivery_fee: 0,
                total: 3_450,
            },
            status: OrderStatus::Pending,
            lines: vec![OrderLine {
                uuid: Uuid::now_v7(),
                product,
                quantity: 3,
                unit_price: 1_150,
            }],
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn test_create_order_returns_201() -> TestResult {
        let event = Uuid::now_v7();
        let product = Uuid::now_v7();
        let order = make_order(event, product);
        let order_uuid = order.uuid;

        let mut mock = MockOrdersService::new();

        mock.expect_submit_order()
            .once()
            .withf(move |uuid, submission| {
                *uuid == event
                    && submission.fulfilment == Fulfilment::Pickup
                    && submission.lines
                        == vec![CartLine {
                            product,
                            quantity: 3,
                        }]
            })
            .return_once(move |_, _| Ok(order));

        mock.expect_set_status().never();
        mock.expect_get_order().never();

        let mut res = TestClient::post(format!("http://example.com/events/{event}/orders"))
            .json(&request_body(product))
            .send(&make_service(mock))
            .await;

        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(
            location,
            Some(format!("/events/{event}/orders/{order_uuid}").as_str())
        );

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(body.uuid, order_uuid);
        assert_eq!(body.code, "BAABN");
        assert_eq!(body.payment_reference, "+++000/0000/04242+++");
        assert_eq!(body.status, "pending");
        assert_eq!(body.totals.total_cents, 3_450);
        assert_eq!(body.lines.len(), 1);
        assert_eq!(body.lines[0].unit_price_cents, 1_150);

        Ok(())
    }

    #[tokio::test]
    async fn test_insufficient_stock_returns_409_with_product() -> TestResult {
        let event = Uuid::now_v7();
        let product = Uuid::now_v7();

        let mut mock = MockOrdersService::new();

        mock.expect_submit_order().once().return_once(move |_, _| {
            Err(OrdersServiceError::Unavailable(
                AvailabilityError::InsufficientStock {
                    product,
                    available: 1,
                },
            ))
        });

        mock.expect_set_status().never();
        mock.expect_get_order().never();

        let res = TestClient::post(format!("http://example.com/events/{event}/orders"))
            .json(&request_body(product))
            .send(&make_service(mock))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_full_slot_returns_409() -> TestResult {
        let event = Uuid::now_v7();
        let product = Uuid::now_v7();
        let slot = Uuid::now_v7();

        let mut mock = MockOrdersService::new();

        mock.expect_submit_order().once().return_once(move |_, _| {
            Err(OrdersServiceError::Unavailable(AvailabilityError::SlotFull {
                slot,
            }))
        });

        mock.expect_set_status().never();
        mock.expect_get_order().never();

        let res = TestClient::post(format!("http://example.com/events/{event}/orders"))
            .json(&request_body(product))
            .send(&make_service(mock))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_submission_returns_422() -> TestResult {
        let event = Uuid::now_v7();
        let product = Uuid::now_v7();

        let mut mock = MockOrdersService::new();

        mock.expect_submit_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::Validation("cart is empty")));

        mock.expect_set_status().never();
        mock.expect_get_order().never();

        let res = TestClient::post(format!("http://example.com/events/{event}/orders"))
            .json(&request_body(product))
            .send(&make_service(mock))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_fulfilment_rejected_before_the_service() -> TestResult {
        let event = Uuid::now_v7();
        let product = Uuid::now_v7();

        let mut mock = MockOrdersService::new();

        mock.expect_submit_order().never();
        mock.expect_set_status().never();
        mock.expect_get_order().never();

        let mut body = request_body(product);
        body["fulfilment"] = json!("teleport");

        let res = TestClient::post(format!("http://example.com/events/{event}/orders"))
            .json(&body)
            .send(&make_service(mock))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_product_returns_404() -> TestResult {
        let event = Uuid::now_v7();
        let product = Uuid::now_v7();

        let mut mock = MockOrdersService::new();

        mock.expect_submit_order()
            .once()
            .return_once(move |_, _| Err(OrdersServiceError::UnknownProduct(product)));

        mock.expect_set_status().never();
        mock.expect_get_order().never();

        let res = TestClient::post(format!("http://example.com/events/{event}/orders"))
            .json(&request_body(product))
            .send(&make_service(mock))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
