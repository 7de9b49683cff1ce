//! Get Catalogue Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use barrique_app::domain::catalogue::models::{Catalogue, CatalogueProduct, CatalogueSlot};

use crate::{catalogue::errors::into_status_error, extensions::*, state::State};

/// Catalogue Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CatalogueResponse {
    /// The event being browsed
    pub event: EventResponse,

    /// Active products with current availability
    pub products: Vec<ProductResponse>,

    /// Fulfilment slots with remaining capacity
    pub slots: Vec<SlotResponse>,
}

/// Event summary
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EventResponse {
    /// The unique identifier of the event
    pub uuid: Uuid,

    /// Event display name
    pub name: String,

    /// Bundle size of the tiered discount, when the event runs one
    pub bundle_size: Option<u32>,

    /// Delivery fee in cents, when the event offers delivery
    pub delivery_fee_cents: Option<u64>,
}

/// A product as presented to browsing customers
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// Product display name
    pub name: String,

    /// Current unit price in cents
    pub unit_price_cents: u64,

    /// Product kind: standard, menu, raffle_ticket or add_on
    pub kind: String,

    /// Units still available; absent means unlimited stock
    pub available: Option<u32>,
}

/// A fulfilment slot with derived capacity
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SlotResponse {
    /// The unique identifier of the slot
    pub uuid: Uuid,

    /// Slot window start
    pub starts_at: String,

    /// Slot window end
    pub ends_at: String,

    /// Maximum number of orders the slot accepts
    pub capacity: u32,

    /// Capacity minus non-cancelled orders; can go negative after a
    /// capacity reduction
    pub remaining_capacity: i64,

    /// Whether the slot rejects new orders
    pub is_full: bool,
}

impl From<Catalogue> for CatalogueResponse {
    fn from(catalogue: Catalogue) -> Self {
        let event = catalogue.event;

        CatalogueResponse {
            event: EventResponse {
                uuid: event.uuid,
                name: event.name.clone(),
                bundle_size: event.tiered_discount_enabled.then_some(event.bundle_size),
                delivery_fee_cents: event.delivery_enabled.then_some(event.delivery_fee),
            },
            products: catalogue.products.into_iter().map(Into::into).collect(),
            slots: catalogue.slots.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<CatalogueProduct> for ProductResponse {
    fn from(product: CatalogueProduct) -> Self {
        ProductResponse {
            uuid: product.uuid,
            name: product.name,
            unit_price_cents: product.unit_price,
            kind: product.kind.as_str().to_string(),
            available: product.available,
        }
    }
}

impl From<CatalogueSlot> for SlotResponse {
    fn from(slot: CatalogueSlot) -> Self {
        SlotResponse {
            uuid: slot.uuid,
            starts_at: slot.starts_at.to_string(),
            ends_at: slot.ends_at.to_string(),
            capacity: slot.capacity,
            remaining_capacity: slot.remaining,
            is_full: slot.is_full(),
        }
    }
}

/// Get Catalogue Handler
///
/// Returns the event's active products and slots with current availability.
#[endpoint(
    tags("catalogue"),
    summary = "Get Event Catalogue",
    responses(
        (status_code = StatusCode::OK, description = "Catalogue"),
        (status_code = StatusCode::NOT_FOUND, description = "Event not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    event: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CatalogueResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let catalogue = state
        .app
        .catalogue
        .get_catalogue(event.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(catalogue.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use barrique::pricing::ProductKind;
    use barrique_app::domain::{
        catalogue::{CatalogueServiceError, MockCatalogueService},
        events::models::Event,
    };

    use crate::test_helpers::{service_with, state_with_catalogue};

    use super::*;

    fn make_service(catalogue: MockCatalogueService) -> Service {
        service_with(
            state_with_catalogue(catalogue),
            Router::with_path("events/{event}/catalogue").get(handler),
        )
    }

    fn make_catalogue(event: Uuid) -> Catalogue {
        Catalogue {
            event: Event {
                uuid: event,
                name: "Spring Wine Sale".to_string(),
                tiered_discount_enabled: true,
                bundle_size: 12,
                delivery_enabled: false,
                delivery_fee: 0,
                created_at: Timestamp::UNIX_EPOCH,
            },
            products: vec![CatalogueProduct {
                uuid: Uuid::now_v7(),
                name: "Côtes du Rhône 2022".to_string(),
                unit_price: 1150,
                kind: ProductKind::Standard,
                available: Some(58),
                sort_order: 1,
            }],
            slots: vec![CatalogueSlot {
                uuid: Uuid::now_v7(),
                starts_at: Timestamp::UNIX_EPOCH,
                ends_at: Timestamp::UNIX_EPOCH,
                capacity: 20,
                remaining: 0,
            }],
        }
    }

    #[tokio::test]
    async fn test_get_catalogue_returns_200() -> TestResult {
        let event = Uuid::now_v7();
        let catalogue = make_catalogue(event);

        let mut mock = MockCatalogueService::new();

        mock.expect_get_catalogue()
            .once()
            .withf(move |uuid| *uuid == event)
            .return_once(move |_| Ok(catalogue));

        let mut res = TestClient::get(format!("http://example.com/events/{event}/catalogue"))
            .send(&make_service(mock))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CatalogueResponse = res.take_json().await?;

        assert_eq!(body.event.uuid, event);
        assert_eq!(body.event.bundle_size, Some(12));
        assert_eq!(body.event.delivery_fee_cents, None);
        assert_eq!(body.products.len(), 1);
        assert_eq!(body.products[0].kind, "standard");
        assert_eq!(body.products[0].available, Some(58));
        assert_eq!(body.slots.len(), 1);
        assert!(body.slots[0].is_full);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_catalogue_unknown_event_returns_404() -> TestResult {
        let event = Uuid::now_v7();

        let mut mock = MockCatalogueService::new();

        mock.expect_get_catalogue()
            .once()
            .return_once(|_| Err(CatalogueServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/events/{event}/catalogue"))
            .send(&make_service(mock))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
