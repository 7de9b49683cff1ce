//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{create::OrderResponse, errors::into_status_error},
    state::State,
};

/// Get Order Handler
///
/// Fetches a persisted order with its captured-price lines. The route is
/// event-scoped, so an order reached through the wrong event is not found.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    responses(
        (status_code = StatusCode::OK, description = "The order"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown order"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    event: PathParam<Uuid>,
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .get_order(order.into_inner())
        .await
        .map_err(into_status_error)?;

    if order.event != event.into_inner() {
        return Err(StatusError::not_found().brief("Order not found"));
    }

    Ok(Json(order.into()))
}
