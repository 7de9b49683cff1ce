//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use barrique::availability::AvailabilityError;
use barrique_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::Validation(reason) => {
            StatusError::unprocessable_entity().brief(reason)
        }
        OrdersServiceError::UnknownEvent => StatusError::not_found().brief("Event not found"),
        OrdersServiceError::UnknownProduct(uuid) => {
            StatusError::not_found().brief(format!("Unknown product {uuid}"))
        }
        OrdersServiceError::UnknownSlot(uuid) => {
            StatusError::not_found().brief(format!("Unknown slot {uuid}"))
        }
        OrdersServiceError::Unavailable(AvailabilityError::InsufficientStock {
            product,
            available,
        }) => StatusError::conflict()
            .brief(format!("Insufficient stock for product {product}: {available} available")),
        OrdersServiceError::Unavailable(AvailabilityError::SlotFull { slot }) => {
            StatusError::conflict().brief(format!("Slot {slot} is full"))
        }
        OrdersServiceError::Promo(source) => {
            StatusError::unprocessable_entity().brief(source.to_string())
        }
        OrdersServiceError::Status(source) => StatusError::conflict().brief(source.to_string()),
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::Conflict(source) => {
            error!("order submission lost a write race: {source}");

            StatusError::conflict().brief("The submission conflicted with a concurrent order; please retry")
        }
        OrdersServiceError::Sql(source) => {
            error!("failed to write order: {source}");

            StatusError::internal_server_error()
        }
    }
}
