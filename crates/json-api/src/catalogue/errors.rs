//! Catalogue Errors

use salvo::http::StatusError;
use tracing::error;

use barrique_app::domain::catalogue::CatalogueServiceError;

pub(crate) fn into_status_error(error: CatalogueServiceError) -> StatusError {
    match error {
        CatalogueServiceError::NotFound => StatusError::not_found().brief("Event not found"),
        CatalogueServiceError::Sql(source) => {
            error!("failed to load catalogue: {source}");

            StatusError::internal_server_error()
        }
    }
}
