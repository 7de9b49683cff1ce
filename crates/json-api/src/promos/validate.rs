//! Validate Promo Code Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use barrique_app::domain::promos::PromoCodesServiceError;

use crate::{extensions::*, state::State};

/// Validate Promo Code Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidatePromoCodeRequest {
    /// The code as entered by the customer
    pub code: String,
}

/// Validate Promo Code Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidatePromoCodeResponse {
    /// Whether the code grants a discount
    pub valid: bool,

    /// The discount in cents, when valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_cents: Option<u64>,

    /// Why the code did not validate, when invalid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Validate Promo Code Handler
///
/// Validation is read-only: codes are reusable coupons, never consumed.
/// An unrecognised or deactivated code is a negative result, not an error.
#[endpoint(
    tags("promo-codes"),
    summary = "Validate Promo Code",
    responses(
        (status_code = StatusCode::OK, description = "Validation result"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    event: PathParam<Uuid>,
    json: JsonBody<ValidatePromoCodeRequest>,
    depot: &mut Depot,
) -> Result<Json<ValidatePromoCodeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let result = state
        .app
        .promos
        .validate_code(event.into_inner(), &json.into_inner().code)
        .await;

    match result {
        Ok(discount) => Ok(Json(ValidatePromoCodeResponse {
            valid: true,
            discount_cents: Some(discount),
            reason: None,
        })),
        Err(
            error @ (PromoCodesServiceError::Invalid(_) | PromoCodesServiceError::NotFound),
        ) => Ok(Json(ValidatePromoCodeResponse {
            valid: false,
            discount_cents: None,
            reason: Some(error.to_string()),
        })),
        Err(PromoCodesServiceError::UnknownEvent) => {
            Err(StatusError::not_found().brief("Event not found"))
        }
        Err(error) => {
            error!("failed to validate promo code: {error}");

            Err(StatusError::internal_server_error())
        }
    }
}

#[cfg(test)]
mod tests {
    use barrique::promo::PromoError;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use barrique_app::domain::promos::MockPromoCodesService;

    use crate::test_helpers::{service_with, state_with_promos};

    use super::*;

    fn make_service(promos: MockPromoCodesService) -> Service {
        service_with(
            state_with_promos(promos),
            Router::with_path("events/{event}/promo-codes/validate").post(handler),
        )
    }

    #[tokio::test]
    async fn test_valid_code_returns_discount() -> TestResult {
        let event = Uuid::now_v7();

        let mut mock = MockPromoCodesService::new();

        mock.expect_validate_code()
            .once()
            .withf(move |uuid, code| *uuid == event && code == "SPRING24")
            .return_once(|_, _| Ok(500));

        mock.expect_create_code().never();
        mock.expect_deactivate_code().never();
        mock.expect_list_codes().never();

        let body: ValidatePromoCodeResponse =
            TestClient::post(format!("http://example.com/events/{event}/promo-codes/validate"))
                .json(&json!({ "code": "SPRING24" }))
                .send(&make_service(mock))
                .await
                .take_json()
                .await?;

        assert!(body.valid);
        assert_eq!(body.discount_cents, Some(500));
        assert_eq!(body.reason, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_code_is_a_negative_result() -> TestResult {
        let event = Uuid::now_v7();

        let mut mock = MockPromoCodesService::new();

        mock.expect_validate_code()
            .once()
            .return_once(|_, _| Err(PromoCodesServiceError::Invalid(PromoError::NotFound)));

        mock.expect_create_code().never();
        mock.expect_deactivate_code().never();
        mock.expect_list_codes().never();

        let mut res =
            TestClient::post(format!("http://example.com/events/{event}/promo-codes/validate"))
                .json(&json!({ "code": "NOPE" }))
                .send(&make_service(mock))
                .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: ValidatePromoCodeResponse = res.take_json().await?;

        assert!(!body.valid);
        assert_eq!(body.discount_cents, None);
        assert_eq!(body.reason.as_deref(), Some("promo code not found"));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_event_returns_404() -> TestResult {
        let event = Uuid::now_v7();

        let mut mock = MockPromoCodesService::new();

        mock.expect_validate_code()
            .once()
            .return_once(|_, _| Err(PromoCodesServiceError::UnknownEvent));

        mock.expect_create_code().never();
        mock.expect_deactivate_code().never();
        mock.expect_list_codes().never();

        let res =
            TestClient::post(format!("http://example.com/events/{event}/promo-codes/validate"))
                .json(&json!({ "code": "SPRING24" }))
                .send(&make_service(mock))
                .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_inactive_code_is_a_negative_result() -> TestResult {
        let event = Uuid::now_v7();

        let mut mock = MockPromoCodesService::new();

        mock.expect_validate_code()
            .once()
            .return_once(|_, _| Err(PromoCodesServiceError::Invalid(PromoError::Inactive)));

        mock.expect_create_code().never();
        mock.expect_deactivate_code().never();
        mock.expect_list_codes().never();

        let body: ValidatePromoCodeResponse =
            TestClient::post(format!("http://example.com/events/{event}/promo-codes/validate"))
                .json(&json!({ "code": "OLD" }))
                .send(&make_service(mock))
                .await
                .take_json()
                .await?;

        assert!(!body.valid);
        assert_eq!(body.reason.as_deref(), Some("promo code is no longer active"));

        Ok(())
    }
}
