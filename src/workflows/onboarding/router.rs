use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::NewCustomerRequest;
use super::repository::{CompanyRepository, CustomerRepository};
use super::service::{OnboardingError, OnboardingService};

/// Router builder exposing the intake endpoint over HTTP.
pub fn onboarding_router<C, R>(service: Arc<OnboardingService<C, R>>) -> Router
where
    C: CompanyRepository + 'static,
    R: CustomerRepository + 'static,
{
    Router::new()
        .route("/api/v1/customers", post(onboard_handler::<C, R>))
        .with_state(service)
}

pub(crate) async fn onboard_handler<C, R>(
    State(service): State<Arc<OnboardingService<C, R>>>,
    axum::Json(request): axum::Json<NewCustomerRequest>,
) -> Response
where
    C: CompanyRepository + 'static,
    R: CustomerRepository + 'static,
{
    match service.add_customer(request) {
        Ok(true) => {
            let payload = json!({ "accepted": true });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Ok(false) => {
            let payload = json!({ "accepted": false });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(OnboardingError::CreditBureau(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
