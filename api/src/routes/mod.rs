use axum::Router;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_scalar::{Scalar, Servable as _};

use crate::AppState;

pub mod doctors;
pub mod employees;
pub mod medicines;
pub mod patients;
pub mod prescriptions;

/// Liveness probe
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is up"))
)]
async fn index() -> &'static str {
    "Hospital-Pharmacy Backend API is running!"
}

/// Builds the complete route table.
///
/// Routes sharing a path are registered together; the OpenAPI document
/// produced as a side effect is served interactively under `/docs`.
pub fn build_router() -> Router<AppState> {
    let (router, openapi) = OpenApiRouter::<AppState>::new()
        .routes(routes!(index))
        .routes(routes!(employees::list, employees::create))
        .routes(routes!(employees::search))
        .routes(routes!(employees::replace, employees::remove))
        .routes(routes!(doctors::list, doctors::create))
        .routes(routes!(doctors::search))
        .routes(routes!(doctors::replace, doctors::remove))
        .routes(routes!(patients::list, patients::create))
        .routes(routes!(patients::get, patients::replace, patients::remove))
        .routes(routes!(
            medicines::list,
            medicines::create,
            medicines::remove_batch
        ))
        .routes(routes!(medicines::replace))
        .routes(routes!(
            prescriptions::list,
            prescriptions::create,
            prescriptions::remove_batch
        ))
        .routes(routes!(prescriptions::replace))
        .routes(routes!(prescriptions::list_with_details))
        .split_for_parts();

    router.merge(Scalar::with_url("/docs", openapi))
}
