use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};

use rxstock_core::PrescriptionId;
use rxstock_prescriptions::NewPrescription;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_prescriptions).post(create_prescription))
        .route("/verify", post(verify_token))
        .route("/:id", get(get_prescription))
        .route("/:id/status", put(update_status))
}

pub async fn create_prescription(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreatePrescriptionRequest>,
) -> axum::response::Response {
    let payload = NewPrescription {
        patient_name: body.patient_name,
        medication: body.medication,
        dosage: body.dosage,
        quantity: body.quantity,
    };

    match services.prescriptions.add(payload) {
        Ok(p) => (StatusCode::CREATED, Json(p)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_prescriptions(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.prescriptions.list();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_prescription(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: PrescriptionId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_id",
                "invalid prescription id",
            )
        }
    };

    match services.prescriptions.get(id) {
        Some(p) => (StatusCode::OK, Json(p)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "prescription not found"),
    }
}

pub async fn update_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdatePrescriptionStatusRequest>,
) -> axum::response::Response {
    let id: PrescriptionId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_id",
                "invalid prescription id",
            )
        }
    };

    match services.prescriptions.update_status(id, body.status) {
        Ok(p) => (StatusCode::OK, Json(p)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Verify a scanned prescription token.
///
/// Always `200 OK`: the verdict is in the body, and an unknown or malformed
/// token is a `NOT_FOUND` verdict rather than an HTTP error.
pub async fn verify_token(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::VerifyTokenRequest>,
) -> axum::response::Response {
    let outcome = services.verifier.verify(&body.token);
    (StatusCode::OK, Json(outcome)).into_response()
}
