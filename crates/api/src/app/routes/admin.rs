use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::app::services::AppServices;
use crate::app::errors;

pub fn router() -> Router {
    Router::new()
        .route("/snapshot", post(save_snapshot))
        .route("/confirmations", get(pending_confirmations))
}

/// Persist the current store state to the configured snapshot path.
pub async fn save_snapshot(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let Some(path) = &services.snapshot_path else {
        return errors::json_error(
            StatusCode::CONFLICT,
            "no_snapshot_path",
            "RXSTOCK_SNAPSHOT is not configured",
        );
    };

    match services.store.save_to(path) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "path": path.display().to_string() })),
        )
            .into_response(),
        Err(e) => errors::snapshot_error_to_response(e),
    }
}

/// How many orders are waiting on their deferred confirmation.
pub async fn pending_confirmations(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "pending": services.store.pending_confirmations() })),
    )
        .into_response()
}
