use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/:item_name", get(quotes_for_item))
}

/// Quotes from every registered supplier for one item, cheapest first.
pub async fn quotes_for_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(item_name): Path<String>,
) -> axum::response::Response {
    let quotes = services.store.quotes(&item_name);
    (StatusCode::OK, Json(serde_json::json!({ "quotes": quotes }))).into_response()
}
