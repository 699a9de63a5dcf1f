use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};

use rxstock_core::ItemId;
use rxstock_inventory::{InventoryItemPatch, NewInventoryItem};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/reorder", get(reorder_needed))
        .route("/:id", get(get_item).patch(update_item))
        .route("/:id/stock", put(set_stock))
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateItemRequest>,
) -> axum::response::Response {
    let payload = NewInventoryItem {
        name: body.name,
        generic_name: body.generic_name,
        stock: body.stock,
        min_stock: body.min_stock,
        unit: body.unit,
        unit_price: body.unit_price,
        category: body.category,
    };

    match services.store.add_inventory_item(payload) {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.store.list_inventory();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn reorder_needed(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.store.reorder_needed();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ItemId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid item id"),
    };

    match services.store.get_inventory_item(id) {
        Some(item) => (StatusCode::OK, Json(item)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "item not found"),
    }
}

pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateItemRequest>,
) -> axum::response::Response {
    let id: ItemId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid item id"),
    };

    let patch = InventoryItemPatch {
        name: body.name,
        generic_name: body.generic_name,
        stock: body.stock,
        min_stock: body.min_stock,
        unit: body.unit,
        unit_price: body.unit_price,
        category: body.category,
    };

    match services.store.update_inventory_item(id, patch) {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn set_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::SetStockRequest>,
) -> axum::response::Response {
    let id: ItemId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid item id"),
    };

    match services.store.set_stock(id, body.stock) {
        Ok(stock) => (StatusCode::OK, Json(serde_json::json!({ "stock": stock }))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
