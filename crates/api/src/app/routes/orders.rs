use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};

use rxstock_core::OrderId;
use rxstock_ordering::NewOrder;
use rxstock_pricing::round_to_cents;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/:id", get(get_order))
        .route("/:id/status", put(update_status))
}

/// Place a purchase order.
///
/// The request carries ids; item and supplier details are resolved here so
/// the order captures the names and delivery estimate as they were at order
/// time.
pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateOrderRequest>,
) -> axum::response::Response {
    let Some(item) = services.store.get_inventory_item(body.item_id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "item not found");
    };
    let Some(supplier) = services.store.get_supplier(body.supplier_id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "supplier not found");
    };

    let unit_price = body.unit_price.unwrap_or(item.unit_price);
    let payload = NewOrder {
        item_id: item.id,
        item_name: item.generic_name.clone(),
        quantity: body.quantity,
        supplier_id: supplier.id,
        supplier_name: supplier.name.clone(),
        unit_price,
        total_cost: round_to_cents(unit_price * body.quantity as f64),
        estimated_delivery: supplier.delivery_time.clone(),
    };

    match services.store.create_order(payload) {
        Ok(order) => (StatusCode::CREATED, Json(order)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.store.list_orders();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id"),
    };

    match services.store.get_order(id) {
        Some(order) => (StatusCode::OK, Json(order)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "order not found"),
    }
}

pub async fn update_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateOrderStatusRequest>,
) -> axum::response::Response {
    let id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id"),
    };

    match services.store.update_order_status(id, body.status) {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
