use axum::Router;

pub mod admin;
pub mod inventory;
pub mod orders;
pub mod prescriptions;
pub mod quotes;
pub mod suppliers;
pub mod system;

/// Router for all domain endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/inventory", inventory::router())
        .nest("/suppliers", suppliers::router())
        .nest("/orders", orders::router())
        .nest("/quotes", quotes::router())
        .nest("/prescriptions", prescriptions::router())
        .nest("/admin", admin::router())
}
