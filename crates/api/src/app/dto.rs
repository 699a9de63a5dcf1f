//! Request DTOs.
//!
//! Responses serialize the domain types directly; only requests need their
//! own shapes here.

use serde::Deserialize;

use rxstock_core::{ItemId, SupplierId};
use rxstock_ordering::OrderStatus;
use rxstock_prescriptions::PrescriptionStatus;

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    pub generic_name: String,
    pub stock: i64,
    pub min_stock: i64,
    pub unit: String,
    pub unit_price: f64,
    pub category: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub generic_name: Option<String>,
    pub stock: Option<i64>,
    pub min_stock: Option<i64>,
    pub unit: Option<String>,
    pub unit_price: Option<f64>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetStockRequest {
    pub stock: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateSupplierRequest {
    pub name: String,
    pub rating: f32,
    pub delivery_time: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub item_id: ItemId,
    pub supplier_id: SupplierId,
    pub quantity: i64,
    /// Agreed unit price, typically taken from a quote. Falls back to the
    /// item's own unit price when omitted.
    pub unit_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Deserialize)]
pub struct CreatePrescriptionRequest {
    pub patient_name: String,
    pub medication: String,
    pub dosage: String,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePrescriptionStatusRequest {
    pub status: PrescriptionStatus,
}

#[derive(Debug, Deserialize)]
pub struct VerifyTokenRequest {
    pub token: String,
}
