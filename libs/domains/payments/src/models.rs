use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Checkout mode for a one-off charge
pub const PAYMENT_MODE: &str = "payment";

/// Metadata key carrying the booking id, read back by the payment webhook
pub const BOOKING_ID_METADATA_KEY: &str = "bookingId";

/// One priced entry on the hosted checkout page
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub currency: String,
    pub product_name: String,
    /// Smallest currency unit (cents)
    pub unit_amount: i64,
    pub quantity: u32,
}

/// Everything the payment provider needs to open a checkout session
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRequest {
    pub line_items: Vec<LineItem>,
    pub mode: String,
    pub success_url: String,
    pub cancel_url: String,
    pub metadata: BTreeMap<String, String>,
}

/// A session opened by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSessionUrl {
    pub session_id: String,
    pub url: String,
}

/// `POST /payment` body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayment {
    pub booking_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponse {
    pub success: bool,
    /// Hosted checkout page to redirect the guest to
    pub url: String,
}

/// Convert a decimal amount into cents, rounding half away from zero.
pub fn to_minor_units(amount: f64) -> Option<i64> {
    if !amount.is_finite() || amount < 0.0 {
        return None;
    }
    Some((amount * 100.0).round() as i64)
}
