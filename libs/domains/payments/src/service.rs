use domain_bookings::BookingRepository;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{PaymentError, PaymentResult};
use crate::models::{
    BOOKING_ID_METADATA_KEY, CheckoutRequest, CheckoutSessionUrl, LineItem, PAYMENT_MODE,
    to_minor_units,
};
use crate::provider::CheckoutProvider;

/// Turns an existing booking into a hosted checkout session
#[derive(Clone)]
pub struct PaymentService<R: BookingRepository> {
    repository: Arc<R>,
    provider: Arc<dyn CheckoutProvider>,
    currency: String,
}

impl<R: BookingRepository> PaymentService<R> {
    pub fn new(
        repository: R,
        provider: Arc<dyn CheckoutProvider>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            provider,
            currency: currency.into(),
        }
    }

    pub async fn create_checkout_session(
        &self,
        booking_id: Uuid,
        origin: &str,
    ) -> PaymentResult<CheckoutSessionUrl> {
        let origin = origin.trim_end_matches('/');
        if origin.is_empty() {
            return Err(PaymentError::MissingOrigin);
        }

        let booking = self
            .repository
            .get_booking(booking_id)
            .await?
            .ok_or(PaymentError::NotFound("Booking not found"))?;

        // The join only fails when the room is gone; rooms cannot outlive their hotel
        let room = self
            .repository
            .find_room_with_hotel(booking.room_id)
            .await?
            .ok_or(PaymentError::NotFound("Room not found"))?;
        if room.hotel.id != booking.hotel_id {
            return Err(PaymentError::NotFound("Hotel not found"));
        }

        let unit_amount = to_minor_units(booking.total_price).ok_or_else(|| {
            PaymentError::PaymentFailed(format!(
                "Booking {} has an invalid total {}",
                booking.id, booking.total_price
            ))
        })?;

        let request = CheckoutRequest {
            line_items: vec![LineItem {
                currency: self.currency.clone(),
                product_name: room.hotel.name.clone(),
                unit_amount,
                quantity: 1,
            }],
            mode: PAYMENT_MODE.to_string(),
            success_url: format!("{}/loader/my-bookings", origin),
            cancel_url: format!("{}/my-bookings", origin),
            metadata: BTreeMap::from([(
                BOOKING_ID_METADATA_KEY.to_string(),
                booking.id.to_string(),
            )]),
        };

        let session = self
            .provider
            .create_session(&request)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    booking_id = %booking.id,
                    provider = self.provider.name(),
                    error = %e,
                    "Checkout session failed"
                );
            })?;

        tracing::info!(
            booking_id = %booking.id,
            session_id = %session.session_id,
            amount = unit_amount,
            "Checkout session created"
        );
        Ok(session)
    }
}
