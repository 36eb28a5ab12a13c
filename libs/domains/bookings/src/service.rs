use axum_helpers::AuthUser;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{BookingError, BookingResult};
use crate::models::{
    Booking, BookingDetails, CreateBooking, DateRange, HotelDashboard, NewBooking, User,
};
use crate::notifier::BookingNotifier;
use crate::pricing::quote;
use crate::repository::{BookingRepository, InsertOutcome};

/// Service layer for availability, booking creation and booking views
#[derive(Clone)]
pub struct BookingService<R: BookingRepository> {
    repository: Arc<R>,
    notifier: Arc<dyn BookingNotifier>,
}

impl<R: BookingRepository> BookingService<R> {
    pub fn new(repository: R, notifier: Arc<dyn BookingNotifier>) -> Self {
        Self {
            repository: Arc::new(repository),
            notifier,
        }
    }

    /// True when no booking on the room overlaps the requested stay
    pub async fn is_available(
        &self,
        room_id: Uuid,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> BookingResult<bool> {
        let range = DateRange::new(check_in, check_out)?;

        let overlapping = self
            .repository
            .find_overlapping(room_id, range)
            .await
            .inspect_err(|e| {
                tracing::error!(room_id = %room_id, error = %e, "Availability lookup failed");
            })?;

        Ok(overlapping.is_empty())
    }

    /// Validate, re-check availability, price, insert atomically and notify.
    ///
    /// The confirmation is best-effort: a delivery failure is logged and the
    /// booking stands.
    pub async fn create_booking(
        &self,
        user: &AuthUser,
        input: CreateBooking,
    ) -> BookingResult<Booking> {
        input
            .validate()
            .map_err(|e| BookingError::Validation(e.to_string()))?;
        let range = DateRange::new(input.check_in_date, input.check_out_date)?;

        let available = self
            .is_available(input.room, range.check_in, range.check_out)
            .await
            .map_err(|_| BookingError::CreationFailed)?;
        if !available {
            return Err(BookingError::RoomUnavailable);
        }

        let room = self
            .repository
            .find_room_with_hotel(input.room)
            .await
            .map_err(|e| {
                tracing::error!(room_id = %input.room, error = %e, "Room lookup failed");
                BookingError::CreationFailed
            })?
            .ok_or_else(|| {
                tracing::error!(room_id = %input.room, "Room or hotel not found for booking");
                BookingError::CreationFailed
            })?;

        let total_price = quote(room.room.price_per_night, range.check_in, range.check_out)?;

        let new_booking = NewBooking {
            guest: User {
                id: user.id,
                email: user.email.clone(),
                username: user.username.clone(),
            },
            room_id: room.room.id,
            hotel_id: room.hotel.id,
            guests: input.guests,
            range,
            total_price,
        };

        let booking = match self.repository.insert_if_available(new_booking).await {
            Ok(InsertOutcome::Inserted(booking)) => booking,
            Ok(InsertOutcome::Conflict) => {
                tracing::info!(room_id = %input.room, "Room taken by a concurrent booking");
                return Err(BookingError::RoomUnavailable);
            }
            Err(e) => {
                tracing::error!(room_id = %input.room, error = %e, "Booking insert failed");
                return Err(BookingError::CreationFailed);
            }
        };

        if let Err(e) = self.notifier.send_confirmation(user, &booking, &room).await {
            tracing::warn!(
                booking_id = %booking.id,
                error = %e,
                "Booking confirmation could not be delivered"
            );
        }

        Ok(booking)
    }

    /// The caller's bookings, newest first
    pub async fn list_user_bookings(&self, user_id: Uuid) -> BookingResult<Vec<BookingDetails>> {
        self.repository.list_by_user(user_id).await.map_err(|e| {
            tracing::error!(user_id = %user_id, error = %e, "Failed to list user bookings");
            BookingError::FetchFailed
        })
    }

    /// Bookings and revenue for the hotel owned by `owner_id`
    pub async fn hotel_dashboard(&self, owner_id: Uuid) -> BookingResult<HotelDashboard> {
        let hotel = self
            .repository
            .find_hotel_by_owner(owner_id)
            .await
            .map_err(|e| {
                tracing::error!(owner_id = %owner_id, error = %e, "Hotel lookup failed");
                BookingError::FetchFailed
            })?
            .ok_or(BookingError::NoHotel)?;

        let bookings = self.repository.list_by_hotel(hotel.id).await.map_err(|e| {
            tracing::error!(hotel_id = %hotel.id, error = %e, "Failed to list hotel bookings");
            BookingError::FetchFailed
        })?;

        Ok(HotelDashboard::from_bookings(bookings))
    }
}
