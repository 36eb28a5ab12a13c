use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::availability::ranges_overlap;
use crate::error::{BookingError, BookingResult};
use crate::models::{Booking, BookingDetails, DateRange, Hotel, NewBooking, Room, RoomWithHotel, User};

/// Result of the conditional insert
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    Inserted(Booking),
    /// An overlapping booking already exists for the room
    Conflict,
}

/// Repository trait for booking persistence and the joined read views
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Bookings on `room_id` overlapping `range` (inclusive)
    async fn find_overlapping(&self, room_id: Uuid, range: DateRange)
    -> BookingResult<Vec<Booking>>;

    async fn find_room_with_hotel(&self, room_id: Uuid) -> BookingResult<Option<RoomWithHotel>>;

    /// Re-run the overlap test and insert as one atomic step.
    async fn insert_if_available(&self, booking: NewBooking) -> BookingResult<InsertOutcome>;

    async fn get_booking(&self, id: Uuid) -> BookingResult<Option<Booking>>;

    /// Newest first, with room and hotel
    async fn list_by_user(&self, user_id: Uuid) -> BookingResult<Vec<BookingDetails>>;

    async fn find_hotel_by_owner(&self, owner_id: Uuid) -> BookingResult<Option<Hotel>>;

    /// Newest first, with room, hotel and guest
    async fn list_by_hotel(&self, hotel_id: Uuid) -> BookingResult<Vec<BookingDetails>>;
}

#[derive(Debug, Default)]
struct Store {
    users: HashMap<Uuid, User>,
    hotels: HashMap<Uuid, Hotel>,
    rooms: HashMap<Uuid, Room>,
    bookings: HashMap<Uuid, Booking>,
}

impl Store {
    fn details(&self, booking: &Booking, with_user: bool) -> Option<BookingDetails> {
        let (Some(room), Some(hotel)) = (
            self.rooms.get(&booking.room_id).cloned(),
            self.hotels.get(&booking.hotel_id).cloned(),
        ) else {
            tracing::warn!(booking_id = %booking.id, "Booking references a missing room or hotel");
            return None;
        };
        let user = if with_user {
            self.users.get(&booking.user_id).cloned()
        } else {
            None
        };
        Some(BookingDetails {
            booking: booking.clone(),
            room,
            hotel,
            user,
        })
    }

    fn details_where<F>(&self, predicate: F, with_user: bool) -> Vec<BookingDetails>
    where
        F: Fn(&Booking) -> bool,
    {
        let mut result: Vec<BookingDetails> = self
            .bookings
            .values()
            .filter(|b| predicate(b))
            .filter_map(|b| self.details(b, with_user))
            .collect();

        // Newest first; v7 ids break ties in creation order
        result.sort_by(|a, b| {
            b.booking
                .created_at
                .cmp(&a.booking.created_at)
                .then_with(|| b.booking.id.cmp(&a.booking.id))
        });
        result
    }
}

/// In-memory implementation of BookingRepository (for development/testing)
///
/// A single write lock covers the overlap check and the insert.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBookingRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_user(&self, user: User) {
        self.store.write().await.users.insert(user.id, user);
    }

    pub async fn add_hotel(&self, hotel: Hotel) {
        self.store.write().await.hotels.insert(hotel.id, hotel);
    }

    pub async fn add_room(&self, room: Room) {
        self.store.write().await.rooms.insert(room.id, room);
    }

    /// Store a booking as-is, bypassing the overlap check
    pub async fn add_booking(&self, booking: Booking) {
        self.store.write().await.bookings.insert(booking.id, booking);
    }

    pub async fn booking_count(&self) -> usize {
        self.store.read().await.bookings.len()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn find_overlapping(
        &self,
        room_id: Uuid,
        range: DateRange,
    ) -> BookingResult<Vec<Booking>> {
        let store = self.store.read().await;
        Ok(store
            .bookings
            .values()
            .filter(|b| b.room_id == room_id && ranges_overlap(&b.range(), &range))
            .cloned()
            .collect())
    }

    async fn find_room_with_hotel(&self, room_id: Uuid) -> BookingResult<Option<RoomWithHotel>> {
        let store = self.store.read().await;
        let Some(room) = store.rooms.get(&room_id) else {
            return Ok(None);
        };
        Ok(store.hotels.get(&room.hotel_id).map(|hotel| RoomWithHotel {
            room: room.clone(),
            hotel: hotel.clone(),
        }))
    }

    async fn insert_if_available(&self, input: NewBooking) -> BookingResult<InsertOutcome> {
        let mut store = self.store.write().await;

        if !store.rooms.contains_key(&input.room_id) {
            return Err(BookingError::RoomNotFound(input.room_id));
        }

        let conflict = store
            .bookings
            .values()
            .any(|b| b.room_id == input.room_id && ranges_overlap(&b.range(), &input.range));
        if conflict {
            return Ok(InsertOutcome::Conflict);
        }

        store.users.insert(input.guest.id, input.guest.clone());
        let booking = Booking::from_new(input);
        store.bookings.insert(booking.id, booking.clone());

        tracing::info!(booking_id = %booking.id, room_id = %booking.room_id, "Created booking");
        Ok(InsertOutcome::Inserted(booking))
    }

    async fn get_booking(&self, id: Uuid) -> BookingResult<Option<Booking>> {
        let store = self.store.read().await;
        Ok(store.bookings.get(&id).cloned())
    }

    async fn list_by_user(&self, user_id: Uuid) -> BookingResult<Vec<BookingDetails>> {
        let store = self.store.read().await;
        Ok(store.details_where(|b| b.user_id == user_id, false))
    }

    async fn find_hotel_by_owner(&self, owner_id: Uuid) -> BookingResult<Option<Hotel>> {
        let store = self.store.read().await;
        Ok(store
            .hotels
            .values()
            .find(|h| h.owner_id == owner_id)
            .cloned())
    }

    async fn list_by_hotel(&self, hotel_id: Uuid) -> BookingResult<Vec<BookingDetails>> {
        let store = self.store.read().await;
        Ok(store.details_where(|b| b.hotel_id == hotel_id, true))
    }
}
