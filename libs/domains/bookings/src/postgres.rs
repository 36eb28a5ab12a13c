use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    sea_query::OnConflict,
};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::{
    entity::{booking, hotel, room, user},
    error::{BookingError, BookingResult},
    models::{Booking, BookingDetails, DateRange, Hotel, NewBooking, Room, RoomWithHotel, User},
    repository::{BookingRepository, InsertOutcome},
};

#[derive(Clone)]
pub struct PgBookingRepository {
    db: DatabaseConnection,
}

impl PgBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert or refresh the local copy of a guest.
    async fn upsert_guest<C: ConnectionTrait>(conn: &C, guest: &User) -> BookingResult<()> {
        let model = user::ActiveModel {
            id: Set(guest.id),
            email: Set(guest.email.clone()),
            username: Set(guest.username.clone()),
            ..Default::default()
        };

        user::Entity::insert(model)
            .on_conflict(
                OnConflict::column(user::Column::Id)
                    .update_columns([user::Column::Email, user::Column::Username])
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await?;
        Ok(())
    }

    /// Batch-load rooms, hotels and optionally guests for `models`, keeping order.
    async fn with_details(
        &self,
        models: Vec<booking::Model>,
        with_user: bool,
    ) -> BookingResult<Vec<BookingDetails>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let room_ids: HashSet<Uuid> = models.iter().map(|m| m.room_id).collect();
        let hotel_ids: HashSet<Uuid> = models.iter().map(|m| m.hotel_id).collect();

        let rooms: HashMap<Uuid, Room> = room::Entity::find()
            .filter(room::Column::Id.is_in(room_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| (m.id, m.into()))
            .collect();

        let hotels: HashMap<Uuid, Hotel> = hotel::Entity::find()
            .filter(hotel::Column::Id.is_in(hotel_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| (m.id, m.into()))
            .collect();

        let users: HashMap<Uuid, User> = if with_user {
            let user_ids: HashSet<Uuid> = models.iter().map(|m| m.user_id).collect();
            user::Entity::find()
                .filter(user::Column::Id.is_in(user_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|m| (m.id, m.into()))
                .collect()
        } else {
            HashMap::new()
        };

        let mut details = Vec::with_capacity(models.len());
        for model in models {
            let booking: Booking = model.into();
            let (Some(room), Some(hotel)) =
                (rooms.get(&booking.room_id), hotels.get(&booking.hotel_id))
            else {
                tracing::warn!(booking_id = %booking.id, "Booking references a missing room or hotel");
                continue;
            };
            details.push(BookingDetails {
                room: room.clone(),
                hotel: hotel.clone(),
                user: users.get(&booking.user_id).cloned(),
                booking,
            });
        }

        Ok(details)
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn find_overlapping(
        &self,
        room_id: Uuid,
        range: DateRange,
    ) -> BookingResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::RoomId.eq(room_id))
            .filter(booking::Column::CheckInDate.lte(range.check_out))
            .filter(booking::Column::CheckOutDate.gte(range.check_in))
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_room_with_hotel(&self, room_id: Uuid) -> BookingResult<Option<RoomWithHotel>> {
        let found = room::Entity::find_by_id(room_id)
            .find_also_related(hotel::Entity)
            .one(&self.db)
            .await?;

        Ok(match found {
            Some((room, Some(hotel))) => Some(RoomWithHotel {
                room: room.into(),
                hotel: hotel.into(),
            }),
            _ => None,
        })
    }

    async fn insert_if_available(&self, input: NewBooking) -> BookingResult<InsertOutcome> {
        let txn = self.db.begin().await?;

        // Row lock on the room serializes concurrent writers for it
        let locked = room::Entity::find_by_id(input.room_id)
            .lock_exclusive()
            .one(&txn)
            .await?;
        if locked.is_none() {
            txn.rollback().await?;
            return Err(BookingError::RoomNotFound(input.room_id));
        }

        let conflicts = booking::Entity::find()
            .filter(booking::Column::RoomId.eq(input.room_id))
            .filter(booking::Column::CheckInDate.lte(input.range.check_out))
            .filter(booking::Column::CheckOutDate.gte(input.range.check_in))
            .count(&txn)
            .await?;
        if conflicts > 0 {
            txn.rollback().await?;
            return Ok(InsertOutcome::Conflict);
        }

        Self::upsert_guest(&txn, &input.guest).await?;

        let active_model: booking::ActiveModel = input.into();
        let model = active_model.insert(&txn).await?;
        txn.commit().await?;

        tracing::info!(booking_id = %model.id, room_id = %model.room_id, "Created booking");
        Ok(InsertOutcome::Inserted(model.into()))
    }

    async fn get_booking(&self, id: Uuid) -> BookingResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list_by_user(&self, user_id: Uuid) -> BookingResult<Vec<BookingDetails>> {
        let models = booking::Entity::find()
            .filter(booking::Column::UserId.eq(user_id))
            .order_by_desc(booking::Column::CreatedAt)
            .order_by_desc(booking::Column::Id)
            .all(&self.db)
            .await?;

        self.with_details(models, false).await
    }

    async fn find_hotel_by_owner(&self, owner_id: Uuid) -> BookingResult<Option<Hotel>> {
        let model = hotel::Entity::find()
            .filter(hotel::Column::OwnerId.eq(owner_id))
            .order_by_asc(hotel::Column::CreatedAt)
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn list_by_hotel(&self, hotel_id: Uuid) -> BookingResult<Vec<BookingDetails>> {
        let models = booking::Entity::find()
            .filter(booking::Column::HotelId.eq(hotel_id))
            .order_by_desc(booking::Column::CreatedAt)
            .order_by_desc(booking::Column::Id)
            .all(&self.db)
            .await?;

        self.with_details(models, true).await
    }
}
