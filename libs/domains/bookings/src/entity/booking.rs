use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::NewBooking;

/// Sea-ORM Entity for the bookings table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub room_id: Uuid,
    pub hotel_id: Uuid,
    pub guests: i32,
    pub check_in_date: DateTimeWithTimeZone,
    pub check_out_date: DateTimeWithTimeZone,
    #[sea_orm(column_type = "Double")]
    pub total_price: f64,
    pub is_paid: bool,
    pub payment_method: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::room::Entity",
        from = "Column::RoomId",
        to = "super::room::Column::Id"
    )]
    Room,
    #[sea_orm(
        belongs_to = "super::hotel::Entity",
        from = "Column::HotelId",
        to = "super::hotel::Column::Id"
    )]
    Hotel,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl Related<super::hotel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hotel.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Booking {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            room_id: model.room_id,
            hotel_id: model.hotel_id,
            guests: u32::try_from(model.guests).unwrap_or_default(),
            check_in_date: model.check_in_date.into(),
            check_out_date: model.check_out_date.into(),
            total_price: model.total_price,
            is_paid: model.is_paid,
            payment_method: model.payment_method,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<NewBooking> for ActiveModel {
    fn from(input: NewBooking) -> Self {
        let booking = crate::models::Booking::from_new(input);
        ActiveModel {
            id: Set(booking.id),
            user_id: Set(booking.user_id),
            room_id: Set(booking.room_id),
            hotel_id: Set(booking.hotel_id),
            guests: Set(i32::try_from(booking.guests).unwrap_or(i32::MAX)),
            check_in_date: Set(booking.check_in_date.into()),
            check_out_date: Set(booking.check_out_date.into()),
            total_price: Set(booking.total_price),
            is_paid: Set(booking.is_paid),
            payment_method: Set(booking.payment_method),
            created_at: Set(booking.created_at.into()),
            updated_at: Set(booking.updated_at.into()),
        }
    }
}
