use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_create_users::Users;
use crate::m20250301_000002_create_hotels::Hotels;
use crate::m20250301_000003_create_rooms::Rooms;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(pk_uuid(Bookings::Id))
                    .col(uuid(Bookings::UserId))
                    .col(uuid(Bookings::RoomId))
                    .col(uuid(Bookings::HotelId))
                    .col(integer(Bookings::Guests))
                    .col(timestamp_with_time_zone(Bookings::CheckInDate))
                    .col(timestamp_with_time_zone(Bookings::CheckOutDate))
                    .col(double(Bookings::TotalPrice))
                    .col(boolean(Bookings::IsPaid).default(false))
                    .col(string(Bookings::PaymentMethod).default("Pay At Hotel"))
                    .col(
                        timestamp_with_time_zone(Bookings::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Bookings::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_user_id")
                            .from(Bookings::Table, Bookings::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_room_id")
                            .from(Bookings::Table, Bookings::RoomId)
                            .to(Rooms::Table, Rooms::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_hotel_id")
                            .from(Bookings::Table, Bookings::HotelId)
                            .to(Hotels::Table, Hotels::Id),
                    )
                    .check(Expr::col(Bookings::CheckOutDate).gt(Expr::col(Bookings::CheckInDate)))
                    .check(Expr::col(Bookings::Guests).gte(1))
                    .to_owned(),
            )
            .await?;

        // Overlap lookups filter by room and compare both dates
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_room_dates")
                    .table(Bookings::Table)
                    .col(Bookings::RoomId)
                    .col(Bookings::CheckInDate)
                    .col(Bookings::CheckOutDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_user_created_at")
                    .table(Bookings::Table)
                    .col(Bookings::UserId)
                    .col(Bookings::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_hotel_id")
                    .table(Bookings::Table)
                    .col(Bookings::HotelId)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER bookings_touch_updated_at
                    BEFORE UPDATE ON bookings
                    FOR EACH ROW
                    EXECUTE FUNCTION util.touch_updated_at()
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TRIGGER IF EXISTS bookings_touch_updated_at ON bookings")
            .await?;

        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Bookings {
    Table,
    Id,
    UserId,
    RoomId,
    HotelId,
    Guests,
    CheckInDate,
    CheckOutDate,
    TotalPrice,
    IsPaid,
    PaymentMethod,
    CreatedAt,
    UpdatedAt,
}
