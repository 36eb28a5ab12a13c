use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Hotels::Table)
                    .if_not_exists()
                    .col(pk_uuid(Hotels::Id))
                    .col(string(Hotels::Name))
                    .col(string(Hotels::Address))
                    .col(string(Hotels::City))
                    .col(string(Hotels::Contact).default(""))
                    .col(uuid(Hotels::OwnerId))
                    .col(
                        timestamp_with_time_zone(Hotels::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Hotels::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_hotels_owner_id")
                            .from(Hotels::Table, Hotels::OwnerId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_hotels_owner_id")
                    .table(Hotels::Table)
                    .col(Hotels::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER hotels_touch_updated_at
                    BEFORE UPDATE ON hotels
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
            .execute_unprepared("DROP TRIGGER IF EXISTS hotels_touch_updated_at ON hotels")
            .await?;

        manager
            .drop_table(Table::drop().table(Hotels::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Hotels {
    Table,
    Id,
    Name,
    Address,
    City,
    Contact,
    OwnerId,
    CreatedAt,
    UpdatedAt,
}
