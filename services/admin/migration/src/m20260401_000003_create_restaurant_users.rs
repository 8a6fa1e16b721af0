use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RestaurantUsers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RestaurantUsers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RestaurantUsers::BrandId).big_integer())
                    .col(ColumnDef::new(RestaurantUsers::RestaurantId).big_integer())
                    .col(ColumnDef::new(RestaurantUsers::Account).string().not_null())
                    .col(
                        ColumnDef::new(RestaurantUsers::PasswordHash)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RestaurantUsers::Name).string().not_null())
                    .col(ColumnDef::new(RestaurantUsers::Phone).string())
                    .col(
                        ColumnDef::new(RestaurantUsers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RestaurantUsers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RestaurantUsers::DeleteAt)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(RestaurantUsers::Table, RestaurantUsers::BrandId)
                            .to(Brands::Table, Brands::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS uq_restaurant_users_account_live \
                 ON restaurant_users (account) WHERE delete_at = 0",
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(RestaurantUsers::Table)
                    .col(RestaurantUsers::BrandId)
                    .name("idx_restaurant_users_brand_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RestaurantUsers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum RestaurantUsers {
    Table,
    Id,
    BrandId,
    RestaurantId,
    Account,
    PasswordHash,
    Name,
    Phone,
    CreatedAt,
    UpdatedAt,
    DeleteAt,
}

#[derive(Iden)]
enum Brands {
    Table,
    Id,
}
