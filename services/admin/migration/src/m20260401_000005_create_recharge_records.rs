use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RechargeRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RechargeRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RechargeRecords::BrandId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RechargeRecords::Amount).big_integer().not_null())
                    .col(ColumnDef::new(RechargeRecords::Points).big_integer().not_null())
                    .col(
                        ColumnDef::new(RechargeRecords::OperatorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RechargeRecords::Remark).string())
                    .col(
                        ColumnDef::new(RechargeRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RechargeRecords::DeleteAt)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(RechargeRecords::Table, RechargeRecords::BrandId)
                            .to(Brands::Table, Brands::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(RechargeRecords::Table)
                    .col(RechargeRecords::BrandId)
                    .col(RechargeRecords::CreatedAt)
                    .name("idx_recharge_records_brand_id_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RechargeRecords::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum RechargeRecords {
    Table,
    Id,
    BrandId,
    Amount,
    Points,
    OperatorId,
    Remark,
    CreatedAt,
    DeleteAt,
}

#[derive(Iden)]
enum Brands {
    Table,
    Id,
}
