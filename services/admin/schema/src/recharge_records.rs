use sea_orm::entity::prelude::*;

/// One top-up of a brand wallet.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "recharge_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub brand_id: i64,
    /// Cents.
    pub amount: i64,
    /// Hundredths of a point credited for `amount`.
    pub points: i64,
    pub operator_id: i64,
    pub remark: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub delete_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
