use sea_orm::entity::prelude::*;

/// Back-office login account.
///
/// `brand_id = NULL` marks a platform operator; otherwise the account belongs
/// to a brand and may be pinned to one of its restaurants.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "restaurant_users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub brand_id: Option<i64>,
    pub restaurant_id: Option<i64>,
    /// Login name; unique among live users.
    pub account: String,
    /// bcrypt hash.
    pub password_hash: String,
    pub name: String,
    pub phone: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub delete_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::brands::Entity",
        from = "Column::BrandId",
        to = "super::brands::Column::Id"
    )]
    Brand,
}

impl Related<super::brands::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Brand.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
