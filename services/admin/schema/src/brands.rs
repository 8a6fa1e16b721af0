use sea_orm::entity::prelude::*;

/// A restaurant brand subscribed to the loyalty platform.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "brands")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique among live brands; checked before insert.
    pub name: String,
    pub logo: Option<String>,
    pub contact: Option<String>,
    pub phone: Option<String>,
    /// `LevelType` wire value.
    pub level_type: i16,
    pub expired_date: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub delete_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::restaurants::Entity")]
    Restaurants,
    #[sea_orm(has_many = "super::restaurant_users::Entity")]
    RestaurantUsers,
    #[sea_orm(has_one = "super::wallets::Entity")]
    Wallet,
}

impl Related<super::restaurants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurants.def()
    }
}

impl Related<super::restaurant_users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RestaurantUsers.def()
    }
}

impl Related<super::wallets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wallet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
