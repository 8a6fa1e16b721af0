use sea_orm_migration::prelude::*;

mod m20260401_000001_create_brands;
mod m20260401_000002_create_restaurants;
mod m20260401_000003_create_restaurant_users;
mod m20260401_000004_create_wallets;
mod m20260401_000005_create_recharge_records;
mod m20260401_000006_create_system_configs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260401_000001_create_brands::Migration),
            Box::new(m20260401_000002_create_restaurants::Migration),
            Box::new(m20260401_000003_create_restaurant_users::Migration),
            Box::new(m20260401_000004_create_wallets::Migration),
            Box::new(m20260401_000005_create_recharge_records::Migration),
            Box::new(m20260401_000006_create_system_configs::Migration),
        ]
    }
}
