//! sea-orm entities for the admin service.
//!
//! Every table carries `delete_at` and implements
//! [`banquet_core::sea_ext::SoftDelete`].

pub mod brands;
pub mod recharge_records;
pub mod restaurant_users;
pub mod restaurants;
pub mod system_configs;
pub mod wallets;

macro_rules! soft_delete {
    ($($module:ident),* $(,)?) => {
        $(
            impl banquet_core::sea_ext::SoftDelete for $module::Entity {
                fn delete_at_column() -> $module::Column {
                    $module::Column::DeleteAt
                }
            }
        )*
    };
}

soft_delete!(
    brands,
    recharge_records,
    restaurant_users,
    restaurants,
    system_configs,
    wallets,
);
