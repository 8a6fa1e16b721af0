use anyhow::{Context as _, anyhow};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionError, TransactionTrait,
    sea_query::Expr,
};

use banquet_admin_schema::{
    brands, recharge_records, restaurant_users, restaurants, system_configs, wallets,
};
use banquet_core::sea_ext::{LIVE, LiveRows, deletion_stamp, find_live, soft_delete_many};
use banquet_domain::brand::LevelType;
use banquet_domain::id::{BrandId, RestaurantId, UserId};
use banquet_domain::money::{Cents, MoneyError, Points};
use banquet_domain::pagination::PageRequest;

use crate::domain::repository::{
    BrandRepository, RestaurantRepository, RestaurantUserRepository, SystemConfigRepository,
    WalletRepository,
};
use crate::domain::types::{
    Brand, BrandChanges, NewBrand, NewRecharge, NewRestaurant, NewRestaurantUser, RechargeRecord,
    Restaurant, RestaurantChanges, RestaurantUser, RestaurantUserChanges, SystemConfig, Wallet,
};
use crate::error::AdminServiceError;

fn page_limit(page: PageRequest) -> u64 {
    u64::from(page.clamped().per_page)
}

// ── Brand repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbBrandRepository {
    pub db: DatabaseConnection,
}

impl BrandRepository for DbBrandRepository {
    async fn find_by_id(&self, id: BrandId) -> Result<Option<Brand>, AdminServiceError> {
        let model = find_live::<brands::Entity>()
            .filter(brands::Column::Id.eq(id.0))
            .one(&self.db)
            .await
            .context("find brand by id")?;
        model.map(brand_from_model).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Brand>, AdminServiceError> {
        let model = find_live::<brands::Entity>()
            .filter(brands::Column::Name.eq(name))
            .one(&self.db)
            .await
            .context("find brand by name")?;
        model.map(brand_from_model).transpose()
    }

    async fn list(&self, page: PageRequest) -> Result<(Vec<Brand>, u64), AdminServiceError> {
        let query = find_live::<brands::Entity>().order_by_asc(brands::Column::Id);
        let total = query
            .clone()
            .count(&self.db)
            .await
            .context("count brands")?;
        let models = query
            .offset(page.offset())
            .limit(page_limit(page))
            .all(&self.db)
            .await
            .context("list brands")?;
        let brands = models
            .into_iter()
            .map(brand_from_model)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((brands, total))
    }

    async fn create(&self, brand: &NewBrand) -> Result<Brand, AdminServiceError> {
        let now = Utc::now();
        let model = brands::ActiveModel {
            name: Set(brand.name.clone()),
            logo: Set(brand.logo.clone()),
            contact: Set(brand.contact.clone()),
            phone: Set(brand.phone.clone()),
            level_type: Set(i16::from(brand.level_type.as_u8())),
            expired_date: Set(brand.expired_date),
            created_at: Set(now),
            updated_at: Set(now),
            delete_at: Set(LIVE),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create brand")?;
        brand_from_model(model)
    }

    async fn update(
        &self,
        id: BrandId,
        changes: &BrandChanges,
    ) -> Result<Option<Brand>, AdminServiceError> {
        let Some(model) = find_live::<brands::Entity>()
            .filter(brands::Column::Id.eq(id.0))
            .one(&self.db)
            .await
            .context("find brand for update")?
        else {
            return Ok(None);
        };

        let mut active: brands::ActiveModel = model.into();
        if let Some(name) = &changes.name {
            active.name = Set(name.clone());
        }
        if let Some(logo) = &changes.logo {
            active.logo = Set(Some(logo.clone()));
        }
        if let Some(contact) = &changes.contact {
            active.contact = Set(Some(contact.clone()));
        }
        if let Some(phone) = &changes.phone {
            active.phone = Set(Some(phone.clone()));
        }
        if let Some(level) = changes.level_type {
            active.level_type = Set(i16::from(level.as_u8()));
        }
        if let Some(expired_date) = changes.expired_date {
            active.expired_date = Set(Some(expired_date));
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.context("update brand")?;
        brand_from_model(model).map(Some)
    }

    async fn delete(&self, id: BrandId) -> Result<bool, AdminServiceError> {
        let now = Utc::now();
        let stamp = deletion_stamp();
        let deleted = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    let result = soft_delete_many::<brands::Entity>(stamp)
                        .col_expr(brands::Column::UpdatedAt, Expr::value(now))
                        .filter(brands::Column::Id.eq(id.0))
                        .exec(txn)
                        .await?;
                    if result.rows_affected == 0 {
                        return Ok(false);
                    }
                    soft_delete_many::<restaurants::Entity>(stamp)
                        .col_expr(restaurants::Column::UpdatedAt, Expr::value(now))
                        .filter(restaurants::Column::BrandId.eq(id.0))
                        .exec(txn)
                        .await?;
                    Ok(true)
                })
            })
            .await
            .context("soft delete brand with restaurants")?;
        Ok(deleted)
    }

    async fn list_for_sweep(&self) -> Result<Vec<Brand>, AdminServiceError> {
        let models = find_live::<brands::Entity>()
            .order_by_asc(brands::Column::Id)
            .all(&self.db)
            .await
            .context("list brands for sweep")?;
        models.into_iter().map(brand_from_model).collect()
    }

    async fn set_level(&self, id: BrandId, level: LevelType) -> Result<(), AdminServiceError> {
        brands::Entity::update_many()
            .col_expr(
                brands::Column::LevelType,
                Expr::value(i16::from(level.as_u8())),
            )
            .col_expr(brands::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(brands::Column::Id.eq(id.0))
            .filter(brands::Column::DeleteAt.eq(LIVE))
            .exec(&self.db)
            .await
            .context("set brand level")?;
        Ok(())
    }
}

fn brand_from_model(model: brands::Model) -> Result<Brand, AdminServiceError> {
    let level_type = u8::try_from(model.level_type)
        .ok()
        .and_then(LevelType::from_u8)
        .ok_or_else(|| anyhow!("brand {} has unknown level_type {}", model.id, model.level_type))?;
    Ok(Brand {
        id: BrandId(model.id),
        name: model.name,
        logo: model.logo,
        contact: model.contact,
        phone: model.phone,
        level_type,
        expired_date: model.expired_date,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Restaurant repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRestaurantRepository {
    pub db: DatabaseConnection,
}

impl RestaurantRepository for DbRestaurantRepository {
    async fn find_by_id(
        &self,
        id: RestaurantId,
    ) -> Result<Option<Restaurant>, AdminServiceError> {
        let model = find_live::<restaurants::Entity>()
            .filter(restaurants::Column::Id.eq(id.0))
            .one(&self.db)
            .await
            .context("find restaurant by id")?;
        Ok(model.map(restaurant_from_model))
    }

    async fn find_by_name(
        &self,
        brand_id: BrandId,
        name: &str,
    ) -> Result<Option<Restaurant>, AdminServiceError> {
        let model = find_live::<restaurants::Entity>()
            .filter(restaurants::Column::BrandId.eq(brand_id.0))
            .filter(restaurants::Column::Name.eq(name))
            .one(&self.db)
            .await
            .context("find restaurant by name")?;
        Ok(model.map(restaurant_from_model))
    }

    async fn list_by_brand(
        &self,
        brand_id: BrandId,
        page: PageRequest,
    ) -> Result<(Vec<Restaurant>, u64), AdminServiceError> {
        let query = find_live::<restaurants::Entity>()
            .filter(restaurants::Column::BrandId.eq(brand_id.0))
            .order_by_asc(restaurants::Column::Id);
        let total = query
            .clone()
            .count(&self.db)
            .await
            .context("count restaurants")?;
        let models = query
            .offset(page.offset())
            .limit(page_limit(page))
            .all(&self.db)
            .await
            .context("list restaurants by brand")?;
        Ok((models.into_iter().map(restaurant_from_model).collect(), total))
    }

    async fn count_by_brand(&self, brand_id: BrandId) -> Result<u64, AdminServiceError> {
        let count = find_live::<restaurants::Entity>()
            .filter(restaurants::Column::BrandId.eq(brand_id.0))
            .count(&self.db)
            .await
            .context("count restaurants by brand")?;
        Ok(count)
    }

    async fn create(&self, restaurant: &NewRestaurant) -> Result<Restaurant, AdminServiceError> {
        let now = Utc::now();
        let model = restaurants::ActiveModel {
            brand_id: Set(restaurant.brand_id.0),
            name: Set(restaurant.name.clone()),
            address: Set(restaurant.address.clone()),
            phone: Set(restaurant.phone.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            delete_at: Set(LIVE),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create restaurant")?;
        Ok(restaurant_from_model(model))
    }

    async fn update(
        &self,
        id: RestaurantId,
        changes: &RestaurantChanges,
    ) -> Result<Option<Restaurant>, AdminServiceError> {
        let Some(model) = find_live::<restaurants::Entity>()
            .filter(restaurants::Column::Id.eq(id.0))
            .one(&self.db)
            .await
            .context("find restaurant for update")?
        else {
            return Ok(None);
        };

        let mut active: restaurants::ActiveModel = model.into();
        if let Some(name) = &changes.name {
            active.name = Set(name.clone());
        }
        if let Some(address) = &changes.address {
            active.address = Set(Some(address.clone()));
        }
        if let Some(phone) = &changes.phone {
            active.phone = Set(Some(phone.clone()));
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.context("update restaurant")?;
        Ok(Some(restaurant_from_model(model)))
    }

    async fn delete(&self, id: RestaurantId) -> Result<bool, AdminServiceError> {
        let result = soft_delete_many::<restaurants::Entity>(deletion_stamp())
            .col_expr(restaurants::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(restaurants::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .context("soft delete restaurant")?;
        Ok(result.rows_affected > 0)
    }
}

fn restaurant_from_model(model: restaurants::Model) -> Restaurant {
    Restaurant {
        id: RestaurantId(model.id),
        brand_id: BrandId(model.brand_id),
        name: model.name,
        address: model.address,
        phone: model.phone,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Restaurant user repository ────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRestaurantUserRepository {
    pub db: DatabaseConnection,
}

impl RestaurantUserRepository for DbRestaurantUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<RestaurantUser>, AdminServiceError> {
        let model = find_live::<restaurant_users::Entity>()
            .filter(restaurant_users::Column::Id.eq(id.0))
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_account(
        &self,
        account: &str,
    ) -> Result<Option<RestaurantUser>, AdminServiceError> {
        let model = find_live::<restaurant_users::Entity>()
            .filter(restaurant_users::Column::Account.eq(account))
            .one(&self.db)
            .await
            .context("find user by account")?;
        Ok(model.map(user_from_model))
    }

    async fn list_by_brand(
        &self,
        brand_id: BrandId,
        page: PageRequest,
    ) -> Result<(Vec<RestaurantUser>, u64), AdminServiceError> {
        let query = find_live::<restaurant_users::Entity>()
            .filter(restaurant_users::Column::BrandId.eq(brand_id.0))
            .order_by_asc(restaurant_users::Column::Id);
        let total = query
            .clone()
            .count(&self.db)
            .await
            .context("count users")?;
        let models = query
            .offset(page.offset())
            .limit(page_limit(page))
            .all(&self.db)
            .await
            .context("list users by brand")?;
        Ok((models.into_iter().map(user_from_model).collect(), total))
    }

    async fn count_by_brand(&self, brand_id: BrandId) -> Result<u64, AdminServiceError> {
        let count = find_live::<restaurant_users::Entity>()
            .filter(restaurant_users::Column::BrandId.eq(brand_id.0))
            .count(&self.db)
            .await
            .context("count users by brand")?;
        Ok(count)
    }

    async fn create(&self, user: &NewRestaurantUser) -> Result<RestaurantUser, AdminServiceError> {
        let now = Utc::now();
        let model = restaurant_users::ActiveModel {
            brand_id: Set(user.brand_id.map(|id| id.0)),
            restaurant_id: Set(user.restaurant_id.map(|id| id.0)),
            account: Set(user.account.clone()),
            password_hash: Set(user.password_hash.clone()),
            name: Set(user.name.clone()),
            phone: Set(user.phone.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            delete_at: Set(LIVE),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(user_from_model(model))
    }

    async fn update(
        &self,
        id: UserId,
        changes: &RestaurantUserChanges,
    ) -> Result<Option<RestaurantUser>, AdminServiceError> {
        let Some(model) = find_live::<restaurant_users::Entity>()
            .filter(restaurant_users::Column::Id.eq(id.0))
            .one(&self.db)
            .await
            .context("find user for update")?
        else {
            return Ok(None);
        };

        let mut active: restaurant_users::ActiveModel = model.into();
        if let Some(name) = &changes.name {
            active.name = Set(name.clone());
        }
        if let Some(phone) = &changes.phone {
            active.phone = Set(Some(phone.clone()));
        }
        if let Some(restaurant_id) = changes.restaurant_id {
            active.restaurant_id = Set(Some(restaurant_id.0));
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.context("update user")?;
        Ok(Some(user_from_model(model)))
    }

    async fn set_password(
        &self,
        id: UserId,
        password_hash: &str,
    ) -> Result<bool, AdminServiceError> {
        let result = restaurant_users::Entity::update_many()
            .col_expr(
                restaurant_users::Column::PasswordHash,
                Expr::value(password_hash.to_owned()),
            )
            .col_expr(restaurant_users::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(restaurant_users::Column::Id.eq(id.0))
            .filter(restaurant_users::Column::DeleteAt.eq(LIVE))
            .exec(&self.db)
            .await
            .context("set user password")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: UserId) -> Result<bool, AdminServiceError> {
        let result = soft_delete_many::<restaurant_users::Entity>(deletion_stamp())
            .col_expr(restaurant_users::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(restaurant_users::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .context("soft delete user")?;
        Ok(result.rows_affected > 0)
    }
}

fn user_from_model(model: restaurant_users::Model) -> RestaurantUser {
    RestaurantUser {
        id: UserId(model.id),
        brand_id: model.brand_id.map(BrandId),
        restaurant_id: model.restaurant_id.map(RestaurantId),
        account: model.account,
        password_hash: model.password_hash,
        name: model.name,
        phone: model.phone,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Wallet repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbWalletRepository {
    pub db: DatabaseConnection,
}

impl WalletRepository for DbWalletRepository {
    async fn find_by_brand(&self, brand_id: BrandId) -> Result<Option<Wallet>, AdminServiceError> {
        let model = find_live::<wallets::Entity>()
            .filter(wallets::Column::BrandId.eq(brand_id.0))
            .one(&self.db)
            .await
            .context("find wallet by brand")?;
        Ok(model.map(wallet_from_model))
    }

    async fn recharge(
        &self,
        recharge: &NewRecharge,
    ) -> Result<(Wallet, RechargeRecord), AdminServiceError> {
        let recharge = recharge.clone();
        let (wallet, record) = self
            .db
            .transaction::<_, (wallets::Model, recharge_records::Model), RechargeError>(|txn| {
                Box::pin(async move {
                    let now = Utc::now();
                    let existing = find_live::<wallets::Entity>()
                        .filter(wallets::Column::BrandId.eq(recharge.brand_id.0))
                        .lock_exclusive()
                        .one(txn)
                        .await?;

                    let wallet = match existing {
                        Some(model) => {
                            let balance = Cents(model.balance)
                                .checked_add(recharge.amount)
                                .ok_or(MoneyError::Overflow)?;
                            let points = Points(model.points)
                                .checked_add(recharge.points)
                                .ok_or(MoneyError::Overflow)?;
                            let mut active: wallets::ActiveModel = model.into();
                            active.balance = Set(balance.0);
                            active.points = Set(points.0);
                            active.updated_at = Set(now);
                            active.update(txn).await?
                        }
                        None => {
                            wallets::ActiveModel {
                                brand_id: Set(recharge.brand_id.0),
                                balance: Set(recharge.amount.0),
                                points: Set(recharge.points.0),
                                created_at: Set(now),
                                updated_at: Set(now),
                                delete_at: Set(LIVE),
                                ..Default::default()
                            }
                            .insert(txn)
                            .await?
                        }
                    };

                    let record = recharge_records::ActiveModel {
                        brand_id: Set(recharge.brand_id.0),
                        amount: Set(recharge.amount.0),
                        points: Set(recharge.points.0),
                        operator_id: Set(recharge.operator_id.0),
                        remark: Set(recharge.remark.clone()),
                        created_at: Set(now),
                        delete_at: Set(LIVE),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;

                    Ok((wallet, record))
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Transaction(RechargeError::Money(e)) => {
                    AdminServiceError::InvalidAmount(e)
                }
                e => anyhow::Error::from(e).context("recharge wallet").into(),
            })?;
        Ok((wallet_from_model(wallet), recharge_from_model(record)))
    }

    async fn list_recharges(
        &self,
        brand_id: BrandId,
        page: PageRequest,
    ) -> Result<(Vec<RechargeRecord>, u64), AdminServiceError> {
        let query = find_live::<recharge_records::Entity>()
            .filter(recharge_records::Column::BrandId.eq(brand_id.0))
            .order_by_desc(recharge_records::Column::CreatedAt)
            .order_by_desc(recharge_records::Column::Id);
        let total = query
            .clone()
            .count(&self.db)
            .await
            .context("count recharges")?;
        let models = query
            .offset(page.offset())
            .limit(page_limit(page))
            .all(&self.db)
            .await
            .context("list recharges")?;
        Ok((models.into_iter().map(recharge_from_model).collect(), total))
    }

    async fn total_recharged(&self, brand_id: BrandId) -> Result<Cents, AdminServiceError> {
        // SUM(bigint) is numeric in Postgres.
        let total: Option<i64> = recharge_records::Entity::find()
            .live()
            .select_only()
            .column_as(Expr::cust("COALESCE(SUM(amount), 0)::BIGINT"), "total")
            .filter(recharge_records::Column::BrandId.eq(brand_id.0))
            .into_tuple()
            .one(&self.db)
            .await
            .context("sum recharges")?;
        Ok(Cents(total.unwrap_or(0)))
    }
}

fn wallet_from_model(model: wallets::Model) -> Wallet {
    Wallet {
        brand_id: BrandId(model.brand_id),
        balance: Cents(model.balance),
        points: Points(model.points),
        updated_at: Some(model.updated_at),
    }
}

/// Failures inside the recharge transaction. Overflow is the caller's fault.
#[derive(Debug, thiserror::Error)]
enum RechargeError {
    #[error(transparent)]
    Db(#[from] DbErr),
    #[error(transparent)]
    Money(#[from] MoneyError),
}

fn recharge_from_model(model: recharge_records::Model) -> RechargeRecord {
    RechargeRecord {
        id: model.id,
        brand_id: BrandId(model.brand_id),
        amount: Cents(model.amount),
        points: Points(model.points),
        operator_id: UserId(model.operator_id),
        remark: model.remark,
        created_at: model.created_at,
    }
}

// ── System config repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSystemConfigRepository {
    pub db: DatabaseConnection,
}

impl SystemConfigRepository for DbSystemConfigRepository {
    async fn find(&self, key: &str) -> Result<Option<SystemConfig>, AdminServiceError> {
        let model = find_live::<system_configs::Entity>()
            .filter(system_configs::Column::Key.eq(key))
            .one(&self.db)
            .await
            .context("find system config")?;
        Ok(model.map(config_from_model))
    }

    async fn list(&self) -> Result<Vec<SystemConfig>, AdminServiceError> {
        let models = find_live::<system_configs::Entity>()
            .order_by_asc(system_configs::Column::Key)
            .all(&self.db)
            .await
            .context("list system configs")?;
        Ok(models.into_iter().map(config_from_model).collect())
    }

    async fn upsert(
        &self,
        key: &str,
        value: &str,
        remark: Option<&str>,
    ) -> Result<SystemConfig, AdminServiceError> {
        let now = Utc::now();
        let existing = find_live::<system_configs::Entity>()
            .filter(system_configs::Column::Key.eq(key))
            .one(&self.db)
            .await
            .context("find system config for upsert")?;

        let model = match existing {
            Some(model) => {
                let mut active: system_configs::ActiveModel = model.into();
                active.value = Set(value.to_owned());
                if let Some(remark) = remark {
                    active.remark = Set(Some(remark.to_owned()));
                }
                active.updated_at = Set(now);
                active
                    .update(&self.db)
                    .await
                    .context("update system config")?
            }
            None => system_configs::ActiveModel {
                key: Set(key.to_owned()),
                value: Set(value.to_owned()),
                remark: Set(remark.map(str::to_owned)),
                created_at: Set(now),
                updated_at: Set(now),
                delete_at: Set(LIVE),
                ..Default::default()
            }
            .insert(&self.db)
            .await
            .context("create system config")?,
        };
        Ok(config_from_model(model))
    }

    async fn delete(&self, key: &str) -> Result<bool, AdminServiceError> {
        let result = soft_delete_many::<system_configs::Entity>(deletion_stamp())
            .col_expr(system_configs::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(system_configs::Column::Key.eq(key))
            .exec(&self.db)
            .await
            .context("soft delete system config")?;
        Ok(result.rows_affected > 0)
    }
}

fn config_from_model(model: system_configs::Model) -> SystemConfig {
    SystemConfig {
        key: model.key,
        value: model.value,
        remark: model.remark,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
