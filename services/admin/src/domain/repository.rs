#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use banquet_domain::brand::LevelType;
use banquet_domain::captcha::{Channel, Scene};
use banquet_domain::id::{BrandId, RestaurantId, UserId};
use banquet_domain::money::Cents;
use banquet_domain::pagination::PageRequest;

use crate::domain::types::{
    Brand, BrandChanges, NewBrand, NewRecharge, NewRestaurant, NewRestaurantUser, RechargeRecord,
    Restaurant, RestaurantChanges, RestaurantUser, RestaurantUserChanges, SystemConfig, Wallet,
};
use crate::error::AdminServiceError;

/// Repository for brands. Every method sees live rows only.
pub trait BrandRepository: Send + Sync {
    async fn find_by_id(&self, id: BrandId) -> Result<Option<Brand>, AdminServiceError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Brand>, AdminServiceError>;

    /// One page ordered by id, plus the live total.
    async fn list(&self, page: PageRequest) -> Result<(Vec<Brand>, u64), AdminServiceError>;

    async fn create(&self, brand: &NewBrand) -> Result<Brand, AdminServiceError>;

    /// `None` if no live brand has this id.
    async fn update(
        &self,
        id: BrandId,
        changes: &BrandChanges,
    ) -> Result<Option<Brand>, AdminServiceError>;

    /// Soft-delete the brand and its restaurants. Returns `true` if the brand was live.
    async fn delete(&self, id: BrandId) -> Result<bool, AdminServiceError>;

    /// Every live brand in id order.
    async fn list_for_sweep(&self) -> Result<Vec<Brand>, AdminServiceError>;

    async fn set_level(&self, id: BrandId, level: LevelType) -> Result<(), AdminServiceError>;
}

/// Repository for restaurants.
pub trait RestaurantRepository: Send + Sync {
    async fn find_by_id(&self, id: RestaurantId)
    -> Result<Option<Restaurant>, AdminServiceError>;

    async fn find_by_name(
        &self,
        brand_id: BrandId,
        name: &str,
    ) -> Result<Option<Restaurant>, AdminServiceError>;

    async fn list_by_brand(
        &self,
        brand_id: BrandId,
        page: PageRequest,
    ) -> Result<(Vec<Restaurant>, u64), AdminServiceError>;

    async fn count_by_brand(&self, brand_id: BrandId) -> Result<u64, AdminServiceError>;

    async fn create(&self, restaurant: &NewRestaurant) -> Result<Restaurant, AdminServiceError>;

    async fn update(
        &self,
        id: RestaurantId,
        changes: &RestaurantChanges,
    ) -> Result<Option<Restaurant>, AdminServiceError>;

    /// Returns `true` if a live row was deleted.
    async fn delete(&self, id: RestaurantId) -> Result<bool, AdminServiceError>;
}

/// Repository for back-office logins.
pub trait RestaurantUserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<RestaurantUser>, AdminServiceError>;
    async fn find_by_account(
        &self,
        account: &str,
    ) -> Result<Option<RestaurantUser>, AdminServiceError>;

    async fn list_by_brand(
        &self,
        brand_id: BrandId,
        page: PageRequest,
    ) -> Result<(Vec<RestaurantUser>, u64), AdminServiceError>;

    async fn count_by_brand(&self, brand_id: BrandId) -> Result<u64, AdminServiceError>;

    async fn create(&self, user: &NewRestaurantUser) -> Result<RestaurantUser, AdminServiceError>;

    async fn update(
        &self,
        id: UserId,
        changes: &RestaurantUserChanges,
    ) -> Result<Option<RestaurantUser>, AdminServiceError>;

    /// Returns `true` if a live row was updated.
    async fn set_password(&self, id: UserId, password_hash: &str)
    -> Result<bool, AdminServiceError>;

    async fn delete(&self, id: UserId) -> Result<bool, AdminServiceError>;
}

/// Repository for brand wallets and their recharge ledger.
pub trait WalletRepository: Send + Sync {
    async fn find_by_brand(&self, brand_id: BrandId) -> Result<Option<Wallet>, AdminServiceError>;

    /// Create the wallet if absent, credit it and append the ledger row, all in
    /// one transaction.
    async fn recharge(
        &self,
        recharge: &NewRecharge,
    ) -> Result<(Wallet, RechargeRecord), AdminServiceError>;

    /// Newest first.
    async fn list_recharges(
        &self,
        brand_id: BrandId,
        page: PageRequest,
    ) -> Result<(Vec<RechargeRecord>, u64), AdminServiceError>;

    async fn total_recharged(&self, brand_id: BrandId) -> Result<Cents, AdminServiceError>;
}

/// Repository for key/value system settings.
pub trait SystemConfigRepository: Send + Sync {
    async fn find(&self, key: &str) -> Result<Option<SystemConfig>, AdminServiceError>;
    async fn list(&self) -> Result<Vec<SystemConfig>, AdminServiceError>;
    async fn upsert(
        &self,
        key: &str,
        value: &str,
        remark: Option<&str>,
    ) -> Result<SystemConfig, AdminServiceError>;
    async fn delete(&self, key: &str) -> Result<bool, AdminServiceError>;
}

/// Short-lived storage for verification codes.
pub trait CaptchaCache: Send + Sync {
    async fn store(&self, key: &str, code: &str, ttl_secs: u64) -> Result<(), AdminServiceError>;

    /// Delete the code stored at `key` iff it equals `code`, in one atomic step.
    /// Returns `true` when it matched. A mismatch counts against the code, and
    /// the `max_attempts`-th mismatch deletes it.
    async fn consume(
        &self,
        key: &str,
        code: &str,
        max_attempts: u32,
    ) -> Result<bool, AdminServiceError>;

    async fn remove(&self, key: &str) -> Result<(), AdminServiceError>;
}

/// Out-of-band delivery of verification codes.
pub trait NotificationPort: Send + Sync {
    async fn send_code(
        &self,
        channel: Channel,
        scene: Scene,
        receiver: &str,
        code: &str,
        expire_at: DateTime<Utc>,
    ) -> Result<(), AdminServiceError>;
}
