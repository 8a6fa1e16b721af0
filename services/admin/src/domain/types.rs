use chrono::{DateTime, Utc};
use serde::Serialize;

use banquet_domain::brand::LevelType;
use banquet_domain::captcha::{Channel, Scene};
use banquet_domain::id::{BrandId, RestaurantId, UserId};
use banquet_domain::money::{Cents, Points};

/// A franchise brand with its promotional tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
    pub logo: Option<String>,
    pub contact: Option<String>,
    pub phone: Option<String>,
    pub level_type: LevelType,
    /// End of the current tier. `None` means the tier never lapses.
    #[serde(serialize_with = "banquet_core::serde::to_datetime_opt")]
    pub expired_date: Option<DateTime<Utc>>,
    #[serde(serialize_with = "banquet_core::serde::to_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "banquet_core::serde::to_datetime")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBrand {
    pub name: String,
    pub logo: Option<String>,
    pub contact: Option<String>,
    pub phone: Option<String>,
    pub level_type: LevelType,
    pub expired_date: Option<DateTime<Utc>>,
}

/// Partial brand update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct BrandChanges {
    pub name: Option<String>,
    pub logo: Option<String>,
    pub contact: Option<String>,
    pub phone: Option<String>,
    pub level_type: Option<LevelType>,
    pub expired_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub brand_id: BrandId,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[serde(serialize_with = "banquet_core::serde::to_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "banquet_core::serde::to_datetime")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewRestaurant {
    pub brand_id: BrandId,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RestaurantChanges {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

/// A back-office login.
///
/// `brand_id == None` marks a platform operator, who may act on every brand.
/// Brand staff are confined to their own brand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantUser {
    pub id: UserId,
    pub brand_id: Option<BrandId>,
    pub restaurant_id: Option<RestaurantId>,
    pub account: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub phone: Option<String>,
    #[serde(serialize_with = "banquet_core::serde::to_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "banquet_core::serde::to_datetime")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewRestaurantUser {
    pub brand_id: Option<BrandId>,
    pub restaurant_id: Option<RestaurantId>,
    pub account: String,
    pub password_hash: String,
    pub name: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RestaurantUserChanges {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub restaurant_id: Option<RestaurantId>,
}

/// Stored value and loyalty balance of a brand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wallet {
    pub brand_id: BrandId,
    pub balance: Cents,
    pub points: Points,
    /// `None` until the first recharge creates the wallet row.
    #[serde(serialize_with = "banquet_core::serde::to_datetime_opt")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Wallet {
    /// Zero balance for a brand that has never been recharged.
    pub fn empty(brand_id: BrandId) -> Self {
        Self {
            brand_id,
            balance: Cents(0),
            points: Points(0),
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RechargeRecord {
    pub id: i64,
    pub brand_id: BrandId,
    pub amount: Cents,
    pub points: Points,
    pub operator_id: UserId,
    pub remark: Option<String>,
    #[serde(serialize_with = "banquet_core::serde::to_datetime")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewRecharge {
    pub brand_id: BrandId,
    pub amount: Cents,
    pub points: Points,
    pub operator_id: UserId,
    pub remark: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandStats {
    pub brand_id: BrandId,
    pub restaurants: u64,
    pub users: u64,
    pub balance: Cents,
    pub points: Points,
    pub total_recharged: Cents,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemConfig {
    pub key: String,
    pub value: String,
    pub remark: Option<String>,
    #[serde(serialize_with = "banquet_core::serde::to_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "banquet_core::serde::to_datetime")]
    pub updated_at: DateTime<Utc>,
}

/// Verification code time-to-live in seconds.
pub const CAPTCHA_TTL_SECS: i64 = 600;

/// Verification code length in digits.
pub const CAPTCHA_LEN: usize = 6;

/// Wrong guesses a stored code survives; the last one discards it.
pub const CAPTCHA_MAX_ATTEMPTS: u32 = 5;

/// Code issued while captcha test mode is on.
pub const TEST_MODE_CODE: &str = "000000";

/// Namespace a verification code lives in. The receiver completes the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptchaScope {
    pub app: String,
    pub scene: Scene,
    pub channel: Channel,
}

impl CaptchaScope {
    pub fn key(&self, receiver: &str) -> String {
        captcha_key(&self.app, self.scene, self.channel, receiver)
    }
}

pub fn captcha_key(app: &str, scene: Scene, channel: Channel, receiver: &str) -> String {
    format!("CAPTCHA:{app}:{scene}:{channel}:{receiver}")
}

/// What the caller learns about an issued code. The code itself is never returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptchaIssued {
    pub app: String,
    pub scene: Scene,
    pub channel: Channel,
    pub receiver: String,
    #[serde(serialize_with = "banquet_core::serde::to_datetime")]
    pub expire_at: DateTime<Utc>,
}
