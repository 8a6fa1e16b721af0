use std::collections::HashMap;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use banquet_core::serde::{format_datetime, parse_datetime};
use banquet_domain::id::{BrandId, RestaurantId, UserId};

use crate::error::SessionError;

const F_ID: &str = "id";
const F_USER_ID: &str = "userId";
const F_ACCOUNT: &str = "account";
const F_BRAND_ID: &str = "brandId";
const F_RESTAURANT_ID: &str = "restaurantId";
const F_CREATE_AT: &str = "createAt";
const F_UPDATE_AT: &str = "updateAt";
const F_EXPIRE_AT: &str = "expireAt";
const F_STORE: &str = "store";

/// An authenticated back-office session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Opaque token handed to the client.
    pub id: String,
    pub user_id: UserId,
    pub account: String,
    pub brand_id: Option<BrandId>,
    pub restaurant_id: Option<RestaurantId>,
    pub create_at: DateTime<Utc>,
    pub update_at: DateTime<Utc>,
    pub expire_at: DateTime<Utc>,
    /// Free-form per-session bag, JSON-encoded in storage.
    pub store: Map<String, Value>,
}

/// Fields to write on `update`. `None` keeps whatever the stored session has.
#[derive(Debug, Clone, Default)]
pub struct SessionPatch {
    pub user_id: Option<UserId>,
    pub account: Option<String>,
    pub brand_id: Option<BrandId>,
    pub restaurant_id: Option<RestaurantId>,
    pub store: Option<Map<String, Value>>,
}

/// Generate a fresh opaque session id.
pub fn new_session_id() -> String {
    Uuid::new_v4().simple().to_string()
}

impl Session {
    /// Merge `patch` over `existing` and stamp the timestamps.
    ///
    /// `create_at` is kept from `existing`; `update_at` becomes `now` and
    /// `expire_at` becomes `now + ttl`. Times are truncated to whole seconds
    /// because that is all the storage format keeps.
    pub fn apply(
        existing: Option<Session>,
        id: String,
        patch: SessionPatch,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Session, SessionError> {
        let now = now.trunc_subsecs(0);
        let expire_at = now + ttl;
        match existing {
            Some(mut session) => {
                if let Some(user_id) = patch.user_id {
                    session.user_id = user_id;
                }
                if let Some(account) = patch.account {
                    session.account = account;
                }
                if patch.brand_id.is_some() {
                    session.brand_id = patch.brand_id;
                }
                if patch.restaurant_id.is_some() {
                    session.restaurant_id = patch.restaurant_id;
                }
                if let Some(store) = patch.store {
                    session.store = store;
                }
                session.id = id;
                session.update_at = now;
                session.expire_at = expire_at;
                Ok(session)
            }
            None => Ok(Session {
                id,
                user_id: patch.user_id.ok_or(SessionError::MissingField(F_USER_ID))?,
                account: patch.account.unwrap_or_default(),
                brand_id: patch.brand_id,
                restaurant_id: patch.restaurant_id,
                create_at: now,
                update_at: now,
                expire_at,
                store: patch.store.unwrap_or_default(),
            }),
        }
    }

    /// `true` while `expire_at` is strictly in the future.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expire_at > now
    }

    /// Encode as Redis hash fields. Absent optional ids are written as empty strings.
    pub fn to_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            (F_ID, self.id.clone()),
            (F_USER_ID, self.user_id.to_string()),
            (F_ACCOUNT, self.account.clone()),
            (
                F_BRAND_ID,
                self.brand_id.map(|id| id.to_string()).unwrap_or_default(),
            ),
            (
                F_RESTAURANT_ID,
                self.restaurant_id
                    .map(|id| id.to_string())
                    .unwrap_or_default(),
            ),
            (F_CREATE_AT, format_datetime(&self.create_at)),
            (F_UPDATE_AT, format_datetime(&self.update_at)),
            (F_EXPIRE_AT, format_datetime(&self.expire_at)),
            (F_STORE, Value::Object(self.store.clone()).to_string()),
        ]
    }

    /// Decode from a Redis hash. An empty hash means the key does not exist.
    pub fn from_fields(mut fields: HashMap<String, String>) -> Result<Option<Session>, SessionError> {
        if fields.is_empty() {
            return Ok(None);
        }
        let mut take = |field: &'static str| fields.remove(field).unwrap_or_default();

        let id = take(F_ID);
        let user_id = parse_id(F_USER_ID, &take(F_USER_ID))?.ok_or(SessionError::Corrupt {
            field: F_USER_ID,
            reason: "missing".to_owned(),
        })?;
        let account = take(F_ACCOUNT);
        let brand_id = parse_id(F_BRAND_ID, &take(F_BRAND_ID))?;
        let restaurant_id = parse_id(F_RESTAURANT_ID, &take(F_RESTAURANT_ID))?;
        let create_at = parse_time(F_CREATE_AT, &take(F_CREATE_AT))?;
        let update_at = parse_time(F_UPDATE_AT, &take(F_UPDATE_AT))?;
        let expire_at = parse_time(F_EXPIRE_AT, &take(F_EXPIRE_AT))?;
        let store = parse_store(&take(F_STORE))?;

        Ok(Some(Session {
            id,
            user_id,
            account,
            brand_id,
            restaurant_id,
            create_at,
            update_at,
            expire_at,
            store,
        }))
    }
}

fn parse_id<T>(field: &'static str, raw: &str) -> Result<Option<T>, SessionError>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|e: std::num::ParseIntError| SessionError::Corrupt {
            field,
            reason: e.to_string(),
        })
}

fn parse_time(field: &'static str, raw: &str) -> Result<DateTime<Utc>, SessionError> {
    parse_datetime(raw).map_err(|e| SessionError::Corrupt {
        field,
        reason: e.to_string(),
    })
}

fn parse_store(raw: &str) -> Result<Map<String, Value>, SessionError> {
    if raw.is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(SessionError::Corrupt {
            field: F_STORE,
            reason: format!("expected object, got {other}"),
        }),
        Err(e) => Err(SessionError::Corrupt {
            field: F_STORE,
            reason: e.to_string(),
        }),
    }
}
