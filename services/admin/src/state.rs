use std::sync::Arc;

use deadpool_redis::Pool as RedisPool;
use sea_orm::DatabaseConnection;

use banquet_domain::captcha::{Channel, Scene};
use banquet_session::RedisSessionStore;

use crate::config::AdminConfig;
use crate::domain::types::CaptchaScope;
use crate::infra::cache::RedisCaptchaCache;
use crate::infra::db::{
    DbBrandRepository, DbRestaurantRepository, DbRestaurantUserRepository,
    DbSystemConfigRepository, DbWalletRepository,
};
use crate::infra::sms::SmsGateway;
use crate::usecase::captcha::CaptchaIssuer;

/// Shared application state passed to every handler via axum `State`.
///
/// Every client is built once in `main`; repositories are cheap handles over them.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub redis: RedisPool,
    pub http: reqwest::Client,
    pub config: Arc<AdminConfig>,
}

impl AppState {
    pub fn brand_repo(&self) -> DbBrandRepository {
        DbBrandRepository {
            db: self.db.clone(),
        }
    }

    pub fn restaurant_repo(&self) -> DbRestaurantRepository {
        DbRestaurantRepository {
            db: self.db.clone(),
        }
    }

    pub fn user_repo(&self) -> DbRestaurantUserRepository {
        DbRestaurantUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn wallet_repo(&self) -> DbWalletRepository {
        DbWalletRepository {
            db: self.db.clone(),
        }
    }

    pub fn config_repo(&self) -> DbSystemConfigRepository {
        DbSystemConfigRepository {
            db: self.db.clone(),
        }
    }

    pub fn session_store(&self) -> RedisSessionStore {
        RedisSessionStore::new(
            self.redis.clone(),
            self.config.app_name.clone(),
            chrono::Duration::seconds(self.config.session_ttl_secs),
        )
    }

    pub fn captcha_issuer(
        &self,
        scene: Scene,
        channel: Channel,
    ) -> CaptchaIssuer<RedisCaptchaCache, SmsGateway> {
        CaptchaIssuer {
            cache: RedisCaptchaCache {
                pool: self.redis.clone(),
            },
            notifier: SmsGateway {
                client: self.http.clone(),
                url: self.config.sms_gateway_url.clone(),
                token: self.config.sms_gateway_token.clone(),
            },
            scope: CaptchaScope {
                app: self.config.app_name.clone(),
                scene,
                channel,
            },
            test_mode: self.config.captcha_test_mode,
        }
    }
}
