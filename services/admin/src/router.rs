use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};

use banquet_core::health::healthz;
use banquet_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    brand::{create_brand, delete_brand, get_brand, get_brand_stats, list_brands, update_brand},
    captcha::{clean_captcha, reset_password, send_captcha, verify_captcha},
    config::{delete_config, get_config, list_configs, put_config},
    health::readyz,
    restaurant::{
        create_restaurant, delete_restaurant, get_restaurant, list_restaurants, update_restaurant,
    },
    session::{get_session, login, logout, refresh_session},
    user::{create_user, delete_user, get_user, list_users, update_user},
    wallet::{get_wallet, list_recharges, recharge},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Session
        .route("/auth/session", post(login))
        .route("/auth/session", get(get_session))
        .route("/auth/session", patch(refresh_session))
        .route("/auth/session", delete(logout))
        // Captcha
        .route("/auth/captcha", post(send_captcha))
        .route("/auth/captcha", delete(clean_captcha))
        .route("/auth/captcha/verify", post(verify_captcha))
        .route("/auth/password", patch(reset_password))
        // Brands
        .route("/brands", get(list_brands))
        .route("/brands", post(create_brand))
        .route("/brands/{id}", get(get_brand))
        .route("/brands/{id}", patch(update_brand))
        .route("/brands/{id}", delete(delete_brand))
        .route("/brands/{id}/stats", get(get_brand_stats))
        // Restaurants
        .route("/brands/{id}/restaurants", get(list_restaurants))
        .route("/restaurants", post(create_restaurant))
        .route("/restaurants/{id}", get(get_restaurant))
        .route("/restaurants/{id}", patch(update_restaurant))
        .route("/restaurants/{id}", delete(delete_restaurant))
        // Users
        .route("/brands/{id}/users", get(list_users))
        .route("/users", post(create_user))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}", patch(update_user))
        .route("/users/{id}", delete(delete_user))
        // Wallet
        .route("/brands/{id}/recharges", post(recharge))
        .route("/brands/{id}/recharges", get(list_recharges))
        .route("/brands/{id}/wallet", get(get_wallet))
        // System config
        .route("/configs", get(list_configs))
        .route("/configs/{key}", get(get_config))
        .route("/configs/{key}", put(put_config))
        .route("/configs/{key}", delete(delete_config))
        .layer(propagate_request_id_layer())
        .layer(trace_layer())
        .layer(request_id_layer())
        .with_state(state)
}
