pub mod access;
pub mod brand;
pub mod captcha;
pub mod password;
pub mod restaurant;
pub mod restaurant_user;
pub mod session;
pub mod stats;
pub mod sweep;
pub mod system_config;
pub mod wallet;
