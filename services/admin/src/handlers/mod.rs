pub mod brand;
pub mod captcha;
pub mod config;
pub mod health;
pub mod restaurant;
pub mod session;
pub mod user;
pub mod wallet;
