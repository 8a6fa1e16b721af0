
mod brand_test;
mod captcha_test;
mod restaurant_test;
mod restaurant_user_test;
mod sweep_test;
mod wallet_test;
