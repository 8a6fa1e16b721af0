use serde::Deserialize;

use banquet_core::config::Config;

/// Admin service configuration, loaded from upper-cased environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// Redis connection URL. Env var: `REDIS_URL`.
    pub redis_url: String,
    /// Namespace for session and captcha keys (default "admin").
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// TCP port to listen on (default 3120). Env var: `ADMIN_PORT`.
    #[serde(default = "default_admin_port")]
    pub admin_port: u16,
    /// Session lifetime in seconds, renewed on every refresh (default one day).
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: i64,
    /// Issue `000000` and skip delivery. Never enable in production.
    #[serde(default)]
    pub captcha_test_mode: bool,
    /// SMS gateway endpoint. Codes are only logged when unset.
    #[serde(default)]
    pub sms_gateway_url: Option<String>,
    /// Bearer token for the SMS gateway.
    #[serde(default)]
    pub sms_gateway_token: Option<String>,
    /// Loyalty points credited per yuan recharged (default 1).
    #[serde(default = "default_points_per_yuan")]
    pub points_per_yuan: u32,
    /// Period of the tier-expiry sweep in seconds (default one day).
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
    /// bcrypt work factor for new password hashes.
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
    /// Platform operator account created at startup if absent.
    #[serde(default)]
    pub bootstrap_account: Option<String>,
    #[serde(default)]
    pub bootstrap_password: Option<String>,
}

/// Work factors bcrypt accepts.
const BCRYPT_COSTS: std::ops::RangeInclusive<u32> = 4..=31;

impl Config for AdminConfig {}

impl AdminConfig {
    /// Reject values that parse but would break the service at runtime.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.session_ttl_secs > 0,
            "SESSION_TTL_SECS must be positive, got {}",
            self.session_ttl_secs
        );
        anyhow::ensure!(
            self.sweep_interval_secs > 0,
            "SWEEP_INTERVAL_SECS must be positive"
        );
        anyhow::ensure!(
            BCRYPT_COSTS.contains(&self.bcrypt_cost),
            "BCRYPT_COST must be within 4..=31, got {}",
            self.bcrypt_cost
        );
        Ok(())
    }
}

fn default_app_name() -> String {
    "admin".to_owned()
}

fn default_admin_port() -> u16 {
    3120
}

fn default_session_ttl_secs() -> i64 {
    86_400
}

fn default_points_per_yuan() -> u32 {
    1
}

fn default_sweep_interval_secs() -> u64 {
    86_400
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}
