use chrono::{Duration, Utc};
use rand::RngExt;

use crate::domain::repository::{CaptchaCache, NotificationPort};
use crate::domain::types::{
    CAPTCHA_LEN, CAPTCHA_MAX_ATTEMPTS, CAPTCHA_TTL_SECS, CaptchaIssued, CaptchaScope,
    TEST_MODE_CODE,
};
use crate::error::AdminServiceError;

/// Uniform over `000000`–`999999`.
fn generate_code() -> String {
    let mut rng = rand::rng();
    format!(
        "{:0width$}",
        rng.random_range(0..1_000_000u32),
        width = CAPTCHA_LEN
    )
}

fn is_well_formed(code: &str) -> bool {
    code.len() == CAPTCHA_LEN && code.bytes().all(|b| b.is_ascii_digit())
}

/// Issues, checks and discards verification codes for one scope.
pub struct CaptchaIssuer<C, N>
where
    C: CaptchaCache,
    N: NotificationPort,
{
    pub cache: C,
    pub notifier: N,
    pub scope: CaptchaScope,
    /// Issue [`TEST_MODE_CODE`] and skip delivery.
    pub test_mode: bool,
}

impl<C, N> CaptchaIssuer<C, N>
where
    C: CaptchaCache,
    N: NotificationPort,
{
    /// Store a fresh code for `receiver`, replacing any earlier one, and deliver it.
    pub async fn send(&self, receiver: &str) -> Result<CaptchaIssued, AdminServiceError> {
        let receiver = receiver.trim();
        if receiver.is_empty() {
            return Err(AdminServiceError::MissingData);
        }

        let code = if self.test_mode {
            TEST_MODE_CODE.to_owned()
        } else {
            generate_code()
        };
        let expire_at = Utc::now() + Duration::seconds(CAPTCHA_TTL_SECS);
        let key = self.scope.key(receiver);
        self.cache
            .store(&key, &code, CAPTCHA_TTL_SECS as u64)
            .await?;

        if !self.test_mode {
            let delivered = self
                .notifier
                .send_code(
                    self.scope.channel,
                    self.scope.scene,
                    receiver,
                    &code,
                    expire_at,
                )
                .await;
            if let Err(e) = delivered {
                // The receiver never saw this code.
                self.cache.remove(&key).await?;
                return Err(e);
            }
        }

        tracing::info!(
            app = %self.scope.app,
            scene = %self.scope.scene,
            channel = %self.scope.channel,
            receiver,
            "captcha issued"
        );
        Ok(CaptchaIssued {
            app: self.scope.app.clone(),
            scene: self.scope.scene,
            channel: self.scope.channel,
            receiver: receiver.to_owned(),
            expire_at,
        })
    }

    /// `true` iff `code` is the stored one. A match consumes the code; a
    /// mismatch leaves it in place until [`CAPTCHA_MAX_ATTEMPTS`] wrong
    /// guesses have been made against it.
    pub async fn verify(&self, receiver: &str, code: &str) -> Result<bool, AdminServiceError> {
        let code = code.trim();
        if !is_well_formed(code) {
            return Ok(false);
        }
        let receiver = receiver.trim();
        let matched = self
            .cache
            .consume(&self.scope.key(receiver), code, CAPTCHA_MAX_ATTEMPTS)
            .await?;
        if !matched {
            tracing::warn!(
                app = %self.scope.app,
                scene = %self.scope.scene,
                receiver,
                "captcha mismatch"
            );
        }
        Ok(matched)
    }

    pub async fn clean(&self, receiver: &str) -> Result<(), AdminServiceError> {
        self.cache.remove(&self.scope.key(receiver.trim())).await
    }
}
