use anyhow::Context as _;
use chrono::{DateTime, Utc};
use serde::Serialize;

use banquet_domain::captcha::{Channel, Scene};

use crate::domain::repository::NotificationPort;
use crate::error::AdminServiceError;

#[derive(Serialize)]
struct SmsRequest<'a> {
    phone: &'a str,
    template: &'a str,
    params: SmsParams<'a>,
}

#[derive(Serialize)]
struct SmsParams<'a> {
    code: &'a str,
    /// Minutes until the code lapses, for the message body.
    minutes: i64,
}

/// HTTP SMS gateway client. Without a configured URL, and for every
/// non-SMS channel, delivery is only logged.
#[derive(Clone)]
pub struct SmsGateway {
    pub client: reqwest::Client,
    pub url: Option<String>,
    pub token: Option<String>,
}

impl NotificationPort for SmsGateway {
    async fn send_code(
        &self,
        channel: Channel,
        scene: Scene,
        receiver: &str,
        code: &str,
        expire_at: DateTime<Utc>,
    ) -> Result<(), AdminServiceError> {
        let url = match (channel, self.url.as_deref()) {
            (Channel::Sms, Some(url)) => url,
            _ => {
                tracing::info!(%channel, %scene, receiver, "no delivery adapter, code logged only");
                tracing::debug!(%channel, %scene, receiver, code, "verification code");
                return Ok(());
            }
        };

        let body = SmsRequest {
            phone: receiver,
            template: scene.as_str(),
            params: SmsParams {
                code,
                minutes: (expire_at - Utc::now()).num_minutes().max(1),
            },
        };
        let mut request = self.client.post(url).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
            .send()
            .await
            .context("send sms")?
            .error_for_status()
            .context("sms gateway rejected request")?;

        tracing::info!(%scene, receiver, "verification code sent");
        Ok(())
    }
}
