use banquet_session::Session;

use crate::domain::repository::SystemConfigRepository;
use crate::domain::types::SystemConfig;
use crate::error::AdminServiceError;
use crate::usecase::access::ensure_platform;

// ── GetConfig ────────────────────────────────────────────────────────────────

pub struct GetConfigUseCase<C: SystemConfigRepository> {
    pub configs: C,
}

impl<C: SystemConfigRepository> GetConfigUseCase<C> {
    pub async fn execute(&self, key: &str) -> Result<SystemConfig, AdminServiceError> {
        self.configs
            .find(key)
            .await?
            .ok_or(AdminServiceError::ConfigNotFound)
    }
}

// ── ListConfigs ──────────────────────────────────────────────────────────────

pub struct ListConfigsUseCase<C: SystemConfigRepository> {
    pub configs: C,
}

impl<C: SystemConfigRepository> ListConfigsUseCase<C> {
    pub async fn execute(&self) -> Result<Vec<SystemConfig>, AdminServiceError> {
        self.configs.list().await
    }
}

// ── PutConfig ────────────────────────────────────────────────────────────────

pub struct PutConfigInput {
    pub key: String,
    pub value: String,
    pub remark: Option<String>,
}

pub struct PutConfigUseCase<C: SystemConfigRepository> {
    pub configs: C,
}

impl<C: SystemConfigRepository> PutConfigUseCase<C> {
    /// Create or overwrite the live row for `key`.
    pub async fn execute(
        &self,
        actor: &Session,
        input: PutConfigInput,
    ) -> Result<SystemConfig, AdminServiceError> {
        ensure_platform(actor)?;
        let key = input.key.trim();
        if key.is_empty() {
            return Err(AdminServiceError::MissingData);
        }
        let config = self
            .configs
            .upsert(key, &input.value, input.remark.as_deref())
            .await?;
        tracing::info!(key, operator = %actor.user_id, "system config written");
        Ok(config)
    }
}

// ── DeleteConfig ─────────────────────────────────────────────────────────────

pub struct DeleteConfigUseCase<C: SystemConfigRepository> {
    pub configs: C,
}

impl<C: SystemConfigRepository> DeleteConfigUseCase<C> {
    pub async fn execute(&self, actor: &Session, key: &str) -> Result<(), AdminServiceError> {
        ensure_platform(actor)?;
        if !self.configs.delete(key).await? {
            return Err(AdminServiceError::ConfigNotFound);
        }
        Ok(())
    }
}
