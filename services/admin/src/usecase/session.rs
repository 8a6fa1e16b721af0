use banquet_session::{Session, SessionPatch, SessionStore};

use crate::domain::repository::{CaptchaCache, NotificationPort, RestaurantUserRepository};
use crate::error::AdminServiceError;
use crate::usecase::captcha::CaptchaIssuer;
use crate::usecase::password::{hash_password, verify_password};

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub account: String,
    pub password: String,
}

pub struct LoginUseCase<U, S>
where
    U: RestaurantUserRepository,
    S: SessionStore,
{
    pub users: U,
    pub sessions: S,
}

impl<U, S> LoginUseCase<U, S>
where
    U: RestaurantUserRepository,
    S: SessionStore,
{
    pub async fn execute(&self, input: LoginInput) -> Result<Session, AdminServiceError> {
        let user = self
            .users
            .find_by_account(input.account.trim())
            .await?
            .ok_or(AdminServiceError::InvalidCredential)?;

        if !verify_password(&input.password, &user.password_hash).await? {
            return Err(AdminServiceError::InvalidCredential);
        }

        let session = self
            .sessions
            .update(
                None,
                SessionPatch {
                    user_id: Some(user.id),
                    account: Some(user.account.clone()),
                    brand_id: user.brand_id,
                    restaurant_id: user.restaurant_id,
                    store: None,
                },
            )
            .await?;
        tracing::info!(user_id = %user.id, account = %user.account, "logged in");
        Ok(session)
    }
}

// ── Resolve ──────────────────────────────────────────────────────────────────

/// Look up a presented token. Missing and expired sessions are both
/// `InvalidSession`, and so is a session whose user has since been deleted;
/// that one is dropped from the store as well.
pub struct ResolveSessionUseCase<U, S>
where
    U: RestaurantUserRepository,
    S: SessionStore,
{
    pub users: U,
    pub sessions: S,
}

impl<U, S> ResolveSessionUseCase<U, S>
where
    U: RestaurantUserRepository,
    S: SessionStore,
{
    pub async fn execute(&self, token: &str) -> Result<Session, AdminServiceError> {
        let session = self
            .sessions
            .find(token)
            .await?
            .ok_or(AdminServiceError::InvalidSession)?;
        if !session.is_valid() {
            return Err(AdminServiceError::InvalidSession);
        }
        if self.users.find_by_id(session.user_id).await?.is_none() {
            self.sessions.remove(&session.id).await?;
            tracing::info!(user_id = %session.user_id, "dropped session of deleted user");
            return Err(AdminServiceError::InvalidSession);
        }
        Ok(session)
    }
}

// ── Refresh ──────────────────────────────────────────────────────────────────

pub struct RefreshSessionUseCase<U, S>
where
    U: RestaurantUserRepository,
    S: SessionStore,
{
    pub users: U,
    pub sessions: S,
}

impl<U, S> RefreshSessionUseCase<U, S>
where
    U: RestaurantUserRepository,
    S: SessionStore,
{
    /// Push `expire_at` out by one TTL. A session whose user has since been
    /// deleted is dropped instead.
    pub async fn execute(&self, session: &Session) -> Result<Session, AdminServiceError> {
        if self.users.find_by_id(session.user_id).await?.is_none() {
            self.sessions.remove(&session.id).await?;
            return Err(AdminServiceError::InvalidSession);
        }
        let refreshed = self
            .sessions
            .update(Some(&session.id), SessionPatch::default())
            .await?;
        Ok(refreshed)
    }
}

// ── Logout ───────────────────────────────────────────────────────────────────

pub struct LogoutUseCase<S: SessionStore> {
    pub sessions: S,
}

impl<S: SessionStore> LogoutUseCase<S> {
    /// Idempotent: an unknown token is not an error.
    pub async fn execute(&self, token: &str) -> Result<(), AdminServiceError> {
        if let Some(removed) = self.sessions.remove(token).await? {
            tracing::info!(
                user_id = %removed.user_id,
                account = %removed.account,
                "logged out"
            );
        }
        Ok(())
    }
}

// ── ResetPassword ────────────────────────────────────────────────────────────

pub struct ResetPasswordInput {
    pub account: String,
    pub code: String,
    pub new_password: String,
}

/// Reset a password with a code sent to the account's phone.
pub struct ResetPasswordUseCase<U, C, N>
where
    U: RestaurantUserRepository,
    C: CaptchaCache,
    N: NotificationPort,
{
    pub users: U,
    pub captcha: CaptchaIssuer<C, N>,
    pub bcrypt_cost: u32,
}

impl<U, C, N> ResetPasswordUseCase<U, C, N>
where
    U: RestaurantUserRepository,
    C: CaptchaCache,
    N: NotificationPort,
{
    pub async fn execute(&self, input: ResetPasswordInput) -> Result<(), AdminServiceError> {
        if input.new_password.is_empty() {
            return Err(AdminServiceError::MissingData);
        }
        // Unknown accounts look like a wrong code.
        let user = self
            .users
            .find_by_account(input.account.trim())
            .await?
            .ok_or(AdminServiceError::InvalidCaptcha)?;
        let phone = user.phone.as_deref().ok_or(AdminServiceError::MissingData)?;

        if !self.captcha.verify(phone, &input.code).await? {
            return Err(AdminServiceError::InvalidCaptcha);
        }

        let hash = hash_password(&input.new_password, self.bcrypt_cost).await?;
        if !self.users.set_password(user.id, &hash).await? {
            return Err(AdminServiceError::UserNotFound);
        }
        tracing::info!(user_id = %user.id, "password reset");
        Ok(())
    }
}
