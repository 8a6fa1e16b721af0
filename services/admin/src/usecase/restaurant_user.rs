use banquet_domain::id::{BrandId, RestaurantId, UserId};
use banquet_domain::pagination::{Page, PageRequest};
use banquet_session::Session;

use crate::domain::repository::{BrandRepository, RestaurantRepository, RestaurantUserRepository};
use crate::domain::types::{NewRestaurantUser, RestaurantUser, RestaurantUserChanges};
use crate::error::AdminServiceError;
use crate::usecase::access::{ensure_brand_access, ensure_owner_access};
use crate::usecase::password::hash_password;

/// The restaurant must be live and belong to `brand_id`.
async fn ensure_restaurant_in_brand<R: RestaurantRepository>(
    restaurants: &R,
    brand_id: Option<BrandId>,
    restaurant_id: RestaurantId,
) -> Result<(), AdminServiceError> {
    let Some(brand_id) = brand_id else {
        return Err(AdminServiceError::MissingData);
    };
    match restaurants.find_by_id(restaurant_id).await? {
        Some(r) if r.brand_id == brand_id => Ok(()),
        _ => Err(AdminServiceError::RestaurantNotFound),
    }
}

// ── CreateRestaurantUser ─────────────────────────────────────────────────────

pub struct CreateRestaurantUserInput {
    /// `None` creates a platform operator.
    pub brand_id: Option<BrandId>,
    pub restaurant_id: Option<RestaurantId>,
    pub account: String,
    pub password: String,
    pub name: String,
    pub phone: Option<String>,
}

pub struct CreateRestaurantUserUseCase<B, R, U>
where
    B: BrandRepository,
    R: RestaurantRepository,
    U: RestaurantUserRepository,
{
    pub brands: B,
    pub restaurants: R,
    pub users: U,
    pub bcrypt_cost: u32,
}

impl<B, R, U> CreateRestaurantUserUseCase<B, R, U>
where
    B: BrandRepository,
    R: RestaurantRepository,
    U: RestaurantUserRepository,
{
    pub async fn execute(
        &self,
        actor: &Session,
        input: CreateRestaurantUserInput,
    ) -> Result<RestaurantUser, AdminServiceError> {
        ensure_owner_access(actor, input.brand_id)?;

        let account = input.account.trim();
        let name = input.name.trim();
        if account.is_empty() || name.is_empty() || input.password.is_empty() {
            return Err(AdminServiceError::MissingData);
        }
        if let Some(brand_id) = input.brand_id {
            if self.brands.find_by_id(brand_id).await?.is_none() {
                return Err(AdminServiceError::BrandNotFound);
            }
        }
        if let Some(restaurant_id) = input.restaurant_id {
            ensure_restaurant_in_brand(&self.restaurants, input.brand_id, restaurant_id).await?;
        }
        if self.users.find_by_account(account).await?.is_some() {
            return Err(AdminServiceError::AccountAlreadyExists);
        }

        let password_hash = hash_password(&input.password, self.bcrypt_cost).await?;
        let user = self
            .users
            .create(&NewRestaurantUser {
                brand_id: input.brand_id,
                restaurant_id: input.restaurant_id,
                account: account.to_owned(),
                password_hash,
                name: name.to_owned(),
                phone: input.phone,
            })
            .await?;
        tracing::info!(user_id = %user.id, operator = %actor.user_id, "user created");
        Ok(user)
    }
}

// ── GetRestaurantUser ────────────────────────────────────────────────────────

pub struct GetRestaurantUserUseCase<U: RestaurantUserRepository> {
    pub users: U,
}

impl<U: RestaurantUserRepository> GetRestaurantUserUseCase<U> {
    pub async fn execute(
        &self,
        actor: &Session,
        id: UserId,
    ) -> Result<RestaurantUser, AdminServiceError> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(AdminServiceError::UserNotFound)?;
        ensure_owner_access(actor, user.brand_id)?;
        Ok(user)
    }
}

// ── ListRestaurantUsers ──────────────────────────────────────────────────────

pub struct ListRestaurantUsersUseCase<B, U>
where
    B: BrandRepository,
    U: RestaurantUserRepository,
{
    pub brands: B,
    pub users: U,
}

impl<B, U> ListRestaurantUsersUseCase<B, U>
where
    B: BrandRepository,
    U: RestaurantUserRepository,
{
    pub async fn execute(
        &self,
        actor: &Session,
        brand_id: BrandId,
        page: PageRequest,
    ) -> Result<Page<RestaurantUser>, AdminServiceError> {
        ensure_brand_access(actor, brand_id)?;
        if self.brands.find_by_id(brand_id).await?.is_none() {
            return Err(AdminServiceError::BrandNotFound);
        }
        let (items, total) = self.users.list_by_brand(brand_id, page.clamped()).await?;
        Ok(Page::new(items, total, page))
    }
}

// ── UpdateRestaurantUser ─────────────────────────────────────────────────────

pub struct UpdateRestaurantUserInput {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub restaurant_id: Option<RestaurantId>,
    /// Set a new password without the old one.
    pub password: Option<String>,
}

pub struct UpdateRestaurantUserUseCase<R, U>
where
    R: RestaurantRepository,
    U: RestaurantUserRepository,
{
    pub restaurants: R,
    pub users: U,
    pub bcrypt_cost: u32,
}

impl<R, U> UpdateRestaurantUserUseCase<R, U>
where
    R: RestaurantRepository,
    U: RestaurantUserRepository,
{
    pub async fn execute(
        &self,
        actor: &Session,
        id: UserId,
        input: UpdateRestaurantUserInput,
    ) -> Result<RestaurantUser, AdminServiceError> {
        if input.name.is_none()
            && input.phone.is_none()
            && input.restaurant_id.is_none()
            && input.password.is_none()
        {
            return Err(AdminServiceError::MissingData);
        }
        let current = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(AdminServiceError::UserNotFound)?;
        ensure_owner_access(actor, current.brand_id)?;

        let name = match input.name {
            Some(name) if name.trim().is_empty() => return Err(AdminServiceError::MissingData),
            other => other.map(|n| n.trim().to_owned()),
        };
        if let Some(restaurant_id) = input.restaurant_id {
            ensure_restaurant_in_brand(&self.restaurants, current.brand_id, restaurant_id)
                .await?;
        }
        let password_hash = match input.password {
            Some(p) if p.is_empty() => return Err(AdminServiceError::MissingData),
            Some(p) => Some(hash_password(&p, self.bcrypt_cost).await?),
            None => None,
        };

        let mut user = self
            .users
            .update(
                id,
                &RestaurantUserChanges {
                    name,
                    phone: input.phone,
                    restaurant_id: input.restaurant_id,
                },
            )
            .await?
            .ok_or(AdminServiceError::UserNotFound)?;

        if let Some(hash) = password_hash {
            if !self.users.set_password(id, &hash).await? {
                return Err(AdminServiceError::UserNotFound);
            }
            user.password_hash = hash;
            tracing::info!(user_id = %id, operator = %actor.user_id, "password set by operator");
        }
        Ok(user)
    }
}

// ── DeleteRestaurantUser ─────────────────────────────────────────────────────

pub struct DeleteRestaurantUserUseCase<U: RestaurantUserRepository> {
    pub users: U,
}

impl<U: RestaurantUserRepository> DeleteRestaurantUserUseCase<U> {
    pub async fn execute(&self, actor: &Session, id: UserId) -> Result<(), AdminServiceError> {
        if actor.user_id == id {
            return Err(AdminServiceError::Forbidden);
        }
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(AdminServiceError::UserNotFound)?;
        ensure_owner_access(actor, user.brand_id)?;
        if !self.users.delete(id).await? {
            return Err(AdminServiceError::UserNotFound);
        }
        tracing::info!(user_id = %id, operator = %actor.user_id, "user deleted");
        Ok(())
    }
}

// ── BootstrapOperator ────────────────────────────────────────────────────────

/// Make sure a platform operator exists so a fresh install can log in.
pub struct BootstrapOperatorUseCase<U: RestaurantUserRepository> {
    pub users: U,
    pub bcrypt_cost: u32,
}

impl<U: RestaurantUserRepository> BootstrapOperatorUseCase<U> {
    /// Returns `true` if the account was created, `false` if it already existed.
    pub async fn execute(&self, account: &str, password: &str) -> Result<bool, AdminServiceError> {
        let account = account.trim();
        if account.is_empty() || password.is_empty() {
            return Err(AdminServiceError::MissingData);
        }
        if self.users.find_by_account(account).await?.is_some() {
            return Ok(false);
        }
        let password_hash = hash_password(password, self.bcrypt_cost).await?;
        self.users
            .create(&NewRestaurantUser {
                brand_id: None,
                restaurant_id: None,
                account: account.to_owned(),
                password_hash,
                name: account.to_owned(),
                phone: None,
            })
            .await?;
        Ok(true)
    }
}
