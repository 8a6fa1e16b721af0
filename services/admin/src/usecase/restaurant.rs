use banquet_domain::id::{BrandId, RestaurantId};
use banquet_domain::pagination::{Page, PageRequest};
use banquet_session::Session;

use crate::domain::repository::{BrandRepository, RestaurantRepository};
use crate::domain::types::{NewRestaurant, Restaurant, RestaurantChanges};
use crate::error::AdminServiceError;
use crate::usecase::access::ensure_brand_access;

// ── CreateRestaurant ─────────────────────────────────────────────────────────

pub struct CreateRestaurantInput {
    pub brand_id: BrandId,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
}

pub struct CreateRestaurantUseCase<B, R>
where
    B: BrandRepository,
    R: RestaurantRepository,
{
    pub brands: B,
    pub restaurants: R,
}

impl<B, R> CreateRestaurantUseCase<B, R>
where
    B: BrandRepository,
    R: RestaurantRepository,
{
    pub async fn execute(
        &self,
        actor: &Session,
        input: CreateRestaurantInput,
    ) -> Result<Restaurant, AdminServiceError> {
        ensure_brand_access(actor, input.brand_id)?;
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AdminServiceError::MissingData);
        }
        if self.brands.find_by_id(input.brand_id).await?.is_none() {
            return Err(AdminServiceError::BrandNotFound);
        }
        if self
            .restaurants
            .find_by_name(input.brand_id, name)
            .await?
            .is_some()
        {
            return Err(AdminServiceError::RestaurantAlreadyExists);
        }
        self.restaurants
            .create(&NewRestaurant {
                brand_id: input.brand_id,
                name: name.to_owned(),
                address: input.address,
                phone: input.phone,
            })
            .await
    }
}

// ── GetRestaurant ────────────────────────────────────────────────────────────

pub struct GetRestaurantUseCase<R: RestaurantRepository> {
    pub restaurants: R,
}

impl<R: RestaurantRepository> GetRestaurantUseCase<R> {
    pub async fn execute(
        &self,
        actor: &Session,
        id: RestaurantId,
    ) -> Result<Restaurant, AdminServiceError> {
        let restaurant = self
            .restaurants
            .find_by_id(id)
            .await?
            .ok_or(AdminServiceError::RestaurantNotFound)?;
        ensure_brand_access(actor, restaurant.brand_id)?;
        Ok(restaurant)
    }
}

// ── ListRestaurants ──────────────────────────────────────────────────────────

pub struct ListRestaurantsUseCase<B, R>
where
    B: BrandRepository,
    R: RestaurantRepository,
{
    pub brands: B,
    pub restaurants: R,
}

impl<B, R> ListRestaurantsUseCase<B, R>
where
    B: BrandRepository,
    R: RestaurantRepository,
{
    pub async fn execute(
        &self,
        actor: &Session,
        brand_id: BrandId,
        page: PageRequest,
    ) -> Result<Page<Restaurant>, AdminServiceError> {
        ensure_brand_access(actor, brand_id)?;
        if self.brands.find_by_id(brand_id).await?.is_none() {
            return Err(AdminServiceError::BrandNotFound);
        }
        let (items, total) = self
            .restaurants
            .list_by_brand(brand_id, page.clamped())
            .await?;
        Ok(Page::new(items, total, page))
    }
}

// ── UpdateRestaurant ─────────────────────────────────────────────────────────

pub struct UpdateRestaurantUseCase<R: RestaurantRepository> {
    pub restaurants: R,
}

impl<R: RestaurantRepository> UpdateRestaurantUseCase<R> {
    pub async fn execute(
        &self,
        actor: &Session,
        id: RestaurantId,
        mut changes: RestaurantChanges,
    ) -> Result<Restaurant, AdminServiceError> {
        let current = self
            .restaurants
            .find_by_id(id)
            .await?
            .ok_or(AdminServiceError::RestaurantNotFound)?;
        ensure_brand_access(actor, current.brand_id)?;

        if let Some(name) = changes.name.take() {
            let name = name.trim().to_owned();
            if name.is_empty() {
                return Err(AdminServiceError::MissingData);
            }
            if let Some(other) = self.restaurants.find_by_name(current.brand_id, &name).await? {
                if other.id != id {
                    return Err(AdminServiceError::RestaurantAlreadyExists);
                }
            }
            changes.name = Some(name);
        }
        self.restaurants
            .update(id, &changes)
            .await?
            .ok_or(AdminServiceError::RestaurantNotFound)
    }
}

// ── DeleteRestaurant ─────────────────────────────────────────────────────────

pub struct DeleteRestaurantUseCase<R: RestaurantRepository> {
    pub restaurants: R,
}

impl<R: RestaurantRepository> DeleteRestaurantUseCase<R> {
    pub async fn execute(&self, actor: &Session, id: RestaurantId) -> Result<(), AdminServiceError> {
        let current = self
            .restaurants
            .find_by_id(id)
            .await?
            .ok_or(AdminServiceError::RestaurantNotFound)?;
        ensure_brand_access(actor, current.brand_id)?;
        if !self.restaurants.delete(id).await? {
            return Err(AdminServiceError::RestaurantNotFound);
        }
        Ok(())
    }
}
