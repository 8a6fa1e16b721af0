use chrono::{DateTime, Utc};

use banquet_domain::brand::LevelType;
use banquet_domain::id::BrandId;
use banquet_domain::pagination::{Page, PageRequest};
use banquet_session::Session;

use crate::domain::repository::BrandRepository;
use crate::domain::types::{Brand, BrandChanges, NewBrand};
use crate::error::AdminServiceError;
use crate::usecase::access::{ensure_brand_access, ensure_platform, is_platform};

fn required(value: &str) -> Result<String, AdminServiceError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AdminServiceError::MissingData);
    }
    Ok(value.to_owned())
}

// ── CreateBrand ──────────────────────────────────────────────────────────────

pub struct CreateBrandInput {
    pub name: String,
    pub logo: Option<String>,
    pub contact: Option<String>,
    pub phone: Option<String>,
    /// Defaults to `Trial`.
    pub level_type: Option<LevelType>,
    pub expired_date: Option<DateTime<Utc>>,
}

pub struct CreateBrandUseCase<B: BrandRepository> {
    pub brands: B,
}

impl<B: BrandRepository> CreateBrandUseCase<B> {
    pub async fn execute(
        &self,
        actor: &Session,
        input: CreateBrandInput,
    ) -> Result<Brand, AdminServiceError> {
        ensure_platform(actor)?;
        let name = required(&input.name)?;
        if self.brands.find_by_name(&name).await?.is_some() {
            return Err(AdminServiceError::BrandAlreadyExists);
        }
        let brand = self
            .brands
            .create(&NewBrand {
                name,
                logo: input.logo,
                contact: input.contact,
                phone: input.phone,
                level_type: input.level_type.unwrap_or(LevelType::Trial),
                expired_date: input.expired_date,
            })
            .await?;
        tracing::info!(brand_id = %brand.id, operator = %actor.user_id, "brand created");
        Ok(brand)
    }
}

// ── GetBrand ─────────────────────────────────────────────────────────────────

pub struct GetBrandUseCase<B: BrandRepository> {
    pub brands: B,
}

impl<B: BrandRepository> GetBrandUseCase<B> {
    pub async fn execute(&self, actor: &Session, id: BrandId) -> Result<Brand, AdminServiceError> {
        ensure_brand_access(actor, id)?;
        self.brands
            .find_by_id(id)
            .await?
            .ok_or(AdminServiceError::BrandNotFound)
    }
}

// ── ListBrands ───────────────────────────────────────────────────────────────

pub struct ListBrandsUseCase<B: BrandRepository> {
    pub brands: B,
}

impl<B: BrandRepository> ListBrandsUseCase<B> {
    pub async fn execute(
        &self,
        actor: &Session,
        page: PageRequest,
    ) -> Result<Page<Brand>, AdminServiceError> {
        ensure_platform(actor)?;
        let (items, total) = self.brands.list(page.clamped()).await?;
        Ok(Page::new(items, total, page))
    }
}

// ── UpdateBrand ──────────────────────────────────────────────────────────────

pub struct UpdateBrandUseCase<B: BrandRepository> {
    pub brands: B,
}

impl<B: BrandRepository> UpdateBrandUseCase<B> {
    /// Brand staff may edit their profile; the tier and its expiry are the
    /// platform's to set.
    pub async fn execute(
        &self,
        actor: &Session,
        id: BrandId,
        mut changes: BrandChanges,
    ) -> Result<Brand, AdminServiceError> {
        ensure_brand_access(actor, id)?;
        if !is_platform(actor) && (changes.level_type.is_some() || changes.expired_date.is_some())
        {
            return Err(AdminServiceError::Forbidden);
        }
        if let Some(name) = changes.name.take() {
            let name = required(&name)?;
            if let Some(other) = self.brands.find_by_name(&name).await? {
                if other.id != id {
                    return Err(AdminServiceError::BrandAlreadyExists);
                }
            }
            changes.name = Some(name);
        }
        self.brands
            .update(id, &changes)
            .await?
            .ok_or(AdminServiceError::BrandNotFound)
    }
}

// ── DeleteBrand ──────────────────────────────────────────────────────────────

pub struct DeleteBrandUseCase<B: BrandRepository> {
    pub brands: B,
}

impl<B: BrandRepository> DeleteBrandUseCase<B> {
    /// Soft-deletes the brand together with its restaurants.
    pub async fn execute(&self, actor: &Session, id: BrandId) -> Result<(), AdminServiceError> {
        ensure_platform(actor)?;
        if !self.brands.delete(id).await? {
            return Err(AdminServiceError::BrandNotFound);
        }
        tracing::info!(brand_id = %id, operator = %actor.user_id, "brand deleted");
        Ok(())
    }
}
