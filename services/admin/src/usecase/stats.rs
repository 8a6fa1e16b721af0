use banquet_domain::id::BrandId;
use banquet_session::Session;

use crate::domain::repository::{
    BrandRepository, RestaurantRepository, RestaurantUserRepository, WalletRepository,
};
use crate::domain::types::{BrandStats, Wallet};
use crate::error::AdminServiceError;
use crate::usecase::access::ensure_brand_access;

pub struct BrandStatsUseCase<B, R, U, W>
where
    B: BrandRepository,
    R: RestaurantRepository,
    U: RestaurantUserRepository,
    W: WalletRepository,
{
    pub brands: B,
    pub restaurants: R,
    pub users: U,
    pub wallets: W,
}

impl<B, R, U, W> BrandStatsUseCase<B, R, U, W>
where
    B: BrandRepository,
    R: RestaurantRepository,
    U: RestaurantUserRepository,
    W: WalletRepository,
{
    pub async fn execute(
        &self,
        actor: &Session,
        brand_id: BrandId,
    ) -> Result<BrandStats, AdminServiceError> {
        ensure_brand_access(actor, brand_id)?;
        if self.brands.find_by_id(brand_id).await?.is_none() {
            return Err(AdminServiceError::BrandNotFound);
        }

        let restaurants = self.restaurants.count_by_brand(brand_id).await?;
        let users = self.users.count_by_brand(brand_id).await?;
        let wallet = self
            .wallets
            .find_by_brand(brand_id)
            .await?
            .unwrap_or_else(|| Wallet::empty(brand_id));
        let total_recharged = self.wallets.total_recharged(brand_id).await?;

        Ok(BrandStats {
            brand_id,
            restaurants,
            users,
            balance: wallet.balance,
            points: wallet.points,
            total_recharged,
        })
    }
}
