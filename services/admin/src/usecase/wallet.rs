use serde::Serialize;

use banquet_domain::id::BrandId;
use banquet_domain::money::{Cents, Points};
use banquet_domain::pagination::{Page, PageRequest};
use banquet_session::Session;

use crate::domain::repository::{BrandRepository, WalletRepository};
use crate::domain::types::{NewRecharge, RechargeRecord, Wallet};
use crate::error::AdminServiceError;
use crate::usecase::access::{ensure_brand_access, ensure_platform};

// ── Recharge ─────────────────────────────────────────────────────────────────

pub struct RechargeInput {
    pub brand_id: BrandId,
    /// Decimal yuan with at most two fractional digits, e.g. `"300"` or `"12.50"`.
    pub amount: String,
    pub remark: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RechargeOutput {
    pub wallet: Wallet,
    pub record: RechargeRecord,
}

pub struct RechargeUseCase<B, W>
where
    B: BrandRepository,
    W: WalletRepository,
{
    pub brands: B,
    pub wallets: W,
    pub points_per_yuan: u32,
}

impl<B, W> RechargeUseCase<B, W>
where
    B: BrandRepository,
    W: WalletRepository,
{
    pub async fn execute(
        &self,
        actor: &Session,
        input: RechargeInput,
    ) -> Result<RechargeOutput, AdminServiceError> {
        ensure_platform(actor)?;
        let amount = Cents::parse_positive(&input.amount)?;
        let points = Points::from_cents(amount, self.points_per_yuan)?;
        if self.brands.find_by_id(input.brand_id).await?.is_none() {
            return Err(AdminServiceError::BrandNotFound);
        }

        let (wallet, record) = self
            .wallets
            .recharge(&NewRecharge {
                brand_id: input.brand_id,
                amount,
                points,
                operator_id: actor.user_id,
                remark: input.remark,
            })
            .await?;
        tracing::info!(
            brand_id = %input.brand_id,
            operator = %actor.user_id,
            amount = %amount,
            points = %points,
            "wallet recharged"
        );
        Ok(RechargeOutput { wallet, record })
    }
}

// ── GetWallet ────────────────────────────────────────────────────────────────

pub struct GetWalletUseCase<B, W>
where
    B: BrandRepository,
    W: WalletRepository,
{
    pub brands: B,
    pub wallets: W,
}

impl<B, W> GetWalletUseCase<B, W>
where
    B: BrandRepository,
    W: WalletRepository,
{
    /// A brand that was never recharged has an empty wallet.
    pub async fn execute(&self, actor: &Session, brand_id: BrandId) -> Result<Wallet, AdminServiceError> {
        ensure_brand_access(actor, brand_id)?;
        if self.brands.find_by_id(brand_id).await?.is_none() {
            return Err(AdminServiceError::BrandNotFound);
        }
        Ok(self
            .wallets
            .find_by_brand(brand_id)
            .await?
            .unwrap_or_else(|| Wallet::empty(brand_id)))
    }
}

// ── ListRecharges ────────────────────────────────────────────────────────────

pub struct ListRechargesUseCase<B, W>
where
    B: BrandRepository,
    W: WalletRepository,
{
    pub brands: B,
    pub wallets: W,
}

impl<B, W> ListRechargesUseCase<B, W>
where
    B: BrandRepository,
    W: WalletRepository,
{
    pub async fn execute(
        &self,
        actor: &Session,
        brand_id: BrandId,
        page: PageRequest,
    ) -> Result<Page<RechargeRecord>, AdminServiceError> {
        ensure_brand_access(actor, brand_id)?;
        if self.brands.find_by_id(brand_id).await?.is_none() {
            return Err(AdminServiceError::BrandNotFound);
        }
        let (items, total) = self
            .wallets
            .list_recharges(brand_id, page.clamped())
            .await?;
        Ok(Page::new(items, total, page))
    }
}
