use chrono::{DateTime, Utc};

use banquet_domain::brand::LevelType;
use banquet_domain::id::BrandId;

use crate::domain::repository::BrandRepository;
use crate::error::AdminServiceError;

/// Outcome of one sweep run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Brands moved to `Expired`, in id order.
    pub expired: Vec<BrandId>,
    /// Brand the run stopped at, if it did not reach the end.
    pub stopped_at: Option<BrandId>,
}

/// Moves brands whose tier has lapsed to `Expired`.
pub struct TierSweepUseCase<B: BrandRepository> {
    pub brands: B,
}

impl<B: BrandRepository> TierSweepUseCase<B> {
    /// Walk live brands in id order. The walk stops at the first brand with
    /// no `expired_date` or one that is already `Expired`; brands after it
    /// are left for a later run.
    pub async fn execute(&self, now: DateTime<Utc>) -> Result<SweepReport, AdminServiceError> {
        let mut report = SweepReport::default();
        for brand in self.brands.list_for_sweep().await? {
            let Some(expired_date) = brand.expired_date else {
                report.stopped_at = Some(brand.id);
                break;
            };
            if brand.level_type.is_terminal() {
                report.stopped_at = Some(brand.id);
                break;
            }
            if expired_date <= now {
                self.brands.set_level(brand.id, LevelType::Expired).await?;
                tracing::info!(
                    brand_id = %brand.id,
                    from = ?brand.level_type,
                    %expired_date,
                    "brand tier expired"
                );
                report.expired.push(brand.id);
            }
        }
        Ok(report)
    }
}
