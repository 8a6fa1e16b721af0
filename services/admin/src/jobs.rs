use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::state::AppState;
use crate::usecase::sweep::TierSweepUseCase;

/// Run the tier sweep every `period`, first tick immediately. Failures are
/// logged and the next tick tries again.
pub fn spawn_tier_sweep(state: AppState, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let usecase = TierSweepUseCase {
                brands: state.brand_repo(),
            };
            match usecase.execute(Utc::now()).await {
                Ok(report) => tracing::info!(
                    expired = report.expired.len(),
                    stopped_at = ?report.stopped_at,
                    "tier sweep finished"
                ),
                Err(e) => tracing::error!(error = %e, kind = e.kind(), "tier sweep failed"),
            }
        }
    })
}
