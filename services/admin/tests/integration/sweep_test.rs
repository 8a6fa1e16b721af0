use chrono::{Duration, Utc};

use banquet_admin::usecase::sweep::{SweepReport, TierSweepUseCase};
use banquet_domain::brand::LevelType;

use crate::helpers::MemoryDb;

#[tokio::test]
async fn should_expire_brands_past_their_date() {
    let db = MemoryDb::new();
    let now = Utc::now();
    let lapsed = db.seed_brand("Lapsed", LevelType::Premium, Some(now - Duration::days(1)));
    let due = db.seed_brand("DueNow", LevelType::Trial, Some(now));
    let current = db.seed_brand("Current", LevelType::Standard, Some(now + Duration::days(7)));

    let report = TierSweepUseCase { brands: db.clone() }
        .execute(now)
        .await
        .unwrap();

    assert_eq!(
        report,
        SweepReport {
            expired: vec![lapsed.id, due.id],
            stopped_at: None,
        }
    );
    assert_eq!(db.brand_row(lapsed.id).value.level_type, LevelType::Expired);
    assert_eq!(db.brand_row(due.id).value.level_type, LevelType::Expired);
    assert_eq!(db.brand_row(current.id).value.level_type, LevelType::Standard);
}

#[tokio::test]
async fn should_stop_at_first_brand_without_expiry() {
    let db = MemoryDb::new();
    let now = Utc::now();
    let open_ended = db.seed_brand("OpenEnded", LevelType::Standard, None);
    let lapsed = db.seed_brand("Lapsed", LevelType::Trial, Some(now - Duration::days(1)));

    let report = TierSweepUseCase { brands: db.clone() }
        .execute(now)
        .await
        .unwrap();

    assert!(report.expired.is_empty());
    assert_eq!(report.stopped_at, Some(open_ended.id));
    assert_eq!(
        db.brand_row(lapsed.id).value.level_type,
        LevelType::Trial,
        "brands after the stop point wait for a later run"
    );
}

#[tokio::test]
async fn should_stop_at_first_already_expired_brand() {
    let db = MemoryDb::new();
    let now = Utc::now();
    let first = db.seed_brand("First", LevelType::Trial, Some(now - Duration::days(2)));
    let done = db.seed_brand("Done", LevelType::Expired, Some(now - Duration::days(30)));
    let later = db.seed_brand("Later", LevelType::Trial, Some(now - Duration::days(1)));

    let report = TierSweepUseCase { brands: db.clone() }
        .execute(now)
        .await
        .unwrap();

    assert_eq!(report.expired, vec![first.id]);
    assert_eq!(report.stopped_at, Some(done.id));
    assert_eq!(db.brand_row(later.id).value.level_type, LevelType::Trial);
}

#[tokio::test]
async fn should_skip_deleted_brands() {
    let db = MemoryDb::new();
    let now = Utc::now();
    let deleted = db.seed_brand("Deleted", LevelType::Trial, None);
    let lapsed = db.seed_brand("Lapsed", LevelType::Trial, Some(now - Duration::days(1)));
    db.tables().brands[0].delete_at = 1;

    let report = TierSweepUseCase { brands: db.clone() }
        .execute(now)
        .await
        .unwrap();

    assert_eq!(report.expired, vec![lapsed.id]);
    assert_eq!(db.brand_row(deleted.id).value.level_type, LevelType::Trial);
}
