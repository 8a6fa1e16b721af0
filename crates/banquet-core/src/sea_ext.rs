//! Soft-delete helpers for sea-orm entities.
//!
//! Rows carry a `delete_at BIGINT NOT NULL DEFAULT 0` column: `0` means live,
//! any other value is the unix second the row was deleted. Repositories build
//! every read from [`find_live`] / [`LiveRows::live`] and every delete from
//! [`soft_delete_many`], so a deleted row is never observable through them
//! while staying physically present for audit.

use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Select, UpdateMany, sea_query::Expr};

/// `delete_at` value of a live row.
pub const LIVE: i64 = 0;

/// Implemented by every entity that has a `delete_at` column.
pub trait SoftDelete: EntityTrait {
    fn delete_at_column() -> Self::Column;
}

/// Restrict a query to live rows.
pub trait LiveRows {
    fn live(self) -> Self;
}

impl<E> LiveRows for Select<E>
where
    E: SoftDelete,
{
    fn live(self) -> Self {
        self.filter(E::delete_at_column().eq(LIVE))
    }
}

/// `SELECT ... WHERE delete_at = 0`.
pub fn find_live<E>() -> Select<E>
where
    E: SoftDelete,
{
    E::find().live()
}

/// `UPDATE ... SET delete_at = {deleted_at} WHERE delete_at = 0`.
///
/// Further `col_expr` assignments chained by the caller are applied in the
/// same statement. Already-deleted rows are not re-stamped.
pub fn soft_delete_many<E>(deleted_at: i64) -> UpdateMany<E>
where
    E: SoftDelete,
{
    E::update_many()
        .col_expr(E::delete_at_column(), Expr::value(deleted_at.max(1)))
        .filter(E::delete_at_column().eq(LIVE))
}

/// Timestamp written to `delete_at` for a deletion happening now.
pub fn deletion_stamp() -> i64 {
    Utc::now().timestamp()
}
