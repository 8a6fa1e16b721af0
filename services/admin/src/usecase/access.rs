//! Who may act on what.
//!
//! A session without a brand belongs to a platform operator and may act on
//! every brand. A session bound to a brand is confined to that brand.

use banquet_domain::id::BrandId;
use banquet_session::Session;

use crate::error::AdminServiceError;

pub fn is_platform(actor: &Session) -> bool {
    actor.brand_id.is_none()
}

pub fn ensure_platform(actor: &Session) -> Result<(), AdminServiceError> {
    if is_platform(actor) {
        Ok(())
    } else {
        Err(AdminServiceError::Forbidden)
    }
}

pub fn ensure_brand_access(actor: &Session, brand_id: BrandId) -> Result<(), AdminServiceError> {
    match actor.brand_id {
        None => Ok(()),
        Some(own) if own == brand_id => Ok(()),
        Some(_) => Err(AdminServiceError::Forbidden),
    }
}

/// Access to a record owned by `brand_id`, where `None` means platform-owned.
pub fn ensure_owner_access(
    actor: &Session,
    brand_id: Option<BrandId>,
) -> Result<(), AdminServiceError> {
    match brand_id {
        Some(brand_id) => ensure_brand_access(actor, brand_id),
        None => ensure_platform(actor),
    }
}
