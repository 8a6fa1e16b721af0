//! Domain types shared across Banquet services.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod brand;
pub mod captcha;
pub mod id;
pub mod money;
pub mod pagination;
