//! Newtype wrappers for domain identifiers.
//!
//! All relational ids are `BIGINT` auto-increment keys; the wrappers keep a
//! brand id from being passed where a restaurant id is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

numeric_id!(
    /// Identifies a back-office user account (restaurant staff or platform operator).
    UserId
);

numeric_id!(
    /// Identifies a restaurant brand.
    BrandId
);

numeric_id!(
    /// Identifies a single restaurant belonging to a brand.
    RestaurantId
);
