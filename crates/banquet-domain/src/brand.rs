//! Brand tier types.

use serde::{Deserialize, Serialize};

/// Promotional subscription tier of a brand.
///
/// Wire format: `u8` in the database (0 = Trial, 1 = Standard, 2 = Premium, 3 = Expired).
/// `Expired` is terminal: the daily sweep moves brands past their `expired_date` here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelType {
    Trial = 0,
    Standard = 1,
    Premium = 2,
    Expired = 3,
}

impl LevelType {
    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Trial),
            1 => Some(Self::Standard),
            2 => Some(Self::Premium),
            3 => Some(Self::Expired),
            _ => None,
        }
    }

    /// Convert to `u8` wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn is_terminal(self) -> bool {
        self == Self::Expired
    }
}
