use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ItemError;

/// The single acquisition state an item occupies.
///
/// `Neutral` means none of the four flags is set. The other variants map
/// one-to-one onto the `notInterested`, `wishlist`, `onOrder` and `owned`
/// document flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Neutral,
    NotInterested,
    Wishlist,
    OnOrder,
    Owned,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::Neutral,
        Status::NotInterested,
        Status::Wishlist,
        Status::OnOrder,
        Status::Owned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Neutral => "neutral",
            Status::NotInterested => "not_interested",
            Status::Wishlist => "wishlist",
            Status::OnOrder => "on_order",
            Status::Owned => "owned",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ItemError;

    /// Accepts the snake_case names as well as the camelCase flag names used
    /// on the wire (`notInterested`, `onOrder`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "neutral" => Ok(Status::Neutral),
            "not_interested" | "notInterested" => Ok(Status::NotInterested),
            "wishlist" => Ok(Status::Wishlist),
            "on_order" | "onOrder" => Ok(Status::OnOrder),
            "owned" => Ok(Status::Owned),
            other => Err(ItemError::UnknownStatus(other.to_string())),
        }
    }
}

/// Status assigned to freshly created catalog items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialStatus {
    #[default]
    Neutral,
    NotInterested,
}
