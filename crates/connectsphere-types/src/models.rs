use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Listing kinds accepted at post creation. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    /// Shared for viewing only; no buy/trade actions.
    Share,
    /// For sale at a fixed price; finalized by checkout.
    Sell,
    /// Open for trade offers; winners submit an address after the fact.
    Trade,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Share => "share",
            PostStatus::Sell => "sell",
            PostStatus::Trade => "trade",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "share" => Ok(PostStatus::Share),
            "sell" => Ok(PostStatus::Sell),
            "trade" => Ok(PostStatus::Trade),
            _ => Err(()),
        }
    }
}

/// Art categories offered by the feed filter. Anything else is treated
/// as "no filter".
pub const VALID_ART_TYPES: &[&str] = &[
    "Paintings",
    "Drawings",
    "Prints & Reproductions",
    "Sculpture & 3D Art",
    "Photography",
];

pub fn is_valid_art_type(value: &str) -> bool {
    VALID_ART_TYPES.contains(&value)
}
