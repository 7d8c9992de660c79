//! Eviction priority hints
//!
//! The store decides what to do with them; this crate only defines the
//! ordinals and which categories declare one.

use reserva_core::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::category::CacheCategory;

/// Relative importance of a cached category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Priority {
    /// Ordinal handed to the store: 1 is most important
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            1 => Some(Priority::High),
            2 => Some(Priority::Medium),
            3 => Some(Priority::Low),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

impl FromStr for Priority {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" | "1" => Ok(Priority::High),
            "medium" | "2" => Ok(Priority::Medium),
            "low" | "3" => Ok(Priority::Low),
            _ => Err(AppError::Config(format!("invalid priority: {}", s))),
        }
    }
}

/// Built-in priority for a category, if it declares one
pub fn default_priority(category: CacheCategory) -> Option<Priority> {
    match category {
        CacheCategory::RoomDetails
        | CacheCategory::RoomAvailability
        | CacheCategory::RoomPricing
        | CacheCategory::BookingDetails => Some(Priority::High),
        CacheCategory::RoomCalendar
        | CacheCategory::PricingRules
        | CacheCategory::SearchAvailableRooms
        | CacheCategory::SearchResults
        | CacheCategory::UserBookings => Some(Priority::Medium),
        CacheCategory::RoomPhotos
        | CacheCategory::RoomAmenities
        | CacheCategory::RoomReviews
        | CacheCategory::HolidayCalendar => Some(Priority::Low),
        CacheCategory::AmenityDetails => None,
    }
}
