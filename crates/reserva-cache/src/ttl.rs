//! Default TTLs per category, in seconds
//!
//! Volatile data (availability, search) expires in minutes; reference data
//! (photos, holidays) lives for a day or longer. Amenity catalogue entries
//! have no default TTL and are only registered through configuration.

use crate::category::CacheCategory;

/// Room details (1 hour)
pub const ROOM_DETAILS_TTL_SECS: u64 = 3600;

/// Room photos (24 hours)
pub const ROOM_PHOTOS_TTL_SECS: u64 = 86400;

/// Room amenities (12 hours)
pub const ROOM_AMENITIES_TTL_SECS: u64 = 43200;

/// Room reviews (2 hours)
pub const ROOM_REVIEWS_TTL_SECS: u64 = 7200;

/// Room availability (5 minutes)
pub const ROOM_AVAILABILITY_TTL_SECS: u64 = 300;

/// Room calendar month (30 minutes)
pub const ROOM_CALENDAR_TTL_SECS: u64 = 1800;

/// Room price quote (15 minutes)
pub const ROOM_PRICING_TTL_SECS: u64 = 900;

/// Pricing rules (30 minutes)
pub const PRICING_RULES_TTL_SECS: u64 = 1800;

/// Available rooms search (2 minutes)
pub const SEARCH_AVAILABLE_ROOMS_TTL_SECS: u64 = 120;

/// Search results (5 minutes)
pub const SEARCH_RESULTS_TTL_SECS: u64 = 300;

/// Holiday calendar (7 days)
pub const HOLIDAY_CALENDAR_TTL_SECS: u64 = 604800;

/// Booking details (10 minutes)
pub const BOOKING_DETAILS_TTL_SECS: u64 = 600;

/// User bookings list (5 minutes)
pub const USER_BOOKINGS_TTL_SECS: u64 = 300;

/// Built-in TTL for a category, if it declares one
pub fn default_ttl(category: CacheCategory) -> Option<u64> {
    match category {
        CacheCategory::RoomDetails => Some(ROOM_DETAILS_TTL_SECS),
        CacheCategory::RoomPhotos => Some(ROOM_PHOTOS_TTL_SECS),
        CacheCategory::RoomAmenities => Some(ROOM_AMENITIES_TTL_SECS),
        CacheCategory::RoomReviews => Some(ROOM_REVIEWS_TTL_SECS),
        CacheCategory::RoomAvailability => Some(ROOM_AVAILABILITY_TTL_SECS),
        CacheCategory::RoomCalendar => Some(ROOM_CALENDAR_TTL_SECS),
        CacheCategory::RoomPricing => Some(ROOM_PRICING_TTL_SECS),
        CacheCategory::PricingRules => Some(PRICING_RULES_TTL_SECS),
        CacheCategory::AmenityDetails => None,
        CacheCategory::SearchAvailableRooms => Some(SEARCH_AVAILABLE_ROOMS_TTL_SECS),
        CacheCategory::SearchResults => Some(SEARCH_RESULTS_TTL_SECS),
        CacheCategory::HolidayCalendar => Some(HOLIDAY_CALENDAR_TTL_SECS),
        CacheCategory::BookingDetails => Some(BOOKING_DETAILS_TTL_SECS),
        CacheCategory::UserBookings => Some(USER_BOOKINGS_TTL_SECS),
    }
}
