//! Cache key constants and builders for Reserva
//!
//! Provides standardized key naming for all cached booking data, ensuring
//! consistency across the application and preventing key collisions.
//!
//! # Key Patterns
//!
//! - `room:details:{room_id}` - Room details page data
//! - `room:availability:{room_id}:{YYYYMMDD-YYYYMMDD}` - Availability over a stay window
//! - `room:calendar:{room_id}:{YYYY-MM}` - One month of a room's calendar
//! - `search:available:{YYYYMMDD-YYYYMMDD}` - Rooms available for a stay window
//! - `holiday:calendar:{CC}:{YYYY}` - Public holidays by country and year
//!
//! # Example
//!
//! ```
//! use reserva_cache::keys;
//!
//! let key = keys::room_calendar_key(42, 2024, 3).unwrap();
//! assert_eq!(key, "room:calendar:42:2024-03");
//!
//! let key = keys::room_details_key(42).unwrap();
//! assert_eq!(key, "room:details:42");
//! ```

use chrono::NaiveDate;
use reserva_core::AppResult;

use crate::attributes::{self, KeyAttribute};
use crate::category::CacheCategory;

/// Field separator inside keys
pub const DELIMITER: char = ':';

/// Glob token used in bulk-scan patterns
pub const WILDCARD: char = '*';

/// Format: `room:details:{room_id}`
pub const ROOM_DETAILS_PREFIX: &str = "room:details";

/// Format: `room:photos:{room_id}`
pub const ROOM_PHOTOS_PREFIX: &str = "room:photos";

/// Format: `room:amenities:{room_id}`
pub const ROOM_AMENITIES_PREFIX: &str = "room:amenities";

/// Format: `room:reviews:{room_id}`
pub const ROOM_REVIEWS_PREFIX: &str = "room:reviews";

/// Format: `room:availability:{room_id}:{date_range}`
pub const ROOM_AVAILABILITY_PREFIX: &str = "room:availability";

/// Format: `room:calendar:{room_id}:{YYYY-MM}`
pub const ROOM_CALENDAR_PREFIX: &str = "room:calendar";

/// Format: `room:pricing:{room_id}:{date_range}`
pub const ROOM_PRICING_PREFIX: &str = "room:pricing";

/// Format: `pricing:rules:{room_id}`
pub const PRICING_RULES_PREFIX: &str = "pricing:rules";

/// Format: `amenity:details:{amenity_id}`
pub const AMENITY_DETAILS_PREFIX: &str = "amenity:details";

/// Format: `search:available:{date_range}`
pub const SEARCH_AVAILABLE_PREFIX: &str = "search:available";

/// Format: `search:results:{query_hash}`
pub const SEARCH_RESULTS_PREFIX: &str = "search:results";

/// Format: `holiday:calendar:{CC}:{YYYY}`
pub const HOLIDAY_CALENDAR_PREFIX: &str = "holiday:calendar";

/// Format: `booking:details:{booking_id}`
pub const BOOKING_DETAILS_PREFIX: &str = "booking:details";

/// Format: `user:bookings:{user_id}`
pub const USER_BOOKINGS_PREFIX: &str = "user:bookings";

/// Build the canonical key for any category
///
/// Attributes are consumed in the order of the category's segments. A date
/// range takes either two [`KeyAttribute::Date`] values or one precomputed
/// [`KeyAttribute::Token`].
///
/// # Errors
///
/// Returns `AppError::InvalidAttribute` if an attribute is missing, extra,
/// of the wrong kind, or fails validation.
///
/// # Example
///
/// ```
/// use reserva_cache::{keys, CacheCategory, KeyAttribute};
///
/// let key = keys::build_key(
///     CacheCategory::RoomAvailability,
///     &[KeyAttribute::Id(42), KeyAttribute::Token("20240601-20240605".into())],
/// )
/// .unwrap();
/// assert_eq!(key, "room:availability:42:20240601-20240605");
/// ```
pub fn build_key(category: CacheCategory, attrs: &[KeyAttribute]) -> AppResult<String> {
    let parts = attributes::render_segments(category.name(), category.segments(), attrs)?;

    let mut key = String::from(category.prefix());
    for part in parts {
        key.push(DELIMITER);
        key.push_str(&part);
    }
    Ok(key)
}

/// Render a stay window the way keys embed it: `YYYYMMDD-YYYYMMDD`
///
/// Useful when the same window is reused across several keys.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use reserva_cache::keys::date_range_token;
///
/// let check_in = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let check_out = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
/// assert_eq!(date_range_token(check_in, check_out).unwrap(), "20240601-20240605");
/// ```
pub fn date_range_token(check_in: NaiveDate, check_out: NaiveDate) -> AppResult<String> {
    attributes::render_date_range("date_range", check_in, check_out)
}

// ==================== Room Keys ====================

/// Build a cache key for room details
///
/// # Arguments
///
/// * `room_id` - The room ID, must be positive
///
/// # Returns
///
/// A cache key in the format `room:details:{room_id}`
pub fn room_details_key(room_id: i64) -> AppResult<String> {
    build_key(CacheCategory::RoomDetails, &[KeyAttribute::Id(room_id)])
}

/// Key for a room's photo gallery: `room:photos:{room_id}`
pub fn room_photos_key(room_id: i64) -> AppResult<String> {
    build_key(CacheCategory::RoomPhotos, &[KeyAttribute::Id(room_id)])
}

/// Key for a room's amenity list: `room:amenities:{room_id}`
pub fn room_amenities_key(room_id: i64) -> AppResult<String> {
    build_key(CacheCategory::RoomAmenities, &[KeyAttribute::Id(room_id)])
}

/// Key for a room's review summary: `room:reviews:{room_id}`
pub fn room_reviews_key(room_id: i64) -> AppResult<String> {
    build_key(CacheCategory::RoomReviews, &[KeyAttribute::Id(room_id)])
}

/// Build a cache key for a room's availability over a stay window
///
/// # Arguments
///
/// * `room_id` - The room ID
/// * `check_in` - First night of the stay
/// * `check_out` - Departure date, strictly after `check_in`
///
/// # Returns
///
/// A cache key in the format `room:availability:{room_id}:{YYYYMMDD-YYYYMMDD}`
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use reserva_cache::keys::room_availability_key;
///
/// let key = room_availability_key(
///     42,
///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
/// )
/// .unwrap();
/// assert_eq!(key, "room:availability:42:20240601-20240605");
/// ```
pub fn room_availability_key(
    room_id: i64,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> AppResult<String> {
    build_key(
        CacheCategory::RoomAvailability,
        &[
            KeyAttribute::Id(room_id),
            KeyAttribute::Date(check_in),
            KeyAttribute::Date(check_out),
        ],
    )
}

/// Availability key from a precomputed range token
pub fn room_availability_key_for_range(room_id: i64, date_range: &str) -> AppResult<String> {
    build_key(
        CacheCategory::RoomAvailability,
        &[
            KeyAttribute::Id(room_id),
            KeyAttribute::Token(date_range.to_string()),
        ],
    )
}

/// Build a cache key for one month of a room's calendar
///
/// # Arguments
///
/// * `room_id` - The room ID
/// * `year` - Calendar year, 1..=9999
/// * `month` - Calendar month, 1..=12
///
/// # Returns
///
/// A cache key in the format `room:calendar:{room_id}:{YYYY-MM}`
///
/// # Example
///
/// ```
/// use reserva_cache::keys::room_calendar_key;
///
/// assert_eq!(room_calendar_key(42, 2024, 3).unwrap(), "room:calendar:42:2024-03");
/// assert!(room_calendar_key(42, 2024, 13).is_err());
/// ```
pub fn room_calendar_key(room_id: i64, year: i32, month: u32) -> AppResult<String> {
    build_key(
        CacheCategory::RoomCalendar,
        &[
            KeyAttribute::Id(room_id),
            KeyAttribute::Year(year),
            KeyAttribute::Month(month),
        ],
    )
}

/// Key for a price quote: `room:pricing:{room_id}:{YYYYMMDD-YYYYMMDD}`
pub fn room_pricing_key(
    room_id: i64,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> AppResult<String> {
    build_key(
        CacheCategory::RoomPricing,
        &[
            KeyAttribute::Id(room_id),
            KeyAttribute::Date(check_in),
            KeyAttribute::Date(check_out),
        ],
    )
}

/// Key for a room's pricing rules: `pricing:rules:{room_id}`
pub fn pricing_rules_key(room_id: i64) -> AppResult<String> {
    build_key(CacheCategory::PricingRules, &[KeyAttribute::Id(room_id)])
}

// ==================== Catalogue Keys ====================

/// Key for an amenity catalogue entry: `amenity:details:{amenity_id}`
pub fn amenity_details_key(amenity_id: i64) -> AppResult<String> {
    build_key(CacheCategory::AmenityDetails, &[KeyAttribute::Id(amenity_id)])
}

/// Build a cache key for public holidays of a country in a year
///
/// # Arguments
///
/// * `country` - ISO 3166-1 alpha-2 code, any case
/// * `year` - Calendar year
///
/// # Returns
///
/// A cache key in the format `holiday:calendar:{CC}:{YYYY}`
///
/// # Example
///
/// ```
/// use reserva_cache::keys::holiday_calendar_key;
///
/// assert_eq!(holiday_calendar_key("us", 2024).unwrap(), "holiday:calendar:US:2024");
/// ```
pub fn holiday_calendar_key(country: &str, year: i32) -> AppResult<String> {
    build_key(
        CacheCategory::HolidayCalendar,
        &[
            KeyAttribute::Country(country.to_string()),
            KeyAttribute::Year(year),
        ],
    )
}

// ==================== Search Keys ====================

/// Key for rooms available in a window: `search:available:{YYYYMMDD-YYYYMMDD}`
pub fn search_available_rooms_key(check_in: NaiveDate, check_out: NaiveDate) -> AppResult<String> {
    build_key(
        CacheCategory::SearchAvailableRooms,
        &[KeyAttribute::Date(check_in), KeyAttribute::Date(check_out)],
    )
}

/// Key for a search result page: `search:results:{query_hash}`
///
/// The hash is computed by the caller; it must not contain `:` or glob
/// metacharacters.
pub fn search_results_key(query_hash: &str) -> AppResult<String> {
    build_key(
        CacheCategory::SearchResults,
        &[KeyAttribute::Token(query_hash.to_string())],
    )
}

// ==================== Booking Keys ====================

/// Key for booking details: `booking:details:{booking_id}`
pub fn booking_details_key(booking_id: i64) -> AppResult<String> {
    build_key(CacheCategory::BookingDetails, &[KeyAttribute::Id(booking_id)])
}

/// Key for a user's bookings: `user:bookings:{user_id}`
pub fn user_bookings_key(user_id: i64) -> AppResult<String> {
    build_key(CacheCategory::UserBookings, &[KeyAttribute::Id(user_id)])
}
