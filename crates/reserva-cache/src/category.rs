//! Cache data categories
//!
//! Every cached value belongs to exactly one [`CacheCategory`]. The category
//! decides the key prefix and the ordered segments that follow it.

use reserva_core::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::attributes::{Segment, SegmentKind};
use crate::keys;

/// Category of cached data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheCategory {
    /// Room details page data
    RoomDetails,
    /// Room photo gallery
    RoomPhotos,
    /// Amenities attached to a room
    RoomAmenities,
    /// Aggregated room reviews
    RoomReviews,
    /// Availability of one room over a stay window
    RoomAvailability,
    /// Month view of a room's calendar
    RoomCalendar,
    /// Quoted price of one room over a stay window
    RoomPricing,
    /// Pricing rules attached to a room
    PricingRules,
    /// Amenity catalogue entry
    AmenityDetails,
    /// Rooms available for a stay window
    SearchAvailableRooms,
    /// Search results keyed by query hash
    SearchResults,
    /// Public holidays for a country and year
    HolidayCalendar,
    /// Booking details
    BookingDetails,
    /// Bookings of one user
    UserBookings,
}

const ROOM_ONLY: &[Segment] = &[Segment::new("room_id", SegmentKind::Id)];
const ROOM_AND_RANGE: &[Segment] = &[
    Segment::new("room_id", SegmentKind::Id),
    Segment::new("date_range", SegmentKind::DateRange),
];
const ROOM_AND_MONTH: &[Segment] = &[
    Segment::new("room_id", SegmentKind::Id),
    Segment::new("year_month", SegmentKind::YearMonth),
];
const AMENITY_ONLY: &[Segment] = &[Segment::new("amenity_id", SegmentKind::Id)];
const RANGE_ONLY: &[Segment] = &[Segment::new("date_range", SegmentKind::DateRange)];
const QUERY_HASH: &[Segment] = &[Segment::new("query_hash", SegmentKind::Token)];
const COUNTRY_AND_YEAR: &[Segment] = &[
    Segment::new("country", SegmentKind::Country),
    Segment::new("year", SegmentKind::Year),
];
const BOOKING_ONLY: &[Segment] = &[Segment::new("booking_id", SegmentKind::Id)];
const USER_ONLY: &[Segment] = &[Segment::new("user_id", SegmentKind::Id)];

impl CacheCategory {
    /// All categories, in table order
    pub const ALL: [CacheCategory; 14] = [
        CacheCategory::RoomDetails,
        CacheCategory::RoomPhotos,
        CacheCategory::RoomAmenities,
        CacheCategory::RoomReviews,
        CacheCategory::RoomAvailability,
        CacheCategory::RoomCalendar,
        CacheCategory::RoomPricing,
        CacheCategory::PricingRules,
        CacheCategory::AmenityDetails,
        CacheCategory::SearchAvailableRooms,
        CacheCategory::SearchResults,
        CacheCategory::HolidayCalendar,
        CacheCategory::BookingDetails,
        CacheCategory::UserBookings,
    ];

    /// Stable snake_case name, used in configuration and logs
    pub fn name(&self) -> &'static str {
        match self {
            CacheCategory::RoomDetails => "room_details",
            CacheCategory::RoomPhotos => "room_photos",
            CacheCategory::RoomAmenities => "room_amenities",
            CacheCategory::RoomReviews => "room_reviews",
            CacheCategory::RoomAvailability => "room_availability",
            CacheCategory::RoomCalendar => "room_calendar",
            CacheCategory::RoomPricing => "room_pricing",
            CacheCategory::PricingRules => "pricing_rules",
            CacheCategory::AmenityDetails => "amenity_details",
            CacheCategory::SearchAvailableRooms => "search_available_rooms",
            CacheCategory::SearchResults => "search_results",
            CacheCategory::HolidayCalendar => "holiday_calendar",
            CacheCategory::BookingDetails => "booking_details",
            CacheCategory::UserBookings => "user_bookings",
        }
    }

    /// Key prefix, without the trailing delimiter
    pub fn prefix(&self) -> &'static str {
        match self {
            CacheCategory::RoomDetails => keys::ROOM_DETAILS_PREFIX,
            CacheCategory::RoomPhotos => keys::ROOM_PHOTOS_PREFIX,
            CacheCategory::RoomAmenities => keys::ROOM_AMENITIES_PREFIX,
            CacheCategory::RoomReviews => keys::ROOM_REVIEWS_PREFIX,
            CacheCategory::RoomAvailability => keys::ROOM_AVAILABILITY_PREFIX,
            CacheCategory::RoomCalendar => keys::ROOM_CALENDAR_PREFIX,
            CacheCategory::RoomPricing => keys::ROOM_PRICING_PREFIX,
            CacheCategory::PricingRules => keys::PRICING_RULES_PREFIX,
            CacheCategory::AmenityDetails => keys::AMENITY_DETAILS_PREFIX,
            CacheCategory::SearchAvailableRooms => keys::SEARCH_AVAILABLE_PREFIX,
            CacheCategory::SearchResults => keys::SEARCH_RESULTS_PREFIX,
            CacheCategory::HolidayCalendar => keys::HOLIDAY_CALENDAR_PREFIX,
            CacheCategory::BookingDetails => keys::BOOKING_DETAILS_PREFIX,
            CacheCategory::UserBookings => keys::USER_BOOKINGS_PREFIX,
        }
    }

    /// Ordered segments that follow the prefix
    pub fn segments(&self) -> &'static [Segment] {
        match self {
            CacheCategory::RoomDetails
            | CacheCategory::RoomPhotos
            | CacheCategory::RoomAmenities
            | CacheCategory::RoomReviews
            | CacheCategory::PricingRules => ROOM_ONLY,
            CacheCategory::RoomAvailability | CacheCategory::RoomPricing => ROOM_AND_RANGE,
            CacheCategory::RoomCalendar => ROOM_AND_MONTH,
            CacheCategory::AmenityDetails => AMENITY_ONLY,
            CacheCategory::SearchAvailableRooms => RANGE_ONLY,
            CacheCategory::SearchResults => QUERY_HASH,
            CacheCategory::HolidayCalendar => COUNTRY_AND_YEAR,
            CacheCategory::BookingDetails => BOOKING_ONLY,
            CacheCategory::UserBookings => USER_ONLY,
        }
    }

    /// Whether the first segment is a room id
    pub fn is_room_scoped(&self) -> bool {
        self.segments()
            .first()
            .map(|s| s.name == "room_id")
            .unwrap_or(false)
    }

    /// Human-readable key layout, e.g. `room:calendar:{room_id}:{year_month}`
    pub fn key_format(&self) -> String {
        let mut format = self.prefix().to_string();
        for segment in self.segments() {
            format.push(keys::DELIMITER);
            format.push('{');
            format.push_str(segment.name);
            format.push('}');
        }
        format
    }
}

impl fmt::Display for CacheCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CacheCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        CacheCategory::ALL
            .iter()
            .copied()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| AppError::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_round_trip() {
        for category in CacheCategory::ALL {
            assert_eq!(category.name().parse::<CacheCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            " Room_Photos ".parse::<CacheCategory>().unwrap(),
            CacheCategory::RoomPhotos
        );
    }

    #[test]
    fn test_unknown_name() {
        let err = "room_gallery".parse::<CacheCategory>().unwrap_err();
        assert_eq!(err, AppError::UnknownCategory("room_gallery".to_string()));
    }

    #[test]
    fn test_prefixes_unique() {
        let prefixes: HashSet<_> = CacheCategory::ALL.iter().map(|c| c.prefix()).collect();
        assert_eq!(prefixes.len(), CacheCategory::ALL.len());
    }

    #[test]
    fn test_key_format() {
        assert_eq!(
            CacheCategory::RoomCalendar.key_format(),
            "room:calendar:{room_id}:{year_month}"
        );
        assert_eq!(
            CacheCategory::HolidayCalendar.key_format(),
            "holiday:calendar:{country}:{year}"
        );
    }

    #[test]
    fn test_room_scoped() {
        assert!(CacheCategory::RoomAvailability.is_room_scoped());
        assert!(CacheCategory::PricingRules.is_room_scoped());
        assert!(!CacheCategory::AmenityDetails.is_room_scoped());
        assert!(!CacheCategory::SearchAvailableRooms.is_room_scoped());
    }
}
