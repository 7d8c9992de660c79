//! Key attributes and segment rendering
//!
//! Callers pass a slice of [`KeyAttribute`] values; each category's
//! [`Segment`] list says how many are consumed and how they are rendered.
//! Rendering is fixed-width wherever the value allows it so keys sort well:
//! dates are `YYYYMMDD`, years `YYYY`, months two digits.

use chrono::{Datelike, NaiveDate};
use reserva_core::{AppError, AppResult};
use std::fmt;

use crate::keys::{DELIMITER, WILDCARD};

/// Format of a date inside a key segment
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Separator between check-in and check-out in a rendered date range
pub const RANGE_SEPARATOR: char = '-';

/// Kind of value a segment holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Positive integer identifier
    Id,
    /// Check-in and check-out dates, or a precomputed range token
    DateRange,
    /// Year and month, rendered `YYYY-MM`
    YearMonth,
    /// Four-digit year
    Year,
    /// ISO 3166-1 alpha-2 country code, upper-cased
    Country,
    /// Opaque token such as a query hash
    Token,
}

/// Named segment of a key layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub name: &'static str,
    pub kind: SegmentKind,
}

impl Segment {
    pub const fn new(name: &'static str, kind: SegmentKind) -> Self {
        Self { name, kind }
    }
}

/// Attribute value supplied when building a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAttribute {
    Id(i64),
    Date(NaiveDate),
    Year(i32),
    Month(u32),
    Country(String),
    Token(String),
}

impl KeyAttribute {
    fn kind_name(&self) -> &'static str {
        match self {
            KeyAttribute::Id(_) => "id",
            KeyAttribute::Date(_) => "date",
            KeyAttribute::Year(_) => "year",
            KeyAttribute::Month(_) => "month",
            KeyAttribute::Country(_) => "country",
            KeyAttribute::Token(_) => "token",
        }
    }
}

impl fmt::Display for KeyAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyAttribute::Id(v) => write!(f, "id {}", v),
            KeyAttribute::Date(v) => write!(f, "date {}", v),
            KeyAttribute::Year(v) => write!(f, "year {}", v),
            KeyAttribute::Month(v) => write!(f, "month {}", v),
            KeyAttribute::Country(v) => write!(f, "country {:?}", v),
            KeyAttribute::Token(v) => write!(f, "token {:?}", v),
        }
    }
}

impl From<NaiveDate> for KeyAttribute {
    fn from(date: NaiveDate) -> Self {
        KeyAttribute::Date(date)
    }
}

/// Render every segment of `category`, consuming `attrs` in order
///
/// Fails when an attribute is missing, of the wrong kind, invalid, or left
/// over after the last segment.
pub(crate) fn render_segments(
    category: &str,
    segments: &[Segment],
    attrs: &[KeyAttribute],
) -> AppResult<Vec<String>> {
    let mut rendered = Vec::with_capacity(segments.len());
    let mut rest = attrs;

    for segment in segments {
        let (value, consumed) = take_segment(category, segment, rest)?;
        rendered.push(value);
        rest = &rest[consumed..];
    }

    if let Some(extra) = rest.first() {
        return Err(AppError::invalid_attribute(
            category,
            format!("unexpected extra attribute: {}", extra),
        ));
    }

    Ok(rendered)
}

fn take_segment(
    category: &str,
    segment: &Segment,
    attrs: &[KeyAttribute],
) -> AppResult<(String, usize)> {
    use KeyAttribute as A;

    match (segment.kind, attrs) {
        (SegmentKind::Id, [A::Id(id), ..]) => Ok((render_id(category, segment.name, *id)?, 1)),

        (SegmentKind::DateRange, [A::Date(check_in), A::Date(check_out), ..]) => {
            Ok((render_date_range(category, *check_in, *check_out)?, 2))
        }
        (SegmentKind::DateRange, [A::Token(token), ..]) => {
            Ok((render_token(category, segment.name, token)?, 1))
        }
        (SegmentKind::DateRange, [A::Date(_)]) => Err(AppError::invalid_attribute(
            category,
            "date range requires a check-out date after the check-in date",
        )),
        (SegmentKind::DateRange, [A::Date(_), other, ..]) => Err(AppError::invalid_attribute(
            category,
            format!("expected check-out date, got {}", other),
        )),

        (SegmentKind::YearMonth, [A::Year(year), A::Month(month), ..]) => Ok((
            format!(
                "{}-{}",
                render_year(category, *year)?,
                render_month(category, *month)?
            ),
            2,
        )),
        (SegmentKind::YearMonth, [A::Year(_)]) => Err(AppError::invalid_attribute(
            category,
            "year_month requires a month after the year",
        )),
        (SegmentKind::YearMonth, [A::Year(_), other, ..]) => Err(AppError::invalid_attribute(
            category,
            format!("expected month, got {}", other),
        )),

        (SegmentKind::Year, [A::Year(year), ..]) => Ok((render_year(category, *year)?, 1)),

        (SegmentKind::Country, [A::Country(code), ..]) => {
            Ok((render_country(category, code)?, 1))
        }

        (SegmentKind::Token, [A::Token(token), ..]) => {
            Ok((render_token(category, segment.name, token)?, 1))
        }

        (_, []) => Err(AppError::invalid_attribute(
            category,
            format!("missing {}", segment.name),
        )),
        (_, [other, ..]) => Err(AppError::invalid_attribute(
            category,
            format!(
                "expected {} for {}, got {}",
                expected_kind(segment.kind),
                segment.name,
                other.kind_name()
            ),
        )),
    }
}

fn expected_kind(kind: SegmentKind) -> &'static str {
    match kind {
        SegmentKind::Id => "id",
        SegmentKind::DateRange => "two dates or a range token",
        SegmentKind::YearMonth => "year and month",
        SegmentKind::Year => "year",
        SegmentKind::Country => "country",
        SegmentKind::Token => "token",
    }
}

pub(crate) fn render_id(category: &str, name: &str, id: i64) -> AppResult<String> {
    if id <= 0 {
        return Err(AppError::invalid_attribute(
            category,
            format!("{} must be positive, got {}", name, id),
        ));
    }
    Ok(id.to_string())
}

pub(crate) fn render_year(category: &str, year: i32) -> AppResult<String> {
    if !(1..=9999).contains(&year) {
        return Err(AppError::invalid_attribute(
            category,
            format!("year must be between 1 and 9999, got {}", year),
        ));
    }
    Ok(format!("{:04}", year))
}

fn render_month(category: &str, month: u32) -> AppResult<String> {
    if !(1..=12).contains(&month) {
        return Err(AppError::invalid_attribute(
            category,
            format!("month must be between 1 and 12, got {}", month),
        ));
    }
    Ok(format!("{:02}", month))
}

fn render_date(category: &str, date: NaiveDate) -> AppResult<String> {
    // Keeps the rendered date eight characters wide.
    render_year(category, date.year())?;
    Ok(date.format(DATE_FORMAT).to_string())
}

/// Render a stay window as `YYYYMMDD-YYYYMMDD`
///
/// Check-out must be strictly after check-in.
pub(crate) fn render_date_range(
    category: &str,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> AppResult<String> {
    if check_out <= check_in {
        return Err(AppError::invalid_attribute(
            category,
            format!(
                "check-out {} must be after check-in {}",
                check_out, check_in
            ),
        ));
    }
    Ok(format!(
        "{}{}{}",
        render_date(category, check_in)?,
        RANGE_SEPARATOR,
        render_date(category, check_out)?
    ))
}

pub(crate) fn render_country(category: &str, code: &str) -> AppResult<String> {
    let code = code.trim();
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::invalid_attribute(
            category,
            format!("country must be a two-letter ISO code, got {:?}", code),
        ));
    }
    Ok(code.to_ascii_uppercase())
}

/// Tokens end up inside glob patterns, so glob metacharacters and the
/// delimiter are rejected.
pub(crate) fn render_token(category: &str, name: &str, token: &str) -> AppResult<String> {
    if token.is_empty() {
        return Err(AppError::invalid_attribute(
            category,
            format!("{} must not be empty", name),
        ));
    }
    let forbidden = |c: char| {
        c == DELIMITER
            || c == WILDCARD
            || matches!(c, '?' | '[' | ']' | '\\')
            || c.is_whitespace()
            || !c.is_ascii()
            || c.is_ascii_control()
    };
    if let Some(bad) = token.chars().find(|c| forbidden(*c)) {
        return Err(AppError::invalid_attribute(
            category,
            format!("{} contains forbidden character {:?}", name, bad),
        ));
    }
    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const ROOM_AND_MONTH: &[Segment] = &[
        Segment::new("room_id", SegmentKind::Id),
        Segment::new("year_month", SegmentKind::YearMonth),
    ];

    #[test]
    fn test_render_room_and_month() {
        let parts = render_segments(
            "room_calendar",
            ROOM_AND_MONTH,
            &[KeyAttribute::Id(42), KeyAttribute::Year(2024), KeyAttribute::Month(3)],
        )
        .unwrap();
        assert_eq!(parts, vec!["42".to_string(), "2024-03".to_string()]);
    }

    #[test]
    fn test_missing_attribute() {
        let err = render_segments("room_calendar", ROOM_AND_MONTH, &[KeyAttribute::Id(42)])
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid attribute for room_calendar: missing year_month");
    }

    #[test]
    fn test_missing_month() {
        let err = render_segments(
            "room_calendar",
            ROOM_AND_MONTH,
            &[KeyAttribute::Id(42), KeyAttribute::Year(2024)],
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "invalid_attribute");
    }

    #[test]
    fn test_extra_attribute() {
        let err = render_segments(
            "room_calendar",
            ROOM_AND_MONTH,
            &[
                KeyAttribute::Id(42),
                KeyAttribute::Year(2024),
                KeyAttribute::Month(3),
                KeyAttribute::Id(7),
            ],
        )
        .unwrap_err();
        assert!(err.to_string().contains("unexpected extra attribute: id 7"));
    }

    #[test]
    fn test_wrong_kind() {
        let err = render_segments(
            "room_calendar",
            ROOM_AND_MONTH,
            &[KeyAttribute::Token("42".into())],
        )
        .unwrap_err();
        assert!(err.to_string().contains("expected id for room_id, got token"));
    }

    #[test]
    fn test_non_positive_id() {
        assert!(render_id("room_details", "room_id", 0).is_err());
        assert!(render_id("room_details", "room_id", -5).is_err());
        assert_eq!(render_id("room_details", "room_id", 1).unwrap(), "1");
    }

    #[test]
    fn test_month_bounds() {
        assert!(render_month("room_calendar", 0).is_err());
        assert!(render_month("room_calendar", 13).is_err());
        assert_eq!(render_month("room_calendar", 12).unwrap(), "12");
    }

    #[test]
    fn test_year_is_four_digits() {
        assert_eq!(render_year("holiday_calendar", 987).unwrap(), "0987");
        assert!(render_year("holiday_calendar", 0).is_err());
        assert!(render_year("holiday_calendar", 10000).is_err());
    }

    #[test]
    fn test_date_range() {
        assert_eq!(
            render_date_range("search_available_rooms", date(2024, 6, 1), date(2024, 6, 5))
                .unwrap(),
            "20240601-20240605"
        );
    }

    #[test]
    fn test_date_range_must_move_forward() {
        assert!(render_date_range("room_pricing", date(2024, 6, 5), date(2024, 6, 1)).is_err());
        assert!(render_date_range("room_pricing", date(2024, 6, 5), date(2024, 6, 5)).is_err());
    }

    #[test]
    fn test_date_range_year_out_of_range() {
        let err = render_date_range(
            "search_available_rooms",
            date(9999, 12, 30),
            date(10000, 1, 2),
        )
        .unwrap_err();
        assert_eq!(
            err,
            AppError::invalid_attribute(
                "search_available_rooms",
                "year must be between 1 and 9999, got 10000"
            )
        );

        assert_eq!(
            render_date_range("search_available_rooms", date(9999, 12, 30), date(9999, 12, 31))
                .unwrap(),
            "99991230-99991231"
        );
    }

    #[test]
    fn test_country_normalised() {
        assert_eq!(render_country("holiday_calendar", "us").unwrap(), "US");
        assert_eq!(render_country("holiday_calendar", " De ").unwrap(), "DE");
        assert!(render_country("holiday_calendar", "USA").is_err());
        assert!(render_country("holiday_calendar", "U1").is_err());
    }

    #[test]
    fn test_token_rejects_glob_characters() {
        assert!(render_token("search_results", "query_hash", "").is_err());
        assert!(render_token("search_results", "query_hash", "ab:cd").is_err());
        assert!(render_token("search_results", "query_hash", "ab*").is_err());
        assert!(render_token("search_results", "query_hash", "a b").is_err());
        assert!(render_token("search_results", "query_hash", "[ab]").is_err());
        assert_eq!(
            render_token("search_results", "query_hash", "9f86d081884c7d65").unwrap(),
            "9f86d081884c7d65"
        );
    }
}
