//! Key naming registry
//!
//! [`KeyNamingRegistry`] ties the key builders, wildcard patterns, TTL table
//! and priority table together. It is immutable once built and safe to
//! share between threads.

use reserva_core::config::CacheConfig;
use reserva_core::{AppError, AppResult};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::attributes::KeyAttribute;
use crate::category::CacheCategory;
use crate::keys::{self, DELIMITER};
use crate::pattern::{self, KeyPattern, PartialKey};
use crate::priority::{self, Priority};
use crate::ttl;

/// Key, TTL and priority for one value about to be written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheEntry {
    pub category: CacheCategory,
    pub key: String,
    pub ttl_secs: Option<u64>,
    pub priority: Option<Priority>,
    /// Priority as stored alongside the value, 1 (high) to 3 (low)
    pub priority_ordinal: Option<u8>,
}

/// One row of the registry table, for tooling
#[derive(Debug, Clone, Serialize)]
pub struct CategoryInfo {
    pub name: &'static str,
    pub prefix: &'static str,
    pub key_format: String,
    pub pattern: KeyPattern,
    pub ttl_secs: Option<u64>,
    pub priority: Option<Priority>,
    pub priority_ordinal: Option<u8>,
}

/// Registry of cache key conventions, TTLs and priorities
#[derive(Debug, Clone)]
pub struct KeyNamingRegistry {
    ttls: BTreeMap<CacheCategory, u64>,
    priorities: BTreeMap<CacheCategory, Priority>,
}

impl KeyNamingRegistry {
    /// Registry with the built-in TTL and priority tables
    pub fn new() -> Self {
        let ttls = CacheCategory::ALL
            .iter()
            .filter_map(|c| ttl::default_ttl(*c).map(|t| (*c, t)))
            .collect();
        let priorities = CacheCategory::ALL
            .iter()
            .filter_map(|c| priority::default_priority(*c).map(|p| (*c, p)))
            .collect();

        Self { ttls, priorities }
    }

    /// Registry with configuration overrides applied on top of the defaults
    ///
    /// # Errors
    ///
    /// - `AppError::UnknownCategory` if an override names no category
    /// - `AppError::Validation` if a TTL override is zero
    /// - `AppError::Config` if a priority override is not `high`, `medium` or `low`
    pub fn from_config(config: &CacheConfig) -> AppResult<Self> {
        verify_prefixes()?;

        let mut registry = Self::new();

        for (name, ttl_secs) in &config.ttl_overrides {
            let category = parse_override_name(name)?;
            if *ttl_secs == 0 {
                warn!(category = %category, "Rejected zero TTL override");
                return Err(AppError::Validation(format!(
                    "TTL override for {} must be greater than zero",
                    category
                )));
            }
            registry.ttls.insert(category, *ttl_secs);
        }

        for (name, value) in &config.priority_overrides {
            let category = parse_override_name(name)?;
            let priority: Priority = value.parse()?;
            registry.priorities.insert(category, priority);
        }

        debug!(
            ttls = registry.ttls.len(),
            priorities = registry.priorities.len(),
            "Key naming registry built"
        );
        Ok(registry)
    }

    /// Canonical key for `category` built from `attrs`
    ///
    /// See [`keys::build_key`] for how attributes are consumed.
    pub fn key_for(&self, category: CacheCategory, attrs: &[KeyAttribute]) -> AppResult<String> {
        keys::build_key(category, attrs)
    }

    /// Wildcard pattern covering `category` for a partial identifier
    pub fn pattern_for(
        &self,
        category: CacheCategory,
        partial: &PartialKey,
    ) -> AppResult<KeyPattern> {
        pattern::build_pattern(category, partial)
    }

    /// Patterns covering every room-scoped category for one room
    ///
    /// Deleting everything these match drops all cached data of the room.
    pub fn room_patterns(&self, room_id: i64) -> AppResult<Vec<KeyPattern>> {
        CacheCategory::ALL
            .iter()
            .filter(|c| c.is_room_scoped())
            .map(|c| self.pattern_for(*c, &PartialKey::Id(room_id)))
            .collect()
    }

    /// TTL in seconds for `category`
    ///
    /// # Errors
    ///
    /// Returns `AppError::UnknownCategory` if no TTL is registered for it
    pub fn ttl_for(&self, category: CacheCategory) -> AppResult<u64> {
        self.ttls
            .get(&category)
            .copied()
            .ok_or_else(|| AppError::UnknownCategory(category.name().to_string()))
    }

    /// TTL in seconds for a category given by name
    pub fn ttl_for_name(&self, name: &str) -> AppResult<u64> {
        self.ttl_for(name.parse()?)
    }

    /// Declared priority, if any; callers pick their own default otherwise
    pub fn priority_for(&self, category: CacheCategory) -> Option<Priority> {
        self.priorities.get(&category).copied()
    }

    pub fn priority_for_name(&self, name: &str) -> AppResult<Option<Priority>> {
        Ok(self.priority_for(name.parse()?))
    }

    /// Key plus TTL and priority, ready for a `SET key value EX ttl`
    pub fn entry_for(
        &self,
        category: CacheCategory,
        attrs: &[KeyAttribute],
    ) -> AppResult<CacheEntry> {
        Ok(CacheEntry {
            category,
            key: self.key_for(category, attrs)?,
            ttl_secs: self.ttls.get(&category).copied(),
            priority: self.priority_for(category),
            priority_ordinal: self.priority_for(category).map(|p| p.ordinal()),
        })
    }

    /// Category a key belongs to, judged by its delimited prefix
    pub fn classify(&self, key: &str) -> Option<CacheCategory> {
        CacheCategory::ALL.iter().copied().find(|c| {
            key.strip_prefix(c.prefix())
                .and_then(|rest| rest.strip_prefix(DELIMITER))
                .is_some()
        })
    }

    pub fn categories(&self) -> impl Iterator<Item = CacheCategory> {
        CacheCategory::ALL.into_iter()
    }

    /// Full table, one row per category
    pub fn describe(&self) -> AppResult<Vec<CategoryInfo>> {
        self.categories()
            .map(|category| -> AppResult<CategoryInfo> {
                Ok(CategoryInfo {
                    name: category.name(),
                    prefix: category.prefix(),
                    key_format: category.key_format(),
                    pattern: self.pattern_for(category, &PartialKey::All)?,
                    ttl_secs: self.ttls.get(&category).copied(),
                    priority: self.priority_for(category),
                    priority_ordinal: self.priority_for(category).map(|p| p.ordinal()),
                })
            })
            .collect()
    }

    /// [`describe`](Self::describe) rendered as pretty-printed JSON
    pub fn describe_json(&self) -> AppResult<String> {
        let rows = self.describe()?;
        Ok(serde_json::to_string_pretty(&rows)?)
    }
}

impl Default for KeyNamingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_override_name(name: &str) -> AppResult<CacheCategory> {
    name.parse::<CacheCategory>().map_err(|e| {
        warn!(name = %name, "Override names an unknown cache category");
        e
    })
}

/// Check that no category's delimited prefix is a prefix of another's
///
/// Patterns rely on this to never match keys of a different category.
pub fn verify_prefixes() -> AppResult<()> {
    for a in CacheCategory::ALL {
        let a_prefix = format!("{}{}", a.prefix(), DELIMITER);
        for b in CacheCategory::ALL {
            if a == b {
                continue;
            }
            let b_prefix = format!("{}{}", b.prefix(), DELIMITER);
            if b_prefix.starts_with(&a_prefix) {
                return Err(AppError::Internal(format!(
                    "cache prefix {} of {} overlaps {} of {}",
                    a.prefix(),
                    a,
                    b.prefix(),
                    b
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_prefixes_do_not_overlap() {
        verify_prefixes().unwrap();
    }

    #[test]
    fn test_key_for_room_calendar() {
        let registry = KeyNamingRegistry::new();
        let key = registry
            .key_for(
                CacheCategory::RoomCalendar,
                &[KeyAttribute::Id(42), KeyAttribute::Year(2024), KeyAttribute::Month(3)],
            )
            .unwrap();
        assert_eq!(key, "room:calendar:42:2024-03");
    }

    #[test]
    fn test_ttl_for() {
        let registry = KeyNamingRegistry::new();
        assert_eq!(registry.ttl_for(CacheCategory::RoomPhotos).unwrap(), 86400);
        assert_eq!(registry.ttl_for_name("room_photos").unwrap(), 86400);
    }

    #[test]
    fn test_ttl_for_unregistered() {
        let registry = KeyNamingRegistry::new();
        assert_eq!(
            registry.ttl_for(CacheCategory::AmenityDetails).unwrap_err(),
            AppError::UnknownCategory("amenity_details".to_string())
        );
        assert_eq!(
            registry.ttl_for_name("room_gallery").unwrap_err(),
            AppError::UnknownCategory("room_gallery".to_string())
        );
    }

    #[test]
    fn test_priority_for() {
        let registry = KeyNamingRegistry::new();
        assert_eq!(registry.priority_for(CacheCategory::BookingDetails), Some(Priority::High));
        assert_eq!(registry.priority_for(CacheCategory::AmenityDetails), None);
        assert_eq!(
            registry.priority_for_name("holiday_calendar").unwrap(),
            Some(Priority::Low)
        );
        assert!(registry.priority_for_name("nope").is_err());
    }

    #[test]
    fn test_from_config_overrides() {
        let config = CacheConfig {
            ttl_overrides: HashMap::from([
                ("room_photos".to_string(), 43200),
                ("amenity_details".to_string(), 86400),
            ]),
            priority_overrides: HashMap::from([(
                "search_results".to_string(),
                "high".to_string(),
            )]),
        };
        let registry = KeyNamingRegistry::from_config(&config).unwrap();

        assert_eq!(registry.ttl_for(CacheCategory::RoomPhotos).unwrap(), 43200);
        assert_eq!(registry.ttl_for(CacheCategory::AmenityDetails).unwrap(), 86400);
        assert_eq!(registry.ttl_for(CacheCategory::RoomDetails).unwrap(), 3600);
        assert_eq!(registry.priority_for(CacheCategory::SearchResults), Some(Priority::High));
    }

    #[test]
    fn test_from_config_unknown_category() {
        let config = CacheConfig {
            ttl_overrides: HashMap::from([("room_gallery".to_string(), 60)]),
            ..Default::default()
        };
        let err = KeyNamingRegistry::from_config(&config).unwrap_err();
        assert_eq!(err, AppError::UnknownCategory("room_gallery".to_string()));
    }

    #[test]
    fn test_from_config_zero_ttl() {
        let config = CacheConfig {
            ttl_overrides: HashMap::from([("room_details".to_string(), 0)]),
            ..Default::default()
        };
        let err = KeyNamingRegistry::from_config(&config).unwrap_err();
        assert_eq!(err.error_code(), "validation_error");
    }

    #[test]
    fn test_from_config_bad_priority() {
        let config = CacheConfig {
            priority_overrides: HashMap::from([(
                "room_details".to_string(),
                "urgent".to_string(),
            )]),
            ..Default::default()
        };
        let err = KeyNamingRegistry::from_config(&config).unwrap_err();
        assert_eq!(err.error_code(), "config_error");
    }

    #[test]
    fn test_entry_for() {
        let registry = KeyNamingRegistry::new();
        let entry = registry
            .entry_for(
                CacheCategory::RoomAvailability,
                &[
                    KeyAttribute::Id(42),
                    KeyAttribute::Date(date(2024, 6, 1)),
                    KeyAttribute::Date(date(2024, 6, 5)),
                ],
            )
            .unwrap();
        assert_eq!(entry.key, "room:availability:42:20240601-20240605");
        assert_eq!(entry.ttl_secs, Some(300));
        assert_eq!(entry.priority, Some(Priority::High));
        assert_eq!(entry.priority_ordinal, Some(1));

        let entry = registry
            .entry_for(CacheCategory::AmenityDetails, &[KeyAttribute::Id(9)])
            .unwrap();
        assert_eq!(entry.ttl_secs, None);
        assert_eq!(entry.priority, None);
        assert_eq!(entry.priority_ordinal, None);
    }

    #[test]
    fn test_entry_serializes_priority_ordinal() {
        let registry = KeyNamingRegistry::new();
        let entry = registry
            .entry_for(CacheCategory::RoomDetails, &[KeyAttribute::Id(1)])
            .unwrap();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["key"], "room:details:1");
        assert_eq!(json["priority"], "high");
        assert_eq!(json["priority_ordinal"], 1);
    }

    #[test]
    fn test_room_patterns() {
        let registry = KeyNamingRegistry::new();
        let patterns = registry.room_patterns(42).unwrap();
        let raw: Vec<&str> = patterns.iter().map(KeyPattern::as_str).collect();

        assert_eq!(
            raw,
            vec![
                "room:details:42",
                "room:photos:42",
                "room:amenities:42",
                "room:reviews:42",
                "room:availability:42:*",
                "room:calendar:42:*",
                "room:pricing:42:*",
                "pricing:rules:42",
            ]
        );

        let calendar = keys::room_calendar_key(42, 2024, 3).unwrap();
        assert!(patterns.iter().any(|p| p.matches(&calendar)));
        let other_room = keys::room_calendar_key(43, 2024, 3).unwrap();
        assert!(!patterns.iter().any(|p| p.matches(&other_room)));
    }

    #[test]
    fn test_classify() {
        let registry = KeyNamingRegistry::new();
        assert_eq!(
            registry.classify("room:calendar:42:2024-03"),
            Some(CacheCategory::RoomCalendar)
        );
        assert_eq!(
            registry.classify("search:available:20240601-20240605"),
            Some(CacheCategory::SearchAvailableRooms)
        );
        assert_eq!(registry.classify("room:detailsx:42"), None);
        assert_eq!(registry.classify("session:abc"), None);
    }

    #[test]
    fn test_describe() {
        let registry = KeyNamingRegistry::new();
        let rows = registry.describe().unwrap();
        assert_eq!(rows.len(), CacheCategory::ALL.len());

        let photos = rows.iter().find(|r| r.name == "room_photos").unwrap();
        assert_eq!(photos.prefix, "room:photos");
        assert_eq!(photos.key_format, "room:photos:{room_id}");
        assert_eq!(photos.pattern, "room:photos:*");
        assert_eq!(photos.ttl_secs, Some(86400));
        assert_eq!(photos.priority, Some(Priority::Low));
        assert_eq!(photos.priority_ordinal, Some(3));
    }

    #[test]
    fn test_describe_json() {
        let registry = KeyNamingRegistry::new();
        let json: serde_json::Value =
            serde_json::from_str(&registry.describe_json().unwrap()).unwrap();
        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), CacheCategory::ALL.len());

        let amenity = rows.iter().find(|r| r["name"] == "amenity_details").unwrap();
        assert!(amenity["ttl_secs"].is_null());
        assert!(amenity["priority_ordinal"].is_null());
    }
}
