//! Cache key naming for Reserva
//!
//! Pure mapping from booking-domain identifiers to cache keys, wildcard
//! patterns, TTLs and eviction priorities. Nothing here talks to a cache
//! store; the caching client consumes these values.
//!
//! # Features
//!
//! - One [`CacheCategory`] per kind of cached data, each with a unique prefix
//! - Deterministic, validated key construction (`room:calendar:42:2024-03`)
//! - Glob patterns for bulk invalidation that never cross categories
//! - TTL and priority tables, overridable from configuration
//!
//! # Example
//!
//! ```
//! use reserva_cache::{default_registry, CacheCategory, KeyAttribute, PartialKey};
//!
//! let registry = default_registry();
//!
//! let key = registry
//!     .key_for(
//!         CacheCategory::RoomAvailability,
//!         &[KeyAttribute::Id(42), KeyAttribute::Token("20240601-20240605".into())],
//!     )
//!     .unwrap();
//! let pattern = registry
//!     .pattern_for(CacheCategory::RoomAvailability, &PartialKey::Id(42))
//!     .unwrap();
//!
//! assert_eq!(pattern.as_str(), "room:availability:42:*");
//! assert!(pattern.matches(&key));
//! assert_eq!(registry.ttl_for(CacheCategory::RoomPhotos).unwrap(), 86400);
//! ```

pub mod attributes;
pub mod category;
pub mod keys;
pub mod pattern;
pub mod priority;
pub mod registry;
pub mod ttl;

use once_cell::sync::Lazy;

pub use attributes::KeyAttribute;
pub use category::CacheCategory;
pub use pattern::{KeyPattern, PartialKey};
pub use priority::Priority;
pub use registry::{CacheEntry, CategoryInfo, KeyNamingRegistry};

static DEFAULT_REGISTRY: Lazy<KeyNamingRegistry> = Lazy::new(KeyNamingRegistry::new);

/// Process-wide registry with the built-in tables
pub fn default_registry() -> &'static KeyNamingRegistry {
    &DEFAULT_REGISTRY
}
