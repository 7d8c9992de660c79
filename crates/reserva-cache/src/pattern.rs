//! Wildcard patterns for bulk scans and invalidation
//!
//! A [`KeyPattern`] is the glob string handed to the store (`SCAN MATCH`)
//! together with a compiled matcher, so callers and tests can check which
//! keys a pattern covers without a live backend.

use glob::Pattern;
use reserva_core::{AppError, AppResult};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::attributes::{self, SegmentKind};
use crate::category::CacheCategory;
use crate::keys::{DELIMITER, WILDCARD};

/// Leading identifier a pattern is scoped to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartialKey {
    /// Every key of the category
    All,
    /// Keys whose first segment is this id
    Id(i64),
    /// Keys whose first segment is this country code
    Country(String),
}

/// Glob pattern over cache keys
#[derive(Clone)]
pub struct KeyPattern {
    raw: String,
    compiled: Pattern,
}

impl KeyPattern {
    pub(crate) fn compile(raw: String) -> AppResult<Self> {
        let compiled =
            Pattern::new(&raw).map_err(|e| AppError::InvalidPattern(format!("{}: {}", raw, e)))?;
        Ok(Self { raw, compiled })
    }

    /// The pattern string as sent to the store
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn into_string(self) -> String {
        self.raw
    }

    /// Whether `key` is covered by this pattern
    pub fn matches(&self, key: &str) -> bool {
        self.compiled.matches(key)
    }

    /// True when the pattern names a single key
    pub fn is_exact(&self) -> bool {
        !self.raw.contains(WILDCARD)
    }
}

impl fmt::Debug for KeyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("KeyPattern").field(&self.raw).finish()
    }
}

impl fmt::Display for KeyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for KeyPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for KeyPattern {}

impl PartialEq<&str> for KeyPattern {
    fn eq(&self, other: &&str) -> bool {
        self.raw == *other
    }
}

impl Serialize for KeyPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// Build the pattern covering `category` for a partial identifier
///
/// `All` yields `{prefix}:*`. An id or country binds the first segment and
/// yields `{prefix}:{value}:*`, or the exact key when the category has no
/// further segments.
pub fn build_pattern(category: CacheCategory, partial: &PartialKey) -> AppResult<KeyPattern> {
    let prefix = category.prefix();
    let segments = category.segments();

    let leading = match partial {
        PartialKey::All => {
            return KeyPattern::compile(format!("{}{}{}", prefix, DELIMITER, WILDCARD));
        }
        PartialKey::Id(id) => match segments.first() {
            Some(segment) if segment.kind == SegmentKind::Id => {
                attributes::render_id(category.name(), segment.name, *id)?
            }
            _ => return Err(mismatch(category, "an id")),
        },
        PartialKey::Country(code) => match segments.first() {
            Some(segment) if segment.kind == SegmentKind::Country => {
                attributes::render_country(category.name(), code)?
            }
            _ => return Err(mismatch(category, "a country")),
        },
    };

    let raw = if segments.len() == 1 {
        format!("{}{}{}", prefix, DELIMITER, leading)
    } else {
        format!(
            "{}{}{}{}{}",
            prefix, DELIMITER, leading, DELIMITER, WILDCARD
        )
    };
    KeyPattern::compile(raw)
}

fn mismatch(category: CacheCategory, given: &str) -> AppError {
    let expected = category
        .segments()
        .first()
        .map(|s| s.name)
        .unwrap_or("nothing");
    AppError::invalid_attribute(
        category.name(),
        format!("pattern scoped by {} but keys start with {}", given, expected),
    )
}
