//! Entity identifiers.
//!
//! # Invariants
//! - New ids are random UUID v4 values and are never derived from clocks.
//! - Ids are always serialized as hyphenated UUID strings.
//! - Legacy integer ids map to the same UUID on every load.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every list record.
pub type EntityId = Uuid;

/// Generates a fresh identifier for a new record.
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4()
}

/// Maps a legacy millisecond-timestamp id onto a UUID.
///
/// Older blobs store ids as JSON integers. The mapping is deterministic so
/// references to those records stay valid across reloads.
pub fn legacy_entity_id(value: u64) -> EntityId {
    Uuid::from_u64_pair(0, value)
}

/// Deserializes an id from a UUID string or a legacy integer.
pub fn deserialize_entity_id<'de, D>(deserializer: D) -> Result<EntityId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(value) => Ok(legacy_entity_id(value)),
        RawId::Text(text) => match Uuid::parse_str(text.trim()) {
            Ok(id) => Ok(id),
            Err(err) => text
                .trim()
                .parse::<u64>()
                .map(legacy_entity_id)
                .map_err(|_| D::Error::custom(format!("invalid entity id `{text}`: {err}"))),
        },
    }
}

/// Record families managed by the generic entity store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Service,
    Product,
    Image,
    Application,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Product => "product",
            Self::Image => "image",
            Self::Application => "application",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
