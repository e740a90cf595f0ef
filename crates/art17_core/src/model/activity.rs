//! Recent-activity log entries shown on the dashboard.

use crate::model::id::{deserialize_entity_id, new_entity_id, EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ACTIVITY_ICON: &str = "fa-history";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(deserialize_with = "deserialize_entity_id")]
    pub id: EntityId,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default = "default_icon")]
    pub icon: String,
}

impl Activity {
    pub fn new(message: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: new_entity_id(),
            message: message.into(),
            timestamp,
            icon: default_icon(),
        }
    }
}

fn default_icon() -> String {
    DEFAULT_ACTIVITY_ICON.to_string()
}
