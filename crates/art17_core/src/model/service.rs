//! Service offering model.
//!
//! # Invariants
//! - `features` never contains blank entries.
//! - `price` is free-form display text (`от 5000 ₽`), never parsed.

use crate::model::id::{deserialize_entity_id, EntityId};
use serde::{Deserialize, Serialize};

/// Icon shown when a service has none configured.
pub const DEFAULT_SERVICE_ICON: &str = "fa-paint-brush";

/// One service card on the public site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(deserialize_with = "deserialize_entity_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    /// Font Awesome class name, e.g. `fa-tools`.
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Service {
    /// Icon class used for display, falling back to the default icon.
    pub fn display_icon(&self) -> &str {
        if self.icon.trim().is_empty() {
            DEFAULT_SERVICE_ICON
        } else {
            self.icon.as_str()
        }
    }
}

/// Create input for a service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceDraft {
    pub name: String,
    pub description: String,
    pub price: String,
    pub icon: String,
    /// Newline-separated feature list as typed in the form.
    pub features_text: String,
}

/// Partial update for a service. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServicePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub icon: Option<String>,
    /// Re-split into `features` when non-empty; an empty text keeps the
    /// current list.
    pub features_text: Option<String>,
}

/// Splits a newline-separated text blob into trimmed, non-blank features.
pub fn split_features(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{split_features, Service, DEFAULT_SERVICE_ICON};
    use crate::model::id::new_entity_id;

    #[test]
    fn split_features_drops_blank_lines() {
        let features = split_features("Замер\n\n  Доставка  \r\nМонтаж\n   ");
        assert_eq!(features, vec!["Замер", "Доставка", "Монтаж"]);
    }

    #[test]
    fn split_features_of_empty_text_is_empty() {
        assert!(split_features("").is_empty());
    }

    #[test]
    fn display_icon_falls_back_to_default() {
        let mut service = Service {
            id: new_entity_id(),
            name: "Монтаж".to_string(),
            description: String::new(),
            price: String::new(),
            icon: " ".to_string(),
            features: Vec::new(),
        };
        assert_eq!(service.display_icon(), DEFAULT_SERVICE_ICON);

        service.icon = "fa-tools".to_string();
        assert_eq!(service.display_icon(), "fa-tools");
    }

    #[test]
    fn missing_optional_fields_default_on_load() {
        let json = r#"{"id":1700000000001,"name":"Дизайн"}"#;
        let service: Service = serde_json::from_str(json).unwrap();
        assert_eq!(service.name, "Дизайн");
        assert!(service.features.is_empty());
        assert!(service.icon.is_empty());
    }
}
