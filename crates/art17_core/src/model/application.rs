//! Contact-form application model.
//!
//! # Invariants
//! - Applications are only appended; removal happens through age pruning.
//! - Unknown persisted status values load as `New`.

use crate::model::id::{deserialize_entity_id, EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Source recorded for applications submitted through the public site.
pub const WEBSITE_SOURCE: &str = "website";

/// Processing state of an application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApplicationStatus {
    #[default]
    New,
    Processed,
    Completed,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 3] = [Self::New, Self::Processed, Self::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Processed => "processed",
            Self::Completed => "completed",
        }
    }

    /// Russian label shown in the admin table.
    pub fn label(self) -> &'static str {
        match self {
            Self::New => "Новая",
            Self::Processed => "В работе",
            Self::Completed => "Завершена",
        }
    }
}

impl From<String> for ApplicationStatus {
    fn from(value: String) -> Self {
        match value.trim() {
            "processed" => Self::Processed,
            "completed" => Self::Completed,
            _ => Self::New,
        }
    }
}

impl From<ApplicationStatus> for String {
    fn from(value: ApplicationStatus) -> Self {
        value.as_str().to_string()
    }
}

/// One inbound request from the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(deserialize_with = "deserialize_entity_id")]
    pub id: EntityId,
    pub date: DateTime<Utc>,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    /// Product category or service the visitor asked about.
    #[serde(default, alias = "category")]
    pub interest: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub source: String,
}

impl Application {
    /// Whether the application is older than `max_age` at `now`.
    pub fn is_older_than(&self, now: DateTime<Utc>, max_age: chrono::Duration) -> bool {
        now.signed_duration_since(self.date) > max_age
    }
}

/// Create input for an application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub interest: String,
    pub message: String,
    /// Empty source is recorded as `website`.
    pub source: String,
}

/// Partial update for an application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationPatch {
    pub status: Option<ApplicationStatus>,
}

#[cfg(test)]
mod tests {
    use super::{Application, ApplicationStatus};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn unknown_status_loads_as_new() {
        let json = r#"{"id":5,"date":"2024-05-01T10:00:00Z","name":"Анна","status":"archived"}"#;
        let application: Application = serde_json::from_str(json).unwrap();
        assert_eq!(application.status, ApplicationStatus::New);
    }

    #[test]
    fn status_serializes_as_lowercase_text() {
        let value = serde_json::to_value(ApplicationStatus::Processed).unwrap();
        assert_eq!(value, "processed");
    }

    #[test]
    fn category_alias_maps_to_interest() {
        let json = r#"{"id":6,"date":"2024-05-01T10:00:00Z","name":"Олег","category":"Горки"}"#;
        let application: Application = serde_json::from_str(json).unwrap();
        assert_eq!(application.interest, "Горки");
    }

    #[test]
    fn age_check_is_strict() {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let json = format!(r#"{{"id":7,"date":"{}","name":"Ира"}}"#, date.to_rfc3339());
        let application: Application = serde_json::from_str(&json).unwrap();

        assert!(!application.is_older_than(date + Duration::days(30), Duration::days(30)));
        assert!(application.is_older_than(
            date + Duration::days(30) + Duration::seconds(1),
            Duration::days(30)
        ));
    }
}
