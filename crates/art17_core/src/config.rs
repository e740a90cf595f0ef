//! Store configuration.
//!
//! # Responsibility
//! - Name the storage keys each blob lives under.
//! - Hold the limits applied by the store (activity cap, retention, upload size).
//!
//! # Invariants
//! - Defaults match the keys written by the existing public site, so blobs
//!   stay readable by both sides.

use chrono::Duration;

const DEFAULT_ACTIVITY_LIMIT: usize = 10;
const DEFAULT_APPLICATION_RETENTION_DAYS: i64 = 30;
const DEFAULT_UPDATE_CHECK_DAYS: i64 = 7;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
const CORRUPT_BACKUP_SUFFIX: &str = ".corrupt";

/// Fixed key names for every persisted blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    /// Business data blob (`services` + `products`).
    pub business_data: String,
    pub images: String,
    pub settings: String,
    pub applications: String,
    /// Recent-activity log shown on the dashboard.
    pub activities: String,
    /// RFC 3339 marker of the last admin session start.
    pub last_update: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            business_data: "art17_admin_data".to_string(),
            images: "art17_images".to_string(),
            settings: "art17_settings".to_string(),
            applications: "art17_applications".to_string(),
            activities: "art17_activities".to_string(),
            last_update: "art17_last_update".to_string(),
        }
    }
}

impl StorageKeys {
    /// Keys removed by a factory reset. Applications and activity survive.
    pub fn factory_reset_keys(&self) -> [&str; 3] {
        [
            self.business_data.as_str(),
            self.images.as_str(),
            self.settings.as_str(),
        ]
    }

    /// Key that keeps the raw text of a blob that failed to parse.
    pub fn corrupt_backup(key: &str) -> String {
        format!("{key}{CORRUPT_BACKUP_SUFFIX}")
    }

    /// Every key the store owns. Corrupt-blob backups are not included.
    pub fn all(&self) -> [&str; 6] {
        [
            self.business_data.as_str(),
            self.images.as_str(),
            self.settings.as_str(),
            self.applications.as_str(),
            self.activities.as_str(),
            self.last_update.as_str(),
        ]
    }
}

/// Runtime configuration for `AdminStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub keys: StorageKeys,
    /// Maximum number of entries kept in the activity log.
    pub activity_limit: usize,
    /// Applications older than this are removed by pruning.
    pub application_retention: Duration,
    /// Interval after which `check_for_updates` recommends a refresh.
    pub update_check_interval: Duration,
    /// Upper bound for a single uploaded image, in bytes.
    pub max_upload_bytes: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            keys: StorageKeys::default(),
            activity_limit: DEFAULT_ACTIVITY_LIMIT,
            application_retention: Duration::days(DEFAULT_APPLICATION_RETENTION_DAYS),
            update_check_interval: Duration::days(DEFAULT_UPDATE_CHECK_DAYS),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
