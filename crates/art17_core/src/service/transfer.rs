//! Export, backup and import of whole data sets.
//!
//! # Responsibility
//! - Build the export and backup documents from the current store.
//! - Replace store sections from an imported document.
//!
//! # Invariants
//! - An import that fails to parse changes nothing.
//! - Only sections present in the document are replaced.

use crate::model::application::Application;
use crate::model::blob::BusinessData;
use crate::model::image::Image;
use crate::model::settings::Settings;
use crate::repo::admin_store::{AdminStore, StoreError};
use crate::storage::KeyValueStore;
use chrono::{DateTime, NaiveDate, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const EXPORT_FORMAT_VERSION: &str = "1.0";

/// Document written by export and backup, read by import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Present on exports, absent on backups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub data: Option<BusinessData>,
    #[serde(default)]
    pub settings: Option<Settings>,
    #[serde(default)]
    pub images: Option<Vec<Image>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applications: Option<Vec<Application>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferKind {
    Export,
    Backup,
}

/// Sections replaced by an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub data: bool,
    pub images: bool,
    pub settings: bool,
    pub applications: bool,
}

#[derive(Debug)]
pub enum TransferError {
    Json(serde_json::Error),
    Store(StoreError),
}

impl Display for TransferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid JSON document: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for TransferError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Builds an export document; applications are optional.
pub fn export_document<S: KeyValueStore>(
    store: &AdminStore<S>,
    include_applications: bool,
    now: DateTime<Utc>,
) -> ExportDocument {
    ExportDocument {
        timestamp: Some(now),
        version: Some(EXPORT_FORMAT_VERSION.to_string()),
        data: Some(store.business_data().clone()),
        settings: Some(store.settings().clone()),
        images: Some(store.list::<Image>().to_vec()),
        applications: include_applications.then(|| store.list::<Application>().to_vec()),
    }
}

/// Builds a full backup document including applications.
pub fn backup_document<S: KeyValueStore>(
    store: &AdminStore<S>,
    now: DateTime<Utc>,
) -> ExportDocument {
    ExportDocument {
        version: None,
        ..export_document(store, true, now)
    }
}

/// Pretty-printed JSON for a download file.
pub fn to_pretty_json(document: &ExportDocument) -> Result<String, TransferError> {
    serde_json::to_string_pretty(document).map_err(TransferError::Json)
}

/// `art17-export-2024-05-01.json` / `art17-backup-2024-05-01.json`
pub fn file_name(kind: TransferKind, date: NaiveDate) -> String {
    let prefix = match kind {
        TransferKind::Export => "export",
        TransferKind::Backup => "backup",
    };
    format!("art17-{prefix}-{}.json", date.format("%Y-%m-%d"))
}

/// Parses `json` and replaces every section it carries.
///
/// # Errors
/// - `Json` when the document is not valid; the store is untouched.
/// - `Store` when a section fails to persist. That section is rolled back;
///   sections written before it stay imported.
pub fn import_json<S: KeyValueStore>(
    store: &mut AdminStore<S>,
    json: &str,
) -> Result<ImportSummary, TransferError> {
    let document: ExportDocument = serde_json::from_str(json).map_err(TransferError::Json)?;
    let mut summary = ImportSummary::default();

    if let Some(data) = document.data {
        store.replace_business_data(data)?;
        summary.data = true;
    }
    if let Some(images) = document.images {
        store.replace_all::<Image>(images)?;
        summary.images = true;
    }
    if let Some(settings) = document.settings {
        store.update_settings(settings)?;
        summary.settings = true;
    }
    if let Some(applications) = document.applications {
        store.replace_all::<Application>(applications)?;
        summary.applications = true;
    }

    info!(
        "event=import module=transfer status=ok data={} images={} settings={} applications={}",
        summary.data, summary.images, summary.settings, summary.applications
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::{file_name, TransferKind};
    use chrono::NaiveDate;

    #[test]
    fn file_names_carry_date() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(file_name(TransferKind::Export, date), "art17-export-2024-05-01.json");
        assert_eq!(file_name(TransferKind::Backup, date), "art17-backup-2024-05-01.json");
    }
}
