//! Content core for the Art 17 site and its admin panel.
//! Owns the persisted blobs, entity CRUD, rendering and form rules.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod service;
pub mod storage;

pub use config::{StorageKeys, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::activity::Activity;
pub use model::application::{
    Application, ApplicationDraft, ApplicationPatch, ApplicationStatus,
};
pub use model::blob::BusinessData;
pub use model::id::{legacy_entity_id, new_entity_id, EntityId, EntityKind};
pub use model::image::{Image, ImageDraft, ImagePatch};
pub use model::product::{Product, ProductDraft, ProductPatch, ProductSpecs, ProductSpecsPatch};
pub use model::service::{Service, ServiceDraft, ServicePatch};
pub use model::settings::Settings;
pub use repo::admin_store::{AdminStore, CorruptBlob, DashboardStats, StoreError, StoreResult};
pub use repo::entity::{AdminState, BlobKind, Entity};
pub use service::forms::{
    submit_notice, ContactForm, FormError, FormOutcome, ProductForm, ServiceForm, SettingsForm,
};
pub use service::notice::{Notice, NoticeLevel};
pub use service::site::{ContentSource, FallbackError, SiteContent, SitePage};
pub use service::transfer::{ExportDocument, ImportSummary, TransferError, TransferKind};
pub use service::upload::{ImageUpload, UploadError};
pub use storage::{KeyValueStore, MemoryStore, SqliteKvStore, StorageError, StorageResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
