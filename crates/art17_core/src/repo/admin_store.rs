//! Explicit content store shared by the admin panel and renderers.
//!
//! # Responsibility
//! - Load every blob from a `KeyValueStore` on open, with per-blob defaults.
//! - Run generic create/update/delete over any `Entity`.
//! - Persist the owning blob after each mutation and keep the activity log.
//!
//! # Invariants
//! - A mutation whose blob write fails is reverted in memory, so memory and
//!   storage never diverge.
//! - An unparseable stored blob loads as defaults only after its raw text is
//!   copied to `<key>.corrupt`. When that copy fails the blob stays
//!   read-only until `clear_all` or `factory_reset`.
//! - The activity log holds at most `StoreConfig::activity_limit` entries,
//!   newest first.

use crate::config::{StorageKeys, StoreConfig};
use crate::model::activity::Activity;
use crate::model::application::{Application, ApplicationPatch, ApplicationStatus};
use crate::model::blob::BusinessData;
use crate::model::id::{new_entity_id, EntityId, EntityKind};
use crate::model::image::{default_images, Image};
use crate::model::product::Product;
use crate::model::settings::Settings;
use crate::repo::entity::{
    AdminState, BlobKind, DraftContext, Entity, EntityAction, InsertPosition,
};
use crate::storage::{KeyValueStore, StorageError};
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::mem;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error raised by `AdminStore` operations.
#[derive(Debug)]
pub enum StoreError {
    NotFound(EntityKind, EntityId),
    /// The stored blob failed to parse and could not be backed up.
    ReadOnlyBlob(BlobKind),
    Serialization(serde_json::Error),
    Storage(StorageError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(kind, id) => write!(f, "{kind} not found: {id}"),
            Self::ReadOnlyBlob(blob) => write!(
                f,
                "stored {} blob is unreadable; writes are blocked until reset",
                blob.as_str()
            ),
            Self::Serialization(err) => write!(f, "failed to serialize blob: {err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(..) | Self::ReadOnlyBlob(_) => None,
            Self::Serialization(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Counters shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub services: usize,
    pub products: usize,
    pub portfolio: usize,
    pub new_applications: usize,
    pub total_applications: usize,
}

/// A stored blob that failed to parse on load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorruptBlob {
    pub blob: BlobKind,
    pub key: String,
    /// Key holding the raw text, `None` when the copy failed.
    pub backup_key: Option<String>,
}

impl CorruptBlob {
    /// Without a backup the blob must not be overwritten.
    pub fn is_read_only(&self) -> bool {
        self.backup_key.is_none()
    }
}

/// Content store over a key-value backend.
///
/// Created with `open`, released with `close`, which hands the backend back.
pub struct AdminStore<S: KeyValueStore> {
    kv: S,
    config: StoreConfig,
    state: AdminState,
    activities: Vec<Activity>,
    corrupt: Vec<CorruptBlob>,
}

impl<S: KeyValueStore> AdminStore<S> {
    /// Opens a store with default keys and limits.
    pub fn open(kv: S) -> StoreResult<Self> {
        Self::open_with_config(kv, StoreConfig::default())
    }

    /// Opens a store and loads every blob.
    ///
    /// # Errors
    /// - Returns `Storage` when the backend cannot be read. Corrupt blobs are
    ///   not errors; they load as defaults and are listed by `corrupt_blobs`.
    pub fn open_with_config(mut kv: S, config: StoreConfig) -> StoreResult<Self> {
        let loaded = load_state(&mut kv, &config)?;
        info!(
            "event=store_open module=store status=ok services={} products={} images={} applications={} corrupt={}",
            loaded.state.data.services.len(),
            loaded.state.data.products.len(),
            loaded.state.images.len(),
            loaded.state.applications.len(),
            loaded.corrupt.len()
        );
        Ok(Self {
            kv,
            config,
            state: loaded.state,
            activities: loaded.activities,
            corrupt: loaded.corrupt,
        })
    }

    /// Releases the store and returns the backend.
    pub fn close(self) -> S {
        info!("event=store_close module=store status=ok");
        self.kv
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn backend(&self) -> &S {
        &self.kv
    }

    pub fn state(&self) -> &AdminState {
        &self.state
    }

    pub fn business_data(&self) -> &BusinessData {
        &self.state.data
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    /// Blobs that failed to parse on the last load.
    pub fn corrupt_blobs(&self) -> &[CorruptBlob] {
        &self.corrupt
    }

    /// Newest first.
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Products flagged for the portfolio.
    pub fn portfolio(&self) -> impl Iterator<Item = &Product> {
        self.state.data.portfolio()
    }

    pub fn list<E: Entity>(&self) -> &[E] {
        E::items(&self.state)
    }

    pub fn get<E: Entity>(&self, id: EntityId) -> Option<&E> {
        E::items(&self.state).iter().find(|record| record.id() == id)
    }

    /// Creates a record with a fresh id and persists its blob.
    pub fn create<E: Entity>(&mut self, draft: E::Draft) -> StoreResult<E> {
        let items = E::items(&self.state);
        let ctx = DraftContext {
            now: Utc::now(),
            existing: items.len(),
        };
        let snapshot = items.clone();
        let record = E::from_draft(new_entity_id(), draft, &ctx);

        let items = E::items_mut(&mut self.state);
        match E::INSERT_POSITION {
            InsertPosition::Back => items.push(record.clone()),
            InsertPosition::Front => items.insert(0, record.clone()),
        }
        self.commit::<E>(snapshot, "create")?;

        info!(
            "event=entity_create module=store status=ok kind={} id={}",
            E::KIND,
            record.id()
        );
        self.record_activity::<E>(EntityAction::Created, record.label());
        Ok(record)
    }

    /// Merges `patch` into the record with `id` and persists its blob.
    ///
    /// # Errors
    /// - `NotFound` when no record has `id`; the list is left untouched.
    pub fn update<E: Entity>(&mut self, id: EntityId, patch: E::Patch) -> StoreResult<E> {
        let index = self.position::<E>(id, "update")?;
        let snapshot = E::items(&self.state).clone();

        let updated = {
            let record = &mut E::items_mut(&mut self.state)[index];
            record.apply_patch(patch);
            record.clone()
        };
        self.commit::<E>(snapshot, "update")?;

        info!(
            "event=entity_update module=store status=ok kind={} id={id}",
            E::KIND
        );
        self.record_activity::<E>(EntityAction::Updated, updated.label());
        Ok(updated)
    }

    /// Removes the record with `id` and returns it.
    ///
    /// # Errors
    /// - `NotFound` when no record has `id`, including a repeated delete.
    pub fn delete<E: Entity>(&mut self, id: EntityId) -> StoreResult<E> {
        let index = self.position::<E>(id, "delete")?;
        let snapshot = E::items(&self.state).clone();

        let removed = E::items_mut(&mut self.state).remove(index);
        self.commit::<E>(snapshot, "delete")?;

        info!(
            "event=entity_delete module=store status=ok kind={} id={id}",
            E::KIND
        );
        self.record_activity::<E>(EntityAction::Deleted, removed.label());
        Ok(removed)
    }

    /// Replaces the whole list of one entity kind (import path).
    pub fn replace_all<E: Entity>(&mut self, records: Vec<E>) -> StoreResult<()> {
        let snapshot = mem::replace(E::items_mut(&mut self.state), records);
        self.commit::<E>(snapshot, "replace")
    }

    /// Replaces services and products in one blob write.
    pub fn replace_business_data(&mut self, data: BusinessData) -> StoreResult<()> {
        let previous = mem::replace(&mut self.state.data, data);
        if let Err(err) = self.persist(BlobKind::BusinessData) {
            self.state.data = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Stores new settings; the previous settings are kept if the write fails.
    pub fn update_settings(&mut self, settings: Settings) -> StoreResult<()> {
        let previous = mem::replace(&mut self.state.settings, settings);
        if let Err(err) = self.persist(BlobKind::Settings) {
            self.state.settings = previous;
            return Err(err);
        }
        info!("event=settings_update module=store status=ok");
        Ok(())
    }

    /// Restores and persists the factory settings.
    pub fn reset_settings(&mut self) -> StoreResult<()> {
        self.update_settings(Settings::default())
    }

    pub fn set_application_status(
        &mut self,
        id: EntityId,
        status: ApplicationStatus,
    ) -> StoreResult<Application> {
        self.update::<Application>(
            id,
            ApplicationPatch {
                status: Some(status),
            },
        )
    }

    /// Drops applications older than the configured retention at `now`.
    ///
    /// Returns the number of removed applications.
    pub fn prune_applications(&mut self, now: DateTime<Utc>) -> StoreResult<usize> {
        let retention = self.config.application_retention;
        let snapshot = self.state.applications.clone();
        self.state
            .applications
            .retain(|application| !application.is_older_than(now, retention));

        let removed = snapshot.len() - self.state.applications.len();
        if removed == 0 {
            return Ok(0);
        }
        self.commit::<Application>(snapshot, "prune")?;

        info!("event=applications_prune module=store status=ok removed={removed}");
        Ok(removed)
    }

    /// Prepends one entry to the activity log and trims it to the limit.
    pub fn log_activity(&mut self, message: impl Into<String>) -> StoreResult<()> {
        let snapshot = self.activities.clone();
        self.activities.insert(0, Activity::new(message, Utc::now()));
        self.activities.truncate(self.config.activity_limit);

        if let Err(err) = self.persist(BlobKind::Activities) {
            self.activities = snapshot;
            return Err(err);
        }
        Ok(())
    }

    pub fn stats(&self) -> DashboardStats {
        let applications = &self.state.applications;
        DashboardStats {
            services: self.state.data.services.len(),
            products: self.state.data.products.len(),
            portfolio: self.portfolio().count(),
            new_applications: applications
                .iter()
                .filter(|application| application.status == ApplicationStatus::New)
                .count(),
            total_applications: applications.len(),
        }
    }

    /// Writes every blob back to the backend. Read-only blobs are skipped.
    pub fn save_all(&mut self) -> StoreResult<()> {
        let mut skipped = 0;
        for blob in [
            BlobKind::BusinessData,
            BlobKind::Images,
            BlobKind::Applications,
            BlobKind::Settings,
            BlobKind::Activities,
        ] {
            if self.is_read_only(blob) {
                skipped += 1;
                continue;
            }
            self.persist(blob)?;
        }
        info!("event=store_save_all module=store status=ok skipped={skipped}");
        Ok(())
    }

    /// Removes every key owned by the store and reloads defaults.
    pub fn clear_all(&mut self) -> StoreResult<()> {
        let keys: Vec<String> = self
            .config
            .keys
            .all()
            .iter()
            .map(|key| key.to_string())
            .collect();
        self.remove_keys_and_reload(&keys, "clear_all")
    }

    /// Removes business data, images and settings, then reloads defaults.
    ///
    /// Applications and the activity log are kept.
    pub fn factory_reset(&mut self) -> StoreResult<()> {
        let keys: Vec<String> = self
            .config
            .keys
            .factory_reset_keys()
            .iter()
            .map(|key| key.to_string())
            .collect();
        self.remove_keys_and_reload(&keys, "factory_reset")
    }

    /// Re-reads every blob from the backend, discarding in-memory state.
    pub fn reload(&mut self) -> StoreResult<()> {
        let loaded = load_state(&mut self.kv, &self.config)?;
        self.state = loaded.state;
        self.activities = loaded.activities;
        self.corrupt = loaded.corrupt;
        Ok(())
    }

    /// Records `now` as the last admin session and reports whether the
    /// previous one is missing or older than the update-check interval.
    pub fn check_for_updates(&mut self, now: DateTime<Utc>) -> StoreResult<bool> {
        let key = &self.config.keys.last_update;
        let stale = match self.kv.get(key)? {
            Some(raw) => DateTime::parse_from_rfc3339(raw.trim())
                .map(|last| {
                    now.signed_duration_since(last.with_timezone(&Utc))
                        > self.config.update_check_interval
                })
                .unwrap_or(true),
            None => true,
        };
        self.kv.set(key, &now.to_rfc3339())?;

        if stale {
            info!("event=update_check module=store status=stale");
        }
        Ok(stale)
    }

    fn remove_keys_and_reload(&mut self, keys: &[String], event: &'static str) -> StoreResult<()> {
        let removed = keys
            .iter()
            .try_for_each(|key| self.kv.remove(key).map_err(StoreError::from));
        self.reload()?;

        match removed {
            Ok(()) => {
                info!("event={event} module=store status=ok keys={}", keys.len());
                Ok(())
            }
            Err(err) => {
                error!("event={event} module=store status=error error={err}");
                Err(err)
            }
        }
    }

    fn position<E: Entity>(&self, id: EntityId, op: &'static str) -> StoreResult<usize> {
        E::items(&self.state)
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| {
                warn!(
                    "event=entity_{op} module=store status=not_found kind={} id={id}",
                    E::KIND
                );
                StoreError::NotFound(E::KIND, id)
            })
    }

    fn commit<E: Entity>(&mut self, snapshot: Vec<E>, op: &'static str) -> StoreResult<()> {
        if let Err(err) = self.persist(E::BLOB) {
            *E::items_mut(&mut self.state) = snapshot;
            error!(
                "event=entity_{op} module=store status=error kind={} error_code=persist_failed_rolled_back error={err}",
                E::KIND
            );
            return Err(err);
        }
        Ok(())
    }

    fn record_activity<E: Entity>(&mut self, action: EntityAction, label: &str) {
        let Some(message) = E::activity_message(action, label) else {
            return;
        };
        if let Err(err) = self.log_activity(message) {
            warn!("event=activity_log module=store status=error error={err}");
        }
    }

    fn is_read_only(&self, blob: BlobKind) -> bool {
        self.corrupt
            .iter()
            .any(|corrupt| corrupt.blob == blob && corrupt.is_read_only())
    }

    fn persist(&mut self, blob: BlobKind) -> StoreResult<()> {
        if self.is_read_only(blob) {
            warn!(
                "event=blob_save module=store status=blocked blob={} error_code=read_only_blob",
                blob.as_str()
            );
            return Err(StoreError::ReadOnlyBlob(blob));
        }

        let keys = &self.config.keys;
        let result = match blob {
            BlobKind::BusinessData => {
                write_blob(&mut self.kv, &keys.business_data, &self.state.data)
            }
            BlobKind::Images => write_blob(&mut self.kv, &keys.images, &self.state.images),
            BlobKind::Applications => {
                write_blob(&mut self.kv, &keys.applications, &self.state.applications)
            }
            BlobKind::Settings => write_blob(&mut self.kv, &keys.settings, &self.state.settings),
            BlobKind::Activities => write_blob(&mut self.kv, &keys.activities, &self.activities),
        };

        match &result {
            Ok(bytes) => debug!(
                "event=blob_save module=store status=ok blob={} bytes={bytes}",
                blob.as_str()
            ),
            Err(err) => error!(
                "event=blob_save module=store status=error blob={} error={err}",
                blob.as_str()
            ),
        }
        result.map(|_| ())
    }
}

struct LoadedState {
    state: AdminState,
    activities: Vec<Activity>,
    corrupt: Vec<CorruptBlob>,
}

fn load_state<S: KeyValueStore>(kv: &mut S, config: &StoreConfig) -> StoreResult<LoadedState> {
    let keys = &config.keys;
    let mut corrupt = Vec::new();

    let state = AdminState {
        data: load_blob(kv, BlobKind::BusinessData, &keys.business_data, &mut corrupt)?
            .unwrap_or_default(),
        images: load_blob(kv, BlobKind::Images, &keys.images, &mut corrupt)?
            .unwrap_or_else(|| default_images(Utc::now())),
        applications: load_blob(kv, BlobKind::Applications, &keys.applications, &mut corrupt)?
            .unwrap_or_default(),
        settings: load_blob(kv, BlobKind::Settings, &keys.settings, &mut corrupt)?
            .unwrap_or_default(),
    };
    let activities = load_blob(kv, BlobKind::Activities, &keys.activities, &mut corrupt)?
        .unwrap_or_default();

    Ok(LoadedState {
        state,
        activities,
        corrupt,
    })
}

/// Reads one blob for the store.
///
/// A blob that does not parse is recorded in `corrupt` and its text copied
/// to the backup key; `None` is returned so the caller falls back to defaults.
fn load_blob<T: DeserializeOwned, S: KeyValueStore>(
    kv: &mut S,
    blob: BlobKind,
    key: &str,
    corrupt: &mut Vec<CorruptBlob>,
) -> StoreResult<Option<T>> {
    let Some(raw) = kv.get(key)? else {
        debug!("event=blob_load module=store status=missing key={key}");
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            warn!(
                "event=blob_load module=store status=error key={key} error_code=blob_parse_failed error={err}"
            );
            corrupt.push(CorruptBlob {
                blob,
                key: key.to_string(),
                backup_key: back_up_corrupt(kv, key, &raw),
            });
            Ok(None)
        }
    }
}

/// Copies `raw` to the backup key unless a different backup already sits there.
fn back_up_corrupt<S: KeyValueStore>(kv: &mut S, key: &str, raw: &str) -> Option<String> {
    let backup_key = StorageKeys::corrupt_backup(key);
    match kv.get(&backup_key) {
        Ok(Some(existing)) if existing == raw => return Some(backup_key),
        Ok(Some(_)) => {
            warn!(
                "event=blob_backup module=store status=skipped key={key} backup={backup_key} error_code=backup_exists"
            );
            return None;
        }
        Ok(None) => {}
        Err(err) => {
            error!("event=blob_backup module=store status=error key={key} error={err}");
            return None;
        }
    }

    match kv.set(&backup_key, raw) {
        Ok(()) => {
            warn!("event=blob_backup module=store status=ok key={key} backup={backup_key}");
            Some(backup_key)
        }
        Err(err) => {
            error!(
                "event=blob_backup module=store status=error key={key} backup={backup_key} error={err}"
            );
            None
        }
    }
}

/// Reads and parses one blob without side effects. Missing and corrupt
/// blobs yield `None`.
pub(crate) fn read_blob<T: DeserializeOwned, S: KeyValueStore + ?Sized>(
    kv: &S,
    key: &str,
) -> StoreResult<Option<T>> {
    let Some(raw) = kv.get(key)? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            warn!(
                "event=blob_load module=store status=error key={key} error_code=blob_parse_failed error={err}"
            );
            Ok(None)
        }
    }
}

fn write_blob<S: KeyValueStore, T: Serialize + ?Sized>(
    kv: &mut S,
    key: &str,
    value: &T,
) -> StoreResult<usize> {
    let json = serde_json::to_string(value)?;
    kv.set(key, &json)?;
    Ok(json.len())
}
