//! Generic entity contract for list-shaped records.
//!
//! # Responsibility
//! - Describe, per record type, how a draft becomes a record, how a patch
//!   merges into it, and which blob owns the list.
//! - Let `AdminStore` run one CRUD implementation for every record type.
//!
//! # Invariants
//! - `from_draft` never reuses an id; the store passes a fresh one.
//! - `apply_patch` only touches fields the patch carries.

use crate::model::application::{
    Application, ApplicationDraft, ApplicationPatch, ApplicationStatus, WEBSITE_SOURCE,
};
use crate::model::blob::BusinessData;
use crate::model::id::{EntityId, EntityKind};
use crate::model::image::{default_image_name, Image, ImageDraft, ImagePatch};
use crate::model::product::{Product, ProductDraft, ProductPatch};
use crate::model::service::{split_features, Service, ServiceDraft, ServicePatch};
use crate::model::settings::Settings;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Storage blob a record list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlobKind {
    /// `services` + `products`.
    BusinessData,
    Images,
    Applications,
    Settings,
    Activities,
}

impl BlobKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BusinessData => "business_data",
            Self::Images => "images",
            Self::Applications => "applications",
            Self::Settings => "settings",
            Self::Activities => "activities",
        }
    }
}

/// Mutation kinds reported to the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityAction {
    Created,
    Updated,
    Deleted,
}

/// Where a newly created record is placed in its list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    Back,
    Front,
}

/// Values available while turning a draft into a record.
#[derive(Debug, Clone, Copy)]
pub struct DraftContext {
    pub now: DateTime<Utc>,
    /// Number of records of this kind before the insert.
    pub existing: usize,
}

/// In-memory state held by `AdminStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminState {
    pub data: BusinessData,
    pub images: Vec<Image>,
    pub applications: Vec<Application>,
    pub settings: Settings,
}

/// A record type managed by the generic entity store.
pub trait Entity: Clone + Debug + Serialize + DeserializeOwned {
    type Draft;
    type Patch;

    const KIND: EntityKind;
    const BLOB: BlobKind;
    const INSERT_POSITION: InsertPosition = InsertPosition::Back;

    fn from_draft(id: EntityId, draft: Self::Draft, ctx: &DraftContext) -> Self;
    fn id(&self) -> EntityId;
    /// Human-readable name used in logs and activity messages.
    fn label(&self) -> &str;
    fn apply_patch(&mut self, patch: Self::Patch);

    fn items(state: &AdminState) -> &Vec<Self>;
    fn items_mut(state: &mut AdminState) -> &mut Vec<Self>;

    /// Activity log line for a mutation, `None` when the kind is not logged.
    fn activity_message(_action: EntityAction, _label: &str) -> Option<String> {
        None
    }
}

impl Entity for Service {
    type Draft = ServiceDraft;
    type Patch = ServicePatch;

    const KIND: EntityKind = EntityKind::Service;
    const BLOB: BlobKind = BlobKind::BusinessData;

    fn from_draft(id: EntityId, draft: ServiceDraft, _ctx: &DraftContext) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            icon: draft.icon,
            features: split_features(&draft.features_text),
        }
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn apply_patch(&mut self, patch: ServicePatch) {
        merge(&mut self.name, patch.name);
        merge(&mut self.description, patch.description);
        merge(&mut self.price, patch.price);
        merge(&mut self.icon, patch.icon);
        if let Some(text) = patch.features_text {
            if !text.trim().is_empty() {
                self.features = split_features(&text);
            }
        }
    }

    fn items(state: &AdminState) -> &Vec<Self> {
        &state.data.services
    }

    fn items_mut(state: &mut AdminState) -> &mut Vec<Self> {
        &mut state.data.services
    }

    fn activity_message(action: EntityAction, label: &str) -> Option<String> {
        let verb = match action {
            EntityAction::Created => "Добавлена",
            EntityAction::Updated => "Обновлена",
            EntityAction::Deleted => "Удалена",
        };
        Some(format!("{verb} услуга: {label}"))
    }
}

impl Entity for Product {
    type Draft = ProductDraft;
    type Patch = ProductPatch;

    const KIND: EntityKind = EntityKind::Product;
    const BLOB: BlobKind = BlobKind::BusinessData;

    fn from_draft(id: EntityId, draft: ProductDraft, _ctx: &DraftContext) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            category: draft.category,
            image: draft.image,
            location: draft.location,
            specs: draft.specs,
            show_in_portfolio: draft.show_in_portfolio,
        }
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn apply_patch(&mut self, patch: ProductPatch) {
        merge(&mut self.name, patch.name);
        merge(&mut self.description, patch.description);
        merge(&mut self.price, patch.price);
        merge(&mut self.category, patch.category);
        merge(&mut self.image, patch.image);
        merge(&mut self.location, patch.location);
        patch.specs.apply_to(&mut self.specs);
        if let Some(flag) = patch.show_in_portfolio {
            self.show_in_portfolio = flag;
        }
    }

    fn items(state: &AdminState) -> &Vec<Self> {
        &state.data.products
    }

    fn items_mut(state: &mut AdminState) -> &mut Vec<Self> {
        &mut state.data.products
    }

    fn activity_message(action: EntityAction, label: &str) -> Option<String> {
        let verb = match action {
            EntityAction::Created => "Добавлен",
            EntityAction::Updated => "Обновлен",
            EntityAction::Deleted => "Удален",
        };
        Some(format!("{verb} товар: {label}"))
    }
}

impl Entity for Image {
    type Draft = ImageDraft;
    type Patch = ImagePatch;

    const KIND: EntityKind = EntityKind::Image;
    const BLOB: BlobKind = BlobKind::Images;
    const INSERT_POSITION: InsertPosition = InsertPosition::Front;

    fn from_draft(id: EntityId, draft: ImageDraft, ctx: &DraftContext) -> Self {
        let name = draft
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| default_image_name(ctx.existing + 1));
        Self {
            id,
            url: draft.url,
            name,
            uploaded_at: ctx.now,
        }
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn apply_patch(&mut self, patch: ImagePatch) {
        merge(&mut self.url, patch.url);
        merge(&mut self.name, patch.name);
    }

    fn items(state: &AdminState) -> &Vec<Self> {
        &state.images
    }

    fn items_mut(state: &mut AdminState) -> &mut Vec<Self> {
        &mut state.images
    }
}

impl Entity for Application {
    type Draft = ApplicationDraft;
    type Patch = ApplicationPatch;

    const KIND: EntityKind = EntityKind::Application;
    const BLOB: BlobKind = BlobKind::Applications;

    fn from_draft(id: EntityId, draft: ApplicationDraft, ctx: &DraftContext) -> Self {
        let source = if draft.source.trim().is_empty() {
            WEBSITE_SOURCE.to_string()
        } else {
            draft.source
        };
        Self {
            id,
            date: ctx.now,
            name: draft.name,
            phone: draft.phone,
            email: draft.email,
            interest: draft.interest,
            message: draft.message,
            status: ApplicationStatus::New,
            source,
        }
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn apply_patch(&mut self, patch: ApplicationPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
    }

    fn items(state: &AdminState) -> &Vec<Self> {
        &state.applications
    }

    fn items_mut(state: &mut AdminState) -> &mut Vec<Self> {
        &mut state.applications
    }
}

fn merge(target: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *target = value;
    }
}

#[cfg(test)]
mod tests {
    use super::{DraftContext, Entity, EntityAction};
    use crate::model::id::new_entity_id;
    use crate::model::image::{Image, ImageDraft};
    use crate::model::service::{Service, ServiceDraft, ServicePatch};
    use chrono::Utc;

    fn ctx(existing: usize) -> DraftContext {
        DraftContext {
            now: Utc::now(),
            existing,
        }
    }

    #[test]
    fn service_patch_keeps_features_for_blank_text() {
        let draft = ServiceDraft {
            name: "Монтаж".to_string(),
            features_text: "Выезд\nУстановка".to_string(),
            ..ServiceDraft::default()
        };
        let mut service = Service::from_draft(new_entity_id(), draft, &ctx(0));
        service.apply_patch(ServicePatch {
            price: Some("от 6000 ₽".to_string()),
            features_text: Some("  ".to_string()),
            ..ServicePatch::default()
        });

        assert_eq!(service.price, "от 6000 ₽");
        assert_eq!(service.features, vec!["Выезд", "Установка"]);
    }

    #[test]
    fn image_without_name_gets_numbered_name() {
        let image = Image::from_draft(
            new_entity_id(),
            ImageDraft {
                url: "https://example.com/a.jpg".to_string(),
                name: Some("   ".to_string()),
            },
            &ctx(6),
        );
        assert_eq!(image.name, "Изображение 7");
    }

    #[test]
    fn activity_messages_only_for_catalog_entities() {
        assert_eq!(
            Service::activity_message(EntityAction::Deleted, "Монтаж").as_deref(),
            Some("Удалена услуга: Монтаж")
        );
        assert!(Image::activity_message(EntityAction::Created, "x").is_none());
    }
}
