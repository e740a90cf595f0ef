//! Form binding for admin editors and the public contact form.
//!
//! # Responsibility
//! - Fill forms from records (edit mode) or defaults (create mode).
//! - Trim input, check required fields, then create or update through the
//!   store.
//!
//! # Invariants
//! - Validation short-circuits on the first missing required field; the
//!   store is not touched.
//! - A form with `id = Some(..)` updates; `None` creates.

use crate::model::application::{Application, ApplicationDraft};
use crate::model::id::EntityId;
use crate::model::product::{Product, ProductDraft, ProductPatch, ProductSpecs, ProductSpecsPatch};
use crate::model::service::{Service, ServiceDraft, ServicePatch};
use crate::model::settings::Settings;
use crate::repo::admin_store::{AdminStore, StoreError};
use crate::repo::entity::Entity;
use crate::service::notice::{created_message, store_error_notice, updated_message, Notice};
use crate::storage::KeyValueStore;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

const MISSING_FIELDS_MESSAGE: &str = "Заполните все обязательные поля";

/// Form submission failure.
#[derive(Debug)]
pub enum FormError {
    /// Required field (form field name) is blank.
    MissingField(&'static str),
    Store(StoreError),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field `{field}` is empty"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FormError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingField(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for FormError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl FormError {
    pub fn notice(&self) -> Notice {
        match self {
            Self::MissingField(_) => Notice::error(MISSING_FIELDS_MESSAGE),
            Self::Store(err) => store_error_notice(err),
        }
    }
}

/// Result of a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome<T> {
    Created(T),
    Updated(T),
}

impl<T> FormOutcome<T> {
    pub fn record(&self) -> &T {
        match self {
            Self::Created(record) | Self::Updated(record) => record,
        }
    }

    pub fn into_record(self) -> T {
        match self {
            Self::Created(record) | Self::Updated(record) => record,
        }
    }
}

/// Maps a submit result to the notice shown after saving.
pub fn submit_notice<T: Entity>(result: &Result<FormOutcome<T>, FormError>) -> Notice {
    match result {
        Ok(FormOutcome::Created(_)) => Notice::success(created_message(T::KIND)),
        Ok(FormOutcome::Updated(_)) => Notice::success(updated_message(T::KIND)),
        Err(err) => err.notice(),
    }
}

fn require(field: &'static str, value: &str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(())
}

fn trimmed(value: &str) -> String {
    value.trim().to_string()
}

/// Service editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceForm {
    pub id: Option<EntityId>,
    pub name: String,
    pub description: String,
    pub price: String,
    pub icon: String,
    /// One feature per line.
    pub features: String,
}

impl ServiceForm {
    pub fn from_record(service: &Service) -> Self {
        Self {
            id: Some(service.id),
            name: service.name.clone(),
            description: service.description.clone(),
            price: service.price.clone(),
            icon: service.icon.clone(),
            features: service.features.join("\n"),
        }
    }

    pub fn validate(&self) -> Result<(), FormError> {
        require("name", &self.name)?;
        require("description", &self.description)?;
        require("price", &self.price)
    }

    pub fn submit<S: KeyValueStore>(
        &self,
        store: &mut AdminStore<S>,
    ) -> Result<FormOutcome<Service>, FormError> {
        self.validate()?;

        let outcome = match self.id {
            Some(id) => FormOutcome::Updated(store.update::<Service>(
                id,
                ServicePatch {
                    name: Some(trimmed(&self.name)),
                    description: Some(trimmed(&self.description)),
                    price: Some(trimmed(&self.price)),
                    icon: Some(trimmed(&self.icon)),
                    features_text: Some(self.features.clone()),
                },
            )?),
            None => FormOutcome::Created(store.create::<Service>(ServiceDraft {
                name: trimmed(&self.name),
                description: trimmed(&self.description),
                price: trimmed(&self.price),
                icon: trimmed(&self.icon),
                features_text: self.features.clone(),
            })?),
        };
        Ok(outcome)
    }
}

/// Product editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub id: Option<EntityId>,
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub image: String,
    pub location: String,
    pub material: String,
    pub age: String,
    pub warranty: String,
    pub size: String,
    pub show_in_portfolio: bool,
}

impl ProductForm {
    pub fn from_record(product: &Product) -> Self {
        Self {
            id: Some(product.id),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
            location: product.location.clone(),
            material: product.specs.material.clone(),
            age: product.specs.age.clone(),
            warranty: product.specs.warranty.clone(),
            size: product.specs.size.clone(),
            show_in_portfolio: product.show_in_portfolio,
        }
    }

    pub fn validate(&self) -> Result<(), FormError> {
        require("name", &self.name)?;
        require("description", &self.description)?;
        require("price", &self.price)?;
        require("category", &self.category)?;
        require("image", &self.image)
    }

    pub fn submit<S: KeyValueStore>(
        &self,
        store: &mut AdminStore<S>,
    ) -> Result<FormOutcome<Product>, FormError> {
        self.validate()?;

        let outcome = match self.id {
            Some(id) => FormOutcome::Updated(store.update::<Product>(
                id,
                ProductPatch {
                    name: Some(trimmed(&self.name)),
                    description: Some(trimmed(&self.description)),
                    price: Some(trimmed(&self.price)),
                    category: Some(trimmed(&self.category)),
                    image: Some(trimmed(&self.image)),
                    location: Some(trimmed(&self.location)),
                    specs: ProductSpecsPatch {
                        material: Some(trimmed(&self.material)),
                        age: Some(trimmed(&self.age)),
                        warranty: Some(trimmed(&self.warranty)),
                        size: Some(trimmed(&self.size)),
                    },
                    show_in_portfolio: Some(self.show_in_portfolio),
                },
            )?),
            None => FormOutcome::Created(store.create::<Product>(ProductDraft {
                name: trimmed(&self.name),
                description: trimmed(&self.description),
                price: trimmed(&self.price),
                category: trimmed(&self.category),
                image: trimmed(&self.image),
                location: trimmed(&self.location),
                specs: ProductSpecs {
                    material: trimmed(&self.material),
                    age: trimmed(&self.age),
                    warranty: trimmed(&self.warranty),
                    size: trimmed(&self.size),
                },
                show_in_portfolio: self.show_in_portfolio,
            })?),
        };
        Ok(outcome)
    }
}

/// Settings editor. No field is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsForm {
    pub values: Settings,
}

impl SettingsForm {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            values: settings.clone(),
        }
    }

    pub fn submit<S: KeyValueStore>(&self, store: &mut AdminStore<S>) -> Notice {
        match store.update_settings(self.values.trimmed()) {
            Ok(()) => Notice::success("Настройки сохранены"),
            Err(err) => {
                error!("event=settings_save module=forms status=error error={err}");
                Notice::error("Ошибка сохранения настроек")
            }
        }
    }
}

/// Public contact form; a submit records a new application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    /// Product category or service of interest.
    pub interest: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), FormError> {
        require("name", &self.name)?;
        require("phone", &self.phone)
    }

    pub fn submit<S: KeyValueStore>(
        &self,
        store: &mut AdminStore<S>,
    ) -> Result<FormOutcome<Application>, FormError> {
        self.validate()?;

        let application = store.create::<Application>(ApplicationDraft {
            name: trimmed(&self.name),
            phone: trimmed(&self.phone),
            email: trimmed(&self.email),
            interest: trimmed(&self.interest),
            message: trimmed(&self.message),
            source: String::new(),
        })?;
        info!(
            "event=contact_submit module=forms status=ok id={}",
            application.id
        );
        Ok(FormOutcome::Created(application))
    }
}
