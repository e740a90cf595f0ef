//! Public site content loading.
//!
//! # Responsibility
//! - Read the business-data blob the admin panel writes, or fall back to
//!   the static JSON document shipped with the site.
//! - Assemble rendered page sections from the loaded content.
//!
//! # Invariants
//! - Loading never fails; every unreadable source degrades to the next one
//!   and finally to empty content.

use crate::config::StorageKeys;
use crate::model::blob::BusinessData;
use crate::model::product::Product;
use crate::model::settings::Settings;
use crate::render::site::{
    render_contacts, render_portfolio, render_product_cards, render_service_cards,
};
use crate::repo::admin_store::read_blob;
use crate::storage::KeyValueStore;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Failure to read the static fallback document.
#[derive(Debug)]
pub enum FallbackError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl Display for FallbackError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read fallback document: {err}"),
            Self::Json(err) => write!(f, "invalid fallback document: {err}"),
        }
    }
}

impl Error for FallbackError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for FallbackError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for FallbackError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Where the loaded business data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    Storage,
    Fallback,
    Empty,
}

/// Content shown on the public site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteContent {
    pub data: BusinessData,
    pub settings: Settings,
    pub source: ContentSource,
}

/// Rendered sections of the public page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePage {
    pub services: String,
    pub products: String,
    pub portfolio: String,
    pub contacts: String,
}

impl SiteContent {
    /// Loads site content from `kv`, then `fallback_path`, then empty.
    pub fn load<S: KeyValueStore + ?Sized>(
        kv: &S,
        keys: &StorageKeys,
        fallback_path: Option<&Path>,
    ) -> Self {
        let settings = match read_blob::<Settings, _>(kv, &keys.settings) {
            Ok(Some(settings)) => settings,
            Ok(None) => Settings::default(),
            Err(err) => {
                warn!("event=site_load module=site status=error blob=settings error={err}");
                Settings::default()
            }
        };

        let stored = match read_blob::<BusinessData, _>(kv, &keys.business_data) {
            Ok(data) => data,
            Err(err) => {
                warn!("event=site_load module=site status=error blob=business_data error={err}");
                None
            }
        };
        if let Some(data) = stored {
            info!("event=site_load module=site status=ok source=storage");
            return Self {
                data,
                settings,
                source: ContentSource::Storage,
            };
        }

        match fallback_path.map(load_fallback) {
            Some(Ok(data)) => {
                info!("event=site_load module=site status=ok source=fallback");
                Self {
                    data,
                    settings,
                    source: ContentSource::Fallback,
                }
            }
            Some(Err(err)) => {
                warn!(
                    "event=site_load module=site status=error source=fallback path={} error={err}",
                    fallback_path.map_or_else(String::new, |path| path.display().to_string())
                );
                Self::empty(settings)
            }
            None => Self::empty(settings),
        }
    }

    pub fn portfolio(&self) -> impl Iterator<Item = &Product> {
        self.data.portfolio()
    }

    pub fn render(&self) -> SitePage {
        SitePage {
            services: render_service_cards(&self.data.services),
            products: render_product_cards(&self.data.products),
            portfolio: render_portfolio(&self.data.products),
            contacts: render_contacts(&self.settings),
        }
    }

    fn empty(settings: Settings) -> Self {
        Self {
            data: BusinessData::default(),
            settings,
            source: ContentSource::Empty,
        }
    }
}

/// Reads the static `{services, products}` document.
pub fn load_fallback(path: &Path) -> Result<BusinessData, FallbackError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
