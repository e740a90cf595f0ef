//! Image upload validation and data-URI embedding.
//!
//! # Invariants
//! - Files over the configured size cap or with a non-`image/*` MIME type
//!   never reach the store.

use crate::model::image::{Image, ImageDraft};
use crate::repo::admin_store::{AdminStore, StoreError};
use crate::service::notice::{store_error_notice, Notice};
use crate::storage::KeyValueStore;
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// A file picked in the gallery upload area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug)]
pub enum UploadError {
    TooLarge {
        file_name: String,
        size: usize,
        limit: usize,
    },
    NotAnImage {
        file_name: String,
        mime_type: String,
    },
    Store(StoreError),
}

impl Display for UploadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooLarge {
                file_name,
                size,
                limit,
            } => write!(f, "file `{file_name}` is {size} bytes, limit is {limit}"),
            Self::NotAnImage {
                file_name,
                mime_type,
            } => write!(f, "file `{file_name}` has non-image type `{mime_type}`"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for UploadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for UploadError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl UploadError {
    pub fn notice(&self) -> Notice {
        match self {
            Self::TooLarge {
                file_name, limit, ..
            } => Notice::error(format!(
                "Файл {file_name} слишком большой (макс. {})",
                format_size(*limit)
            )),
            Self::NotAnImage { file_name, .. } => {
                Notice::error(format!("Файл {file_name} не является изображением"))
            }
            Self::Store(err) => store_error_notice(err),
        }
    }
}

/// `5MB`, `512KB` or `900B`; rounds down to the largest whole unit.
fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;
    match bytes {
        b if b >= MB => format!("{}MB", b / MB),
        b if b >= KB => format!("{}KB", b / KB),
        b => format!("{b}B"),
    }
}

impl ImageUpload {
    pub fn validate(&self, max_bytes: usize) -> Result<(), UploadError> {
        if self.bytes.len() > max_bytes {
            return Err(UploadError::TooLarge {
                file_name: self.file_name.clone(),
                size: self.bytes.len(),
                limit: max_bytes,
            });
        }
        if !self.mime_type.trim().starts_with("image/") {
            return Err(UploadError::NotAnImage {
                file_name: self.file_name.clone(),
                mime_type: self.mime_type.clone(),
            });
        }
        Ok(())
    }

    /// `data:<mime>;base64,<payload>`
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type.trim(),
            B64.encode(&self.bytes)
        )
    }
}

/// Validates an upload and stores it as a data-URI gallery image.
pub fn upload_image<S: KeyValueStore>(
    store: &mut AdminStore<S>,
    upload: &ImageUpload,
) -> Result<Image, UploadError> {
    if let Err(err) = upload.validate(store.config().max_upload_bytes) {
        warn!("event=image_upload module=upload status=rejected error={err}");
        return Err(err);
    }

    let image = store.create::<Image>(ImageDraft {
        url: upload.to_data_uri(),
        name: Some(upload.file_name.clone()),
    })?;
    info!(
        "event=image_upload module=upload status=ok id={} bytes={}",
        image.id,
        upload.bytes.len()
    );
    Ok(image)
}

/// Stores a remote image URL in the gallery.
pub fn add_image_url<S: KeyValueStore>(
    store: &mut AdminStore<S>,
    url: &str,
    name: Option<&str>,
) -> Result<Image, StoreError> {
    store.create::<Image>(ImageDraft {
        url: url.trim().to_string(),
        name: name.map(str::to_string),
    })
}
