//! Image gallery model.

use crate::model::id::{deserialize_entity_id, legacy_entity_id, EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const DEFAULT_IMAGE_URLS: &[&str] = &[
    "https://images.unsplash.com/photo-1564186763535-ebb21ef5277f",
    "https://images.unsplash.com/photo-1511882150382-421056c89033",
    "https://images.unsplash.com/photo-1596461404969-9ae70f2830c1",
    "https://images.unsplash.com/photo-1575367439053-8cac10c2355e",
    "https://images.unsplash.com/photo-1536922246289-88c42f957773",
    "https://images.unsplash.com/photo-1543554296-8f77334c4d11",
];
const DEFAULT_IMAGE_QUERY: &str = "?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80";

/// One gallery entry. `url` is a remote URL or an embedded data URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(deserialize_with = "deserialize_entity_id")]
    pub id: EntityId,
    pub url: String,
    #[serde(default)]
    pub name: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Create input for an image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageDraft {
    pub url: String,
    /// Display name; `None` or blank gets a numbered default name.
    pub name: Option<String>,
}

/// Partial update for an image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImagePatch {
    pub url: Option<String>,
    pub name: Option<String>,
}

/// Numbered display name used for unnamed images (1-based).
pub fn default_image_name(position: usize) -> String {
    format!("Изображение {position}")
}

/// Gallery shown before any image was stored.
///
/// Ids are assigned from the legacy integer space (1..=6) so the seed set is
/// identical on every load.
pub fn default_images(uploaded_at: DateTime<Utc>) -> Vec<Image> {
    DEFAULT_IMAGE_URLS
        .iter()
        .enumerate()
        .map(|(index, url)| Image {
            id: legacy_entity_id(index as u64 + 1),
            url: format!("{url}{DEFAULT_IMAGE_QUERY}"),
            name: default_image_name(index + 1),
            uploaded_at,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{default_image_name, default_images};
    use chrono::Utc;

    #[test]
    fn default_gallery_has_six_named_images() {
        let images = default_images(Utc::now());
        assert_eq!(images.len(), 6);
        assert_eq!(images[0].name, default_image_name(1));
        assert!(images[5].url.ends_with("&q=80"));
    }

    #[test]
    fn default_gallery_ids_are_stable() {
        let first = default_images(Utc::now());
        let second = default_images(Utc::now());
        let first_ids: Vec<_> = first.iter().map(|image| image.id).collect();
        let second_ids: Vec<_> = second.iter().map(|image| image.id).collect();
        assert_eq!(first_ids, second_ids);
    }
}
