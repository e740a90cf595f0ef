//! Product catalog model.
//!
//! # Invariants
//! - Portfolio membership is the `show_in_portfolio` flag; there is no
//!   separate portfolio list.
//! - `specs` is always present; missing spec values are empty strings.

use crate::model::id::{deserialize_entity_id, EntityId};
use serde::{Deserialize, Serialize};

/// Placeholder image used when a product has no image.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/200";

/// Technical characteristics shown on product cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSpecs {
    #[serde(default)]
    pub material: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub warranty: String,
    #[serde(default)]
    pub size: String,
}

/// One product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(deserialize_with = "deserialize_entity_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub category: String,
    /// Remote URL or embedded data URI.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub specs: ProductSpecs,
    #[serde(default)]
    pub show_in_portfolio: bool,
}

impl Product {
    pub fn display_image(&self) -> &str {
        if self.image.trim().is_empty() {
            PLACEHOLDER_IMAGE_URL
        } else {
            self.image.as_str()
        }
    }
}

/// Create input for a product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub image: String,
    pub location: String,
    pub specs: ProductSpecs,
    pub show_in_portfolio: bool,
}

/// Partial update for product specs.
///
/// An empty value keeps the stored one, matching how the edit form submits
/// untouched `specs` inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductSpecsPatch {
    pub material: Option<String>,
    pub age: Option<String>,
    pub warranty: Option<String>,
    pub size: Option<String>,
}

impl ProductSpecsPatch {
    pub fn apply_to(self, specs: &mut ProductSpecs) {
        merge_non_empty(&mut specs.material, self.material);
        merge_non_empty(&mut specs.age, self.age);
        merge_non_empty(&mut specs.warranty, self.warranty);
        merge_non_empty(&mut specs.size, self.size);
    }
}

/// Partial update for a product. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub location: Option<String>,
    pub specs: ProductSpecsPatch,
    pub show_in_portfolio: Option<bool>,
}

fn merge_non_empty(target: &mut String, value: Option<String>) {
    if let Some(value) = value {
        if !value.is_empty() {
            *target = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Product, ProductSpecs, ProductSpecsPatch, PLACEHOLDER_IMAGE_URL};

    #[test]
    fn specs_patch_keeps_values_for_empty_inputs() {
        let mut specs = ProductSpecs {
            material: "Сосна".to_string(),
            age: "3+".to_string(),
            warranty: "2 года".to_string(),
            size: "3x4 м".to_string(),
        };
        ProductSpecsPatch {
            material: Some("Лиственница".to_string()),
            age: Some(String::new()),
            warranty: None,
            size: Some("4x5 м".to_string()),
        }
        .apply_to(&mut specs);

        assert_eq!(specs.material, "Лиственница");
        assert_eq!(specs.age, "3+");
        assert_eq!(specs.warranty, "2 года");
        assert_eq!(specs.size, "4x5 м");
    }

    #[test]
    fn legacy_product_without_specs_loads() {
        let json = r#"{"id":1700000000002,"name":"Горка","price":"12 000 ₽"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.specs, ProductSpecs::default());
        assert!(!product.show_in_portfolio);
        assert_eq!(product.display_image(), PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn portfolio_flag_uses_camel_case() {
        let json = r#"{"id":1,"name":"Комплекс","showInPortfolio":true}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.show_in_portfolio);

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["showInPortfolio"], true);
    }
}
