//! Business data blob shared by the admin panel and the public site.

use crate::model::product::Product;
use crate::model::service::Service;
use serde::{Deserialize, Serialize};

/// `{ "services": [...], "products": [...] }` stored under one key.
///
/// The static fallback document uses the same shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessData {
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl BusinessData {
    /// Products flagged for the portfolio, in catalog order.
    pub fn portfolio(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|product| product.show_in_portfolio)
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty() && self.products.is_empty()
    }
}
