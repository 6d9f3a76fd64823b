//! Product record as served by the catalog service.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A product in the catalog.
///
/// Products are owned by the remote catalog service and cached locally by
/// value. Fields the service sends beyond these are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Stable identifier, used as the key for deletes and navigation.
    pub id: ProductId,
    /// Display title; searched and sorted on.
    pub title: String,
    /// Display-only description.
    #[serde(default)]
    pub description: String,
    /// Category name; filtered on case-insensitively.
    pub category: String,
    /// Unit price in the store currency.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Reference to a display asset (usually a URL).
    #[serde(default)]
    pub image: String,
}

impl Product {
    /// Create a product with an empty description and image.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        category: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            category: category.into(),
            price,
            image: String::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}
