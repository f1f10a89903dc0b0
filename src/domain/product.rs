use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::category::ProductCategory;
use crate::domain::types::{CategoryId, ProductId};

/// Image served when a product carries no usable image entries.
pub const PLACEHOLDER_PRODUCT_IMAGE: &str = "/assets/placeholder-product.svg";

/// A catalog product as returned by the remote API.
///
/// The API is tolerant about which fields it populates, so everything beyond
/// identity and name is optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub points: Vec<String>,
    #[serde(default)]
    pub sale_price: Option<f64>,
    /// Preferred over `sale_price` for display when present.
    #[serde(default)]
    pub sale_price_in_rupees: Option<f64>,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Denormalized category record, when the API includes it.
    #[serde(default)]
    pub category: Option<ProductCategory>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

/// A raw image entry attached to a product.
///
/// Entries come in two shapes: a direct `url`, or a nested `image` object
/// holding the stored file's `url`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductImage {
    #[serde(default)]
    pub image_id: Option<String>,
    #[serde(default)]
    pub is_primary: Option<bool>,
    #[serde(default)]
    pub image: Option<StoredImage>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

/// Nested stored-file reference inside a [`ProductImage`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredImage {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    pub url: String,
}

/// A displayable image with a guaranteed URL and alt text.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResolvedImage {
    pub url: String,
    pub alt: String,
}

impl Product {
    /// Resolves raw image entries into displayable ones. Never returns an
    /// empty list: a product without usable images yields a single
    /// placeholder entry.
    ///
    /// Per entry the nested `image.url` wins over the direct `url`; alt text
    /// falls back from the entry's own `alt` to the product name and finally
    /// to a generic label.
    pub fn resolve_images(&self) -> Vec<ResolvedImage> {
        let fallback_alt = if self.name.trim().is_empty() {
            "Product".to_string()
        } else {
            self.name.clone()
        };

        let resolved: Vec<ResolvedImage> = self
            .images
            .iter()
            .map(|entry| {
                let url = entry
                    .image
                    .as_ref()
                    .map(|stored| stored.url.clone())
                    .or_else(|| entry.url.clone())
                    .unwrap_or_else(|| PLACEHOLDER_PRODUCT_IMAGE.to_string());
                let alt = entry.alt.clone().unwrap_or_else(|| fallback_alt.clone());
                ResolvedImage { url, alt }
            })
            .collect();

        if resolved.is_empty() {
            return vec![ResolvedImage {
                url: PLACEHOLDER_PRODUCT_IMAGE.to_string(),
                alt: fallback_alt,
            }];
        }
        resolved
    }

    /// Price shown in the catalog: `sale_price_in_rupees` when present,
    /// otherwise `sale_price`, otherwise zero.
    pub fn display_price(&self) -> f64 {
        self.sale_price_in_rupees
            .or(self.sale_price)
            .unwrap_or(0.0)
    }

    /// Category label for cards and the detail header.
    pub fn category_name(&self) -> &str {
        self.category
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or("General")
    }
}
