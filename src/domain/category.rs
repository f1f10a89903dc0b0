use serde::{Deserialize, Serialize};

use crate::domain::types::CategoryId;

/// A product category as returned by the remote API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductCategory {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Representative image URL, when the API provides one.
    #[serde(default)]
    pub image: Option<String>,
}
