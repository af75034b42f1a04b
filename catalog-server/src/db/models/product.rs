//! Product Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::ImageRef;
use super::serde_helpers;

/// A purchasable size option embedded in a product document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeVariant {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
}

/// Product record
///
/// `category` is a denormalized list of category *names* — there is no
/// referential link to the category collection, so entries may outlive the
/// categories they were copied from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    /// URL-safe identifier, unique store-wide
    pub slug: String,
    #[serde(default)]
    pub description: String,
    /// Base price; listing filters and price sorts use this field only
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<f64>,
    /// Ordered gallery, at least one at creation time
    #[serde(default)]
    pub images: Vec<ImageRef>,
    #[serde(default)]
    pub sizes: Vec<SizeVariant>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub is_best_seller: bool,
    #[serde(default)]
    pub is_most_popular: bool,
    /// Visible in the public shop listing (null counts as listed)
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_listed: bool,
    /// Unix millis, set by the repository
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_document_gets_defaults() {
        let product: Product = serde_json::from_str(
            r#"{"name": "Collagen Peptides", "slug": "collagen-peptides", "price": 2400}"#,
        )
        .unwrap();
        assert!(product.is_listed);
        assert!(!product.is_best_seller);
        assert!(product.images.is_empty());
        assert_eq!(product.description, "");
    }

    #[test]
    fn id_round_trips_as_string() {
        let json = r#"{"id": "product:abc123", "name": "x", "slug": "x", "price": 1}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        let out = serde_json::to_value(&product).unwrap();
        assert_eq!(out["id"], "product:abc123");
    }
}
