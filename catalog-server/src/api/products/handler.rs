//! Product API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use super::query::{ListingParams, page_count};
use crate::api::StatusResponse;
use crate::core::ServerState;
use crate::db::models::{ImageRef, Product, SizeVariant, serde_helpers};
use crate::db::repository::ProductRepository;
use crate::services::AssetStoreClient;
use crate::utils::validation::{
    MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_SLUG_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// Size variant as submitted by the admin form; numeric fields may be text
#[derive(Debug, Deserialize)]
pub struct SizeVariantPayload {
    #[serde(default)]
    pub label: String,
    #[serde(default, deserialize_with = "serde_helpers::lenient_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "serde_helpers::lenient_f64")]
    pub old_price: Option<f64>,
    #[serde(default)]
    pub image: Option<ImageRef>,
}

/// Inbound product payload, shared by create and replace.
///
/// The admin form posts numeric fields as text; blank text means the field
/// was left empty, never zero.
#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    /// Required for PUT, ignored for POST
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "serde_helpers::lenient_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "serde_helpers::lenient_f64")]
    pub old_price: Option<f64>,
    #[serde(default)]
    pub images: Vec<ImageRef>,
    #[serde(default)]
    pub sizes: Vec<SizeVariantPayload>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub is_best_seller: bool,
    #[serde(default)]
    pub is_most_popular: bool,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_listed: bool,
}

fn default_true() -> bool {
    true
}

/// Listing response envelope; pagination fields only appear in shop mode
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub success: bool,
    pub products: Vec<Product>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub success: bool,
    pub product: Product,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub id: Option<String>,
}

/// Validate and normalize a submitted payload into a storable record.
///
/// Aborts before any mutation: every rejection here leaves the store
/// untouched.
fn validate_payload(payload: ProductPayload) -> Result<Product, AppError> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.slug, "slug", MAX_SLUG_LEN)?;
    if payload.description.len() > MAX_DESCRIPTION_LEN {
        return Err(AppError::validation("description is too long"));
    }
    let price = payload
        .price
        .ok_or_else(|| AppError::validation("price is required and must be numeric"))?;
    if payload.images.is_empty() {
        return Err(AppError::validation("at least one image is required"));
    }

    let sizes = payload
        .sizes
        .into_iter()
        .map(|variant| {
            validate_required_text(&variant.label, "size label", MAX_NAME_LEN)?;
            Ok(SizeVariant {
                label: variant.label.trim().to_string(),
                price: variant.price,
                old_price: variant.old_price,
                image: variant.image,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(Product {
        id: None,
        name: payload.name.trim().to_string(),
        slug: payload.slug.trim().to_string(),
        description: payload.description,
        price,
        old_price: payload.old_price,
        images: payload.images,
        sizes,
        colors: payload.colors,
        category: payload.category,
        is_best_seller: payload.is_best_seller,
        is_most_popular: payload.is_most_popular,
        is_listed: payload.is_listed,
        created_at: 0,
        updated_at: 0,
    })
}

/// GET /api/products - 商品列表 (admin=true 返回全部，否则按店铺查询分页)
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListingParams>,
) -> AppResult<Json<ProductListResponse>> {
    let repo = ProductRepository::new(state.db.clone());

    if params.is_admin() {
        let products = repo.find_all().await?;
        return Ok(Json(ProductListResponse {
            success: true,
            products,
            page: None,
            pages: None,
            total: None,
        }));
    }

    let query = params.into_query()?;
    let (products, total) = repo
        .list(&query.filter, query.sort, query.page, query.limit)
        .await?;

    Ok(Json(ProductListResponse {
        success: true,
        products,
        page: Some(query.page),
        pages: Some(page_count(total, query.limit)),
        total: Some(total),
    }))
}

/// POST /api/products - 创建商品
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductPayload>,
) -> AppResult<Json<ProductResponse>> {
    let product = validate_payload(payload)?;

    let repo = ProductRepository::new(state.db.clone());
    let created = repo.create(product).await?;

    tracing::info!(slug = %created.slug, "Product created");
    Ok(Json(ProductResponse {
        success: true,
        product: created,
    }))
}

/// PUT /api/products - 整体替换商品 (body 需携带 id)
pub async fn replace(
    State(state): State<ServerState>,
    Json(payload): Json<ProductPayload>,
) -> AppResult<Json<ProductResponse>> {
    let id = payload
        .id
        .clone()
        .ok_or_else(|| AppError::validation("id is required"))?;
    let product = validate_payload(payload)?;

    let repo = ProductRepository::new(state.db.clone());
    let updated = repo.replace(&id, product).await?;

    tracing::info!(id = %id, "Product replaced");
    Ok(Json(ProductResponse {
        success: true,
        product: updated,
    }))
}

/// DELETE /api/products - 删除商品 (先尽力清理图床资源)
pub async fn delete(
    State(state): State<ServerState>,
    Json(request): Json<DeleteRequest>,
) -> AppResult<Json<StatusResponse>> {
    let id = request
        .id
        .ok_or_else(|| AppError::validation("id is required"))?;

    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))?;

    cleanup_assets(&state.assets, &product).await;
    repo.delete(&id).await?;

    tracing::info!(id = %id, "Product deleted");
    Ok(Json(StatusResponse { success: true }))
}

/// Best-effort removal of every hosted image the record references.
///
/// Failures are logged and swallowed; the record deletion proceeds.
async fn cleanup_assets(assets: &AssetStoreClient, product: &Product) {
    let refs = product
        .images
        .iter()
        .chain(product.sizes.iter().filter_map(|s| s.image.as_ref()));
    for image in refs {
        if let Err(e) = assets.delete(&image.public_id).await {
            tracing::warn!(
                public_id = %image.public_id,
                error = %e,
                "Failed to delete hosted image"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> ProductPayload {
        serde_json::from_value(serde_json::json!({
            "name": "Collagen Peptides",
            "slug": "collagen-peptides",
            "price": "2400",
            "images": [{"url": "https://cdn.test/a.jpg", "public_id": "a"}],
        }))
        .unwrap()
    }

    #[test]
    fn accepts_textual_price() {
        let product = validate_payload(valid_payload()).unwrap();
        assert_eq!(product.price, 2400.0);
        assert!(product.is_listed);
    }

    #[test]
    fn rejects_missing_images() {
        let mut payload = valid_payload();
        payload.images.clear();
        assert!(validate_payload(payload).is_err());
    }

    #[test]
    fn blank_price_is_missing() {
        let payload: ProductPayload = serde_json::from_value(serde_json::json!({
            "name": "x",
            "slug": "x",
            "price": "",
            "images": [{"url": "u", "public_id": "p"}],
        }))
        .unwrap();
        assert!(validate_payload(payload).is_err());
    }

    #[test]
    fn rejects_blank_size_label() {
        let mut payload = valid_payload();
        payload.sizes.push(SizeVariantPayload {
            label: "  ".to_string(),
            price: None,
            old_price: None,
            image: None,
        });
        assert!(validate_payload(payload).is_err());
    }
}
