//! Banner API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::api::StatusResponse;
use crate::core::ServerState;
use crate::db::models::{Banner, ImageRef, serde_helpers};
use crate::db::repository::BannerRepository;
use crate::utils::validation::{MAX_URL_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult};

/// Fallback click-through target when the admin leaves the link blank
const DEFAULT_LINK: &str = "/shop";

#[derive(Debug, Deserialize)]
pub struct BannerPayload {
    pub image: Option<ImageRef>,
    #[serde(default)]
    pub link: Option<String>,
    /// Display position; the admin form posts it as text
    #[serde(
        default,
        alias = "order",
        deserialize_with = "serde_helpers::lenient_i64"
    )]
    pub sort_order: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BannerListResponse {
    pub success: bool,
    pub banners: Vec<Banner>,
}

#[derive(Debug, Serialize)]
pub struct BannerResponse {
    pub success: bool,
    pub banner: Banner,
}

/// GET /api/banners - 获取所有轮播图 (按展示顺序排序)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<BannerListResponse>> {
    let repo = BannerRepository::new(state.db.clone());
    let banners = repo.find_all().await?;
    Ok(Json(BannerListResponse {
        success: true,
        banners,
    }))
}

/// POST /api/banners - 创建轮播图
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BannerPayload>,
) -> AppResult<Json<BannerResponse>> {
    let image = payload
        .image
        .ok_or_else(|| AppError::validation("Banner image is required"))?;
    validate_optional_text(&payload.link, "link", MAX_URL_LEN)?;

    let link = payload
        .link
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LINK.to_string());

    let banner = Banner {
        id: None,
        image,
        link,
        sort_order: payload.sort_order.unwrap_or(0),
        created_at: 0,
        updated_at: 0,
    };

    let repo = BannerRepository::new(state.db.clone());
    let banner = repo.create(banner).await?;

    tracing::info!(public_id = %banner.image.public_id, "Banner created");
    Ok(Json(BannerResponse {
        success: true,
        banner,
    }))
}

/// DELETE /api/banners - 删除轮播图 (先尽力删除图床资源，再删记录)
pub async fn delete(
    State(state): State<ServerState>,
    Json(request): Json<DeleteRequest>,
) -> AppResult<Json<StatusResponse>> {
    let id = request
        .id
        .ok_or_else(|| AppError::validation("id is required"))?;

    let repo = BannerRepository::new(state.db.clone());
    let banner = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Banner {} not found", id)))?;

    // Best-effort cascade: a failed asset delete never blocks the record
    if let Err(e) = state.assets.delete(&banner.image.public_id).await {
        tracing::warn!(
            public_id = %banner.image.public_id,
            error = %e,
            "Failed to delete hosted banner image"
        );
    }

    repo.delete(&id).await?;

    tracing::info!(id = %id, "Banner deleted");
    Ok(Json(StatusResponse { success: true }))
}
