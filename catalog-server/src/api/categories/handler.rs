//! Category API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::api::StatusResponse;
use crate::core::ServerState;
use crate::db::models::Category;
use crate::db::repository::{CategoryRepository, RepoError};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    pub success: bool,
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub success: bool,
    pub category: Category,
}

/// GET /api/categories - 获取所有分类 (按名称排序)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<CategoryListResponse>> {
    let repo = CategoryRepository::new(state.db.clone());
    let categories = repo.find_all().await?;
    Ok(Json(CategoryListResponse {
        success: true,
        categories,
    }))
}

/// POST /api/categories - 创建分类
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryPayload>,
) -> AppResult<Json<CategoryResponse>> {
    let name = payload.name.trim();
    validate_required_text(name, "Category name", MAX_NAME_LEN)?;

    let repo = CategoryRepository::new(state.db.clone());
    let category = repo.create(name).await.map_err(|e| match e {
        // Raced index violations get the same user-facing message as the
        // pre-check
        RepoError::Duplicate(_) => AppError::conflict("Category already exists"),
        other => other.into(),
    })?;

    tracing::info!(name = %category.name, "Category created");
    Ok(Json(CategoryResponse {
        success: true,
        category,
    }))
}

/// DELETE /api/categories - 删除分类 (不触碰引用该名称的商品)
pub async fn delete(
    State(state): State<ServerState>,
    Json(request): Json<DeleteRequest>,
) -> AppResult<Json<StatusResponse>> {
    let id = request
        .id
        .ok_or_else(|| AppError::validation("id is required"))?;

    let repo = CategoryRepository::new(state.db.clone());
    let deleted = repo.delete(&id).await?;

    tracing::info!(name = %deleted.name, "Category deleted");
    Ok(Json(StatusResponse { success: true }))
}
