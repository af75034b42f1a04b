//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`upload`] - 图片上传接口
//! - [`categories`] - 分类管理接口
//! - [`banners`] - 轮播图管理接口
//! - [`products`] - 商品管理接口（含店铺列表查询）

pub mod banners;
pub mod categories;
pub mod health;
pub mod products;
pub mod upload;

use axum::{Router, middleware};
use serde::Serialize;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// Bare `{"success": true}` acknowledgement for delete endpoints
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
}

/// HTTP 请求日志中间件
pub async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        // Core APIs
        .merge(health::router())
        .merge(upload::router())
        // Data model APIs
        .merge(categories::router())
        .merge(banners::router())
        .merge(products::router())
}
