//! Product API 模块

mod handler;
pub mod query;

use axum::{
    Router,
    routing::get,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", product_routes())
}

fn product_routes() -> Router<ServerState> {
    Router::new().route(
        "/",
        get(handler::list)
            .post(handler::create)
            .put(handler::replace)
            .delete(handler::delete),
    )
}
