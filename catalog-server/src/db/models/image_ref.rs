//! Hosted Image Reference
//!
//! 指向远程图床资源的值对象，内嵌在商品和轮播图文档中

use serde::{Deserialize, Serialize};

/// Reference to an image on the remote asset host.
///
/// `public_id` is the host's storage identifier and is required to delete
/// the asset later; `url` is what clients render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
    pub public_id: String,
}
