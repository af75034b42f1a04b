//! Banner Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::ImageRef;
use super::serde_helpers;

/// Promotional banner shown on the storefront
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Banner {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub image: ImageRef,
    /// Click-through target; "/shop" when the admin left it blank
    pub link: String,
    /// Display position, ascending
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}
