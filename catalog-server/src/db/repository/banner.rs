//! Banner Repository

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::Banner;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "banner";

#[derive(Clone)]
pub struct BannerRepository {
    base: BaseRepository,
}

impl BannerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all banners in display order
    pub async fn find_all(&self) -> RepoResult<Vec<Banner>> {
        let banners: Vec<Banner> = self
            .base
            .db()
            .query("SELECT * FROM banner ORDER BY sort_order ASC, id ASC")
            .await?
            .take(0)?;
        Ok(banners)
    }

    /// Find banner by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Banner>> {
        let banner: Option<Banner> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(banner)
    }

    /// Create a new banner
    pub async fn create(&self, mut banner: Banner) -> RepoResult<Banner> {
        let now = chrono::Utc::now().timestamp_millis();
        banner.id = None;
        banner.created_at = now;
        banner.updated_at = now;

        let created: Option<Banner> = self.base.db().create(TABLE).content(banner).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create banner".to_string()))
    }

    /// Hard delete a banner
    pub async fn delete(&self, id: &str) -> RepoResult<Banner> {
        let deleted: Option<Banner> = self.base.db().delete(record_id(TABLE, id)).await?;
        deleted.ok_or_else(|| RepoError::NotFound(format!("Banner {} not found", id)))
    }
}
