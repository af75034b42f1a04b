//! Product Repository

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::Product;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "product";

/// Shop-listing filter; `listed_only` is cleared for admin reads
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub listed_only: bool,
    pub category: Option<String>,
    pub max_price: Option<f64>,
}

/// Listing sort keys. Every variant breaks ties by record id so that
/// pagination stays stable across requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
    Newest,
}

impl ProductSort {
    fn order_clause(self) -> &'static str {
        match self {
            ProductSort::Default => "ORDER BY id ASC",
            ProductSort::PriceAsc => "ORDER BY price ASC, id ASC",
            ProductSort::PriceDesc => "ORDER BY price DESC, id ASC",
            ProductSort::NameAsc => "ORDER BY name ASC, id ASC",
            ProductSort::NameDesc => "ORDER BY name DESC, id ASC",
            ProductSort::Newest => "ORDER BY created_at DESC, id ASC",
        }
    }
}

// =============================================================================
// Product Repository
// =============================================================================

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find every product, unfiltered (admin view)
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product ORDER BY id ASC")
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Filtered, sorted, paginated listing plus the total match count.
    ///
    /// `page` is 1-based; callers validate `limit > 0` before getting here.
    pub async fn list(
        &self,
        filter: &ProductFilter,
        sort: ProductSort,
        page: i64,
        limit: i64,
    ) -> RepoResult<(Vec<Product>, i64)> {
        let mut wheres: Vec<&str> = Vec::new();
        if filter.listed_only {
            // Documents written before the flag existed carry no is_listed
            // field; absent counts as listed
            wheres.push("is_listed != false");
        }
        if filter.category.is_some() {
            wheres.push("category CONTAINS $category");
        }
        if filter.max_price.is_some() {
            wheres.push("price <= $max_price");
        }
        let where_clause = if wheres.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", wheres.join(" AND "))
        };

        let count_sql = format!("SELECT count() FROM product{where_clause} GROUP ALL");
        let mut count_query = self.base.db().query(&count_sql);
        if let Some(category) = &filter.category {
            count_query = count_query.bind(("category", category.clone()));
        }
        if let Some(max_price) = filter.max_price {
            count_query = count_query.bind(("max_price", max_price));
        }
        let total: Option<i64> = count_query.await?.take((0, "count"))?;
        let total = total.unwrap_or(0);

        let start = (page - 1) * limit;
        let select_sql = format!(
            "SELECT * FROM product{where_clause} {} LIMIT {limit} START {start}",
            sort.order_clause()
        );
        let mut select_query = self.base.db().query(&select_sql);
        if let Some(category) = &filter.category {
            select_query = select_query.bind(("category", category.clone()));
        }
        if let Some(max_price) = filter.max_price {
            select_query = select_query.bind(("max_price", max_price));
        }
        let products: Vec<Product> = select_query.await?.take(0)?;

        Ok((products, total))
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let product: Option<Product> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(product)
    }

    /// Find product by slug
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Product>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM product WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug.to_string()))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        Ok(products.into_iter().next())
    }

    /// Create a new product
    pub async fn create(&self, mut product: Product) -> RepoResult<Product> {
        // Friendly conflict before the unique index fires; the index is the
        // backstop for the racing case
        if self.find_by_slug(&product.slug).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Product slug '{}' already exists",
                product.slug
            )));
        }

        let now = chrono::Utc::now().timestamp_millis();
        product.id = None;
        product.created_at = now;
        product.updated_at = now;

        let created: Option<Product> = self.base.db().create(TABLE).content(product).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Replace a product record wholesale, preserving its creation time
    pub async fn replace(&self, id: &str, mut product: Product) -> RepoResult<Product> {
        let rid = record_id(TABLE, id);
        let existing: Option<Product> = self.base.db().select(rid.clone()).await?;
        let existing =
            existing.ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))?;

        if product.slug != existing.slug && self.find_by_slug(&product.slug).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Product slug '{}' already exists",
                product.slug
            )));
        }

        product.id = None;
        product.created_at = existing.created_at;
        product.updated_at = chrono::Utc::now().timestamp_millis();

        let updated: Option<Product> = self.base.db().update(rid).content(product).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Hard delete a product
    pub async fn delete(&self, id: &str) -> RepoResult<Product> {
        let deleted: Option<Product> = self.base.db().delete(record_id(TABLE, id)).await?;
        deleted.ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }
}
