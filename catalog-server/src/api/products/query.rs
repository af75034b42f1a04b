//! Shop listing query builder
//!
//! Translates the free-form query string of `GET /api/products` into a
//! validated repository query plus the pagination envelope math.

use serde::Deserialize;

use crate::db::repository::{ProductFilter, ProductSort};
use crate::utils::AppError;

/// Page size when the shop client sends no `limit`
pub const DEFAULT_PAGE_SIZE: i64 = 6;

/// Raw listing parameters as they arrive on the query string
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ListingParams {
    /// `admin=true` returns every record, unfiltered and unpaginated
    pub admin: Option<bool>,
    pub category: Option<String>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<f64>,
    pub sort: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Validated listing query, ready for the repository
#[derive(Debug, Clone)]
pub struct ProductQuery {
    pub filter: ProductFilter,
    pub sort: ProductSort,
    pub page: i64,
    pub limit: i64,
}

impl ListingParams {
    pub fn is_admin(&self) -> bool {
        self.admin.unwrap_or(false)
    }

    /// Validate and normalize into a repository query.
    ///
    /// Unrecognized sort values fall back to the default order; a page below
    /// 1 clamps to 1; a non-positive limit is rejected outright.
    pub fn into_query(self) -> Result<ProductQuery, AppError> {
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_SIZE);
        if limit <= 0 {
            return Err(AppError::validation("limit must be a positive integer"));
        }
        let page = self.page.unwrap_or(1).max(1);

        let sort = match self.sort.as_deref() {
            Some("priceLowHigh") => ProductSort::PriceAsc,
            Some("priceHighLow") => ProductSort::PriceDesc,
            Some("AlphabeticalAZ") => ProductSort::NameAsc,
            Some("AlphabeticalZA") => ProductSort::NameDesc,
            Some("BestSeller") => ProductSort::Newest,
            _ => ProductSort::Default,
        };

        let filter = ProductFilter {
            listed_only: true,
            category: self.category.filter(|c| !c.is_empty()),
            max_price: self.max_price,
        };

        Ok(ProductQuery {
            filter,
            sort,
            page,
            limit,
        })
    }
}

/// `pages` for the listing envelope: ceil(total / limit)
pub fn page_count(total: i64, limit: i64) -> i64 {
    (total + limit - 1) / limit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let query = ListingParams::default().into_query().unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, DEFAULT_PAGE_SIZE);
        assert_eq!(query.sort, ProductSort::Default);
        assert!(query.filter.listed_only);
        assert!(query.filter.category.is_none());
    }

    #[test]
    fn rejects_non_positive_limit() {
        for limit in [0, -1, -6] {
            let params = ListingParams {
                limit: Some(limit),
                ..Default::default()
            };
            assert!(params.into_query().is_err());
        }
    }

    #[test]
    fn clamps_page_below_one() {
        let params = ListingParams {
            page: Some(-3),
            ..Default::default()
        };
        assert_eq!(params.into_query().unwrap().page, 1);
    }

    #[test]
    fn maps_sort_vocabulary() {
        let cases = [
            ("priceLowHigh", ProductSort::PriceAsc),
            ("priceHighLow", ProductSort::PriceDesc),
            ("AlphabeticalAZ", ProductSort::NameAsc),
            ("AlphabeticalZA", ProductSort::NameDesc),
            ("BestSeller", ProductSort::Newest),
            ("somethingElse", ProductSort::Default),
        ];
        for (value, expected) in cases {
            let params = ListingParams {
                sort: Some(value.to_string()),
                ..Default::default()
            };
            assert_eq!(params.into_query().unwrap().sort, expected, "{value}");
        }
    }

    #[test]
    fn blank_category_is_no_filter() {
        let params = ListingParams {
            category: Some(String::new()),
            ..Default::default()
        };
        assert!(params.into_query().unwrap().filter.category.is_none());
    }

    #[test]
    fn page_count_is_ceiling() {
        assert_eq!(page_count(13, 6), 3);
        assert_eq!(page_count(12, 6), 2);
        assert_eq!(page_count(1, 6), 1);
        assert_eq!(page_count(0, 6), 0);
    }
}
