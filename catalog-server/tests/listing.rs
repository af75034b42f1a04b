//! Repository-level listing properties
//!
//! Drives the product repository directly against a temp-dir store to pin
//! down filter semantics and pagination determinism.

use catalog_server::db::DbService;
use catalog_server::db::models::{ImageRef, Product};
use catalog_server::db::repository::{ProductFilter, ProductRepository, ProductSort, RepoError};

fn sample(name: &str, slug: &str, price: f64) -> Product {
    Product {
        id: None,
        name: name.to_string(),
        slug: slug.to_string(),
        description: String::new(),
        price,
        old_price: None,
        images: vec![ImageRef {
            url: "https://cdn.test/x.jpg".to_string(),
            public_id: format!("x-{slug}"),
        }],
        sizes: Vec::new(),
        colors: Vec::new(),
        category: Vec::new(),
        is_best_seller: false,
        is_most_popular: false,
        is_listed: true,
        created_at: 0,
        updated_at: 0,
    }
}

async fn repo() -> (ProductRepository, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("catalog.db");
    let service = DbService::new(&db_path.to_string_lossy()).await.unwrap();
    (ProductRepository::new(service.db), tmp)
}

fn listed_filter() -> ProductFilter {
    ProductFilter {
        listed_only: true,
        category: None,
        max_price: None,
    }
}

#[tokio::test]
async fn pagination_is_stable_when_sort_keys_tie() {
    let (repo, _tmp) = repo().await;
    for i in 0..9 {
        // Identical price: ordering must fall back to the id tiebreak
        repo.create(sample(&format!("Item {i}"), &format!("item-{i}"), 500.0))
            .await
            .unwrap();
    }

    let mut pass_one = Vec::new();
    for page in 1..=3 {
        let (products, total) = repo
            .list(&listed_filter(), ProductSort::PriceAsc, page, 3)
            .await
            .unwrap();
        assert_eq!(total, 9);
        assert_eq!(products.len(), 3);
        pass_one.extend(products.into_iter().map(|p| p.id.unwrap().to_string()));
    }

    // No record repeated or skipped across pages
    let mut unique = pass_one.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 9);

    // A second pass pages identically
    let mut pass_two = Vec::new();
    for page in 1..=3 {
        let (products, _) = repo
            .list(&listed_filter(), ProductSort::PriceAsc, page, 3)
            .await
            .unwrap();
        pass_two.extend(products.into_iter().map(|p| p.id.unwrap().to_string()));
    }
    assert_eq!(pass_one, pass_two);
}

#[tokio::test]
async fn page_past_end_is_empty_with_correct_total() {
    let (repo, _tmp) = repo().await;
    for i in 0..4 {
        repo.create(sample(&format!("Item {i}"), &format!("item-{i}"), 100.0))
            .await
            .unwrap();
    }

    let (products, total) = repo
        .list(&listed_filter(), ProductSort::Default, 7, 3)
        .await
        .unwrap();
    assert!(products.is_empty());
    assert_eq!(total, 4);
}

#[tokio::test]
async fn max_price_bound_is_inclusive() {
    let (repo, _tmp) = repo().await;
    for (slug, price) in [("low", 100.0), ("edge", 200.0), ("high", 300.0)] {
        repo.create(sample(slug, slug, price)).await.unwrap();
    }

    let filter = ProductFilter {
        max_price: Some(200.0),
        ..listed_filter()
    };
    let (products, total) = repo
        .list(&filter, ProductSort::PriceAsc, 1, 10)
        .await
        .unwrap();
    assert_eq!(total, 2);
    let slugs: Vec<&str> = products.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["low", "edge"]);
}

#[tokio::test]
async fn category_match_is_exact_and_case_sensitive() {
    let (repo, _tmp) = repo().await;
    let mut product = sample("Collagen", "collagen", 100.0);
    product.category = vec!["Weight Management".to_string(), "Detox".to_string()];
    repo.create(product).await.unwrap();

    let filter = ProductFilter {
        category: Some("Weight Management".to_string()),
        ..listed_filter()
    };
    let (_, total) = repo.list(&filter, ProductSort::Default, 1, 10).await.unwrap();
    assert_eq!(total, 1);

    let filter = ProductFilter {
        category: Some("weight management".to_string()),
        ..listed_filter()
    };
    let (_, total) = repo.list(&filter, ProductSort::Default, 1, 10).await.unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn unlisted_records_only_appear_unfiltered() {
    let (repo, _tmp) = repo().await;
    repo.create(sample("Visible", "visible", 100.0)).await.unwrap();
    let mut hidden = sample("Hidden", "hidden", 100.0);
    hidden.is_listed = false;
    repo.create(hidden).await.unwrap();

    let (products, total) = repo
        .list(&listed_filter(), ProductSort::Default, 1, 10)
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(products[0].slug, "visible");

    let all = repo.find_all().await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn slug_lookup_and_conflicts() {
    let (repo, _tmp) = repo().await;
    let created = repo.create(sample("Collagen", "collagen", 100.0)).await.unwrap();
    assert!(created.created_at > 0);

    let found = repo.find_by_slug("collagen").await.unwrap();
    assert_eq!(found.unwrap().name, "Collagen");
    assert!(repo.find_by_slug("nope").await.unwrap().is_none());

    let err = repo
        .create(sample("Other", "collagen", 200.0))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));

    let err = repo
        .replace("product:missing", sample("Ghost", "ghost", 1.0))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}
