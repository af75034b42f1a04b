//! Category and banner repository behavior against a temp store

use catalog_server::db::DbService;
use catalog_server::db::models::{Banner, Category, ImageRef, Product};
use catalog_server::db::repository::{
    BannerRepository, CategoryRepository, ProductRepository, RepoError,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

async fn open_store() -> (Surreal<Db>, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("catalog.db");
    let service = DbService::new(&db_path.to_string_lossy()).await.unwrap();
    (service.db, tmp)
}

#[tokio::test]
async fn category_names_sort_and_conflict() {
    let (db, _tmp) = open_store().await;
    let repo = CategoryRepository::new(db);

    let created = repo.create("Weight Management").await.unwrap();
    repo.create("Digestive Health").await.unwrap();

    let names: Vec<String> = repo
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Digestive Health", "Weight Management"]);

    // Lookup by the id string clients see
    let id = created.id.as_ref().unwrap().to_string();
    let found = repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(found.name, "Weight Management");

    let err = repo.create("Weight Management").await.unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));

    repo.delete(&id).await.unwrap();
    assert!(repo.find_by_id(&id).await.unwrap().is_none());
    let err = repo.delete(&id).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[tokio::test]
async fn unique_index_violation_classifies_as_duplicate() {
    let (db, _tmp) = open_store().await;

    // Insert directly, bypassing the repository pre-check, so the second
    // write hits the store-level unique index
    let category = Category {
        id: None,
        name: "Detox".to_string(),
        created_at: 0,
        updated_at: 0,
    };
    let _first: Option<Category> = db
        .create("category")
        .content(category.clone())
        .await
        .unwrap();
    let second: Result<Option<Category>, surrealdb::Error> =
        db.create("category").content(category).await;

    let err = RepoError::from(second.unwrap_err());
    assert!(matches!(err, RepoError::Duplicate(_)), "{err:?}");
}

#[tokio::test]
async fn deleting_category_leaves_product_membership_alone() {
    let (db, _tmp) = open_store().await;
    let categories = CategoryRepository::new(db.clone());
    let products = ProductRepository::new(db);

    let created = categories.create("Weight Management").await.unwrap();
    products
        .create(Product {
            id: None,
            name: "Collagen".to_string(),
            slug: "collagen".to_string(),
            description: String::new(),
            price: 100.0,
            old_price: None,
            images: vec![ImageRef {
                url: "https://cdn.test/x.jpg".to_string(),
                public_id: "x".to_string(),
            }],
            sizes: Vec::new(),
            colors: Vec::new(),
            category: vec!["Weight Management".to_string()],
            is_best_seller: false,
            is_most_popular: false,
            is_listed: true,
            created_at: 0,
            updated_at: 0,
        })
        .await
        .unwrap();

    let id = created.id.unwrap().to_string();
    categories.delete(&id).await.unwrap();

    // Membership is by value; the dangling name stays
    let product = products.find_by_slug("collagen").await.unwrap().unwrap();
    assert_eq!(product.category, vec!["Weight Management"]);
}

#[tokio::test]
async fn banners_order_and_delete() {
    let (db, _tmp) = open_store().await;
    let repo = BannerRepository::new(db);

    let make = |public_id: &str, sort_order: i64| Banner {
        id: None,
        image: ImageRef {
            url: format!("https://cdn.test/{public_id}.jpg"),
            public_id: public_id.to_string(),
        },
        link: "/shop".to_string(),
        sort_order,
        created_at: 0,
        updated_at: 0,
    };

    repo.create(make("b-late", 10)).await.unwrap();
    let early = repo.create(make("b-early", -5)).await.unwrap();
    assert!(early.created_at > 0);

    let banners = repo.find_all().await.unwrap();
    let ids: Vec<&str> = banners.iter().map(|b| b.image.public_id.as_str()).collect();
    assert_eq!(ids, vec!["b-early", "b-late"]);

    let id = early.id.unwrap().to_string();
    let found = repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(found.image.public_id, "b-early");

    repo.delete(&id).await.unwrap();
    let err = repo.delete(&id).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
    assert_eq!(repo.find_all().await.unwrap().len(), 1);
}
