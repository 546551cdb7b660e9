//! Runs against a live Postgres configured through the usual `DB_*` variables.
//! `cargo test -- --ignored` to include them.

use product_service::cfg::Config;
use product_service::db;
use product_service::product::model::{NewProduct, ProductChanges};
use product_service::product::repo::{ProductRepository, ProductStore};
use rust_decimal::dec;
use uuid::Uuid;

async fn repo() -> ProductRepository {
    let cfg = Config::from_env().unwrap();
    let pool = db::connect(&cfg.db);
    db::init_schema(&pool).await.unwrap();
    ProductRepository::new(pool)
}

fn widget(category: &str) -> NewProduct {
    NewProduct {
        name: format!("Widget {}", Uuid::new_v4()),
        description: "A sturdy widget".to_string(),
        price: dec!(19.99),
        stock_quantity: 5,
        category: category.to_string(),
        image_url: String::new(),
    }
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn schema_init_is_idempotent() {
    let cfg = Config::from_env().unwrap();
    let pool = db::connect(&cfg.db);
    db::init_schema(&pool).await.unwrap();
    db::init_schema(&pool).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn create_get_update_delete() {
    let repo = repo().await;
    let new = widget("General");
    let id = repo.create(&new).await.unwrap();

    let stored = repo.get(id).await.unwrap().unwrap();
    assert_eq!(stored.name, new.name);
    assert_eq!(stored.price, dec!(19.99));
    assert_eq!(stored.price.to_string(), "19.99");
    assert_eq!(stored.category.as_deref(), Some("General"));

    let changes = ProductChanges {
        name: Some("Renamed".to_string()),
        description: None,
        price: Some(dec!(5.10)),
        stock_quantity: 0,
        category: Some("Tools".to_string()),
        image_url: None,
    };
    assert!(repo.update(id, &changes).await.unwrap());
    let updated = repo.get(id).await.unwrap().unwrap();
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.price, dec!(5.10));
    assert_eq!(updated.description, None);
    assert!(updated.updated_at > stored.updated_at);
    assert_eq!(updated.created_at, stored.created_at);

    assert!(repo.delete(id).await.unwrap());
    assert!(repo.get(id).await.unwrap().is_none());
    assert!(!repo.delete(id).await.unwrap());
    assert!(!repo.update(id, &changes).await.unwrap());
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn search_and_category_filter() {
    let repo = repo().await;
    let category = format!("cat-{}", Uuid::new_v4());
    let first = repo.create(&widget(&category)).await.unwrap();
    let second = repo.create(&widget(&category)).await.unwrap();

    let listed: Vec<Uuid> = repo
        .list(Some(&category))
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(listed, vec![second, first]);

    let found = repo.search("STURDY").await.unwrap();
    assert!(found.iter().any(|p| p.id == first));
    assert!(repo.search(&Uuid::new_v4().to_string()).await.unwrap().is_empty());
    let wildcard = repo.search("_").await.unwrap();
    assert!(wildcard.iter().all(|p| p.id != first && p.id != second));

    repo.delete(first).await.unwrap();
    repo.delete(second).await.unwrap();
}
