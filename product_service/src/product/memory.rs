use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::model::{NewProduct, Product, ProductChanges};
use super::repo::ProductStore;

/// In-process stand-in for the `products` table.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Product>>,
}

impl MemoryStore {
    // keeps timestamps strictly increasing even on a coarse clock
    fn tick(rows: &[Product]) -> DateTime<Utc> {
        let now = Utc::now();
        let latest = rows
            .iter()
            .flat_map(|p| [p.created_at, p.updated_at])
            .max();
        match latest {
            Some(latest) if latest >= now => latest + Duration::microseconds(1),
            _ => now,
        }
    }

    fn newest_first(mut products: Vec<Product>) -> Vec<Product> {
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        products
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn list(&self, category: Option<&str>) -> Result<Vec<Product>, sqlx::Error> {
        let rows = self.rows.lock().unwrap();
        let products = rows
            .iter()
            .filter(|p| category.is_none() || p.category.as_deref() == category)
            .cloned()
            .collect();
        Ok(Self::newest_first(products))
    }

    async fn get(&self, id: Uuid) -> Result<Option<Product>, sqlx::Error> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|p| p.id == id).cloned())
    }

    async fn search(&self, query: &str) -> Result<Vec<Product>, sqlx::Error> {
        let needle = query.to_lowercase();
        let rows = self.rows.lock().unwrap();
        let products = rows
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        Ok(Self::newest_first(products))
    }

    async fn create(&self, product: &NewProduct) -> Result<Uuid, sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        let now = Self::tick(&rows);
        let id = Uuid::new_v4();
        rows.push(Product {
            id,
            name: product.name.clone(),
            description: Some(product.description.clone()),
            price: product.price,
            stock_quantity: product.stock_quantity,
            category: Some(product.category.clone()),
            image_url: Some(product.image_url.clone()),
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn update(&self, id: Uuid, changes: &ProductChanges) -> Result<bool, sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        let now = Self::tick(&rows);
        let Some(row) = rows.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        // mirrors the NOT NULL constraints on name and price
        let (Some(name), Some(price)) = (changes.name.clone(), changes.price) else {
            return Err(sqlx::Error::Protocol(
                "null value violates not-null constraint".to_string(),
            ));
        };
        row.name = name;
        row.description = changes.description.clone();
        row.price = price;
        row.stock_quantity = changes.stock_quantity;
        row.category = changes.category.clone();
        row.image_url = changes.image_url.clone();
        row.updated_at = now;
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        Ok(rows.len() < before)
    }
}
