use async_trait::async_trait;
use sqlx::Postgres;
use uuid::Uuid;

use super::model::{NewProduct, Product, ProductChanges};

const PRODUCT_COLUMNS: &str = "id, name, description, price, stock_quantity, category, \
                               image_url, created_at, updated_at";

/// Data access for the `products` table. Each method runs one statement.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn list(&self, category: Option<&str>) -> Result<Vec<Product>, sqlx::Error>;
    async fn get(&self, id: Uuid) -> Result<Option<Product>, sqlx::Error>;
    async fn search(&self, query: &str) -> Result<Vec<Product>, sqlx::Error>;
    async fn create(&self, product: &NewProduct) -> Result<Uuid, sqlx::Error>;
    /// Returns `false` when no row has the given id.
    async fn update(&self, id: Uuid, changes: &ProductChanges) -> Result<bool, sqlx::Error>;
    /// Returns `false` when no row has the given id.
    async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error>;
}

/// `ILIKE` pattern matching `query` literally anywhere in the column.
fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[derive(Clone)]
pub struct ProductRepository {
    pub pool: sqlx::Pool<Postgres>,
}

impl ProductRepository {
    pub fn new(pool: sqlx::Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn list(&self, category: Option<&str>) -> Result<Vec<Product>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        match category {
            Some(category) => {
                sqlx::query_as::<_, Product>(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products WHERE category = $1 ORDER BY created_at DESC"
                ))
                .bind(category)
                .fetch_all(&mut *conn)
                .await
            }
            None => {
                sqlx::query_as::<_, Product>(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC"
                ))
                .fetch_all(&mut *conn)
                .await
            }
        }
    }

    async fn get(&self, id: Uuid) -> Result<Option<Product>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
    }

    async fn search(&self, query: &str) -> Result<Vec<Product>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query_as::<_, Product>(&format!(
            r#"SELECT {PRODUCT_COLUMNS} FROM products
                WHERE name ILIKE $1 ESCAPE '\' OR description ILIKE $1 ESCAPE '\'
                ORDER BY created_at DESC"#
        ))
        .bind(contains_pattern(query))
        .fetch_all(&mut *conn)
        .await
    }

    async fn create(&self, product: &NewProduct) -> Result<Uuid, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        let row: (Uuid,) = sqlx::query_as(
            r#"INSERT INTO products (id, name, description, price,
                stock_quantity, category, image_url)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id"#,
        )
        .bind(Uuid::new_v4())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock_quantity)
        .bind(&product.category)
        .bind(&product.image_url)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row.0)
    }

    async fn update(&self, id: Uuid, changes: &ProductChanges) -> Result<bool, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $1, description = $2, price = $3, stock_quantity = $4,
                category = $5, image_url = $6, updated_at = NOW()
            WHERE id = $7"#,
        )
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.price)
        .bind(changes.stock_quantity)
        .bind(&changes.category)
        .bind(&changes.image_url)
        .bind(id)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
