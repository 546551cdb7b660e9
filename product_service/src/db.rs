use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Pool, Postgres};
use tracing::info;

use crate::cfg::DbConfig;

const CREATE_PRODUCTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id UUID PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        description TEXT,
        price DECIMAL(10, 2) NOT NULL,
        stock_quantity INTEGER NOT NULL DEFAULT 0,
        category VARCHAR(100),
        image_url VARCHAR(500),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#;
const CREATE_CATEGORY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_products_category ON products(category)";
const CREATE_NAME_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_products_name ON products(name)";

pub fn connect_options(cfg: &DbConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&cfg.db_host)
        .port(cfg.db_port)
        .username(&cfg.db_user)
        .password(&cfg.db_password)
        .database(&cfg.db_name)
}

/// Connections are opened on first use and handed out one per repository
/// call.
pub fn connect(cfg: &DbConfig) -> Pool<Postgres> {
    PgPoolOptions::new().connect_lazy_with(connect_options(cfg))
}

pub async fn init_schema(pool: &Pool<Postgres>) -> Result<()> {
    let mut conn = pool
        .acquire()
        .await
        .context("Failed to connect to database")?;
    for statement in [CREATE_PRODUCTS_TABLE, CREATE_CATEGORY_INDEX, CREATE_NAME_INDEX] {
        sqlx::query(statement)
            .execute(&mut *conn)
            .await
            .context("Failed to initialize schema")?;
    }
    info!("Database initialized successfully");
    Ok(())
}
