use std::sync::Arc;

use anyhow::{Context, Result};
use product_service::cfg::Config;
use product_service::product::repo::ProductRepository;
use product_service::server::Server;
use product_service::{db, logging};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env()?;
    logging::init(cfg.debug);
    info!("starting product-service with {:?}", cfg);

    let pool = db::connect(&cfg.db);
    db::init_schema(&pool).await?;

    let listener = TcpListener::bind(cfg.addr())
        .await
        .with_context(|| format!("Failed to bind {}", cfg.addr()))?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = shutdown_tx.send(());
            }
            Err(e) => {
                // keep serving without a shutdown hook
                error!("failed to listen for ctrl-c: {}", e);
                std::future::pending::<()>().await;
            }
        }
    });

    let server = Server::new(Arc::new(ProductRepository::new(pool.clone())));
    server.start(listener, shutdown_rx).await?;
    pool.close().await;
    Ok(())
}
