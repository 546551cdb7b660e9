use anyhow::Result;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot::Receiver;
use tracing::{debug, error, info};

use crate::constant::LOGGING_INCOMING_REQUEST;
use crate::error::ProductError;
use crate::logging::thread_logging;
use crate::product::repo::ProductStore;
use crate::req::Method::{DELETE, GET, OPTIONS, POST, PUT};
use crate::req::Request;
use crate::res::Response;
use crate::svc::Service;
use crate::utils::path_segments;

pub struct Server {
    svc: Arc<Service>,
}

impl Server {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            svc: Arc::new(Service::new(store)),
        }
    }

    pub async fn start(self, listener: TcpListener, mut shutdown_rx: Receiver<()>) -> Result<()> {
        info!("Server running on http://{}", listener.local_addr()?);

        loop {
            tokio::select! {
                conn = listener.accept() => {
                    let Some((stream, peer)) = accepted(conn) else {
                        // EMFILE and friends clear up on their own
                        tokio::time::sleep(ACCEPT_BACKOFF).await;
                        continue;
                    };
                    let svc = Arc::clone(&self.svc);
                    tokio::spawn(async move {
                        thread_logging(LOGGING_INCOMING_REQUEST, peer);
                        if let Err(e) = Self::handle_client(stream, &svc).await {
                            error!("Connection error: {}", e);
                        }
                    });
                },
                _ = &mut shutdown_rx => {
                    info!("shutting down ...");
                    break;
                }
            }
        }
        Ok(())
    }

    async fn handle_client(mut stream: TcpStream, svc: &Service) -> Result<()> {
        let (reader, mut writer) = stream.split();
        let response = match Request::new(reader).await {
            Ok(request) => {
                let response = route(svc, &request).await;
                info!(
                    "{:?} {} -> {}",
                    request.method, request.path, response.status
                );
                response
            }
            Err(e) => {
                info!("error {}", e);
                ProductError::BadRequest.into()
            }
        };
        writer.write_all(response.to_http().as_bytes()).await?;
        writer.flush().await?;
        stream.shutdown().await?;
        Ok(())
    }
}

const ACCEPT_BACKOFF: Duration = Duration::from_millis(50);

/// A failed accept only loses that connection; the listener keeps serving.
fn accepted(conn: io::Result<(TcpStream, SocketAddr)>) -> Option<(TcpStream, SocketAddr)> {
    match conn {
        Ok(conn) => Some(conn),
        Err(e) => {
            error!("accept error: {}", e);
            None
        }
    }
}

/// Dispatches a parsed request to its handler and turns any failure into the
/// matching JSON error response.
pub async fn route(svc: &Service, request: &Request) -> Response {
    let segments = path_segments(&request.path);
    let result = match (&request.method, segments.as_slice()) {
        (OPTIONS, _) => Ok(Response::no_content()),
        (GET, ["health"]) => Ok(svc.health()),
        (GET, ["products"]) => svc.list_products(request).await,
        (GET, ["products", "search"]) => svc.search_products(request).await,
        (GET, ["products", id]) => svc.get_product(id).await,
        (POST, ["products"]) => svc.create_product(request).await,
        (PUT, ["products", id]) => svc.update_product(id, request).await,
        (DELETE, ["products", id]) => svc.delete_product(id).await,
        _ => Err(ProductError::RouteNotFound),
    };
    result.unwrap_or_else(|e| {
        if e.status() >= 500 {
            error!("{:?}", e);
        } else {
            debug!("{}", e);
        }
        e.into()
    })
}
