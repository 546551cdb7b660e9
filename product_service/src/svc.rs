use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use crate::constant::{MSG_CREATED, MSG_DELETED, MSG_UPDATED, SERVICE_NAME};
use crate::error::ProductError;
use crate::product::model::{
    Created, CreateProductForm, NewProduct, ProductChanges, UpdateProductForm,
};
use crate::product::repo::ProductStore;
use crate::req::Request;
use crate::res::Response;
use crate::utils::des_from_slice;

#[derive(Clone)]
pub struct Service {
    store: Arc<dyn ProductStore>,
}

impl Service {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub fn health(&self) -> Response {
        Response {
            status: 200,
            body: Some(json!({ "status": "healthy", "service": SERVICE_NAME }).to_string()),
        }
    }

    pub async fn list_products(&self, request: &Request) -> Result<Response, ProductError> {
        let category = request.param("category").filter(|c| !c.is_empty());
        let products = self.store.list(category).await?;
        debug!("listed {} products (category: {:?})", products.len(), category);
        Response::json(200, &products)
    }

    pub async fn get_product(&self, id: &str) -> Result<Response, ProductError> {
        let id = parse_id(id)?;
        match self.store.get(id).await? {
            Some(product) => Response::json(200, &product),
            None => Err(ProductError::NotFound),
        }
    }

    pub async fn search_products(&self, request: &Request) -> Result<Response, ProductError> {
        let query = request
            .param("q")
            .filter(|q| !q.is_empty())
            .ok_or(ProductError::MissingQuery)?;
        let products = self.store.search(query).await?;
        debug!("search {:?} matched {} products", query, products.len());
        Response::json(200, &products)
    }

    pub async fn create_product(&self, request: &Request) -> Result<Response, ProductError> {
        let form: CreateProductForm =
            des_from_slice(request.body.as_deref().unwrap_or(&b"{}"[..]))?;
        let new = NewProduct::try_from(form)?;
        let id = self.store.create(&new).await?;
        info!("created product {}", id);
        Response::json(
            201,
            &Created {
                id,
                message: MSG_CREATED.to_string(),
            },
        )
    }

    pub async fn update_product(
        &self,
        id: &str,
        request: &Request,
    ) -> Result<Response, ProductError> {
        let id = parse_id(id)?;
        let form: UpdateProductForm =
            des_from_slice(request.body.as_deref().unwrap_or(&b"{}"[..]))?;
        let changes = ProductChanges::from(form);
        if !self.store.update(id, &changes).await? {
            return Err(ProductError::NotFound);
        }
        info!("updated product {}", id);
        Ok(Response::message(200, MSG_UPDATED))
    }

    pub async fn delete_product(&self, id: &str) -> Result<Response, ProductError> {
        let id = parse_id(id)?;
        if !self.store.delete(id).await? {
            return Err(ProductError::NotFound);
        }
        info!("deleted product {}", id);
        Ok(Response::message(200, MSG_DELETED))
    }
}

// a malformed id cannot name any row
fn parse_id(id: &str) -> Result<Uuid, ProductError> {
    Uuid::parse_str(id).map_err(|_| ProductError::NotFound)
}
