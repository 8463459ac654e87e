use shared_database::StoreClient;
use tracing::debug;

use crate::models::{CatalogError, Service};

pub struct CatalogService<'a> {
    store: &'a StoreClient,
}

impl<'a> CatalogService<'a> {
    pub fn new(store: &'a StoreClient) -> Self {
        Self { store }
    }

    /// Active treatments only. Retired services stay in the table for the
    /// sake of historical appointments but are never listed.
    pub async fn list_active(&self) -> Result<Vec<Service>, CatalogError> {
        let services = self
            .store
            .select::<Service>("services", "is_active=eq.true&order=name.asc")
            .await?;
        debug!("Listed {} active services", services.len());
        Ok(services)
    }

    pub async fn get(&self, service_id: &str) -> Result<Service, CatalogError> {
        let mut rows = self
            .store
            .select::<Service>("services", &format!("id=eq.{}", service_id))
            .await?;
        if rows.is_empty() {
            return Err(CatalogError::NotFound);
        }
        Ok(rows.remove(0))
    }
}
