use crate::{
    client::{ApiClient, ApiError},
    models::{CreateVitalsRequest, Vitals, VitalsQuery},
};

use super::require_id;

/// Access to `/vitals`.
#[derive(Debug, Clone)]
pub struct VitalsService {
    client: ApiClient,
}

impl VitalsService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// List readings, newest first as returned by the server.
    ///
    /// # Errors
    /// Propagates [`ApiError`] from the client.
    pub async fn list(&self, query: &VitalsQuery) -> Result<Vec<Vitals>, ApiError> {
        self.client.get_with_query("vitals", &query.to_pairs()).await
    }

    /// # Errors
    /// Returns [`ApiError::Validation`] for id `0` without sending a request.
    pub async fn get(&self, id: u64) -> Result<Vitals, ApiError> {
        let id = require_id(id, "Invalid vitals ID")?;
        self.client.get(&format!("vitals/{id}")).await
    }

    /// # Errors
    /// Propagates [`ApiError`] from the client.
    pub async fn create(&self, reading: &CreateVitalsRequest) -> Result<Vitals, ApiError> {
        self.client.post("vitals", reading).await
    }
}
