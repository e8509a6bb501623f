use crate::{
    client::{ApiClient, ApiError},
    models::{UpdateUserRequest, User},
};

use super::require_id;

const INVALID_ID: &str = "Invalid user ID";

/// CRUD over `/users`.
#[derive(Debug, Clone)]
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    /// Propagates [`ApiError`] from the client.
    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        self.client.get("users").await
    }

    /// # Errors
    /// Returns [`ApiError::Validation`] for id `0` without sending a request.
    pub async fn get(&self, id: u64) -> Result<User, ApiError> {
        let id = require_id(id, INVALID_ID)?;
        self.client.get(&format!("users/{id}")).await
    }

    /// Apply a partial update; absent fields are left alone by the server.
    ///
    /// # Errors
    /// Returns [`ApiError::Validation`] for id `0` without sending a request.
    pub async fn update(&self, id: u64, changes: &UpdateUserRequest) -> Result<User, ApiError> {
        let id = require_id(id, INVALID_ID)?;
        self.client.patch(&format!("users/{id}"), changes).await
    }

    /// # Errors
    /// Returns [`ApiError::Validation`] for id `0` without sending a request.
    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        let id = require_id(id, INVALID_ID)?;
        self.client.delete(&format!("users/{id}")).await
    }
}
