//! Thin request/response mappers over [`ApiClient`](crate::client::ApiClient).

mod auth;
mod users;
mod vitals;

pub use auth::AuthService;
pub use users::UserService;
pub use vitals::VitalsService;

use crate::client::ApiError;

fn require_id(id: u64, message: &str) -> Result<u64, ApiError> {
    if id == 0 {
        Err(ApiError::Validation(message.to_string()))
    } else {
        Ok(id)
    }
}
