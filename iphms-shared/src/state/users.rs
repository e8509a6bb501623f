//! Loading helpers and notices for user views.

use tracing::warn;

use crate::{
    models::{Notice, UpdateUserRequest, User},
    services::UserService,
};

pub const LIST_FAILED: &str = "Failed to fetch users";
pub const DETAIL_FAILED: &str = "Failed to fetch user data";
pub const UPDATE_FAILED: &str = "Failed to update user";
pub const UPDATE_SUCCEEDED: &str = "User updated successfully";
pub const DELETE_FAILED: &str = "Failed to delete user";
pub const DELETE_SUCCEEDED: &str = "User deleted successfully";
pub const NO_CHANGES: &str = "No changes detected";
pub const USER_NOT_FOUND: &str = "User not found";

/// # Errors
/// Returns the message to display; the underlying error is logged.
pub async fn load_users(service: &UserService) -> Result<Vec<User>, String> {
    service.list().await.map_err(|err| {
        warn!(error = %err, "failed to fetch users");
        LIST_FAILED.to_string()
    })
}

/// # Errors
/// Returns the message to display; the underlying error is logged.
pub async fn load_user(service: &UserService, id: u64) -> Result<User, String> {
    service.get(id).await.map_err(|err| {
        warn!(error = %err, user_id = id, "failed to fetch user");
        DETAIL_FAILED.to_string()
    })
}

/// Send a profile update and describe the outcome.
///
/// # Errors
/// Returns an error notice carrying the server's message when it gave one.
pub async fn update_user(
    service: &UserService,
    id: u64,
    changes: &UpdateUserRequest,
) -> Result<(User, Notice), Notice> {
    if changes.is_empty() {
        return Err(Notice::error(NO_CHANGES));
    }
    match service.update(id, changes).await {
        Ok(user) => Ok((user, Notice::success(UPDATE_SUCCEEDED))),
        Err(err) => {
            warn!(error = %err, user_id = id, "failed to update user");
            Err(Notice::error(err.user_message(UPDATE_FAILED)))
        }
    }
}

/// Delete a user and drop it from `users` when the server agrees.
///
/// # Errors
/// Returns an error notice carrying the server's message when it gave one.
pub async fn delete_user(
    service: &UserService,
    users: &mut Vec<User>,
    id: u64,
) -> Result<Notice, Notice> {
    match service.delete(id).await {
        Ok(()) => {
            users.retain(|user| user.id != id);
            Ok(Notice::success(DELETE_SUCCEEDED))
        }
        Err(err) => {
            warn!(error = %err, user_id = id, "failed to delete user");
            Err(Notice::error(err.user_message(DELETE_FAILED)))
        }
    }
}
