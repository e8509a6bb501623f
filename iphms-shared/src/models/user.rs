use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::Timestamp;

/// Role assigned to an account.
///
/// Any role string the client does not recognise is read as [`UserRole::User`]
/// so unknown values never grant admin capabilities.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    #[default]
    #[serde(other)]
    User,
}

impl UserRole {
    /// Return the canonical string representation used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Whether the role unlocks admin-only routes and commands.
    #[must_use]
    pub fn is_admin(self) -> bool {
        match self {
            Self::Admin => true,
            Self::User => false,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err("unknown user role"),
        }
    }
}

/// A user account as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Numeric account identifier.
    #[serde(rename = "ID", alias = "id")]
    pub id: u64,

    /// Display name.
    pub name: String,

    /// Login email.
    pub email: String,

    /// Date of birth as entered at registration (`YYYY-MM-DD`).
    #[serde(default)]
    pub date_of_birth: String,

    /// Identifier of the monitoring device paired with the account.
    #[serde(default)]
    pub device_id: String,

    /// Account role.
    #[serde(default)]
    pub role: UserRole,

    /// Creation time.
    #[serde(rename = "CreatedAt", alias = "createdAt", default)]
    pub created_at: Option<Timestamp>,

    /// Last modification time.
    #[serde(rename = "UpdatedAt", alias = "updatedAt", default)]
    pub updated_at: Option<Timestamp>,
}

impl User {
    /// Whether this account has the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Partial update for a user; absent fields are left untouched server-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

impl UpdateUserRequest {
    /// True when no field would be sent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.date_of_birth.is_none()
            && self.device_id.is_none()
    }
}
