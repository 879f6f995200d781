//! API request and response types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ==================== Writes ====================

/// Toast shown to the admin after a write.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            title: "Success".to_string(),
            description: description.into(),
        }
    }

    pub fn created(label: &str) -> Self {
        Self::success(format!("{} added successfully", label))
    }

    pub fn updated(label: &str) -> Self {
        Self::success(format!("{} updated successfully", label))
    }

    pub fn deleted(label: &str) -> Self {
        Self::success(format!("{} deleted successfully", label))
    }
}

/// Response to a create or update: the written row plus the refetched list.
#[derive(Debug, Serialize, ToSchema)]
pub struct WriteResponse<T> {
    pub data: T,
    pub rows: Vec<T>,
    pub notice: Notice,
}

/// Response to a delete: the refetched list.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse<T> {
    pub rows: Vec<T>,
    pub notice: Notice,
}

/// Query parameters for deletes.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DeleteQuery {
    /// Must be true; unconfirmed deletes are rejected without touching the store.
    #[serde(default)]
    pub confirm: bool,
}

/// Response to a footer batch save.
#[derive(Debug, Serialize, ToSchema)]
pub struct FooterSaveResponse {
    /// Rows that actually changed.
    pub updated: usize,
    pub rows: Vec<crate::domain::FooterItem>,
    pub notice: Notice,
}

/// Response to a profile save or photo upload.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub data: crate::domain::Profile,
    pub notice: Notice,
}

/// Response to a contact form submission.
#[derive(Debug, Serialize, ToSchema)]
pub struct ContactResponse {
    pub notice: Notice,
}

// ==================== Health ====================

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Database connectivity.
    pub database: String,
    /// Timestamp.
    pub timestamp: String,
}

// ==================== Authentication ====================

/// Login request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// User email.
    pub email: String,
    /// User password.
    pub password: String,
}

/// Login response.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// JWT token.
    pub token: String,
    /// User information.
    pub user: UserInfo,
    /// Token expiration in seconds.
    pub expires_in: i64,
}

/// User information.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserInfo {
    /// User ID.
    pub id: String,
    /// User email.
    pub email: String,
    /// User role.
    pub role: String,
}
