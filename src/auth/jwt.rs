//! JWT authentication for admin dashboard users.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{PortfolioError, PortfolioResult};

/// Viewer id used when the admin API runs without authentication.
pub const ANONYMOUS_USER: &str = "anonymous";

/// JWT claims for authenticated users.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Subject (user ID). Also the owner key of the user's profile.
    pub sub: String,
    /// User email.
    pub email: String,
    /// User role.
    pub role: UserRole,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
    /// Issued at time (Unix timestamp).
    pub iat: i64,
    /// Issuer.
    pub iss: String,
}

impl Claims {
    /// Viewer used in anonymous mode.
    pub fn anonymous() -> Self {
        Self {
            sub: ANONYMOUS_USER.to_string(),
            email: String::new(),
            role: UserRole::Admin,
            exp: 0,
            iat: 0,
            iss: String::new(),
        }
    }

    /// Fail unless this viewer may change content.
    pub fn require_editor(&self) -> PortfolioResult<()> {
        if self.role.can_edit() {
            Ok(())
        } else {
            Err(PortfolioError::Forbidden(format!(
                "{} cannot change site content",
                self.email
            )))
        }
    }
}

/// User roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Can browse the dashboard and read messages.
    Viewer,
    /// Can change site content.
    Editor,
    /// Full access.
    Admin,
}

impl UserRole {
    pub fn can_edit(&self) -> bool {
        matches!(self, UserRole::Editor | UserRole::Admin)
    }
}

/// JWT token manager.
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    /// Token validity duration in hours.
    token_duration_hours: i64,
}

impl JwtManager {
    /// Create a new JWT manager with the given secret.
    pub fn new(secret: &str, issuer: String, token_duration_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            token_duration_hours,
        }
    }

    /// Get token duration in hours.
    pub fn token_duration_hours(&self) -> i64 {
        self.token_duration_hours
    }

    /// Generate a JWT token for a user.
    pub fn generate_token(
        &self,
        user_id: &str,
        email: &str,
        role: UserRole,
    ) -> PortfolioResult<String> {
        let now = Utc::now();
        let exp = now + Duration::hours(self.token_duration_hours);

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| PortfolioError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Validate and decode a JWT token.
    pub fn validate_token(&self, token: &str) -> PortfolioResult<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        let token_data: TokenData<Claims> =
            decode(token, &self.decoding_key, &validation).map_err(|e| {
                tracing::debug!(error = %e, "JWT validation failed");
                PortfolioError::Unauthorized(format!("Invalid token: {}", e))
            })?;

        Ok(token_data.claims)
    }
}

/// Configured admin user from config file.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ConfiguredUser {
    /// User ID.
    pub id: String,
    /// User email.
    pub email: String,
    /// Password hash (SHA256 hex).
    pub password_hash: String,
    /// User role.
    pub role: UserRole,
}

impl ConfiguredUser {
    /// Verify a password against the stored hash.
    pub fn verify_password(&self, password: &str) -> bool {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        let hash = hex::encode(hasher.finalize());
        hash.eq_ignore_ascii_case(&self.password_hash)
    }
}

/// Config-backed user directory.
#[derive(Clone)]
pub struct UserStore {
    users: std::collections::HashMap<String, ConfiguredUser>,
}

impl UserStore {
    pub fn new(users: Vec<ConfiguredUser>) -> Self {
        let users = users
            .into_iter()
            .map(|u| (u.email.to_lowercase(), u))
            .collect();
        Self { users }
    }

    /// Find a user by email, ignoring case.
    pub fn find_by_email(&self, email: &str) -> Option<&ConfiguredUser> {
        self.users.get(&email.trim().to_lowercase())
    }

    /// Authenticate a user with email and password.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<&ConfiguredUser> {
        self.find_by_email(email)
            .filter(|user| user.verify_password(password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(password: &str) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn user(id: &str, email: &str, password: &str, role: UserRole) -> ConfiguredUser {
        ConfiguredUser {
            id: id.to_string(),
            email: email.to_string(),
            password_hash: hash(password),
            role,
        }
    }

    #[test]
    fn test_jwt_roundtrip() {
        let manager = JwtManager::new("test-secret-key-12345", "portfolio-core".to_string(), 24);

        let token = manager
            .generate_token("user-1", "owner@example.com", UserRole::Admin)
            .unwrap();

        let claims = manager.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email, "owner@example.com");
        assert_eq!(claims.role, UserRole::Admin);
    }

    #[test]
    fn test_token_from_other_issuer_rejected() {
        let ours = JwtManager::new("secret", "portfolio-core".to_string(), 24);
        let theirs = JwtManager::new("secret", "someone-else".to_string(), 24);

        let token = theirs
            .generate_token("user-1", "owner@example.com", UserRole::Admin)
            .unwrap();
        assert!(matches!(
            ours.validate_token(&token),
            Err(PortfolioError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_user_authentication() {
        let store = UserStore::new(vec![user(
            "user-1",
            "Owner@Example.com",
            "password123",
            UserRole::Admin,
        )]);

        assert!(store.authenticate("owner@example.com", "password123").is_some());
        assert!(store.authenticate("owner@example.com", "wrong").is_none());
        assert!(store.authenticate("unknown@example.com", "password123").is_none());
    }

    #[test]
    fn test_role_permissions() {
        assert!(!UserRole::Viewer.can_edit());
        assert!(UserRole::Editor.can_edit());
        assert!(UserRole::Admin.can_edit());
        assert!(Claims::anonymous().require_editor().is_ok());
    }
}
