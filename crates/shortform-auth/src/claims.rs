//! JWT Claims structure
//!
//! Defines the claims structure used in JWT tokens for authentication.
//! The subject carries the profile id so handlers never need a second
//! lookup to resolve identity, and the role claim is what admin access
//! checks are decided on.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use shortform_core::error::AppError;
use shortform_core::models::ProfileRole;
use uuid::Uuid;

/// JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (profile id as a UUID string)
    pub sub: String,

    /// Email of the profile, for logging and display
    pub email: String,

    /// Profile role
    pub role: ProfileRole,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create new claims for a profile
    ///
    /// The expiration is left at zero and filled in by `JwtService` when
    /// the token is created.
    pub fn new(user_id: Uuid, email: &str, role: ProfileRole) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: 0,
        }
    }

    /// Create new claims with custom expiration duration
    pub fn with_expiration(
        user_id: Uuid,
        email: &str,
        role: ProfileRole,
        expires_in_secs: i64,
    ) -> Self {
        let now = Utc::now();
        let exp = now + Duration::seconds(expires_in_secs);

        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    /// Parse the subject back into a profile id
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidToken` when the subject is not a UUID.
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub)
            .map_err(|e| AppError::InvalidToken(format!("Invalid subject claim: {}", e)))
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        self.exp <= now
    }

    /// Check if the token holder has admin privileges
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_claims_creation() {
        let id = Uuid::new_v4();
        let claims = Claims::new(id, "user@example.com", ProfileRole::Customer);
        assert_eq!(claims.sub, id.to_string());
        assert_eq!(claims.user_id().unwrap(), id);
        assert_eq!(claims.role, ProfileRole::Customer);
        assert!(claims.iat > 0);
    }

    #[test]
    fn test_claims_with_expiration() {
        let claims = Claims::with_expiration(
            Uuid::new_v4(),
            "admin@example.com",
            ProfileRole::Admin,
            3600,
        );
        assert!(!claims.is_expired());

        let now = Utc::now().timestamp();
        assert!(claims.exp > now);
        assert!(claims.exp <= now + 3600);
    }

    #[test]
    fn test_expired_claims() {
        let mut claims = Claims::new(Uuid::new_v4(), "user@example.com", ProfileRole::Customer);
        claims.exp = (Utc::now() - Duration::hours(1)).timestamp();
        assert!(claims.is_expired());
    }

    #[test]
    fn test_invalid_subject() {
        let mut claims = Claims::new(Uuid::new_v4(), "user@example.com", ProfileRole::Customer);
        claims.sub = "not-a-uuid".to_string();
        assert!(matches!(claims.user_id(), Err(AppError::InvalidToken(_))));
    }

    #[test]
    fn test_role_checks() {
        let customer = Claims::new(Uuid::new_v4(), "c@example.com", ProfileRole::Customer);
        assert!(!customer.is_admin());

        let admin = Claims::new(Uuid::new_v4(), "a@example.com", ProfileRole::Admin);
        assert!(admin.is_admin());
    }
}
