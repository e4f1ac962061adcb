//! Authentication DTOs
//!
//! Request and response types for authentication endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shortform_core::models::Profile;
use uuid::Uuid;
use validator::Validate;

/// Registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address, used for login
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Display name
    pub full_name: Option<String>,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    /// Password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Public view of a profile
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    /// Profile id
    pub id: Uuid,

    /// Email address
    pub email: String,

    /// Display name
    pub full_name: Option<String>,

    /// Role ("customer" or "admin")
    pub role: String,

    /// Prepaid credit balance in won
    pub credit_balance: i64,

    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            email: profile.email,
            full_name: profile.full_name,
            role: profile.role.to_string(),
            credit_balance: profile.credit_balance,
            created_at: profile.created_at,
        }
    }
}

/// Login or registration response
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    /// Access token (JWT)
    pub access_token: String,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Token expiration time in seconds
    pub expires_in: i64,

    /// Profile information
    pub user: ProfileResponse,
}

impl AuthResponse {
    /// Create a new auth response
    pub fn new(access_token: String, expires_in: i64, user: ProfileResponse) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

/// Logout response
#[derive(Debug, Clone, Serialize)]
pub struct LogoutResponse {
    /// Success message
    pub message: String,
}

impl Default for LogoutResponse {
    fn default() -> Self {
        Self {
            message: "Logged out successfully".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid_request = RegisterRequest {
            email: "user@example.com".to_string(),
            password: "password123".to_string(),
            full_name: Some("Kim".to_string()),
        };
        assert!(valid_request.validate().is_ok());

        let invalid_request = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            full_name: None,
        };
        assert!(invalid_request.validate().is_err());
    }

    #[test]
    fn test_login_request_validation() {
        let valid_request = LoginRequest {
            email: "user@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_request.validate().is_ok());

        let invalid_request = LoginRequest {
            email: "".to_string(),
            password: "".to_string(),
        };
        assert!(invalid_request.validate().is_err());
    }

    #[test]
    fn test_profile_response_hides_hash() {
        let profile = Profile {
            email: "user@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            credit_balance: 50_000,
            ..Default::default()
        };

        let response: ProfileResponse = profile.into();
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("argon2"));
        assert!(json.contains("50000"));
    }

    #[test]
    fn test_auth_response() {
        let profile = Profile {
            email: "user@example.com".to_string(),
            ..Default::default()
        };

        let response = AuthResponse::new("jwt_token".to_string(), 3600, profile.into());
        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 3600);
        assert_eq!(response.user.email, "user@example.com");
    }
}
