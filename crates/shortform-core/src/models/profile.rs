//! Profile model
//!
//! Represents a registered customer: identity, role, and the prepaid
//! credit balance spendable against orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Profile role enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProfileRole {
    /// Standard customer
    #[default]
    Customer,
    /// Administrator: reviews orders and reconciles credit requests
    Admin,
}

impl fmt::Display for ProfileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileRole::Customer => write!(f, "customer"),
            ProfileRole::Admin => write!(f, "admin"),
        }
    }
}

impl ProfileRole {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "customer" => Some(ProfileRole::Customer),
            "admin" => Some(ProfileRole::Admin),
            _ => None,
        }
    }

    /// Check if role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, ProfileRole::Admin)
    }
}

/// Profile entity
///
/// `credit_balance` must never go negative: it only moves through the
/// atomic increment at the repository boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Unique identifier
    pub id: Uuid,

    /// Email address (unique, used for login)
    pub email: String,

    /// Display name
    pub full_name: Option<String>,

    /// Password hash (never expose in API responses)
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Profile role
    pub role: ProfileRole,

    /// Prepaid credit balance in won
    pub credit_balance: i64,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Display name with the email as fallback
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.email)
    }

    /// Check if the balance covers the given amount
    #[inline]
    pub fn can_cover(&self, amount: i64) -> bool {
        self.credit_balance >= amount
    }

    /// How much is missing to cover the given amount (0 when covered)
    #[inline]
    pub fn shortfall(&self, amount: i64) -> i64 {
        (amount - self.credit_balance).max(0)
    }

    /// Check if the profile can perform admin actions
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            email: String::new(),
            full_name: None,
            password_hash: String::new(),
            role: ProfileRole::Customer,
            credit_balance: 0,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_cover() {
        let profile = Profile {
            credit_balance: 450_000,
            ..Default::default()
        };

        assert!(profile.can_cover(450_000));
        assert!(profile.can_cover(0));
        assert!(!profile.can_cover(450_001));
    }

    #[test]
    fn test_shortfall() {
        let profile = Profile {
            credit_balance: 100_000,
            ..Default::default()
        };

        assert_eq!(profile.shortfall(450_000), 350_000);
        assert_eq!(profile.shortfall(100_000), 0);
        assert_eq!(profile.shortfall(50_000), 0);
    }

    #[test]
    fn test_role_privileges() {
        assert!(ProfileRole::Admin.is_admin());
        assert!(!ProfileRole::Customer.is_admin());
        assert_eq!(ProfileRole::from_str("ADMIN"), Some(ProfileRole::Admin));
        assert_eq!(ProfileRole::from_str("superuser"), None);
    }

    #[test]
    fn test_display_name_fallback() {
        let mut profile = Profile {
            email: "user@example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(profile.display_name(), "user@example.com");

        profile.full_name = Some("Kang Mijeong".to_string());
        assert_eq!(profile.display_name(), "Kang Mijeong");
    }
}
