//! Credit request model
//!
//! A credit request is a user's claim of an external bank deposit, held
//! pending until an admin verifies the transfer and approves or rejects it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Minimum top-up request amount in won
pub const MIN_TOPUP_WON: i64 = 10_000;

/// Credit request status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CreditRequestStatus {
    /// Awaiting admin verification of the bank deposit
    #[default]
    Pending,
    /// Deposit verified, balance credited
    Approved,
    /// Deposit not verified, no balance change
    Rejected,
}

impl fmt::Display for CreditRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreditRequestStatus::Pending => write!(f, "pending"),
            CreditRequestStatus::Approved => write!(f, "approved"),
            CreditRequestStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl CreditRequestStatus {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(CreditRequestStatus::Pending),
            "approved" => Some(CreditRequestStatus::Approved),
            "rejected" => Some(CreditRequestStatus::Rejected),
            _ => None,
        }
    }

    /// Approved and rejected are terminal. Terminal requests may never
    /// transition again, which is what prevents double-crediting.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, CreditRequestStatus::Pending)
    }
}

/// Credit request entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditRequest {
    /// Unique identifier
    pub id: Uuid,

    /// Requesting profile
    pub user_id: Uuid,

    /// Requested top-up amount in won
    pub amount: i64,

    /// Name the user claims to have used for the bank transfer
    pub depositor_name: String,

    /// Request status
    pub status: CreditRequestStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl CreditRequest {
    /// Whether the request still awaits an admin decision
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == CreditRequestStatus::Pending
    }

    /// Whether the requested amount meets the top-up floor
    #[inline]
    pub fn meets_minimum(&self) -> bool {
        self.amount >= MIN_TOPUP_WON
    }
}

impl Default for CreditRequest {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            amount: 0,
            depositor_name: String::new(),
            status: CreditRequestStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_terminality() {
        assert!(!CreditRequestStatus::Pending.is_terminal());
        assert!(CreditRequestStatus::Approved.is_terminal());
        assert!(CreditRequestStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            CreditRequestStatus::Pending,
            CreditRequestStatus::Approved,
            CreditRequestStatus::Rejected,
        ] {
            assert_eq!(
                CreditRequestStatus::from_str(&status.to_string()),
                Some(status)
            );
        }
        assert_eq!(CreditRequestStatus::from_str("cancelled"), None);
    }

    #[test]
    fn test_meets_minimum() {
        let mut request = CreditRequest {
            amount: MIN_TOPUP_WON,
            ..Default::default()
        };
        assert!(request.meets_minimum());

        request.amount = MIN_TOPUP_WON - 1;
        assert!(!request.meets_minimum());
    }
}
