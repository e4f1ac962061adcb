//! Credit request DTOs
//!
//! Request and response types for top-up endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shortform_core::models::{CreditRequest, CreditRequestStatus, MIN_TOPUP_WON};
use shortform_core::AppError;
use uuid::Uuid;
use validator::Validate;

/// Top-up request creation payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreditRequestCreate {
    /// Requested amount in won
    #[validate(range(min = 10_000, message = "Minimum top-up amount is 10,000 won"))]
    pub amount: i64,

    /// Name used for the bank transfer
    #[validate(length(min = 1, message = "Depositor name is required"))]
    pub depositor_name: String,
}

/// Credit request view returned to clients
#[derive(Debug, Clone, Serialize)]
pub struct CreditRequestResponse {
    /// Request id
    pub id: Uuid,

    /// Requesting profile
    pub user_id: Uuid,

    /// Requested amount in won
    pub amount: i64,

    /// Depositor name
    pub depositor_name: String,

    /// Request status
    pub status: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<CreditRequest> for CreditRequestResponse {
    fn from(request: CreditRequest) -> Self {
        Self {
            id: request.id,
            user_id: request.user_id,
            amount: request.amount,
            depositor_name: request.depositor_name,
            status: request.status.to_string(),
            created_at: request.created_at,
        }
    }
}

/// Deposit transfer instructions shown on the top-up screen
#[derive(Debug, Clone, Serialize)]
pub struct DepositInfoResponse {
    /// Bank name
    pub bank_name: String,

    /// Account number
    pub account_number: String,

    /// Account holder
    pub account_holder: String,

    /// Minimum top-up amount in won
    pub min_topup_won: i64,
}

impl Default for DepositInfoResponse {
    fn default() -> Self {
        Self {
            bank_name: String::new(),
            account_number: String::new(),
            account_holder: String::new(),
            min_topup_won: MIN_TOPUP_WON,
        }
    }
}

/// Status filter for credit request listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreditFilterParams {
    /// Filter by status
    #[serde(default)]
    pub status: Option<String>,
}

impl CreditFilterParams {
    /// Parse the optional status filter
    pub fn parse_status(&self) -> Result<Option<CreditRequestStatus>, AppError> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => CreditRequestStatus::from_str(s)
                .map(Some)
                .ok_or_else(|| AppError::Validation(format!("Unknown status value: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_validation() {
        let valid = CreditRequestCreate {
            amount: MIN_TOPUP_WON,
            depositor_name: "홍길동".to_string(),
        };
        assert!(valid.validate().is_ok());

        let too_small = CreditRequestCreate {
            amount: MIN_TOPUP_WON - 1,
            depositor_name: "홍길동".to_string(),
        };
        assert!(too_small.validate().is_err());

        let no_name = CreditRequestCreate {
            amount: 50_000,
            depositor_name: "".to_string(),
        };
        assert!(no_name.validate().is_err());
    }

    #[test]
    fn test_filter_parse() {
        let filter = CreditFilterParams {
            status: Some("pending".to_string()),
        };
        assert_eq!(
            filter.parse_status().unwrap(),
            Some(CreditRequestStatus::Pending)
        );

        let filter = CreditFilterParams { status: None };
        assert_eq!(filter.parse_status().unwrap(), None);

        let filter = CreditFilterParams {
            status: Some("refunded".to_string()),
        };
        assert!(filter.parse_status().is_err());
    }
}
