//! Business info DTOs
//!
//! Request and response types for the tax invoice information endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shortform_core::models::BusinessInfo;
use uuid::Uuid;
use validator::Validate;

/// Business info save payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BusinessInfoRequest {
    /// Company name
    #[validate(length(min = 1, message = "Company name is required"))]
    pub company_name: String,

    /// Representative name
    #[validate(length(min = 1, message = "Representative name is required"))]
    pub representative_name: String,

    /// Business registration number
    #[serde(default)]
    pub registration_number: Option<String>,

    /// Business address
    #[serde(default)]
    pub address: Option<String>,

    /// Business type (업태)
    #[serde(default)]
    pub business_type: Option<String>,

    /// Business item (종목)
    #[serde(default)]
    pub business_item: Option<String>,

    /// Email for tax invoice delivery
    #[validate(email(message = "Invalid email format"))]
    #[serde(default)]
    pub tax_email: Option<String>,
}

impl BusinessInfoRequest {
    /// Build the entity to upsert; the handler fills in the user id
    pub fn into_model(self) -> BusinessInfo {
        BusinessInfo {
            company_name: self.company_name,
            representative_name: self.representative_name,
            registration_number: self.registration_number,
            address: self.address,
            business_type: self.business_type,
            business_item: self.business_item,
            tax_email: self.tax_email,
            ..Default::default()
        }
    }
}

/// Business info view returned to clients
#[derive(Debug, Clone, Serialize)]
pub struct BusinessInfoResponse {
    /// Record id
    pub id: i64,

    /// Owning profile
    pub user_id: Uuid,

    /// Company name
    pub company_name: String,

    /// Representative name
    pub representative_name: String,

    /// Business registration number
    pub registration_number: Option<String>,

    /// Business address
    pub address: Option<String>,

    /// Business type
    pub business_type: Option<String>,

    /// Business item
    pub business_item: Option<String>,

    /// Email for tax invoice delivery
    pub tax_email: Option<String>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<BusinessInfo> for BusinessInfoResponse {
    fn from(info: BusinessInfo) -> Self {
        Self {
            id: info.id,
            user_id: info.user_id,
            company_name: info.company_name,
            representative_name: info.representative_name,
            registration_number: info.registration_number,
            address: info.address,
            business_type: info.business_type,
            business_item: info.business_item,
            tax_email: info.tax_email,
            updated_at: info.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_validation() {
        let valid = BusinessInfoRequest {
            company_name: "숏폼컴퍼니".to_string(),
            representative_name: "박대표".to_string(),
            registration_number: Some("123-45-67890".to_string()),
            address: None,
            business_type: None,
            business_item: None,
            tax_email: Some("tax@example.com".to_string()),
        };
        assert!(valid.validate().is_ok());

        let missing_name = BusinessInfoRequest {
            company_name: "".to_string(),
            representative_name: "박대표".to_string(),
            registration_number: None,
            address: None,
            business_type: None,
            business_item: None,
            tax_email: None,
        };
        assert!(missing_name.validate().is_err());

        let bad_email = BusinessInfoRequest {
            company_name: "숏폼컴퍼니".to_string(),
            representative_name: "박대표".to_string(),
            registration_number: None,
            address: None,
            business_type: None,
            business_item: None,
            tax_email: Some("not-an-email".to_string()),
        };
        assert!(bad_email.validate().is_err());
    }
}
