//! Business info model
//!
//! Registered business tax information, one record per user, used for
//! issuing tax invoices. Saved with upsert semantics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Business info entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessInfo {
    /// Unique identifier
    pub id: i64,

    /// Owning profile (unique, one record per user)
    pub user_id: Uuid,

    /// Company name
    pub company_name: String,

    /// Representative name
    pub representative_name: String,

    /// Business registration number
    pub registration_number: Option<String>,

    /// Business address
    pub address: Option<String>,

    /// Business type (업태)
    pub business_type: Option<String>,

    /// Business item (종목)
    pub business_item: Option<String>,

    /// Email for tax invoice delivery
    pub tax_email: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Default for BusinessInfo {
    fn default() -> Self {
        Self {
            id: 0,
            user_id: Uuid::nil(),
            company_name: String::new(),
            representative_name: String::new(),
            registration_number: None,
            address: None,
            business_type: None,
            business_item: None,
            tax_email: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}
