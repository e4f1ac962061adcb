//! API layer for the short-form video order backend
//!
//! HTTP handlers for orders, credits, accounts, and admin reconciliation.

#![forbid(unsafe_code)]

pub mod dto;
pub mod handlers;

// Re-export DTOs (common types)
pub use dto::{ApiResponse, PaginationParams};

// Re-export handler configuration functions
pub use handlers::{
    configure_admin, configure_auth, configure_business, configure_credits, configure_orders,
};
