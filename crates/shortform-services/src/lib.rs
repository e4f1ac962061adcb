//! Business logic services for the order backend
//!
//! This crate contains the business logic that orchestrates order
//! submission, credit reconciliation, and account management.
//!
//! # Architecture
//!
//! Services are designed to be composable and testable:
//! - Each service is generic over the repository traits it needs
//! - Services are wrapped in Arc for safe sharing across async tasks
//! - All operations are instrumented with tracing
//! - Comprehensive error handling with AppError
//!
//! # Services
//!
//! - `OrderService` - Price calculation and guarded order submission
//! - `ReconciliationService` - Credit request intake and admin reconciliation
//! - `AccountService` - Registration, login, and business info management

pub mod accounts;
pub mod orders;
pub mod reconciliation;

pub use accounts::AccountService;
pub use orders::OrderService;
pub use reconciliation::ReconciliationService;

/// Business logic constants
pub mod constants {
    /// Default page size for listings
    pub const DEFAULT_PAGE_SIZE: i64 = 20;

    /// Maximum page size for listings
    pub const MAX_PAGE_SIZE: i64 = 100;
}
