//! Repository implementations
//!
//! This module contains concrete implementations of all repository traits
//! defined in shortform-core, using sqlx for PostgreSQL access.

pub mod business_info_repo;
pub mod credit_request_repo;
pub mod order_repo;
pub mod profile_repo;

pub use business_info_repo::PgBusinessInfoRepository;
pub use credit_request_repo::PgCreditRequestRepository;
pub use order_repo::PgOrderRepository;
pub use profile_repo::PgProfileRepository;
