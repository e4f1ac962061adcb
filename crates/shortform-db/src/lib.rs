//! Short-Form Factory Database Layer
//!
//! This crate provides PostgreSQL database access and repository
//! implementations for the order backend. It includes:
//!
//! - Connection pool management with sqlx
//! - Repository implementations for all domain entities
//! - Atomic balance updates and status-guarded credit transitions
//! - Transaction support for approve-and-credit

pub mod pool;
pub mod repositories;

pub use pool::create_pool;
pub use repositories::*;

// Re-export commonly used types
pub use shortform_core::{AppError, AppResult};
pub use sqlx::{PgPool, Postgres, Transaction};
