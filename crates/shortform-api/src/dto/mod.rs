//! Data Transfer Objects (DTOs) for API requests and responses

pub mod auth;
pub mod business;
pub mod common;
pub mod credit;
pub mod order;

pub use auth::*;
pub use business::*;
pub use common::*;
pub use credit::*;
pub use order::*;
