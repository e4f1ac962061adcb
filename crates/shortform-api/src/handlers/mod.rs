//! HTTP request handlers

pub mod admin;
pub mod auth;
pub mod business;
pub mod credits;
pub mod orders;

pub use admin::configure as configure_admin;
pub use auth::configure as configure_auth;
pub use business::configure as configure_business;
pub use credits::configure as configure_credits;
pub use orders::configure as configure_orders;
