//! Shortform Factory Core Library
//!
//! This crate provides the foundational types, traits, and error handling
//! for the Shortform Factory backend. It includes:
//!
//! - Domain models (Order, CreditRequest, Profile, BusinessInfo)
//! - The order pricing calculator
//! - Common traits for repositories
//! - Unified error handling with HTTP response mapping
//! - Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod traits;

pub use config::AppConfig;
pub use error::AppError;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
