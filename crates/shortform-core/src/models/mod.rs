//! Domain models for the Shortform Factory backend
//!
//! This module contains all the core domain models used throughout the application.

pub mod business;
pub mod credit;
pub mod order;
pub mod pricing;
pub mod profile;

pub use business::BusinessInfo;
pub use credit::{CreditRequest, CreditRequestStatus, MIN_TOPUP_WON};
pub use order::{
    CameraType, DurationBucket, EditingType, LocationType, Order, OrderOptions, OrderStatus,
    ServiceType,
};
pub use pricing::PriceBreakdown;
pub use profile::{Profile, ProfileRole};
