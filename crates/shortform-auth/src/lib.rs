//! Authentication and authorization for the order backend
//!
//! This crate provides JWT-based authentication, password hashing with Argon2,
//! and Actix-web request extractors for role-based access control.
//!
//! # Features
//!
//! - JWT token creation and validation with the profile id as subject
//! - Argon2 password hashing and verification
//! - Request extractors for authenticated users
//! - Admin access gated on the role claim, not on a hardcoded identity
//!
//! # Examples
//!
//! ## Creating a JWT token
//!
//! ```no_run
//! use shortform_auth::{Claims, JwtService};
//! use shortform_core::models::ProfileRole;
//! use uuid::Uuid;
//!
//! let jwt_service = JwtService::new("your-secret-key", 3600);
//! let claims = Claims::new(Uuid::new_v4(), "user@example.com", ProfileRole::Customer);
//! let token = jwt_service.create_token(&claims)?;
//! # Ok::<(), shortform_core::error::AppError>(())
//! ```
//!
//! ## Using extractors in Actix-web
//!
//! ```no_run
//! use actix_web::HttpResponse;
//! use shortform_auth::middleware::{AdminUser, AuthenticatedUser};
//!
//! async fn protected_route(user: AuthenticatedUser) -> HttpResponse {
//!     HttpResponse::Ok().json(serde_json::json!({ "user_id": user.user_id }))
//! }
//!
//! async fn admin_route(_admin: AdminUser) -> HttpResponse {
//!     HttpResponse::Ok().json(serde_json::json!({ "message": "Admin access granted" }))
//! }
//! ```

pub mod claims;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use claims::Claims;
pub use jwt::JwtService;
pub use middleware::{AdminUser, AuthenticatedUser};
pub use password::PasswordService;
