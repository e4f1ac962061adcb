//! Authentication handlers
//!
//! HTTP handlers for registration, login, logout and the current-user
//! endpoint. Tokens are returned in the body and mirrored into an
//! http-only cookie so browser clients need no token handling of their
//! own.

use crate::dto::auth::{AuthResponse, LoginRequest, LogoutResponse, ProfileResponse, RegisterRequest};
use crate::dto::ApiResponse;
use actix_web::{cookie::Cookie, web, HttpResponse};
use shortform_auth::{AuthenticatedUser, JwtService, PasswordService};
use shortform_core::AppError;
use shortform_db::{PgBusinessInfoRepository, PgProfileRepository};
use shortform_services::AccountService;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use validator::Validate;

fn account_service(
    pool: &PgPool,
    password_service: &PasswordService,
    jwt_service: &Arc<JwtService>,
) -> AccountService<PgProfileRepository, PgBusinessInfoRepository> {
    AccountService::new(
        Arc::new(PgProfileRepository::new(pool.clone())),
        Arc::new(PgBusinessInfoRepository::new(pool.clone())),
        password_service.clone(),
        jwt_service.clone(),
    )
}

fn token_cookie(token: &str, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build("token", token.to_string())
        .path("/")
        .http_only(true)
        .secure(false) // Set to true in production with HTTPS
        .max_age(actix_web::cookie::time::Duration::seconds(max_age_secs))
        .finish()
}

/// Register endpoint
///
/// POST /api/v1/auth/register
#[instrument(skip(pool, jwt_service, password_service, req))]
pub async fn register(
    pool: web::Data<PgPool>,
    jwt_service: web::Data<Arc<JwtService>>,
    password_service: web::Data<Arc<PasswordService>>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Registration validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let service = account_service(pool.get_ref(), &password_service, &jwt_service);
    let outcome = service
        .register(&req.email, &req.password, req.full_name.clone())
        .await?;

    let cookie = token_cookie(&outcome.token, outcome.expires_in);
    let response = AuthResponse::new(
        outcome.token,
        outcome.expires_in,
        ProfileResponse::from(outcome.profile),
    );

    Ok(HttpResponse::Created()
        .cookie(cookie)
        .json(ApiResponse::success(response)))
}

/// Login endpoint
///
/// POST /api/v1/auth/login
#[instrument(skip(pool, jwt_service, password_service, req))]
pub async fn login(
    pool: web::Data<PgPool>,
    jwt_service: web::Data<Arc<JwtService>>,
    password_service: web::Data<Arc<PasswordService>>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Login validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let service = account_service(pool.get_ref(), &password_service, &jwt_service);
    let outcome = service.login(&req.email, &req.password).await?;

    let cookie = token_cookie(&outcome.token, outcome.expires_in);
    let response = AuthResponse::new(
        outcome.token,
        outcome.expires_in,
        ProfileResponse::from(outcome.profile),
    );

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(ApiResponse::success(response)))
}

/// Logout endpoint
///
/// POST /api/v1/auth/logout
#[instrument(skip(user))]
pub async fn logout(user: AuthenticatedUser) -> HttpResponse {
    debug!(user_id = %user.user_id, "User logged out");

    // Clear the token cookie
    let cookie = Cookie::build("token", "")
        .path("/")
        .http_only(true)
        .max_age(actix_web::cookie::time::Duration::seconds(0))
        .finish();

    HttpResponse::Ok()
        .cookie(cookie)
        .json(ApiResponse::success(LogoutResponse::default()))
}

/// Get current user info
///
/// GET /api/v1/auth/me
///
/// Reads the profile fresh from the database so the credit balance is
/// current, not the value at token issue time.
#[instrument(skip(pool, jwt_service, password_service, user))]
pub async fn me(
    pool: web::Data<PgPool>,
    jwt_service: web::Data<Arc<JwtService>>,
    password_service: web::Data<Arc<PasswordService>>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    debug!(user_id = %user.user_id, "Getting current user info");

    let service = account_service(pool.get_ref(), &password_service, &jwt_service);
    let profile = service.profile(user.user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(ProfileResponse::from(profile))))
}

/// Configure auth routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .route("/me", web::get().to(me)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid_req = RegisterRequest {
            email: "user@example.com".to_string(),
            password: "password123".to_string(),
            full_name: None,
        };
        assert!(valid_req.validate().is_ok());

        let invalid_req = RegisterRequest {
            email: "no-at-sign".to_string(),
            password: "pw".to_string(),
            full_name: None,
        };
        assert!(invalid_req.validate().is_err());
    }
}
