//! Actix-web authentication request extractors
//!
//! Provides extractors for authenticated users with role-based access
//! control. Admin access is decided on the role claim carried in the
//! token, never on a fixed email or id.

use crate::jwt::JwtService;
use crate::Claims;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use shortform_core::error::AppError;
use shortform_core::models::ProfileRole;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Extract JWT token from request
///
/// Checks for token in the following order:
/// 1. Authorization header (Bearer token)
/// 2. Cookie named "token"
fn extract_token_from_request(req: &HttpRequest) -> Option<String> {
    if let Some(auth_header) = req.headers().get("Authorization") {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }

    if let Some(cookie) = req.cookie("token") {
        return Some(cookie.value().to_string());
    }

    None
}

/// Authenticated user extractor
///
/// Extracts and validates the JWT token from the request. A missing token
/// rejects the request with 401 before the handler runs, so handlers that
/// take this extractor always have a caller identity.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Profile id of the authenticated user
    pub user_id: Uuid,

    /// Email carried in the token
    pub email: String,

    /// Role of the authenticated user
    pub role: ProfileRole,

    /// Full claims from the JWT token
    pub claims: Claims,
}

impl AuthenticatedUser {
    /// Check if user has admin privileges
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let jwt_service = match req.app_data::<web::Data<Arc<JwtService>>>() {
            Some(service) => service.get_ref().clone(),
            None => {
                warn!("JwtService not found in app data");
                return ready(Err(AppError::Internal(
                    "Authentication service not configured".to_string(),
                )
                .into()));
            }
        };

        let token = match extract_token_from_request(req) {
            Some(t) => t,
            None => {
                debug!("No authentication token found in request");
                return ready(Err(AppError::AuthRequired.into()));
            }
        };

        match jwt_service.validate_token(&token) {
            Ok(claims) => {
                let user_id = match claims.user_id() {
                    Ok(id) => id,
                    Err(e) => return ready(Err(e.into())),
                };

                debug!(user_id = %user_id, role = ?claims.role, "User authenticated");

                ready(Ok(AuthenticatedUser {
                    user_id,
                    email: claims.email.clone(),
                    role: claims.role,
                    claims,
                }))
            }
            Err(e) => {
                warn!(error = %e, "Token validation failed");
                ready(Err(e.into()))
            }
        }
    }
}

/// Admin user extractor
///
/// Requires the admin role claim. Returns 403 for authenticated
/// non-admins and 401 when no valid token is present.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthenticatedUser);

impl std::ops::Deref for AdminUser {
    type Target = AuthenticatedUser;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AdminUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let auth_user = match AuthenticatedUser::from_request(req, payload).into_inner() {
            Ok(user) => user,
            Err(e) => return ready(Err(e)),
        };

        if !auth_user.is_admin() {
            warn!(
                user_id = %auth_user.user_id,
                role = %auth_user.role,
                "User attempted admin access without privileges"
            );
            return ready(Err(AppError::Forbidden.into()));
        }

        debug!(user_id = %auth_user.user_id, "Admin access granted");

        ready(Ok(AdminUser(auth_user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use shortform_core::models::Profile;

    fn create_test_jwt_service() -> Arc<JwtService> {
        Arc::new(JwtService::new("test-secret-key-12345", 3600))
    }

    fn profile_with_role(role: ProfileRole) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            email: format!("{}@example.com", role),
            role,
            ..Default::default()
        }
    }

    #[actix_web::test]
    async fn test_extract_token_from_authorization_header() {
        let jwt_service = create_test_jwt_service();
        let profile = profile_with_role(ProfileRole::Customer);
        let token = jwt_service.create_token_for_profile(&profile).unwrap();
        let expected_id = profile.id;

        let app = test::init_service(App::new().app_data(web::Data::new(jwt_service)).route(
            "/test",
            web::get().to(move |user: AuthenticatedUser| async move {
                assert_eq!(user.user_id, expected_id);
                "OK"
            }),
        ))
        .await;

        let req = test::TestRequest::get()
            .uri("/test")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn test_extract_token_from_cookie() {
        let jwt_service = create_test_jwt_service();
        let profile = profile_with_role(ProfileRole::Customer);
        let token = jwt_service.create_token_for_profile(&profile).unwrap();

        let app = test::init_service(App::new().app_data(web::Data::new(jwt_service)).route(
            "/test",
            web::get().to(|_user: AuthenticatedUser| async { "OK" }),
        ))
        .await;

        let req = test::TestRequest::get()
            .uri("/test")
            .cookie(actix_web::cookie::Cookie::new("token", token))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn test_missing_token() {
        let jwt_service = create_test_jwt_service();

        let app = test::init_service(App::new().app_data(web::Data::new(jwt_service)).route(
            "/test",
            web::get().to(|_user: AuthenticatedUser| async { "OK" }),
        ))
        .await;

        let req = test::TestRequest::get().uri("/test").to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn test_invalid_token() {
        let jwt_service = create_test_jwt_service();

        let app = test::init_service(App::new().app_data(web::Data::new(jwt_service)).route(
            "/test",
            web::get().to(|_user: AuthenticatedUser| async { "OK" }),
        ))
        .await;

        let req = test::TestRequest::get()
            .uri("/test")
            .insert_header(("Authorization", "Bearer invalid.token.here"))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn test_admin_user_with_admin_role() {
        let jwt_service = create_test_jwt_service();
        let profile = profile_with_role(ProfileRole::Admin);
        let token = jwt_service.create_token_for_profile(&profile).unwrap();

        let app = test::init_service(App::new().app_data(web::Data::new(jwt_service)).route(
            "/admin",
            web::get().to(|admin: AdminUser| async move {
                assert!(admin.is_admin());
                "OK"
            }),
        ))
        .await;

        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn test_admin_user_with_customer_role() {
        let jwt_service = create_test_jwt_service();
        let profile = profile_with_role(ProfileRole::Customer);
        let token = jwt_service.create_token_for_profile(&profile).unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(jwt_service))
                .route("/admin", web::get().to(|_admin: AdminUser| async { "OK" })),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 403);
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_authenticated_user_methods() {
        let id = Uuid::new_v4();
        let claims = Claims::new(id, "admin@example.com", ProfileRole::Admin);
        let user = AuthenticatedUser {
            user_id: id,
            email: claims.email.clone(),
            role: claims.role,
            claims,
        };

        assert!(user.is_admin());
    }

    #[test]
    fn test_admin_user_deref() {
        let id = Uuid::new_v4();
        let claims = Claims::new(id, "admin@example.com", ProfileRole::Admin);
        let auth_user = AuthenticatedUser {
            user_id: id,
            email: claims.email.clone(),
            role: claims.role,
            claims,
        };
        let admin = AdminUser(auth_user);

        assert_eq!(admin.user_id, id);
        assert!(admin.is_admin());
    }
}
