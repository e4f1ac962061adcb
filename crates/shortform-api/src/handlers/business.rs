//! Business info handlers
//!
//! Tax-document details a customer registers once and edits in place.

use crate::dto::business::{BusinessInfoRequest, BusinessInfoResponse};
use crate::dto::ApiResponse;
use actix_web::{web, HttpResponse};
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

/// Fetch the caller's business info
///
/// GET /api/v1/business-info
#[instrument(skip(pool, password_service, jwt_service, user))]
pub async fn get_business_info(
    pool: web::Data<PgPool>,
    password_service: web::Data<Arc<PasswordService>>,
    jwt_service: web::Data<Arc<JwtService>>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let service = account_service(pool.get_ref(), password_service.get_ref(), jwt_service.get_ref());

    let info = service
        .business_info(user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Business info not registered".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(BusinessInfoResponse::from(info))))
}

/// Create or replace the caller's business info
///
/// PUT /api/v1/business-info
#[instrument(skip(pool, password_service, jwt_service, user, req))]
pub async fn save_business_info(
    pool: web::Data<PgPool>,
    password_service: web::Data<Arc<PasswordService>>,
    jwt_service: web::Data<Arc<JwtService>>,
    user: AuthenticatedUser,
    req: web::Json<BusinessInfoRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Business info validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    debug!(user_id = %user.user_id, company = %req.company_name, "Saving business info");

    let service = account_service(pool.get_ref(), password_service.get_ref(), jwt_service.get_ref());
    let saved = service
        .save_business_info(user.user_id, req.into_inner().into_model())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        BusinessInfoResponse::from(saved),
        "Business info saved",
    )))
}

/// Configure business info routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/business-info")
            .route("", web::get().to(get_business_info))
            .route("", web::put().to(save_business_info)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_info_requires_names() {
        let req = BusinessInfoRequest {
            company_name: "".to_string(),
            representative_name: "김철수".to_string(),
            registration_number: None,
            address: None,
            business_type: None,
            business_item: None,
            tax_email: None,
        };
        assert!(req.validate().is_err());
    }
}
