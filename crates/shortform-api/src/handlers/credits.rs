//! Credit handlers
//!
//! HTTP handlers for the customer side of the top-up flow: filing a
//! request, listing own requests, and reading the deposit instructions.

use crate::dto::credit::{
    CreditFilterParams, CreditRequestCreate, CreditRequestResponse, DepositInfoResponse,
};
use crate::dto::{ApiResponse, PaginationParams};
use actix_web::{web, HttpResponse};
use serde::Serialize;
use shortform_auth::AuthenticatedUser;
use shortform_core::config::BillingConfig;
use shortform_core::traits::Repository;
use shortform_core::AppError;
use shortform_db::{PgCreditRequestRepository, PgProfileRepository};
use shortform_services::ReconciliationService;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use validator::Validate;

fn reconciliation_service(pool: &PgPool) -> ReconciliationService<PgCreditRequestRepository> {
    ReconciliationService::new(Arc::new(PgCreditRequestRepository::new(pool.clone())))
}

/// File a top-up request
///
/// POST /api/v1/credits/requests
#[instrument(skip(pool, user, req))]
pub async fn create_request(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    req: web::Json<CreditRequestCreate>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Credit request validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    debug!(user_id = %user.user_id, amount = req.amount, "Filing top-up request");

    let request = reconciliation_service(pool.get_ref())
        .request_topup(user.user_id, req.amount, &req.depositor_name)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        CreditRequestResponse::from(request),
        "Top-up request filed, awaiting deposit verification",
    )))
}

/// List the caller's own top-up requests
///
/// GET /api/v1/credits/requests
#[instrument(skip(pool, user))]
pub async fn list_requests(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    query: web::Query<PaginationParams>,
    filters: web::Query<CreditFilterParams>,
) -> Result<HttpResponse, AppError> {
    query.validate().map_err(|e| {
        warn!("Pagination validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let status = filters.parse_status()?;

    let (requests, total) = reconciliation_service(pool.get_ref())
        .list_for_user(user.user_id, status, &query.to_pagination())
        .await?;

    let response_data: Vec<CreditRequestResponse> =
        requests.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(query.paginate(response_data, total)))
}

/// Current balance view
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    /// Prepaid balance in won
    pub credit_balance: i64,
}

/// Read the caller's current credit balance
///
/// GET /api/v1/credits/balance
#[instrument(skip(pool, user))]
pub async fn get_balance(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let repo = PgProfileRepository::new(pool.get_ref().clone());
    let profile = repo
        .find_by_id(user.user_id)
        .await?
        .ok_or_else(|| AppError::ProfileNotFound(user.user_id.to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(BalanceResponse {
        credit_balance: profile.credit_balance,
    })))
}

/// Deposit transfer instructions
///
/// GET /api/v1/credits/deposit-info
#[instrument(skip(billing))]
pub async fn deposit_info(billing: web::Data<BillingConfig>) -> HttpResponse {
    let info = DepositInfoResponse {
        bank_name: billing.deposit_bank_name.clone(),
        account_number: billing.deposit_bank_account.clone(),
        account_holder: billing.deposit_account_holder.clone(),
        min_topup_won: billing.min_topup_won,
    };

    HttpResponse::Ok().json(ApiResponse::success(info))
}

/// Configure credit routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/credits")
            .route("/requests", web::post().to(create_request))
            .route("/requests", web::get().to(list_requests))
            .route("/balance", web::get().to(get_balance))
            .route("/deposit-info", web::get().to(deposit_info)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_request_minimum() {
        let req = CreditRequestCreate {
            amount: 9_999,
            depositor_name: "홍길동".to_string(),
        };
        assert!(req.validate().is_err());

        let req = CreditRequestCreate {
            amount: 10_000,
            depositor_name: "홍길동".to_string(),
        };
        assert!(req.validate().is_ok());
    }
}
