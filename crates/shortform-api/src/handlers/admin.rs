//! Admin handlers
//!
//! HTTP handlers for the operator console: order management, deposit
//! reconciliation, and the dashboard overview. Every route requires an
//! admin role claim.

use crate::dto::auth::ProfileResponse;
use crate::dto::business::BusinessInfoResponse;
use crate::dto::credit::{CreditFilterParams, CreditRequestResponse};
use crate::dto::order::{OrderFilterParams, OrderResponse, OrderStatusRequest};
use crate::dto::{ApiResponse, PaginationParams};
use actix_web::{web, HttpResponse};
use serde::Serialize;
use shortform_auth::AdminUser;
use shortform_core::traits::{BusinessInfoRepository, Repository};
use shortform_core::AppError;
use shortform_db::{
    PgBusinessInfoRepository, PgCreditRequestRepository, PgOrderRepository, PgProfileRepository,
};
use shortform_services::{OrderService, ReconciliationService};
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;
use validator::Validate;

fn order_service(pool: &PgPool) -> OrderService<PgOrderRepository, PgProfileRepository> {
    OrderService::new(
        Arc::new(PgOrderRepository::new(pool.clone())),
        Arc::new(PgProfileRepository::new(pool.clone())),
    )
}

fn reconciliation_service(pool: &PgPool) -> ReconciliationService<PgCreditRequestRepository> {
    ReconciliationService::new(Arc::new(PgCreditRequestRepository::new(pool.clone())))
}

/// Order view for the operator console, with the owner's email resolved
#[derive(Debug, Serialize)]
pub struct AdminOrderResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    /// Owning customer's email
    pub user_email: Option<String>,
}

/// List all orders across customers
///
/// GET /api/v1/admin/orders
#[instrument(skip(pool, admin))]
pub async fn list_orders(
    pool: web::Data<PgPool>,
    admin: AdminUser,
    query: web::Query<PaginationParams>,
    filters: web::Query<OrderFilterParams>,
) -> Result<HttpResponse, AppError> {
    query.validate().map_err(|e| {
        warn!("Pagination validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let status = filters.parse_status()?;
    debug!(admin_id = %admin.user_id, ?status, "Listing all orders");

    let (orders, total) = order_service(pool.get_ref())
        .list_all(status, &query.to_pagination())
        .await?;

    // Resolve owner emails for the page in one query
    let user_ids: Vec<Uuid> = orders.iter().map(|o| o.user_id).collect();
    let emails: HashMap<Uuid, String> =
        sqlx::query_as::<sqlx::Postgres, (Uuid, String)>(
            "SELECT id, email FROM profiles WHERE id = ANY($1)",
        )
        .bind(&user_ids)
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .into_iter()
        .collect();

    let response_data: Vec<AdminOrderResponse> = orders
        .into_iter()
        .map(|order| {
            let user_email = emails.get(&order.user_id).cloned();
            AdminOrderResponse {
                order: OrderResponse::from(order),
                user_email,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(query.paginate(response_data, total)))
}

/// List all customer profiles
///
/// GET /api/v1/admin/profiles
#[instrument(skip(pool, admin))]
pub async fn list_profiles(
    pool: web::Data<PgPool>,
    admin: AdminUser,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse, AppError> {
    query.validate().map_err(|e| {
        warn!("Pagination validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    debug!(admin_id = %admin.user_id, "Listing profiles");

    let repo = PgProfileRepository::new(pool.get_ref().clone());
    let profiles = repo.find_all(query.limit(), query.offset()).await?;
    let total = repo.count().await?;

    let response_data: Vec<ProfileResponse> = profiles.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(query.paginate(response_data, total)))
}

/// List all registered business info records
///
/// GET /api/v1/admin/business-info
#[instrument(skip(pool, admin))]
pub async fn list_business_info(
    pool: web::Data<PgPool>,
    admin: AdminUser,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse, AppError> {
    query.validate().map_err(|e| {
        warn!("Pagination validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    debug!(admin_id = %admin.user_id, "Listing business info records");

    let repo = PgBusinessInfoRepository::new(pool.get_ref().clone());
    let (records, total) = repo.list_all(query.limit(), query.offset()).await?;

    let response_data: Vec<BusinessInfoResponse> = records.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(query.paginate(response_data, total)))
}

/// Set an order's status
///
/// PATCH /api/v1/admin/orders/{id}/status
#[instrument(skip(pool, admin, req))]
pub async fn set_order_status(
    pool: web::Data<PgPool>,
    admin: AdminUser,
    path: web::Path<i64>,
    req: web::Json<OrderStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let status = req.parse()?;

    debug!(admin_id = %admin.user_id, order_id, %status, "Setting order status");

    let order = order_service(pool.get_ref())
        .set_status(order_id, status)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        OrderResponse::from(order),
        "Order status updated",
    )))
}

/// Flip an order between pending and completed
///
/// POST /api/v1/admin/orders/{id}/toggle
#[instrument(skip(pool, admin))]
pub async fn toggle_order_status(
    pool: web::Data<PgPool>,
    admin: AdminUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    debug!(admin_id = %admin.user_id, order_id, "Toggling order status");

    let order = order_service(pool.get_ref()).toggle_status(order_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        OrderResponse::from(order),
        "Order status toggled",
    )))
}

/// List all credit top-up requests
///
/// GET /api/v1/admin/credit-requests
#[instrument(skip(pool, admin))]
pub async fn list_credit_requests(
    pool: web::Data<PgPool>,
    admin: AdminUser,
    query: web::Query<PaginationParams>,
    filters: web::Query<CreditFilterParams>,
) -> Result<HttpResponse, AppError> {
    query.validate().map_err(|e| {
        warn!("Pagination validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let status = filters.parse_status()?;
    debug!(admin_id = %admin.user_id, ?status, "Listing credit requests");

    let (requests, total) = reconciliation_service(pool.get_ref())
        .list_all(status, &query.to_pagination())
        .await?;

    let response_data: Vec<CreditRequestResponse> =
        requests.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(query.paginate(response_data, total)))
}

/// Approve a pending top-up and credit the balance
///
/// POST /api/v1/admin/credit-requests/{id}/approve
#[instrument(skip(pool, admin))]
pub async fn approve_credit_request(
    pool: web::Data<PgPool>,
    admin: AdminUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let request_id = path.into_inner();

    debug!(admin_id = %admin.user_id, %request_id, "Approving credit request");

    let outcome = reconciliation_service(pool.get_ref())
        .approve(request_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        outcome,
        "Credit request approved and balance credited",
    )))
}

/// Reject a pending top-up
///
/// POST /api/v1/admin/credit-requests/{id}/reject
#[instrument(skip(pool, admin))]
pub async fn reject_credit_request(
    pool: web::Data<PgPool>,
    admin: AdminUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let request_id = path.into_inner();

    debug!(admin_id = %admin.user_id, %request_id, "Rejecting credit request");

    let rejected = reconciliation_service(pool.get_ref())
        .reject(request_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        CreditRequestResponse::from(rejected),
        "Credit request rejected",
    )))
}

/// Dashboard overview numbers
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    /// Total number of orders
    pub total_orders: i64,
    /// Orders still pending
    pub pending_orders: i64,
    /// Completed orders
    pub completed_orders: i64,
    /// Revenue across completed orders, in won
    pub completed_revenue_won: i64,
    /// Top-up requests awaiting reconciliation
    pub pending_credit_requests: i64,
    /// Sum of pending top-up amounts, in won
    pub pending_credit_total_won: i64,
    /// Total number of customer profiles
    pub total_profiles: i64,
    /// Sum of all prepaid balances, in won
    pub total_credit_balance_won: i64,
}

/// Get dashboard statistics
///
/// GET /api/v1/admin/stats
#[instrument(skip(pool, _admin))]
pub async fn get_stats(
    pool: web::Data<PgPool>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    debug!("Fetching dashboard statistics");

    let order_stats: (i64, i64, i64, Option<i64>) = sqlx::query_as(
        r#"
        SELECT
            COUNT(*) as total,
            COUNT(*) FILTER (WHERE status = 'pending') as pending,
            COUNT(*) FILTER (WHERE status = 'completed') as completed,
            COALESCE(SUM(amount) FILTER (WHERE status = 'completed'), 0)::BIGINT as revenue
        FROM orders
        "#,
    )
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| AppError::Database(e.to_string()))?;

    let (pending_requests, pending_total) =
        reconciliation_service(pool.get_ref()).pending_stats().await?;

    let profile_stats: (i64, Option<i64>) = sqlx::query_as(
        r#"
        SELECT
            COUNT(*) as total,
            COALESCE(SUM(credit_balance), 0)::BIGINT as total_balance
        FROM profiles
        "#,
    )
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| AppError::Database(e.to_string()))?;

    let stats = DashboardStats {
        total_orders: order_stats.0,
        pending_orders: order_stats.1,
        completed_orders: order_stats.2,
        completed_revenue_won: order_stats.3.unwrap_or(0),
        pending_credit_requests: pending_requests,
        pending_credit_total_won: pending_total,
        total_profiles: profile_stats.0,
        total_credit_balance_won: profile_stats.1.unwrap_or(0),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(stats)))
}

/// Configure admin routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/orders", web::get().to(list_orders))
            .route("/profiles", web::get().to(list_profiles))
            .route("/business-info", web::get().to(list_business_info))
            .route("/orders/{id}/status", web::patch().to(set_order_status))
            .route("/orders/{id}/toggle", web::post().to(toggle_order_status))
            .route("/credit-requests", web::get().to(list_credit_requests))
            .route(
                "/credit-requests/{id}/approve",
                web::post().to(approve_credit_request),
            )
            .route(
                "/credit-requests/{id}/reject",
                web::post().to(reject_credit_request),
            )
            .route("/stats", web::get().to(get_stats)),
    );
}
