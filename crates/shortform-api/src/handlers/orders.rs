//! Order handlers
//!
//! HTTP handlers for order submission and listing. The estimate endpoint
//! is public so the order form can show live prices before login; actual
//! submission requires an authenticated caller with sufficient balance.

use crate::dto::order::{EstimateResponse, OrderCreateRequest, OrderResponse};
use crate::dto::{ApiResponse, PaginationParams};
use actix_web::{web, HttpResponse};
use shortform_auth::AuthenticatedUser;
use shortform_core::AppError;
use shortform_db::{PgOrderRepository, PgProfileRepository};
use shortform_services::OrderService;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use validator::Validate;

fn order_service(pool: &PgPool) -> OrderService<PgOrderRepository, PgProfileRepository> {
    OrderService::new(
        Arc::new(PgOrderRepository::new(pool.clone())),
        Arc::new(PgProfileRepository::new(pool.clone())),
    )
}

/// Price an order configuration without submitting it
///
/// POST /api/v1/orders/estimate
#[instrument(skip(pool, req))]
pub async fn estimate(
    pool: web::Data<PgPool>,
    req: web::Json<OrderCreateRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Estimate validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let draft = req.into_inner().into_draft()?;
    let breakdown = order_service(pool.get_ref()).estimate(&draft);

    Ok(HttpResponse::Ok().json(ApiResponse::success(EstimateResponse::from(breakdown))))
}

/// Submit an order
///
/// POST /api/v1/orders
#[instrument(skip(pool, user, req))]
pub async fn create_order(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    req: web::Json<OrderCreateRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Order validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    debug!(user_id = %user.user_id, "Processing order submission");

    let draft = req.into_inner().into_draft()?;
    let order = order_service(pool.get_ref())
        .submit(Some(user.user_id), draft)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        OrderResponse::from(order),
        "Order submitted",
    )))
}

/// List the caller's own orders
///
/// GET /api/v1/orders
#[instrument(skip(pool, user))]
pub async fn list_orders(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse, AppError> {
    query.validate().map_err(|e| {
        warn!("Pagination validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let (orders, total) = order_service(pool.get_ref())
        .list_for_user(user.user_id, &query.to_pagination())
        .await?;

    let response_data: Vec<OrderResponse> = orders.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(query.paginate(response_data, total)))
}

/// Get a single order
///
/// GET /api/v1/orders/{id}
///
/// Customers see only their own orders; an admin may read any.
#[instrument(skip(pool, user))]
pub async fn get_order(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    use shortform_core::traits::Repository;

    let order_id = path.into_inner();

    // Other users' orders read as not found; admins may read any
    let repo = PgOrderRepository::new(pool.get_ref().clone());
    let order = repo
        .find_by_id(order_id)
        .await?
        .filter(|o| o.user_id == user.user_id || user.role.is_admin())
        .ok_or(AppError::OrderNotFound(order_id))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(OrderResponse::from(order))))
}

/// Configure order routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .route("", web::post().to(create_order))
            .route("", web::get().to(list_orders))
            .route("/estimate", web::post().to(estimate))
            .route("/{id}", web::get().to(get_order)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_request_details_length() {
        let req = OrderCreateRequest {
            details: Some("a".repeat(2001)),
            ..Default::default()
        };
        assert!(req.validate().is_err());

        let req = OrderCreateRequest {
            details: Some("촬영 문의".to_string()),
            ..Default::default()
        };
        assert!(req.validate().is_ok());
    }
}
