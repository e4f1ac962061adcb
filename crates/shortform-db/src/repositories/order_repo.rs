//! Order repository implementation
//!
//! Provides PostgreSQL-backed storage for orders with per-user listings
//! and admin-side status updates. The option snapshot is stored in
//! dedicated columns so the admin dashboard can filter on them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shortform_core::{
    models::{
        CameraType, DurationBucket, EditingType, LocationType, Order, OrderOptions, OrderStatus,
        ServiceType,
    },
    traits::{OrderRepository, Repository},
    AppError, AppResult,
};
use sqlx::PgPool;
use tracing::{debug, error, instrument};
use uuid::Uuid;

const ORDER_COLUMNS: &str = r#"
    id, user_id, service_type,
    camera, location, is_non_capital,
    editing_type, duration, quantity, details,
    amount, status, created_at
"#;

/// PostgreSQL implementation of OrderRepository
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    /// Create a new order repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert database status string to enum
    fn parse_status(s: &str) -> OrderStatus {
        OrderStatus::from_str(s).unwrap_or(OrderStatus::Pending)
    }

    fn select_query(suffix: &str) -> String {
        format!("SELECT {} FROM orders {}", ORDER_COLUMNS, suffix)
    }
}

#[async_trait]
impl Repository<Order, i64> for PgOrderRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Order>> {
        debug!("Finding order by id: {}", id);

        let result = sqlx::query_as::<sqlx::Postgres, OrderRow>(&Self::select_query("WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error finding order {}: {}", id, e);
                AppError::Database(format!("Failed to find order: {}", e))
            })?;

        Ok(result.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn find_all(&self, limit: i64, offset: i64) -> AppResult<Vec<Order>> {
        debug!("Finding all orders with limit {} offset {}", limit, offset);

        let rows = sqlx::query_as::<sqlx::Postgres, OrderRow>(&Self::select_query(
            "ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding orders: {}", e);
            AppError::Database(format!("Failed to fetch orders: {}", e))
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error counting orders: {}", e);
                AppError::Database(format!("Failed to count orders: {}", e))
            })?;

        Ok(result.0)
    }

    #[instrument(skip(self, entity))]
    async fn create(&self, entity: &Order) -> AppResult<Order> {
        debug!("Creating order for user: {}", entity.user_id);

        let row = sqlx::query_as::<sqlx::Postgres, OrderRow>(&format!(
            r#"
            INSERT INTO orders (
                user_id, service_type, camera, location, is_non_capital,
                editing_type, duration, quantity, details, amount, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            ORDER_COLUMNS
        ))
        .bind(entity.user_id)
        .bind(entity.service_type.map(|s| s.to_string()))
        .bind(entity.options.camera.map(|c| c.to_string()))
        .bind(entity.options.location.map(|l| l.to_string()))
        .bind(entity.options.is_non_capital)
        .bind(entity.options.editing_type.map(|e| e.to_string()))
        .bind(entity.options.duration.to_string())
        .bind(entity.options.quantity)
        .bind(&entity.options.details)
        .bind(entity.amount)
        .bind(entity.status.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error creating order: {}", e);
            AppError::Database(format!("Failed to create order: {}", e))
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self, entity))]
    async fn update(&self, entity: &Order) -> AppResult<Order> {
        debug!("Updating order: {}", entity.id);

        let row = sqlx::query_as::<sqlx::Postgres, OrderRow>(&format!(
            r#"
            UPDATE orders
            SET status = $2,
                details = $3
            WHERE id = $1
            RETURNING {}
            "#,
            ORDER_COLUMNS
        ))
        .bind(entity.id)
        .bind(entity.status.to_string())
        .bind(&entity.options.details)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error updating order {}: {}", entity.id, e);
            AppError::Database(format!("Failed to update order: {}", e))
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> AppResult<bool> {
        debug!("Deleting order: {}", id);

        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error deleting order {}: {}", id, e);
                AppError::Database(format!("Failed to delete order: {}", e))
            })?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    #[instrument(skip(self))]
    async fn list_by_user(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<(Vec<Order>, i64)> {
        debug!("Listing orders for user {}", user_id);

        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error counting user orders: {}", e);
                AppError::Database(format!("Failed to count orders: {}", e))
            })?;

        let rows = sqlx::query_as::<sqlx::Postgres, OrderRow>(&Self::select_query(
            "WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        ))
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error fetching user orders: {}", e);
            AppError::Database(format!("Failed to fetch orders: {}", e))
        })?;

        Ok((rows.into_iter().map(Into::into).collect(), total.0))
    }

    #[instrument(skip(self))]
    async fn list_filtered(
        &self,
        status: Option<OrderStatus>,
        limit: i64,
        offset: i64,
    ) -> AppResult<(Vec<Order>, i64)> {
        debug!(
            "Listing orders with status={:?}, limit={}, offset={}",
            status, limit, offset
        );

        let (total, rows) = match status {
            Some(s) => {
                let total: (i64,) =
                    sqlx::query_as("SELECT COUNT(*) FROM orders WHERE status = $1")
                        .bind(s.to_string())
                        .fetch_one(&self.pool)
                        .await
                        .map_err(|e| {
                            error!("Database error counting filtered orders: {}", e);
                            AppError::Database(format!("Failed to count orders: {}", e))
                        })?;

                let rows = sqlx::query_as::<sqlx::Postgres, OrderRow>(&Self::select_query(
                    "WHERE status = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
                ))
                .bind(s.to_string())
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    error!("Database error fetching filtered orders: {}", e);
                    AppError::Database(format!("Failed to fetch orders: {}", e))
                })?;

                (total, rows)
            }
            None => {
                let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
                    .fetch_one(&self.pool)
                    .await
                    .map_err(|e| {
                        error!("Database error counting orders: {}", e);
                        AppError::Database(format!("Failed to count orders: {}", e))
                    })?;

                let rows = sqlx::query_as::<sqlx::Postgres, OrderRow>(&Self::select_query(
                    "ORDER BY created_at DESC LIMIT $1 OFFSET $2",
                ))
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    error!("Database error fetching orders: {}", e);
                    AppError::Database(format!("Failed to fetch orders: {}", e))
                })?;

                (total, rows)
            }
        };

        Ok((rows.into_iter().map(Into::into).collect(), total.0))
    }

    #[instrument(skip(self))]
    async fn update_status(&self, id: i64, status: OrderStatus) -> AppResult<Order> {
        debug!("Setting order {} status to {}", id, status);

        let row = sqlx::query_as::<sqlx::Postgres, OrderRow>(&format!(
            r#"
            UPDATE orders
            SET status = $2
            WHERE id = $1
            RETURNING {}
            "#,
            ORDER_COLUMNS
        ))
        .bind(id)
        .bind(status.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error updating order {} status: {}", id, e);
            AppError::Database(format!("Failed to update order status: {}", e))
        })?;

        row.map(Into::into).ok_or(AppError::OrderNotFound(id))
    }
}

/// Helper struct for mapping database rows
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    user_id: Uuid,
    service_type: Option<String>,
    camera: Option<String>,
    location: Option<String>,
    is_non_capital: bool,
    editing_type: Option<String>,
    duration: String,
    quantity: i32,
    details: Option<String>,
    amount: i64,
    status: String,
    created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            service_type: row.service_type.as_deref().and_then(ServiceType::from_str),
            options: OrderOptions {
                camera: row.camera.as_deref().and_then(CameraType::from_str),
                location: row.location.as_deref().and_then(LocationType::from_str),
                is_non_capital: row.is_non_capital,
                editing_type: row.editing_type.as_deref().and_then(EditingType::from_str),
                duration: DurationBucket::from_str(&row.duration).unwrap_or_default(),
                quantity: row.quantity,
                details: row.details,
            },
            amount: row.amount,
            status: PgOrderRepository::parse_status(&row.status),
            created_at: row.created_at,
        }
    }
}
