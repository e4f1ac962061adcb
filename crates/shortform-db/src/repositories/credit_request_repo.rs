//! Credit request repository implementation
//!
//! Provides PostgreSQL-backed storage for top-up requests. Approval runs
//! as a single transaction so the status transition and the balance
//! credit commit together or not at all.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shortform_core::{
    models::{CreditRequest, CreditRequestStatus},
    traits::{ApprovalOutcome, CreditRequestRepository, Repository},
    AppError, AppResult,
};
use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

const REQUEST_COLUMNS: &str = r#"
    id, user_id, amount, depositor_name, status, created_at
"#;

/// PostgreSQL implementation of CreditRequestRepository
pub struct PgCreditRequestRepository {
    pool: PgPool,
}

impl PgCreditRequestRepository {
    /// Create a new credit request repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert database status string to enum
    fn parse_status(s: &str) -> CreditRequestStatus {
        CreditRequestStatus::from_str(s).unwrap_or(CreditRequestStatus::Pending)
    }

    fn select_query(suffix: &str) -> String {
        format!("SELECT {} FROM credit_requests {}", REQUEST_COLUMNS, suffix)
    }
}

#[async_trait]
impl Repository<CreditRequest, Uuid> for PgCreditRequestRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CreditRequest>> {
        debug!("Finding credit request by id: {}", id);

        let result =
            sqlx::query_as::<sqlx::Postgres, CreditRequestRow>(&Self::select_query("WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    error!("Database error finding credit request {}: {}", id, e);
                    AppError::Database(format!("Failed to find credit request: {}", e))
                })?;

        Ok(result.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn find_all(&self, limit: i64, offset: i64) -> AppResult<Vec<CreditRequest>> {
        debug!(
            "Finding all credit requests with limit {} offset {}",
            limit, offset
        );

        let rows = sqlx::query_as::<sqlx::Postgres, CreditRequestRow>(&Self::select_query(
            "ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding credit requests: {}", e);
            AppError::Database(format!("Failed to fetch credit requests: {}", e))
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM credit_requests")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error counting credit requests: {}", e);
                AppError::Database(format!("Failed to count credit requests: {}", e))
            })?;

        Ok(result.0)
    }

    #[instrument(skip(self, entity))]
    async fn create(&self, entity: &CreditRequest) -> AppResult<CreditRequest> {
        debug!(
            "Creating credit request for user {} amount {}",
            entity.user_id, entity.amount
        );

        let row = sqlx::query_as::<sqlx::Postgres, CreditRequestRow>(&format!(
            r#"
            INSERT INTO credit_requests (id, user_id, amount, depositor_name, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            REQUEST_COLUMNS
        ))
        .bind(entity.id)
        .bind(entity.user_id)
        .bind(entity.amount)
        .bind(&entity.depositor_name)
        .bind(entity.status.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error creating credit request: {}", e);
            AppError::Database(format!("Failed to create credit request: {}", e))
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self, entity))]
    async fn update(&self, entity: &CreditRequest) -> AppResult<CreditRequest> {
        debug!("Updating credit request: {}", entity.id);

        let row = sqlx::query_as::<sqlx::Postgres, CreditRequestRow>(&format!(
            r#"
            UPDATE credit_requests
            SET amount = $2,
                depositor_name = $3,
                status = $4
            WHERE id = $1
            RETURNING {}
            "#,
            REQUEST_COLUMNS
        ))
        .bind(entity.id)
        .bind(entity.amount)
        .bind(&entity.depositor_name)
        .bind(entity.status.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error updating credit request {}: {}", entity.id, e);
            AppError::Database(format!("Failed to update credit request: {}", e))
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        debug!("Deleting credit request: {}", id);

        let result = sqlx::query("DELETE FROM credit_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error deleting credit request {}: {}", id, e);
                AppError::Database(format!("Failed to delete credit request: {}", e))
            })?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CreditRequestRepository for PgCreditRequestRepository {
    #[instrument(skip(self))]
    async fn list_by_user(
        &self,
        user_id: Uuid,
        status: Option<CreditRequestStatus>,
        limit: i64,
        offset: i64,
    ) -> AppResult<(Vec<CreditRequest>, i64)> {
        debug!("Listing credit requests for user {}", user_id);

        let (total, rows) = match status {
            Some(s) => {
                let total: (i64,) = sqlx::query_as(
                    "SELECT COUNT(*) FROM credit_requests WHERE user_id = $1 AND status = $2",
                )
                .bind(user_id)
                .bind(s.to_string())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    error!("Database error counting user credit requests: {}", e);
                    AppError::Database(format!("Failed to count credit requests: {}", e))
                })?;

                let rows = sqlx::query_as::<sqlx::Postgres, CreditRequestRow>(
                    &Self::select_query(
                        "WHERE user_id = $1 AND status = $2 ORDER BY created_at DESC LIMIT $3 OFFSET $4",
                    ),
                )
                .bind(user_id)
                .bind(s.to_string())
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    error!("Database error fetching user credit requests: {}", e);
                    AppError::Database(format!("Failed to fetch credit requests: {}", e))
                })?;

                (total, rows)
            }
            None => {
                let total: (i64,) =
                    sqlx::query_as("SELECT COUNT(*) FROM credit_requests WHERE user_id = $1")
                        .bind(user_id)
                        .fetch_one(&self.pool)
                        .await
                        .map_err(|e| {
                            error!("Database error counting user credit requests: {}", e);
                            AppError::Database(format!("Failed to count credit requests: {}", e))
                        })?;

                let rows = sqlx::query_as::<sqlx::Postgres, CreditRequestRow>(
                    &Self::select_query(
                        "WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
                    ),
                )
                .bind(user_id)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    error!("Database error fetching user credit requests: {}", e);
                    AppError::Database(format!("Failed to fetch credit requests: {}", e))
                })?;

                (total, rows)
            }
        };

        Ok((rows.into_iter().map(Into::into).collect(), total.0))
    }

    #[instrument(skip(self))]
    async fn list_filtered(
        &self,
        status: Option<CreditRequestStatus>,
        limit: i64,
        offset: i64,
    ) -> AppResult<(Vec<CreditRequest>, i64)> {
        debug!(
            "Listing credit requests with status={:?}, limit={}, offset={}",
            status, limit, offset
        );

        let (total, rows) = match status {
            Some(s) => {
                let total: (i64,) =
                    sqlx::query_as("SELECT COUNT(*) FROM credit_requests WHERE status = $1")
                        .bind(s.to_string())
                        .fetch_one(&self.pool)
                        .await
                        .map_err(|e| {
                            error!("Database error counting filtered credit requests: {}", e);
                            AppError::Database(format!("Failed to count credit requests: {}", e))
                        })?;

                let rows = sqlx::query_as::<sqlx::Postgres, CreditRequestRow>(
                    &Self::select_query(
                        "WHERE status = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
                    ),
                )
                .bind(s.to_string())
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    error!("Database error fetching filtered credit requests: {}", e);
                    AppError::Database(format!("Failed to fetch credit requests: {}", e))
                })?;

                (total, rows)
            }
            None => {
                let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM credit_requests")
                    .fetch_one(&self.pool)
                    .await
                    .map_err(|e| {
                        error!("Database error counting credit requests: {}", e);
                        AppError::Database(format!("Failed to count credit requests: {}", e))
                    })?;

                let rows = sqlx::query_as::<sqlx::Postgres, CreditRequestRow>(
                    &Self::select_query("ORDER BY created_at DESC LIMIT $1 OFFSET $2"),
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    error!("Database error fetching credit requests: {}", e);
                    AppError::Database(format!("Failed to fetch credit requests: {}", e))
                })?;

                (total, rows)
            }
        };

        Ok((rows.into_iter().map(Into::into).collect(), total.0))
    }

    #[instrument(skip(self))]
    async fn pending_stats(&self) -> AppResult<(i64, i64)> {
        let result: (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COALESCE(SUM(amount), 0)::BIGINT
            FROM credit_requests
            WHERE status = 'pending'
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error computing pending stats: {}", e);
            AppError::Database(format!("Failed to compute pending stats: {}", e))
        })?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn approve_and_credit(&self, id: Uuid) -> AppResult<ApprovalOutcome> {
        debug!("Approving credit request {}", id);

        let mut tx = self.pool.begin().await.map_err(|e| {
            error!("Failed to begin transaction: {}", e);
            AppError::Transaction(format!("Failed to begin transaction: {}", e))
        })?;

        // Guard the transition on the pending status. Zero rows means the
        // request is missing or already finalized, and nothing is credited.
        let row = sqlx::query_as::<sqlx::Postgres, CreditRequestRow>(&format!(
            r#"
            UPDATE credit_requests
            SET status = 'approved'
            WHERE id = $1 AND status = 'pending'
            RETURNING {}
            "#,
            REQUEST_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            error!("Database error approving credit request {}: {}", id, e);
            AppError::Database(format!("Failed to approve credit request: {}", e))
        })?;

        let request: CreditRequest = match row {
            Some(row) => row.into(),
            None => {
                tx.rollback().await.ok();
                return match self.find_by_id(id).await? {
                    Some(existing) => {
                        warn!(
                            "Credit request {} already finalized as {}",
                            id, existing.status
                        );
                        Err(AppError::CreditRequestFinalized(id.to_string()))
                    }
                    None => Err(AppError::CreditRequestNotFound(id.to_string())),
                };
            }
        };

        let balance: Option<(i64,)> = sqlx::query_as(
            r#"
            UPDATE profiles
            SET credit_balance = credit_balance + $2
            WHERE id = $1
            RETURNING credit_balance
            "#,
        )
        .bind(request.user_id)
        .bind(request.amount)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            error!(
                "Database error crediting profile {}: {}",
                request.user_id, e
            );
            AppError::Database(format!("Failed to credit balance: {}", e))
        })?;

        let new_balance = match balance {
            Some((b,)) => b,
            None => {
                tx.rollback().await.ok();
                return Err(AppError::ProfileNotFound(request.user_id.to_string()));
            }
        };

        tx.commit().await.map_err(|e| {
            error!("Failed to commit transaction: {}", e);
            AppError::Transaction(format!("Failed to commit transaction: {}", e))
        })?;

        info!(
            "Credit request {} approved, credited {} won to user {}, new balance {}",
            id, request.amount, request.user_id, new_balance
        );

        Ok(ApprovalOutcome {
            request,
            new_balance,
        })
    }

    #[instrument(skip(self))]
    async fn reject(&self, id: Uuid) -> AppResult<CreditRequest> {
        debug!("Rejecting credit request {}", id);

        let row = sqlx::query_as::<sqlx::Postgres, CreditRequestRow>(&format!(
            r#"
            UPDATE credit_requests
            SET status = 'rejected'
            WHERE id = $1 AND status = 'pending'
            RETURNING {}
            "#,
            REQUEST_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error rejecting credit request {}: {}", id, e);
            AppError::Database(format!("Failed to reject credit request: {}", e))
        })?;

        match row {
            Some(row) => {
                info!("Credit request {} rejected", id);
                Ok(row.into())
            }
            None => match self.find_by_id(id).await? {
                Some(_) => Err(AppError::CreditRequestFinalized(id.to_string())),
                None => Err(AppError::CreditRequestNotFound(id.to_string())),
            },
        }
    }
}

/// Helper struct for mapping database rows
#[derive(Debug, sqlx::FromRow)]
struct CreditRequestRow {
    id: Uuid,
    user_id: Uuid,
    amount: i64,
    depositor_name: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl From<CreditRequestRow> for CreditRequest {
    fn from(row: CreditRequestRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            amount: row.amount,
            depositor_name: row.depositor_name,
            status: PgCreditRequestRepository::parse_status(&row.status),
            created_at: row.created_at,
        }
    }
}
