//! Business info repository implementation
//!
//! One record per user, written with upsert semantics keyed on user_id.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shortform_core::{
    models::BusinessInfo, traits::BusinessInfoRepository, AppError, AppResult,
};
use sqlx::PgPool;
use tracing::{debug, error, instrument};
use uuid::Uuid;

const BUSINESS_COLUMNS: &str = r#"
    id, user_id, company_name, representative_name,
    registration_number, address, business_type, business_item,
    tax_email, created_at, updated_at
"#;

/// PostgreSQL implementation of BusinessInfoRepository
pub struct PgBusinessInfoRepository {
    pool: PgPool,
}

impl PgBusinessInfoRepository {
    /// Create a new business info repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BusinessInfoRepository for PgBusinessInfoRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<BusinessInfo>> {
        debug!("Finding business info for user {}", user_id);

        let result = sqlx::query_as::<sqlx::Postgres, BusinessInfoRow>(&format!(
            "SELECT {} FROM business_info WHERE user_id = $1",
            BUSINESS_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding business info: {}", e);
            AppError::Database(format!("Failed to find business info: {}", e))
        })?;

        Ok(result.map(Into::into))
    }

    #[instrument(skip(self, info))]
    async fn upsert(&self, info: &BusinessInfo) -> AppResult<BusinessInfo> {
        debug!("Upserting business info for user {}", info.user_id);

        let row = sqlx::query_as::<sqlx::Postgres, BusinessInfoRow>(&format!(
            r#"
            INSERT INTO business_info (
                user_id, company_name, representative_name,
                registration_number, address, business_type, business_item, tax_email
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id) DO UPDATE
            SET company_name = EXCLUDED.company_name,
                representative_name = EXCLUDED.representative_name,
                registration_number = EXCLUDED.registration_number,
                address = EXCLUDED.address,
                business_type = EXCLUDED.business_type,
                business_item = EXCLUDED.business_item,
                tax_email = EXCLUDED.tax_email,
                updated_at = NOW()
            RETURNING {}
            "#,
            BUSINESS_COLUMNS
        ))
        .bind(info.user_id)
        .bind(&info.company_name)
        .bind(&info.representative_name)
        .bind(&info.registration_number)
        .bind(&info.address)
        .bind(&info.business_type)
        .bind(&info.business_item)
        .bind(&info.tax_email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error upserting business info: {}", e);
            AppError::Database(format!("Failed to save business info: {}", e))
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn list_all(&self, limit: i64, offset: i64) -> AppResult<(Vec<BusinessInfo>, i64)> {
        debug!(
            "Listing business info records with limit {} offset {}",
            limit, offset
        );

        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM business_info")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error counting business info: {}", e);
                AppError::Database(format!("Failed to count business info: {}", e))
            })?;

        let rows = sqlx::query_as::<sqlx::Postgres, BusinessInfoRow>(&format!(
            "SELECT {} FROM business_info ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            BUSINESS_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error fetching business info: {}", e);
            AppError::Database(format!("Failed to fetch business info: {}", e))
        })?;

        Ok((rows.into_iter().map(Into::into).collect(), total.0))
    }

    #[instrument(skip(self))]
    async fn count(&self) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM business_info")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error counting business info: {}", e);
                AppError::Database(format!("Failed to count business info: {}", e))
            })?;

        Ok(result.0)
    }
}

/// Helper struct for mapping database rows
#[derive(Debug, sqlx::FromRow)]
struct BusinessInfoRow {
    id: i64,
    user_id: Uuid,
    company_name: String,
    representative_name: String,
    registration_number: Option<String>,
    address: Option<String>,
    business_type: Option<String>,
    business_item: Option<String>,
    tax_email: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BusinessInfoRow> for BusinessInfo {
    fn from(row: BusinessInfoRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            company_name: row.company_name,
            representative_name: row.representative_name,
            registration_number: row.registration_number,
            address: row.address,
            business_type: row.business_type,
            business_item: row.business_item,
            tax_email: row.tax_email,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
