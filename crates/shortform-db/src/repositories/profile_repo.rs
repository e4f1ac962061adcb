//! Profile repository implementation
//!
//! Provides PostgreSQL-backed storage for profiles with email lookups and
//! atomic credit balance updates.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shortform_core::{
    models::{Profile, ProfileRole},
    traits::{ProfileRepository, Repository},
    AppError, AppResult,
};
use sqlx::PgPool;
use tracing::{debug, error, instrument};
use uuid::Uuid;

/// PostgreSQL implementation of ProfileRepository
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    /// Create a new profile repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert database role string to enum
    fn parse_role(s: &str) -> ProfileRole {
        ProfileRole::from_str(s).unwrap_or(ProfileRole::Customer)
    }
}

#[async_trait]
impl Repository<Profile, Uuid> for PgProfileRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Profile>> {
        debug!("Finding profile by id: {}", id);

        let result = sqlx::query_as::<sqlx::Postgres, ProfileRow>(
            r#"
            SELECT
                id, email, full_name, password_hash,
                role, credit_balance, created_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding profile {}: {}", id, e);
            AppError::Database(format!("Failed to find profile: {}", e))
        })?;

        Ok(result.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn find_all(&self, limit: i64, offset: i64) -> AppResult<Vec<Profile>> {
        debug!("Finding all profiles with limit {} offset {}", limit, offset);

        let rows = sqlx::query_as::<sqlx::Postgres, ProfileRow>(
            r#"
            SELECT
                id, email, full_name, password_hash,
                role, credit_balance, created_at
            FROM profiles
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding profiles: {}", e);
            AppError::Database(format!("Failed to fetch profiles: {}", e))
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM profiles")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error counting profiles: {}", e);
                AppError::Database(format!("Failed to count profiles: {}", e))
            })?;

        Ok(result.0)
    }

    #[instrument(skip(self, entity))]
    async fn create(&self, entity: &Profile) -> AppResult<Profile> {
        debug!("Creating profile: {}", entity.email);

        let row = sqlx::query_as::<sqlx::Postgres, ProfileRow>(
            r#"
            INSERT INTO profiles (id, email, full_name, password_hash, role, credit_balance)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING
                id, email, full_name, password_hash,
                role, credit_balance, created_at
            "#,
        )
        .bind(entity.id)
        .bind(&entity.email)
        .bind(&entity.full_name)
        .bind(&entity.password_hash)
        .bind(entity.role.to_string())
        .bind(entity.credit_balance)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error creating profile: {}", e);
            if e.to_string().contains("unique constraint") {
                AppError::AlreadyExists(format!("Profile {} already exists", entity.email))
            } else {
                AppError::Database(format!("Failed to create profile: {}", e))
            }
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self, entity))]
    async fn update(&self, entity: &Profile) -> AppResult<Profile> {
        debug!("Updating profile: {}", entity.id);

        let row = sqlx::query_as::<sqlx::Postgres, ProfileRow>(
            r#"
            UPDATE profiles
            SET email = $2,
                full_name = $3,
                password_hash = $4,
                role = $5
            WHERE id = $1
            RETURNING
                id, email, full_name, password_hash,
                role, credit_balance, created_at
            "#,
        )
        .bind(entity.id)
        .bind(&entity.email)
        .bind(&entity.full_name)
        .bind(&entity.password_hash)
        .bind(entity.role.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error updating profile {}: {}", entity.id, e);
            AppError::Database(format!("Failed to update profile: {}", e))
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        debug!("Deleting profile: {}", id);

        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error deleting profile {}: {}", id, e);
                AppError::Database(format!("Failed to delete profile: {}", e))
            })?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Profile>> {
        debug!("Finding profile by email");

        let result = sqlx::query_as::<sqlx::Postgres, ProfileRow>(
            r#"
            SELECT
                id, email, full_name, password_hash,
                role, credit_balance, created_at
            FROM profiles
            WHERE lower(email) = lower($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding profile by email: {}", e);
            AppError::Database(format!("Failed to find profile: {}", e))
        })?;

        Ok(result.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn increment_balance(&self, id: Uuid, amount: i64) -> AppResult<i64> {
        debug!("Incrementing balance for profile {} by {}", id, amount);

        // Single UPDATE so concurrent credits serialize at the row. The
        // CHECK constraint on credit_balance rejects negative results.
        let result: Option<(i64,)> = sqlx::query_as(
            r#"
            UPDATE profiles
            SET credit_balance = credit_balance + $2
            WHERE id = $1
            RETURNING credit_balance
            "#,
        )
        .bind(id)
        .bind(amount)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error updating balance for profile {}: {}", id, e);
            AppError::Database(format!("Failed to update balance: {}", e))
        })?;

        match result {
            Some((balance,)) => Ok(balance),
            None => Err(AppError::ProfileNotFound(id.to_string())),
        }
    }
}

/// Helper struct for mapping database rows
#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    email: String,
    full_name: Option<String>,
    password_hash: String,
    role: String,
    credit_balance: i64,
    created_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            full_name: row.full_name,
            password_hash: row.password_hash,
            role: PgProfileRepository::parse_role(&row.role),
            credit_balance: row.credit_balance,
            created_at: row.created_at,
        }
    }
}
