//! Common traits for repositories
//!
//! Defines abstractions for data store access. The domain core issues these
//! as plain operations over the four collections (orders, profiles,
//! credit_requests, business_info) and never depends on store-specific
//! query syntax.

use crate::error::AppError;
use crate::models::{
    BusinessInfo, CreditRequest, CreditRequestStatus, Order, OrderStatus, Profile,
};
use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

/// Generic repository trait for CRUD operations
#[async_trait]
pub trait Repository<T, ID>: Send + Sync {
    /// Find entity by ID
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, AppError>;

    /// Find all entities with pagination
    async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<T>, AppError>;

    /// Count total entities
    async fn count(&self) -> Result<i64, AppError>;

    /// Create a new entity
    async fn create(&self, entity: &T) -> Result<T, AppError>;

    /// Update an existing entity
    async fn update(&self, entity: &T) -> Result<T, AppError>;

    /// Delete entity by ID
    async fn delete(&self, id: ID) -> Result<bool, AppError>;
}

/// Order repository trait with specialized methods
#[async_trait]
pub trait OrderRepository: Repository<Order, i64> {
    /// List a user's own orders, newest first
    async fn list_by_user(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Order>, i64), AppError>;

    /// List orders with filtering (admin view), newest first
    async fn list_filtered(
        &self,
        status: Option<OrderStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Order>, i64), AppError>;

    /// Set an order's status. Pending and completed flip freely.
    async fn update_status(&self, id: i64, status: OrderStatus) -> Result<Order, AppError>;
}

/// Profile repository trait with specialized methods
#[async_trait]
pub trait ProfileRepository: Repository<Profile, Uuid> {
    /// Find profile by email
    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, AppError>;

    /// Atomically add `amount` won to the balance, returning the new value.
    ///
    /// Single UPDATE at the store, so concurrent credits never lose an
    /// update. A negative `amount` that would take the balance below zero
    /// must fail instead of committing.
    async fn increment_balance(&self, id: Uuid, amount: i64) -> Result<i64, AppError>;
}

/// Outcome of an approved credit request
#[derive(Debug, Clone, Serialize)]
pub struct ApprovalOutcome {
    /// The finalized request
    pub request: CreditRequest,

    /// The user's balance after the credit was applied
    pub new_balance: i64,
}

/// Credit request repository trait with specialized methods
#[async_trait]
pub trait CreditRequestRepository: Repository<CreditRequest, Uuid> {
    /// List a user's own requests, newest first, optionally by status
    async fn list_by_user(
        &self,
        user_id: Uuid,
        status: Option<CreditRequestStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<CreditRequest>, i64), AppError>;

    /// List requests with filtering (admin view), newest first
    async fn list_filtered(
        &self,
        status: Option<CreditRequestStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<CreditRequest>, i64), AppError>;

    /// Count pending requests and sum their amounts
    async fn pending_stats(&self) -> Result<(i64, i64), AppError>;

    /// Approve a pending request and credit the user's balance in one
    /// transaction.
    ///
    /// The transition is guarded on the pending status: a request that was
    /// already finalized fails with `CreditRequestFinalized` and credits
    /// nothing, so a second approval attempt can never double-credit.
    async fn approve_and_credit(&self, id: Uuid) -> Result<ApprovalOutcome, AppError>;

    /// Reject a pending request. No balance effect.
    ///
    /// Guarded on the pending status like approval.
    async fn reject(&self, id: Uuid) -> Result<CreditRequest, AppError>;
}

/// Business info repository trait with specialized methods
#[async_trait]
pub trait BusinessInfoRepository: Send + Sync {
    /// Find the record for a user
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<BusinessInfo>, AppError>;

    /// Create the user's record, or update it if one already exists
    async fn upsert(&self, info: &BusinessInfo) -> Result<BusinessInfo, AppError>;

    /// List all records, newest first (admin view)
    async fn list_all(&self, limit: i64, offset: i64)
        -> Result<(Vec<BusinessInfo>, i64), AppError>;

    /// Count total records
    async fn count(&self) -> Result<i64, AppError>;
}

/// Pagination parameters
#[derive(Debug, Clone, Default)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
}

impl Pagination {
    pub fn new(page: i64, per_page: i64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, 1000),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl PaginationMeta {
    pub fn new(total: i64, page: i64, per_page: i64) -> Self {
        let total_pages = if per_page > 0 {
            (total + per_page - 1) / per_page
        } else {
            0
        };

        Self {
            total,
            page,
            per_page,
            total_pages,
        }
    }
}
