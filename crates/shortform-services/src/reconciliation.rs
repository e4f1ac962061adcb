//! Credit reconciliation service
//!
//! Handles top-up request intake from customers and the admin-side
//! approve/reject flow. Crediting happens exactly once per request: the
//! repository guards the status transition, and this service surfaces the
//! conflict when a request was already decided.

use shortform_core::{
    models::{CreditRequest, CreditRequestStatus, MIN_TOPUP_WON},
    traits::{ApprovalOutcome, CreditRequestRepository, Pagination},
    AppError, AppResult,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Credit reconciliation service
pub struct ReconciliationService<C: CreditRequestRepository> {
    credit_repo: Arc<C>,
}

impl<C: CreditRequestRepository> ReconciliationService<C> {
    /// Create a new reconciliation service
    pub fn new(credit_repo: Arc<C>) -> Self {
        Self { credit_repo }
    }

    /// File a top-up request for the given user
    ///
    /// The amount must meet the 10,000 won floor and the depositor name
    /// must be non-blank, otherwise nothing is persisted.
    #[instrument(skip(self))]
    pub async fn request_topup(
        &self,
        user_id: Uuid,
        amount: i64,
        depositor_name: &str,
    ) -> AppResult<CreditRequest> {
        if amount < MIN_TOPUP_WON {
            warn!(
                user_id = %user_id,
                amount,
                "Top-up request below minimum"
            );
            return Err(AppError::InvalidInput(format!(
                "Minimum top-up amount is {} won",
                MIN_TOPUP_WON
            )));
        }

        let depositor_name = depositor_name.trim();
        if depositor_name.is_empty() {
            return Err(AppError::MissingField("depositor_name".to_string()));
        }

        let request = CreditRequest {
            id: Uuid::new_v4(),
            user_id,
            amount,
            depositor_name: depositor_name.to_string(),
            status: CreditRequestStatus::Pending,
            created_at: chrono::Utc::now(),
        };

        let created = self.credit_repo.create(&request).await?;

        info!(
            request_id = %created.id,
            user_id = %user_id,
            amount,
            "Top-up request filed"
        );

        Ok(created)
    }

    /// List the caller's own requests, newest first
    #[instrument(skip(self))]
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        status: Option<CreditRequestStatus>,
        pagination: &Pagination,
    ) -> AppResult<(Vec<CreditRequest>, i64)> {
        self.credit_repo
            .list_by_user(user_id, status, pagination.limit(), pagination.offset())
            .await
    }

    /// List requests across all users (admin view)
    #[instrument(skip(self))]
    pub async fn list_all(
        &self,
        status: Option<CreditRequestStatus>,
        pagination: &Pagination,
    ) -> AppResult<(Vec<CreditRequest>, i64)> {
        self.credit_repo
            .list_filtered(status, pagination.limit(), pagination.offset())
            .await
    }

    /// Approve a pending request and credit the user (admin action)
    ///
    /// Idempotence is enforced below this call: a request that was already
    /// finalized fails with `CreditRequestFinalized` and the balance is
    /// untouched.
    #[instrument(skip(self))]
    pub async fn approve(&self, request_id: Uuid) -> AppResult<ApprovalOutcome> {
        let outcome = self.credit_repo.approve_and_credit(request_id).await?;

        info!(
            request_id = %request_id,
            user_id = %outcome.request.user_id,
            amount = outcome.request.amount,
            new_balance = outcome.new_balance,
            "Credit request approved"
        );

        Ok(outcome)
    }

    /// Reject a pending request (admin action), no balance effect
    #[instrument(skip(self))]
    pub async fn reject(&self, request_id: Uuid) -> AppResult<CreditRequest> {
        let rejected = self.credit_repo.reject(request_id).await?;

        info!(
            request_id = %request_id,
            user_id = %rejected.user_id,
            "Credit request rejected"
        );

        Ok(rejected)
    }

    /// Count pending requests and sum their amounts, for the admin dashboard
    #[instrument(skip(self))]
    pub async fn pending_stats(&self) -> AppResult<(i64, i64)> {
        self.credit_repo.pending_stats().await
    }
}
