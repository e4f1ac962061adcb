//! Order service implementation
//!
//! Prices drafts and submits orders behind the balance guard. The price
//! is computed server-side from the option snapshot and persisted with
//! the order, never trusted from the client.

use shortform_core::{
    models::{Order, OrderOptions, OrderStatus, PriceBreakdown, Profile, ServiceType},
    traits::{OrderRepository, Pagination, ProfileRepository},
    AppError, AppResult,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// A priced, not yet persisted order draft
#[derive(Debug, Clone)]
pub struct OrderDraft {
    /// Selected service, `None` when the submitted type was empty or
    /// unrecognized (prices at zero)
    pub service_type: Option<ServiceType>,

    /// Full option snapshot
    pub options: OrderOptions,
}

/// Order service
///
/// Generic over the repositories so tests can run against in-memory mocks.
pub struct OrderService<O: OrderRepository, P: ProfileRepository> {
    order_repo: Arc<O>,
    profile_repo: Arc<P>,
}

impl<O: OrderRepository, P: ProfileRepository> OrderService<O, P> {
    /// Create a new order service
    pub fn new(order_repo: Arc<O>, profile_repo: Arc<P>) -> Self {
        Self {
            order_repo,
            profile_repo,
        }
    }

    /// Price a draft without persisting anything
    ///
    /// Pure over the inputs, safe to expose unauthenticated.
    pub fn estimate(&self, draft: &OrderDraft) -> PriceBreakdown {
        PriceBreakdown::calculate(draft.service_type, &draft.options)
    }

    /// Submit an order for the given caller
    ///
    /// `user_id` is `None` when the request carried no authenticated
    /// identity. That fails with `AuthRequired` before anything else is
    /// checked, so pricing never runs for anonymous callers.
    ///
    /// The balance must cover the computed total or submission fails with
    /// `InsufficientBalance` carrying the shortfall, and no order row is
    /// written.
    #[instrument(skip(self, draft))]
    pub async fn submit(&self, user_id: Option<Uuid>, draft: OrderDraft) -> AppResult<Order> {
        let user_id = user_id.ok_or(AppError::AuthRequired)?;

        let breakdown = self.estimate(&draft);
        debug!(
            user_id = %user_id,
            total = breakdown.total,
            "Pricing order draft"
        );

        let profile = self
            .profile_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::ProfileNotFound(user_id.to_string()))?;

        if !profile.can_cover(breakdown.total) {
            warn!(
                user_id = %user_id,
                required = breakdown.total,
                available = profile.credit_balance,
                "Order rejected for insufficient balance"
            );
            return Err(AppError::InsufficientBalance {
                required: breakdown.total,
                available: profile.credit_balance,
            });
        }

        // TODO: submission checks the balance but never debits it, so a
        // user can submit any number of orders against the same credits.
        // Needs a debit here (atomic decrement guarded at zero) plus a
        // refund path before it can ship to real customers.
        let order = Order {
            id: 0,
            user_id,
            service_type: draft.service_type,
            options: draft.options,
            amount: breakdown.total,
            status: OrderStatus::Pending,
            created_at: chrono::Utc::now(),
        };

        let created = self.order_repo.create(&order).await?;

        info!(
            order_id = created.id,
            user_id = %user_id,
            amount = created.amount,
            "Order submitted"
        );

        Ok(created)
    }

    /// List the caller's own orders, newest first
    #[instrument(skip(self))]
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        pagination: &Pagination,
    ) -> AppResult<(Vec<Order>, i64)> {
        self.order_repo
            .list_by_user(user_id, pagination.limit(), pagination.offset())
            .await
    }

    /// List orders across all users (admin view)
    #[instrument(skip(self))]
    pub async fn list_all(
        &self,
        status: Option<OrderStatus>,
        pagination: &Pagination,
    ) -> AppResult<(Vec<Order>, i64)> {
        self.order_repo
            .list_filtered(status, pagination.limit(), pagination.offset())
            .await
    }

    /// Set an order's status (admin action)
    #[instrument(skip(self))]
    pub async fn set_status(&self, order_id: i64, status: OrderStatus) -> AppResult<Order> {
        let order = self.order_repo.update_status(order_id, status).await?;
        info!(order_id, status = %order.status, "Order status updated");
        Ok(order)
    }

    /// Flip an order between pending and completed (admin action)
    #[instrument(skip(self))]
    pub async fn toggle_status(&self, order_id: i64) -> AppResult<Order> {
        let order = self
            .order_repo
            .find_by_id(order_id)
            .await?
            .ok_or(AppError::OrderNotFound(order_id))?;

        self.set_status(order_id, order.status.toggled()).await
    }

    /// Look up the profile backing a caller, for balance display
    #[instrument(skip(self))]
    pub async fn profile(&self, user_id: Uuid) -> AppResult<Profile> {
        self.profile_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::ProfileNotFound(user_id.to_string()))
    }
}
