//! Order DTOs
//!
//! Request and response types for order endpoints. Client payloads carry
//! option strings: everything except the service type parses strictly, a
//! non-empty unknown value fails the request. The service type stays
//! lenient so an unselected or unknown service prices at zero instead of
//! erroring, matching how drafts behave on the order form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shortform_core::models::{
    CameraType, DurationBucket, EditingType, LocationType, Order, OrderOptions, OrderStatus,
    PriceBreakdown, ServiceType,
};
use shortform_core::AppError;
use shortform_services::orders::OrderDraft;
use uuid::Uuid;
use validator::Validate;

/// Order submission request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct OrderCreateRequest {
    /// Selected service type
    #[serde(default)]
    pub service_type: Option<String>,

    /// Camera choice
    #[serde(default)]
    pub camera: Option<String>,

    /// Shooting location
    #[serde(default)]
    pub location: Option<String>,

    /// Shoot outside the capital region
    #[serde(default)]
    pub is_non_capital: bool,

    /// Editing depth
    #[serde(default)]
    pub editing_type: Option<String>,

    /// Final video duration bucket
    #[serde(default)]
    pub duration: Option<String>,

    /// Number of videos
    #[serde(default)]
    pub quantity: Option<i32>,

    /// Free-text production notes
    #[validate(length(max = 2000, message = "Details must be at most 2000 characters"))]
    #[serde(default)]
    pub details: Option<String>,
}

/// Parse an optional option string strictly: empty or absent is `None`,
/// a non-empty unknown value is a validation error.
fn parse_strict<T>(
    field: &str,
    value: Option<&str>,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, AppError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse(s)
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("Unknown {} value: {}", field, s))),
    }
}

impl OrderCreateRequest {
    /// Convert the raw payload into a typed draft
    ///
    /// The service type parses leniently (unknown becomes `None`), all
    /// other option fields parse strictly.
    pub fn into_draft(self) -> Result<OrderDraft, AppError> {
        let service_type = self
            .service_type
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(ServiceType::from_str);

        let options = OrderOptions {
            camera: parse_strict("camera", self.camera.as_deref(), CameraType::from_str)?,
            location: parse_strict("location", self.location.as_deref(), LocationType::from_str)?,
            is_non_capital: self.is_non_capital,
            editing_type: parse_strict(
                "editing_type",
                self.editing_type.as_deref(),
                EditingType::from_str,
            )?,
            duration: parse_strict("duration", self.duration.as_deref(), DurationBucket::from_str)?
                .unwrap_or_default(),
            quantity: self.quantity.unwrap_or(1),
            details: self.details.filter(|d| !d.trim().is_empty()),
        };

        Ok(OrderDraft {
            service_type,
            options,
        })
    }
}

/// Order view returned to clients
#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    /// Order id
    pub id: i64,

    /// Owning profile
    pub user_id: Uuid,

    /// Selected service type, if one was recognized
    pub service_type: Option<String>,

    /// Camera choice
    pub camera: Option<String>,

    /// Shooting location
    pub location: Option<String>,

    /// Shoot outside the capital region
    pub is_non_capital: bool,

    /// Editing depth
    pub editing_type: Option<String>,

    /// Final video duration bucket
    pub duration: String,

    /// Number of videos
    pub quantity: i32,

    /// Production notes
    pub details: Option<String>,

    /// Price in won
    pub amount: i64,

    /// Order status
    pub status: String,

    /// Submission timestamp
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            service_type: order.service_type.map(|s| s.to_string()),
            camera: order.options.camera.map(|c| c.to_string()),
            location: order.options.location.map(|l| l.to_string()),
            is_non_capital: order.options.is_non_capital,
            editing_type: order.options.editing_type.map(|e| e.to_string()),
            duration: order.options.duration.to_string(),
            quantity: order.options.quantity,
            details: order.options.details,
            amount: order.amount,
            status: order.status.to_string(),
            created_at: order.created_at,
        }
    }
}

/// Price estimate response
#[derive(Debug, Clone, Serialize)]
pub struct EstimateResponse {
    /// Shooting component per video, in won
    pub shooting_fee: i64,

    /// Editing component per video, in won
    pub editing_fee: i64,

    /// Number of videos priced
    pub quantity: i64,

    /// Total price in won
    pub total: i64,
}

impl From<PriceBreakdown> for EstimateResponse {
    fn from(breakdown: PriceBreakdown) -> Self {
        Self {
            shooting_fee: breakdown.shooting_fee,
            editing_fee: breakdown.editing_fee,
            quantity: breakdown.quantity,
            total: breakdown.total,
        }
    }
}

/// Admin request to set an order's status
#[derive(Debug, Clone, Deserialize)]
pub struct OrderStatusRequest {
    /// Target status ("pending" or "completed")
    pub status: String,
}

impl OrderStatusRequest {
    /// Parse into the typed status
    pub fn parse(&self) -> Result<OrderStatus, AppError> {
        OrderStatus::from_str(&self.status)
            .ok_or_else(|| AppError::Validation(format!("Unknown status value: {}", self.status)))
    }
}

/// Admin filter for order listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderFilterParams {
    /// Filter by status
    #[serde(default)]
    pub status: Option<String>,
}

impl OrderFilterParams {
    /// Parse the optional status filter
    pub fn parse_status(&self) -> Result<Option<OrderStatus>, AppError> {
        parse_strict("status", self.status.as_deref(), OrderStatus::from_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_draft_full_payload() {
        let request = OrderCreateRequest {
            service_type: Some("shooting_editing".to_string()),
            camera: Some("pro".to_string()),
            location: Some("visit".to_string()),
            is_non_capital: true,
            editing_type: Some("full_edit".to_string()),
            duration: Some("30s_1m".to_string()),
            quantity: Some(2),
            details: Some("제품 홍보 영상".to_string()),
        };

        let draft = request.into_draft().unwrap();
        assert_eq!(draft.service_type, Some(ServiceType::ShootingEditing));
        assert_eq!(draft.options.camera, Some(CameraType::Pro));
        assert_eq!(draft.options.duration, DurationBucket::From30sTo1m);
        assert_eq!(draft.options.quantity, 2);
    }

    #[test]
    fn test_unknown_service_type_is_lenient() {
        let request = OrderCreateRequest {
            service_type: Some("livestream".to_string()),
            ..Default::default()
        };

        let draft = request.into_draft().unwrap();
        assert_eq!(draft.service_type, None);
    }

    #[test]
    fn test_empty_service_type_is_none() {
        let request = OrderCreateRequest {
            service_type: Some("".to_string()),
            ..Default::default()
        };

        assert_eq!(request.into_draft().unwrap().service_type, None);
    }

    #[test]
    fn test_unknown_camera_is_strict() {
        let request = OrderCreateRequest {
            service_type: Some("shooting".to_string()),
            camera: Some("drone".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            request.into_draft(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_unknown_duration_is_strict() {
        let request = OrderCreateRequest {
            duration: Some("2m".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            request.into_draft(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_missing_duration_defaults_under_30s() {
        let request = OrderCreateRequest::default();
        let draft = request.into_draft().unwrap();
        assert_eq!(draft.options.duration, DurationBucket::Under30s);
    }

    #[test]
    fn test_missing_quantity_defaults_to_one() {
        let request = OrderCreateRequest::default();
        let draft = request.into_draft().unwrap();
        assert_eq!(draft.options.quantity, 1);
    }

    #[test]
    fn test_status_request_parse() {
        let request = OrderStatusRequest {
            status: "completed".to_string(),
        };
        assert_eq!(request.parse().unwrap(), OrderStatus::Completed);

        let request = OrderStatusRequest {
            status: "shipped".to_string(),
        };
        assert!(request.parse().is_err());
    }
}
