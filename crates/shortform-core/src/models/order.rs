//! Order model
//!
//! Represents production orders for short-form video services.
//! The amount is computed once at submission time and persisted with the
//! full option snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Service type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    /// Shooting only
    Shooting,
    /// Editing only
    Editing,
    /// Shooting plus editing
    ShootingEditing,
    /// Planning, shooting, editing and upload handled end to end
    AllInOne,
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceType::Shooting => write!(f, "shooting"),
            ServiceType::Editing => write!(f, "editing"),
            ServiceType::ShootingEditing => write!(f, "shooting_editing"),
            ServiceType::AllInOne => write!(f, "all_in_one"),
        }
    }
}

impl ServiceType {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "shooting" => Some(ServiceType::Shooting),
            "editing" => Some(ServiceType::Editing),
            "shooting_editing" => Some(ServiceType::ShootingEditing),
            "all_in_one" => Some(ServiceType::AllInOne),
            _ => None,
        }
    }

    /// Whether the shooting price component applies
    pub fn includes_shooting(&self) -> bool {
        matches!(
            self,
            ServiceType::Shooting | ServiceType::ShootingEditing | ServiceType::AllInOne
        )
    }

    /// Whether the editing price component applies
    pub fn includes_editing(&self) -> bool {
        matches!(
            self,
            ServiceType::Editing | ServiceType::ShootingEditing | ServiceType::AllInOne
        )
    }
}

/// Camera option for shooting services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraType {
    /// Smartphone rig
    Phone,
    /// Professional cinema camera
    Pro,
}

impl fmt::Display for CameraType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraType::Phone => write!(f, "phone"),
            CameraType::Pro => write!(f, "pro"),
        }
    }
}

impl CameraType {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "phone" => Some(CameraType::Phone),
            "pro" => Some(CameraType::Pro),
            _ => None,
        }
    }
}

/// Shooting location option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    /// In-house studio
    Studio,
    /// Outdoor shoot
    Outdoor,
    /// Crew visits the customer's place of business
    Visit,
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationType::Studio => write!(f, "studio"),
            LocationType::Outdoor => write!(f, "outdoor"),
            LocationType::Visit => write!(f, "visit"),
        }
    }
}

impl LocationType {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "studio" => Some(LocationType::Studio),
            "outdoor" => Some(LocationType::Outdoor),
            "visit" => Some(LocationType::Visit),
            _ => None,
        }
    }
}

/// Editing depth option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditingType {
    /// Cuts and basic corrections only
    CutOnly,
    /// Full edit with subtitles, effects and sound design
    FullEdit,
}

impl fmt::Display for EditingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditingType::CutOnly => write!(f, "cut_only"),
            EditingType::FullEdit => write!(f, "full_edit"),
        }
    }
}

impl EditingType {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cut_only" => Some(EditingType::CutOnly),
            "full_edit" => Some(EditingType::FullEdit),
            _ => None,
        }
    }
}

/// Final video duration bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DurationBucket {
    /// Under 30 seconds
    #[default]
    Under30s,
    /// Between 30 seconds and 1 minute
    From30sTo1m,
}

impl fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationBucket::Under30s => write!(f, "under_30s"),
            DurationBucket::From30sTo1m => write!(f, "30s_1m"),
        }
    }
}

impl DurationBucket {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "under_30s" => Some(DurationBucket::Under30s),
            "30s_1m" => Some(DurationBucket::From30sTo1m),
            _ => None,
        }
    }
}

/// Order status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Awaiting production
    #[default]
    Pending,
    /// Production finished and delivered
    Completed,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Completed => write!(f, "completed"),
        }
    }
}

impl OrderStatus {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(OrderStatus::Pending),
            "completed" => Some(OrderStatus::Completed),
            _ => None,
        }
    }

    /// The other status. Admins may flip orders back and forth freely.
    pub fn toggled(&self) -> Self {
        match self {
            OrderStatus::Pending => OrderStatus::Completed,
            OrderStatus::Completed => OrderStatus::Pending,
        }
    }
}

/// Option snapshot captured with an order
///
/// Unselected options are `None` and contribute nothing to the price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OrderOptions {
    /// Camera choice (shooting services)
    pub camera: Option<CameraType>,

    /// Shooting location
    pub location: Option<LocationType>,

    /// Shoot takes place outside the capital region (visit surcharge)
    pub is_non_capital: bool,

    /// Editing depth (editing services)
    pub editing_type: Option<EditingType>,

    /// Final video length
    pub duration: DurationBucket,

    /// Number of videos ordered
    pub quantity: i32,

    /// Free-text production notes from the customer
    pub details: Option<String>,
}

impl OrderOptions {
    /// Quantity with the lower bound applied. Never below 1.
    #[inline]
    pub fn effective_quantity(&self) -> i64 {
        i64::from(self.quantity.max(1))
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier
    pub id: i64,

    /// Owning profile
    pub user_id: Uuid,

    /// Selected service. `None` when the submitted type was empty or
    /// unrecognized, in which case the order priced at zero.
    pub service_type: Option<ServiceType>,

    /// Full option snapshot at submission time
    pub options: OrderOptions,

    /// Price in won, computed once at submission and never recomputed
    pub amount: i64,

    /// Order status, admin-mutated only
    pub status: OrderStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Default for Order {
    fn default() -> Self {
        Self {
            id: 0,
            user_id: Uuid::nil(),
            service_type: None,
            options: OrderOptions {
                quantity: 1,
                ..Default::default()
            },
            amount: 0,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_type_components() {
        assert!(ServiceType::Shooting.includes_shooting());
        assert!(!ServiceType::Shooting.includes_editing());
        assert!(!ServiceType::Editing.includes_shooting());
        assert!(ServiceType::Editing.includes_editing());
        assert!(ServiceType::ShootingEditing.includes_shooting());
        assert!(ServiceType::ShootingEditing.includes_editing());
        assert!(ServiceType::AllInOne.includes_shooting());
        assert!(ServiceType::AllInOne.includes_editing());
    }

    #[test]
    fn test_service_type_round_trip() {
        for st in [
            ServiceType::Shooting,
            ServiceType::Editing,
            ServiceType::ShootingEditing,
            ServiceType::AllInOne,
        ] {
            assert_eq!(ServiceType::from_str(&st.to_string()), Some(st));
        }
        assert_eq!(ServiceType::from_str(""), None);
        assert_eq!(ServiceType::from_str("livestream"), None);
    }

    #[test]
    fn test_duration_bucket_parse() {
        assert_eq!(
            DurationBucket::from_str("30s_1m"),
            Some(DurationBucket::From30sTo1m)
        );
        assert_eq!(
            DurationBucket::from_str("UNDER_30S"),
            Some(DurationBucket::Under30s)
        );
        assert_eq!(DurationBucket::from_str("2m"), None);
    }

    #[test]
    fn test_status_toggle() {
        assert_eq!(OrderStatus::Pending.toggled(), OrderStatus::Completed);
        assert_eq!(OrderStatus::Completed.toggled(), OrderStatus::Pending);
    }

    #[test]
    fn test_effective_quantity_clamped() {
        let mut options = OrderOptions::default();
        options.quantity = 0;
        assert_eq!(options.effective_quantity(), 1);
        options.quantity = -5;
        assert_eq!(options.effective_quantity(), 1);
        options.quantity = 3;
        assert_eq!(options.effective_quantity(), 3);
    }
}
