//! Order pricing calculator
//!
//! Maps an order's selected options to an integer price in won.
//! Pure and deterministic: the same inputs always produce the same price,
//! and all arithmetic stays in integers so no rounding is ever needed.

use crate::models::order::{
    CameraType, DurationBucket, EditingType, LocationType, OrderOptions, ServiceType,
};
use serde::Serialize;

/// Shooting fee with a smartphone rig, in won
pub const CAMERA_PHONE_FEE: i64 = 150_000;

/// Shooting fee with a professional camera, in won
pub const CAMERA_PRO_FEE: i64 = 200_000;

/// Surcharge for visit shoots outside the capital region, in won
pub const NON_CAPITAL_VISIT_SURCHARGE: i64 = 100_000;

/// Cut-only editing fee for videos under 30 seconds, in won
pub const CUT_ONLY_UNDER_30S_FEE: i64 = 80_000;

/// Cut-only editing fee for 30 second to 1 minute videos, in won
pub const CUT_ONLY_30S_1M_FEE: i64 = 150_000;

/// Full-edit fee for videos under 30 seconds, in won
pub const FULL_EDIT_UNDER_30S_FEE: i64 = 150_000;

/// Full-edit fee for 30 second to 1 minute videos, in won
pub const FULL_EDIT_30S_1M_FEE: i64 = 250_000;

/// Itemized price estimate for one order configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    /// Shooting component per video, in won
    pub shooting_fee: i64,

    /// Editing component per video, in won
    pub editing_fee: i64,

    /// Number of videos (already clamped to >= 1)
    pub quantity: i64,

    /// Total: (shooting + editing) x quantity
    pub total: i64,
}

impl PriceBreakdown {
    /// Price an order configuration.
    ///
    /// A missing or unrecognized service type prices every component at
    /// zero: no default price is assumed before the user has chosen a
    /// service.
    pub fn calculate(service_type: Option<ServiceType>, options: &OrderOptions) -> Self {
        let shooting_fee = service_type
            .filter(ServiceType::includes_shooting)
            .map_or(0, |_| Self::shooting_component(options));

        let editing_fee = service_type
            .filter(ServiceType::includes_editing)
            .map_or(0, |_| Self::editing_component(options));

        let quantity = options.effective_quantity();

        Self {
            shooting_fee,
            editing_fee,
            quantity,
            total: (shooting_fee + editing_fee) * quantity,
        }
    }

    /// Camera fee plus the non-capital visit surcharge
    fn shooting_component(options: &OrderOptions) -> i64 {
        let camera_fee = match options.camera {
            Some(CameraType::Phone) => CAMERA_PHONE_FEE,
            Some(CameraType::Pro) => CAMERA_PRO_FEE,
            None => 0,
        };

        let surcharge = if options.location == Some(LocationType::Visit) && options.is_non_capital {
            NON_CAPITAL_VISIT_SURCHARGE
        } else {
            0
        };

        camera_fee + surcharge
    }

    /// Editing fee by depth and duration bucket
    fn editing_component(options: &OrderOptions) -> i64 {
        match (options.editing_type, options.duration) {
            (Some(EditingType::CutOnly), DurationBucket::Under30s) => CUT_ONLY_UNDER_30S_FEE,
            (Some(EditingType::CutOnly), DurationBucket::From30sTo1m) => CUT_ONLY_30S_1M_FEE,
            (Some(EditingType::FullEdit), DurationBucket::Under30s) => FULL_EDIT_UNDER_30S_FEE,
            (Some(EditingType::FullEdit), DurationBucket::From30sTo1m) => FULL_EDIT_30S_1M_FEE,
            (None, _) => 0,
        }
    }
}
