//! Integration tests for the order and billing API surface
//!
//! These tests exercise the DTO boundary the handlers rely on: payload
//! parsing, pricing through the typed draft, and response conversions.
//! For full integration testing, set DATABASE_URL environment variable.

#[cfg(test)]
mod tests {
    use shortform_api::dto::{
        ApiResponse, CreditRequestCreate, CreditRequestResponse, DepositInfoResponse,
        EstimateResponse, OrderCreateRequest, OrderResponse, PaginationParams, ProfileResponse,
    };
    use shortform_core::models::{
        CreditRequest, CreditRequestStatus, Order, OrderStatus, PriceBreakdown, Profile,
        ProfileRole, ServiceType,
    };
    use uuid::Uuid;
    use validator::Validate;

    #[test]
    fn test_order_payload_prices_like_the_form() {
        let request = OrderCreateRequest {
            service_type: Some("shooting_editing".to_string()),
            camera: Some("pro".to_string()),
            location: Some("visit".to_string()),
            is_non_capital: true,
            editing_type: Some("full_edit".to_string()),
            duration: Some("30s_1m".to_string()),
            quantity: Some(1),
            details: None,
        };

        let draft = request.into_draft().unwrap();
        let breakdown = PriceBreakdown::calculate(draft.service_type, &draft.options);

        // 200,000 pro camera + 100,000 non-capital visit surcharge,
        // plus 250,000 full edit at 30s-1m
        assert_eq!(breakdown.total, 550_000);

        let response = EstimateResponse::from(breakdown);
        assert_eq!(response.total, 550_000);
        assert_eq!(response.quantity, 1);
    }

    #[test]
    fn test_unrecognized_service_prices_at_zero() {
        let request = OrderCreateRequest {
            service_type: Some("livestream".to_string()),
            ..Default::default()
        };

        let draft = request.into_draft().unwrap();
        assert_eq!(draft.service_type, None);

        let breakdown = PriceBreakdown::calculate(draft.service_type, &draft.options);
        assert_eq!(breakdown.total, 0);
    }

    #[test]
    fn test_unknown_camera_rejects_the_payload() {
        let request = OrderCreateRequest {
            service_type: Some("shooting".to_string()),
            camera: Some("drone".to_string()),
            ..Default::default()
        };

        assert!(request.into_draft().is_err());
    }

    #[test]
    fn test_order_response_conversion() {
        let mut order = Order::default();
        order.id = 42;
        order.service_type = Some(ServiceType::ShootingEditing);
        order.options.quantity = 3;
        order.amount = 1_650_000;
        order.status = OrderStatus::Completed;

        let response = OrderResponse::from(order);
        assert_eq!(response.id, 42);
        assert_eq!(response.service_type.as_deref(), Some("shooting_editing"));
        assert_eq!(response.quantity, 3);
        assert_eq!(response.amount, 1_650_000);
        assert_eq!(response.status, "completed");
    }

    #[test]
    fn test_credit_request_validation_floor() {
        let below = CreditRequestCreate {
            amount: 9_999,
            depositor_name: "홍길동".to_string(),
        };
        assert!(below.validate().is_err());

        let at_floor = CreditRequestCreate {
            amount: 10_000,
            depositor_name: "홍길동".to_string(),
        };
        assert!(at_floor.validate().is_ok());
    }

    #[test]
    fn test_credit_request_response_conversion() {
        let mut request = CreditRequest::default();
        request.user_id = Uuid::new_v4();
        request.amount = 50_000;
        request.depositor_name = "김철수".to_string();
        request.status = CreditRequestStatus::Approved;

        let response = CreditRequestResponse::from(request);
        assert_eq!(response.amount, 50_000);
        assert_eq!(response.depositor_name, "김철수");
        assert_eq!(response.status, "approved");
    }

    #[test]
    fn test_profile_response_never_carries_the_hash() {
        let mut profile = Profile::default();
        profile.email = "user@example.com".to_string();
        profile.password_hash = "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string();
        profile.role = ProfileRole::Customer;
        profile.credit_balance = 120_000;

        let response = ProfileResponse::from(profile);
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("user@example.com"));
        assert!(json.contains("120000"));
        assert!(!json.contains("argon2"));
    }

    #[test]
    fn test_deposit_info_defaults() {
        let info = DepositInfoResponse::default();
        assert_eq!(info.min_topup_won, 10_000);
        assert!(!info.bank_name.is_empty());
        assert!(!info.account_number.is_empty());
    }

    #[test]
    fn test_pagination_offset_calculation() {
        let params = PaginationParams {
            page: 1,
            per_page: 10,
        };
        assert_eq!(params.offset(), 0);

        let params = PaginationParams {
            page: 3,
            per_page: 20,
        };
        assert_eq!(params.offset(), 40);
        assert_eq!(params.limit(), 20);
    }

    #[test]
    fn test_paginated_response_metadata() {
        let params = PaginationParams {
            page: 2,
            per_page: 20,
        };
        let response = params.paginate(vec![1, 2, 3], 43);

        assert_eq!(response.data.len(), 3);
        assert_eq!(response.pagination.total, 43);
        assert_eq!(response.pagination.total_pages, 3);
    }

    #[test]
    fn test_api_response_message_elided_when_absent() {
        let response = ApiResponse::success(1);
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"data":1}"#);
    }
}
