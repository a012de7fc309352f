//! Project model integration tests
//!
//! Tests for coverage-window arithmetic, policy input validation, and the
//! wire format the dashboard consumes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use shared::{
    validate_coverage_amount, validate_coverage_window, validate_predicted_rainy_days,
    validate_project_name, PayoutStatus, Project, RiskLevel,
};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn project() -> Project {
    Project {
        id: Uuid::new_v4(),
        name: "Harbor Bridge Retrofit".to_string(),
        location: "Seattle, WA".to_string(),
        coordinates: None,
        start_date: date("2025-04-01"),
        end_date: date("2025-10-31"),
        predicted_rainy_days: 22,
        actual_rainy_days: 9,
        risk_level: RiskLevel::Medium,
        payout_status: PayoutStatus::Pending,
        coverage_amount: Decimal::from(750_000),
        last_rainfall: None,
    }
}

// ============================================================================
// Coverage Window
// ============================================================================

#[cfg(test)]
mod coverage_tests {
    use super::*;

    #[test]
    fn test_days_remaining_counts_down() {
        let p = project();
        assert_eq!(p.days_remaining(date("2025-10-01")), 30);
        assert_eq!(p.days_remaining(date("2025-10-31")), 0);
    }

    #[test]
    fn test_days_remaining_floors_at_zero_after_window() {
        assert_eq!(project().days_remaining(date("2026-01-01")), 0);
    }

    #[test]
    fn test_active_through_final_day() {
        let p = project();
        assert!(p.is_active(date("2025-10-31")));
        assert!(!p.is_active(date("2025-11-01")));
    }

    #[test]
    fn test_paid_project_still_active_inside_window() {
        let mut p = project();
        p.payout_status = PayoutStatus::Paid;
        assert!(p.is_active(date("2025-07-15")));
    }
}

// ============================================================================
// Policy Input Validation
// ============================================================================

#[cfg(test)]
mod validation_tests {
    use super::*;

    #[test]
    fn test_project_name_rules() {
        assert!(validate_project_name("Harbor Bridge Retrofit").is_ok());
        assert!(validate_project_name("").is_err());
        assert!(validate_project_name("  ").is_err());
    }

    #[test]
    fn test_coverage_window_must_be_forward() {
        assert!(validate_coverage_window(date("2025-04-01"), date("2025-10-31")).is_ok());
        assert!(validate_coverage_window(date("2025-10-31"), date("2025-04-01")).is_err());
    }

    #[test]
    fn test_prediction_bounded_by_window() {
        let start = date("2025-04-01");
        let end = date("2025-04-10");
        // 10-day window, inclusive
        assert!(validate_predicted_rainy_days(10, start, end).is_ok());
        assert!(validate_predicted_rainy_days(11, start, end).is_err());
        assert!(validate_predicted_rainy_days(-3, start, end).is_err());
    }

    #[test]
    fn test_coverage_amount_positive() {
        assert!(validate_coverage_amount(Decimal::from(1)).is_ok());
        assert!(validate_coverage_amount(Decimal::ZERO).is_err());
    }
}

// ============================================================================
// Wire Format
// ============================================================================

#[cfg(test)]
mod serialization_tests {
    use super::*;

    #[test]
    fn test_payout_status_snake_case() {
        let json = serde_json::to_string(&PayoutStatus::Triggered).unwrap();
        assert_eq!(json, "\"triggered\"");
    }

    #[test]
    fn test_risk_level_snake_case() {
        let json = serde_json::to_string(&RiskLevel::High).unwrap();
        assert_eq!(json, "\"high\"");
    }

    #[test]
    fn test_project_round_trips_through_json() {
        let p = project();
        let json = serde_json::to_string(&p).unwrap();
        let back: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, p.id);
        assert_eq!(back.payout_status, p.payout_status);
        assert_eq!(back.predicted_rainy_days, p.predicted_rainy_days);
    }

    #[test]
    fn test_absent_coordinates_serialize_as_null() {
        let json = serde_json::to_value(project()).unwrap();
        assert!(json["coordinates"].is_null());
    }
}
