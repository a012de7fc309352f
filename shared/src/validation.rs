//! Validation utilities for the RainTrack platform

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::types::GpsCoordinates;

// ============================================================================
// Policy Validations
// ============================================================================

/// Validate a project name (non-empty, at most 120 characters)
pub fn validate_project_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Project name cannot be empty");
    }
    if trimmed.len() > 120 {
        return Err("Project name must be at most 120 characters");
    }
    Ok(())
}

/// Validate a coverage window (start strictly before end)
pub fn validate_coverage_window(start: NaiveDate, end: NaiveDate) -> Result<(), &'static str> {
    if start >= end {
        return Err("Coverage start date must be before end date");
    }
    Ok(())
}

/// Validate a predicted rainy-day count against the coverage window
pub fn validate_predicted_rainy_days(
    predicted: i32,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<(), &'static str> {
    if predicted < 0 {
        return Err("Predicted rainy days cannot be negative");
    }
    let window_days = (end - start).num_days() + 1;
    if i64::from(predicted) > window_days {
        return Err("Predicted rainy days cannot exceed the coverage window length");
    }
    Ok(())
}

/// Validate a coverage amount (strictly positive)
pub fn validate_coverage_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount <= Decimal::ZERO {
        return Err("Coverage amount must be positive");
    }
    Ok(())
}

/// Validate GPS coordinates are on the globe
pub fn validate_coordinates(coords: &GpsCoordinates) -> Result<(), &'static str> {
    if coords.latitude < Decimal::from(-90) || coords.latitude > Decimal::from(90) {
        return Err("Latitude must be between -90 and 90");
    }
    if coords.longitude < Decimal::from(-180) || coords.longitude > Decimal::from(180) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_validate_project_name() {
        assert!(validate_project_name("Riverside Tower").is_ok());
        assert!(validate_project_name("   ").is_err());
        assert!(validate_project_name(&"x".repeat(121)).is_err());
    }

    #[test]
    fn test_validate_coverage_window() {
        assert!(validate_coverage_window(date("2025-05-01"), date("2025-08-31")).is_ok());
        assert!(validate_coverage_window(date("2025-08-31"), date("2025-05-01")).is_err());
        assert!(validate_coverage_window(date("2025-05-01"), date("2025-05-01")).is_err());
    }

    #[test]
    fn test_validate_predicted_rainy_days() {
        let start = date("2025-06-01");
        let end = date("2025-06-30");
        assert!(validate_predicted_rainy_days(10, start, end).is_ok());
        assert!(validate_predicted_rainy_days(30, start, end).is_ok());
        assert!(validate_predicted_rainy_days(31, start, end).is_err());
        assert!(validate_predicted_rainy_days(-1, start, end).is_err());
    }

    #[test]
    fn test_validate_coverage_amount() {
        assert!(validate_coverage_amount(Decimal::from(250_000)).is_ok());
        assert!(validate_coverage_amount(Decimal::ZERO).is_err());
        assert!(validate_coverage_amount(Decimal::from(-5)).is_err());
    }

    #[test]
    fn test_validate_coordinates() {
        let valid = GpsCoordinates::new(Decimal::new(455152, 4), Decimal::new(-1226784, 4));
        assert!(validate_coordinates(&valid).is_ok());

        let bad_lat = GpsCoordinates::new(Decimal::from(91), Decimal::ZERO);
        assert!(validate_coordinates(&bad_lat).is_err());

        let bad_lon = GpsCoordinates::new(Decimal::ZERO, Decimal::from(181));
        assert!(validate_coordinates(&bad_lon).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no@domain").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("password123").is_ok());
        assert!(validate_password("short").is_err());
    }
}
