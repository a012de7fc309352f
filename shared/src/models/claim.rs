//! Warranty claim models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Claim intake form, validated before it reaches the settlement system
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ClaimSubmission {
    pub project_id: Uuid,
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub claimant_name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub claimant_email: String,
    #[validate(custom = "validate_claim_amount")]
    pub claim_amount: Decimal,
    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: String,
    #[validate(custom = "validate_declaration")]
    pub declaration: bool,
}

fn validate_claim_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount <= Decimal::ZERO {
        return Err(ValidationError::new("claim_amount_not_positive"));
    }
    Ok(())
}

fn validate_declaration(declaration: &bool) -> Result<(), ValidationError> {
    if !*declaration {
        return Err(ValidationError::new("declaration_not_accepted"));
    }
    Ok(())
}

/// Settlement lifecycle of a filed claim
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Submitted,
    Approved,
    Rejected,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Submitted => "submitted",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for ClaimStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(ClaimStatus::Submitted),
            "approved" => Ok(ClaimStatus::Approved),
            "rejected" => Ok(ClaimStatus::Rejected),
            other => Err(format!("unknown claim status: {}", other)),
        }
    }
}

/// A filed warranty claim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    pub id: Uuid,
    pub project_id: Uuid,
    pub claimant_name: String,
    pub claimant_email: String,
    pub claim_amount: Decimal,
    pub description: String,
    /// Rainy days over the prediction at filing time, justifying the claim
    pub excess_days: i32,
    pub status: ClaimStatus,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> ClaimSubmission {
        ClaimSubmission {
            project_id: Uuid::new_v4(),
            claimant_name: "Ana Pereira".to_string(),
            claimant_email: "ana@example.com".to_string(),
            claim_amount: Decimal::from(12_000),
            description: "Excess rainfall halted foundation work for two weeks".to_string(),
            declaration: true,
        }
    }

    #[test]
    fn test_valid_submission_passes() {
        assert!(submission().validate().is_ok());
    }

    #[test]
    fn test_short_name_rejected() {
        let mut s = submission();
        s.claimant_name = "A".to_string();
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_bad_email_rejected() {
        let mut s = submission();
        s.claimant_email = "not-an-email".to_string();
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let mut s = submission();
        s.claim_amount = Decimal::ZERO;
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_short_description_rejected() {
        let mut s = submission();
        s.description = "too short".to_string();
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_declaration_must_be_accepted() {
        let mut s = submission();
        s.declaration = false;
        assert!(s.validate().is_err());
    }
}
