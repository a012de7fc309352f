//! Warranty claim integration tests
//!
//! Tests for claim intake validation and the settlement rules that move a
//! project from triggered to paid.

use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use shared::{evaluate_payout, ClaimStatus, ClaimSubmission, PayoutStatus};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn submission() -> ClaimSubmission {
    ClaimSubmission {
        project_id: Uuid::new_v4(),
        claimant_name: "Jordan Blake".to_string(),
        claimant_email: "jordan.blake@example.com".to_string(),
        claim_amount: dec("15000"),
        description: "Sustained rainfall delayed structural steel erection".to_string(),
        declaration: true,
    }
}

// ============================================================================
// Intake Validation
// ============================================================================

#[cfg(test)]
mod validation_tests {
    use super::*;

    #[test]
    fn test_complete_submission_is_valid() {
        assert!(submission().validate().is_ok());
    }

    #[test]
    fn test_name_minimum_length() {
        let mut s = submission();
        s.claimant_name = "J".to_string();
        assert!(s.validate().is_err());

        s.claimant_name = "Jo".to_string();
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_email_must_be_valid() {
        for bad in ["", "plainaddress", "@missing-local.com", "no-at-sign.com"] {
            let mut s = submission();
            s.claimant_email = bad.to_string();
            assert!(s.validate().is_err(), "accepted bad email: {:?}", bad);
        }
    }

    #[test]
    fn test_claim_amount_must_be_positive() {
        let mut s = submission();
        s.claim_amount = Decimal::ZERO;
        assert!(s.validate().is_err());

        s.claim_amount = dec("-100");
        assert!(s.validate().is_err());

        s.claim_amount = dec("0.01");
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_description_minimum_length() {
        let mut s = submission();
        s.description = "short".to_string();
        assert!(s.validate().is_err());

        s.description = "exactly10c".to_string();
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_declaration_must_be_accepted() {
        let mut s = submission();
        s.declaration = false;
        assert!(s.validate().is_err());
    }
}

// ============================================================================
// Eligibility and Settlement Rules
// ============================================================================

#[cfg(test)]
mod settlement_tests {
    use super::*;

    /// Claim eligibility is the payout condition itself
    fn is_claim_eligible(status: PayoutStatus) -> bool {
        status == PayoutStatus::Triggered
    }

    /// Settlement approves a submitted claim against a triggered project
    fn can_approve(claim: ClaimStatus, project: PayoutStatus) -> bool {
        claim == ClaimStatus::Submitted && project == PayoutStatus::Triggered
    }

    #[test]
    fn test_only_triggered_projects_are_eligible() {
        assert!(!is_claim_eligible(PayoutStatus::Pending));
        assert!(is_claim_eligible(PayoutStatus::Triggered));
        assert!(!is_claim_eligible(PayoutStatus::Paid));
    }

    #[test]
    fn test_eligibility_follows_evaluation() {
        // predicted 8, actual 10: triggered, eligible, excess 2
        let eval = evaluate_payout(8, 10, PayoutStatus::Pending).unwrap();
        assert!(is_claim_eligible(eval.status));
        assert_eq!(eval.excess_days, 2);

        // predicted 12, actual 8: pending, not eligible
        let eval = evaluate_payout(12, 8, PayoutStatus::Pending).unwrap();
        assert!(!is_claim_eligible(eval.status));
    }

    #[test]
    fn test_approval_requires_submitted_claim() {
        assert!(can_approve(ClaimStatus::Submitted, PayoutStatus::Triggered));
        assert!(!can_approve(ClaimStatus::Approved, PayoutStatus::Triggered));
        assert!(!can_approve(ClaimStatus::Rejected, PayoutStatus::Triggered));
    }

    #[test]
    fn test_approval_requires_triggered_project() {
        assert!(!can_approve(ClaimStatus::Submitted, PayoutStatus::Pending));
        assert!(!can_approve(ClaimStatus::Submitted, PayoutStatus::Paid));
    }

    /// After settlement the project is paid, so a second claim cannot be
    /// filed and a second approval cannot fire
    #[test]
    fn test_settlement_is_single_shot() {
        let project_after_settlement = PayoutStatus::Paid;
        assert!(!is_claim_eligible(project_after_settlement));
        assert!(!can_approve(ClaimStatus::Submitted, project_after_settlement));
    }

    /// A rejected claim leaves the project triggered; refiling is allowed
    #[test]
    fn test_rejection_preserves_eligibility() {
        let project_status = PayoutStatus::Triggered;
        let _rejected = ClaimStatus::Rejected;
        assert!(is_claim_eligible(project_status));
    }

    #[test]
    fn test_claim_status_round_trip() {
        for status in [
            ClaimStatus::Submitted,
            ClaimStatus::Approved,
            ClaimStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<ClaimStatus>().unwrap(), status);
        }
        assert!("settled".parse::<ClaimStatus>().is_err());
    }
}
