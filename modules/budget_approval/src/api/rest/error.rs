//! Domain error mapping to RFC-9457 Problem Details

use crate::contract::BudgetApprovalError;
use hcm_core::Problem;

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: BudgetApprovalError) -> Problem {
    match error {
        BudgetApprovalError::NotFound { resource, id } => Problem::not_found(&resource, id),
        BudgetApprovalError::Validation { message } => Problem::bad_request(message),
        BudgetApprovalError::Conflict { reason } => Problem::conflict(reason),
        BudgetApprovalError::Forbidden { reason } => Problem::forbidden(reason),
        BudgetApprovalError::Internal => Problem::internal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(map_domain_error(BudgetApprovalError::not_found("budget_plan", "x")).status, 404);
        assert_eq!(map_domain_error(BudgetApprovalError::validation("comment")).status, 400);
        assert_eq!(map_domain_error(BudgetApprovalError::conflict("decided")).status, 409);
        assert_eq!(map_domain_error(BudgetApprovalError::forbidden("not yours")).status, 403);
        assert_eq!(map_domain_error(BudgetApprovalError::Internal).status, 500);
    }
}
