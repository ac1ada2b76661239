//! Contract error types for budget approval
//!
//! These errors are transport-agnostic and used for inter-module communication.

use thiserror::Error;

/// Budget approval domain errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetApprovalError {
    /// Plan or level not found in the caller's tenant
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Resource type (budget_plan, approval_level)
        resource: String,
        /// Resource identifier
        id: String,
    },
    /// Input rejected before any write
    #[error("Validation error: {message}")]
    Validation { message: String },
    /// Plan or level is not in a state that allows the operation
    #[error("Conflict: {reason}")]
    Conflict { reason: String },
    /// Caller may not decide this level
    #[error("Forbidden: {reason}")]
    Forbidden { reason: String },
    /// Storage or other infrastructure failure
    #[error("Internal error")]
    Internal,
}

impl BudgetApprovalError {
    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }
}
