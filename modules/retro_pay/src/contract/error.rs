//! Contract error types for the retroactive pay engine
//!
//! These errors are transport-agnostic and used for inter-module communication.

use thiserror::Error;

/// Retroactive pay domain errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RetroPayError {
    /// Configuration not found in the caller's tenant
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Resource type (retro_pay_config)
        resource: String,
        /// Resource identifier
        id: String,
    },
    /// Input rejected before any write
    #[error("Validation error: {message}")]
    Validation { message: String },
    /// Operation not allowed in the current lifecycle state
    #[error("Conflict: {reason}")]
    Conflict { reason: String },
    /// Storage or other infrastructure failure
    #[error("Internal error")]
    Internal,
}

impl RetroPayError {
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
}
