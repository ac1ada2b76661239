//! Domain error mapping to RFC-9457 Problem Details

use crate::contract::RetroPayError;
use hcm_core::Problem;

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: RetroPayError) -> Problem {
    match error {
        RetroPayError::NotFound { resource, id } => Problem::not_found(&resource, id),

        RetroPayError::Validation { message } => Problem::bad_request(message),

        RetroPayError::Conflict { reason } => Problem::conflict(reason),

        RetroPayError::Internal => Problem::internal(),
    }
}
