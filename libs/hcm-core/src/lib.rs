//! Shared building blocks for HCM modules
//!
//! Every module operation receives an explicit [`SecurityContext`] instead of
//! reading the current user or company from ambient state, and every REST layer
//! reports failures as RFC-9457 [`Problem`] documents.

pub mod context;
pub mod problem;

pub use context::{SecurityContext, TENANT_ID_HEADER, USER_ID_HEADER};
pub use problem::Problem;
