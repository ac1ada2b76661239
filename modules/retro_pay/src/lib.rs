//! Retroactive Pay Module
//!
//! Turns a retroactive increase (percentage or fixed amount over an effective
//! date range for one pay group) plus historical pay period entries into a
//! per-employee, per-cycle, per-pay-element set of adjustments, and groups that
//! set for review.

// Public exports
pub mod contract;
pub use contract::{
    client::RetroPayApi, error::RetroPayError, CalculationFilter, ConfigStatus, EmployeeStatus,
    GenerationSummary, GroupedCalculations, IncreaseSpec, IncreaseType, NewRetroPayConfig,
    RetroPayCalculation, RetroPayConfig,
};

pub mod module;
pub use module::RetroPayModule;

pub mod config;
pub use config::Config;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
