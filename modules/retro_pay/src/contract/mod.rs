//! Contract layer - public API for inter-module communication
//!
//! This layer contains transport-agnostic models and the native client trait.

pub mod client;
pub mod error;
pub mod model;

pub use client::RetroPayApi;
pub use error::RetroPayError;
pub use model::{
    CalculationFilter, ConfigStatus, CycleGroup, EmployeeGroup, EmployeeStatus,
    GenerationSummary, GroupedCalculations, IncreaseSpec, IncreaseType, NewRetroPayConfig,
    PayPeriodEntry, RetroPayCalculation, RetroPayConfig,
};
