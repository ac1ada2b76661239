//! Contract layer - public API for inter-module communication
//!
//! This layer contains transport-agnostic models and the native client trait.

pub mod client;
pub mod error;
pub mod model;

pub use client::BudgetApprovalApi;
pub use error::BudgetApprovalError;
pub use model::{
    ApprovalLevel, BudgetPlan, Decision, LevelDecision, LevelStatus, NewApprovalLevel,
    NewBudgetPlan, NextLevel, PlanStatus, PlanWithLevels, Transition,
};
