//! Budget Approval Module
//!
//! Moves a budget plan through an ordered chain of approval levels. Approving
//! or skipping the active level reveals the next one; the last approval
//! approves the plan and any rejection rejects it. Every decision is committed
//! as one atomic transition.

// Public exports
pub mod contract;
pub use contract::{
    client::BudgetApprovalApi, error::BudgetApprovalError, ApprovalLevel, BudgetPlan, Decision,
    LevelStatus, NewApprovalLevel, NewBudgetPlan, PlanStatus, PlanWithLevels,
};

pub mod module;
pub use module::BudgetApprovalModule;

pub mod config;
pub use config::Config;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
