//! Native client trait for inter-module communication
//!
//! Workforce planning modules call the approval workflow through this trait.
//! NO HTTP - direct function calls.

use super::{
    error::BudgetApprovalError,
    model::{ApprovalLevel, BudgetPlan, NewBudgetPlan, PlanWithLevels},
};
use async_trait::async_trait;
use hcm_core::SecurityContext;
use uuid::Uuid;

/// Budget approval API for inter-module communication
#[async_trait]
pub trait BudgetApprovalApi: Send + Sync {
    // ===== Plan Operations =====

    /// Create a draft plan with its approval chain
    async fn create_plan(
        &self,
        ctx: &SecurityContext,
        new_plan: NewBudgetPlan,
    ) -> Result<PlanWithLevels, BudgetApprovalError>;

    async fn get_plan(
        &self,
        ctx: &SecurityContext,
        plan_id: Uuid,
    ) -> Result<BudgetPlan, BudgetApprovalError>;

    async fn list_plans(&self, ctx: &SecurityContext)
        -> Result<Vec<BudgetPlan>, BudgetApprovalError>;

    /// Levels of a plan ordered by `level_order`
    async fn list_levels(
        &self,
        ctx: &SecurityContext,
        plan_id: Uuid,
    ) -> Result<Vec<ApprovalLevel>, BudgetApprovalError>;

    /// Move a draft plan into the approval chain
    async fn submit_plan(
        &self,
        ctx: &SecurityContext,
        plan_id: Uuid,
    ) -> Result<PlanWithLevels, BudgetApprovalError>;

    // ===== Decision Operations =====

    async fn approve_level(
        &self,
        ctx: &SecurityContext,
        level_id: Uuid,
        comments: Option<String>,
    ) -> Result<PlanWithLevels, BudgetApprovalError>;

    async fn reject_level(
        &self,
        ctx: &SecurityContext,
        level_id: Uuid,
        comments: Option<String>,
    ) -> Result<PlanWithLevels, BudgetApprovalError>;

    async fn skip_level(
        &self,
        ctx: &SecurityContext,
        level_id: Uuid,
        comments: Option<String>,
    ) -> Result<PlanWithLevels, BudgetApprovalError>;

    /// Levels awaiting a decision by the caller
    async fn pending_approvals(
        &self,
        ctx: &SecurityContext,
    ) -> Result<Vec<ApprovalLevel>, BudgetApprovalError>;
}
