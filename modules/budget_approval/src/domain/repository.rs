use crate::contract::{ApprovalLevel, BudgetPlan, Transition};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Repository trait for budget plans
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Persist a plan and its whole chain in one unit
    async fn create_with_levels(&self, plan: &BudgetPlan, levels: &[ApprovalLevel]) -> Result<()>;

    async fn find_by_id(&self, tenant_id: Uuid, plan_id: Uuid) -> Result<Option<BudgetPlan>>;

    async fn list_by_tenant(&self, tenant_id: Uuid) -> Result<Vec<BudgetPlan>>;

    /// Move a draft plan to pending and stamp `first_level_id` as submitted.
    ///
    /// Returns `false` without writing anything when the plan is no longer a draft.
    async fn submit(
        &self,
        tenant_id: Uuid,
        plan_id: Uuid,
        first_level_id: Uuid,
        submitted_at: DateTime<Utc>,
    ) -> Result<bool>;
}

/// Repository trait for approval levels
#[async_trait]
pub trait LevelRepository: Send + Sync {
    async fn find_by_id(&self, tenant_id: Uuid, level_id: Uuid) -> Result<Option<ApprovalLevel>>;

    /// Levels of a plan ordered by `level_order`
    async fn list_by_plan(&self, tenant_id: Uuid, plan_id: Uuid) -> Result<Vec<ApprovalLevel>>;

    /// Active levels of pending plans assigned to `approver_id`, plus
    /// unassigned ones when `include_unassigned` is set
    async fn find_pending_for(
        &self,
        tenant_id: Uuid,
        approver_id: Uuid,
        include_unassigned: bool,
    ) -> Result<Vec<ApprovalLevel>>;

    /// Apply every write of `transition` atomically.
    ///
    /// Returns `false` and writes nothing when the decided level is no longer
    /// the undecided active level.
    async fn commit_transition(&self, tenant_id: Uuid, transition: &Transition) -> Result<bool>;
}
