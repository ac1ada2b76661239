//! Domain service - business logic orchestration

use super::events::{BudgetApprovalEvent, EventPublisher};
use super::repository::{LevelRepository, PlanRepository};
use super::workflow::{authorize, normalize_comments, plan_transition, validate_new_plan};
use crate::config::Config;
use crate::contract::{
    ApprovalLevel, BudgetApprovalError, BudgetPlan, Decision, LevelStatus, NewBudgetPlan,
    PlanStatus, PlanWithLevels,
};
use chrono::Utc;
use hcm_core::SecurityContext;
use std::sync::Arc;
use uuid::Uuid;

const PLAN_RESOURCE: &str = "budget_plan";
const LEVEL_RESOURCE: &str = "approval_level";

fn internal(err: anyhow::Error) -> BudgetApprovalError {
    tracing::error!(error = ?err, "budget approval storage failure");
    BudgetApprovalError::Internal
}

/// Domain service for budget approval
pub struct Service {
    plan_repo: Arc<dyn PlanRepository>,
    level_repo: Arc<dyn LevelRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    settings: Config,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        plan_repo: Arc<dyn PlanRepository>,
        level_repo: Arc<dyn LevelRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        settings: Config,
    ) -> Self {
        Self {
            plan_repo,
            level_repo,
            event_publisher,
            settings,
        }
    }

    pub fn settings(&self) -> &Config {
        &self.settings
    }

    // ===== Plan Operations =====

    pub async fn create_plan(
        &self,
        ctx: &SecurityContext,
        new_plan: NewBudgetPlan,
    ) -> Result<PlanWithLevels, BudgetApprovalError> {
        validate_new_plan(&new_plan, self.settings.max_levels)?;

        let now = Utc::now();
        let plan = BudgetPlan {
            id: Uuid::new_v4(),
            tenant_id: ctx.tenant_id,
            name: new_plan.name.trim().to_string(),
            fiscal_year: new_plan.fiscal_year,
            total_amount: new_plan.total_amount,
            status: PlanStatus::Draft,
            created_by: ctx.user_id,
            created_at: now,
            updated_at: now,
        };

        let levels: Vec<ApprovalLevel> = new_plan
            .levels
            .into_iter()
            .zip(1..)
            .map(|(level, order)| ApprovalLevel {
                id: Uuid::new_v4(),
                tenant_id: ctx.tenant_id,
                plan_id: plan.id,
                level_order: order,
                level_name: level.level_name.trim().to_string(),
                status: LevelStatus::Pending,
                approver_id: level.approver_id,
                submitted_at: None,
                decided_at: None,
                comments: None,
            })
            .collect();

        self.plan_repo
            .create_with_levels(&plan, &levels)
            .await
            .map_err(internal)?;

        tracing::info!(
            plan_id = %plan.id,
            tenant_id = %plan.tenant_id,
            levels = levels.len(),
            "budget plan created"
        );
        Ok(PlanWithLevels { plan, levels })
    }

    pub async fn get_plan(
        &self,
        ctx: &SecurityContext,
        plan_id: Uuid,
    ) -> Result<BudgetPlan, BudgetApprovalError> {
        self.plan_repo
            .find_by_id(ctx.tenant_id, plan_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| BudgetApprovalError::not_found(PLAN_RESOURCE, plan_id))
    }

    pub async fn list_plans(
        &self,
        ctx: &SecurityContext,
    ) -> Result<Vec<BudgetPlan>, BudgetApprovalError> {
        self.plan_repo
            .list_by_tenant(ctx.tenant_id)
            .await
            .map_err(internal)
    }

    pub async fn list_levels(
        &self,
        ctx: &SecurityContext,
        plan_id: Uuid,
    ) -> Result<Vec<ApprovalLevel>, BudgetApprovalError> {
        self.get_plan(ctx, plan_id).await?;
        self.level_repo
            .list_by_plan(ctx.tenant_id, plan_id)
            .await
            .map_err(internal)
    }

    /// Draft -> pending; the first level becomes the one under review
    pub async fn submit_plan(
        &self,
        ctx: &SecurityContext,
        plan_id: Uuid,
    ) -> Result<PlanWithLevels, BudgetApprovalError> {
        let plan = self.get_plan(ctx, plan_id).await?;
        if plan.status != PlanStatus::Draft {
            return Err(BudgetApprovalError::conflict(format!(
                "budget plan {} is {} and cannot be submitted",
                plan_id,
                plan.status.as_str()
            )));
        }

        let levels = self
            .level_repo
            .list_by_plan(ctx.tenant_id, plan_id)
            .await
            .map_err(internal)?;
        let first = levels.iter().min_by_key(|l| l.level_order).ok_or_else(|| {
            BudgetApprovalError::validation(format!("budget plan {} has no approval levels", plan_id))
        })?;

        let now = Utc::now();
        let submitted = self
            .plan_repo
            .submit(ctx.tenant_id, plan_id, first.id, now)
            .await
            .map_err(internal)?;
        if !submitted {
            return Err(BudgetApprovalError::conflict(format!(
                "budget plan {} is no longer a draft",
                plan_id
            )));
        }

        tracing::info!(plan_id = %plan_id, submitted_by = %ctx.user_id, "budget plan submitted");
        self.publish(BudgetApprovalEvent::submitted(&plan, ctx.user_id, now))
            .await;
        self.publish(BudgetApprovalEvent::first_activated(first, now))
            .await;

        self.load(ctx, plan_id).await
    }

    // ===== Decision Operations =====

    pub async fn approve_level(
        &self,
        ctx: &SecurityContext,
        level_id: Uuid,
        comments: Option<String>,
    ) -> Result<PlanWithLevels, BudgetApprovalError> {
        self.decide(ctx, level_id, Decision::Approve, comments).await
    }

    /// Rejecting needs a reason when `require_rejection_comment` is set
    pub async fn reject_level(
        &self,
        ctx: &SecurityContext,
        level_id: Uuid,
        comments: Option<String>,
    ) -> Result<PlanWithLevels, BudgetApprovalError> {
        self.decide(ctx, level_id, Decision::Reject, comments).await
    }

    /// Waive the active level; the chain advances as on approval
    pub async fn skip_level(
        &self,
        ctx: &SecurityContext,
        level_id: Uuid,
        comments: Option<String>,
    ) -> Result<PlanWithLevels, BudgetApprovalError> {
        self.decide(ctx, level_id, Decision::Skip, comments).await
    }

    pub async fn pending_approvals(
        &self,
        ctx: &SecurityContext,
    ) -> Result<Vec<ApprovalLevel>, BudgetApprovalError> {
        self.level_repo
            .find_pending_for(
                ctx.tenant_id,
                ctx.user_id,
                self.settings.allow_unassigned_approver,
            )
            .await
            .map_err(internal)
    }

    // ===== Helper Methods =====

    async fn decide(
        &self,
        ctx: &SecurityContext,
        level_id: Uuid,
        decision: Decision,
        comments: Option<String>,
    ) -> Result<PlanWithLevels, BudgetApprovalError> {
        let comments = normalize_comments(comments);
        if decision == Decision::Reject
            && self.settings.require_rejection_comment
            && comments.is_none()
        {
            return Err(BudgetApprovalError::validation(
                "a comment is required when rejecting",
            ));
        }

        let level = self
            .level_repo
            .find_by_id(ctx.tenant_id, level_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| BudgetApprovalError::not_found(LEVEL_RESOURCE, level_id))?;

        let plan = self.get_plan(ctx, level.plan_id).await?;
        if plan.status != PlanStatus::Pending {
            return Err(BudgetApprovalError::conflict(format!(
                "budget plan {} is {}",
                plan.id,
                plan.status.as_str()
            )));
        }
        if !level.is_active() {
            return Err(BudgetApprovalError::conflict(format!(
                "level '{}' is not awaiting a decision",
                level.level_name
            )));
        }
        authorize(
            ctx,
            &plan,
            &level,
            decision,
            self.settings.allow_unassigned_approver,
        )?;

        let levels = self
            .level_repo
            .list_by_plan(ctx.tenant_id, plan.id)
            .await
            .map_err(internal)?;
        let transition = plan_transition(&levels, level_id, decision, comments, Utc::now())?;

        let committed = self
            .level_repo
            .commit_transition(ctx.tenant_id, &transition)
            .await
            .map_err(internal)?;
        if !committed {
            tracing::warn!(level_id = %level_id, decision = decision.as_str(), "level decided concurrently");
            return Err(BudgetApprovalError::conflict(format!(
                "level '{}' was decided by someone else",
                level.level_name
            )));
        }

        tracing::info!(
            plan_id = %plan.id,
            level_id = %level_id,
            level_order = level.level_order,
            decision = decision.as_str(),
            decided_by = %ctx.user_id,
            "approval level decided"
        );

        self.publish(BudgetApprovalEvent::decided(
            ctx.tenant_id,
            plan.id,
            &transition.level_update,
            ctx.user_id,
        ))
        .await;
        if let Some(next) = &transition.next_level {
            self.publish(BudgetApprovalEvent::activated(ctx.tenant_id, plan.id, next))
                .await;
        }
        if let Some(status) = transition.plan_status {
            tracing::info!(plan_id = %plan.id, status = status.as_str(), "budget plan finalized");
            self.publish(BudgetApprovalEvent::finalized(
                ctx.tenant_id,
                plan.id,
                status,
                transition.level_update.decided_at,
            ))
            .await;
        }

        self.load(ctx, plan.id).await
    }

    async fn load(
        &self,
        ctx: &SecurityContext,
        plan_id: Uuid,
    ) -> Result<PlanWithLevels, BudgetApprovalError> {
        let plan = self.get_plan(ctx, plan_id).await?;
        let levels = self
            .level_repo
            .list_by_plan(ctx.tenant_id, plan_id)
            .await
            .map_err(internal)?;
        Ok(PlanWithLevels { plan, levels })
    }

    async fn publish(&self, event: BudgetApprovalEvent) {
        if let Err(e) = self.event_publisher.publish(event).await {
            tracing::warn!(error = %e, "failed to publish budget approval event");
        }
    }
}
