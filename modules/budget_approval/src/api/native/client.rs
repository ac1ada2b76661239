//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{
    ApprovalLevel, BudgetApprovalApi, BudgetApprovalError, BudgetPlan, NewBudgetPlan,
    PlanWithLevels,
};
use crate::domain::Service;
use async_trait::async_trait;
use hcm_core::SecurityContext;
use std::sync::Arc;
use uuid::Uuid;

/// Native client implementation that directly calls the domain service
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl BudgetApprovalApi for NativeClient {
    async fn create_plan(
        &self,
        ctx: &SecurityContext,
        new_plan: NewBudgetPlan,
    ) -> Result<PlanWithLevels, BudgetApprovalError> {
        self.service.create_plan(ctx, new_plan).await
    }

    async fn get_plan(
        &self,
        ctx: &SecurityContext,
        plan_id: Uuid,
    ) -> Result<BudgetPlan, BudgetApprovalError> {
        self.service.get_plan(ctx, plan_id).await
    }

    async fn list_plans(
        &self,
        ctx: &SecurityContext,
    ) -> Result<Vec<BudgetPlan>, BudgetApprovalError> {
        self.service.list_plans(ctx).await
    }

    async fn list_levels(
        &self,
        ctx: &SecurityContext,
        plan_id: Uuid,
    ) -> Result<Vec<ApprovalLevel>, BudgetApprovalError> {
        self.service.list_levels(ctx, plan_id).await
    }

    async fn submit_plan(
        &self,
        ctx: &SecurityContext,
        plan_id: Uuid,
    ) -> Result<PlanWithLevels, BudgetApprovalError> {
        self.service.submit_plan(ctx, plan_id).await
    }

    async fn approve_level(
        &self,
        ctx: &SecurityContext,
        level_id: Uuid,
        comments: Option<String>,
    ) -> Result<PlanWithLevels, BudgetApprovalError> {
        self.service.approve_level(ctx, level_id, comments).await
    }

    async fn reject_level(
        &self,
        ctx: &SecurityContext,
        level_id: Uuid,
        comments: Option<String>,
    ) -> Result<PlanWithLevels, BudgetApprovalError> {
        self.service.reject_level(ctx, level_id, comments).await
    }

    async fn skip_level(
        &self,
        ctx: &SecurityContext,
        level_id: Uuid,
        comments: Option<String>,
    ) -> Result<PlanWithLevels, BudgetApprovalError> {
        self.service.skip_level(ctx, level_id, comments).await
    }

    async fn pending_approvals(
        &self,
        ctx: &SecurityContext,
    ) -> Result<Vec<ApprovalLevel>, BudgetApprovalError> {
        self.service.pending_approvals(ctx).await
    }
}
