//! Mapper implementations for converting between DTOs and contract models

use super::dto::*;
use crate::contract::{self, NewApprovalLevel, NewBudgetPlan};

// ===== Plan conversions =====

impl From<contract::BudgetPlan> for PlanDto {
    fn from(plan: contract::BudgetPlan) -> Self {
        Self {
            id: plan.id,
            name: plan.name,
            fiscal_year: plan.fiscal_year,
            total_amount: plan.total_amount,
            status: plan.status.as_str().to_string(),
            created_by: plan.created_by,
            created_at: plan.created_at,
            updated_at: plan.updated_at,
        }
    }
}

impl From<contract::ApprovalLevel> for LevelDto {
    fn from(level: contract::ApprovalLevel) -> Self {
        Self {
            id: level.id,
            plan_id: level.plan_id,
            level_order: level.level_order,
            level_name: level.level_name,
            status: level.status.as_str().to_string(),
            approver_id: level.approver_id,
            submitted_at: level.submitted_at,
            decided_at: level.decided_at,
            comments: level.comments,
        }
    }
}

impl From<contract::PlanWithLevels> for PlanDetailDto {
    fn from(detail: contract::PlanWithLevels) -> Self {
        Self {
            plan: detail.plan.into(),
            levels: detail.levels.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<CreatePlanRequest> for NewBudgetPlan {
    fn from(req: CreatePlanRequest) -> Self {
        Self {
            name: req.name,
            fiscal_year: req.fiscal_year,
            total_amount: req.total_amount,
            levels: req
                .levels
                .into_iter()
                .map(|l| NewApprovalLevel {
                    level_name: l.level_name,
                    approver_id: l.approver_id,
                })
                .collect(),
        }
    }
}
