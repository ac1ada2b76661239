//! Entity to model mappers

use super::entity::{level, plan};
use crate::contract::{ApprovalLevel, BudgetPlan, LevelStatus, PlanStatus};
use sea_orm::ActiveValue::Set;

// ===== Plan Conversions =====

impl TryFrom<plan::Model> for BudgetPlan {
    type Error = anyhow::Error;

    fn try_from(entity: plan::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            tenant_id: entity.tenant_id,
            name: entity.name,
            fiscal_year: entity.fiscal_year,
            total_amount: entity.total_amount,
            status: entity.status.parse::<PlanStatus>()?,
            created_by: entity.created_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

impl From<&BudgetPlan> for plan::ActiveModel {
    fn from(model: &BudgetPlan) -> Self {
        Self {
            id: Set(model.id),
            tenant_id: Set(model.tenant_id),
            name: Set(model.name.clone()),
            fiscal_year: Set(model.fiscal_year),
            total_amount: Set(model.total_amount),
            status: Set(model.status.as_str().to_string()),
            created_by: Set(model.created_by),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

// ===== Level Conversions =====

impl TryFrom<level::Model> for ApprovalLevel {
    type Error = anyhow::Error;

    fn try_from(entity: level::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            tenant_id: entity.tenant_id,
            plan_id: entity.plan_id,
            level_order: entity.level_order,
            level_name: entity.level_name,
            status: entity.status.parse::<LevelStatus>()?,
            approver_id: entity.approver_id,
            submitted_at: entity.submitted_at,
            decided_at: entity.decided_at,
            comments: entity.comments,
        })
    }
}

impl From<&ApprovalLevel> for level::ActiveModel {
    fn from(model: &ApprovalLevel) -> Self {
        Self {
            id: Set(model.id),
            tenant_id: Set(model.tenant_id),
            plan_id: Set(model.plan_id),
            level_order: Set(model.level_order),
            level_name: Set(model.level_name.clone()),
            status: Set(model.status.as_str().to_string()),
            approver_id: Set(model.approver_id),
            submitted_at: Set(model.submitted_at),
            decided_at: Set(model.decided_at),
            comments: Set(model.comments.clone()),
        }
    }
}
