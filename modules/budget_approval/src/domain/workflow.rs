//! Approval chain state machine
//!
//! Pure functions over a plan's ordered levels. Nothing here touches storage:
//! the service loads the chain, asks for a [`Transition`] and hands it to the
//! repository to commit.

use crate::contract::{
    ApprovalLevel, BudgetApprovalError, BudgetPlan, Decision, LevelDecision, NewBudgetPlan,
    NextLevel, PlanStatus, Transition,
};
use chrono::{DateTime, Utc};
use hcm_core::SecurityContext;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Trimmed comment, `None` when blank
pub fn normalize_comments(comments: Option<String>) -> Option<String> {
    comments
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

pub fn validate_new_plan(new_plan: &NewBudgetPlan, max_levels: usize) -> Result<(), BudgetApprovalError> {
    if new_plan.name.trim().is_empty() {
        return Err(BudgetApprovalError::validation("name cannot be empty"));
    }
    if new_plan.total_amount < Decimal::ZERO {
        return Err(BudgetApprovalError::validation("total_amount must not be negative"));
    }
    if new_plan.levels.is_empty() {
        return Err(BudgetApprovalError::validation(
            "a plan needs at least one approval level",
        ));
    }
    if new_plan.levels.len() > max_levels {
        return Err(BudgetApprovalError::validation(format!(
            "a plan may have at most {} approval levels, got {}",
            max_levels,
            new_plan.levels.len()
        )));
    }
    if let Some(pos) = new_plan.levels.iter().position(|l| l.level_name.trim().is_empty()) {
        return Err(BudgetApprovalError::validation(format!(
            "approval level {} has no name",
            pos + 1
        )));
    }
    Ok(())
}

/// Whether `ctx` may decide `level` of `plan` with `decision`.
///
/// Approve and reject belong to the assigned approver, or to anyone in the
/// tenant when the level is unassigned and that is allowed. Skip belongs to the
/// plan's creator.
pub fn authorize(
    ctx: &SecurityContext,
    plan: &BudgetPlan,
    level: &ApprovalLevel,
    decision: Decision,
    allow_unassigned: bool,
) -> Result<(), BudgetApprovalError> {
    match decision {
        Decision::Skip => {
            if ctx.user_id != plan.created_by {
                return Err(BudgetApprovalError::forbidden(
                    "only the plan creator may skip an approval level",
                ));
            }
        }
        Decision::Approve | Decision::Reject => match level.approver_id {
            Some(approver) if approver == ctx.user_id => {}
            None if allow_unassigned => {}
            Some(_) => {
                return Err(BudgetApprovalError::forbidden(format!(
                    "level '{}' is assigned to another approver",
                    level.level_name
                )))
            }
            None => {
                return Err(BudgetApprovalError::forbidden(format!(
                    "level '{}' has no assigned approver",
                    level.level_name
                )))
            }
        },
    }
    Ok(())
}

/// Compute every write `decision` on `level_id` causes.
///
/// `levels` is the plan's whole chain. Approve and skip reveal the next level
/// by `level_order`, or finish the plan as approved when there is none. Reject
/// finishes the plan as rejected and leaves later levels untouched.
pub fn plan_transition(
    levels: &[ApprovalLevel],
    level_id: Uuid,
    decision: Decision,
    comments: Option<String>,
    now: DateTime<Utc>,
) -> Result<Transition, BudgetApprovalError> {
    let level = levels
        .iter()
        .find(|l| l.id == level_id)
        .ok_or_else(|| BudgetApprovalError::not_found("approval_level", level_id))?;

    if !level.is_active() {
        return Err(BudgetApprovalError::conflict(format!(
            "level '{}' is not awaiting a decision (status {})",
            level.level_name,
            level.status.as_str()
        )));
    }

    let level_update = LevelDecision {
        level_id: level.id,
        status: decision.level_status(),
        decided_at: now,
        comments,
    };

    let (next_level, plan_status) = match decision {
        Decision::Reject => (None, Some(PlanStatus::Rejected)),
        Decision::Approve | Decision::Skip => {
            match levels.iter().find(|l| l.level_order == level.level_order + 1) {
                Some(next) => (
                    Some(NextLevel {
                        level_id: next.id,
                        level_order: next.level_order,
                        submitted_at: now,
                    }),
                    None,
                ),
                None => (None, Some(PlanStatus::Approved)),
            }
        }
    };

    Ok(Transition {
        plan_id: level.plan_id,
        level_update,
        next_level,
        plan_status,
    })
}

/// Apply `transition` to an in-memory chain, as storage would
pub fn apply_transition(levels: &mut [ApprovalLevel], transition: &Transition) {
    for level in levels.iter_mut() {
        if level.id == transition.level_update.level_id {
            level.status = transition.level_update.status;
            level.decided_at = Some(transition.level_update.decided_at);
            level.comments = transition.level_update.comments.clone();
        }
        if let Some(next) = &transition.next_level {
            if level.id == next.level_id {
                level.submitted_at = Some(next.submitted_at);
            }
        }
    }
}

/// Number of leading levels that have been submitted, or `None` when the
/// submitted levels do not form a prefix of the chain
pub fn submitted_prefix(levels: &[ApprovalLevel]) -> Option<usize> {
    let mut ordered: Vec<&ApprovalLevel> = levels.iter().collect();
    ordered.sort_by_key(|l| l.level_order);

    let k = ordered.iter().take_while(|l| l.submitted_at.is_some()).count();
    if ordered[k..].iter().any(|l| l.submitted_at.is_some()) {
        return None;
    }
    Some(k)
}
