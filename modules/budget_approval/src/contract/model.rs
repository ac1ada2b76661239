//! Contract models for budget approval
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models.

use super::error::BudgetApprovalError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

/// Lifecycle of a budget plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanStatus {
    /// Being edited, not yet in the approval chain
    Draft,
    /// Submitted; some level is under review
    Pending,
    Approved,
    Rejected,
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl FromStr for PlanStatus {
    type Err = BudgetApprovalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(BudgetApprovalError::validation(format!(
                "unknown plan status '{}'",
                other
            ))),
        }
    }
}

/// Status of one approval level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelStatus {
    Pending,
    Approved,
    Rejected,
    /// Waived by the plan creator; the chain moves on as if approved
    Skipped,
}

impl LevelStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Skipped => "skipped",
        }
    }
}

impl FromStr for LevelStatus {
    type Err = BudgetApprovalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "skipped" => Ok(Self::Skipped),
            other => Err(BudgetApprovalError::validation(format!(
                "unknown level status '{}'",
                other
            ))),
        }
    }
}

/// Budget plan moving through a multi-level approval chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetPlan {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub fiscal_year: i32,
    pub total_amount: Decimal,
    pub status: PlanStatus,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One ordered stage of a plan's approval chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalLevel {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub plan_id: Uuid,
    /// 1-based position in the chain
    pub level_order: i32,
    pub level_name: String,
    pub status: LevelStatus,
    /// `None` means any user of the tenant may decide (when allowed)
    pub approver_id: Option<Uuid>,
    /// Set when the level becomes the one under review
    pub submitted_at: Option<DateTime<Utc>>,
    pub decided_at: Option<DateTime<Utc>>,
    pub comments: Option<String>,
}

impl ApprovalLevel {
    /// The level currently under review: pending, submitted, undecided
    pub fn is_active(&self) -> bool {
        self.status == LevelStatus::Pending
            && self.submitted_at.is_some()
            && self.decided_at.is_none()
    }
}

/// Plan together with its ordered chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanWithLevels {
    pub plan: BudgetPlan,
    pub levels: Vec<ApprovalLevel>,
}

/// Input for one level of a new plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApprovalLevel {
    pub level_name: String,
    pub approver_id: Option<Uuid>,
}

/// Input for creating a plan; levels are numbered in the given order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBudgetPlan {
    pub name: String,
    pub fiscal_year: i32,
    pub total_amount: Decimal,
    pub levels: Vec<NewApprovalLevel>,
}

/// What an approver does with the active level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    Approve,
    Reject,
    Skip,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Skip => "skip",
        }
    }

    /// Level status a decision leaves behind
    pub fn level_status(&self) -> LevelStatus {
        match self {
            Self::Approve => LevelStatus::Approved,
            Self::Reject => LevelStatus::Rejected,
            Self::Skip => LevelStatus::Skipped,
        }
    }
}

/// Write applied to the decided level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelDecision {
    pub level_id: Uuid,
    pub status: LevelStatus,
    pub decided_at: DateTime<Utc>,
    pub comments: Option<String>,
}

/// Level that becomes active as a result of a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextLevel {
    pub level_id: Uuid,
    pub level_order: i32,
    pub submitted_at: DateTime<Utc>,
}

/// Every write a single decision causes, committed together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub plan_id: Uuid,
    pub level_update: LevelDecision,
    pub next_level: Option<NextLevel>,
    pub plan_status: Option<PlanStatus>,
}
