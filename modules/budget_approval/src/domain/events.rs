//! Domain events for budget approval
//!
//! Emitted after a transition has been committed. Publishing is best effort.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contract::{ApprovalLevel, BudgetPlan, LevelDecision, NextLevel, PlanStatus};

/// Domain event types for budget approval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum BudgetApprovalEvent {
    /// A draft plan entered the approval chain
    PlanSubmitted(PlanSubmittedEvent),
    /// A level was approved, rejected or skipped
    LevelDecided(LevelDecidedEvent),
    /// A level became the one under review
    LevelActivated(LevelActivatedEvent),
    /// A plan reached approved or rejected
    PlanFinalized(PlanFinalizedEvent),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSubmittedEvent {
    pub tenant_id: Uuid,
    pub plan_id: Uuid,
    pub submitted_by: Uuid,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDecidedEvent {
    pub tenant_id: Uuid,
    pub plan_id: Uuid,
    pub level_id: Uuid,
    /// "approved" | "rejected" | "skipped"
    pub status: String,
    pub decided_by: Uuid,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelActivatedEvent {
    pub tenant_id: Uuid,
    pub plan_id: Uuid,
    pub level_id: Uuid,
    pub level_order: i32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanFinalizedEvent {
    pub tenant_id: Uuid,
    pub plan_id: Uuid,
    /// "approved" | "rejected"
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl BudgetApprovalEvent {
    pub fn submitted(plan: &BudgetPlan, submitted_by: Uuid, at: DateTime<Utc>) -> Self {
        Self::PlanSubmitted(PlanSubmittedEvent {
            tenant_id: plan.tenant_id,
            plan_id: plan.id,
            submitted_by,
            timestamp: at,
        })
    }

    pub fn decided(tenant_id: Uuid, plan_id: Uuid, decision: &LevelDecision, decided_by: Uuid) -> Self {
        Self::LevelDecided(LevelDecidedEvent {
            tenant_id,
            plan_id,
            level_id: decision.level_id,
            status: decision.status.as_str().to_string(),
            decided_by,
            timestamp: decision.decided_at,
        })
    }

    pub fn activated(tenant_id: Uuid, plan_id: Uuid, next: &NextLevel) -> Self {
        Self::LevelActivated(LevelActivatedEvent {
            tenant_id,
            plan_id,
            level_id: next.level_id,
            level_order: next.level_order,
            timestamp: next.submitted_at,
        })
    }

    pub fn first_activated(level: &ApprovalLevel, at: DateTime<Utc>) -> Self {
        Self::LevelActivated(LevelActivatedEvent {
            tenant_id: level.tenant_id,
            plan_id: level.plan_id,
            level_id: level.id,
            level_order: level.level_order,
            timestamp: at,
        })
    }

    pub fn finalized(tenant_id: Uuid, plan_id: Uuid, status: PlanStatus, at: DateTime<Utc>) -> Self {
        Self::PlanFinalized(PlanFinalizedEvent {
            tenant_id,
            plan_id,
            status: status.as_str().to_string(),
            timestamp: at,
        })
    }

    pub fn plan_id(&self) -> Uuid {
        match self {
            Self::PlanSubmitted(e) => e.plan_id,
            Self::LevelDecided(e) => e.plan_id,
            Self::LevelActivated(e) => e.plan_id,
            Self::PlanFinalized(e) => e.plan_id,
        }
    }
}

/// Event publisher trait for publishing domain events
#[async_trait::async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: BudgetApprovalEvent) -> anyhow::Result<()>;
}

/// No-op event publisher for testing or when events are disabled
pub struct NoOpEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: BudgetApprovalEvent) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Writes every event to the log as JSON
pub struct TracingEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, event: BudgetApprovalEvent) -> anyhow::Result<()> {
        let payload = serde_json::to_string(&event)?;
        tracing::info!(target: "budget_approval::events", plan_id = %event.plan_id(), %payload, "budget approval event");
        Ok(())
    }
}
