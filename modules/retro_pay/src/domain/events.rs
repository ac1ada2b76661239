//! Domain events for the retroactive pay engine
//!
//! Events are emitted after a state change has been persisted. Publishing is
//! best effort: a failed publish is logged and never undoes the change.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contract::{GenerationSummary, RetroPayConfig};

/// Domain event types for retroactive pay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum RetroPayEvent {
    /// A configuration's calculation set was (re)generated
    CalculationsGenerated(CalculationsGeneratedEvent),
    /// A configuration was approved
    ConfigApproved(ConfigApprovedEvent),
}

/// Event data for a generate run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationsGeneratedEvent {
    pub tenant_id: Uuid,
    pub config_id: Uuid,
    pub rows_generated: usize,
    pub total_adjustment: Decimal,
    pub generated_by: Uuid,
    pub timestamp: DateTime<Utc>,
}

/// Event data for an approval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigApprovedEvent {
    pub tenant_id: Uuid,
    pub config_id: Uuid,
    pub approved_by: Uuid,
    pub timestamp: DateTime<Utc>,
}

impl RetroPayEvent {
    pub fn generated(tenant_id: Uuid, summary: &GenerationSummary, generated_by: Uuid) -> Self {
        Self::CalculationsGenerated(CalculationsGeneratedEvent {
            tenant_id,
            config_id: summary.config_id,
            rows_generated: summary.rows_generated,
            total_adjustment: summary.total_adjustment,
            generated_by,
            timestamp: Utc::now(),
        })
    }

    pub fn approved(config: &RetroPayConfig, approved_by: Uuid) -> Self {
        Self::ConfigApproved(ConfigApprovedEvent {
            tenant_id: config.tenant_id,
            config_id: config.id,
            approved_by,
            timestamp: config.approved_at.unwrap_or_else(Utc::now),
        })
    }

    pub fn config_id(&self) -> Uuid {
        match self {
            Self::CalculationsGenerated(e) => e.config_id,
            Self::ConfigApproved(e) => e.config_id,
        }
    }
}

/// Event publisher trait for publishing domain events
#[async_trait::async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: RetroPayEvent) -> anyhow::Result<()>;
}

/// No-op event publisher for testing or when events are disabled
pub struct NoOpEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: RetroPayEvent) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Writes every event to the log as JSON
pub struct TracingEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, event: RetroPayEvent) -> anyhow::Result<()> {
        let payload = serde_json::to_string(&event)?;
        tracing::info!(target: "retro_pay::events", config_id = %event.config_id(), %payload, "retro pay event");
        Ok(())
    }
}
