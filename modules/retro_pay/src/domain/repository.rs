//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{PayPeriodEntry, RetroPayCalculation, RetroPayConfig};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Repository for retroactive pay configurations
#[async_trait]
pub trait ConfigRepository: Send + Sync {
    /// Persist a new configuration
    async fn create(&self, config: &RetroPayConfig) -> Result<RetroPayConfig>;

    /// Find a configuration by id within a tenant
    async fn find_by_id(&self, tenant_id: Uuid, config_id: Uuid) -> Result<Option<RetroPayConfig>>;

    /// List configurations of a tenant, newest first
    async fn list_by_tenant(&self, tenant_id: Uuid) -> Result<Vec<RetroPayConfig>>;

    /// Flip a draft configuration that has calculations to approved.
    ///
    /// Returns `None` when no such draft exists, which includes the case
    /// where another caller approved it first or its set was emptied.
    async fn mark_approved(
        &self,
        tenant_id: Uuid,
        config_id: Uuid,
        approved_by: Uuid,
        approved_at: DateTime<Utc>,
    ) -> Result<Option<RetroPayConfig>>;
}

/// Read access to historical payroll
#[async_trait]
pub trait PayHistoryRepository: Send + Sync {
    /// Entries of a pay group whose pay period overlaps `[start, end]`
    async fn find_overlapping(
        &self,
        tenant_id: Uuid,
        pay_group_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PayPeriodEntry>>;
}

/// Repository for generated calculations
#[async_trait]
pub trait CalculationRepository: Send + Sync {
    /// Atomically replace the whole calculation set of a configuration.
    ///
    /// With `draft_only` the set is written only while the configuration is
    /// still a draft. `Ok(false)` means it was approved (or removed) before
    /// the write and nothing changed.
    async fn replace_for_config(
        &self,
        tenant_id: Uuid,
        config_id: Uuid,
        rows: &[RetroPayCalculation],
        draft_only: bool,
        generated_at: DateTime<Utc>,
    ) -> Result<bool>;

    /// All calculations of a configuration
    async fn find_by_config(
        &self,
        tenant_id: Uuid,
        config_id: Uuid,
    ) -> Result<Vec<RetroPayCalculation>>;

    /// Number of calculations of a configuration
    async fn count_by_config(&self, tenant_id: Uuid, config_id: Uuid) -> Result<u64>;
}
