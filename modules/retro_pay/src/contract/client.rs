//! Native client trait for inter-module communication
//!
//! Other modules (payroll runs, reporting) call the engine through this trait.
//! NO HTTP - direct function calls.

use super::{
    error::RetroPayError,
    model::{
        CalculationFilter, GenerationSummary, GroupedCalculations, NewRetroPayConfig,
        RetroPayCalculation, RetroPayConfig,
    },
};
use async_trait::async_trait;
use hcm_core::SecurityContext;
use uuid::Uuid;

/// Retroactive pay API for inter-module communication
#[async_trait]
pub trait RetroPayApi: Send + Sync {
    // ===== Configuration Operations =====

    /// Create a draft configuration
    async fn create_config(
        &self,
        ctx: &SecurityContext,
        new_config: NewRetroPayConfig,
    ) -> Result<RetroPayConfig, RetroPayError>;

    /// Get a configuration by id
    async fn get_config(
        &self,
        ctx: &SecurityContext,
        config_id: Uuid,
    ) -> Result<RetroPayConfig, RetroPayError>;

    /// List configurations of the caller's tenant
    async fn list_configs(&self, ctx: &SecurityContext)
        -> Result<Vec<RetroPayConfig>, RetroPayError>;

    /// Approve a draft configuration
    async fn approve_config(
        &self,
        ctx: &SecurityContext,
        config_id: Uuid,
    ) -> Result<RetroPayConfig, RetroPayError>;

    // ===== Calculation Operations =====

    /// (Re)generate the calculation set of a configuration
    async fn generate(
        &self,
        ctx: &SecurityContext,
        config_id: Uuid,
    ) -> Result<GenerationSummary, RetroPayError>;

    /// Flat calculation set of a configuration
    async fn list_calculations(
        &self,
        ctx: &SecurityContext,
        config_id: Uuid,
    ) -> Result<Vec<RetroPayCalculation>, RetroPayError>;

    /// Calculation set grouped by employee and pay cycle
    async fn grouped_calculations(
        &self,
        ctx: &SecurityContext,
        config_id: Uuid,
        filter: CalculationFilter,
    ) -> Result<GroupedCalculations, RetroPayError>;
}
