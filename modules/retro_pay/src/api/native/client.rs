//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{
    CalculationFilter, GenerationSummary, GroupedCalculations, NewRetroPayConfig, RetroPayApi,
    RetroPayCalculation, RetroPayConfig, RetroPayError,
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
impl RetroPayApi for NativeClient {
    async fn create_config(
        &self,
        ctx: &SecurityContext,
        new_config: NewRetroPayConfig,
    ) -> Result<RetroPayConfig, RetroPayError> {
        self.service.create_config(ctx, new_config).await
    }

    async fn get_config(
        &self,
        ctx: &SecurityContext,
        config_id: Uuid,
    ) -> Result<RetroPayConfig, RetroPayError> {
        self.service.get_config(ctx, config_id).await
    }

    async fn list_configs(
        &self,
        ctx: &SecurityContext,
    ) -> Result<Vec<RetroPayConfig>, RetroPayError> {
        self.service.list_configs(ctx).await
    }

    async fn approve_config(
        &self,
        ctx: &SecurityContext,
        config_id: Uuid,
    ) -> Result<RetroPayConfig, RetroPayError> {
        self.service.approve_config(ctx, config_id).await
    }

    async fn generate(
        &self,
        ctx: &SecurityContext,
        config_id: Uuid,
    ) -> Result<GenerationSummary, RetroPayError> {
        self.service.generate(ctx, config_id).await
    }

    async fn list_calculations(
        &self,
        ctx: &SecurityContext,
        config_id: Uuid,
    ) -> Result<Vec<RetroPayCalculation>, RetroPayError> {
        self.service.list_calculations(ctx, config_id).await
    }

    async fn grouped_calculations(
        &self,
        ctx: &SecurityContext,
        config_id: Uuid,
        filter: CalculationFilter,
    ) -> Result<GroupedCalculations, RetroPayError> {
        self.service.grouped_calculations(ctx, config_id, filter).await
    }
}
