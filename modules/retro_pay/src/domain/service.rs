//! Domain service - business logic orchestration

use super::calculation::{build_calculation, period_overlaps, validate_date_range, validate_new_config};
use super::events::{EventPublisher, RetroPayEvent};
use super::format::format_increase_display;
use super::grouping::group_calculations;
use super::repository::{CalculationRepository, ConfigRepository, PayHistoryRepository};
use crate::config::Config;
use crate::contract::{
    CalculationFilter, ConfigStatus, GenerationSummary, GroupedCalculations, IncreaseSpec,
    NewRetroPayConfig, RetroPayCalculation, RetroPayConfig, RetroPayError,
};
use chrono::Utc;
use hcm_core::SecurityContext;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

const CONFIG_RESOURCE: &str = "retro_pay_config";

fn internal(err: anyhow::Error) -> RetroPayError {
    tracing::error!(error = ?err, "retro pay storage failure");
    RetroPayError::Internal
}

/// Domain service for retroactive pay
pub struct Service {
    config_repo: Arc<dyn ConfigRepository>,
    history_repo: Arc<dyn PayHistoryRepository>,
    calculation_repo: Arc<dyn CalculationRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    settings: Config,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        config_repo: Arc<dyn ConfigRepository>,
        history_repo: Arc<dyn PayHistoryRepository>,
        calculation_repo: Arc<dyn CalculationRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        settings: Config,
    ) -> Self {
        Self {
            config_repo,
            history_repo,
            calculation_repo,
            event_publisher,
            settings,
        }
    }

    pub fn settings(&self) -> &Config {
        &self.settings
    }

    /// Render an increase the way review screens show it
    pub fn increase_display(&self, increase: &IncreaseSpec) -> String {
        format_increase_display(
            increase.increase_type,
            increase.increase_value,
            &self.settings.currency_symbol,
        )
    }

    // ===== Configuration Operations =====

    pub async fn create_config(
        &self,
        ctx: &SecurityContext,
        new_config: NewRetroPayConfig,
    ) -> Result<RetroPayConfig, RetroPayError> {
        validate_new_config(&new_config)?;

        let now = Utc::now();
        let config = RetroPayConfig {
            id: Uuid::new_v4(),
            tenant_id: ctx.tenant_id,
            name: new_config.name.trim().to_string(),
            pay_group_id: new_config.pay_group_id,
            effective_start_date: new_config.effective_start_date,
            effective_end_date: new_config.effective_end_date,
            increase: new_config.increase,
            status: ConfigStatus::Draft,
            created_by: ctx.user_id,
            approved_by: None,
            approved_at: None,
            created_at: now,
            updated_at: now,
        };

        let created = self.config_repo.create(&config).await.map_err(internal)?;

        tracing::info!(
            config_id = %created.id,
            tenant_id = %created.tenant_id,
            pay_group_id = %created.pay_group_id,
            "retro pay config created"
        );
        Ok(created)
    }

    pub async fn get_config(
        &self,
        ctx: &SecurityContext,
        config_id: Uuid,
    ) -> Result<RetroPayConfig, RetroPayError> {
        self.config_repo
            .find_by_id(ctx.tenant_id, config_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| RetroPayError::not_found(CONFIG_RESOURCE, config_id))
    }

    pub async fn list_configs(
        &self,
        ctx: &SecurityContext,
    ) -> Result<Vec<RetroPayConfig>, RetroPayError> {
        self.config_repo
            .list_by_tenant(ctx.tenant_id)
            .await
            .map_err(internal)
    }

    /// Approve a draft configuration that has a generated calculation set
    pub async fn approve_config(
        &self,
        ctx: &SecurityContext,
        config_id: Uuid,
    ) -> Result<RetroPayConfig, RetroPayError> {
        let config = self.get_config(ctx, config_id).await?;
        if config.status == ConfigStatus::Approved {
            return Err(RetroPayError::conflict(format!(
                "retro pay config {} is already approved",
                config_id
            )));
        }

        let generated = self
            .calculation_repo
            .count_by_config(ctx.tenant_id, config_id)
            .await
            .map_err(internal)?;
        if generated == 0 {
            return Err(RetroPayError::validation(format!(
                "retro pay config {} has no generated calculations",
                config_id
            )));
        }

        let approved = self
            .config_repo
            .mark_approved(ctx.tenant_id, config_id, ctx.user_id, Utc::now())
            .await
            .map_err(internal)?
            .ok_or_else(|| {
                RetroPayError::conflict(format!(
                    "retro pay config {} is no longer a draft",
                    config_id
                ))
            })?;

        tracing::info!(config_id = %config_id, approved_by = %ctx.user_id, "retro pay config approved");
        self.publish(RetroPayEvent::approved(&approved, ctx.user_id)).await;

        Ok(approved)
    }

    // ===== Calculation Operations =====

    /// Replace the calculation set of a configuration from pay history.
    ///
    /// Nothing is written unless every row could be computed; the new set
    /// replaces the old one in a single repository call.
    pub async fn generate(
        &self,
        ctx: &SecurityContext,
        config_id: Uuid,
    ) -> Result<GenerationSummary, RetroPayError> {
        let config = self.get_config(ctx, config_id).await?;

        if self.settings.enforce_draft_only_regeneration && config.status == ConfigStatus::Approved {
            return Err(RetroPayError::conflict(format!(
                "retro pay config {} is approved and cannot be regenerated",
                config_id
            )));
        }
        validate_date_range(config.effective_start_date, config.effective_end_date)?;

        let entries = self
            .history_repo
            .find_overlapping(
                ctx.tenant_id,
                config.pay_group_id,
                config.effective_start_date,
                config.effective_end_date,
            )
            .await
            .map_err(internal)?;

        let now = Utc::now();
        let rows: Vec<RetroPayCalculation> = entries
            .iter()
            .filter(|e| e.pay_group_id == config.pay_group_id)
            .filter(|e| {
                period_overlaps(
                    e.period_start,
                    e.period_end,
                    config.effective_start_date,
                    config.effective_end_date,
                )
            })
            .map(|e| build_calculation(&config, e, self.settings.currency_precision, now))
            .collect();

        if rows.len() > self.settings.max_rows_per_generation {
            return Err(RetroPayError::validation(format!(
                "generation would produce {} rows, limit is {}",
                rows.len(),
                self.settings.max_rows_per_generation
            )));
        }

        let written = self
            .calculation_repo
            .replace_for_config(
                ctx.tenant_id,
                config_id,
                &rows,
                self.settings.enforce_draft_only_regeneration,
                now,
            )
            .await
            .map_err(internal)?;
        if !written {
            tracing::warn!(config_id = %config_id, "retro pay config changed during generation");
            return Err(RetroPayError::conflict(format!(
                "retro pay config {} was approved during generation",
                config_id
            )));
        }

        let summary = GenerationSummary {
            config_id,
            rows_generated: rows.len(),
            total_adjustment: rows.iter().map(|r| r.adjustment_amount).sum::<Decimal>(),
        };

        tracing::info!(
            config_id = %config_id,
            rows = summary.rows_generated,
            total_adjustment = %summary.total_adjustment,
            "retro pay calculations generated"
        );
        self.publish(RetroPayEvent::generated(ctx.tenant_id, &summary, ctx.user_id))
            .await;

        Ok(summary)
    }

    pub async fn list_calculations(
        &self,
        ctx: &SecurityContext,
        config_id: Uuid,
    ) -> Result<Vec<RetroPayCalculation>, RetroPayError> {
        self.get_config(ctx, config_id).await?;

        self.calculation_repo
            .find_by_config(ctx.tenant_id, config_id)
            .await
            .map_err(internal)
    }

    pub async fn grouped_calculations(
        &self,
        ctx: &SecurityContext,
        config_id: Uuid,
        filter: CalculationFilter,
    ) -> Result<GroupedCalculations, RetroPayError> {
        let rows = self.list_calculations(ctx, config_id).await?;
        Ok(group_calculations(&rows, &filter))
    }

    // ===== Helper Methods =====

    async fn publish(&self, event: RetroPayEvent) {
        if let Err(e) = self.event_publisher.publish(event).await {
            tracing::warn!(error = %e, "failed to publish retro pay event");
        }
    }
}
