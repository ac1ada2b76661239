//! HTTP request handlers - thin layer that delegates to domain service

use super::{dto::*, error::map_domain_error};
use crate::contract::{CalculationFilter, NewRetroPayConfig};
use crate::domain::Service;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use hcm_core::{Problem, SecurityContext};
use std::sync::Arc;
use uuid::Uuid;

fn config_dto(service: &Service, config: crate::contract::RetroPayConfig) -> ConfigDto {
    let display = service.increase_display(&config.increase);
    ConfigDto::from_model(config, display)
}

// ===== Config Handlers =====

/// List configurations of the caller's tenant
pub async fn list_configs(
    service: Arc<Service>,
    ctx: SecurityContext,
) -> Result<Json<ConfigsListResponse>, Problem> {
    let configs = service.list_configs(&ctx).await.map_err(map_domain_error)?;

    let items: Vec<ConfigDto> = configs
        .into_iter()
        .map(|c| config_dto(&service, c))
        .collect();
    let total = items.len();

    Ok(Json(ConfigsListResponse { items, total }))
}

/// Create a draft configuration
pub async fn create_config(
    service: Arc<Service>,
    ctx: SecurityContext,
    Json(req): Json<CreateConfigRequest>,
) -> Result<(StatusCode, Json<ConfigDto>), Problem> {
    let new_config = NewRetroPayConfig::try_from(req).map_err(map_domain_error)?;

    let config = service
        .create_config(&ctx, new_config)
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(config_dto(&service, config))))
}

/// Get a specific configuration
pub async fn get_config(
    service: Arc<Service>,
    ctx: SecurityContext,
    Path(config_id): Path<Uuid>,
) -> Result<Json<ConfigDto>, Problem> {
    let config = service
        .get_config(&ctx, config_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(config_dto(&service, config)))
}

/// Approve a draft configuration
pub async fn approve_config(
    service: Arc<Service>,
    ctx: SecurityContext,
    Path(config_id): Path<Uuid>,
) -> Result<Json<ConfigDto>, Problem> {
    let config = service
        .approve_config(&ctx, config_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(config_dto(&service, config)))
}

// ===== Calculation Handlers =====

/// Regenerate the calculation set of a configuration
pub async fn generate(
    service: Arc<Service>,
    ctx: SecurityContext,
    Path(config_id): Path<Uuid>,
) -> Result<Json<GenerationSummaryDto>, Problem> {
    let summary = service
        .generate(&ctx, config_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(summary.into()))
}

/// Flat calculation set
pub async fn list_calculations(
    service: Arc<Service>,
    ctx: SecurityContext,
    Path(config_id): Path<Uuid>,
) -> Result<Json<CalculationsListResponse>, Problem> {
    let rows = service
        .list_calculations(&ctx, config_id)
        .await
        .map_err(map_domain_error)?;

    let items: Vec<CalculationDto> = rows.into_iter().map(Into::into).collect();
    let total = items.len();

    Ok(Json(CalculationsListResponse { items, total }))
}

/// Calculation set grouped by employee and pay cycle
pub async fn grouped_calculations(
    service: Arc<Service>,
    ctx: SecurityContext,
    Path(config_id): Path<Uuid>,
    Query(query): Query<GroupedQuery>,
) -> Result<Json<GroupedCalculationsResponse>, Problem> {
    let filter = CalculationFilter::try_from(query).map_err(map_domain_error)?;

    let grouped = service
        .grouped_calculations(&ctx, config_id, filter)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(grouped.into()))
}
