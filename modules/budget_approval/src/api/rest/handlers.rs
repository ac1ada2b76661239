//! HTTP request handlers - thin layer that delegates to domain service

use super::{dto::*, error::map_domain_error};
use crate::contract::NewBudgetPlan;
use crate::domain::Service;
use axum::{extract::Path, http::StatusCode, Json};
use hcm_core::{Problem, SecurityContext};
use std::sync::Arc;
use uuid::Uuid;

// ===== Plan Handlers =====

pub async fn list_plans(
    service: Arc<Service>,
    ctx: SecurityContext,
) -> Result<Json<PlansListResponse>, Problem> {
    let plans = service.list_plans(&ctx).await.map_err(map_domain_error)?;

    let items: Vec<PlanDto> = plans.into_iter().map(Into::into).collect();
    let total = items.len();

    Ok(Json(PlansListResponse { items, total }))
}

/// Create a draft plan with its approval chain
pub async fn create_plan(
    service: Arc<Service>,
    ctx: SecurityContext,
    Json(req): Json<CreatePlanRequest>,
) -> Result<(StatusCode, Json<PlanDetailDto>), Problem> {
    let created = service
        .create_plan(&ctx, NewBudgetPlan::from(req))
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn get_plan(
    service: Arc<Service>,
    ctx: SecurityContext,
    Path(plan_id): Path<Uuid>,
) -> Result<Json<PlanDto>, Problem> {
    let plan = service
        .get_plan(&ctx, plan_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(plan.into()))
}

pub async fn list_levels(
    service: Arc<Service>,
    ctx: SecurityContext,
    Path(plan_id): Path<Uuid>,
) -> Result<Json<LevelsListResponse>, Problem> {
    let levels = service
        .list_levels(&ctx, plan_id)
        .await
        .map_err(map_domain_error)?;

    let items: Vec<LevelDto> = levels.into_iter().map(Into::into).collect();
    let total = items.len();

    Ok(Json(LevelsListResponse { items, total }))
}

pub async fn submit_plan(
    service: Arc<Service>,
    ctx: SecurityContext,
    Path(plan_id): Path<Uuid>,
) -> Result<Json<PlanDetailDto>, Problem> {
    let detail = service
        .submit_plan(&ctx, plan_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(detail.into()))
}

// ===== Approval Handlers =====

/// Levels waiting for the caller's decision
pub async fn pending_approvals(
    service: Arc<Service>,
    ctx: SecurityContext,
) -> Result<Json<LevelsListResponse>, Problem> {
    let levels = service
        .pending_approvals(&ctx)
        .await
        .map_err(map_domain_error)?;

    let items: Vec<LevelDto> = levels.into_iter().map(Into::into).collect();
    let total = items.len();

    Ok(Json(LevelsListResponse { items, total }))
}

pub async fn approve_level(
    service: Arc<Service>,
    ctx: SecurityContext,
    Path(level_id): Path<Uuid>,
    Json(req): Json<DecisionRequest>,
) -> Result<Json<PlanDetailDto>, Problem> {
    let detail = service
        .approve_level(&ctx, level_id, req.comments)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(detail.into()))
}

pub async fn reject_level(
    service: Arc<Service>,
    ctx: SecurityContext,
    Path(level_id): Path<Uuid>,
    Json(req): Json<DecisionRequest>,
) -> Result<Json<PlanDetailDto>, Problem> {
    let detail = service
        .reject_level(&ctx, level_id, req.comments)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(detail.into()))
}

pub async fn skip_level(
    service: Arc<Service>,
    ctx: SecurityContext,
    Path(level_id): Path<Uuid>,
    Json(req): Json<DecisionRequest>,
) -> Result<Json<PlanDetailDto>, Problem> {
    let detail = service
        .skip_level(&ctx, level_id, req.comments)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(detail.into()))
}
