//! Route registration with OpenAPI documentation

use super::{dto::*, handlers};
use crate::domain::Service;
use axum::{
    extract::{OriginalUri, Path},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use hcm_core::{Problem, SecurityContext};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

#[derive(OpenApi)]
#[openapi(
    info(title = "Budget Approval API", description = "Multi-level budget plan approval workflow"),
    paths(
        list_plans_handler,
        create_plan_handler,
        get_plan_handler,
        list_levels_handler,
        submit_plan_handler,
        pending_approvals_handler,
        approve_level_handler,
        reject_level_handler,
        skip_level_handler,
    ),
    components(schemas(
        PlanDto,
        LevelDto,
        PlanDetailDto,
        CreateLevelRequest,
        CreatePlanRequest,
        PlansListResponse,
        LevelsListResponse,
        DecisionRequest,
    )),
    tags((name = "budget-approval", description = "Budget approval state machine"))
)]
pub struct BudgetApprovalApiDoc;

/// Register all REST routes on `router`
pub fn register_routes(router: Router, service: Arc<Service>) -> anyhow::Result<Router> {
    let router = router
        // Plan endpoints
        .route("/plans", get(list_plans_handler).post(create_plan_handler))
        .route("/plans/{plan_id}", get(get_plan_handler))
        .route("/plans/{plan_id}/levels", get(list_levels_handler))
        .route("/plans/{plan_id}/submit", post(submit_plan_handler))
        // Approval endpoints
        .route("/approvals/pending", get(pending_approvals_handler))
        .route("/levels/{level_id}/approve", post(approve_level_handler))
        .route("/levels/{level_id}/reject", post(reject_level_handler))
        .route("/levels/{level_id}/skip", post(skip_level_handler))
        // Add service as extension for handlers
        .layer(Extension(service))
        .route("/openapi.json", get(openapi_handler));

    Ok(router)
}

async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(BudgetApprovalApiDoc::openapi())
}

// ===== Handler wrappers that extract service from Extension =====

#[utoipa::path(
    get,
    path = "/plans",
    tag = "budget-approval",
    responses(
        (status = 200, description = "Plans of the caller's tenant", body = PlansListResponse),
        (status = 401, description = "Missing or invalid identity headers"),
    )
)]
async fn list_plans_handler(
    Extension(service): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    ctx: SecurityContext,
) -> Result<Json<PlansListResponse>, Problem> {
    handlers::list_plans(service, ctx)
        .await
        .map_err(|p| p.with_instance(uri.path()))
}

#[utoipa::path(
    post,
    path = "/plans",
    tag = "budget-approval",
    request_body = CreatePlanRequest,
    responses(
        (status = 201, description = "Draft plan with its approval chain", body = PlanDetailDto),
        (status = 400, description = "Invalid plan or approval chain"),
    )
)]
async fn create_plan_handler(
    Extension(service): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    ctx: SecurityContext,
    json: Json<CreatePlanRequest>,
) -> Result<(StatusCode, Json<PlanDetailDto>), Problem> {
    handlers::create_plan(service, ctx, json)
        .await
        .map_err(|p| p.with_instance(uri.path()))
}

#[utoipa::path(
    get,
    path = "/plans/{plan_id}",
    tag = "budget-approval",
    params(("plan_id" = Uuid, Path, description = "Plan id")),
    responses(
        (status = 200, description = "Plan", body = PlanDto),
        (status = 404, description = "No such plan in the caller's tenant"),
    )
)]
async fn get_plan_handler(
    Extension(service): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    ctx: SecurityContext,
    path: Path<Uuid>,
) -> Result<Json<PlanDto>, Problem> {
    handlers::get_plan(service, ctx, path)
        .await
        .map_err(|p| p.with_instance(uri.path()))
}

#[utoipa::path(
    get,
    path = "/plans/{plan_id}/levels",
    tag = "budget-approval",
    params(("plan_id" = Uuid, Path, description = "Plan id")),
    responses(
        (status = 200, description = "Approval chain in level order", body = LevelsListResponse),
        (status = 404, description = "No such plan in the caller's tenant"),
    )
)]
async fn list_levels_handler(
    Extension(service): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    ctx: SecurityContext,
    path: Path<Uuid>,
) -> Result<Json<LevelsListResponse>, Problem> {
    handlers::list_levels(service, ctx, path)
        .await
        .map_err(|p| p.with_instance(uri.path()))
}

#[utoipa::path(
    post,
    path = "/plans/{plan_id}/submit",
    tag = "budget-approval",
    params(("plan_id" = Uuid, Path, description = "Plan id")),
    responses(
        (status = 200, description = "Plan pending, first level active", body = PlanDetailDto),
        (status = 404, description = "No such plan in the caller's tenant"),
        (status = 409, description = "Plan is not a draft"),
    )
)]
async fn submit_plan_handler(
    Extension(service): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    ctx: SecurityContext,
    path: Path<Uuid>,
) -> Result<Json<PlanDetailDto>, Problem> {
    handlers::submit_plan(service, ctx, path)
        .await
        .map_err(|p| p.with_instance(uri.path()))
}

#[utoipa::path(
    get,
    path = "/approvals/pending",
    tag = "budget-approval",
    responses(
        (status = 200, description = "Active levels awaiting the caller", body = LevelsListResponse),
        (status = 401, description = "Missing or invalid identity headers"),
    )
)]
async fn pending_approvals_handler(
    Extension(service): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    ctx: SecurityContext,
) -> Result<Json<LevelsListResponse>, Problem> {
    handlers::pending_approvals(service, ctx)
        .await
        .map_err(|p| p.with_instance(uri.path()))
}

#[utoipa::path(
    post,
    path = "/levels/{level_id}/approve",
    tag = "budget-approval",
    params(("level_id" = Uuid, Path, description = "Approval level id")),
    request_body = DecisionRequest,
    responses(
        (status = 200, description = "Level approved, chain advanced", body = PlanDetailDto),
        (status = 403, description = "Caller is not the level's approver"),
        (status = 404, description = "No such level in the caller's tenant"),
        (status = 409, description = "Level is not the active one"),
    )
)]
async fn approve_level_handler(
    Extension(service): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    ctx: SecurityContext,
    path: Path<Uuid>,
    json: Json<DecisionRequest>,
) -> Result<Json<PlanDetailDto>, Problem> {
    handlers::approve_level(service, ctx, path, json)
        .await
        .map_err(|p| p.with_instance(uri.path()))
}

#[utoipa::path(
    post,
    path = "/levels/{level_id}/reject",
    tag = "budget-approval",
    params(("level_id" = Uuid, Path, description = "Approval level id")),
    request_body = DecisionRequest,
    responses(
        (status = 200, description = "Level and plan rejected", body = PlanDetailDto),
        (status = 400, description = "Rejection comment missing"),
        (status = 403, description = "Caller is not the level's approver"),
        (status = 404, description = "No such level in the caller's tenant"),
        (status = 409, description = "Level is not the active one"),
    )
)]
async fn reject_level_handler(
    Extension(service): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    ctx: SecurityContext,
    path: Path<Uuid>,
    json: Json<DecisionRequest>,
) -> Result<Json<PlanDetailDto>, Problem> {
    handlers::reject_level(service, ctx, path, json)
        .await
        .map_err(|p| p.with_instance(uri.path()))
}

#[utoipa::path(
    post,
    path = "/levels/{level_id}/skip",
    tag = "budget-approval",
    params(("level_id" = Uuid, Path, description = "Approval level id")),
    request_body = DecisionRequest,
    responses(
        (status = 200, description = "Level skipped, chain advanced", body = PlanDetailDto),
        (status = 403, description = "Only the plan creator may skip"),
        (status = 404, description = "No such level in the caller's tenant"),
        (status = 409, description = "Level is not the active one"),
    )
)]
async fn skip_level_handler(
    Extension(service): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    ctx: SecurityContext,
    path: Path<Uuid>,
    json: Json<DecisionRequest>,
) -> Result<Json<PlanDetailDto>, Problem> {
    handlers::skip_level(service, ctx, path, json)
        .await
        .map_err(|p| p.with_instance(uri.path()))
}
