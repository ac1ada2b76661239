//! Route registration with OpenAPI documentation

use super::{dto::*, handlers};
use crate::domain::Service;
use axum::{
    extract::{OriginalUri, Path, Query},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use hcm_core::{Problem, SecurityContext};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

/// OpenAPI document for the retro pay endpoints, relative to the module mount
#[derive(OpenApi)]
#[openapi(
    info(title = "Retroactive Pay API", description = "Retroactive pay configurations and calculations"),
    paths(
        list_configs_handler,
        create_config_handler,
        get_config_handler,
        approve_config_handler,
        generate_handler,
        list_calculations_handler,
        grouped_calculations_handler,
    ),
    components(schemas(
        ConfigDto,
        CreateConfigRequest,
        ConfigsListResponse,
        GenerationSummaryDto,
        CalculationDto,
        CalculationsListResponse,
        CycleGroupDto,
        EmployeeGroupDto,
        GroupedCalculationsResponse,
    )),
    tags((name = "retro-pay", description = "Retroactive pay calculation engine"))
)]
pub struct RetroPayApiDoc;

/// Register all REST routes on `router`
pub fn register_routes(router: Router, service: Arc<Service>) -> anyhow::Result<Router> {
    let router = router
        // Configuration endpoints
        .route("/configs", get(list_configs_handler).post(create_config_handler))
        .route("/configs/{config_id}", get(get_config_handler))
        .route("/configs/{config_id}/approve", post(approve_config_handler))
        // Calculation endpoints
        .route("/configs/{config_id}/generate", post(generate_handler))
        .route("/configs/{config_id}/calculations", get(list_calculations_handler))
        .route(
            "/configs/{config_id}/calculations/grouped",
            get(grouped_calculations_handler),
        )
        // Add service as extension for handlers
        .layer(Extension(service))
        .route("/openapi.json", get(openapi_handler));

    Ok(router)
}

async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(RetroPayApiDoc::openapi())
}

// ===== Handler wrappers that extract service from Extension =====

#[utoipa::path(
    get,
    path = "/configs",
    tag = "retro-pay",
    responses(
        (status = 200, description = "Configurations of the caller's tenant", body = ConfigsListResponse),
        (status = 401, description = "Missing or invalid identity headers"),
    )
)]
async fn list_configs_handler(
    Extension(service): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    ctx: SecurityContext,
) -> Result<Json<ConfigsListResponse>, Problem> {
    handlers::list_configs(service, ctx)
        .await
        .map_err(|p| p.with_instance(uri.path()))
}

#[utoipa::path(
    post,
    path = "/configs",
    tag = "retro-pay",
    request_body = CreateConfigRequest,
    responses(
        (status = 201, description = "Draft configuration created", body = ConfigDto),
        (status = 400, description = "Invalid configuration"),
        (status = 401, description = "Missing or invalid identity headers"),
    )
)]
async fn create_config_handler(
    Extension(service): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    ctx: SecurityContext,
    json: Json<CreateConfigRequest>,
) -> Result<(StatusCode, Json<ConfigDto>), Problem> {
    handlers::create_config(service, ctx, json)
        .await
        .map_err(|p| p.with_instance(uri.path()))
}

#[utoipa::path(
    get,
    path = "/configs/{config_id}",
    tag = "retro-pay",
    params(("config_id" = Uuid, Path, description = "Configuration id")),
    responses(
        (status = 200, description = "Configuration", body = ConfigDto),
        (status = 404, description = "No such configuration in the caller's tenant"),
    )
)]
async fn get_config_handler(
    Extension(service): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    ctx: SecurityContext,
    path: Path<Uuid>,
) -> Result<Json<ConfigDto>, Problem> {
    handlers::get_config(service, ctx, path)
        .await
        .map_err(|p| p.with_instance(uri.path()))
}

#[utoipa::path(
    post,
    path = "/configs/{config_id}/approve",
    tag = "retro-pay",
    params(("config_id" = Uuid, Path, description = "Configuration id")),
    responses(
        (status = 200, description = "Configuration approved", body = ConfigDto),
        (status = 400, description = "No calculations generated yet"),
        (status = 404, description = "No such configuration in the caller's tenant"),
        (status = 409, description = "Configuration is no longer a draft"),
    )
)]
async fn approve_config_handler(
    Extension(service): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    ctx: SecurityContext,
    path: Path<Uuid>,
) -> Result<Json<ConfigDto>, Problem> {
    handlers::approve_config(service, ctx, path)
        .await
        .map_err(|p| p.with_instance(uri.path()))
}

#[utoipa::path(
    post,
    path = "/configs/{config_id}/generate",
    tag = "retro-pay",
    params(("config_id" = Uuid, Path, description = "Configuration id")),
    responses(
        (status = 200, description = "Calculation set replaced", body = GenerationSummaryDto),
        (status = 400, description = "Invalid date range or row limit exceeded"),
        (status = 404, description = "No such configuration in the caller's tenant"),
        (status = 409, description = "Configuration is approved"),
    )
)]
async fn generate_handler(
    Extension(service): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    ctx: SecurityContext,
    path: Path<Uuid>,
) -> Result<Json<GenerationSummaryDto>, Problem> {
    handlers::generate(service, ctx, path)
        .await
        .map_err(|p| p.with_instance(uri.path()))
}

#[utoipa::path(
    get,
    path = "/configs/{config_id}/calculations",
    tag = "retro-pay",
    params(("config_id" = Uuid, Path, description = "Configuration id")),
    responses(
        (status = 200, description = "Flat calculation set", body = CalculationsListResponse),
        (status = 404, description = "No such configuration in the caller's tenant"),
    )
)]
async fn list_calculations_handler(
    Extension(service): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    ctx: SecurityContext,
    path: Path<Uuid>,
) -> Result<Json<CalculationsListResponse>, Problem> {
    handlers::list_calculations(service, ctx, path)
        .await
        .map_err(|p| p.with_instance(uri.path()))
}

#[utoipa::path(
    get,
    path = "/configs/{config_id}/calculations/grouped",
    tag = "retro-pay",
    params(
        ("config_id" = Uuid, Path, description = "Configuration id"),
        ("year" = Option<String>, Query, description = "Pay year, or \"all\""),
        ("employee_status" = Option<String>, Query, description = "active, terminated, on_leave or \"all\""),
    ),
    responses(
        (status = 200, description = "Calculations grouped by employee and pay cycle", body = GroupedCalculationsResponse),
        (status = 400, description = "Unparseable filter"),
        (status = 404, description = "No such configuration in the caller's tenant"),
    )
)]
async fn grouped_calculations_handler(
    Extension(service): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    ctx: SecurityContext,
    path: Path<Uuid>,
    query: Query<GroupedQuery>,
) -> Result<Json<GroupedCalculationsResponse>, Problem> {
    handlers::grouped_calculations(service, ctx, path, query)
        .await
        .map_err(|p| p.with_instance(uri.path()))
}
