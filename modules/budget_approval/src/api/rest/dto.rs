//! REST DTOs with serde derives for HTTP API

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ===== Plan DTOs =====

/// Budget plan response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlanDto {
    pub id: Uuid,

    #[schema(example = "FY2025 engineering headcount")]
    pub name: String,

    #[schema(example = 2025)]
    pub fiscal_year: i32,

    #[schema(value_type = String, example = "1250000.00")]
    pub total_amount: Decimal,

    /// "draft" | "pending" | "approved" | "rejected"
    #[schema(example = "pending")]
    pub status: String,

    pub created_by: Uuid,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Approval level response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LevelDto {
    pub id: Uuid,

    pub plan_id: Uuid,

    #[schema(example = 1)]
    pub level_order: i32,

    #[schema(example = "Finance review")]
    pub level_name: String,

    /// "pending" | "approved" | "rejected" | "skipped"
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub approver_id: Option<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

/// Plan with its ordered approval chain
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlanDetailDto {
    pub plan: PlanDto,
    pub levels: Vec<LevelDto>,
}

/// One level of a new plan
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateLevelRequest {
    pub level_name: String,

    /// Omit to let any user of the tenant decide
    #[serde(default)]
    pub approver_id: Option<Uuid>,
}

/// Create plan request; levels are numbered in the order given
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePlanRequest {
    pub name: String,

    pub fiscal_year: i32,

    #[schema(value_type = String, example = "1250000.00")]
    pub total_amount: Decimal,

    pub levels: Vec<CreateLevelRequest>,
}

/// List of plans
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlansListResponse {
    pub items: Vec<PlanDto>,
    pub total: usize,
}

/// List of levels
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LevelsListResponse {
    pub items: Vec<LevelDto>,
    pub total: usize,
}

// ===== Decision DTOs =====

/// Body of approve, reject and skip requests
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct DecisionRequest {
    #[serde(default)]
    #[schema(example = "budget too high")]
    pub comments: Option<String>,
}

// Note: Conversion implementations live in mapper.rs
