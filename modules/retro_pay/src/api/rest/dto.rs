//! REST DTOs with serde derives for HTTP API

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ===== Config DTOs =====

/// Retroactive pay configuration response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConfigDto {
    pub id: Uuid,

    #[schema(example = "2024 cost of living adjustment")]
    pub name: String,

    pub pay_group_id: Uuid,

    pub effective_start_date: NaiveDate,

    pub effective_end_date: NaiveDate,

    /// "percentage" or "fixed_amount"
    #[schema(example = "percentage")]
    pub increase_type: String,

    #[schema(value_type = String, example = "3.5")]
    pub increase_value: Decimal,

    /// Increase as shown on review screens
    #[schema(example = "3.5%")]
    pub increase_display: String,

    /// "draft" or "approved"
    #[schema(example = "draft")]
    pub status: String,

    pub created_by: Uuid,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Create configuration request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateConfigRequest {
    pub name: String,

    pub pay_group_id: Uuid,

    pub effective_start_date: NaiveDate,

    pub effective_end_date: NaiveDate,

    #[schema(example = "percentage")]
    pub increase_type: String,

    #[schema(value_type = String, example = "3.5")]
    pub increase_value: Decimal,
}

/// List of configurations
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConfigsListResponse {
    pub items: Vec<ConfigDto>,
    pub total: usize,
}

// ===== Calculation DTOs =====

/// Result of a generate run
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerationSummaryDto {
    pub config_id: Uuid,

    pub rows_generated: usize,

    #[schema(value_type = String, example = "1250.00")]
    pub total_adjustment: Decimal,
}

/// One calculation row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CalculationDto {
    pub id: Uuid,
    pub config_id: Uuid,
    pub employee_id: Uuid,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_last_name: Option<String>,

    #[schema(example = "active")]
    pub employee_status: String,

    pub pay_year: i32,
    pub pay_cycle_number: i32,

    #[schema(example = "BASE_SALARY")]
    pub pay_element: String,

    #[schema(value_type = String)]
    pub original_amount: Decimal,

    pub increase_type: String,

    #[schema(value_type = String)]
    pub increase_value: Decimal,

    #[schema(value_type = String)]
    pub adjustment_amount: Decimal,

    pub created_at: DateTime<Utc>,
}

/// Flat calculation set
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CalculationsListResponse {
    pub items: Vec<CalculationDto>,
    pub total: usize,
}

/// Calculations of one employee in one pay cycle
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CycleGroupDto {
    pub pay_year: i32,
    pub pay_cycle_number: i32,

    #[schema(value_type = String)]
    pub total_original: Decimal,

    #[schema(value_type = String)]
    pub total_adjustment: Decimal,

    pub rows: Vec<CalculationDto>,
}

/// Calculations of one employee
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmployeeGroupDto {
    pub employee_id: Uuid,

    #[schema(example = "Ada Lovelace")]
    pub display_name: String,

    pub employee_status: String,

    #[schema(value_type = String)]
    pub total_original: Decimal,

    #[schema(value_type = String)]
    pub total_adjustment: Decimal,

    pub cycles: Vec<CycleGroupDto>,
}

/// Grouped review view
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GroupedCalculationsResponse {
    pub employees: Vec<EmployeeGroupDto>,

    #[schema(value_type = String)]
    pub total_original: Decimal,

    #[schema(value_type = String)]
    pub total_adjustment: Decimal,
}

/// Filters for the grouped view; "all" or absent means no filter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupedQuery {
    pub year: Option<String>,
    pub employee_status: Option<String>,
}

// Note: Conversion implementations live in mapper.rs
