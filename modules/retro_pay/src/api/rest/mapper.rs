//! Mapper implementations for converting between DTOs and contract models

use super::dto::*;
use crate::contract::{
    self, CalculationFilter, EmployeeStatus, IncreaseSpec, IncreaseType, RetroPayError,
};

const ALL: &str = "all";

// ===== Config conversions =====

impl ConfigDto {
    pub fn from_model(config: contract::RetroPayConfig, increase_display: String) -> Self {
        Self {
            id: config.id,
            name: config.name,
            pay_group_id: config.pay_group_id,
            effective_start_date: config.effective_start_date,
            effective_end_date: config.effective_end_date,
            increase_type: config.increase.increase_type.as_str().to_string(),
            increase_value: config.increase.increase_value,
            increase_display,
            status: config.status.as_str().to_string(),
            created_by: config.created_by,
            approved_by: config.approved_by,
            approved_at: config.approved_at,
            created_at: config.created_at,
            updated_at: config.updated_at,
        }
    }
}

impl TryFrom<CreateConfigRequest> for contract::NewRetroPayConfig {
    type Error = RetroPayError;

    fn try_from(req: CreateConfigRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: req.name,
            pay_group_id: req.pay_group_id,
            effective_start_date: req.effective_start_date,
            effective_end_date: req.effective_end_date,
            increase: IncreaseSpec {
                increase_type: req.increase_type.parse::<IncreaseType>()?,
                increase_value: req.increase_value,
            },
        })
    }
}

// ===== Calculation conversions =====

impl From<contract::GenerationSummary> for GenerationSummaryDto {
    fn from(summary: contract::GenerationSummary) -> Self {
        Self {
            config_id: summary.config_id,
            rows_generated: summary.rows_generated,
            total_adjustment: summary.total_adjustment,
        }
    }
}

impl From<contract::RetroPayCalculation> for CalculationDto {
    fn from(row: contract::RetroPayCalculation) -> Self {
        Self {
            id: row.id,
            config_id: row.config_id,
            employee_id: row.employee_id,
            employee_first_name: row.employee_first_name,
            employee_last_name: row.employee_last_name,
            employee_status: row.employee_status.as_str().to_string(),
            pay_year: row.pay_year,
            pay_cycle_number: row.pay_cycle_number,
            pay_element: row.pay_element,
            original_amount: row.original_amount,
            increase_type: row.increase_type.as_str().to_string(),
            increase_value: row.increase_value,
            adjustment_amount: row.adjustment_amount,
            created_at: row.created_at,
        }
    }
}

impl From<contract::CycleGroup> for CycleGroupDto {
    fn from(group: contract::CycleGroup) -> Self {
        Self {
            pay_year: group.pay_year,
            pay_cycle_number: group.pay_cycle_number,
            total_original: group.total_original,
            total_adjustment: group.total_adjustment,
            rows: group.rows.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<contract::EmployeeGroup> for EmployeeGroupDto {
    fn from(group: contract::EmployeeGroup) -> Self {
        Self {
            employee_id: group.employee_id,
            display_name: group.display_name,
            employee_status: group.employee_status.as_str().to_string(),
            total_original: group.total_original,
            total_adjustment: group.total_adjustment,
            cycles: group.cycles.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<contract::GroupedCalculations> for GroupedCalculationsResponse {
    fn from(grouped: contract::GroupedCalculations) -> Self {
        Self {
            employees: grouped.employees.into_iter().map(Into::into).collect(),
            total_original: grouped.total_original,
            total_adjustment: grouped.total_adjustment,
        }
    }
}

// ===== Query conversions =====

fn is_all(value: &str) -> bool {
    value.trim().is_empty() || value.trim().eq_ignore_ascii_case(ALL)
}

impl TryFrom<GroupedQuery> for CalculationFilter {
    type Error = RetroPayError;

    fn try_from(query: GroupedQuery) -> Result<Self, Self::Error> {
        let year = match query.year.as_deref() {
            Some(raw) if !is_all(raw) => Some(raw.trim().parse::<i32>().map_err(|_| {
                RetroPayError::validation(format!("year '{}' is not a number", raw))
            })?),
            _ => None,
        };

        let employee_status = match query.employee_status.as_deref() {
            Some(raw) if !is_all(raw) => Some(raw.trim().parse::<EmployeeStatus>()?),
            _ => None,
        };

        Ok(Self {
            year,
            employee_status,
        })
    }
}
