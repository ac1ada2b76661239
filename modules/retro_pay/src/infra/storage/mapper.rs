//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models. Stored enum
//! strings that do not parse are an error, never a silent default.

use super::entity::{calculation, config, pay_entry};
use crate::contract::{
    ConfigStatus, EmployeeStatus, IncreaseSpec, IncreaseType, PayPeriodEntry,
    RetroPayCalculation, RetroPayConfig,
};
use sea_orm::ActiveValue::Set;

// ===== Config Conversions =====

impl TryFrom<config::Model> for RetroPayConfig {
    type Error = anyhow::Error;

    fn try_from(entity: config::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            tenant_id: entity.tenant_id,
            name: entity.name,
            pay_group_id: entity.pay_group_id,
            effective_start_date: entity.effective_start_date,
            effective_end_date: entity.effective_end_date,
            increase: IncreaseSpec {
                increase_type: entity.increase_type.parse::<IncreaseType>()?,
                increase_value: entity.increase_value,
            },
            status: entity.status.parse::<ConfigStatus>()?,
            created_by: entity.created_by,
            approved_by: entity.approved_by,
            approved_at: entity.approved_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

impl From<&RetroPayConfig> for config::ActiveModel {
    fn from(model: &RetroPayConfig) -> Self {
        Self {
            id: Set(model.id),
            tenant_id: Set(model.tenant_id),
            name: Set(model.name.clone()),
            pay_group_id: Set(model.pay_group_id),
            effective_start_date: Set(model.effective_start_date),
            effective_end_date: Set(model.effective_end_date),
            increase_type: Set(model.increase.increase_type.as_str().to_string()),
            increase_value: Set(model.increase.increase_value),
            status: Set(model.status.as_str().to_string()),
            created_by: Set(model.created_by),
            approved_by: Set(model.approved_by),
            approved_at: Set(model.approved_at),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

// ===== Pay History Conversions =====

impl TryFrom<pay_entry::Model> for PayPeriodEntry {
    type Error = anyhow::Error;

    fn try_from(entity: pay_entry::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            tenant_id: entity.tenant_id,
            pay_group_id: entity.pay_group_id,
            employee_id: entity.employee_id,
            employee_first_name: entity.employee_first_name,
            employee_last_name: entity.employee_last_name,
            employee_status: entity.employee_status.parse::<EmployeeStatus>()?,
            pay_year: entity.pay_year,
            pay_cycle_number: entity.pay_cycle_number,
            period_start: entity.period_start,
            period_end: entity.period_end,
            pay_element: entity.pay_element,
            amount: entity.amount,
        })
    }
}

// ===== Calculation Conversions =====

impl TryFrom<calculation::Model> for RetroPayCalculation {
    type Error = anyhow::Error;

    fn try_from(entity: calculation::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            tenant_id: entity.tenant_id,
            config_id: entity.config_id,
            employee_id: entity.employee_id,
            employee_first_name: entity.employee_first_name,
            employee_last_name: entity.employee_last_name,
            employee_status: entity.employee_status.parse::<EmployeeStatus>()?,
            pay_year: entity.pay_year,
            pay_cycle_number: entity.pay_cycle_number,
            pay_element: entity.pay_element,
            original_amount: entity.original_amount,
            increase_type: entity.increase_type.parse::<IncreaseType>()?,
            increase_value: entity.increase_value,
            adjustment_amount: entity.adjustment_amount,
            created_at: entity.created_at,
        })
    }
}

impl From<&RetroPayCalculation> for calculation::ActiveModel {
    fn from(model: &RetroPayCalculation) -> Self {
        Self {
            id: Set(model.id),
            tenant_id: Set(model.tenant_id),
            config_id: Set(model.config_id),
            employee_id: Set(model.employee_id),
            employee_first_name: Set(model.employee_first_name.clone()),
            employee_last_name: Set(model.employee_last_name.clone()),
            employee_status: Set(model.employee_status.as_str().to_string()),
            pay_year: Set(model.pay_year),
            pay_cycle_number: Set(model.pay_cycle_number),
            pay_element: Set(model.pay_element.clone()),
            original_amount: Set(model.original_amount),
            increase_type: Set(model.increase_type.as_str().to_string()),
            increase_value: Set(model.increase_value),
            adjustment_amount: Set(model.adjustment_amount),
            created_at: Set(model.created_at),
        }
    }
}
