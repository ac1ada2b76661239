//! Contract models for the retroactive pay engine
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models.

use super::error::RetroPayError;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

/// How a retroactive increase is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncreaseType {
    /// `increase_value` percent of the originally paid amount
    Percentage,
    /// `increase_value` added once per paid occurrence
    FixedAmount,
}

impl IncreaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::FixedAmount => "fixed_amount",
        }
    }
}

impl FromStr for IncreaseType {
    type Err = RetroPayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percentage" => Ok(Self::Percentage),
            "fixed_amount" => Ok(Self::FixedAmount),
            other => Err(RetroPayError::validation(format!(
                "unknown increase_type '{}'",
                other
            ))),
        }
    }
}

/// Lifecycle of a retroactive pay configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigStatus {
    Draft,
    Approved,
}

impl ConfigStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Approved => "approved",
        }
    }
}

impl FromStr for ConfigStatus {
    type Err = RetroPayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "approved" => Ok(Self::Approved),
            other => Err(RetroPayError::validation(format!(
                "unknown config status '{}'",
                other
            ))),
        }
    }
}

/// Employment status captured when a calculation is generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmployeeStatus {
    Active,
    Terminated,
    OnLeave,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Terminated => "terminated",
            Self::OnLeave => "on_leave",
        }
    }
}

impl FromStr for EmployeeStatus {
    type Err = RetroPayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "terminated" => Ok(Self::Terminated),
            "on_leave" => Ok(Self::OnLeave),
            other => Err(RetroPayError::validation(format!(
                "unknown employee_status '{}'",
                other
            ))),
        }
    }
}

/// Increase applied to every historical payment in range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncreaseSpec {
    pub increase_type: IncreaseType,
    pub increase_value: Decimal,
}

/// Administrator-defined retroactive increase for one pay group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetroPayConfig {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub pay_group_id: Uuid,
    /// First day the increase applies to (inclusive)
    pub effective_start_date: NaiveDate,
    /// Last day the increase applies to (inclusive)
    pub effective_end_date: NaiveDate,
    pub increase: IncreaseSpec,
    pub status: ConfigStatus,
    pub created_by: Uuid,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRetroPayConfig {
    pub name: String,
    pub pay_group_id: Uuid,
    pub effective_start_date: NaiveDate,
    pub effective_end_date: NaiveDate,
    pub increase: IncreaseSpec,
}

/// One historical payment of one pay element in one pay cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayPeriodEntry {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub pay_group_id: Uuid,
    pub employee_id: Uuid,
    pub employee_first_name: Option<String>,
    pub employee_last_name: Option<String>,
    pub employee_status: EmployeeStatus,
    pub pay_year: i32,
    pub pay_cycle_number: i32,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub pay_element: String,
    /// Amount actually paid
    pub amount: Decimal,
}

/// Generated adjustment for one (employee, pay year, pay cycle, pay element)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetroPayCalculation {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub config_id: Uuid,
    pub employee_id: Uuid,
    pub employee_first_name: Option<String>,
    pub employee_last_name: Option<String>,
    pub employee_status: EmployeeStatus,
    pub pay_year: i32,
    pub pay_cycle_number: i32,
    pub pay_element: String,
    pub original_amount: Decimal,
    /// Copied from the configuration at generation time
    pub increase_type: IncreaseType,
    /// Copied from the configuration at generation time
    pub increase_value: Decimal,
    pub adjustment_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Result of a generate run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub config_id: Uuid,
    pub rows_generated: usize,
    pub total_adjustment: Decimal,
}

/// Review filter; `None` means "all"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalculationFilter {
    pub year: Option<i32>,
    pub employee_status: Option<EmployeeStatus>,
}

/// Calculations of one employee in one pay cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleGroup {
    pub pay_year: i32,
    pub pay_cycle_number: i32,
    pub total_original: Decimal,
    pub total_adjustment: Decimal,
    pub rows: Vec<RetroPayCalculation>,
}

/// Calculations of one employee, split by pay cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeGroup {
    pub employee_id: Uuid,
    pub display_name: String,
    pub employee_status: EmployeeStatus,
    pub total_original: Decimal,
    pub total_adjustment: Decimal,
    pub cycles: Vec<CycleGroup>,
}

/// Review view over a calculation set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedCalculations {
    pub employees: Vec<EmployeeGroup>,
    pub total_original: Decimal,
    pub total_adjustment: Decimal,
}

impl GroupedCalculations {
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}
