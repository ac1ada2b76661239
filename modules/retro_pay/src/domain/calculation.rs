//! Adjustment arithmetic and configuration validation

use crate::contract::{
    IncreaseSpec, IncreaseType, NewRetroPayConfig, PayPeriodEntry, RetroPayCalculation,
    RetroPayConfig, RetroPayError,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

/// Largest percentage increase accepted on a configuration
const MAX_PERCENTAGE: Decimal = Decimal::ONE_THOUSAND;

/// Adjustment owed for one historical payment.
///
/// Percentage increases are rounded to `precision` decimal places, midpoint
/// away from zero. Fixed increases apply once per payment and are not scaled.
pub fn compute_adjustment(original_amount: Decimal, increase: &IncreaseSpec, precision: u32) -> Decimal {
    match increase.increase_type {
        IncreaseType::Percentage => (original_amount * increase.increase_value
            / Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero),
        IncreaseType::FixedAmount => increase.increase_value,
    }
}

/// Whether a pay period `[period_start, period_end]` overlaps `[start, end]`
pub fn period_overlaps(
    period_start: NaiveDate,
    period_end: NaiveDate,
    start: NaiveDate,
    end: NaiveDate,
) -> bool {
    period_start <= end && period_end >= start
}

pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), RetroPayError> {
    if start > end {
        return Err(RetroPayError::validation(format!(
            "effective_start_date {} is after effective_end_date {}",
            start, end
        )));
    }
    Ok(())
}

pub fn validate_increase(increase: &IncreaseSpec) -> Result<(), RetroPayError> {
    if increase.increase_value < Decimal::ZERO {
        return Err(RetroPayError::validation("increase_value must not be negative"));
    }
    if increase.increase_type == IncreaseType::Percentage && increase.increase_value > MAX_PERCENTAGE {
        return Err(RetroPayError::validation(format!(
            "percentage increase {} exceeds {}",
            increase.increase_value, MAX_PERCENTAGE
        )));
    }
    Ok(())
}

pub fn validate_new_config(new_config: &NewRetroPayConfig) -> Result<(), RetroPayError> {
    if new_config.name.trim().is_empty() {
        return Err(RetroPayError::validation("name cannot be empty"));
    }
    validate_date_range(new_config.effective_start_date, new_config.effective_end_date)?;
    validate_increase(&new_config.increase)
}

/// Build the calculation row for one pay entry under a configuration
pub fn build_calculation(
    config: &RetroPayConfig,
    entry: &PayPeriodEntry,
    precision: u32,
    now: DateTime<Utc>,
) -> RetroPayCalculation {
    RetroPayCalculation {
        id: Uuid::new_v4(),
        tenant_id: config.tenant_id,
        config_id: config.id,
        employee_id: entry.employee_id,
        employee_first_name: entry.employee_first_name.clone(),
        employee_last_name: entry.employee_last_name.clone(),
        employee_status: entry.employee_status,
        pay_year: entry.pay_year,
        pay_cycle_number: entry.pay_cycle_number,
        pay_element: entry.pay_element.clone(),
        original_amount: entry.amount,
        increase_type: config.increase.increase_type,
        increase_value: config.increase.increase_value,
        adjustment_amount: compute_adjustment(entry.amount, &config.increase, precision),
        created_at: now,
    }
}
