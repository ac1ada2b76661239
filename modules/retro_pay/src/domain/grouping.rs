//! Review grouping of a flat calculation set
//!
//! Rows are filtered, grouped by employee, then by `(pay_year, pay_cycle_number)`.
//! The grouping is a partition: every surviving row lands in exactly one cycle
//! group, so cycle totals sum to employee totals and employee totals sum to the
//! grand totals.

use crate::contract::{
    CalculationFilter, CycleGroup, EmployeeGroup, GroupedCalculations, RetroPayCalculation,
};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

const UNKNOWN_EMPLOYEE: &str = "Unknown";

/// First and last name joined by a space, or "Unknown" when both are absent
pub fn employee_display_name(first_name: Option<&str>, last_name: Option<&str>) -> String {
    let parts: Vec<&str> = [first_name, last_name]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        UNKNOWN_EMPLOYEE.to_string()
    } else {
        parts.join(" ")
    }
}

impl CalculationFilter {
    pub fn matches(&self, row: &RetroPayCalculation) -> bool {
        self.year.map_or(true, |year| row.pay_year == year)
            && self
                .employee_status
                .map_or(true, |status| row.employee_status == status)
    }
}

struct EmployeeAccumulator {
    display_name: String,
    first_row: RetroPayCalculation,
    total_original: Decimal,
    total_adjustment: Decimal,
    cycles: BTreeMap<(i32, i32), CycleGroup>,
}

/// Group calculations for review.
///
/// Employees are ordered by display name (case-sensitive), ties broken by
/// employee id; cycle groups are ordered by year, then cycle number. Rows keep
/// their input order inside a cycle group.
pub fn group_calculations(
    rows: &[RetroPayCalculation],
    filter: &CalculationFilter,
) -> GroupedCalculations {
    let mut by_employee: HashMap<Uuid, EmployeeAccumulator> = HashMap::new();

    for row in rows.iter().filter(|row| filter.matches(row)) {
        let employee = by_employee
            .entry(row.employee_id)
            .or_insert_with(|| EmployeeAccumulator {
                display_name: employee_display_name(
                    row.employee_first_name.as_deref(),
                    row.employee_last_name.as_deref(),
                ),
                first_row: row.clone(),
                total_original: Decimal::ZERO,
                total_adjustment: Decimal::ZERO,
                cycles: BTreeMap::new(),
            });

        employee.total_original += row.original_amount;
        employee.total_adjustment += row.adjustment_amount;

        let cycle = employee
            .cycles
            .entry((row.pay_year, row.pay_cycle_number))
            .or_insert_with(|| CycleGroup {
                pay_year: row.pay_year,
                pay_cycle_number: row.pay_cycle_number,
                total_original: Decimal::ZERO,
                total_adjustment: Decimal::ZERO,
                rows: Vec::new(),
            });

        cycle.total_original += row.original_amount;
        cycle.total_adjustment += row.adjustment_amount;
        cycle.rows.push(row.clone());
    }

    let mut employees: Vec<EmployeeGroup> = by_employee
        .into_iter()
        .map(|(employee_id, acc)| EmployeeGroup {
            employee_id,
            display_name: acc.display_name,
            employee_status: acc.first_row.employee_status,
            total_original: acc.total_original,
            total_adjustment: acc.total_adjustment,
            cycles: acc.cycles.into_values().collect(),
        })
        .collect();

    employees.sort_by(|a, b| {
        a.display_name
            .cmp(&b.display_name)
            .then_with(|| a.employee_id.cmp(&b.employee_id))
    });

    let total_original = employees.iter().map(|e| e.total_original).sum();
    let total_adjustment = employees.iter().map(|e| e.total_adjustment).sum();

    GroupedCalculations {
        employees,
        total_original,
        total_adjustment,
    }
}
