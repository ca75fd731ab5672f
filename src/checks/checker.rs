//! Per-table pipeline and whole-run aggregation.

use std::collections::HashSet;

use chrono::{Datelike, Local, NaiveDate};
use tracing::info;

use crate::holidays::{HolidayCalendar, HolidaySource};
use crate::record::ExpenseTable;

use super::amounts::check_amounts;
use super::continuity::check_continuity;
use super::duplicates::check_duplicates;
use super::holiday_rule::check_holidays;
use super::types::{OverallResult, TableResult};

/// Validates one table against a resolved holiday set.
///
/// Pure and synchronous: runs the holiday/weekend rule, duplicate
/// resolution (minus holiday-flagged rows), continuity scanning, and amount
/// consistency, in that order. An empty table returns immediately and keeps
/// `success: false`.
pub fn check_table(table: &ExpenseTable, holidays: &HashSet<NaiveDate>) -> TableResult {
    let mut result = TableResult {
        title: table.title.clone(),
        errors: Vec::new(),
        warnings: Vec::new(),
        success: false,
    };

    if table.expenses.is_empty() {
        return result;
    }

    let (holiday_issues, flagged) = check_holidays(&table.expenses, holidays);
    result.errors.extend(holiday_issues);

    result
        .errors
        .extend(check_duplicates(&table.expenses, &flagged));

    result
        .warnings
        .extend(check_continuity(&table.expenses, holidays));

    result.errors.extend(check_amounts(&table.expenses));

    result.success = result.errors.is_empty();
    result
}

/// Validates all tables of one extracted snapshot.
///
/// The holiday set is resolved once, for the current local calendar year;
/// records dated in an adjacent year are checked against that same set, so a
/// table spanning a year boundary can miss holidays of the other year. With
/// no tables the result is an empty, unsuccessful report.
#[tracing::instrument(skip_all, fields(table_count = tables.len()))]
pub async fn check_all<S: HolidaySource>(
    calendar: &HolidayCalendar<S>,
    tables: &[ExpenseTable],
) -> OverallResult {
    if tables.is_empty() {
        return OverallResult::empty();
    }

    let year = Local::now().year();
    let holidays = calendar.holidays_for(year).await;
    info!(year, holiday_count = holidays.len(), "Holiday set resolved");

    // Tables are independent; evaluated in input order so the report order
    // needs no merge step.
    let results: Vec<TableResult> = tables
        .iter()
        .map(|table| check_table(table, &holidays))
        .collect();

    let total_errors = results.iter().map(|r| r.errors.len()).sum();
    let total_warnings = results.iter().map(|r| r.warnings.len()).sum();

    OverallResult {
        tables: results,
        overall_success: total_errors == 0,
        total_errors,
        total_warnings,
        error: None,
    }
}
