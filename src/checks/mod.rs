//! Expense-record validation rules and report aggregation.
//!
//! Each rule inspects one table of records and returns issues as values;
//! nothing here throws. The checker runs holiday/weekend classification,
//! duplicate resolution, weekday-continuity scanning, and per-route amount
//! consistency in that order and folds the findings into a per-table result.

pub mod amounts;
pub mod checker;
pub mod continuity;
pub mod duplicates;
pub mod holiday_rule;
pub mod types;

pub use checker::{check_all, check_table};
pub use types::{DuplicateSubType, Issue, OverallResult, TableResult};
