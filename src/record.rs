//! Input model: expense tables as extracted from the submission page.

use serde::{Deserialize, Serialize};

/// One submitted travel-expense line.
///
/// `row_id` is an opaque identifier assigned at extraction time. It is unique
/// within a table and stable across repeated validation runs on the same
/// snapshot, so diagnostics can be cross-referenced back to the source row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    pub row_id: String,
    /// Original free-text date cell, kept verbatim for diagnostics.
    pub date: String,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub round_trip: bool,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub remarks: String,
}

impl ExpenseRecord {
    /// Derived grouping key for a travel segment.
    pub fn route(&self) -> String {
        format!("{}→{}", self.from, self.to)
    }
}

/// One table of expense lines for a reporting period.
///
/// The order of `expenses` is the order the rows appeared on the page;
/// duplicate resolution scores candidates by position in this exact sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseTable {
    pub title: String,
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
}
