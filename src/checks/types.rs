//! Result types emitted by the validation pipeline.

use serde::Serialize;

/// Whether a duplicate issue marks the record to keep or a record to delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateSubType {
    Keep,
    Delete,
}

/// One finding against a single table.
///
/// Serialized with a `type` tag and camelCase fields, matching the report
/// format consumed by the review UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Issue {
    /// Travel claimed on a weekend or public holiday without an authorized
    /// reason in the remarks or purpose field.
    Holiday {
        date: String,
        row_id: String,
        detail: String,
        action: String,
    },
    /// Same route submitted more than once on the same day. All duplicate
    /// issues sharing a date carry the same `group_id`; exactly one record
    /// per route group is `keep`, the rest are `delete`.
    Duplicate {
        sub_type: DuplicateSubType,
        date: String,
        row_id: String,
        detail: String,
        action: String,
        group_id: String,
        /// Number of delete issues in the route group. Present on `keep`.
        #[serde(skip_serializing_if = "Option::is_none")]
        duplicate_count: Option<usize>,
    },
    /// Business days with no submission, grouped per Monday-starting week.
    /// Warning only; `date` holds the composed display string for the week.
    Continuity {
        date: String,
        detail: String,
        action: String,
    },
    /// Fare diverging from the route's dominant one-way-normalized amount.
    AmountMismatch {
        date: String,
        row_id: String,
        detail: String,
        action: String,
    },
    /// Round-trip amount that cannot be halved to a whole one-way fare.
    OddRoundtrip {
        date: String,
        row_id: String,
        detail: String,
        action: String,
    },
}

impl Issue {
    /// Row the issue points at; `None` for continuity warnings, which span a
    /// date range rather than a single record.
    pub fn row_id(&self) -> Option<&str> {
        match self {
            Issue::Holiday { row_id, .. }
            | Issue::Duplicate { row_id, .. }
            | Issue::AmountMismatch { row_id, .. }
            | Issue::OddRoundtrip { row_id, .. } => Some(row_id.as_str()),
            Issue::Continuity { .. } => None,
        }
    }
}

/// Validation outcome for one table.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableResult {
    pub title: String,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
    /// True only when the table was checked and produced no errors. An empty
    /// table is never marked successful. Warnings do not affect this flag.
    pub success: bool,
}

/// Validation outcome across all tables of one run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallResult {
    pub tables: Vec<TableResult>,
    pub overall_success: bool,
    pub total_errors: usize,
    pub total_warnings: usize,
    /// Whole-run failure indicator. Set only when the run itself could not
    /// be carried out; data problems are reported per table instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OverallResult {
    /// Result for a run that could not be carried out at all.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            tables: Vec::new(),
            overall_success: false,
            total_errors: 1,
            total_warnings: 0,
            error: Some(message.into()),
        }
    }

    /// Result for a run invoked with no tables.
    pub fn empty() -> Self {
        Self {
            tables: Vec::new(),
            overall_success: false,
            total_errors: 0,
            total_warnings: 0,
            error: None,
        }
    }
}
