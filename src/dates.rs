//! Date normalization for free-text date cells.
//!
//! Submitted dates arrive as `2025-10-08`, `2025/10/8`, or Japanese-style
//! `2025年10月8日`. Everything downstream works on [`NaiveDate`]; a cell that
//! does not resolve to a valid calendar date is excluded from all
//! date-dependent checks rather than failing the run.

use chrono::NaiveDate;

/// Canonicalizes a free-text date cell into a [`NaiveDate`].
///
/// Era separators `年`/`月` become `-`, a trailing `日` is stripped, and the
/// result is parsed as `YYYY-MM-DD` or `YYYY/MM/DD` (unpadded month/day
/// accepted). Returns `None` for anything that does not resolve to a real
/// calendar date.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let cleaned = raw.replace(['年', '月'], "-").replace('日', "");
    let cleaned = cleaned.trim();

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(cleaned, fmt) {
            return Some(date);
        }
    }

    None
}

/// Formats a date as canonical `YYYY-MM-DD`.
pub fn to_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Formats a date as `YYYY/MM/DD` for display groups.
pub fn to_slash(date: NaiveDate) -> String {
    date.format("%Y/%m/%d").to_string()
}

/// Formats a date as `MM/DD` for week-range labels.
pub fn to_short(date: NaiveDate) -> String {
    date.format("%m/%d").to_string()
}
