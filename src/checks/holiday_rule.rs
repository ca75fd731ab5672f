//! Weekend and public-holiday classification.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::dates::normalize_date;
use crate::record::ExpenseRecord;

use super::types::Issue;

/// Reasons that authorize travel on a non-business day. Matched literally
/// (case-sensitive substring) against the remarks and purpose fields.
const AUTHORIZED_KEYWORDS: [&str; 4] = ["休日出勤", "出張", "緊急対応", "出社"];

/// Flags records submitted for a weekend or holiday without an authorized
/// reason.
///
/// Returns the issues plus the `row_id`s of flagged records; those rows are
/// excluded from duplicate resolution entirely.
pub fn check_holidays(
    expenses: &[ExpenseRecord],
    holidays: &HashSet<NaiveDate>,
) -> (Vec<Issue>, HashSet<String>) {
    let mut issues = Vec::new();
    let mut flagged = HashSet::new();

    for expense in expenses {
        let Some(date) = normalize_date(&expense.date) else {
            continue;
        };

        let weekday = date.weekday();
        let is_weekend = matches!(weekday, Weekday::Sat | Weekday::Sun);
        let is_holiday = holidays.contains(&date);

        if !is_weekend && !is_holiday {
            continue;
        }

        if has_authorized_reason(expense) {
            continue;
        }

        // A holiday that falls on a weekend is still reported as 祝日.
        let day_type = if is_holiday {
            "祝日"
        } else if weekday == Weekday::Sun {
            "日曜日"
        } else {
            "土曜日"
        };

        issues.push(Issue::Holiday {
            date: expense.date.clone(),
            row_id: expense.row_id.clone(),
            detail: format!("{day_type}の申請です"),
            action: "備考欄には出勤理由を記入するか、不要な場合は削除してください".to_string(),
        });
        flagged.insert(expense.row_id.clone());
    }

    (issues, flagged)
}

fn has_authorized_reason(expense: &ExpenseRecord) -> bool {
    AUTHORIZED_KEYWORDS
        .iter()
        .any(|kw| expense.remarks.contains(kw) || expense.purpose.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(row_id: &str, date: &str, remarks: &str, purpose: &str) -> ExpenseRecord {
        ExpenseRecord {
            row_id: row_id.to_string(),
            date: date.to_string(),
            from: "A".to_string(),
            to: "B".to_string(),
            round_trip: false,
            amount: 200,
            purpose: purpose.to_string(),
            remarks: remarks.to_string(),
        }
    }

    fn holidays() -> HashSet<NaiveDate> {
        // 2025-10-13 スポーツの日 (a Monday)
        HashSet::from([NaiveDate::from_ymd_opt(2025, 10, 13).unwrap()])
    }

    #[test]
    fn test_weekday_passes() {
        // 2025-10-01 is a Wednesday
        let expenses = vec![record("r0", "2025-10-01", "", "")];
        let (issues, flagged) = check_holidays(&expenses, &holidays());
        assert!(issues.is_empty());
        assert!(flagged.is_empty());
    }

    #[test]
    fn test_saturday_flagged() {
        // 2025-10-04 is a Saturday
        let expenses = vec![record("r0", "2025-10-04", "", "")];
        let (issues, flagged) = check_holidays(&expenses, &holidays());

        assert_eq!(issues.len(), 1);
        assert!(flagged.contains("r0"));
        match &issues[0] {
            Issue::Holiday { detail, .. } => assert_eq!(detail, "土曜日の申請です"),
            other => panic!("unexpected issue: {other:?}"),
        }
    }

    #[test]
    fn test_sunday_flagged() {
        // 2025-10-05 is a Sunday
        let expenses = vec![record("r0", "2025-10-05", "", "")];
        let (issues, _) = check_holidays(&expenses, &holidays());
        match &issues[0] {
            Issue::Holiday { detail, .. } => assert_eq!(detail, "日曜日の申請です"),
            other => panic!("unexpected issue: {other:?}"),
        }
    }

    #[test]
    fn test_holiday_label_wins_over_weekday() {
        let expenses = vec![record("r0", "2025-10-13", "", "")];
        let (issues, _) = check_holidays(&expenses, &holidays());
        match &issues[0] {
            Issue::Holiday { detail, .. } => assert_eq!(detail, "祝日の申請です"),
            other => panic!("unexpected issue: {other:?}"),
        }
    }

    #[test]
    fn test_keyword_in_remarks_authorizes() {
        let expenses = vec![record("r0", "2025-10-04", "休日出勤のため", "")];
        let (issues, flagged) = check_holidays(&expenses, &holidays());
        assert!(issues.is_empty());
        assert!(flagged.is_empty());
    }

    #[test]
    fn test_keyword_in_purpose_authorizes() {
        let expenses = vec![record("r0", "2025-10-04", "", "大阪出張")];
        let (issues, _) = check_holidays(&expenses, &holidays());
        assert!(issues.is_empty());
    }

    #[test]
    fn test_unparseable_date_is_skipped() {
        let expenses = vec![record("r0", "いつか", "", "")];
        let (issues, flagged) = check_holidays(&expenses, &holidays());
        assert!(issues.is_empty());
        assert!(flagged.is_empty());
    }

    #[test]
    fn test_original_date_text_is_preserved() {
        let expenses = vec![record("r0", "2025年10月4日", "", "")];
        let (issues, _) = check_holidays(&expenses, &holidays());
        match &issues[0] {
            Issue::Holiday { date, .. } => assert_eq!(date, "2025年10月4日"),
            other => panic!("unexpected issue: {other:?}"),
        }
    }
}
