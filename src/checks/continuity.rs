//! Weekday coverage scanning between submitted dates.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};

use crate::dates::{normalize_date, to_short, to_slash};
use crate::record::ExpenseRecord;

use super::types::Issue;

/// Warns about business days with no submission between the earliest and
/// latest submitted dates.
///
/// The distinct-date set covers every record with a normalizable date,
/// regardless of what the other rules flagged. Missing days are bucketed by
/// Monday-starting week and compressed into display runs; the result is
/// warnings only and never affects a table's success flag.
pub fn check_continuity(expenses: &[ExpenseRecord], holidays: &HashSet<NaiveDate>) -> Vec<Issue> {
    let present: BTreeSet<NaiveDate> = expenses
        .iter()
        .filter_map(|e| normalize_date(&e.date))
        .collect();

    if present.len() < 2 {
        return Vec::new();
    }

    // Business days strictly between each consecutive pair of present dates.
    let mut missing = Vec::new();
    let dates: Vec<NaiveDate> = present.into_iter().collect();
    for pair in dates.windows(2) {
        let gap = (pair[1] - pair[0]).num_days();
        for offset in 1..gap {
            let day = pair[0] + TimeDelta::days(offset);
            let weekend = matches!(day.weekday(), Weekday::Sat | Weekday::Sun);
            if !weekend && !holidays.contains(&day) {
                missing.push(day);
            }
        }
    }

    // Bucket by the week's Monday; BTreeMap keeps weeks ascending.
    let mut weeks: BTreeMap<NaiveDate, Vec<NaiveDate>> = BTreeMap::new();
    for day in missing {
        let monday = day - TimeDelta::days(day.weekday().num_days_from_monday() as i64);
        weeks.entry(monday).or_default().push(day);
    }

    weeks
        .into_iter()
        .map(|(monday, days)| {
            let friday = monday + TimeDelta::days(4);
            let week_range = format!("{}～{}", to_short(monday), to_short(friday));

            Issue::Continuity {
                date: format!("{}（週: {}）", format_runs(&days), week_range),
                detail: format!("平日に交通費申請が抜けています（{}日分）", days.len()),
                action: "実際に出勤が無かったか確認してください".to_string(),
            }
        })
        .collect()
}

/// Compresses an ascending day list into display units: a lone day prints in
/// full, a two-day run prints both days, three or more print as a range.
fn format_runs(days: &[NaiveDate]) -> String {
    let mut runs: Vec<(NaiveDate, NaiveDate)> = Vec::new();

    for &day in days {
        let consecutive = runs
            .last()
            .is_some_and(|&(_, end)| day - end == TimeDelta::days(1));
        if consecutive {
            if let Some(run) = runs.last_mut() {
                run.1 = day;
            }
        } else {
            runs.push((day, day));
        }
    }

    runs.iter()
        .map(|&(start, end)| match (end - start).num_days() {
            0 => to_slash(start),
            1 => format!("{}, {}", to_slash(start), to_slash(end)),
            _ => format!("{}～{}", to_slash(start), to_slash(end)),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
