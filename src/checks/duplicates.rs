//! Duplicate submission detection with positional-adjacency keep selection.
//!
//! Records are grouped by `(normalized date, route)`. A group of two or more
//! is a duplicate; exactly one member is chosen to keep, scored by how it
//! sits inside the original table sequence. A record flanked on both sides
//! by differing-date neighbors is part of the natural day-to-day flow and is
//! preferred over stray re-entries at the edges of a same-date run.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::dates::normalize_date;
use crate::record::ExpenseRecord;

use super::types::{DuplicateSubType, Issue};

/// A group member paired with its position in the original table sequence.
struct Candidate<'a> {
    index: usize,
    record: &'a ExpenseRecord,
}

/// Reports duplicate `(date, route)` submissions among non-excluded records.
///
/// `excluded` holds row ids already flagged by the holiday rule; those rows
/// never join a group and never count toward occurrence totals. All route
/// groups sharing one normalized date are bundled under one `group_id`, and
/// within a route group the delete issues precede the keep issue.
pub fn check_duplicates(expenses: &[ExpenseRecord], excluded: &HashSet<String>) -> Vec<Issue> {
    // (date, route) groups in first-seen order.
    let mut groups: Vec<(NaiveDate, String, Vec<Candidate>)> = Vec::new();
    let mut group_index: HashMap<(NaiveDate, String), usize> = HashMap::new();

    for (index, expense) in expenses.iter().enumerate() {
        if excluded.contains(&expense.row_id) {
            continue;
        }
        let Some(date) = normalize_date(&expense.date) else {
            continue;
        };

        let route = expense.route();
        let slot = *group_index
            .entry((date, route.clone()))
            .or_insert_with(|| {
                groups.push((date, route, Vec::new()));
                groups.len() - 1
            });
        groups[slot].2.push(Candidate {
            index,
            record: expense,
        });
    }

    // Bundle duplicate route groups by date, ordered by the first route group
    // that qualified for that date.
    let mut date_groups: Vec<(NaiveDate, Vec<usize>)> = Vec::new();
    let mut date_index: HashMap<NaiveDate, usize> = HashMap::new();

    for (i, (date, _, members)) in groups.iter().enumerate() {
        if members.len() < 2 {
            continue;
        }
        let slot = *date_index.entry(*date).or_insert_with(|| {
            date_groups.push((*date, Vec::new()));
            date_groups.len() - 1
        });
        date_groups[slot].1.push(i);
    }

    let mut issues = Vec::new();

    for (group_no, (_, route_groups)) in date_groups.iter().enumerate() {
        let group_id = format!("dup-group-{group_no}");

        for &gi in route_groups {
            let (date, route, members) = &groups[gi];
            let keep = &members[select_keep(members, expenses, *date)];
            let detail = format!("同日に「{route}」が重複して申請されています");

            let deletes: Vec<&Candidate> = members
                .iter()
                .filter(|c| c.record.row_id != keep.record.row_id)
                .collect();

            for delete in &deletes {
                issues.push(Issue::Duplicate {
                    sub_type: DuplicateSubType::Delete,
                    date: delete.record.date.clone(),
                    row_id: delete.record.row_id.clone(),
                    detail: detail.clone(),
                    action: "重複を削除してください".to_string(),
                    group_id: group_id.clone(),
                    duplicate_count: None,
                });
            }

            issues.push(Issue::Duplicate {
                sub_type: DuplicateSubType::Keep,
                date: keep.record.date.clone(),
                row_id: keep.record.row_id.clone(),
                detail,
                action: "保持対象".to_string(),
                group_id: group_id.clone(),
                duplicate_count: Some(deletes.len()),
            });
        }
    }

    issues
}

/// Picks the member to keep. Highest adjacency score wins; on a tie the
/// earliest member in original table order is kept (strict-greater compare).
fn select_keep(members: &[Candidate], all: &[ExpenseRecord], target: NaiveDate) -> usize {
    let mut best = 0;
    let mut best_score = f64::NEG_INFINITY;

    for (i, candidate) in members.iter().enumerate() {
        let score = adjacency_score(candidate.index, all, target);
        if score > best_score {
            best_score = score;
            best = i;
        }
    }

    best
}

/// Scores one occurrence position against the full original sequence.
///
/// - Differing-date neighbors on both sides: 100 − 0.1·|idx − len/2|
///   (prefers the table midpoint).
/// - Differing-date neighbor on one side only: 50 − 0.5·idx (prefers the
///   start of the run).
/// - No differing neighbor at all (one homogeneous run): −idx (prefers the
///   first occurrence).
///
/// A record whose date fails to normalize counts as a differing neighbor.
fn adjacency_score(position: usize, all: &[ExpenseRecord], target: NaiveDate) -> f64 {
    let differs = |r: &ExpenseRecord| normalize_date(&r.date) != Some(target);

    let has_prev = all[..position].iter().any(differs);
    let has_next = all[position + 1..].iter().any(differs);

    if has_prev && has_next {
        let distance_from_center = (position as f64 - all.len() as f64 / 2.0).abs();
        100.0 - distance_from_center * 0.1
    } else if has_prev || has_next {
        50.0 - position as f64 * 0.5
    } else {
        -(position as f64)
    }
}
