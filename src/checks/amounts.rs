//! Per-route fare consistency based on one-way-normalized amounts.

use std::collections::HashMap;

use crate::record::ExpenseRecord;

use super::types::Issue;

struct FareEntry {
    normalized: i64,
    original: i64,
    round_trip: bool,
    date: String,
    row_id: String,
}

/// Flags fares that diverge from the dominant fare of their route.
///
/// Round-trip amounts are halved to one-way terms first; an odd round-trip
/// amount cannot be halved, gets its own error, and drops out of the
/// comparison. For routes with two or more submissions the most frequent
/// normalized amount is the normal fare (first-encountered value wins a
/// count tie), and every divergent record is reported with the expected
/// amount expressed in that record's own trip type.
pub fn check_amounts(expenses: &[ExpenseRecord]) -> Vec<Issue> {
    let mut issues = Vec::new();

    // Route buckets in first-seen order.
    let mut routes: Vec<(String, Vec<FareEntry>)> = Vec::new();
    let mut route_index: HashMap<String, usize> = HashMap::new();

    for expense in expenses {
        if expense.amount <= 0 {
            continue;
        }

        if expense.round_trip && expense.amount % 2 != 0 {
            issues.push(Issue::OddRoundtrip {
                date: expense.date.clone(),
                row_id: expense.row_id.clone(),
                detail: format!(
                    "往復金額が奇数です: {}円（片道計算できません）",
                    expense.amount
                ),
                action: "金額を確認してください".to_string(),
            });
            continue;
        }

        let normalized = if expense.round_trip {
            expense.amount / 2
        } else {
            expense.amount
        };

        let route = expense.route();
        let slot = *route_index.entry(route.clone()).or_insert_with(|| {
            routes.push((route, Vec::new()));
            routes.len() - 1
        });
        routes[slot].1.push(FareEntry {
            normalized,
            original: expense.amount,
            round_trip: expense.round_trip,
            date: expense.date.clone(),
            row_id: expense.row_id.clone(),
        });
    }

    for (route, fares) in &routes {
        if fares.len() < 2 {
            continue;
        }

        let normal = dominant_fare(fares);

        for fare in fares.iter().filter(|f| f.normalized != normal) {
            let expected = if fare.round_trip { normal * 2 } else { normal };
            let detail = if fare.round_trip {
                format!(
                    "「{route}（往復）」の金額が異なります\n申請: {}円\n正常: {expected}円（片道{normal}円）",
                    fare.original
                )
            } else {
                format!(
                    "「{route}（片道）」の金額が異なります\n申請: {}円\n正常: {expected}円",
                    fare.original
                )
            };

            issues.push(Issue::AmountMismatch {
                date: fare.date.clone(),
                row_id: fare.row_id.clone(),
                detail,
                action: "金額を確認してください".to_string(),
            });
        }
    }

    issues
}

/// Most frequent normalized amount; a count tie goes to the value seen first.
fn dominant_fare(fares: &[FareEntry]) -> i64 {
    let mut counts: Vec<(i64, usize)> = Vec::new();

    for fare in fares {
        match counts.iter().position(|&(amount, _)| amount == fare.normalized) {
            Some(i) => counts[i].1 += 1,
            None => counts.push((fare.normalized, 1)),
        }
    }

    let mut normal = 0;
    let mut max_count = 0;
    for &(amount, count) in &counts {
        if count > max_count {
            max_count = count;
            normal = amount;
        }
    }

    normal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fare(row_id: &str, amount: i64, round_trip: bool) -> ExpenseRecord {
        ExpenseRecord {
            row_id: row_id.to_string(),
            date: "2025-10-01".to_string(),
            from: "品川".to_string(),
            to: "新宿".to_string(),
            round_trip,
            amount,
            purpose: String::new(),
            remarks: String::new(),
        }
    }

    fn mismatch_rows(issues: &[Issue]) -> Vec<&str> {
        issues
            .iter()
            .filter_map(|i| match i {
                Issue::AmountMismatch { row_id, .. } => Some(row_id.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_outlier_against_mode() {
        let expenses = vec![
            fare("r0", 1000, false),
            fare("r1", 1000, false),
            fare("r2", 1000, false),
            fare("r3", 1200, false),
        ];
        let issues = check_amounts(&expenses);

        assert_eq!(mismatch_rows(&issues), ["r3"]);
        match &issues[0] {
            Issue::AmountMismatch { detail, .. } => {
                assert!(detail.contains("申請: 1200円"));
                assert!(detail.contains("正常: 1000円"));
            }
            other => panic!("unexpected issue: {other:?}"),
        }
    }

    #[test]
    fn test_round_trip_normalizes_to_half() {
        // 2400 round-trip equals the 1200 one-way majority.
        let expenses = vec![
            fare("r0", 1200, false),
            fare("r1", 2400, true),
            fare("r2", 1200, false),
        ];
        assert!(check_amounts(&expenses).is_empty());
    }

    #[test]
    fn test_odd_round_trip_errors_and_is_excluded() {
        let expenses = vec![
            fare("r0", 1200, false),
            fare("r1", 2401, true),
            fare("r2", 1200, false),
        ];
        let issues = check_amounts(&expenses);

        assert_eq!(issues.len(), 1);
        match &issues[0] {
            Issue::OddRoundtrip { row_id, detail, .. } => {
                assert_eq!(row_id, "r1");
                assert!(detail.contains("2401円"));
            }
            other => panic!("unexpected issue: {other:?}"),
        }
    }

    #[test]
    fn test_expected_amount_in_outliers_own_trip_type() {
        // Majority is one-way 1000; the round-trip outlier is told the
        // round-trip figure.
        let expenses = vec![
            fare("r0", 1000, false),
            fare("r1", 1000, false),
            fare("r2", 2400, true),
        ];
        let issues = check_amounts(&expenses);

        assert_eq!(mismatch_rows(&issues), ["r2"]);
        match &issues[0] {
            Issue::AmountMismatch { detail, .. } => {
                assert!(detail.contains("正常: 2000円（片道1000円）"));
            }
            other => panic!("unexpected issue: {other:?}"),
        }
    }

    #[test]
    fn test_count_tie_goes_to_first_seen_value() {
        let expenses = vec![
            fare("r0", 1200, false),
            fare("r1", 1000, false),
            fare("r2", 1200, false),
            fare("r3", 1000, false),
        ];
        let issues = check_amounts(&expenses);

        // 1200 was seen first, so the 1000 entries are the outliers.
        assert_eq!(mismatch_rows(&issues), ["r1", "r3"]);
    }

    #[test]
    fn test_single_submission_routes_are_silent() {
        let mut other = fare("r1", 9999, false);
        other.to = "渋谷".to_string();

        let expenses = vec![fare("r0", 1000, false), other];
        assert!(check_amounts(&expenses).is_empty());
    }

    #[test]
    fn test_zero_and_negative_amounts_ignored() {
        let expenses = vec![
            fare("r0", 0, false),
            fare("r1", -100, false),
            fare("r2", 1000, false),
        ];
        assert!(check_amounts(&expenses).is_empty());
    }

    #[test]
    fn test_routes_compared_independently() {
        let mut a = fare("r2", 500, false);
        a.to = "渋谷".to_string();
        let mut b = fare("r3", 500, false);
        b.to = "渋谷".to_string();

        let expenses = vec![fare("r0", 1000, false), fare("r1", 1000, false), a, b];
        assert!(check_amounts(&expenses).is_empty());
    }
}
