//! Static holiday tables used when the live source is unavailable.
//!
//! These are exact published calendars, substitute holidays (furikae)
//! included. Fixture data: update by transcription, never compute.

use std::collections::HashSet;

use chrono::NaiveDate;

static HOLIDAYS_2025: &[(u32, u32)] = &[
    (1, 1),   // 元日
    (1, 13),  // 成人の日
    (2, 11),  // 建国記念の日
    (2, 23),  // 天皇誕生日
    (2, 24),  // 振替休日
    (3, 20),  // 春分の日
    (4, 29),  // 昭和の日
    (5, 3),   // 憲法記念日
    (5, 4),   // みどりの日
    (5, 5),   // こどもの日
    (5, 6),   // 振替休日
    (7, 21),  // 海の日
    (8, 11),  // 山の日
    (9, 15),  // 敬老の日
    (9, 23),  // 秋分の日
    (10, 13), // スポーツの日
    (11, 3),  // 文化の日
    (11, 23), // 勤労感謝の日
    (11, 24), // 振替休日
];

static HOLIDAYS_2026: &[(u32, u32)] = &[
    (1, 1),   // 元日
    (1, 12),  // 成人の日
    (2, 11),  // 建国記念の日
    (2, 23),  // 天皇誕生日
    (3, 20),  // 春分の日
    (4, 29),  // 昭和の日
    (5, 3),   // 憲法記念日
    (5, 4),   // みどりの日
    (5, 5),   // こどもの日
    (5, 6),   // 振替休日
    (7, 20),  // 海の日
    (8, 11),  // 山の日
    (9, 21),  // 敬老の日
    (9, 22),  // 秋分の日
    (10, 12), // スポーツの日
    (11, 3),  // 文化の日
    (11, 23), // 勤労感謝の日
];

/// Returns the hard-coded holiday set for `year`, or an empty set when no
/// table is carried for that year.
pub fn fallback_holidays(year: i32) -> HashSet<NaiveDate> {
    let table = match year {
        2025 => HOLIDAYS_2025,
        2026 => HOLIDAYS_2026,
        _ => return HashSet::new(),
    };

    table
        .iter()
        .filter_map(|&(month, day)| NaiveDate::from_ymd_opt(year, month, day))
        .collect()
}
