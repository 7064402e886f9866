//! Detection of time clashes between lessons.
//!
//! Conflicts are advisory: they are reported to the user next to the chart and
//! never prevent the chart from being drawn.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Lesson, ScheduleInterval, TimeOfDay, Weekday};

/// A clash between one interval of lesson A and one interval of lesson B.
///
/// # Fields
///
/// * `lesson_a` / `lesson_b` - Names of the two lessons, A preceding B in the input
/// * `lesson_a_index` / `lesson_b_index` - Positions of the lessons in the input
/// * `day` - Shared day of the two intervals
/// * `interval_a` / `interval_b` - The clashing intervals as submitted
/// * `overlap_start` / `overlap_end` - The shared time range, `start < end`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub lesson_a: String,
    pub lesson_b: String,
    pub lesson_a_index: usize,
    pub lesson_b_index: usize,
    pub day: Weekday,
    pub interval_a: ScheduleInterval,
    pub interval_b: ScheduleInterval,
    pub overlap_start: TimeOfDay,
    pub overlap_end: TimeOfDay,
}

impl Conflict {
    /// Human-readable Persian description shown in the conflict warning box.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "تداخل: {} و {} در {} ({}-{} و {}-{})",
            self.lesson_a,
            self.lesson_b,
            self.day,
            self.interval_a.start,
            self.interval_a.end,
            self.interval_b.start,
            self.interval_b.end,
        )
    }
}

/// Find every clashing pair of intervals between different lessons.
///
/// Pairs are visited with `i < j` over lesson positions, then over the
/// intervals of lesson `i`, then over the intervals of lesson `j`; conflicts are
/// returned in that order. Two intervals clash when they share a day and
/// `s1 < e2 && s2 < e1`, so intervals that merely touch are fine. A pair of
/// lessons clashing in several places yields one conflict per place.
///
/// # Arguments
///
/// * `lessons` - Lessons in submission order
///
/// # Returns
///
/// Conflicts in visiting order; empty when nothing clashes.
pub fn detect(lessons: &[Lesson]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for (i, first) in lessons.iter().enumerate() {
        for (j, second) in lessons.iter().enumerate().skip(i + 1) {
            for a in &first.schedules {
                for b in &second.schedules {
                    if !a.overlaps(b) {
                        continue;
                    }
                    conflicts.push(Conflict {
                        lesson_a: first.name.clone(),
                        lesson_b: second.name.clone(),
                        lesson_a_index: i,
                        lesson_b_index: j,
                        day: a.day,
                        interval_a: *a,
                        interval_b: *b,
                        overlap_start: a.start.max(b.start),
                        overlap_end: a.end.min(b.end),
                    });
                }
            }
        }
    }

    if !conflicts.is_empty() {
        log::debug!(
            "Detected {} conflict(s) across {} lesson(s)",
            conflicts.len(),
            lessons.len()
        );
    }

    conflicts
}

/// Convenience wrapper returning only the warning messages.
pub fn conflict_messages(lessons: &[Lesson]) -> Vec<String> {
    detect(lessons).iter().map(Conflict::message).collect()
}
