// ============================================================================
// Lesson Input Parsing
// ============================================================================
//
// The form posts lessons as loosely typed JSON. Everything that can go wrong
// with a single interval (unknown day, bad hour string) drops that interval
// only; a payload that is not JSON at all degrades to an empty lesson list.

use serde::{Deserialize, Serialize};

use super::time::{normalize_digits, TimeOfDay, Weekday};

/// A single weekly time slot of a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleInterval {
    pub day: Weekday,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl ScheduleInterval {
    pub fn new(day: Weekday, start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { day, start, end }
    }

    /// Length in whole hours. Zero or negative for inverted intervals.
    pub fn duration_hours(&self) -> i32 {
        self.end.hour() as i32 - self.start.hour() as i32
    }

    /// Half-open overlap test: touching intervals do not overlap.
    pub fn overlaps(&self, other: &ScheduleInterval) -> bool {
        self.day == other.day && self.start < other.end && other.start < self.end
    }
}

/// A lesson with its unit count and weekly intervals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub name: String,
    pub units: u32,
    #[serde(default)]
    pub schedules: Vec<ScheduleInterval>,
}

impl Lesson {
    pub fn new(name: impl Into<String>, units: u32, schedules: Vec<ScheduleInterval>) -> Self {
        Self {
            name: name.into(),
            units,
            schedules,
        }
    }
}

/// Raw interval as submitted by the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleInput {
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
}

/// Raw lesson as submitted by the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LessonInput {
    #[serde(default)]
    pub name: String,
    /// Kept untyped so that `"3"`, `3` and `"۳"` are all accepted.
    #[serde(default)]
    pub units: serde_json::Value,
    #[serde(default)]
    pub schedules: Vec<ScheduleInput>,
}

impl ScheduleInput {
    /// Validate into a typed interval, or `None` if any field is malformed.
    pub fn to_interval(&self) -> Option<ScheduleInterval> {
        let day = self.day.parse::<Weekday>().ok()?;
        let start = self.start_time.parse::<TimeOfDay>().ok()?;
        let end = self.end_time.parse::<TimeOfDay>().ok()?;
        Some(ScheduleInterval::new(day, start, end))
    }
}

impl LessonInput {
    /// Convert into a [`Lesson`], dropping malformed intervals.
    ///
    /// A lesson whose unit count is negative or not an integer keeps its place in
    /// the list (so colours of later lessons do not shift) but contributes no
    /// intervals.
    pub fn into_lesson(self) -> Lesson {
        let units = match parse_units(&self.units) {
            Some(units) => units,
            None => {
                log::warn!(
                    "Lesson '{}' has invalid units {}; skipping its {} interval(s)",
                    self.name,
                    self.units,
                    self.schedules.len()
                );
                return Lesson::new(self.name.trim(), 0, vec![]);
            }
        };

        let schedules = self
            .schedules
            .iter()
            .filter_map(|raw| {
                let interval = raw.to_interval();
                if interval.is_none() {
                    log::debug!(
                        "Skipping malformed interval of '{}': day={:?} start={:?} end={:?}",
                        self.name,
                        raw.day,
                        raw.start_time,
                        raw.end_time
                    );
                }
                interval
            })
            .collect();

        Lesson::new(self.name.trim(), units, schedules)
    }
}

/// Units are non-negative integers. Missing or null means zero.
fn parse_units(value: &serde_json::Value) -> Option<u32> {
    match value {
        serde_json::Value::Null => Some(0),
        serde_json::Value::Number(n) => n.as_u64().and_then(|u| u32::try_from(u).ok()),
        serde_json::Value::String(s) => {
            let trimmed = normalize_digits(s.trim());
            if trimmed.is_empty() {
                Some(0)
            } else {
                trimmed.parse::<u32>().ok()
            }
        }
        _ => None,
    }
}

/// Parse raw lesson inputs from a JSON string.
///
/// Returns an empty list when the payload is not a JSON array of lessons.
pub fn parse_lesson_inputs(json: &str) -> Vec<LessonInput> {
    let trimmed = json.trim();
    if trimmed.is_empty() {
        return vec![];
    }
    match serde_json::from_str::<Vec<LessonInput>>(trimmed) {
        Ok(inputs) => inputs,
        Err(e) => {
            log::warn!("Ignoring malformed lessons payload: {}", e);
            vec![]
        }
    }
}

/// Parse and validate lessons from a JSON string in one step.
pub fn parse_lessons_json_str(json: &str) -> Vec<Lesson> {
    parse_lesson_inputs(json)
        .into_iter()
        .map(LessonInput::into_lesson)
        .collect()
}
