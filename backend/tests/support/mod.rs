#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use schedule_chart::models::{Lesson, ScheduleInterval, TimeOfDay, Weekday};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the variables on unwind and serializes access to process-global
/// env vars, since Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Build an interval from whole hours.
pub fn interval(day: Weekday, start: u8, end: u8) -> ScheduleInterval {
    ScheduleInterval::new(
        day,
        TimeOfDay::from_hour(start).expect("valid start hour"),
        TimeOfDay::from_hour(end).expect("valid end hour"),
    )
}

/// Build a lesson from `(day, start, end)` triples.
pub fn lesson(name: &str, units: u32, slots: &[(Weekday, u8, u8)]) -> Lesson {
    Lesson::new(
        name,
        units,
        slots
            .iter()
            .map(|(day, start, end)| interval(*day, *start, *end))
            .collect(),
    )
}
