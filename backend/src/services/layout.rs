//! Time-to-geometry layout of the weekly chart.
//!
//! Coordinates are in grid units: one unit per hour horizontally (measured from
//! `hour_start`) and one unit per day row vertically (row 0 is Saturday). The
//! renderer converts them to pixels with the same `hour_width_px` /
//! `row_height_px` the engine uses to size labels.

use serde::{Deserialize, Serialize};

use super::text_fit::{shrink_to_fit, ShrinkParams, TextMeasurer};
use crate::error::{ChartError, ChartResult};
use crate::models::{Lesson, ScheduleInterval, Weekday};

/// Suffix of the unit-count line, e.g. `(3 واحد)`.
pub const UNITS_SUFFIX: &str = "واحد";

/// Default lesson colours, cycled by lesson position.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FECA57", "#FF9FF3", "#54A0FF", "#FD79A8",
];

/// Grid and label-fitting parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// First hour column (inclusive)
    pub hour_start: u8,
    /// Last hour boundary (exclusive)
    pub hour_end: u8,
    /// Fraction of the row height covered by a lesson rectangle
    pub rect_height_fraction: f64,
    /// Lesson colours, indexed by lesson position modulo length
    pub palette: Vec<String>,
    /// Names longer than this (in characters) may be split over two lines
    pub split_name_threshold: usize,
    /// Starting font size of the shrink loop
    pub max_font_size: f64,
    /// Floor of the shrink loop
    pub min_font_size: f64,
    /// Size used when text cannot be measured
    pub fallback_font_size: f64,
    pub max_shrink_attempts: u32,
    pub shrink_damping: f64,
    /// Pixel width of one hour column
    pub hour_width_px: f64,
    /// Pixel height of one day row
    pub row_height_px: f64,
    pub min_label_padding_px: f64,
    /// Label padding as a fraction of rectangle pixel width
    pub label_padding_ratio: f64,
    /// Draw the earliest hour on the right-hand side
    pub right_to_left: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            hour_start: 6,
            hour_end: 23,
            rect_height_fraction: 0.92,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            split_name_threshold: 20,
            max_font_size: 32.0,
            min_font_size: 10.0,
            fallback_font_size: 14.0,
            max_shrink_attempts: 10,
            shrink_damping: 0.95,
            hour_width_px: 106.0,
            row_height_px: 150.0,
            min_label_padding_px: 6.0,
            label_padding_ratio: 0.06,
            right_to_left: true,
        }
    }
}

impl GridConfig {
    /// Number of hour columns.
    pub fn hour_count(&self) -> usize {
        self.hour_end.saturating_sub(self.hour_start) as usize
    }

    /// Number of day rows.
    pub fn day_count(&self) -> usize {
        Weekday::ALL.len()
    }

    /// Colour of the lesson at `lesson_index`.
    pub fn color_for(&self, lesson_index: usize) -> (usize, &str) {
        let idx = lesson_index % self.palette.len();
        (idx, self.palette[idx].as_str())
    }

    fn shrink_params(&self) -> ShrinkParams {
        ShrinkParams {
            min_font: self.min_font_size,
            max_attempts: self.max_shrink_attempts,
            damping: self.shrink_damping,
        }
    }

    /// Reject configurations the layout cannot work with.
    pub fn validate(&self) -> ChartResult<()> {
        let invalid = |msg: String| Err(ChartError::InvalidGrid(msg));

        if self.hour_start >= self.hour_end || self.hour_end > 24 {
            return invalid(format!(
                "hour range [{}, {}) must be non-empty and within a day",
                self.hour_start, self.hour_end
            ));
        }
        if !(self.rect_height_fraction > 0.0 && self.rect_height_fraction <= 1.0) {
            return invalid(format!(
                "rect_height_fraction {} must be in (0, 1]",
                self.rect_height_fraction
            ));
        }
        if self.palette.is_empty() {
            return invalid("palette must contain at least one colour".to_string());
        }
        if !(self.min_font_size > 0.0 && self.min_font_size <= self.max_font_size) {
            return invalid(format!(
                "font range [{}, {}] is invalid",
                self.min_font_size, self.max_font_size
            ));
        }
        if self.fallback_font_size <= 0.0 {
            return invalid("fallback_font_size must be positive".to_string());
        }
        if !(self.shrink_damping > 0.0 && self.shrink_damping <= 1.0) {
            return invalid(format!(
                "shrink_damping {} must be in (0, 1]",
                self.shrink_damping
            ));
        }
        if self.hour_width_px <= 0.0 || self.row_height_px <= 0.0 {
            return invalid("cell pixel sizes must be positive".to_string());
        }
        Ok(())
    }
}

/// Geometry and label of one lesson interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedRectangle {
    pub lesson_index: usize,
    pub day: Weekday,
    pub day_row: usize,
    /// Hours from `hour_start` to the interval start
    pub x_start: f64,
    /// Duration in hours
    pub width: f64,
    pub y: f64,
    pub height: f64,
    pub color_index: usize,
    pub color: String,
    /// Label lines joined with `\n`
    pub label: String,
    pub font_size: f64,
}

impl RenderedRectangle {
    pub fn label_lines(&self) -> impl Iterator<Item = &str> {
        self.label.split('\n')
    }
}

/// Split a name at its middle word boundary, if it has more than one word.
pub fn split_name(name: &str) -> Option<(String, String)> {
    let words: Vec<&str> = name.split_whitespace().collect();
    if words.len() < 2 {
        return None;
    }
    let mid = words.len() / 2;
    Some((words[..mid].join(" "), words[mid..].join(" ")))
}

/// Label text: the name (optionally on two lines) followed by the unit count.
pub fn build_label(name: &str, units: u32, split: bool) -> String {
    let units_line = format!("({} {})", units, UNITS_SUFFIX);
    match split.then(|| split_name(name)).flatten() {
        Some((first, second)) => format!("{}\n{}\n{}", first, second, units_line),
        None => format!("{}\n{}", name, units_line),
    }
}

/// Places lesson intervals on the grid and sizes their labels.
pub struct ScheduleLayoutEngine<'a> {
    grid: &'a GridConfig,
    measurer: Option<&'a dyn TextMeasurer>,
}

impl<'a> ScheduleLayoutEngine<'a> {
    /// Create an engine. Without a measurer every label gets the fallback size.
    pub fn new(grid: &'a GridConfig, measurer: Option<&'a dyn TextMeasurer>) -> ChartResult<Self> {
        grid.validate()?;
        Ok(Self { grid, measurer })
    }

    /// Lay out every renderable interval, in lesson then interval order.
    pub fn layout(&self, lessons: &[Lesson]) -> Vec<RenderedRectangle> {
        let mut rects = Vec::new();
        for (lesson_index, lesson) in lessons.iter().enumerate() {
            for interval in &lesson.schedules {
                match self.place(lesson_index, lesson, interval) {
                    Some(rect) => rects.push(rect),
                    None => log::debug!(
                        "Skipping interval {} {}-{} of '{}'",
                        interval.day,
                        interval.start,
                        interval.end,
                        lesson.name
                    ),
                }
            }
        }
        rects
    }

    fn place(
        &self,
        lesson_index: usize,
        lesson: &Lesson,
        interval: &ScheduleInterval,
    ) -> Option<RenderedRectangle> {
        let grid = self.grid;
        let start = interval.start.hour();
        let duration = interval.duration_hours();
        if duration <= 0 || start < grid.hour_start || start >= grid.hour_end {
            return None;
        }

        let day_row = interval.day.index();
        let x_start = (start - grid.hour_start) as f64;
        let width = duration as f64;
        let height = grid.rect_height_fraction;
        let y = day_row as f64 + (1.0 - height) / 2.0;

        // The painter cuts rectangles at the last column; size the label to what stays visible.
        let visible_width = width.min(grid.hour_count() as f64 - x_start);
        let (label, font_size) = self.fit_label(lesson, duration, visible_width, height);
        let (color_index, color) = grid.color_for(lesson_index);

        Some(RenderedRectangle {
            lesson_index,
            day: interval.day,
            day_row,
            x_start,
            width,
            y,
            height,
            color_index,
            color: color.to_string(),
            label,
            font_size,
        })
    }

    /// Choose label text and font size for a rectangle of `width` x `height`
    /// grid units.
    fn fit_label(&self, lesson: &Lesson, duration: i32, width: f64, height: f64) -> (String, f64) {
        let grid = self.grid;
        let multi_word = lesson.name.split_whitespace().nth(1).is_some();
        let pre_split = multi_word
            && lesson.name.chars().count() > grid.split_name_threshold
            && duration >= 2;
        let label = build_label(&lesson.name, lesson.units, pre_split);

        let Some(measurer) = self.measurer else {
            return (label, grid.fallback_font_size);
        };

        let rect_w_px = width * grid.hour_width_px;
        let rect_h_px = height * grid.row_height_px;
        let pad_px = grid.min_label_padding_px.max(rect_w_px * grid.label_padding_ratio);
        let avail_w = rect_w_px - pad_px;
        let avail_h = rect_h_px - pad_px;
        let params = grid.shrink_params();

        let first = match shrink_to_fit(measurer, &label, avail_w, avail_h, grid.max_font_size, params) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("Falling back to fixed label size for '{}': {}", lesson.name, e);
                return (label, grid.fallback_font_size);
            }
        };
        if first.fits || pre_split || !multi_word {
            return (label, first.font_size);
        }

        let split_label = build_label(&lesson.name, lesson.units, true);
        match shrink_to_fit(measurer, &split_label, avail_w, avail_h, first.font_size, params) {
            Ok(second) => (split_label, second.font_size),
            Err(e) => {
                log::warn!("Falling back to fixed label size for '{}': {}", lesson.name, e);
                (split_label, grid.fallback_font_size)
            }
        }
    }
}

/// Validate `grid` and lay out `lessons` in one call.
pub fn layout(
    lessons: &[Lesson],
    grid: &GridConfig,
    measurer: Option<&dyn TextMeasurer>,
) -> ChartResult<Vec<RenderedRectangle>> {
    Ok(ScheduleLayoutEngine::new(grid, measurer)?.layout(lessons))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeOfDay;
    use crate::services::text_fit::CharWidthMeasurer;

    fn interval(day: Weekday, start: u8, end: u8) -> ScheduleInterval {
        ScheduleInterval::new(
            day,
            TimeOfDay::from_hour(start).unwrap(),
            TimeOfDay::from_hour(end).unwrap(),
        )
    }

    #[test]
    fn test_geometry_of_single_interval() {
        let grid = GridConfig::default();
        let lessons = vec![Lesson::new("ریاضی", 3, vec![interval(Weekday::Monday, 8, 10)])];
        let rects = layout(&lessons, &grid, None).unwrap();

        assert_eq!(rects.len(), 1);
        let r = &rects[0];
        assert_eq!(r.day_row, 2);
        assert_eq!(r.x_start, 2.0);
        assert_eq!(r.width, 2.0);
        assert!((r.y - 2.04).abs() < 1e-9);
        assert_eq!(r.height, 0.92);
        assert_eq!(r.color, "#FF6B6B");
        assert_eq!(r.label, "ریاضی\n(3 واحد)");
        assert_eq!(r.font_size, 14.0);
    }

    #[test]
    fn test_colour_is_per_lesson_and_cycles() {
        let grid = GridConfig::default();
        let lessons: Vec<Lesson> = (0..10)
            .map(|i| {
                Lesson::new(
                    format!("درس {}", i),
                    1,
                    vec![
                        interval(Weekday::Saturday, 8, 9),
                        interval(Weekday::Sunday, 8, 9),
                    ],
                )
            })
            .collect();
        let rects = layout(&lessons, &grid, None).unwrap();

        assert_eq!(rects.len(), 20);
        assert_eq!(rects[0].color_index, rects[1].color_index);
        assert_eq!(rects[16].color_index, 0);
        assert_eq!(rects[18].color_index, 1);
    }

    #[test]
    fn test_out_of_range_start_skipped() {
        let grid = GridConfig::default();
        let lessons = vec![Lesson::new(
            "ورزش",
            1,
            vec![
                interval(Weekday::Friday, 5, 7),
                interval(Weekday::Friday, 23, 23),
                interval(Weekday::Friday, 22, 23),
            ],
        )];
        let rects = layout(&lessons, &grid, None).unwrap();
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].x_start, 16.0);
    }

    #[test]
    fn test_long_name_split_when_wide_enough() {
        let name = "مبانی برنامه نویسی کامپیوتر پیشرفته";
        assert!(name.chars().count() > 20);

        let grid = GridConfig::default();
        let lessons = vec![Lesson::new(
            name,
            3,
            vec![interval(Weekday::Saturday, 8, 10), interval(Weekday::Sunday, 8, 9)],
        )];
        let rects = layout(&lessons, &grid, None).unwrap();

        assert_eq!(rects[0].label_lines().count(), 3);
        assert_eq!(rects[0].label, "مبانی برنامه\nنویسی کامپیوتر پیشرفته\n(3 واحد)");
        // One-hour interval keeps the name on a single line without measurement
        assert_eq!(rects[1].label_lines().count(), 2);
    }

    #[test]
    fn test_measured_label_retries_with_split() {
        let grid = GridConfig::default();
        let measurer = CharWidthMeasurer::default();
        let lessons = vec![Lesson::new(
            "آزمایشگاه فیزیک پایه",
            1,
            vec![interval(Weekday::Saturday, 8, 9)],
        )];
        let rects = layout(&lessons, &grid, Some(&measurer)).unwrap();

        // 20 chars do not fit a one-hour cell even at the floor size
        let r = &rects[0];
        assert_eq!(r.label, "آزمایشگاه\nفیزیک پایه\n(1 واحد)");
        assert_eq!(r.font_size, grid.min_font_size);
    }

    #[test]
    fn test_measured_short_label_keeps_single_line() {
        let grid = GridConfig::default();
        let measurer = CharWidthMeasurer::default();
        let lessons = vec![Lesson::new("آمار", 2, vec![interval(Weekday::Saturday, 8, 12)])];
        let rects = layout(&lessons, &grid, Some(&measurer)).unwrap();
        assert_eq!(rects[0].label, "آمار\n(2 واحد)");
        assert_eq!(rects[0].font_size, 32.0);
    }

    #[test]
    fn test_label_sized_to_visible_part_of_clipped_interval() {
        let grid = GridConfig {
            hour_end: 20,
            ..GridConfig::default()
        };
        let measurer = CharWidthMeasurer::default();
        let engine = ScheduleLayoutEngine::new(&grid, Some(&measurer)).unwrap();

        let clipped = Lesson::new("ریاضی عمومی یک", 3, vec![interval(Weekday::Monday, 18, 22)]);
        let inside = Lesson::new("ریاضی عمومی یک", 3, vec![interval(Weekday::Monday, 18, 20)]);
        let clipped = engine.layout(&[clipped]).remove(0);
        let inside = engine.layout(&[inside]).remove(0);

        assert_eq!(clipped.width, 4.0);
        assert!(clipped.font_size < grid.max_font_size);
        assert_eq!(clipped.font_size, inside.font_size);
        assert_eq!(clipped.label, inside.label);
    }

    #[test]
    fn test_invalid_grid_is_an_error() {
        let grid = GridConfig {
            hour_start: 10,
            hour_end: 10,
            ..GridConfig::default()
        };
        assert!(matches!(
            layout(&[], &grid, None),
            Err(ChartError::InvalidGrid(_))
        ));

        let grid = GridConfig {
            palette: vec![],
            ..GridConfig::default()
        };
        assert!(grid.validate().is_err());
    }

    #[test]
    fn test_split_name() {
        assert_eq!(split_name("یک"), None);
        assert_eq!(
            split_name("الف ب ج"),
            Some(("الف".to_string(), "ب ج".to_string()))
        );
    }
}
