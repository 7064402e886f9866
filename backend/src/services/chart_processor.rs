//! End-to-end chart generation: conflicts, layout, painting and storage.

use serde::{Deserialize, Serialize};

use super::layout::{RenderedRectangle, ScheduleLayoutEngine};
use super::render::ChartRenderer;
use super::storage::ChartStore;
use super::text_fit::TextMeasurer;
use crate::algorithms::overlap::{self, Conflict};
use crate::config::ChartSettings;
use crate::error::ChartResult;
use crate::models::Lesson;

/// Result of laying out lessons without touching the filesystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPlan {
    pub conflicts: Vec<Conflict>,
    pub rectangles: Vec<RenderedRectangle>,
    pub svg: String,
}

/// Result of a stored chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartOutcome {
    pub filename: String,
    pub conflicts: Vec<Conflict>,
    pub rectangles: Vec<RenderedRectangle>,
}

/// Detect conflicts, lay out and paint the chart.
///
/// Conflicts are reported alongside the chart and never stop it from being drawn.
///
/// # Errors
/// Only an invalid grid configuration fails; malformed intervals were already
/// dropped at the input boundary and unrenderable ones are skipped.
pub fn plan_chart(lessons: &[Lesson], settings: &ChartSettings) -> ChartResult<ChartPlan> {
    let conflicts = overlap::detect(lessons);

    let measurer: Option<&dyn TextMeasurer> = if settings.measure_text {
        Some(&settings.measurer)
    } else {
        None
    };
    let engine = ScheduleLayoutEngine::new(&settings.grid, measurer)?;
    let rectangles = engine.layout(lessons);

    let svg = ChartRenderer::new(&settings.grid, &settings.title).render(&rectangles);

    Ok(ChartPlan {
        conflicts,
        rectangles,
        svg,
    })
}

/// Generate a chart and write it to `store`.
///
/// # Arguments
/// * `lessons` - Validated lessons in submission order
/// * `settings` - Grid, label measurement and title settings
/// * `store` - Destination directory for the chart file
///
/// # Returns
/// * The generated filename with the conflicts and rectangles behind it
pub fn generate_chart(
    lessons: &[Lesson],
    settings: &ChartSettings,
    store: &ChartStore,
) -> ChartResult<ChartOutcome> {
    let plan = plan_chart(lessons, settings)?;
    let filename = store.save(&plan.svg)?;

    log::info!(
        "Generated chart {} for {} lesson(s): {} rectangle(s), {} conflict(s)",
        filename,
        lessons.len(),
        plan.rectangles.len(),
        plan.conflicts.len()
    );

    Ok(ChartOutcome {
        filename,
        conflicts: plan.conflicts,
        rectangles: plan.rectangles,
    })
}
