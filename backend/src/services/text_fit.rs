//! Label text measurement and font-size fitting.
//!
//! Measuring text requires a rendering backend, so the layout engine only talks
//! to the [`TextMeasurer`] trait. [`CharWidthMeasurer`] is the built-in
//! approximation used when the chart is rendered to SVG, where the browser does
//! the final shaping.

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Pixel extent of a (possibly multi-line) text block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
}

impl TextExtent {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether this extent fits inside the given box.
    pub fn fits_within(&self, width: f64, height: f64) -> bool {
        self.width <= width && self.height <= height
    }
}

/// Capability to measure rendered text.
pub trait TextMeasurer {
    /// Measure `text` (lines separated by `\n`) at `font_size` points.
    ///
    /// Returns [`ChartError::MeasurementUnavailable`] when the environment cannot
    /// measure text; callers then fall back to a fixed size.
    fn measure(&self, text: &str, font_size: f64) -> ChartResult<TextExtent>;
}

/// Estimates text extents from character counts.
///
/// Each character is assumed to be `char_width_em` font sizes wide and each line
/// `line_height_em` font sizes tall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharWidthMeasurer {
    pub char_width_em: f64,
    pub line_height_em: f64,
}

impl Default for CharWidthMeasurer {
    fn default() -> Self {
        Self {
            char_width_em: 0.55,
            line_height_em: 1.25,
        }
    }
}

impl TextMeasurer for CharWidthMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> ChartResult<TextExtent> {
        if !font_size.is_finite() || font_size <= 0.0 {
            return Err(ChartError::MeasurementUnavailable(format!(
                "font size {} cannot be measured",
                font_size
            )));
        }
        let lines: Vec<&str> = text.split('\n').collect();
        let longest = lines
            .iter()
            // ZWNJ has no advance width
            .map(|line| line.chars().filter(|c| *c != '\u{200C}').count())
            .max()
            .unwrap_or(0);

        Ok(TextExtent::new(
            longest as f64 * self.char_width_em * font_size,
            lines.len() as f64 * self.line_height_em * font_size,
        ))
    }
}

/// Parameters of the shrink loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShrinkParams {
    pub min_font: f64,
    pub max_attempts: u32,
    pub damping: f64,
}

/// Outcome of fitting text into a box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOutcome {
    pub font_size: f64,
    pub fits: bool,
    pub attempts: u32,
}

/// Shrink `text` from `start_size` until it fits `avail_width` x `avail_height`.
///
/// Each step scales the size by `avail_width / measured_width`, damped and
/// floored to whole points. A step that would not reduce the size drops it by
/// one point instead. The loop stops when the text fits, when the size reaches
/// `params.min_font`, or after `params.max_attempts` steps; the size never goes
/// below the floor.
pub fn shrink_to_fit(
    measurer: &dyn TextMeasurer,
    text: &str,
    avail_width: f64,
    avail_height: f64,
    start_size: f64,
    params: ShrinkParams,
) -> ChartResult<FitOutcome> {
    let mut current = start_size.max(params.min_font);
    let mut extent = measurer.measure(text, current)?;
    let mut attempts = 0;

    while !extent.fits_within(avail_width, avail_height)
        && current > params.min_font
        && attempts < params.max_attempts
    {
        let scale = avail_width / extent.width.max(1.0);
        let mut next = (current * scale * params.damping).floor().max(params.min_font);
        if next >= current {
            next = (current - 1.0).max(params.min_font);
        }
        current = next;
        extent = measurer.measure(text, current)?;
        attempts += 1;
    }

    Ok(FitOutcome {
        font_size: current,
        fits: extent.fits_within(avail_width, avail_height),
        attempts,
    })
}
