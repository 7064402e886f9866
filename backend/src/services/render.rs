//! SVG painting of a laid-out weekly chart.
//!
//! The renderer only converts grid units to pixels and emits markup; all
//! placement decisions are made by the layout engine. Persian shaping and bidi
//! ordering are left to the viewer, so text is written in logical order.

use std::fmt::Write as _;

use super::layout::{GridConfig, RenderedRectangle};
use crate::models::Weekday;

pub const DEFAULT_TITLE: &str = "برنامه هفتگی دروس";

const FONT_FAMILY: &str = "Vazirmatn, Tahoma, sans-serif";
const LINE_HEIGHT_EM: f64 = 1.25;

/// Outer margins of the chart, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 40.0,
            right: 180.0,
            top: 150.0,
            bottom: 40.0,
        }
    }
}

/// Paints rectangles, the hour grid, and day and hour labels as SVG.
pub struct ChartRenderer<'a> {
    grid: &'a GridConfig,
    title: &'a str,
    margins: Margins,
}

impl<'a> ChartRenderer<'a> {
    pub fn new(grid: &'a GridConfig, title: &'a str) -> Self {
        Self {
            grid,
            title,
            margins: Margins::default(),
        }
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    fn plot_width(&self) -> f64 {
        self.grid.hour_count() as f64 * self.grid.hour_width_px
    }

    fn plot_height(&self) -> f64 {
        self.grid.day_count() as f64 * self.grid.row_height_px
    }

    /// Total image size in pixels.
    pub fn dimensions(&self) -> (f64, f64) {
        (
            self.margins.left + self.plot_width() + self.margins.right,
            self.margins.top + self.plot_height() + self.margins.bottom,
        )
    }

    /// Pixel x of a horizontal grid coordinate (hours from `hour_start`).
    pub fn x_px(&self, hours: f64) -> f64 {
        let hours = if self.grid.right_to_left {
            self.grid.hour_count() as f64 - hours
        } else {
            hours
        };
        self.margins.left + hours * self.grid.hour_width_px
    }

    /// Pixel y of a vertical grid coordinate (day rows from the top).
    pub fn y_px(&self, rows: f64) -> f64 {
        self.margins.top + rows * self.grid.row_height_px
    }

    /// Render the full SVG document.
    pub fn render(&self, rects: &[RenderedRectangle]) -> String {
        let (width, height) = self.dimensions();
        let mut svg = String::with_capacity(4096 + rects.len() * 512);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.2} {:.2}" font-family="{}">"#,
            width, height, width, height, FONT_FAMILY
        );
        let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white" />"#);

        self.render_title(&mut svg, width);
        self.render_grid(&mut svg);
        self.render_hour_labels(&mut svg);
        self.render_day_labels(&mut svg);
        for rect in rects {
            self.render_lesson(&mut svg, rect);
        }

        svg.push_str("</svg>\n");
        svg
    }

    fn render_title(&self, svg: &mut String, width: f64) {
        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" font-size="30" font-weight="bold" text-anchor="middle" direction="rtl">{}</text>"#,
            width / 2.0,
            self.margins.top / 3.0,
            escape_xml(self.title)
        );
    }

    fn render_grid(&self, svg: &mut String) {
        let left = self.margins.left;
        let right = left + self.plot_width();
        let top = self.margins.top;
        let bottom = top + self.plot_height();

        for h in 0..=self.grid.hour_count() {
            let x = self.x_px(h as f64);
            let _ = writeln!(
                svg,
                r##"<line x1="{x:.2}" y1="{top:.2}" x2="{x:.2}" y2="{bottom:.2}" stroke="#000000" stroke-opacity="0.3" />"##
            );
        }
        for d in 0..=self.grid.day_count() {
            let y = self.y_px(d as f64);
            let _ = writeln!(
                svg,
                r##"<line x1="{left:.2}" y1="{y:.2}" x2="{right:.2}" y2="{y:.2}" stroke="#000000" stroke-opacity="0.3" />"##
            );
        }
        let _ = writeln!(
            svg,
            r##"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="#000000" />"##,
            left,
            top,
            self.plot_width(),
            self.plot_height()
        );
    }

    fn render_hour_labels(&self, svg: &mut String) {
        let y = self.margins.top - 12.0;
        for h in 0..self.grid.hour_count() {
            let hour = self.grid.hour_start as usize + h;
            let _ = writeln!(
                svg,
                r#"<text x="{:.2}" y="{:.2}" font-size="18" font-weight="bold" text-anchor="middle">{:02}:00</text>"#,
                self.x_px(h as f64),
                y,
                hour
            );
        }
    }

    fn render_day_labels(&self, svg: &mut String) {
        let x = self.margins.left + self.plot_width() + self.margins.right / 2.0;
        for day in Weekday::ALL {
            let y = self.y_px(day.index() as f64 + 0.5);
            let _ = writeln!(
                svg,
                r#"<text x="{:.2}" y="{:.2}" font-size="24" font-weight="bold" text-anchor="middle" dominant-baseline="central" direction="rtl">{}</text>"#,
                x,
                y,
                day.persian_name()
            );
        }
    }

    fn render_lesson(&self, svg: &mut String, rect: &RenderedRectangle) {
        // Intervals running past the last column are cut at the grid edge.
        let end = (rect.x_start + rect.width).min(self.grid.hour_count() as f64);
        let x0 = self.x_px(rect.x_start);
        let x1 = self.x_px(end);
        let (left, w) = (x0.min(x1), (x1 - x0).abs());
        let top = self.y_px(rect.y);
        let h = rect.height * self.grid.row_height_px;

        let _ = writeln!(
            svg,
            r##"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" fill-opacity="0.85" stroke="#000000" stroke-width="2" />"##,
            left,
            top,
            w,
            h,
            escape_xml(&rect.color)
        );

        let cx = left + w / 2.0;
        let cy = self.y_px(rect.day_row as f64 + 0.5);
        let lines: Vec<&str> = rect.label_lines().collect();
        let line_step = rect.font_size * LINE_HEIGHT_EM;
        let first_dy = -(lines.len().saturating_sub(1) as f64) * line_step / 2.0;

        let _ = write!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" font-size="{:.1}" font-weight="bold" fill="black" text-anchor="middle" dominant-baseline="central" direction="rtl">"#,
            cx, cy, rect.font_size
        );
        for (i, line) in lines.iter().enumerate() {
            let dy = if i == 0 { first_dy } else { line_step };
            let _ = write!(
                svg,
                r#"<tspan x="{:.2}" dy="{:.2}">{}</tspan>"#,
                cx,
                dy,
                escape_xml(line)
            );
        }
        svg.push_str("</text>\n");
    }
}

/// Escape text for inclusion in XML content or attributes.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Lesson, ScheduleInterval, TimeOfDay};
    use crate::services::layout::layout;

    fn sample_rects(grid: &GridConfig) -> Vec<RenderedRectangle> {
        let lessons = vec![Lesson::new(
            "R&D <1>",
            2,
            vec![ScheduleInterval::new(
                Weekday::Saturday,
                TimeOfDay::from_hour(6).unwrap(),
                TimeOfDay::from_hour(8).unwrap(),
            )],
        )];
        layout(&lessons, grid, None).unwrap()
    }

    #[test]
    fn test_earliest_hour_on_the_right() {
        let grid = GridConfig::default();
        let renderer = ChartRenderer::new(&grid, DEFAULT_TITLE);
        assert!(renderer.x_px(0.0) > renderer.x_px(1.0));
        assert_eq!(renderer.x_px(grid.hour_count() as f64), 40.0);
    }

    #[test]
    fn test_left_to_right_axis() {
        let grid = GridConfig {
            right_to_left: false,
            ..GridConfig::default()
        };
        let renderer = ChartRenderer::new(&grid, DEFAULT_TITLE);
        assert_eq!(renderer.x_px(0.0), 40.0);
    }

    #[test]
    fn test_render_contains_labels_and_escapes() {
        let grid = GridConfig::default();
        let svg = ChartRenderer::new(&grid, DEFAULT_TITLE).render(&sample_rects(&grid));

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(DEFAULT_TITLE));
        assert!(svg.contains("06:00"));
        assert!(svg.contains("22:00"));
        assert!(svg.contains("جمعه"));
        assert!(svg.contains("R&amp;D &lt;1&gt;"));
        assert!(svg.contains("(2 واحد)"));
        assert!(svg.contains("#FF6B6B"));
    }

    #[test]
    fn test_lesson_rect_position() {
        let grid = GridConfig::default();
        let renderer = ChartRenderer::new(&grid, DEFAULT_TITLE);
        let svg = renderer.render(&sample_rects(&grid));
        // 06:00-08:00 occupies the two right-most columns
        let expected_left = renderer.x_px(2.0);
        assert!(svg.contains(&format!(r#"<rect x="{:.2}""#, expected_left)));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml(r#"a<b>&"c'"#), "a&lt;b&gt;&amp;&quot;c&apos;");
    }
}
