//! Server-side rendering of the form page.

use crate::services::render::escape_xml;

const TEMPLATE: &str = include_str!("../../templates/index.html");

/// Lessons shown in the form on first visit.
pub const SAMPLE_LESSONS: &str = r#"[
  {
    "name": "ریاضی",
    "units": 3,
    "schedules": [
      {"day": "یکشنبه", "start_time": "10:00", "end_time": "12:00"},
      {"day": "پنج‌شنبه", "start_time": "18:00", "end_time": "20:00"}
    ]
  },
  {
    "name": "فیزیک",
    "units": 2,
    "schedules": [
      {"day": "سه‌شنبه", "start_time": "08:00", "end_time": "10:00"}
    ]
  }
]"#;

/// Values substituted into the page template.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub chart_filename: Option<String>,
    pub conflicts: Vec<String>,
    pub error: Option<String>,
    /// Lessons JSON put back into the form so it can be edited and resubmitted
    pub lessons_data: Option<String>,
}

impl PageContext {
    pub fn render(&self) -> String {
        let error = self
            .error
            .as_deref()
            .map(|e| format!(r#"<div class="error">{}</div>"#, escape_xml(e)))
            .unwrap_or_default();

        let conflicts = if self.conflicts.is_empty() {
            String::new()
        } else {
            let items: String = self
                .conflicts
                .iter()
                .map(|c| format!("<li>{}</li>", escape_xml(c)))
                .collect();
            format!(
                r#"<div id="conflict-warning" class="conflict-warning"><h4>⚠️ تداخل زمانی شناسایی شد:</h4><ul>{}</ul></div>"#,
                items
            )
        };

        let chart = self
            .chart_filename
            .as_deref()
            .map(|name| {
                let name = escape_xml(name);
                format!(
                    r#"<div class="chart"><img src="/chart/{name}" alt="برنامه هفتگی دروس"><a href="/chart/{name}" download>دانلود نمودار</a></div>"#
                )
            })
            .unwrap_or_default();

        let lessons = escape_xml(self.lessons_data.as_deref().unwrap_or(SAMPLE_LESSONS));

        fill_template(
            TEMPLATE,
            &[
                ("ERROR", &error),
                ("CONFLICTS", &conflicts),
                ("CHART", &chart),
                ("LESSONS_DATA", &lessons),
            ],
        )
    }
}

/// Substitute `{{KEY}}` placeholders in a single pass over `template`.
///
/// Inserted values are never scanned again, so user text that looks like a
/// placeholder stays literal. Unknown placeholders are kept as they are.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };

        let key = &after[..close];
        match values.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => {
                out.push_str("{{");
                out.push_str(key);
                out.push_str("}}");
            }
        }
        rest = &after[close + 2..];
    }

    out.push_str(rest);
    out
}
