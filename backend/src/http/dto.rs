//! Data Transfer Objects for the HTTP API.

use serde::{Deserialize, Serialize};

pub use crate::algorithms::overlap::Conflict;
pub use crate::models::{LessonInput, ScheduleInput};
pub use crate::services::layout::RenderedRectangle;

/// Form body of `POST /generate_chart`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateChartForm {
    /// Lessons as a JSON array, built client-side
    #[serde(default)]
    pub lessons_data: String,
}

/// JSON body of the `/v1` endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LessonsRequest {
    #[serde(default)]
    pub lessons: Vec<LessonInput>,
}

/// A conflict with its display message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictDto {
    pub message: String,
    #[serde(flatten)]
    pub conflict: Conflict,
}

impl From<Conflict> for ConflictDto {
    fn from(conflict: Conflict) -> Self {
        Self {
            message: conflict.message(),
            conflict,
        }
    }
}

/// Response of `POST /v1/conflicts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictsResponse {
    pub conflicts: Vec<ConflictDto>,
    pub total: usize,
}

/// Response of `POST /v1/charts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartResponse {
    pub chart_filename: String,
    /// Path under which the chart is served
    pub chart_url: String,
    pub conflicts: Vec<ConflictDto>,
    pub rectangles: Vec<RenderedRectangle>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
}
