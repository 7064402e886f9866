//! HTTP handlers for the web page and the JSON API.
//!
//! Each handler corresponds to an endpoint and delegates to the chart service
//! layer. Layout and painting are CPU-bound and run on the blocking pool.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Form, Json,
};
use tracing::{info, warn};

use super::dto::{
    ChartResponse, ConflictDto, ConflictsResponse, GenerateChartForm, HealthResponse,
    LessonsRequest,
};
use super::error::AppError;
use super::page::PageContext;
use super::state::AppState;
use crate::algorithms::overlap;
use crate::models::{parse_lesson_inputs, Lesson, LessonInput};
use crate::services::chart_processor::{self, ChartOutcome};
use crate::services::storage::content_type_for;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Run chart generation on the blocking pool.
async fn generate(state: &AppState, lessons: Vec<Lesson>) -> Result<ChartOutcome, AppError> {
    let config = state.config.clone();
    let store = state.store.clone();

    tokio::task::spawn_blocking(move || {
        chart_processor::generate_chart(&lessons, &config.chart, &store)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
    .map_err(AppError::from)
}

fn chart_url(filename: &str) -> String {
    format!("/chart/{}", filename)
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check() -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
    }))
}

// =============================================================================
// Web Page
// =============================================================================

/// GET /
///
/// Empty form pre-filled with sample lessons.
pub async fn index() -> Html<String> {
    Html(PageContext::default().render())
}

/// POST /generate_chart
///
/// Generate a chart from the `lessons_data` form field and render the page with
/// the chart, the conflict warnings and the submitted lessons. A malformed
/// payload is treated as an empty lesson list; failures are shown on the page.
pub async fn generate_chart_form(
    State(state): State<AppState>,
    Form(form): Form<GenerateChartForm>,
) -> Html<String> {
    let lessons: Vec<Lesson> = parse_lesson_inputs(&form.lessons_data)
        .into_iter()
        .map(LessonInput::into_lesson)
        .collect();
    let lessons_data = Some(form.lessons_data);

    let page = match generate(&state, lessons).await {
        Ok(outcome) => PageContext {
            chart_filename: Some(outcome.filename),
            conflicts: outcome.conflicts.iter().map(|c| c.message()).collect(),
            error: None,
            lessons_data,
        },
        Err(e) => {
            let detail = match e {
                AppError::Chart(err) => err.to_string(),
                AppError::Internal(msg) | AppError::BadRequest(msg) | AppError::NotFound(msg) => {
                    msg
                }
            };
            warn!("Chart generation failed: {}", detail);
            PageContext {
                error: Some(format!("خطا در ایجاد نمودار: {}", detail)),
                lessons_data,
                ..PageContext::default()
            }
        }
    };

    Html(page.render())
}

// =============================================================================
// Chart Files
// =============================================================================

/// GET /chart/{filename}
///
/// Serve a generated chart, or 404 when it does not exist.
pub async fn get_chart(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let path = state.store.path_for(&filename)?;

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound("Chart not found".to_string()));
        }
        Err(e) => return Err(AppError::Chart(e.into())),
    };

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type_for(&filename))],
        bytes,
    ))
}

// =============================================================================
// JSON API
// =============================================================================

/// POST /v1/conflicts
///
/// Report clashing intervals without drawing anything.
pub async fn check_conflicts(Json(request): Json<LessonsRequest>) -> HandlerResult<ConflictsResponse> {
    let lessons: Vec<Lesson> = request
        .lessons
        .into_iter()
        .map(LessonInput::into_lesson)
        .collect();

    let conflicts: Vec<ConflictDto> = overlap::detect(&lessons)
        .into_iter()
        .map(Into::into)
        .collect();
    let total = conflicts.len();

    Ok(Json(ConflictsResponse { conflicts, total }))
}

/// POST /v1/charts
///
/// Generate and store a chart. Returns its name and URL together with the
/// conflicts and the computed rectangles.
pub async fn create_chart(
    State(state): State<AppState>,
    Json(request): Json<LessonsRequest>,
) -> Result<(StatusCode, Json<ChartResponse>), AppError> {
    let lessons: Vec<Lesson> = request
        .lessons
        .into_iter()
        .map(LessonInput::into_lesson)
        .collect();

    let outcome = generate(&state, lessons).await?;
    info!(
        "Created chart {} ({} conflict(s))",
        outcome.filename,
        outcome.conflicts.len()
    );

    Ok((
        StatusCode::CREATED,
        Json(ChartResponse {
            chart_url: chart_url(&outcome.filename),
            chart_filename: outcome.filename,
            conflicts: outcome.conflicts.into_iter().map(Into::into).collect(),
            rectangles: outcome.rectangles,
        }),
    ))
}
