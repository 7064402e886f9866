//! Service layer for chart layout, rendering and storage.
//!
//! This module sits between the typed lesson models and the HTTP handlers.
//! Everything except [`storage`] is pure computation.

pub mod chart_processor;
pub mod layout;
pub mod render;
pub mod storage;
pub mod text_fit;

pub use chart_processor::{generate_chart, plan_chart, ChartOutcome, ChartPlan};
pub use layout::{layout, GridConfig, RenderedRectangle, ScheduleLayoutEngine};
pub use render::ChartRenderer;
pub use storage::ChartStore;
pub use text_fit::{CharWidthMeasurer, TextExtent, TextMeasurer};
