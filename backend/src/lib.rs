//! # Weekly Schedule Chart
//!
//! Renders a Persian weekly class-schedule chart from a list of lessons and
//! serves it, together with a form page, over HTTP.
//!
//! ## Features
//!
//! - **Input Parsing**: Lenient parsing of form-submitted lessons into typed
//!   days and hours, dropping malformed intervals
//! - **Conflict Detection**: Same-day, half-open overlap detection between lessons
//! - **Layout**: Placement of each interval on a day/hour grid with labels
//!   shrunk to fit their rectangles
//! - **Rendering**: SVG charts stored under unique filenames
//! - **HTTP API**: Form page, chart download and a JSON API
//!
//! ## Architecture
//!
//! - [`models`]: Days, hours, lessons and the input boundary
//! - [`algorithms`]: Overlap detection
//! - [`services`]: Layout, text fitting, rendering and storage
//! - [`config`]: TOML and environment configuration
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod algorithms;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

pub use error::{ChartError, ChartResult};
