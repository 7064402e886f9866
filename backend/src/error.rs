//! Error types for the schedule core and chart storage.

/// Result type for chart operations.
pub type ChartResult<T> = Result<T, ChartError>;

/// Error type for parsing, layout and chart storage.
///
/// Per-interval problems (`InvalidDay`, `InvalidTime`) are produced at the input
/// boundary and absorbed there; only `InvalidGrid` and storage errors ever reach
/// a caller of the layout or rendering functions.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    /// Day name not recognised.
    #[error("Unknown day: {0}")]
    InvalidDay(String),

    /// Hour string not parseable or outside `[0, 24)`.
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    /// Grid configuration is unusable.
    #[error("Invalid grid configuration: {0}")]
    InvalidGrid(String),

    /// Text extents cannot be measured in this environment.
    #[error("Text measurement unavailable: {0}")]
    MeasurementUnavailable(String),

    /// Chart filename rejected (path separators, traversal, wrong extension).
    #[error("Invalid chart name: {0}")]
    InvalidChartName(String),

    /// Filesystem error while writing or reading a chart.
    #[error("Chart storage error: {0}")]
    Io(#[from] std::io::Error),
}
