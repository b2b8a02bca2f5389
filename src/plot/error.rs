use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("series is empty")]
    EmptySeries,
    #[error("smoothing window {window} exceeds series length {len}")]
    WindowTooLarge { window: usize, len: usize },
    #[error("smoothing failed: {0}")]
    Smoothing(String),
    #[error("x and y lengths differ: {x} != {y}")]
    LengthMismatch { x: usize, y: usize },
    #[error("failed to read derived table: {0}")]
    Table(String),
    #[error("failed to render plot: {0}")]
    Render(String),
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for PlotError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        PlotError::Render(format!("{value:?}"))
    }
}

impl From<image::ImageError> for PlotError {
    fn from(value: image::ImageError) -> Self {
        PlotError::Render(value.to_string())
    }
}
