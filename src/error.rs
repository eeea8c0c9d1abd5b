//! Structured error types for panelfig.
//!
//! Layout failures and backend failures share one enum so an export can
//! propagate either with `?`.

/// All errors that can occur while laying out or rendering a figure.
#[derive(Debug, thiserror::Error)]
pub enum FigureError {
    /// Invalid figure configuration (page size, borders, calibration).
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Drawing surface failure.
    #[error("Render error: {0}")]
    Render(String),

    /// XML writer error from quick-xml.
    #[error("XML writing: {0}")]
    Xml(#[from] quick_xml::Error),

    /// ZIP archive error.
    #[error("ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Figure description (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FigureError>;

impl FigureError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub(crate) fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}
