use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    /// Input shape is broken (null list or null entry), as opposed to "no data".
    #[error("malformed input: {0}")]
    Structure(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("render failed: {0}")]
    Render(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl ReportError {
    pub fn structure(message: impl ToString) -> Self {
        Self::Structure(message.to_string())
    }

    pub fn config(message: impl ToString) -> Self {
        Self::Config(message.to_string())
    }
}
