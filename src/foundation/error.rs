/// Convenience result alias used across the crate.
pub type FolioResult<T> = Result<T, FolioError>;

/// Top-level error type for configuration, ingestion and rendering.
#[derive(thiserror::Error, Debug)]
pub enum FolioError {
    /// Invalid input or configuration values.
    #[error("validation error: {0}")]
    Validation(String),

    /// A content document could not be ingested.
    #[error(
        "document error: {document}{}: {message}",
        .line.map(|l| format!(" (line {l})")).unwrap_or_default()
    )]
    Document {
        /// Path or name of the offending document.
        document: String,
        /// 1-based line inside the document, when the failure is tied to one.
        line: Option<usize>,
        /// Human-readable failure description.
        message: String,
    },

    /// Raster/surface failures.
    #[error("render error: {0}")]
    Render(String),

    /// Serialization or deserialization failures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FolioError {
    /// Build a [`FolioError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FolioError::Document`] value.
    pub fn document(document: impl Into<String>, line: Option<usize>, msg: impl Into<String>) -> Self {
        Self::Document {
            document: document.into(),
            line,
            message: msg.into(),
        }
    }

    /// Build a [`FolioError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`FolioError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
