#[derive(Debug, thiserror::Error)]
pub enum PacklistError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("failed to parse document: {0}")]
    ParseError(String),

    #[error("structured extractor failed: {0}")]
    Structured(String),

    #[error("unknown factory '{0}'. Known factories: SOUTH ASIA, OCEAN LANKA")]
    UnknownFactory(String),

    #[error("spreadsheet export failed: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
