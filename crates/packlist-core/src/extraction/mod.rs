pub mod pdftotext;

use crate::error::PacklistError;

/// One table grid detected on a page: ordered rows of cell strings, as
/// grouped by the backend's grid-line detection.
pub type TableGrid = Vec<Vec<String>>;

/// Content extracted from a single page of a PDF.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    pub page_number: usize,
    pub text: String,
    /// Detected table grids, when the backend supports grid detection.
    /// Text-only backends leave this empty.
    pub tables: Vec<TableGrid>,
}

/// Trait for PDF text/table extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract content from PDF bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, PacklistError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
