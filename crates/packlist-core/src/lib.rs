pub mod error;
pub mod export;
pub mod extraction;
pub mod factory;
pub mod model;
pub mod parsing;
pub mod structured;
pub mod summary;

use error::PacklistError;
use extraction::PdfExtractor;
use factory::extractor_for;
use model::{Extraction, ExtractionWarning, Factory, SkippedRow};
use parsing::header::HeaderCache;
use parsing::normalize::normalize_row;
use structured::StructuredExtractor;

/// One uploaded document: original file name plus raw bytes.
#[derive(Debug, Clone)]
pub struct InputDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Main API entry point: extract line records from a batch of packing-list
/// documents produced by one factory.
///
/// Documents are processed in order, pages in order within each document.
/// The header cache is scoped per document: a field found on an early page
/// carries forward to later pages and the cache is reset before the next
/// document. A document whose text extraction fails contributes zero
/// records and a warning rather than aborting the batch.
pub fn extract_documents(
    documents: &[InputDocument],
    factory: Factory,
    pdf: &dyn PdfExtractor,
    structured: Option<&dyn StructuredExtractor>,
) -> Result<Extraction, PacklistError> {
    let strategy = extractor_for(factory);
    let mut extraction = Extraction::default();

    for doc in documents {
        let pages = match pdf.extract_pages(&doc.bytes) {
            Ok(pages) => pages,
            Err(e) => {
                extraction.warnings.push(ExtractionWarning {
                    file: doc.name.clone(),
                    reason: format!("document skipped: {e}"),
                });
                continue;
            }
        };

        let mut cache = HeaderCache::new();
        let mut emitted = 0usize;

        for page in &pages {
            strategy.resolve_header(&page.text, &mut cache);

            for raw in strategy.extract_rows(page, &mut cache, structured) {
                match normalize_row(&raw, &cache.snapshot(), factory, &doc.name) {
                    Some(record) => {
                        extraction.records.push(record);
                        emitted += 1;
                    }
                    None => extraction.skipped_rows.push(SkippedRow {
                        file: doc.name.clone(),
                        page_number: page.page_number,
                        roll_no: raw.roll_no.clone(),
                        reason: "quantity failed numeric coercion".into(),
                    }),
                }
            }
        }

        if emitted == 0 {
            extraction.warnings.push(ExtractionWarning {
                file: doc.name.clone(),
                reason: "no extractable rows in document".into(),
            });
        }
    }

    Ok(extraction)
}
