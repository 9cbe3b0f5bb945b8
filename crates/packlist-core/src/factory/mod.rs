pub mod ocean_lanka;
pub mod south_asia;

use crate::extraction::PageContent;
use crate::model::{Factory, RawRow};
use crate::parsing::header::HeaderCache;
use crate::structured::StructuredExtractor;

/// Per-factory extraction strategy, selected once per batch.
pub trait FactoryExtractor: Send + Sync {
    /// Scan page text for header fields and update the per-document cache.
    /// Fields with no match on this page are left untouched.
    fn resolve_header(&self, page_text: &str, cache: &mut HeaderCache);

    /// Extract raw rows from one page. Implementations may also feed
    /// header fields discovered along the way back into the cache.
    fn extract_rows(
        &self,
        page: &PageContent,
        cache: &mut HeaderCache,
        structured: Option<&dyn StructuredExtractor>,
    ) -> Vec<RawRow>;
}

pub fn extractor_for(factory: Factory) -> &'static dyn FactoryExtractor {
    match factory {
        Factory::SouthAsia => &south_asia::SouthAsiaExtractor,
        Factory::OceanLanka => &ocean_lanka::OceanLankaExtractor,
    }
}
