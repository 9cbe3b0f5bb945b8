use regex::Regex;
use std::sync::LazyLock;

use crate::extraction::PageContent;
use crate::factory::FactoryExtractor;
use crate::model::RawRow;
use crate::parsing::header::{capture, HeaderCache, HeaderField};
use crate::structured::StructuredExtractor;

static SHIPMENT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i:shipment\s+id)\s*:\s*(\d+)").unwrap());
static BATCH_NO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i:batch\s+no)\s*:\s*(\d+)").unwrap());
static COLOUR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i:color\s+name\s*&\s*no)\s*:\s*([^\n]*)").unwrap());
static FABRIC_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i:fabric\s+type)\s*:\s*([^\n]*)").unwrap());

/// Roll rows: 7-digit roll id, lot batch (digits, dashes, stars), then
/// net weight and net length as plain decimals.
static ROLL_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{7})\s+([\d\-*]+)\s+(\d+\.\d+)\s+(\d+\.\d+)").unwrap());

/// South Asia packing lists carry regular label/value headers and
/// fixed-shape roll rows, all recoverable with positional text patterns.
pub struct SouthAsiaExtractor;

impl FactoryExtractor for SouthAsiaExtractor {
    fn resolve_header(&self, page_text: &str, cache: &mut HeaderCache) {
        if let Some(v) = capture(&SHIPMENT_ID, page_text) {
            cache.record(HeaderField::ShipmentId, v);
        }
        if let Some(v) = capture(&BATCH_NO, page_text) {
            cache.record(HeaderField::BatchNo, v);
        }
        if let Some(v) = capture(&COLOUR, page_text) {
            cache.record(HeaderField::Colour, v);
        }
        if let Some(v) = capture(&FABRIC_TYPE, page_text) {
            cache.record(HeaderField::FabricType, v);
        }
    }

    fn extract_rows(
        &self,
        page: &PageContent,
        _cache: &mut HeaderCache,
        _structured: Option<&dyn StructuredExtractor>,
    ) -> Vec<RawRow> {
        ROLL_ROW
            .captures_iter(&page.text)
            .map(|caps| RawRow {
                roll_no: caps[1].to_string(),
                lot_batch: Some(caps[2].to_string()),
                weight: caps[3].to_string(),
                length: caps[4].to_string(),
            })
            .collect()
    }
}
