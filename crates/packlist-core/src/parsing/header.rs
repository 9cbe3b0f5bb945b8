use crate::model::ShipmentHeader;
use regex::Regex;

/// Which header field a matched value feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    ShipmentId,
    BatchNo,
    Colour,
    FabricType,
}

/// Per-document cache of shipment header fields.
///
/// Created empty when a document starts and discarded when the next one
/// begins. A field found on one page persists for subsequent pages of the
/// same document; a page with no match leaves the cached value untouched.
#[derive(Debug, Clone, Default)]
pub struct HeaderCache {
    header: ShipmentHeader,
}

impl HeaderCache {
    pub fn new() -> Self {
        HeaderCache::default()
    }

    /// Record a field value. Empty and "null" values count as not found
    /// and never overwrite an earlier match; anything else overwrites.
    pub fn record(&mut self, field: HeaderField, value: &str) {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("null") {
            return;
        }
        let slot = match field {
            HeaderField::ShipmentId => &mut self.header.shipment_id,
            HeaderField::BatchNo => &mut self.header.batch_no,
            HeaderField::Colour => &mut self.header.colour,
            HeaderField::FabricType => &mut self.header.fabric_type,
        };
        *slot = Some(value.to_string());
    }

    /// Copy of the current known header, taken at row-emission time.
    pub fn snapshot(&self) -> ShipmentHeader {
        self.header.clone()
    }
}

/// Apply a label-anchored pattern to page text and return the first
/// capture group, trimmed. An empty capture counts as "not found", not as
/// a deliberate blank.
pub fn capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    let m = re.captures(text)?.get(1)?;
    let value = m.as_str().trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
