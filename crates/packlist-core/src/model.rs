use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel for header fields that never appeared in a document.
pub const UNKNOWN: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factory {
    SouthAsia,
    OceanLanka,
}

impl fmt::Display for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Factory::SouthAsia => write!(f, "SOUTH ASIA"),
            Factory::OceanLanka => write!(f, "OCEAN LANKA"),
        }
    }
}

impl Factory {
    pub fn from_str_loose(s: &str) -> Option<Factory> {
        let compact: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        if compact.contains("southasia") {
            Some(Factory::SouthAsia)
        } else if compact.contains("oceanlanka") || compact == "ocean" {
            Some(Factory::OceanLanka)
        } else {
            None
        }
    }
}

/// Header fields of one shipment document.
///
/// Any field may be unknown; readers fall back to [`UNKNOWN`]. Filled
/// incrementally as pages reveal previously-missing fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentHeader {
    pub shipment_id: Option<String>,
    pub batch_no: Option<String>,
    pub colour: Option<String>,
    pub fabric_type: Option<String>,
}

/// One row as matched on a page, before header merge and numeric coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub roll_no: String,
    /// Lot identifier when the row carries its own; otherwise the
    /// normalizer falls back to the header's main batch number.
    pub lot_batch: Option<String>,
    pub weight: String,
    pub length: String,
}

/// One normalized roll/line item. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    pub factory: Factory,
    pub file: String,
    pub shipment_id: String,
    pub batch_no: String,
    pub colour: String,
    pub fabric_type: String,
    pub roll_no: String,
    pub lot_batch: String,
    pub net_weight_kg: Decimal,
    pub net_length_yd: Decimal,
}

/// A matched row that was dropped during normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedRow {
    pub file: String,
    pub page_number: usize,
    pub roll_no: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionWarning {
    pub file: String,
    pub reason: String,
}

/// Result of one batch run: the flat ordered record collection plus a
/// ledger of what was dropped along the way. Records keep document order,
/// then page order, then in-page match order; duplicates across documents
/// are kept as distinct records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Extraction {
    pub records: Vec<LineRecord>,
    pub skipped_rows: Vec<SkippedRow>,
    pub warnings: Vec<ExtractionWarning>,
}
