use regex::Regex;
use std::sync::LazyLock;

use crate::extraction::{PageContent, TableGrid};
use crate::factory::FactoryExtractor;
use crate::model::RawRow;
use crate::parsing::header::{capture, HeaderCache, HeaderField};
use crate::parsing::values::{is_numeric_token, parse_quantity};
use crate::structured::StructuredExtractor;

// Labels and values are often split across lines on this form, so each
// pattern tolerates one line break between label and value.
static DELIVERY_SHEET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i:delivery\s+sheet\s+no)\.?[ \t]*:?[ \t]*\r?\n?[ \t]*([A-Z0-9]+)").unwrap());
static FABRIC_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i:fabric\s+type)[ \t]*:?[ \t]*\r?\n?[ \t]*([^\n]+)").unwrap());
static BATCH_NO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i:batch\s+no)\.?[ \t]*:?[ \t]*([A-Z0-9]+)").unwrap());
static COLOUR_NO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i:our\s+colour\s+no\.?|heat\s+setting)[ \t]*:?[ \t]*\r?\n?[ \t]*([^\n]+)").unwrap());

/// Ocean Lanka delivery sheets have an irregular layout: rows come from
/// detected table grids when available, from the structured extractor
/// collaborator as the second choice, and from a delimited-text scan as
/// the last resort. The first strategy yielding at least one row wins.
pub struct OceanLankaExtractor;

impl FactoryExtractor for OceanLankaExtractor {
    fn resolve_header(&self, page_text: &str, cache: &mut HeaderCache) {
        if let Some(v) = capture(&DELIVERY_SHEET, page_text) {
            cache.record(HeaderField::ShipmentId, v);
        }
        if let Some(v) = capture(&FABRIC_TYPE, page_text) {
            cache.record(HeaderField::FabricType, v);
        }
        if let Some(v) = capture(&BATCH_NO, page_text) {
            cache.record(HeaderField::BatchNo, v);
        }
        if let Some(v) = composite_colour(page_text) {
            cache.record(HeaderField::Colour, &v);
        }
    }

    fn extract_rows(
        &self,
        page: &PageContent,
        cache: &mut HeaderCache,
        structured: Option<&dyn StructuredExtractor>,
    ) -> Vec<RawRow> {
        let rows = grid_rows(&page.tables);
        if !rows.is_empty() {
            return rows;
        }

        if let Some(extractor) = structured {
            let rows = structured_rows(extractor, &page.text, cache);
            if !rows.is_empty() {
                return rows;
            }
        }

        delimited_rows(&page.text)
    }
}

/// The finishing-info blob keeps the colour/heat-setting text near, but
/// not inside, the batch cell. The composite colour is the batch token
/// and the colour token joined by a single space; with neither present
/// the field stays unset and reads back as "N/A".
fn composite_colour(text: &str) -> Option<String> {
    match (capture(&BATCH_NO, text), capture(&COLOUR_NO, text)) {
        (Some(batch), Some(colour)) => Some(format!("{batch} {colour}")),
        (Some(batch), None) => Some(batch.to_string()),
        (None, Some(colour)) => Some(colour.to_string()),
        (None, None) => None,
    }
}

/// Strategy 1: detected table grids. A data row starts with a purely
/// numeric roll cell and has at least three cells; cells [0,1,2] are
/// roll, length, weight. Length comes before weight on this factory's
/// printed form, so the cell order here must not be swapped. Rows whose
/// quantity cells fail numeric coercion are skipped.
fn grid_rows(tables: &[TableGrid]) -> Vec<RawRow> {
    let mut rows = Vec::new();
    for table in tables {
        for cells in table {
            if cells.len() < 3 || !is_numeric_token(cells[0].trim()) {
                continue;
            }
            let length = &cells[1];
            let weight = &cells[2];
            if parse_quantity(length).is_none() || parse_quantity(weight).is_none() {
                continue;
            }
            rows.push(RawRow {
                roll_no: cells[0].trim().to_string(),
                lot_batch: None,
                weight: weight.clone(),
                length: length.clone(),
            });
        }
    }
    rows
}

/// Strategy 2: delegated structured extraction. Non-empty header fields
/// in the response feed the cache; any extractor failure yields zero rows
/// so the chain degrades to the delimited fallback.
fn structured_rows(
    extractor: &dyn StructuredExtractor,
    page_text: &str,
    cache: &mut HeaderCache,
) -> Vec<RawRow> {
    let page = match extractor.extract_page(page_text) {
        Ok(page) => page,
        Err(_) => return Vec::new(),
    };

    if let Some(v) = &page.delivery_sheet_no {
        cache.record(HeaderField::ShipmentId, v);
    }
    if let Some(v) = &page.fabric_type {
        cache.record(HeaderField::FabricType, v);
    }
    if let Some(v) = &page.batch_no {
        cache.record(HeaderField::BatchNo, v);
    }
    if let Some(v) = &page.colour {
        cache.record(HeaderField::Colour, v);
    }

    page.rows
        .into_iter()
        .map(|r| RawRow {
            roll_no: r.roll_no,
            lot_batch: None,
            weight: r.weight,
            length: r.length,
        })
        .collect()
}

/// Strategy 3: last-resort delimited scan. A line qualifies when its
/// first token is purely numeric and at least two numeric-bearing tokens
/// follow; the quantity tokens keep the grid column order (length, then
/// weight).
fn delimited_rows(text: &str) -> Vec<RawRow> {
    let mut rows = Vec::new();
    for line in text.lines() {
        let tokens: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.len() < 3 || !is_numeric_token(tokens[0]) {
            continue;
        }
        let numeric: Vec<&str> = tokens[1..]
            .iter()
            .copied()
            .filter(|t| t.chars().any(|c| c.is_ascii_digit()))
            .collect();
        if numeric.len() < 2 {
            continue;
        }
        rows.push(RawRow {
            roll_no: tokens[0].to_string(),
            lot_batch: None,
            weight: numeric[1].to_string(),
            length: numeric[0].to_string(),
        });
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PacklistError;
    use crate::structured::{StructuredPage, StructuredRow};

    fn page(text: &str, tables: Vec<TableGrid>) -> PageContent {
        PageContent {
            page_number: 1,
            text: text.to_string(),
            tables,
        }
    }

    fn grid(rows: &[&[&str]]) -> TableGrid {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    struct StubStructured(StructuredPage);

    impl StructuredExtractor for StubStructured {
        fn extract_page(&self, _page_text: &str) -> Result<StructuredPage, PacklistError> {
            Ok(self.0.clone())
        }

        fn backend_name(&self) -> &str {
            "stub"
        }
    }

    struct FailingStructured;

    impl StructuredExtractor for FailingStructured {
        fn extract_page(&self, _page_text: &str) -> Result<StructuredPage, PacklistError> {
            Err(PacklistError::Structured("quota exhausted".into()))
        }

        fn backend_name(&self) -> &str {
            "failing-stub"
        }
    }

    #[test]
    fn test_resolve_header_across_line_breaks() {
        let text = "Delivery Sheet No.\nOL9921\nFabric Type\nSingle Jersey 30s\nBatch No B123\nOur Colour No. 45 NAVY\n";
        let mut cache = HeaderCache::new();
        OceanLankaExtractor.resolve_header(text, &mut cache);
        let h = cache.snapshot();
        assert_eq!(h.shipment_id.as_deref(), Some("OL9921"));
        assert_eq!(h.fabric_type.as_deref(), Some("Single Jersey 30s"));
        assert_eq!(h.batch_no.as_deref(), Some("B123"));
        assert_eq!(h.colour.as_deref(), Some("B123 45 NAVY"));
    }

    #[test]
    fn test_composite_colour_partial_tokens() {
        assert_eq!(composite_colour("Batch No B123"), Some("B123".to_string()));
        assert_eq!(
            composite_colour("Heat Setting 180C"),
            Some("180C".to_string())
        );
        assert_eq!(composite_colour("nothing relevant"), None);
    }

    #[test]
    fn test_grid_rows_column_order() {
        // cells are roll, length, weight -- in that order
        let rows = grid_rows(&[grid(&[&["12", "52.00", "14.35", "extra"]])]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].roll_no, "12");
        assert_eq!(rows[0].length, "52.00");
        assert_eq!(rows[0].weight, "14.35");
    }

    #[test]
    fn test_grid_rows_reject_non_data_rows() {
        let rows = grid_rows(&[grid(&[
            &["R/No", "Length", "Weight"], // header row, non-numeric roll
            &["12", "52.00"],              // too short
            &["13", "abc", "14.35"],       // bad length cell
            &["14", "52,00", "14,35"],     // decimal commas accepted
        ])]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].roll_no, "14");
    }

    #[test]
    fn test_grid_beats_other_strategies() {
        let p = page("3, 45.00, 12.30", vec![grid(&[&["12", "52.00", "14.35"]])]);
        let mut cache = HeaderCache::new();
        let stub = StubStructured(StructuredPage {
            rows: vec![StructuredRow {
                roll_no: "99".into(),
                weight: "1.00".into(),
                length: "2.00".into(),
            }],
            ..Default::default()
        });
        let rows = OceanLankaExtractor.extract_rows(&p, &mut cache, Some(&stub));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].roll_no, "12");
    }

    #[test]
    fn test_structured_rows_feed_header_cache() {
        let p = page("irregular layout page", Vec::new());
        let mut cache = HeaderCache::new();
        let stub = StubStructured(StructuredPage {
            delivery_sheet_no: Some("OL777".into()),
            batch_no: Some("B77".into()),
            colour: Some("B77 NAVY".into()),
            fabric_type: None,
            rows: vec![StructuredRow {
                roll_no: "5".into(),
                weight: "14.35".into(),
                length: "52.00".into(),
            }],
        });
        let rows = OceanLankaExtractor.extract_rows(&p, &mut cache, Some(&stub));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].roll_no, "5");
        let h = cache.snapshot();
        assert_eq!(h.shipment_id.as_deref(), Some("OL777"));
        assert_eq!(h.batch_no.as_deref(), Some("B77"));
        // absent fields in the response leave the cache untouched
        assert_eq!(h.fabric_type, None);
    }

    #[test]
    fn test_failing_structured_degrades_to_delimited() {
        let p = page("3, 45.00, 12.30", Vec::new());
        let mut cache = HeaderCache::new();
        let rows = OceanLankaExtractor.extract_rows(&p, &mut cache, Some(&FailingStructured));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].roll_no, "3");
        assert_eq!(rows[0].length, "45.00");
        assert_eq!(rows[0].weight, "12.30");
    }

    #[test]
    fn test_delimited_rows_require_two_numeric_tokens() {
        assert!(delimited_rows("3, only-one 45.00").is_empty());
        assert!(delimited_rows("roll 45.00 12.30").is_empty());
        assert_eq!(delimited_rows("3 45.00 12.30").len(), 1);
    }
}
