use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::Workbook;

use crate::error::PacklistError;
use crate::model::LineRecord;

/// Output column order. The exported sheet carries one row per record
/// under a header row with exactly these titles.
pub const COLUMNS: [&str; 10] = [
    "Factory",
    "File",
    "Delivery/Shipment ID",
    "Main Batch",
    "Color",
    "Fabric Type",
    "Roll No",
    "Lot Batch",
    "Net Weight (Kg)",
    "Net Length (yd)",
];

/// Render the record collection as a single-sheet xlsx workbook.
pub fn to_xlsx(records: &[LineRecord]) -> Result<Vec<u8>, PacklistError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, title) in COLUMNS.iter().enumerate() {
        sheet
            .write_string(0, col as u16, *title)
            .map_err(export_err)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet
            .write_string(row, 0, record.factory.to_string())
            .map_err(export_err)?;
        sheet
            .write_string(row, 1, record.file.as_str())
            .map_err(export_err)?;
        sheet
            .write_string(row, 2, record.shipment_id.as_str())
            .map_err(export_err)?;
        sheet
            .write_string(row, 3, record.batch_no.as_str())
            .map_err(export_err)?;
        sheet
            .write_string(row, 4, record.colour.as_str())
            .map_err(export_err)?;
        sheet
            .write_string(row, 5, record.fabric_type.as_str())
            .map_err(export_err)?;
        sheet
            .write_string(row, 6, record.roll_no.as_str())
            .map_err(export_err)?;
        sheet
            .write_string(row, 7, record.lot_batch.as_str())
            .map_err(export_err)?;
        sheet
            .write_number(row, 8, record.net_weight_kg.to_f64().unwrap_or_default())
            .map_err(export_err)?;
        sheet
            .write_number(row, 9, record.net_length_yd.to_f64().unwrap_or_default())
            .map_err(export_err)?;
    }

    workbook.save_to_buffer().map_err(export_err)
}

fn export_err(e: rust_xlsxwriter::XlsxError) -> PacklistError {
    PacklistError::Export(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Factory;
    use calamine::Reader;
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    #[test]
    fn test_export_reads_back_with_header_row_first() {
        let records = vec![LineRecord {
            factory: Factory::OceanLanka,
            file: "ol.pdf".into(),
            shipment_id: "OL9921".into(),
            batch_no: "B123".into(),
            colour: "B123 NAVY".into(),
            fabric_type: "Single Jersey".into(),
            roll_no: "12".into(),
            lot_batch: "B123".into(),
            net_weight_kg: dec!(14.35),
            net_length_yd: dec!(52.00),
        }];

        let bytes = to_xlsx(&records).unwrap();
        let mut workbook: calamine::Xlsx<_> =
            calamine::open_workbook_from_rs(Cursor::new(bytes)).unwrap();
        let sheet = workbook.worksheet_range("Sheet1").unwrap();

        for (col, title) in COLUMNS.iter().enumerate() {
            assert_eq!(
                sheet.get_value((0, col as u32)),
                Some(&calamine::Data::String(title.to_string()))
            );
        }

        assert_eq!(
            sheet.get_value((1, 0)),
            Some(&calamine::Data::String("OCEAN LANKA".into()))
        );
        assert_eq!(
            sheet.get_value((1, 6)),
            Some(&calamine::Data::String("12".into()))
        );
        assert_eq!(sheet.get_value((1, 8)), Some(&calamine::Data::Float(14.35)));
        assert_eq!(sheet.get_value((1, 9)), Some(&calamine::Data::Float(52.0)));
    }

    #[test]
    fn test_export_empty_records_still_has_header() {
        let bytes = to_xlsx(&[]).unwrap();
        let mut workbook: calamine::Xlsx<_> =
            calamine::open_workbook_from_rs(Cursor::new(bytes)).unwrap();
        let sheet = workbook.worksheet_range("Sheet1").unwrap();
        assert_eq!(
            sheet.get_value((0, 0)),
            Some(&calamine::Data::String("Factory".into()))
        );
        assert_eq!(sheet.get_value((1, 0)), None);
    }
}
