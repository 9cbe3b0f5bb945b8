use crate::model::{Factory, LineRecord, RawRow, ShipmentHeader, UNKNOWN};
use crate::parsing::values::parse_quantity;

/// Merge a raw row with the header snapshot into a LineRecord.
///
/// Header fields are copied verbatim with an "N/A" fallback. A row that
/// carries no lot of its own inherits the header's main batch number.
/// Returns None when either quantity fails numeric coercion; the whole
/// record is dropped, never emitted with a substituted zero.
pub fn normalize_row(
    raw: &RawRow,
    header: &ShipmentHeader,
    factory: Factory,
    file: &str,
) -> Option<LineRecord> {
    let net_weight_kg = parse_quantity(&raw.weight)?;
    let net_length_yd = parse_quantity(&raw.length)?;

    let batch_no = header.batch_no.clone().unwrap_or_else(|| UNKNOWN.into());
    let lot_batch = raw.lot_batch.clone().unwrap_or_else(|| batch_no.clone());

    Some(LineRecord {
        factory,
        file: file.to_string(),
        shipment_id: header.shipment_id.clone().unwrap_or_else(|| UNKNOWN.into()),
        batch_no,
        colour: header.colour.clone().unwrap_or_else(|| UNKNOWN.into()),
        fabric_type: header.fabric_type.clone().unwrap_or_else(|| UNKNOWN.into()),
        roll_no: raw.roll_no.clone(),
        lot_batch,
        net_weight_kg,
        net_length_yd,
    })
}
