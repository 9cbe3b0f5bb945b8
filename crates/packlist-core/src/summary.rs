use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::LineRecord;

/// Totals for one group of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupTotals {
    pub rolls: usize,
    pub weight_kg: Decimal,
    pub length_yd: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShipmentTotals {
    pub shipment_id: String,
    #[serde(flatten)]
    pub totals: GroupTotals,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchColourTotals {
    pub batch_no: String,
    pub colour: String,
    #[serde(flatten)]
    pub totals: GroupTotals,
}

/// Aggregate views over the record collection. Derived, never stored:
/// recomputed from the records on every call, in sorted key order.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub by_shipment: Vec<ShipmentTotals>,
    pub by_batch_colour: Vec<BatchColourTotals>,
}

pub fn summarize(records: &[LineRecord]) -> Summary {
    let mut by_shipment: BTreeMap<String, GroupTotals> = BTreeMap::new();
    let mut by_batch_colour: BTreeMap<(String, String), GroupTotals> = BTreeMap::new();

    for record in records {
        let totals = by_shipment.entry(record.shipment_id.clone()).or_default();
        totals.rolls += 1;
        totals.weight_kg += record.net_weight_kg;
        totals.length_yd += record.net_length_yd;

        let totals = by_batch_colour
            .entry((record.batch_no.clone(), record.colour.clone()))
            .or_default();
        totals.rolls += 1;
        totals.weight_kg += record.net_weight_kg;
        totals.length_yd += record.net_length_yd;
    }

    Summary {
        by_shipment: by_shipment
            .into_iter()
            .map(|(shipment_id, totals)| ShipmentTotals {
                shipment_id,
                totals,
            })
            .collect(),
        by_batch_colour: by_batch_colour
            .into_iter()
            .map(|((batch_no, colour), totals)| BatchColourTotals {
                batch_no,
                colour,
                totals,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Factory;
    use rust_decimal_macros::dec;

    fn record(shipment: &str, batch: &str, colour: &str, weight: Decimal, length: Decimal) -> LineRecord {
        LineRecord {
            factory: Factory::SouthAsia,
            file: "a.pdf".into(),
            shipment_id: shipment.into(),
            batch_no: batch.into(),
            colour: colour.into(),
            fabric_type: "N/A".into(),
            roll_no: "1234567".into(),
            lot_batch: batch.into(),
            net_weight_kg: weight,
            net_length_yd: length,
        }
    }

    #[test]
    fn test_summarize_groups_and_sums() {
        let records = vec![
            record("9001", "B1", "NAVY", dec!(10.5), dec!(100.0)),
            record("9001", "B1", "NAVY", dec!(9.5), dec!(50.0)),
            record("9002", "B1", "RED", dec!(1.0), dec!(2.0)),
        ];
        let summary = summarize(&records);

        assert_eq!(summary.by_shipment.len(), 2);
        let first = &summary.by_shipment[0];
        assert_eq!(first.shipment_id, "9001");
        assert_eq!(first.totals.rolls, 2);
        assert_eq!(first.totals.weight_kg, dec!(20.0));
        assert_eq!(first.totals.length_yd, dec!(150.0));

        assert_eq!(summary.by_batch_colour.len(), 2);
        let navy = summary
            .by_batch_colour
            .iter()
            .find(|g| g.colour == "NAVY")
            .unwrap();
        assert_eq!(navy.batch_no, "B1");
        assert_eq!(navy.totals.rolls, 2);
    }

    #[test]
    fn test_batch_colour_keys_are_case_sensitive() {
        let records = vec![
            record("9001", "B1", "NAVY", dec!(1.0), dec!(1.0)),
            record("9001", "B1", "Navy", dec!(1.0), dec!(1.0)),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.by_batch_colour.len(), 2);
    }

    #[test]
    fn test_empty_records_empty_summary() {
        let summary = summarize(&[]);
        assert!(summary.by_shipment.is_empty());
        assert!(summary.by_batch_colour.is_empty());
    }
}
