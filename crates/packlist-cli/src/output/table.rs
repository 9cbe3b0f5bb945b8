use packlist_core::export::COLUMNS;
use packlist_core::model::LineRecord;
use packlist_core::summary::Summary;

pub fn print_records(records: &[LineRecord]) {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                r.factory.to_string(),
                r.file.clone(),
                r.shipment_id.clone(),
                r.batch_no.clone(),
                r.colour.clone(),
                r.fabric_type.clone(),
                r.roll_no.clone(),
                r.lot_batch.clone(),
                r.net_weight_kg.to_string(),
                r.net_length_yd.to_string(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = COLUMNS.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let header: Vec<String> = COLUMNS.iter().map(|h| h.to_string()).collect();
    print_row(&header, &widths);
    for row in &rows {
        print_row(row, &widths);
    }
}

fn print_row(cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(&format!("{:<width$}", cell, width = widths[i]));
    }
    println!("{}", line.trim_end());
}

pub fn print_summary(summary: &Summary) {
    println!();
    println!("=== Totals by shipment ===");
    for s in &summary.by_shipment {
        println!(
            "  {}  {} roll(s)  {} kg  {} yd",
            s.shipment_id, s.totals.rolls, s.totals.weight_kg, s.totals.length_yd
        );
    }

    println!();
    println!("=== Totals by batch/colour ===");
    for b in &summary.by_batch_colour {
        println!(
            "  {} / {}  {} roll(s)  {} kg  {} yd",
            b.batch_no, b.colour, b.totals.rolls, b.totals.weight_kg, b.totals.length_yd
        );
    }
}
