// src/export/mod.rs
use anyhow::{Context, Result};
use chrono::Local;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::clean::{partition::Partitions, CleanedRow, OutputColumn};

/// `SPP_<label>_<timestamp>.csv`, stamped with the generation time so
/// successive exports never collide.
pub fn timestamped_name(label: &str) -> String {
    format!("SPP_{}_{}.csv", label, Local::now().format("%Y%m%d_%H%M%S"))
}

/// Write one partition as CSV: the available output columns in fixed schema
/// order, then each row rendered the way the pipeline re-reads it.
pub fn write_partition(
    columns: &[OutputColumn],
    rows: &[CleanedRow],
    path: &Path,
) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("creating output file {}", path.display()))?;

    wtr.write_record(columns.iter().map(|c| c.name()))
        .context("writing header row")?;
    for row in rows {
        wtr.write_record(columns.iter().map(|c| render_cell(row, *c)))
            .with_context(|| format!("writing row to {}", path.display()))?;
    }
    wtr.flush()
        .with_context(|| format!("flushing {}", path.display()))?;

    Ok(())
}

/// Write both partitions into `out_dir` with timestamped names.
/// Returns the (Deli, FOC) paths.
pub fn export_partitions(
    columns: &[OutputColumn],
    partitions: &Partitions,
    out_dir: &Path,
) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let deli_path = out_dir.join(timestamped_name("Deli"));
    let foc_path = out_dir.join(timestamped_name("FOC"));

    write_partition(columns, &partitions.deli, &deli_path)?;
    write_partition(columns, &partitions.foc, &foc_path)?;

    info!(
        deli = %deli_path.display(),
        foc = %foc_path.display(),
        "wrote partition files"
    );
    Ok((deli_path, foc_path))
}

pub(crate) fn render_cell(row: &CleanedRow, column: OutputColumn) -> String {
    match column {
        OutputColumn::Cid => row.cid.clone().unwrap_or_default(),
        OutputColumn::ShipmentDate => render_date(row.shipment_date),
        OutputColumn::CustomerName => row.customer_name.clone().unwrap_or_default(),
        OutputColumn::ItemType => row.item_type.clone().unwrap_or_default(),
        OutputColumn::LineNo => row.line_no.clone().unwrap_or_default(),
        OutputColumn::OrderNo => row.order_no.clone().unwrap_or_default(),
        OutputColumn::OrderDate => render_date(row.order_date),
        OutputColumn::Description => row.description.clone(),
        OutputColumn::Quantity => render_number(row.quantity),
        OutputColumn::OutstandingQuantity => render_number(row.outstanding_quantity),
        OutputColumn::BackOrderQuantity => render_number(row.back_order_quantity),
        OutputColumn::UnitPrice => render_number(row.unit_price),
        OutputColumn::LineDiscount => render_number(row.line_discount),
        OutputColumn::InvoiceDiscount => render_number(row.invoice_discount),
        OutputColumn::OutstandingOrders => render_number(row.outstanding_orders),
    }
}

fn render_date(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn render_number(value: Option<f64>) -> String {
    match value {
        Some(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", n as i64),
        Some(n) => n.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clean::{clean_table, partition};
    use crate::ingest::{self, RawTable};
    use anyhow::Result;

    fn sample_table() -> RawTable {
        RawTable {
            headers: ["Type", "Shipment Date", "Description", "No.", "Quantity"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows: vec![
                vec!["Acme Deli".into(), "ID123".into(), String::new(), String::new(), String::new()],
                vec![String::new(), "01-02-23".into(), "55555 6/7/2023".into(), "Order No.".into(), String::new()],
                vec!["Item".into(), String::new(), "widget".into(), "10010".into(), "5".into()],
            ],
        }
    }

    #[test]
    fn filenames_carry_the_label_and_a_stamp() {
        let name = timestamped_name("Deli");
        assert!(name.starts_with("SPP_Deli_"));
        assert!(name.ends_with(".csv"));
        // SPP_Deli_YYYYMMDD_HHMMSS.csv
        assert_eq!(name.len(), "SPP_Deli_".len() + 15 + ".csv".len());
    }

    #[test]
    fn written_partition_reloads_with_the_same_shape() -> Result<()> {
        let cleaned = clean_table(&sample_table());
        let parts = partition::partition_rows(cleaned.rows.clone());

        let dir = tempfile::tempdir()?;
        let (deli_path, foc_path) = export_partitions(&cleaned.columns, &parts, dir.path())?;

        let reloaded = ingest::load_table(&deli_path)?;
        assert_eq!(
            reloaded.headers,
            vec![
                "CID",
                "Shipment_Date",
                "Customer_Name",
                "Type",
                "No.",
                "Order_No",
                "Order_Date",
                "Description",
                "Quantity"
            ]
        );
        assert_eq!(reloaded.rows.len(), 1);
        assert_eq!(
            reloaded.rows[0],
            vec![
                "ID123",
                "2023-02-01",
                "Acme Deli",
                "Item",
                "10010",
                "55555",
                "2023-07-06",
                "widget",
                "5"
            ]
        );

        let foc = ingest::load_table(&foc_path)?;
        assert!(foc.rows.is_empty());
        Ok(())
    }

    #[test]
    fn numbers_render_without_spurious_fractions() {
        assert_eq!(render_number(Some(5.0)), "5");
        assert_eq!(render_number(Some(2.5)), "2.5");
        assert_eq!(render_number(None), "");
    }
}
