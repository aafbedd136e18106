//! Load and clean a file, print the head of the result and the partition
//! summaries, write nothing.

use anyhow::{bail, Result};
use serde_json::json;
use sppclean::{
    clean::{self, partition, OutputColumn},
    ingest,
};
use std::env;

const HEAD: usize = 10;

fn main() -> Result<()> {
    let input = match env::args().nth(1) {
        Some(p) => p,
        None => bail!("usage: preview <orders.xlsx|orders.csv>"),
    };

    let raw = ingest::load_table(&input)?;
    let cleaned = clean::clean_table(&raw);

    println!(
        "{} rows in, {} rows cleaned\n",
        raw.rows.len(),
        cleaned.rows.len()
    );
    for row in cleaned.rows.iter().take(HEAD) {
        println!(
            "{:<10} {:<12} {:<24} {:<8} {:<10} {}",
            row.cid.as_deref().unwrap_or("-"),
            row.shipment_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".into()),
            row.customer_name.as_deref().unwrap_or("-"),
            row.order_no.as_deref().unwrap_or("-"),
            row.line_no.as_deref().unwrap_or("-"),
            row.description,
        );
    }
    if cleaned.rows.len() > HEAD {
        println!("… {} more", cleaned.rows.len() - HEAD);
    }

    let has_quantity = cleaned.has_column(OutputColumn::Quantity);
    let parts = partition::partition_rows(cleaned.rows);
    let summary = json!({
        "deli": partition::summarize(&parts.deli, has_quantity),
        "foc": partition::summarize(&parts.foc, has_quantity),
    });
    println!("\n{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
