use anyhow::{bail, Context, Result};
use sppclean::{
    clean::{self, partition, OutputColumn},
    export, ingest,
};
use std::{env, path::PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    // ─── 2) parse args ───────────────────────────────────────────────
    let mut args = env::args().skip(1);
    let input = match args.next() {
        Some(p) => PathBuf::from(p),
        None => bail!("usage: sppclean <orders.xlsx|orders.csv> [out_dir]"),
    };
    let out_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    // ─── 3) load the raw table ───────────────────────────────────────
    let raw = ingest::load_table(&input)
        .with_context(|| format!("failed to load {}", input.display()))?;

    // ─── 4) clean ────────────────────────────────────────────────────
    let cleaned = clean::clean_table(&raw);
    info!(
        rows_in = raw.rows.len(),
        rows_out = cleaned.rows.len(),
        "cleaned table"
    );

    // ─── 5) partition + summarize ────────────────────────────────────
    let has_quantity = cleaned.has_column(OutputColumn::Quantity);
    let columns = cleaned.columns;
    let parts = partition::partition_rows(cleaned.rows);
    let deli_summary = partition::summarize(&parts.deli, has_quantity);
    let foc_summary = partition::summarize(&parts.foc, has_quantity);

    // ─── 6) export both subsets ──────────────────────────────────────
    let (deli_path, foc_path) = export::export_partitions(&columns, &parts, &out_dir)?;

    info!(
        deli_records = deli_summary.records,
        deli_quantity = ?deli_summary.total_quantity,
        foc_records = foc_summary.records,
        foc_quantity = ?foc_summary.total_quantity,
        deli = %deli_path.display(),
        foc = %foc_path.display(),
        "processing complete"
    );
    Ok(())
}
