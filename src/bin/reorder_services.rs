//! One-off batch reorder of the persisted service catalog.
//!
//! Applies a fixed `service_key` → `sort_order` mapping to every matching
//! row in a JSON catalog file, across all locations. Best-effort: rows
//! without a `service_key` are counted as failures and skipped; a key that
//! matches nothing is reported with count 0. Intended for a single manual
//! run, not for the running engine.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde_json::Value;
use tracing::{info, warn};

use praxis_intake::error::CatalogError;

/// The ordering to apply, keyed by service key.
const SERVICE_ORDER: &[(&str, i64)] = &[
    ("termin", 10),
    ("rezept", 20),
    ("ueberweisung", 30),
    ("krankschreibung", 40),
    ("befund", 50),
    ("videosprechstunde", 60),
    ("frage", 70),
];

#[derive(Parser)]
#[command(name = "reorder-services")]
#[command(about = "Apply the fixed service sort order to a JSON service catalog")]
struct Args {
    /// Path to the service catalog file (JSON array of service rows)
    catalog: PathBuf,

    /// Report what would change without writing the file
    #[arg(long)]
    dry_run: bool,
}

/// Per-run tally.
#[derive(Debug, Default, PartialEq, Eq)]
struct Report {
    updated: usize,
    failed: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let raw = fs::read_to_string(&args.catalog)
        .with_context(|| format!("reading catalog file {}", args.catalog.display()))?;
    let mut catalog: Value = serde_json::from_str(&raw).context("parsing catalog JSON")?;

    let report = apply_service_order(&mut catalog, SERVICE_ORDER)?;

    if args.dry_run {
        info!(
            updated = report.updated,
            failed = report.failed,
            "dry run, catalog not written"
        );
        return Ok(());
    }

    let out = serde_json::to_string_pretty(&catalog).context("serializing catalog")?;
    fs::write(&args.catalog, out)
        .with_context(|| format!("writing catalog file {}", args.catalog.display()))?;

    info!(updated = report.updated, failed = report.failed, "reorder complete");
    if report.failed > 0 {
        warn!(failed = report.failed, "some rows could not be updated");
    }
    Ok(())
}

/// Set `sort_order` on every row matching each key; log per-key counts.
fn apply_service_order(
    catalog: &mut Value,
    order: &[(&str, i64)],
) -> Result<Report, CatalogError> {
    let Some(rows) = catalog.as_array_mut() else {
        return Err(CatalogError::NotAnArray);
    };

    let mut report = Report::default();
    for (key, sort_order) in order {
        let mut affected = 0usize;
        for row in rows.iter_mut() {
            let Some(row_key) = row.get("service_key").and_then(Value::as_str) else {
                continue;
            };
            if row_key == *key {
                row["sort_order"] = Value::from(*sort_order);
                affected += 1;
            }
        }
        info!(%key, affected, "applied sort order");
        report.updated += affected;
    }

    // Rows without a service_key can never be addressed; count them once.
    for (index, row) in rows.iter().enumerate() {
        if row.get("service_key").and_then(Value::as_str).is_none() {
            warn!(index, "skipping row without service_key");
            report.failed += 1;
        }
    }
    Ok(report)
}
