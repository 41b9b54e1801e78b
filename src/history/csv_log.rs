//! Append-only CSV logs: per-asset observations and daily totals.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::OpenOptions;
use std::path::Path;

use crate::stats::StatRow;

#[derive(Serialize)]
struct DailyTotalRecord<'a> {
    date: &'a str,
    timestamp: &'a str,
    total_downloads: u64,
}

// StatRow omits an absent daily_change when serialized; the CSV needs the
// column on every row, so the log writes through its own record type.
#[derive(Serialize)]
struct AssetLogRecord<'a> {
    timestamp: &'a str,
    release_tag: &'a str,
    asset_name: &'a str,
    download_count: u64,
    asset_size: u64,
    asset_url: &'a str,
    daily_change: Option<i64>,
}

impl<'a> From<&'a StatRow> for AssetLogRecord<'a> {
    fn from(row: &'a StatRow) -> Self {
        AssetLogRecord {
            timestamp: &row.timestamp,
            release_tag: &row.release_tag,
            asset_name: &row.asset_name,
            download_count: row.download_count,
            asset_size: row.asset_size,
            asset_url: &row.asset_url,
            daily_change: row.daily_change,
        }
    }
}

/// Appends one row per stat to the asset-level log. The header is written
/// only when the file is created.
pub fn append_asset_log(path: &Path, rows: &[StatRow]) -> Result<()> {
    if rows.is_empty() {
        return Ok(());
    }

    let write_header = !path.exists();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open asset log {}", path.display()))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(write_header)
        .from_writer(file);
    for row in rows {
        writer
            .serialize(AssetLogRecord::from(row))
            .context("Failed to write asset log row")?;
    }
    writer.flush().context("Failed to flush asset log")?;
    Ok(())
}

/// Appends a single daily-total row. The header is written only when the
/// file is created.
pub fn append_daily_total(
    path: &Path,
    date: &str,
    timestamp: &str,
    total_downloads: u64,
) -> Result<()> {
    let write_header = !path.exists();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open daily totals log {}", path.display()))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(write_header)
        .from_writer(file);
    writer
        .serialize(DailyTotalRecord {
            date,
            timestamp,
            total_downloads,
        })
        .context("Failed to write daily total row")?;
    writer.flush().context("Failed to flush daily totals log")?;
    Ok(())
}
