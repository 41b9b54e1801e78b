//! The tracking pipeline: fetch, filter, diff, persist.
//!
//! One invocation performs a single batch run: fetch releases, flatten the
//! matching ones into per-asset rows, diff against the previous day, then
//! append to the two CSV logs and upsert today's entry in the JSON history.

use anyhow::Result;
use chrono::Local;
use log::info;

use crate::config::Config;
use crate::github::FetchReleases;
use crate::history::{
    ASSET_LOG_FILE, DAILY_TOTAL_FILE, DayEntry, HISTORY_FILE, History, csv_log,
};
use crate::stats::{self, delta};

/// Runs one tracking batch. Any error aborts the whole run; the three
/// writers are independent appends, so an interrupted run leaves at most a
/// partial CSV tail behind.
pub async fn track<F: FetchReleases>(fetcher: &F, config: &Config) -> Result<()> {
    let now = Local::now();
    let timestamp = now.to_rfc3339();
    let date = now.format("%Y-%m-%d").to_string();

    info!("Fetching releases for {}...", config.repo);
    let releases = fetcher.fetch_releases(&config.repo).await?;
    info!("Fetched {} releases", releases.len());

    let mut rows = stats::extract_stats(&releases, config.tag_prefix.as_deref(), &timestamp);
    match &config.tag_prefix {
        Some(prefix) => info!(
            "{} assets across releases matching prefix {:?}",
            rows.len(),
            prefix
        ),
        None => info!("{} assets across all releases", rows.len()),
    }

    let history_path = config.data_dir.join(HISTORY_FILE);
    let mut history = History::load(&history_path)?;
    delta::apply_daily_changes(&mut rows, &history);

    let total_downloads: u64 = rows.iter().map(|r| r.download_count).sum();

    csv_log::append_asset_log(&config.data_dir.join(ASSET_LOG_FILE), &rows)?;
    csv_log::append_daily_total(
        &config.data_dir.join(DAILY_TOTAL_FILE),
        &date,
        &timestamp,
        total_downloads,
    )?;

    history.upsert(&date, DayEntry::from_rows(&rows));
    history.save(&history_path)?;

    println!(
        "Total downloads across {} assets: {}",
        rows.len(),
        total_downloads
    );
    if rows.iter().any(|r| r.daily_change.is_some()) {
        let daily_total: i64 = rows.iter().filter_map(|r| r.daily_change).sum();
        println!("Downloads since the last recorded day: {:+}", daily_total);
    }

    Ok(())
}
