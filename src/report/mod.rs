//! Reporting stage: charts and a textual summary over the JSON history.
//!
//! Reads only the JSON history produced by the tracker; never touches the
//! network.

use anyhow::Result;
use std::path::Path;

use crate::history::{DayEntry, HISTORY_FILE, History};

pub mod charts;
pub mod platform;

/// Rendered chart file names relative to the data directory.
pub const TIMELINE_FILE: &str = "downloads_timeline.png";
pub const PLATFORM_FILE: &str = "downloads_by_platform.png";
pub const RELEASE_FILE: &str = "downloads_by_release.png";

/// Renders the three charts and prints the summary for the latest day.
/// An empty history prints a notice and succeeds without output files.
pub fn run_report(data_dir: &Path) -> Result<()> {
    let history = History::load(&data_dir.join(HISTORY_FILE))?;

    let Some((date, day)) = history.latest() else {
        println!(
            "No download history found in {}; run `relstat track` first",
            data_dir.display()
        );
        return Ok(());
    };

    print!("{}", summary(date, day));

    charts::render_timeline(&history, &data_dir.join(TIMELINE_FILE))?;
    charts::render_platform_breakdown(day, date, &data_dir.join(PLATFORM_FILE))?;
    charts::render_release_breakdown(day, date, &data_dir.join(RELEASE_FILE))?;

    Ok(())
}

/// Textual summary of the latest day: total, daily change when recorded,
/// and the top five releases by downloads.
pub fn summary(date: &str, day: &DayEntry) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    let _ = writeln!(out, "Summary for {}:", date);
    let _ = writeln!(out, "Total Downloads: {}", day.total_downloads);

    let deltas: Vec<i64> = day
        .releases
        .values()
        .flat_map(|release| release.assets.iter().filter_map(|a| a.daily_change))
        .collect();
    if !deltas.is_empty() {
        let _ = writeln!(out, "Daily Change: {:+}", deltas.iter().sum::<i64>());
    }

    let mut totals: Vec<(&str, u64)> = day
        .releases
        .iter()
        .map(|(tag, release)| (tag.as_str(), release.total_downloads))
        .collect();
    totals.sort_by(|a, b| b.1.cmp(&a.1));

    let _ = writeln!(out, "\nTop Releases:");
    for (tag, downloads) in totals.iter().take(5) {
        let _ = writeln!(out, "  {}: {} downloads", tag, downloads);
    }

    out
}
