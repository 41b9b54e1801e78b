//! Chart rendering over the JSON history, bitmap backend.

use anyhow::{Result, anyhow};
use log::info;
use plotters::element::Pie;
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;

use crate::history::{DayEntry, History};
use crate::report::platform::platform_arch_label;
use crate::version::VersionKey;

/// Number of most recent releases included in the platform breakdown.
pub const RECENT_RELEASES: usize = 5;

const PALETTE: [RGBColor; 8] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
];

/// Line chart of total downloads per recorded date.
pub fn render_timeline(history: &History, out: &Path) -> Result<()> {
    let dates: Vec<&str> = history.0.keys().map(String::as_str).collect();
    let totals: Vec<u64> = history.0.values().map(|e| e.total_downloads).collect();
    let max_total = totals.iter().copied().max().unwrap_or(0).max(1);
    let x_max = dates.len().saturating_sub(1).max(1);

    let root = BitMapBackend::new(out, (1200, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| anyhow!("Failed to fill timeline chart: {}", e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Total Downloads Over Time", ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(0..x_max, 0u64..max_total + max_total / 10 + 1)
        .map_err(|e| anyhow!("Failed to build timeline chart: {}", e))?;

    chart
        .configure_mesh()
        .x_labels(dates.len().min(12))
        .x_label_formatter(&|idx| dates.get(*idx).map(|d| d.to_string()).unwrap_or_default())
        .x_desc("Date")
        .y_desc("Total Downloads")
        .draw()
        .map_err(|e| anyhow!("Failed to draw timeline mesh: {}", e))?;

    chart
        .draw_series(LineSeries::new(
            totals.iter().copied().enumerate(),
            &BLUE,
        ))
        .map_err(|e| anyhow!("Failed to draw timeline series: {}", e))?;
    chart
        .draw_series(
            totals
                .iter()
                .copied()
                .enumerate()
                .map(|(i, total)| Circle::new((i, total), 4, BLUE.filled())),
        )
        .map_err(|e| anyhow!("Failed to draw timeline markers: {}", e))?;

    root.present()
        .map_err(|e| anyhow!("Failed to write {}: {}", out.display(), e))?;
    info!("Timeline chart saved as {}", out.display());
    Ok(())
}

/// Pie chart of the latest day's downloads grouped by platform and
/// architecture, restricted to the most recent releases by version.
pub fn render_platform_breakdown(day: &DayEntry, date: &str, out: &Path) -> Result<()> {
    let mut tags: Vec<&str> = day.releases.keys().map(String::as_str).collect();
    tags.sort_by_key(|t| VersionKey::parse(t));
    tags.reverse();
    tags.truncate(RECENT_RELEASES);

    let mut groups: BTreeMap<String, u64> = BTreeMap::new();
    for tag in &tags {
        for asset in &day.releases[*tag].assets {
            *groups.entry(platform_arch_label(&asset.asset_name)).or_default() +=
                asset.download_count;
        }
    }

    let grand_total: u64 = groups.values().sum();
    let sizes: Vec<f64> = groups.values().map(|&c| c as f64).collect();
    let labels: Vec<String> = groups
        .iter()
        .map(|(label, &count)| {
            let pct = if grand_total > 0 {
                count as f64 / grand_total as f64 * 100.0
            } else {
                0.0
            };
            format!("{}: {:.1}% ({})", label, pct, count)
        })
        .collect();
    let colors: Vec<RGBColor> = (0..groups.len())
        .map(|i| PALETTE[i % PALETTE.len()])
        .collect();

    let root = BitMapBackend::new(out, (1000, 800)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| anyhow!("Failed to fill platform chart: {}", e))?;
    let root = root
        .titled(
            &format!(
                "Download Distribution by Platform & Architecture ({})",
                date
            ),
            ("sans-serif", 24),
        )
        .map_err(|e| anyhow!("Failed to title platform chart: {}", e))?;

    if grand_total > 0 {
        let center = (500, 400);
        let radius = 280.0;
        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(90.0);
        pie.label_style(("sans-serif", 18).into_font().color(&BLACK));
        root.draw(&pie)
            .map_err(|e| anyhow!("Failed to draw platform pie: {}", e))?;
    }

    root.present()
        .map_err(|e| anyhow!("Failed to write {}: {}", out.display(), e))?;
    info!("Platform breakdown saved as {}", out.display());
    Ok(())
}

/// Bar chart of per-release totals for the latest day, releases ordered by
/// parsed version, oldest to newest.
pub fn render_release_breakdown(day: &DayEntry, date: &str, out: &Path) -> Result<()> {
    let mut entries: Vec<(&str, u64)> = day
        .releases
        .iter()
        .map(|(tag, release)| (tag.as_str(), release.total_downloads))
        .collect();
    entries.sort_by_key(|(tag, _)| VersionKey::parse(tag));

    let tags: Vec<&str> = entries.iter().map(|(tag, _)| *tag).collect();
    let max_total = entries.iter().map(|(_, t)| *t).max().unwrap_or(0).max(1);
    let n = entries.len().max(1);

    let root = BitMapBackend::new(out, (1200, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| anyhow!("Failed to fill release chart: {}", e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Downloads by Release Version ({})", date),
            ("sans-serif", 28),
        )
        .margin(20)
        .x_label_area_size(80)
        .y_label_area_size(80)
        .build_cartesian_2d((0..n).into_segmented(), 0u64..max_total + max_total / 10 + 1)
        .map_err(|e| anyhow!("Failed to build release chart: {}", e))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&|value| {
            let idx = match value {
                SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => *i,
                SegmentValue::Last => return String::new(),
            };
            tags.get(idx).map(|t| t.to_string()).unwrap_or_default()
        })
        .x_desc("Release Version")
        .y_desc("Total Downloads")
        .draw()
        .map_err(|e| anyhow!("Failed to draw release mesh: {}", e))?;

    chart
        .draw_series(entries.iter().enumerate().map(|(i, (_, total))| {
            Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0),
                    (SegmentValue::Exact(i + 1), *total),
                ],
                BLUE.filled(),
            )
        }))
        .map_err(|e| anyhow!("Failed to draw release bars: {}", e))?;

    root.present()
        .map_err(|e| anyhow!("Failed to write {}: {}", out.display(), e))?;
    info!("Release breakdown saved as {}", out.display());
    Ok(())
}
