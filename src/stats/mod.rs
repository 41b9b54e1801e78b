//! Flattening releases into per-asset download statistics.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::github::Release;

pub mod delta;

/// One per-asset observation, the unit stored in the tabular logs and the
/// JSON history. `daily_change` stays `None` on the first ever run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StatRow {
    pub timestamp: String,
    pub release_tag: String,
    pub asset_name: String,
    pub download_count: u64,
    pub asset_size: u64,
    pub asset_url: String,
    // Absent (not null) in the JSON history until a previous day exists.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub daily_change: Option<i64>,
}

/// Flattens releases into stat rows.
///
/// Keeps releases whose tag starts with `tag_prefix` (no prefix keeps
/// everything) and skips releases without assets. (release_tag, asset_name)
/// is unique per extraction because GitHub asset names are unique within a
/// release.
pub fn extract_stats(
    releases: &[Release],
    tag_prefix: Option<&str>,
    timestamp: &str,
) -> Vec<StatRow> {
    let mut rows = Vec::new();

    for release in releases {
        if let Some(prefix) = tag_prefix {
            if !release.tag_name.starts_with(prefix) {
                continue;
            }
        }

        if release.assets.is_empty() {
            debug!("Skipping release {} with no assets", release.tag_name);
            continue;
        }

        for asset in &release.assets {
            rows.push(StatRow {
                timestamp: timestamp.to_string(),
                release_tag: release.tag_name.clone(),
                asset_name: asset.name.clone(),
                download_count: asset.download_count,
                asset_size: asset.size,
                asset_url: asset.browser_download_url.clone(),
                daily_change: None,
            });
        }
    }

    rows
}
