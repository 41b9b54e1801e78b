//! On-disk history: the cumulative JSON file and the append-only CSV logs.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::stats::StatRow;

pub mod csv_log;

/// File names relative to the data directory.
pub const HISTORY_FILE: &str = "download_history.json";
pub const ASSET_LOG_FILE: &str = "download_history.csv";
pub const DAILY_TOTAL_FILE: &str = "daily_totals.csv";

/// Per-release slice of one day's observation.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ReleaseEntry {
    pub total_downloads: u64,
    pub assets: Vec<StatRow>,
}

/// One calendar day's observation: day total plus per-release breakdown.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DayEntry {
    pub total_downloads: u64,
    pub releases: BTreeMap<String, ReleaseEntry>,
}

impl DayEntry {
    /// Groups flattened rows by release tag and sums the totals.
    pub fn from_rows(rows: &[StatRow]) -> Self {
        let mut entry = DayEntry::default();
        for row in rows {
            let release = entry.releases.entry(row.release_tag.clone()).or_default();
            release.total_downloads += row.download_count;
            release.assets.push(row.clone());
            entry.total_downloads += row.download_count;
        }
        entry
    }
}

/// The cumulative download history, keyed by "YYYY-MM-DD" date strings.
///
/// The BTreeMap keeps dates in chronological order, which the ISO date
/// format guarantees lexicographically.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct History(pub BTreeMap<String, DayEntry>);

impl History {
    /// Loads the history from `path`. A missing file is an empty history,
    /// not an error; malformed JSON is.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(History::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read history file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse history file {}", path.display()))
    }

    /// Rewrites the whole history file as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize history")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write history file {}", path.display()))
    }

    /// Replaces or inserts the entry for a calendar date. Re-running on the
    /// same date overwrites that date's entry; there is no intra-day merge.
    pub fn upsert(&mut self, date: &str, entry: DayEntry) {
        self.0.insert(date.to_string(), entry);
    }

    /// The chronologically last recorded day, if any.
    pub fn latest(&self) -> Option<(&str, &DayEntry)> {
        self.0.iter().next_back().map(|(date, entry)| (date.as_str(), entry))
    }
}
