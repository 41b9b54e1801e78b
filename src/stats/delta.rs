//! Daily-change calculation against the most recent recorded day.

use std::collections::HashMap;

use crate::history::History;
use crate::stats::StatRow;

/// Sets `daily_change` on every row by diffing against the chronologically
/// last date in the history. An asset missing from the previous day counts
/// from zero. With no prior history the rows are left untouched.
pub fn apply_daily_changes(rows: &mut [StatRow], history: &History) {
    let Some((_, previous)) = history.latest() else {
        return;
    };

    let mut previous_counts: HashMap<(&str, &str), u64> = HashMap::new();
    for (tag, release) in &previous.releases {
        for asset in &release.assets {
            previous_counts.insert((tag.as_str(), asset.asset_name.as_str()), asset.download_count);
        }
    }

    for row in rows.iter_mut() {
        let previous = previous_counts
            .get(&(row.release_tag.as_str(), row.asset_name.as_str()))
            .copied()
            .unwrap_or(0);
        row.daily_change = Some(row.download_count as i64 - previous as i64);
    }
}
