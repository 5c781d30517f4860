//! Grouping and rollup of raw rows.
//!
//! One pass over the filtered rows builds a rollup per grouping key. With a
//! filter year the key is (sex, age); without one it is (year, sex, age),
//! which is how the stable all-years value-scale maximum is derived.

use std::collections::{BTreeMap, HashMap};

use crate::data::{distinct_in_order, Row, Rollup, RollupKey};
use crate::error::{Error, Result};

/// Group rows into rollups, optionally filtered to one year.
///
/// Per-level counts are last-write-wins when a group holds duplicate rows for
/// the same level, while `total` sums every raw row in the group. The
/// asymmetry is deliberate: stack heights follow the per-level counts, tooltip
/// totals follow the raw sum, and the two may disagree on duplicate input.
///
/// Output order follows first appearance of each group; callers must not rely
/// on it.
///
/// # Errors
///
/// Returns [`Error::EmptyDataset`] if no rows survive the filter.
pub fn aggregate(rows: &[Row], filter_year: Option<&str>) -> Result<Vec<Rollup>> {
    let filtered: Vec<&Row> =
        rows.iter().filter(|r| filter_year.map_or(true, |y| r.year == y)).collect();

    if filtered.is_empty() {
        return Err(Error::EmptyDataset { filter_year: filter_year.map(str::to_string) });
    }

    let mut rollups: Vec<Rollup> = Vec::new();
    let mut index: HashMap<RollupKey, usize> = HashMap::new();

    for row in filtered {
        let key = RollupKey {
            year: filter_year.is_none().then(|| row.year.clone()),
            sex: row.sex.clone(),
            age: row.age.clone(),
        };

        let idx = *index.entry(key.clone()).or_insert_with(|| {
            rollups.push(Rollup { key, per_level_count: BTreeMap::new(), total: 0 });
            rollups.len() - 1
        });

        let rollup = &mut rollups[idx];
        rollup.per_level_count.insert(row.level.clone(), row.count);
        rollup.total += u64::from(row.count);
    }

    Ok(rollups)
}

/// Distinct school levels of the filtered rows, ascending by name.
///
/// This ordering drives both stacking and the legend; the two must agree or
/// segment colors and tooltip labels diverge.
#[must_use]
pub fn level_order(rows: &[Row], filter_year: Option<&str>) -> Vec<String> {
    let mut levels = distinct_in_order(
        rows.iter().filter(|r| filter_year.map_or(true, |y| r.year == y)),
        |r| r.level.as_str(),
    );
    levels.sort();
    levels
}

/// Maximum rollup total across the unfiltered all-years grouping.
///
/// Computed once at chart construction so the value axis stays stable when
/// the selected year changes.
///
/// # Errors
///
/// Returns [`Error::EmptyDataset`] for an empty dataset.
pub fn global_max_total(rows: &[Row]) -> Result<u64> {
    let rollups = aggregate(rows, None)?;
    Ok(rollups.iter().map(|r| r.total).max().unwrap_or(0))
}
