use std::collections::BTreeSet;

use crate::errors::ChartError;
use crate::models::RawRecord;
use crate::timekey::WeekKey;

/// Build the deduplicated week axis present in `records`, ascending by
/// calendar date. Records whose week token does not parse are skipped;
/// tokens of different formats that name the same date collapse to one
/// axis entry.
///
/// ### Errors
/// `ChartError::EmptyAxis` when no record yields a valid week.
pub fn build_axis(records: &[RawRecord]) -> Result<Vec<WeekKey>, ChartError> {
    let keys: BTreeSet<WeekKey> = records
        .iter()
        .filter_map(|r| WeekKey::normalize(&r.week).ok())
        .collect();
    if keys.is_empty() {
        return Err(ChartError::EmptyAxis);
    }
    Ok(keys.into_iter().collect())
}

/// Like [`build_axis`], but fails on the first malformed week token instead
/// of skipping the record.
pub fn build_axis_strict(records: &[RawRecord]) -> Result<Vec<WeekKey>, ChartError> {
    let mut keys = BTreeSet::new();
    for r in records {
        keys.insert(WeekKey::normalize(&r.week)?);
    }
    if keys.is_empty() {
        return Err(ChartError::EmptyAxis);
    }
    Ok(keys.into_iter().collect())
}
