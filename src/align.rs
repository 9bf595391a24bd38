use ahash::AHashMap;

use crate::models::{GapPolicy, RankObservation, RawRecord, Series, SeriesPoint};
use crate::timekey::WeekKey;

/// Align one entity's observations across the week axis.
///
/// Sparse mode yields one point per axis week with explicit `None` gaps;
/// the `next` index on a present point names the next *present* axis
/// position, skipping gaps, so a connector can bridge a hole in the run.
/// Dense mode drops the gaps and `next` is simply the following entry.
/// Present payloads are identical under both policies.
///
/// An entity with no usable observation yields an all-gap (sparse) or empty
/// (dense) series; that is valid output, not an error.
pub fn align_series(
    uri: &str,
    axis: &[WeekKey],
    records: &[RawRecord],
    policy: GapPolicy,
) -> Series {
    let mine: Vec<&RawRecord> = records.iter().filter(|r| r.uri == uri).collect();
    align_from(uri, axis, &mine, policy)
}

/// Align every selected entity. The output order is exactly the selection
/// order, one series per selected entity.
pub fn align_all(
    selected: &[String],
    axis: &[WeekKey],
    records: &[RawRecord],
    policy: GapPolicy,
) -> Vec<Series> {
    let mut by_entity: AHashMap<&str, Vec<&RawRecord>> = AHashMap::new();
    for r in records {
        by_entity.entry(r.uri.as_str()).or_default().push(r);
    }
    let empty = Vec::new();
    selected
        .iter()
        .map(|uri| {
            let mine = by_entity.get(uri.as_str()).unwrap_or(&empty);
            align_from(uri, axis, mine, policy)
        })
        .collect()
}

fn align_from(uri: &str, axis: &[WeekKey], records: &[&RawRecord], policy: GapPolicy) -> Series {
    // First record per week wins when the source carries duplicates.
    let mut by_week: AHashMap<WeekKey, RankObservation> = AHashMap::with_capacity(records.len());
    for r in records {
        if let Ok(week) = WeekKey::normalize(&r.week) {
            by_week.entry(week).or_insert(RankObservation {
                rank: r.rank.saturating_sub(1),
                streams: r.streams,
            });
        }
    }

    let mut points: Vec<SeriesPoint> = match policy {
        GapPolicy::Sparse => axis
            .iter()
            .map(|&week| SeriesPoint {
                week,
                obs: by_week.get(&week).copied(),
                next: None,
            })
            .collect(),
        GapPolicy::Dense => axis
            .iter()
            .filter_map(|&week| {
                by_week.get(&week).map(|&obs| SeriesPoint {
                    week,
                    obs: Some(obs),
                    next: None,
                })
            })
            .collect(),
    };

    link_present(&mut points);
    Series {
        uri: uri.to_string(),
        points,
    }
}

/// Chain each present point to the next present one. Indices only ever point
/// forward, so the links cannot cycle.
fn link_present(points: &mut [SeriesPoint]) {
    let mut prev: Option<usize> = None;
    for i in 0..points.len() {
        if points[i].obs.is_some() {
            if let Some(p) = prev {
                points[p].next = Some(i);
            }
            prev = Some(i);
        }
    }
}
