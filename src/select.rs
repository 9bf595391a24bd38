use std::collections::BTreeMap;

use ahash::{AHashMap, AHashSet};

use crate::models::{RawRecord, SelectionStrategy};
use crate::timekey::WeekKey;

/// Pick the entities to visualize, most prominent first.
///
/// Both strategies ignore records whose week token is malformed and are
/// deterministic for a fixed input: ties are always broken by input order.
/// `GlobalScore` returns at most `track_count` entities; `PerBucketUnion`
/// may return more when different entities occupy the top slots in
/// different weeks.
///
/// `max_rank` is the worst possible rank in the source domain (200 for the
/// weekly top-200 charts); it anchors the global score `max_rank + 1 - rank`.
pub fn select_entities(
    records: &[RawRecord],
    strategy: SelectionStrategy,
    track_count: usize,
    max_rank: u32,
) -> Vec<String> {
    match strategy {
        SelectionStrategy::GlobalScore => by_global_score(records, track_count, max_rank),
        SelectionStrategy::PerBucketUnion => by_bucket_union(records, track_count),
    }
}

fn by_global_score(records: &[RawRecord], track_count: usize, max_rank: u32) -> Vec<String> {
    // score and first-encounter index per entity
    let mut scores: AHashMap<&str, (i64, usize)> = AHashMap::new();
    for r in records {
        if WeekKey::normalize(&r.week).is_err() {
            continue;
        }
        let first_seen = scores.len();
        let entry = scores.entry(r.uri.as_str()).or_insert((0, first_seen));
        entry.0 += i64::from(max_rank) + 1 - i64::from(r.rank);
    }

    let mut ranked: Vec<(&str, i64, usize)> =
        scores.into_iter().map(|(uri, (s, i))| (uri, s, i)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.truncate(track_count);
    ranked.into_iter().map(|(uri, _, _)| uri.to_string()).collect()
}

fn by_bucket_union(records: &[RawRecord], track_count: usize) -> Vec<String> {
    // per-week entries in input order, weeks visited chronologically
    let mut buckets: BTreeMap<WeekKey, Vec<(u32, &str)>> = BTreeMap::new();
    for r in records {
        if let Ok(week) = WeekKey::normalize(&r.week) {
            buckets.entry(week).or_default().push((r.rank, r.uri.as_str()));
        }
    }

    let mut seen: AHashSet<&str> = AHashSet::new();
    let mut out = Vec::new();
    for (_, mut entries) in buckets {
        // stable: equal ranks keep input order
        entries.sort_by_key(|(rank, _)| *rank);
        for (_, uri) in entries.into_iter().take(track_count) {
            if seen.insert(uri) {
                out.push(uri.to_string());
            }
        }
    }
    out
}

/// Every entity that ever charted at or above `threshold`, in first-seen
/// input order. This is the selection rule of the batch converter's
/// threshold mode, not one of the core strategies.
pub fn peak_threshold_entities(records: &[RawRecord], threshold: u32) -> Vec<String> {
    let mut qualifying: AHashSet<&str> = AHashSet::new();
    for r in records {
        if r.rank <= threshold && WeekKey::normalize(&r.week).is_ok() {
            qualifying.insert(r.uri.as_str());
        }
    }
    let mut seen: AHashSet<&str> = AHashSet::new();
    records
        .iter()
        .filter(|r| qualifying.contains(r.uri.as_str()))
        .filter(|r| seen.insert(r.uri.as_str()))
        .map(|r| r.uri.clone())
        .collect()
}
