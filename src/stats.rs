use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::models::RawRecord;
use crate::timekey::WeekKey;

/// Chart-run summary for one entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackSummary {
    pub uri: String,
    pub track_name: String,
    pub artist_names: String,
    /// Distinct weeks with an observation.
    pub weeks_charted: usize,
    /// Best (smallest) rank ever reached, 1-based.
    pub peak_rank: u32,
    pub total_streams: u64,
}

struct Acc {
    track_name: String,
    artist_names: String,
    weeks: BTreeSet<WeekKey>,
    peak: u32,
    streams: u64,
}

/// Summarize records per entity. Records with unparseable week tokens are
/// skipped, matching the core's drop policy. Output is ordered best peak
/// rank first, then by streams, then by uri for determinism.
pub fn track_summary(records: &[RawRecord]) -> Vec<TrackSummary> {
    let mut groups: BTreeMap<&str, Acc> = BTreeMap::new();
    for r in records {
        let Ok(week) = WeekKey::normalize(&r.week) else {
            continue;
        };
        let acc = groups.entry(r.uri.as_str()).or_insert_with(|| Acc {
            track_name: r.track_name.clone(),
            artist_names: r.artist_names.clone(),
            weeks: BTreeSet::new(),
            peak: r.rank,
            streams: 0,
        });
        acc.weeks.insert(week);
        acc.peak = acc.peak.min(r.rank);
        acc.streams += r.streams;
    }

    let mut out: Vec<TrackSummary> = groups
        .into_iter()
        .map(|(uri, a)| TrackSummary {
            uri: uri.to_string(),
            track_name: a.track_name,
            artist_names: a.artist_names,
            weeks_charted: a.weeks.len(),
            peak_rank: a.peak,
            total_streams: a.streams,
        })
        .collect();
    out.sort_by(|a, b| {
        a.peak_rank
            .cmp(&b.peak_rank)
            .then_with(|| b.total_streams.cmp(&a.total_streams))
            .then_with(|| a.uri.cmp(&b.uri))
    });
    out
}
