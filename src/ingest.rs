//! Ingestion collaborator: reads the weekly chart CSV export and delivers a
//! fully materialized, immutable record collection to the core.
//!
//! The expected column order is `rank, uri, artist_names, track_name,
//! source, peak_rank, previous_rank, weeks_on_chart, streams, week,
//! quarter`. Headers are matched by name when present; the documented order
//! is the fallback. Rows missing a required field (`rank`, `uri`, `week`)
//! are filtered out — noisy exports are expected, so this is not reported
//! per row.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};

use crate::models::RawRecord;

struct Columns {
    rank: usize,
    uri: usize,
    artist_names: usize,
    track_name: usize,
    source: usize,
    peak_rank: usize,
    previous_rank: usize,
    weeks_on_chart: usize,
    streams: usize,
    week: usize,
    quarter: usize,
}

impl Columns {
    fn detect(headers: &StringRecord) -> Self {
        let find = |name: &str, fallback: usize| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .unwrap_or(fallback)
        };
        Self {
            rank: find("rank", 0),
            uri: find("uri", 1),
            artist_names: find("artist_names", 2),
            track_name: find("track_name", 3),
            source: find("source", 4),
            peak_rank: find("peak_rank", 5),
            previous_rank: find("previous_rank", 6),
            weeks_on_chart: find("weeks_on_chart", 7),
            streams: find("streams", 8),
            week: find("week", 9),
            quarter: find("quarter", 10),
        }
    }
}

/// Read chart records from a CSV file.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    read_records(file).with_context(|| format!("read {}", path.display()))
}

/// Read chart records from any CSV source.
///
/// The reader runs flexible, so rows with a missing trailing column (the
/// export often drops an empty `quarter` cell) still parse. Week tokens are
/// kept raw here; normalization happens in the core.
pub fn read_records<R: Read>(rdr: R) -> Result<Vec<RawRecord>> {
    let mut csv = ReaderBuilder::new().flexible(true).from_reader(rdr);
    let headers = csv.headers().context("read csv header")?.clone();
    let cols = Columns::detect(&headers);

    let mut out = Vec::new();
    let mut skipped = 0usize;
    for row in csv.records() {
        let row = row.context("read csv row")?;
        let field = |i: usize| row.get(i).map(str::trim).filter(|s| !s.is_empty());
        let rank = field(cols.rank)
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|r| *r >= 1);
        let (Some(rank), Some(uri), Some(week)) = (rank, field(cols.uri), field(cols.week)) else {
            skipped += 1;
            continue;
        };
        out.push(RawRecord {
            rank,
            uri: uri.to_string(),
            artist_names: field(cols.artist_names).unwrap_or_default().to_string(),
            track_name: field(cols.track_name).unwrap_or_default().to_string(),
            source: field(cols.source).map(str::to_string),
            peak_rank: field(cols.peak_rank).and_then(|s| s.parse().ok()),
            previous_rank: field(cols.previous_rank).and_then(|s| s.parse().ok()),
            weeks_on_chart: field(cols.weeks_on_chart).and_then(|s| s.parse().ok()),
            streams: field(cols.streams).and_then(|s| s.parse().ok()).unwrap_or(0),
            week: week.to_string(),
            quarter: field(cols.quarter).map(str::to_string),
        });
    }
    if skipped > 0 {
        log::warn!("filtered {skipped} rows missing rank, uri, or week");
    }
    Ok(out)
}
