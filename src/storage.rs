use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use csv::WriterBuilder;
use serde::{Deserialize, Serialize};

use crate::align::align_series;
use crate::models::{GapPolicy, RawRecord};
use crate::timekey::WeekKey;

/// One exported track of the interchange document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackExport {
    pub song: String,
    pub artist: String,
    pub uri: String,
    /// 1-indexed rank per axis week, `null` where the track was off chart.
    pub rankings: Vec<Option<u32>>,
    #[serde(rename = "peakRank")]
    pub peak_rank: u32,
    #[serde(rename = "totalWeeks")]
    pub total_weeks: u32,
    pub quarters: Vec<String>,
}

/// The persisted interchange document: `rankings[i]` of every track aligns
/// positionally with `weeks[i]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartDataset {
    pub tracks: Vec<TrackExport>,
    pub weeks: Vec<String>,
}

/// Build the interchange document for `selected` entities over `axis`.
/// Weeks are re-rendered in their canonical ISO form.
pub fn build_dataset(records: &[RawRecord], axis: &[WeekKey], selected: &[String]) -> ChartDataset {
    ChartDataset {
        tracks: selected
            .iter()
            .map(|uri| export_track(uri, axis, records))
            .collect(),
        weeks: axis.iter().map(|w| w.to_string()).collect(),
    }
}

fn export_track(uri: &str, axis: &[WeekKey], records: &[RawRecord]) -> TrackExport {
    let mine: Vec<&RawRecord> = records.iter().filter(|r| r.uri == uri).collect();
    let series = align_series(uri, axis, records, GapPolicy::Sparse);

    let peak_rank = mine.iter().map(|r| r.rank).min().unwrap_or(0);
    // Prefer the source's weeks_on_chart counter; fall back to the number of
    // charted weeks we can see ourselves.
    let total_weeks = mine
        .iter()
        .filter_map(|r| r.weeks_on_chart)
        .max()
        .unwrap_or(series.present_count() as u32);

    let mut quarters: Vec<String> = Vec::new();
    for r in &mine {
        if let Some(q) = r.quarter.as_deref() {
            if !q.is_empty() && !quarters.iter().any(|seen| seen == q) {
                quarters.push(q.to_string());
            }
        }
    }

    TrackExport {
        song: mine.first().map(|r| r.track_name.clone()).unwrap_or_default(),
        artist: mine
            .first()
            .map(|r| r.artist_names.clone())
            .unwrap_or_default(),
        uri: uri.to_string(),
        rankings: series
            .points
            .iter()
            .map(|p| p.obs.map(|o| o.rank + 1))
            .collect(),
        peak_rank,
        total_weeks,
        quarters,
    }
}

/// Save the interchange document as pretty JSON.
pub fn save_dataset_json<P: AsRef<Path>>(dataset: &ChartDataset, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(dataset)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Save cleaned records as CSV with header, in the documented column order.
pub fn save_records_csv<P: AsRef<Path>>(records: &[RawRecord], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize((
        "rank",
        "uri",
        "artist_names",
        "track_name",
        "source",
        "peak_rank",
        "previous_rank",
        "weeks_on_chart",
        "streams",
        "week",
        "quarter",
    ))?;
    for r in records {
        wtr.serialize((
            r.rank,
            &r.uri,
            &r.artist_names,
            &r.track_name,
            &r.source,
            r.peak_rank,
            r.previous_rank,
            r.weeks_on_chart,
            r.streams,
            &r.week,
            &r.quarter,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save cleaned records as a pretty JSON array.
pub fn save_records_json<P: AsRef<Path>>(records: &[RawRecord], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(records)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
