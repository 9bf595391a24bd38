use serde::{Deserialize, Serialize};

use crate::timekey::WeekKey;

/// How to pick the set of entities shown on the chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionStrategy {
    /// Rank every entity by a global score summed over all its chart weeks
    /// and keep the best `track_count` entities.
    #[default]
    GlobalScore,
    /// Take the `track_count` best-ranked entities of every week and union
    /// them. The result can exceed `track_count` when the top slots churn.
    PerBucketUnion,
}

/// How weeks without an observation are represented in a series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GapPolicy {
    /// One slot per axis week; missing weeks are explicit `None` entries and
    /// `next` links skip over them.
    #[default]
    Sparse,
    /// Missing weeks are dropped; the series holds only the present entries.
    Dense,
}

/// One raw chart observation as delivered by ingestion (one row = one
/// entity/week pair). Identity is `uri`; two tracks may share a `track_name`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawRecord {
    /// 1-based chart position, smaller is better.
    pub rank: u32,
    pub uri: String,
    pub artist_names: String,
    pub track_name: String,
    /// Optional external link for the entry.
    pub source: Option<String>,
    pub peak_rank: Option<u32>,
    pub previous_rank: Option<u32>,
    pub weeks_on_chart: Option<u32>,
    pub streams: u64,
    /// Raw week token; see `timekey::WeekKey::normalize` for accepted forms.
    pub week: String,
    pub quarter: Option<String>,
}

/// Payload of one present chart position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RankObservation {
    /// 0-indexed rank (chart position minus one).
    pub rank: u32,
    pub streams: u64,
}

/// One slot of a series: the week it belongs to, the observation if the
/// entity charted that week, and the index of the next present slot in the
/// same series. `next` always points strictly forward, so following it
/// terminates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeriesPoint {
    pub week: WeekKey,
    pub obs: Option<RankObservation>,
    pub next: Option<usize>,
}

/// The aligned run of one entity across the week axis.
///
/// Under `GapPolicy::Sparse` there is exactly one point per axis week; under
/// `GapPolicy::Dense` only the present points remain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Series {
    pub uri: String,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    /// Number of weeks the entity actually charted in.
    pub fn present_count(&self) -> usize {
        self.points.iter().filter(|p| p.obs.is_some()).count()
    }

    /// First present point in axis order, if any.
    pub fn first_present(&self) -> Option<&SeriesPoint> {
        self.points.iter().find(|p| p.obs.is_some())
    }

    /// Last present point in axis order, if any.
    pub fn last_present(&self) -> Option<&SeriesPoint> {
        self.points.iter().rev().find(|p| p.obs.is_some())
    }
}
