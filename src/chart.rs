use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::align::align_all;
use crate::axis::{build_axis, build_axis_strict};
use crate::errors::ChartError;
use crate::layout::{Layout, LayoutOptions, compute_layout};
use crate::models::{GapPolicy, RawRecord, SelectionStrategy, Series};
use crate::select::select_entities;
use crate::timekey::WeekKey;

/// Configuration for one chart run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Selection cap (and minimum vertical slot count).
    pub track_count: usize,
    pub strategy: SelectionStrategy,
    pub gap_policy: GapPolicy,
    /// When set, only records with this quarter value enter the run.
    pub quarter: Option<String>,
    /// Worst possible rank in the source domain; anchors the global score.
    pub max_rank: u32,
    /// Fail on the first malformed week token instead of dropping the record.
    pub strict: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            track_count: 10,
            strategy: SelectionStrategy::default(),
            gap_policy: GapPolicy::default(),
            quarter: None,
            max_rank: 200,
            strict: false,
        }
    }
}

/// Everything a renderer needs for one bump chart: the week axis, the
/// selected entities (selection order), their aligned series, and the
/// pixel-space layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub axis: Vec<WeekKey>,
    pub selected: Vec<String>,
    pub series: Vec<Series>,
    pub layout: Layout,
}

/// Run the full pipeline with default geometry: filter, build the axis,
/// select entities, align their series, and compute the layout.
///
/// The computation is a pure function of `records` and `config`; running it
/// twice on the same input yields identical output.
///
/// ### Errors
/// - `ChartError::EmptyAxis` when no record carries a usable week token
///   (nothing to render).
/// - `ChartError::MalformedTimeToken` in strict mode, for the first
///   unparseable token.
pub fn build_chart_data(
    records: &[RawRecord],
    config: &ChartConfig,
) -> Result<ChartData, ChartError> {
    build_chart_data_with_layout(records, config, &LayoutOptions::default())
}

/// Same as [`build_chart_data`] with explicit chart geometry.
pub fn build_chart_data_with_layout(
    records: &[RawRecord],
    config: &ChartConfig,
    opts: &LayoutOptions,
) -> Result<ChartData, ChartError> {
    let records = filter_quarter(records, config.quarter.as_deref());

    let axis = if config.strict {
        build_axis_strict(&records)?
    } else {
        let dropped = records
            .iter()
            .filter(|r| WeekKey::normalize(&r.week).is_err())
            .count();
        if dropped > 0 {
            log::warn!("dropping {dropped} records with unparseable week tokens");
        }
        build_axis(&records)?
    };

    let selected = select_entities(&records, config.strategy, config.track_count, config.max_rank);
    let series = align_all(&selected, &axis, &records, config.gap_policy);
    let layout = compute_layout(axis.len(), config.track_count, &series, opts);

    Ok(ChartData {
        axis,
        selected,
        series,
        layout,
    })
}

/// Restrict records to one quarter value before any axis or selection work.
pub fn filter_quarter<'a>(records: &'a [RawRecord], quarter: Option<&str>) -> Cow<'a, [RawRecord]> {
    match quarter {
        Some(q) => Cow::Owned(
            records
                .iter()
                .filter(|r| r.quarter.as_deref() == Some(q))
                .cloned()
                .collect(),
        ),
        None => Cow::Borrowed(records),
    }
}
