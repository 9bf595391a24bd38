use crate::models::{RankObservation, Series};

/// Discrete point scale: a domain of `len` equally spaced positions mapped
/// onto a pixel interval. No interpolation happens between positions; a
/// single-entry domain sits at the start of the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointScale {
    len: usize,
    range: (f64, f64),
}

impl PointScale {
    pub fn new(len: usize, range: (f64, f64)) -> Self {
        Self { len, range }
    }

    /// Pixel offset of position `i`, or `None` outside the domain.
    pub fn position(&self, i: usize) -> Option<f64> {
        if i >= self.len {
            return None;
        }
        if self.len <= 1 {
            return Some(self.range.0);
        }
        let t = i as f64 / (self.len - 1) as f64;
        Some(self.range.0 + t * (self.range.1 - self.range.0))
    }

    /// Number of positions in the domain.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Distance between adjacent positions (0 for domains of size < 2).
    pub fn step(&self) -> f64 {
        if self.len <= 1 {
            0.0
        } else {
            (self.range.1 - self.range.0) / (self.len - 1) as f64
        }
    }
}

/// Pixel margins around the drawing area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

/// Overall chart geometry. Defaults match the reference chart shell:
/// 900x600 with room for entity labels on both sides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    pub padding: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 600.0,
            margins: Margins {
                left: 180.0,
                right: 180.0,
                top: 40.0,
                bottom: 80.0,
            },
            padding: 25.0,
        }
    }
}

/// The positional scales and label orderings for one chart run.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Axis position index -> x pixel offset.
    pub x: PointScale,
    /// 0-indexed rank slot -> y pixel offset.
    pub y: PointScale,
    /// Entities by ascending rank at their first charted week (left labels).
    pub first_order: Vec<String>,
    /// Entities by ascending rank at their last charted week (right labels).
    pub last_order: Vec<String>,
}

/// Compute scales and label orderings. Pure: nothing here mutates the series
/// or re-runs selection.
///
/// The vertical slot count is `track_count`, widened to cover the worst rank
/// actually observed in `series` so that every observation stays on scale.
/// Label orderings are derived from the final series collection; series with
/// no present observation are left out (they have no rank to order by), and
/// ties keep the selection order of `series` itself.
pub fn compute_layout(
    axis_len: usize,
    track_count: usize,
    series: &[Series],
    opts: &LayoutOptions,
) -> Layout {
    let inner_width = opts.width - opts.margins.left - opts.margins.right - opts.padding * 2.0;
    let x = PointScale::new(axis_len, (0.0, inner_width));

    let worst_rank = series
        .iter()
        .flat_map(|s| s.points.iter().filter_map(|p| p.obs))
        .map(|o| o.rank as usize + 1)
        .max()
        .unwrap_or(0);
    let slots = track_count.max(worst_rank);
    let y = PointScale::new(
        slots,
        (
            opts.margins.top,
            opts.height - opts.margins.bottom - opts.padding,
        ),
    );

    Layout {
        x,
        y,
        first_order: label_order(series, |s| s.first_present().and_then(|p| p.obs)),
        last_order: label_order(series, |s| s.last_present().and_then(|p| p.obs)),
    }
}

fn label_order<F>(series: &[Series], pick: F) -> Vec<String>
where
    F: Fn(&Series) -> Option<RankObservation>,
{
    let mut ranked: Vec<(u32, usize, &str)> = series
        .iter()
        .enumerate()
        .filter_map(|(idx, s)| pick(s).map(|obs| (obs.rank, idx, s.uri.as_str())))
        .collect();
    ranked.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
    ranked.into_iter().map(|(_, _, uri)| uri.to_string()).collect()
}
