//! bump-rs
//!
//! A lightweight Rust library for turning weekly ranking records (music
//! charts and the like) into a time-aligned, rank-indexed dataset for bump
//! charts. Pairs with the `bump` CLI.
//!
//! ### Features
//! - Normalize mixed-format week tokens into one chronological axis
//! - Select the entities worth drawing (global score or per-week union)
//! - Align each entity's ranks across the axis with explicit gap handling
//! - Compute the point scales and label orderings a renderer needs
//!
//! ### Example
//! ```
//! use bump_rs::{ChartConfig, RawRecord, build_chart_data};
//!
//! let record = |uri: &str, rank: u32, week: &str| RawRecord {
//!     rank,
//!     uri: uri.into(),
//!     artist_names: "Artist".into(),
//!     track_name: uri.to_uppercase(),
//!     source: None,
//!     peak_rank: None,
//!     previous_rank: None,
//!     weeks_on_chart: None,
//!     streams: 1_000,
//!     week: week.into(),
//!     quarter: None,
//! };
//! let records = vec![
//!     record("track:a", 1, "2024-01-04"),
//!     record("track:b", 2, "2024-01-04"),
//!     record("track:a", 2, "2024-01-11"),
//!     record("track:b", 1, "2024-01-11"),
//! ];
//!
//! let data = build_chart_data(&records, &ChartConfig::default())?;
//! assert_eq!(data.axis.len(), 2);
//! assert_eq!(data.series.len(), 2);
//! # Ok::<(), bump_rs::ChartError>(())
//! ```

pub mod align;
pub mod axis;
pub mod chart;
pub mod errors;
pub mod ingest;
pub mod layout;
pub mod models;
pub mod select;
pub mod stats;
pub mod storage;
pub mod timekey;

pub use chart::{ChartConfig, ChartData, build_chart_data, build_chart_data_with_layout};
pub use errors::ChartError;
pub use models::{GapPolicy, RawRecord, SelectionStrategy, Series};
pub use timekey::WeekKey;
