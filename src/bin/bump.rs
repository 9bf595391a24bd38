use anyhow::Result;
use bump_rs::chart::{self, ChartConfig};
use bump_rs::{ChartError, GapPolicy, SelectionStrategy};
use bump_rs::{ingest, select, stats, storage};
use clap::{Args, Parser, Subcommand, ValueEnum};
use num_format::{Locale, ToFormattedString};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bump",
    version,
    about = "Transform weekly chart rankings into bump-chart-ready data"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Transform a chart CSV into the aligned JSON dataset (and optionally
    /// save cleaned records and print stats).
    Transform(TransformArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum StrategyArg {
    GlobalScore,
    PerBucketUnion,
}

impl From<StrategyArg> for SelectionStrategy {
    fn from(s: StrategyArg) -> Self {
        match s {
            StrategyArg::GlobalScore => SelectionStrategy::GlobalScore,
            StrategyArg::PerBucketUnion => SelectionStrategy::PerBucketUnion,
        }
    }
}

#[derive(ValueEnum, Clone, Debug)]
enum GapArg {
    Sparse,
    Dense,
}

impl From<GapArg> for GapPolicy {
    fn from(g: GapArg) -> Self {
        match g {
            GapArg::Sparse => GapPolicy::Sparse,
            GapArg::Dense => GapPolicy::Dense,
        }
    }
}

#[derive(Args, Debug)]
struct TransformArgs {
    /// Input CSV with weekly chart rankings.
    #[arg(short, long)]
    input: PathBuf,
    /// Write the aligned dataset JSON to this path.
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Save the cleaned records to a file (csv or json, inferred from the extension).
    #[arg(long)]
    records_out: Option<PathBuf>,
    /// Number of entities to keep (selection cap).
    #[arg(long, default_value_t = 10)]
    track_count: usize,
    /// Selection strategy.
    #[arg(long, value_enum, default_value = "global-score")]
    strategy: StrategyArg,
    /// Gap handling for the aligned series.
    #[arg(long, value_enum, default_value = "sparse")]
    gap_policy: GapArg,
    /// Restrict the input to one quarter value (e.g. Q1) before axis building.
    #[arg(long)]
    quarter: Option<String>,
    /// Keep every track that ever charted at or above this rank instead of
    /// scored selection.
    #[arg(long)]
    peak_threshold: Option<u32>,
    /// Worst rank in the source domain (anchors the global score).
    #[arg(long, default_value_t = 200)]
    max_rank: u32,
    /// Fail on the first malformed week token instead of dropping the row.
    #[arg(long, default_value_t = false)]
    strict: bool,
    /// Print per-track summary statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
    /// Locale for formatting stream counts in --stats output (e.g. en, de).
    #[arg(long, default_value = "en")]
    locale: String,
}

/// Map a user-provided locale tag to a num-format Locale.
fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        _ => &Locale::en,
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Transform(args) => cmd_transform(args),
    }
}

fn cmd_transform(args: TransformArgs) -> Result<()> {
    let records = ingest::load_csv(&args.input)?;
    let config = ChartConfig {
        track_count: args.track_count,
        strategy: args.strategy.clone().into(),
        gap_policy: args.gap_policy.clone().into(),
        quarter: args.quarter.clone(),
        max_rank: args.max_rank,
        strict: args.strict,
    };

    let data = match chart::build_chart_data(&records, &config) {
        Ok(d) => d,
        Err(ChartError::EmptyAxis) => {
            eprintln!(
                "No usable week tokens in {}; nothing to transform.",
                args.input.display()
            );
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let filtered = chart::filter_quarter(&records, config.quarter.as_deref());

    // Threshold mode replaces scored selection for the export.
    let selected = match args.peak_threshold {
        Some(t) => select::peak_threshold_entities(&filtered, t),
        None => data.selected.clone(),
    };

    if let Some(path) = args.out.as_ref() {
        let dataset = storage::build_dataset(&filtered, &data.axis, &selected);
        storage::save_dataset_json(&dataset, path)?;
        eprintln!(
            "Saved {} tracks across {} weeks to {}",
            dataset.tracks.len(),
            dataset.weeks.len(),
            path.display()
        );
    }

    if let Some(path) = args.records_out.as_ref() {
        let fmt = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("csv")
            .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_records_csv(&filtered, path)?,
            "json" => storage::save_records_json(&filtered, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} cleaned rows to {}", filtered.len(), path.display());
    }

    if args.stats {
        let locale = map_locale(&args.locale);
        for s in stats::track_summary(&filtered) {
            println!(
                "peak #{:<3} {} • {}  weeks={} streams={}",
                s.peak_rank,
                s.track_name,
                s.artist_names,
                s.weeks_charted,
                s.total_streams.to_formatted_string(locale)
            );
        }
    }

    Ok(())
}
