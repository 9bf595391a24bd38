use bump_rs::{ChartConfig, ChartError, GapPolicy, RawRecord, SelectionStrategy, WeekKey, build_chart_data};

fn rec(uri: &str, rank: u32, week: &str) -> RawRecord {
    RawRecord {
        rank,
        uri: uri.into(),
        artist_names: "Artist".into(),
        track_name: "Song".into(),
        source: None,
        peak_rank: None,
        previous_rank: None,
        weeks_on_chart: None,
        streams: 100,
        week: week.into(),
        quarter: None,
    }
}

fn sample() -> Vec<RawRecord> {
    vec![
        rec("x", 1, "2024-01-04"),
        rec("y", 5, "2024-01-04"),
        rec("x", 2, "2024-01-11"),
        rec("y", 4, "2024-01-11"),
        rec("x", 3, "2024-01-18"),
        rec("y", 1, "2024-01-18"),
    ]
}

#[test]
fn full_pipeline_produces_one_series_per_selected_entity() {
    let config = ChartConfig {
        track_count: 2,
        ..ChartConfig::default()
    };
    let data = build_chart_data(&sample(), &config).unwrap();

    assert_eq!(data.axis.len(), 3);
    assert_eq!(data.selected, vec!["x".to_string(), "y".to_string()]);
    let series_uris: Vec<&str> = data.series.iter().map(|s| s.uri.as_str()).collect();
    assert_eq!(series_uris, vec!["x", "y"]);
    for s in &data.series {
        assert_eq!(s.points.len(), data.axis.len());
    }
}

#[test]
fn pipeline_is_idempotent() {
    let records = sample();
    for strategy in [SelectionStrategy::GlobalScore, SelectionStrategy::PerBucketUnion] {
        for gap_policy in [GapPolicy::Sparse, GapPolicy::Dense] {
            let config = ChartConfig {
                track_count: 2,
                strategy,
                gap_policy,
                ..ChartConfig::default()
            };
            let a = build_chart_data(&records, &config).unwrap();
            let b = build_chart_data(&records, &config).unwrap();
            assert_eq!(a, b);
        }
    }
}

#[test]
fn malformed_records_never_reach_axis_or_series() {
    let mut records = sample();
    records.push(rec("x", 1, "31/02/2024"));

    let config = ChartConfig {
        track_count: 2,
        ..ChartConfig::default()
    };
    let data = build_chart_data(&records, &config).unwrap();

    assert_eq!(data.axis.len(), 3);
    let x = &data.series[0];
    assert_eq!(x.present_count(), 3);
    for p in &x.points {
        assert!(p.week >= WeekKey::normalize("2024-01-04").unwrap());
        assert!(p.week <= WeekKey::normalize("2024-01-18").unwrap());
    }
}

#[test]
fn strict_mode_fails_on_malformed_tokens() {
    let mut records = sample();
    records.push(rec("x", 1, "31/02/2024"));

    let config = ChartConfig {
        strict: true,
        ..ChartConfig::default()
    };
    assert_eq!(
        build_chart_data(&records, &config).unwrap_err(),
        ChartError::MalformedTimeToken("31/02/2024".into())
    );
}

#[test]
fn empty_input_surfaces_empty_axis() {
    let config = ChartConfig::default();
    assert_eq!(
        build_chart_data(&[], &config).unwrap_err(),
        ChartError::EmptyAxis
    );
}

#[test]
fn quarter_filter_restricts_the_run() {
    let mut records = sample();
    for r in &mut records {
        r.quarter = Some("Q1".into());
    }
    records.push(RawRecord {
        quarter: Some("Q2".into()),
        ..rec("q2-only", 1, "2024-04-04")
    });

    let config = ChartConfig {
        track_count: 5,
        quarter: Some("Q1".into()),
        ..ChartConfig::default()
    };
    let data = build_chart_data(&records, &config).unwrap();
    assert_eq!(data.axis.len(), 3);
    assert!(!data.selected.iter().any(|u| u == "q2-only"));
}
