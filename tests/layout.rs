use bump_rs::align::align_all;
use bump_rs::axis::build_axis;
use bump_rs::layout::{Layout, LayoutOptions, Margins, PointScale, compute_layout};
use bump_rs::{GapPolicy, RawRecord};

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

fn square_opts() -> LayoutOptions {
    LayoutOptions {
        width: 300.0,
        height: 200.0,
        margins: Margins {
            left: 0.0,
            right: 0.0,
            top: 0.0,
            bottom: 0.0,
        },
        padding: 0.0,
    }
}

#[test]
fn point_scale_spaces_positions_evenly() {
    let scale = PointScale::new(5, (0.0, 100.0));
    assert_eq!(scale.position(0), Some(0.0));
    assert_eq!(scale.position(2), Some(50.0));
    assert_eq!(scale.position(4), Some(100.0));
    assert_eq!(scale.position(5), None);
    assert_eq!(scale.step(), 25.0);
}

#[test]
fn single_position_sits_at_the_range_start() {
    let scale = PointScale::new(1, (10.0, 90.0));
    assert_eq!(scale.position(0), Some(10.0));
    assert_eq!(scale.step(), 0.0);
}

fn two_track_layout() -> Layout {
    // X ranks 1,2,3 and Y ranks 5,4,1; track_count 2.
    let records = vec![
        rec("x", 1, "2024-01-04"),
        rec("y", 5, "2024-01-04"),
        rec("x", 2, "2024-01-11"),
        rec("y", 4, "2024-01-11"),
        rec("x", 3, "2024-01-18"),
        rec("y", 1, "2024-01-18"),
    ];
    let axis = build_axis(&records).unwrap();
    let selected = vec!["x".to_string(), "y".to_string()];
    let series = align_all(&selected, &axis, &records, GapPolicy::Sparse);
    compute_layout(axis.len(), 2, &series, &square_opts())
}

#[test]
fn y_scale_puts_observed_extremes_at_the_range_ends() {
    let layout = two_track_layout();
    // Worst observed 0-indexed rank is 4, so the slot count widens to 5 and
    // ranks 0 and 4 land on the two extreme pixel offsets.
    assert_eq!(layout.y.len(), 5);
    assert_eq!(layout.y.position(0), Some(0.0));
    assert_eq!(layout.y.position(4), Some(200.0));
}

#[test]
fn x_scale_covers_the_axis() {
    let layout = two_track_layout();
    assert_eq!(layout.x.len(), 3);
    assert_eq!(layout.x.position(0), Some(0.0));
    assert_eq!(layout.x.position(2), Some(300.0));
}

#[test]
fn margins_and_padding_shrink_the_ranges() {
    let records = vec![rec("x", 1, "2024-01-04"), rec("x", 2, "2024-01-11")];
    let axis = build_axis(&records).unwrap();
    let selected = vec!["x".to_string()];
    let series = align_all(&selected, &axis, &records, GapPolicy::Sparse);
    let layout = compute_layout(axis.len(), 2, &series, &LayoutOptions::default());

    // Defaults: 900 wide with 180+180 margins and 25 padding each side.
    assert_eq!(layout.x.position(0), Some(0.0));
    assert_eq!(layout.x.position(1), Some(900.0 - 180.0 - 180.0 - 50.0));
    // 600 high with 40 top, 80 bottom, 25 padding.
    assert_eq!(layout.y.position(0), Some(40.0));
    assert_eq!(layout.y.position(1), Some(600.0 - 80.0 - 25.0));
}

#[test]
fn label_orders_follow_first_and_last_ranks() {
    let layout = two_track_layout();
    // First week: X at rank 0, Y at rank 4. Last week: Y at rank 0, X at 2.
    assert_eq!(layout.first_order, vec!["x".to_string(), "y".to_string()]);
    assert_eq!(layout.last_order, vec!["y".to_string(), "x".to_string()]);
}

#[test]
fn label_order_ties_break_by_selection_order() {
    // Both entities open and close at the same rank in disjoint weeks.
    let records = vec![
        rec("second", 1, "2024-01-11"),
        rec("first", 1, "2024-01-04"),
    ];
    let axis = build_axis(&records).unwrap();
    let selected = vec!["first".to_string(), "second".to_string()];
    let series = align_all(&selected, &axis, &records, GapPolicy::Sparse);
    let layout = compute_layout(axis.len(), 2, &series, &square_opts());
    assert_eq!(layout.first_order, vec!["first".to_string(), "second".to_string()]);
    assert_eq!(layout.last_order, vec!["first".to_string(), "second".to_string()]);
}

#[test]
fn all_absent_series_stay_out_of_label_orders() {
    let records = vec![rec("x", 1, "2024-01-04")];
    let axis = build_axis(&records).unwrap();
    let selected = vec!["x".to_string(), "ghost".to_string()];
    let series = align_all(&selected, &axis, &records, GapPolicy::Sparse);
    let layout = compute_layout(axis.len(), 2, &series, &square_opts());
    assert_eq!(layout.first_order, vec!["x".to_string()]);
    assert_eq!(layout.last_order, vec!["x".to_string()]);
}
