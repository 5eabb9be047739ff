//! Integration test: run whole frame sets through the pipeline and check
//! the datasets each view receives.

use trackmap_core::pipeline::{parse_frames, run, run_json};
use trackmap_core::{TrackMapOptions, ViewType, builder, extract, liveness};
use trackmap_protocol::{Bounds, Field, FieldValue, Frame, LatLng};

fn vehicles() -> Vec<Frame> {
    parse_frames(include_bytes!("fixtures/vehicles.json")).expect("vehicles fixture parses")
}

fn labelled() -> Vec<Frame> {
    parse_frames(include_bytes!("fixtures/labelled.json")).expect("labelled fixture parses")
}

fn vehicle_options() -> TrackMapOptions {
    let mut o = TrackMapOptions::default();
    o.view_types = vec![ViewType::Marker, ViewType::Ant, ViewType::Heat];
    o.marker.queries = vec!["A".into()];
    o.ant.queries = vec!["A".into(), "B".into()];
    o.heat.queries = vec!["B".into()];
    o
}

/// T1 moves from (1, 1) to (2, 2); T2 has a single gap.
fn two_tracks() -> Vec<Frame> {
    let values = |v: &[Option<f64>]| -> Vec<FieldValue> {
        v.iter().map(|x| FieldValue::from(*x)).collect()
    };
    vec![
        Frame::new("A")
            .with_label("track", "T1")
            .with_field(Field::new("time", values(&[Some(0.0), Some(1.0)])))
            .with_field(Field::new("lat", values(&[Some(1.0), Some(2.0)])))
            .with_field(Field::new("lon", values(&[Some(1.0), Some(2.0)]))),
        Frame::new("A")
            .with_label("track", "T2")
            .with_field(Field::new("time", values(&[Some(0.0)])))
            .with_field(Field::new("lat", values(&[None])))
            .with_field(Field::new("lon", values(&[None]))),
    ]
}

#[test]
fn live_and_gap_only_tracks() {
    let frames = two_tracks();
    let tracks = builder::build_tracks(&extract::extract_all(&frames));
    assert_eq!(liveness::evaluate(&tracks), [true, false]);

    let mut options = TrackMapOptions::default();
    options.view_types = vec![ViewType::Marker, ViewType::Ant];
    let view = run(&frames, &options);

    let markers = view.markers.expect("marker view enabled").markers;
    assert_eq!(markers.len(), 2);
    assert!(markers.iter().all(|m| m.track == "T1"));

    let paths = view.ant_paths.expect("ant view enabled").paths;
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].track, "T1");
    assert_eq!(paths[0].positions, [[1.0, 1.0], [2.0, 2.0]]);
}

#[test]
fn value_keyed_tracks_feed_each_view() {
    let mut options = vehicle_options();
    options.ant.pause_non_live_tracks = true;
    let view = run(&vehicles(), &options);
    assert!(!view.no_data);

    let markers = view.markers.expect("marker view enabled").markers;
    assert_eq!(markers.len(), 5, "bus-1 has 3 fixes, bus-2 has 2");
    let bus1: Vec<_> = markers.iter().filter(|m| m.track == "bus-1").collect();
    assert_eq!(bus1.len(), 3);
    assert!(bus1[2].is_last);
    assert_eq!(bus1[2].popup, "bus-1 at depot");
    assert_eq!(bus1[0].position, LatLng::new(56.15, 10.2));
    assert!(markers.iter().all(|m| m.track != "ferry"));

    let paths = view.ant_paths.expect("ant view enabled").paths;
    let tracks: Vec<_> = paths.iter().map(|p| p.track.as_str()).collect();
    assert_eq!(tracks, ["bus-1", "bus-2", "ferry"]);
    // The ferry's last sample is a gap, so it is not live.
    let paused: Vec<_> = paths.iter().map(|p| p.options.paused).collect();
    assert_eq!(paused, [false, false, true]);
    assert_eq!(paths[1].positions.len(), 2);

    let heat = view.heatmap.expect("heat view enabled");
    let intensities: Vec<_> = heat.points.iter().map(|p| p.intensity()).collect();
    assert_eq!(intensities, [Some(3.0), Some(5.0)]);

    assert!(view.hexbin.is_none());

    let fit = view.fit_bounds.expect("marker and ant zoom to data");
    assert_eq!(fit, Bounds::new(56.05, 10.1, 56.21, 10.4));
}

#[test]
fn fit_skips_views_without_zoom_to_data() {
    let mut options = vehicle_options();
    options.ant.zoom_to_data_bounds = false;
    let fit = run(&vehicles(), &options).fit_bounds.expect("markers still zoom");
    // Only bus-1 and bus-2 (marker view) count now.
    assert_eq!(fit, Bounds::new(56.15, 10.1, 56.21, 10.22));
}

#[test]
fn label_keyed_frames_merge_and_fall_back_to_ref_id() {
    let view = run(&labelled(), &TrackMapOptions::default());
    let markers = view.markers.expect("marker view is on by default").markers;

    let keys: Vec<_> = markers.iter().map(|m| m.track.as_str()).collect();
    assert_eq!(
        keys,
        ["runner-7", "runner-7", "runner-7", "runner-7", "C", "C"]
    );
    // (0, 0) is a real position.
    assert_eq!(markers[0].position, LatLng::new(0.0, 0.0));
    assert_eq!(view.fit_bounds, Some(Bounds::new(-11.0, 0.0, 1.5, 21.0)));
}

#[test]
fn empty_input_renders_world_and_default_center() {
    let options = TrackMapOptions::default();
    let view = run(&[], &options);
    assert!(view.no_data);
    assert_eq!(view.fit_bounds, Some(Bounds::WORLD));
    assert_eq!(view.map.center, LatLng::new(56.17203, 10.1865203));
    assert!(view.markers.as_ref().expect("marker view enabled").markers.is_empty());

    let from_json = run_json(b"[]", &options);
    assert_eq!(from_json, view);
}

#[test]
fn unparseable_input_is_no_data() {
    let view = run_json(b"<html>oops</html>", &vehicle_options());
    assert!(view.no_data);
    assert!(view.ant_paths.expect("ant view enabled").paths.is_empty());
}

#[test]
fn reruns_are_byte_identical() {
    let frames = vehicles();
    let mut options = vehicle_options();
    options.view_types.push(ViewType::Hex);
    options.hex.queries = vec!["A".into()];

    let first = serde_json::to_vec(&run(&frames, &options)).expect("view serializes");
    let second = serde_json::to_vec(&run(&frames, &options)).expect("view serializes");
    assert_eq!(first, second);
}
