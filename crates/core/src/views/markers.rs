use trackmap_protocol::{LatLng, MarkerRecord, MarkerSet, SharedStr};

use super::ProjectionContext;
use crate::model::{Position, Track};
use crate::options::ViewType;

/// Project assigned tracks into map markers.
///
/// One marker per valid position, or only the final valid position of
/// each track in last-marker mode (optionally restricted to live tracks).
pub fn project_markers(ctx: &ProjectionContext<'_>) -> MarkerSet {
    let opts = &ctx.options.marker;
    let default_color = SharedStr::from(opts.color.as_str());
    let default_html = SharedStr::from(opts.default_html.as_str());
    let mut markers = Vec::new();

    for (index, track) in ctx.assigned(ViewType::Marker) {
        if opts.show_only_last_marker && opts.show_only_live_tracks && !ctx.is_live(index) {
            continue;
        }

        let color = ctx
            .overrides
            .marker_color_by_query
            .lookup(track.query.as_deref())
            .unwrap_or(&default_color)
            .clone();
        let radius = ctx
            .overrides
            .marker_size_by_query
            .lookup(track.query.as_deref())
            .copied()
            .unwrap_or(opts.size);
        let icon_html = opts.use_html_for_markers.then(|| {
            ctx.overrides
                .marker_html_by_label
                .lookup(track.label_value(&opts.label_name))
                .unwrap_or(&default_html)
                .clone()
        });

        let Some((last, _)) = last_valid_index(track) else {
            continue;
        };

        let valid = track
            .positions
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.coords().map(|c| (i, c, p)))
            .filter(|(i, _, _)| !opts.show_only_last_marker || *i == last);

        for (i, coords, position) in valid {
            let popup = popup_text(coords, position);
            let tooltip = position
                .tooltip
                .as_ref()
                .map_or_else(|| popup.clone(), ToString::to_string);
            markers.push(MarkerRecord {
                track_index: index,
                track: track.key.clone(),
                position: coords,
                color: color.clone(),
                radius,
                icon_html: icon_html.clone(),
                popup,
                tooltip,
                permanent_tooltip: opts.always_show_tooltips,
                is_last: i == last,
            });
        }
    }

    MarkerSet { markers }
}

fn last_valid_index(track: &Track) -> Option<(usize, LatLng)> {
    track
        .positions
        .iter()
        .enumerate()
        .rev()
        .find_map(|(i, p)| p.coords().map(|c| (i, c)))
}

/// The sample's own popup, or a synthesized description:
///
/// ```text
/// 56.1, 10.2
/// 1700000000000
/// {"track":"bus-1"}
/// ```
pub fn popup_text(coords: LatLng, position: &Position) -> String {
    if let Some(popup) = &position.popup {
        return popup.to_string();
    }
    let time = position
        .timestamp
        .map_or_else(|| "-".to_string(), |t| format!("{t:.0}"));
    let labels = serde_json::to_string(&*position.labels).unwrap_or_default();
    format!("{}, {}\n{time}\n{labels}", coords.lat, coords.lon)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::liveness;
    use crate::model::TrackSet;
    use crate::options::{ColorOverride, HtmlOverride, SizeOverride, TrackMapOptions};
    use crate::overrides::StyleOverrides;
    use crate::views::test_support::track;

    fn run(set: &TrackSet, options: &TrackMapOptions) -> MarkerSet {
        let liveness = liveness::evaluate(set);
        let overrides = StyleOverrides::from_options(options);
        project_markers(&ProjectionContext {
            tracks: set,
            liveness: &liveness,
            options,
            overrides: &overrides,
        })
    }

    fn options() -> TrackMapOptions {
        let mut o = TrackMapOptions::default();
        o.marker.queries = vec!["A".into()];
        o
    }

    #[test]
    fn one_marker_per_valid_position() {
        let set = TrackSet::new(vec![
            track("t1", "A", &[Some((1.0, 1.0)), Some((2.0, 2.0))]),
            track("t2", "A", &[None]),
        ]);
        let out = run(&set, &options());
        assert_eq!(out.markers.len(), 2);
        assert!(out.markers.iter().all(|m| m.track == "t1"));
        assert!(!out.markers[0].is_last);
        assert!(out.markers[1].is_last);
    }

    #[test]
    fn last_only_emits_final_valid_position() {
        let set = TrackSet::new(vec![track(
            "t1",
            "A",
            &[Some((1.0, 1.0)), Some((2.0, 2.0)), None],
        )]);
        let mut o = options();
        o.marker.show_only_last_marker = true;
        let out = run(&set, &o);
        assert_eq!(out.markers.len(), 1);
        assert_eq!(out.markers[0].position, LatLng::new(2.0, 2.0));

        // That track ends in a gap, so it is not live.
        o.marker.show_only_live_tracks = true;
        assert!(run(&set, &o).markers.is_empty());
    }

    #[test]
    fn query_overrides_color_and_size() {
        let set = TrackSet::new(vec![
            track("t1", "A", &[Some((1.0, 1.0))]),
            track("t2", "B", &[Some((1.0, 1.0))]),
        ]);
        let mut o = options();
        o.marker.queries.push("B".into());
        o.marker.color_overrides_by_query = vec![ColorOverride {
            label: "A".into(),
            color: "red".into(),
        }];
        o.marker.size_overrides_by_query = vec![SizeOverride {
            label: "B".into(),
            size: 7.0,
        }];
        let out = run(&set, &o);
        assert_eq!(out.markers[0].color, "red");
        assert!((out.markers[0].radius - 25.0).abs() < f64::EPSILON);
        assert_eq!(out.markers[1].color, "rgba(0, 100, 255, 0.2)");
        assert!((out.markers[1].radius - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn html_icons_by_label_value() {
        let set = TrackSet::new(vec![
            track("bus-1", "A", &[Some((1.0, 1.0))]),
            track("bus-2", "A", &[Some((1.0, 1.0))]),
        ]);
        let mut o = options();
        assert!(run(&set, &o).markers[0].icon_html.is_none());

        o.marker.use_html_for_markers = true;
        o.marker.default_html = "<b>dflt</b>".into();
        o.marker.html_overrides_by_label = vec![HtmlOverride {
            label: "bus-2".into(),
            html: "<i>bus</i>".into(),
        }];
        let out = run(&set, &o);
        assert_eq!(out.markers[0].icon_html.as_deref(), Some("<b>dflt</b>"));
        assert_eq!(out.markers[1].icon_html.as_deref(), Some("<i>bus</i>"));
    }

    #[test]
    fn popup_prefers_field_then_synthesizes() {
        let mut labels = trackmap_protocol::Labels::new();
        labels.insert("track".into(), "bus-1".into());
        let mut p = Position {
            timestamp: Some(1_700_000_000_000.0),
            labels: Arc::new(labels),
            ..Position::empty()
        };
        let c = LatLng::new(56.5, 10.25);
        assert_eq!(popup_text(c, &p), "56.5, 10.25\n1700000000000\n{\"track\":\"bus-1\"}");

        p.popup = Some("custom".into());
        assert_eq!(popup_text(c, &p), "custom");
    }

    #[test]
    fn tooltip_field_and_permanent_flag() {
        let mut t = track("t1", "A", &[Some((1.0, 1.0)), Some((2.0, 2.0))]);
        t.positions[1].tooltip = Some("speed 40".into());
        let set = TrackSet::new(vec![t]);
        let mut o = options();
        o.marker.always_show_tooltips = true;
        let out = run(&set, &o);
        assert_eq!(out.markers[0].tooltip, out.markers[0].popup);
        assert_eq!(out.markers[1].tooltip, "speed 40");
        assert!(out.markers.iter().all(|m| m.permanent_tooltip));
    }

    #[test]
    fn disabled_view_emits_nothing() {
        let set = TrackSet::new(vec![track("t1", "A", &[Some((1.0, 1.0))])]);
        let mut o = options();
        o.view_types.clear();
        assert!(run(&set, &o).markers.is_empty());
    }
}
