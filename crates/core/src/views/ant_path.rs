use trackmap_protocol::{AntPath, AntPathSet, AntPathStyle, SharedStr};

use super::ProjectionContext;
use super::markers::popup_text;
use crate::model::Track;
use crate::options::ViewType;

const DASH_ARRAY: [f64; 2] = [20.0, 5.0];
const LINE_CAP: &str = "butt";

/// Project assigned tracks into animated paths.
///
/// Tracks with fewer than two valid positions cannot form a path and are
/// left out without comment.
pub fn project_ant_paths(ctx: &ProjectionContext<'_>) -> AntPathSet {
    let opts = &ctx.options.ant;
    let default_color = SharedStr::from(opts.color.as_str());
    let pulse_color = SharedStr::from(opts.pulse_color.as_str());
    let line_cap = SharedStr::from(LINE_CAP);

    let paths = ctx
        .assigned(ViewType::Ant)
        .filter_map(|(index, track)| {
            let positions: Vec<[f64; 2]> = track
                .valid_positions()
                .map(|(c, _)| [c.lat, c.lon])
                .collect();
            if positions.len() < 2 {
                return None;
            }

            let paused = opts.paused || (opts.pause_non_live_tracks && !ctx.is_live(index));
            let color = resolve_color(ctx, track).unwrap_or(&default_color).clone();

            Some(AntPath {
                track_index: index,
                track: track.key.clone(),
                positions,
                options: AntPathStyle {
                    delay: opts.delay,
                    dash_array: DASH_ARRAY,
                    weight: opts.weight,
                    color,
                    pulse_color: pulse_color.clone(),
                    opacity: opts.opacity,
                    paused,
                    reverse: opts.reverse,
                    line_cap: line_cap.clone(),
                },
                popup: track.first_valid().map(|(c, p)| popup_text(c, p)),
            })
        })
        .collect();

    AntPathSet { paths }
}

/// Label-value override first, then query override.
fn resolve_color<'a>(ctx: &'a ProjectionContext<'_>, track: &Track) -> Option<&'a SharedStr> {
    let opts = &ctx.options.ant;
    ctx.overrides
        .ant_color_by_label
        .lookup(track.label_value(&opts.label_name))
        .or_else(|| {
            ctx.overrides
                .ant_color_by_query
                .lookup(track.query.as_deref())
        })
}
