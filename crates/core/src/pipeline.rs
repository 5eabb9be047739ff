//! One full pass from query frames to the renderable view.
//!
//! Every run starts from scratch: tracks are rebuilt, overrides re-resolved
//! and each enabled projector emits a fresh dataset. Running twice on the
//! same input gives the same output.

use thiserror::Error;
use trackmap_protocol::{Frame, LatLng, MapView, TrackMapView};

use crate::bounds::fit_request;
use crate::model::TrackSet;
use crate::options::{MapOptions, TrackMapOptions, ViewType};
use crate::overrides::StyleOverrides;
use crate::views::ProjectionContext;
use crate::views::{ant_path, heatmap, hexbin, markers};
use crate::{builder, extract, liveness};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("invalid frame JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse a JSON array of data frames.
pub fn parse_frames(data: &[u8]) -> Result<Vec<Frame>, InputError> {
    Ok(serde_json::from_slice(data)?)
}

/// Build the track set and every enabled view.
pub fn run(frames: &[Frame], options: &TrackMapOptions) -> TrackMapView {
    let rows = extract::extract_all(frames);
    let tracks = builder::build_tracks(&rows);
    let liveness = liveness::evaluate(&tracks);
    let overrides = StyleOverrides::from_options(options);

    log::debug!(
        "{} frames -> {} tracks ({} live), views {:?}",
        frames.len(),
        tracks.len(),
        liveness.iter().filter(|l| **l).count(),
        options.view_types
    );

    let ctx = ProjectionContext {
        tracks: &tracks,
        liveness: &liveness,
        options,
        overrides: &overrides,
    };
    let enabled = |v: ViewType| options.is_enabled(v);

    TrackMapView {
        map: map_view(&options.map, &tracks),
        markers: enabled(ViewType::Marker).then(|| markers::project_markers(&ctx)),
        ant_paths: enabled(ViewType::Ant).then(|| ant_path::project_ant_paths(&ctx)),
        heatmap: enabled(ViewType::Heat).then(|| heatmap::project_heatmap(&ctx)),
        hexbin: enabled(ViewType::Hex).then(|| hexbin::project_hexbin(&ctx)),
        fit_bounds: fit_request(&tracks, options),
        no_data: tracks.is_no_data(),
    }
}

/// Like [`run`], but from raw JSON. Input that does not parse is treated
/// as an empty result set.
pub fn run_json(data: &[u8], options: &TrackMapOptions) -> TrackMapView {
    let frames = parse_frames(data).unwrap_or_else(|e| {
        log::warn!("{e}; rendering without data");
        Vec::new()
    });
    run(&frames, options)
}

fn map_view(options: &MapOptions, tracks: &TrackSet) -> MapView {
    let configured = LatLng::new(options.center_latitude, options.center_longitude);
    let center = if options.use_center_from_first_pos {
        tracks.first_coord()
    } else if options.use_center_from_last_pos {
        tracks.last_coord()
    } else {
        None
    }
    .unwrap_or(configured);

    MapView {
        center,
        zoom: options.zoom,
        tile_url: options.tile_url.clone(),
        tile_attribution: options.tile_attribution.clone(),
        tile_access_token: (!options.tile_access_token.is_empty())
            .then(|| options.tile_access_token.clone()),
        tile_sub_domains: (!options.tile_sub_domains.is_empty())
            .then(|| options.tile_sub_domains.clone()),
    }
}
