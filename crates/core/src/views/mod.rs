//! View projectors: one module per visualization mode.
//!
//! ```text
//!   TrackSet ─┬─▶ markers   ─▶ MarkerSet
//!   liveness  ├─▶ ant_path  ─▶ AntPathSet
//!   overrides ├─▶ heatmap   ─▶ HeatmapDataset
//!   options   └─▶ hexbin    ─▶ HexbinDataset
//! ```
//!
//! Every projector reads the same [`ProjectionContext`] and emits a fresh
//! dataset; nothing is mutated or cached between runs.

pub mod ant_path;
pub mod heatmap;
pub mod hexbin;
pub mod markers;

use crate::model::{Keying, Track, TrackSet};
use crate::options::{TrackMapOptions, ViewType};
use crate::overrides::StyleOverrides;

/// Inputs shared by all projectors for one pipeline run.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionContext<'a> {
    pub tracks: &'a TrackSet,
    /// Liveness per track, parallel to `tracks`.
    pub liveness: &'a [bool],
    pub options: &'a TrackMapOptions,
    pub overrides: &'a StyleOverrides,
}

impl<'a> ProjectionContext<'a> {
    /// Tracks assigned to `view`, with their index in the track set.
    pub fn assigned(&self, view: ViewType) -> impl Iterator<Item = (usize, &'a Track)> + use<'a> {
        let options = self.options;
        self.tracks
            .tracks()
            .iter()
            .enumerate()
            .filter(move |(_, t)| is_assigned(t, view, options))
    }

    pub fn is_live(&self, index: usize) -> bool {
        self.liveness.get(index).copied().unwrap_or(false)
    }
}

/// Whether `track` takes part in `view`.
///
/// A disabled view takes no track. Value-keyed tracks join a view when the
/// query they came from is listed for it; label-keyed (and the synthetic
/// fallback) tracks join every enabled view.
pub fn is_assigned(track: &Track, view: ViewType, options: &TrackMapOptions) -> bool {
    if !options.is_enabled(view) {
        return false;
    }
    match track.keying {
        Keying::Value => track
            .query
            .as_deref()
            .is_some_and(|q| options.queries(view).iter().any(|listed| listed == q)),
        Keying::Label | Keying::Synthetic => true,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::model::{Keying, Position, Track};

    /// Value-keyed track from query `query` with the given coordinates.
    pub fn track(key: &str, query: &str, coords: &[Option<(f64, f64)>]) -> Track {
        let mut t = Track::new(key.into(), Some(query.into()), Keying::Value, Arc::default());
        t.positions = coords
            .iter()
            .enumerate()
            .map(|(i, c)| Position {
                latitude: c.map(|c| c.0),
                longitude: c.map(|c| c.1),
                timestamp: Some(i as f64 * 1000.0),
                ..Position::empty()
            })
            .collect();
        t
    }
}
