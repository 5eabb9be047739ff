//! Group extracted rows into tracks.
//!
//! Each frame picks its own grouping strategy:
//!
//! ```text
//!   frame has a `track` column  ─▶ value-keyed: key per row
//!   frame has a `track` label   ─▶ label-keyed: one key for the whole frame
//!   neither                     ─▶ label-keyed on refId / name / "frame-<i>"
//! ```
//!
//! Rows are visited in frame order, then row order, and appended to the
//! track for their key. No re-sorting by timestamp happens. A track's query
//! is the refId of the latest frame that contributed to it.

use std::sync::Arc;

use indexmap::IndexMap;
use trackmap_protocol::{Labels, SharedStr};

use crate::extract::{FrameRows, Row};
use crate::model::{Keying, Position, Track, TrackSet};

/// Build the ordered track set for one run.
pub fn build_tracks(frames: &[FrameRows]) -> TrackSet {
    let mut tracks: IndexMap<SharedStr, Track> = IndexMap::new();

    for frame in frames {
        let labels = Arc::new(frame.labels.clone());

        if frame.has_track_column {
            for row in &frame.rows {
                // A row without a key belongs to no track.
                let Some(key) = &row.track else {
                    continue;
                };
                let track = tracks.entry(key.clone()).or_insert_with(|| {
                    Track::new(key.clone(), None, Keying::Value, labels.clone())
                });
                track.query.clone_from(&frame.ref_id);
                track.positions.push(position(row, &labels));
            }
            continue;
        }

        let key = match &frame.track_label {
            Some(label) => label.clone(),
            // Without any identity a frame contributes only if it has rows.
            None if frame.rows.is_empty() => continue,
            None => fallback_key(frame),
        };
        let track = tracks
            .entry(key.clone())
            .or_insert_with(|| Track::new(key, None, Keying::Label, labels.clone()));
        track.query.clone_from(&frame.ref_id);
        track
            .positions
            .extend(frame.rows.iter().map(|row| position(row, &labels)));
    }

    log::debug!(
        "built {} tracks from {} frames",
        tracks.len(),
        frames.len()
    );
    TrackSet::new(tracks.into_values().collect())
}

fn fallback_key(frame: &FrameRows) -> SharedStr {
    if let Some(ref_id) = &frame.ref_id {
        return ref_id.clone();
    }
    match &frame.name {
        Some(name) => SharedStr::from(name.as_str()),
        None => SharedStr::from(format!("frame-{}", frame.frame_index)),
    }
}

fn position(row: &Row, labels: &Arc<Labels>) -> Position {
    Position {
        latitude: row.latitude,
        longitude: row.longitude,
        timestamp: row.timestamp,
        intensity: row.intensity,
        popup: row.popup.clone(),
        tooltip: row.tooltip.clone(),
        labels: Arc::clone(labels),
    }
}
