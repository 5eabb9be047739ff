use crate::model::{Track, TrackSet};

/// A track is live when its most recent sample has both coordinates.
/// A track without samples is never live.
pub fn is_live(track: &Track) -> bool {
    track
        .positions
        .last()
        .is_some_and(|p| p.coords().is_some())
}

/// Liveness of every track, in track order.
pub fn evaluate(tracks: &TrackSet) -> Vec<bool> {
    tracks.iter().map(is_live).collect()
}
