use std::sync::Arc;

use trackmap_protocol::LatLng;

use super::track::{Keying, Position, Track};

/// All tracks of one pipeline run, in order of first appearance.
///
/// Never empty: when the input yields no track, the set holds a single
/// synthetic track with one null-coordinate position and `no_data` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackSet {
    tracks: Vec<Track>,
    no_data: bool,
}

impl TrackSet {
    /// Wrap built tracks, substituting the synthetic fallback for an empty list.
    pub fn new(tracks: Vec<Track>) -> Self {
        if tracks.is_empty() {
            return Self::no_data();
        }
        Self {
            tracks,
            no_data: false,
        }
    }

    /// The fallback set: one synthetic track with one empty position.
    pub fn no_data() -> Self {
        let mut track = Track::new("".into(), None, Keying::Synthetic, Arc::default());
        track.positions.push(Position::empty());
        Self {
            tracks: vec![track],
            no_data: true,
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false: an empty input still yields the synthetic track.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Whether this set is the synthetic no-data fallback.
    pub fn is_no_data(&self) -> bool {
        self.no_data
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    pub fn get(&self, key: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.key == key)
    }

    /// First valid coordinate across all tracks in iteration order.
    pub fn first_coord(&self) -> Option<LatLng> {
        self.tracks
            .iter()
            .find_map(|t| t.first_valid().map(|(c, _)| c))
    }

    /// Last valid coordinate of the last track that has one.
    pub fn last_coord(&self) -> Option<LatLng> {
        self.tracks
            .iter()
            .rev()
            .find_map(|t| t.last_valid().map(|(c, _)| c))
    }
}

impl<'a> IntoIterator for &'a TrackSet {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}
