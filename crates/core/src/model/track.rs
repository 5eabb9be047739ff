use std::sync::Arc;

use trackmap_protocol::{LatLng, Labels, SharedStr};

/// How a track's identity was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keying {
    /// From a per-sample `track` column.
    Value,
    /// From the `track` label (or query name) of a whole frame.
    Label,
    /// Stand-in produced when the input has no tracks at all.
    Synthetic,
}

/// One sample on a track. Coordinates may be null to mark an alignment gap.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Milliseconds since the Unix epoch, as delivered by the source.
    pub timestamp: Option<f64>,
    pub intensity: Option<f64>,
    pub popup: Option<SharedStr>,
    pub tooltip: Option<SharedStr>,
    /// Labels of the frame the sample came from; shared by all its samples.
    pub labels: Arc<Labels>,
}

impl Position {
    /// Both coordinates, or `None` for an alignment gap.
    pub fn coords(&self) -> Option<LatLng> {
        Some(LatLng::new(self.latitude?, self.longitude?))
    }

    /// A sample with no data at all.
    pub fn empty() -> Self {
        Self {
            latitude: None,
            longitude: None,
            timestamp: None,
            intensity: None,
            popup: None,
            tooltip: None,
            labels: Arc::default(),
        }
    }
}

/// A logical moving entity and its samples in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub key: SharedStr,
    /// Query (refId) of the latest frame that contributed samples.
    pub query: Option<SharedStr>,
    pub keying: Keying,
    /// Labels of the frame the track first appeared in.
    pub labels: Arc<Labels>,
    pub positions: Vec<Position>,
}

impl Track {
    pub fn new(key: SharedStr, query: Option<SharedStr>, keying: Keying, labels: Arc<Labels>) -> Self {
        Self {
            key,
            query,
            keying,
            labels,
            positions: Vec::new(),
        }
    }

    /// Positions that carry both coordinates, in order.
    pub fn valid_positions(&self) -> impl Iterator<Item = (LatLng, &Position)> {
        self.positions
            .iter()
            .filter_map(|p| p.coords().map(|c| (c, p)))
    }

    pub fn valid_count(&self) -> usize {
        self.valid_positions().count()
    }

    pub fn first_valid(&self) -> Option<(LatLng, &Position)> {
        self.valid_positions().next()
    }

    pub fn last_valid(&self) -> Option<(LatLng, &Position)> {
        self.positions
            .iter()
            .rev()
            .find_map(|p| p.coords().map(|c| (c, p)))
    }

    /// Value of a label used to select style overrides. The `track` label
    /// falls back to the track key, so value-keyed tracks can be styled by
    /// their identifier too.
    pub fn label_value(&self, name: &str) -> Option<&str> {
        match self.labels.get(name) {
            Some(v) => Some(v.as_str()),
            None if name == crate::extract::TRACK_LABEL => Some(self.key.as_str()),
            None => None,
        }
    }
}
