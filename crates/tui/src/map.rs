use trackmap_core::viewport::MapWidget;
use trackmap_protocol::{Bounds, LatLng};

const MAX_ZOOM: f64 = 18.0;
/// A terminal cell is about twice as tall as it is wide.
const CELL_ASPECT: f64 = 2.0;

/// Equirectangular map over a grid of terminal cells.
///
/// Zoom follows web-map convention: zoom 0 shows 360 degrees of longitude
/// across the width, each step halves that. Fits snap to whole zoom levels,
/// so the visible box is usually larger than the one requested.
#[derive(Debug, Clone)]
pub struct TerminalMap {
    pub center: LatLng,
    pub zoom: f64,
    cols: u16,
    rows: u16,
    /// Size reported by the terminal but not yet applied.
    pending: Option<(u16, u16)>,
}

impl TerminalMap {
    pub fn new(center: LatLng, zoom: f64, cols: u16, rows: u16) -> Self {
        Self {
            center,
            zoom: zoom.clamp(0.0, MAX_ZOOM),
            cols: cols.max(1),
            rows: rows.max(1),
            pending: None,
        }
    }

    /// Record a new terminal size; applied on the next `invalidate_size`.
    pub fn resized(&mut self, cols: u16, rows: u16) {
        if (cols, rows) != (self.cols, self.rows) {
            self.pending = Some((cols.max(1), rows.max(1)));
        }
    }

    fn lon_span(&self) -> f64 {
        360.0 / 2f64.powf(self.zoom)
    }

    /// Degrees of latitude shown for a given longitude span.
    fn lat_span_for(&self, lon_span: f64) -> f64 {
        lon_span * f64::from(self.rows) * CELL_ASPECT / f64::from(self.cols)
    }

    pub fn pan(&mut self, rows: f64, cols: f64) {
        let b = self.visible_bounds();
        self.center.lat = (self.center.lat + rows * b.lat_span() / 10.0).clamp(-90.0, 90.0);
        self.center.lon = (self.center.lon + cols * b.lon_span() / 10.0).clamp(-180.0, 180.0);
    }

    pub fn zoom_by(&mut self, steps: f64) {
        self.zoom = (self.zoom + steps).clamp(0.0, MAX_ZOOM);
    }
}

impl MapWidget for TerminalMap {
    fn fit_bounds(&mut self, bounds: Bounds, _animate: bool) {
        let needed_lon = bounds
            .lon_span()
            .max(bounds.lat_span() * f64::from(self.cols) / (f64::from(self.rows) * CELL_ASPECT));
        self.center = bounds.center();
        self.zoom = if needed_lon > 0.0 {
            (360.0 / needed_lon).log2().floor().clamp(0.0, MAX_ZOOM)
        } else {
            MAX_ZOOM
        };
    }

    fn visible_bounds(&self) -> Bounds {
        let half_lon = self.lon_span() / 2.0;
        let half_lat = self.lat_span_for(self.lon_span()) / 2.0;
        Bounds::new(
            self.center.lat - half_lat,
            self.center.lon - half_lon,
            self.center.lat + half_lat,
            self.center.lon + half_lon,
        )
    }

    fn invalidate_size(&mut self) {
        if let Some((cols, rows)) = self.pending.take() {
            self.cols = cols;
            self.rows = rows;
        }
    }
}
