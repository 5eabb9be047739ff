use serde::{Deserialize, Serialize};

use crate::shared_str::SharedStr;
use crate::types::{Bounds, LatLng};

/// Everything the map renderer needs for one refresh.
///
/// ```text
///   frames + options ──▶ pipeline ──▶ TrackMapView ──▶ map widget
///                                     ├─ map      (center, zoom, tiles)
///                                     ├─ markers  ┐
///                                     ├─ antPaths │ one per enabled mode
///                                     ├─ heatmap  │
///                                     ├─ hexbin   ┘
///                                     └─ fitBounds (when zoom-to-data applies)
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackMapView {
    pub map: MapView,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markers: Option<MarkerSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ant_paths: Option<AntPathSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heatmap: Option<HeatmapDataset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hexbin: Option<HexbinDataset>,
    /// Box the widget should fit to, without animation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit_bounds: Option<Bounds>,
    /// Set when the input produced no tracks and the synthetic fallback
    /// track is all there is.
    #[serde(default)]
    pub no_data: bool,
}

/// Base map state: where to look and which tiles to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub center: LatLng,
    pub zoom: f64,
    pub tile_url: String,
    pub tile_attribution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_sub_domains: Option<Vec<String>>,
}

// --- Markers ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkerSet {
    pub markers: Vec<MarkerRecord>,
}

/// One marker on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerRecord {
    /// Position of the owning track in iteration order.
    pub track_index: usize,
    pub track: SharedStr,
    pub position: LatLng,
    pub color: SharedStr,
    pub radius: f64,
    /// HTML icon, present only when HTML markers are enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_html: Option<SharedStr>,
    pub popup: String,
    pub tooltip: String,
    pub permanent_tooltip: bool,
    /// Final valid position of its track.
    pub is_last: bool,
}

// --- Ant paths ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AntPathSet {
    pub paths: Vec<AntPath>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AntPath {
    pub track_index: usize,
    pub track: SharedStr,
    /// Ordered `[lat, lon]` pairs; always at least two.
    pub positions: Vec<[f64; 2]>,
    pub options: AntPathStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popup: Option<String>,
}

/// Animation and stroke options, in the shape the ant-path layer expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AntPathStyle {
    pub delay: f64,
    pub dash_array: [f64; 2],
    pub weight: f64,
    pub color: SharedStr,
    pub pulse_color: SharedStr,
    pub opacity: f64,
    pub paused: bool,
    pub reverse: bool,
    pub line_cap: SharedStr,
}

// --- Heatmap ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapDataset {
    pub points: Vec<HeatPoint>,
    pub fit_bounds_on_load: bool,
    pub fit_bounds_on_update: bool,
}

/// Serialized as `[lat, lon, intensity]`, with `null` intensity when the
/// track had none.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatPoint(pub f64, pub f64, pub Option<f64>);

impl HeatPoint {
    pub fn lat(&self) -> f64 {
        self.0
    }

    pub fn lon(&self) -> f64 {
        self.1
    }

    pub fn intensity(&self) -> Option<f64> {
        self.2
    }
}

// --- Hexbin ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HexbinDataset {
    pub data: HexFeatureCollection,
    pub options: HexbinOptions,
}

/// Renderer options for the hexbin layer. Scale extents are `[1, null]`:
/// the lower end pinned, the upper end left to the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HexbinOptions {
    pub opacity: f64,
    pub color_range: [SharedStr; 2],
    pub radius_range: [f64; 2],
    pub color_scale_extent: [Option<f64>; 2],
    pub radius_scale_extent: [Option<f64>; 2],
}

/// GeoJSON `FeatureCollection` of points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct HexFeatureCollection {
    pub features: Vec<HexFeature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct HexFeature {
    /// Index of the originating track.
    pub id: usize,
    pub geometry: PointGeometry,
}

/// GeoJSON point; note the `[lon, lat]` axis order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Point")]
pub struct PointGeometry {
    pub coordinates: [f64; 2],
}

impl PointGeometry {
    pub fn from_lat_lng(p: LatLng) -> Self {
        Self {
            coordinates: [p.lon, p.lat],
        }
    }
}
