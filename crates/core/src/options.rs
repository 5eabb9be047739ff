//! Panel options: which views are enabled and how each one is styled.
//!
//! Every struct deserializes from camelCase JSON with all keys optional, so
//! a saved panel from an older version (or an empty `{}`) still loads with
//! the defaults below.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("invalid options JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One of the four alternative projections of the track set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    Marker,
    Ant,
    Heat,
    Hex,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackMapOptions {
    pub map: MapOptions,
    #[serde(deserialize_with = "one_or_many")]
    pub view_types: Vec<ViewType>,
    pub marker: MarkerOptions,
    pub ant: AntOptions,
    pub heat: HeatOptions,
    pub hex: HexOptions,
    /// Write the visible box back to the host as query variables after
    /// every pan/zoom.
    pub publish_bounds_to_host: bool,
}

impl Default for TrackMapOptions {
    fn default() -> Self {
        Self {
            map: MapOptions::default(),
            view_types: vec![ViewType::Marker],
            marker: MarkerOptions::default(),
            ant: AntOptions::default(),
            heat: HeatOptions::default(),
            hex: HexOptions::default(),
            publish_bounds_to_host: true,
        }
    }
}

impl TrackMapOptions {
    pub fn from_json(data: &[u8]) -> Result<Self, OptionsError> {
        Ok(serde_json::from_slice(data)?)
    }

    pub fn is_enabled(&self, view: ViewType) -> bool {
        self.view_types.contains(&view)
    }

    /// Queries (refIds) assigned to a view.
    pub fn queries(&self, view: ViewType) -> &[String] {
        match view {
            ViewType::Marker => &self.marker.queries,
            ViewType::Ant => &self.ant.queries,
            ViewType::Heat => &self.heat.queries,
            ViewType::Hex => &self.hex.queries,
        }
    }

    /// Whether a view asks the map to zoom to the extent of its tracks.
    pub fn zooms_to_data(&self, view: ViewType) -> bool {
        match view {
            ViewType::Marker => self.marker.zoom_to_data_bounds,
            ViewType::Ant => self.ant.zoom_to_data_bounds,
            ViewType::Heat | ViewType::Hex => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapOptions {
    pub tile_url: String,
    pub tile_attribution: String,
    pub tile_access_token: String,
    pub tile_sub_domains: Vec<String>,
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub zoom: f64,
    /// Center on the first valid position instead of the configured center.
    pub use_center_from_first_pos: bool,
    /// Center on the last valid position instead of the configured center.
    pub use_center_from_last_pos: bool,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".into(),
            tile_attribution:
                "&copy <a href=\"http://osm.org/copyright\">OpenStreetMap</a> contributors".into(),
            tile_access_token: String::new(),
            tile_sub_domains: vec!["a".into(), "b".into(), "c".into()],
            center_latitude: 56.17203,
            center_longitude: 10.1865203,
            zoom: 10.0,
            use_center_from_first_pos: false,
            use_center_from_last_pos: false,
        }
    }
}

/// A color keyed by a query name or a label value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorOverride {
    pub label: String,
    pub color: String,
}

/// A marker radius keyed by a query name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeOverride {
    pub label: String,
    pub size: f64,
}

/// An HTML marker icon keyed by a label value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HtmlOverride {
    pub label: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarkerOptions {
    pub queries: Vec<String>,
    pub color: String,
    pub size: f64,
    pub color_overrides_by_query: Vec<ColorOverride>,
    pub size_overrides_by_query: Vec<SizeOverride>,
    pub zoom_to_data_bounds: bool,
    pub show_only_last_marker: bool,
    /// With `show_only_last_marker`, skip tracks that are not live.
    pub show_only_live_tracks: bool,
    pub always_show_tooltips: bool,
    pub use_html_for_markers: bool,
    pub default_html: String,
    /// Label whose value selects an entry of `html_overrides_by_label`.
    pub label_name: String,
    pub html_overrides_by_label: Vec<HtmlOverride>,
}

impl Default for MarkerOptions {
    fn default() -> Self {
        Self {
            queries: Vec::new(),
            color: "rgba(0, 100, 255, 0.2)".into(),
            size: 25.0,
            color_overrides_by_query: Vec::new(),
            size_overrides_by_query: Vec::new(),
            zoom_to_data_bounds: true,
            show_only_last_marker: false,
            show_only_live_tracks: false,
            always_show_tooltips: false,
            use_html_for_markers: false,
            default_html: "<div style=\"font-size: 20px\">&#x25CF;</div>".into(),
            label_name: "track".into(),
            html_overrides_by_label: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AntOptions {
    pub queries: Vec<String>,
    pub delay: f64,
    pub weight: f64,
    pub color: String,
    pub pulse_color: String,
    pub opacity: f64,
    pub paused: bool,
    pub reverse: bool,
    /// Freeze the animation of tracks whose last sample has no coordinates.
    pub pause_non_live_tracks: bool,
    pub color_overrides_by_query: Vec<ColorOverride>,
    /// Label whose value selects an entry of `color_overrides_by_label`.
    pub label_name: String,
    pub color_overrides_by_label: Vec<ColorOverride>,
    pub zoom_to_data_bounds: bool,
}

impl Default for AntOptions {
    fn default() -> Self {
        Self {
            queries: Vec::new(),
            delay: 400.0,
            weight: 5.0,
            color: "rgba(0, 100, 255, 1)".into(),
            pulse_color: "rgba(0, 100, 255, 0.2)".into(),
            opacity: 0.8,
            paused: false,
            reverse: false,
            pause_non_live_tracks: false,
            color_overrides_by_query: Vec::new(),
            label_name: "track".into(),
            color_overrides_by_label: Vec::new(),
            zoom_to_data_bounds: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeatOptions {
    pub queries: Vec<String>,
    pub fit_bounds_on_load: bool,
    pub fit_bounds_on_update: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HexOptions {
    pub queries: Vec<String>,
    pub opacity: f64,
    pub color_range_from: String,
    pub color_range_to: String,
    pub radius_range_from: f64,
    pub radius_range_to: f64,
}

impl Default for HexOptions {
    fn default() -> Self {
        Self {
            queries: Vec::new(),
            opacity: 0.6,
            color_range_from: "#f7fbff".into(),
            color_range_to: "#ff0000".into(),
            radius_range_from: 5.0,
            radius_range_to: 12.0,
        }
    }
}

/// Older panels stored `viewTypes` as a single string.
fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<ViewType>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(ViewType),
        Many(Vec<ViewType>),
    }
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(v) => vec![v],
        OneOrMany::Many(v) => v,
    })
}
