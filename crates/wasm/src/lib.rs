use trackmap_core::TrackMapOptions;
use trackmap_protocol::{Bounds, QueryUpdate};
use wasm_bindgen::prelude::*;

/// Run the pipeline on frame JSON and return the view JSON.
///
/// An empty `options_json` uses the defaults. Frames that do not parse
/// render as no data; options that do not parse are an error.
#[wasm_bindgen]
pub fn render_views(frames_json: &str, options_json: &str) -> Result<String, JsError> {
    render(frames_json, options_json).map_err(|e| JsError::new(&e))
}

/// The host query update for a visible box, as JSON.
#[wasm_bindgen]
pub fn viewport_query(
    min_lat: f64,
    min_lon: f64,
    max_lat: f64,
    max_lon: f64,
) -> Result<String, JsError> {
    viewport_json(&Bounds::new(min_lat, min_lon, max_lat, max_lon)).map_err(|e| JsError::new(&e))
}

fn viewport_json(bounds: &Bounds) -> Result<String, String> {
    serde_json::to_string(&QueryUpdate::viewport(bounds)).map_err(|e| e.to_string())
}

fn render(frames_json: &str, options_json: &str) -> Result<String, String> {
    let options = if options_json.trim().is_empty() {
        TrackMapOptions::default()
    } else {
        TrackMapOptions::from_json(options_json.as_bytes()).map_err(|e| e.to_string())?
    };
    let view = trackmap_core::run_json(frames_json.as_bytes(), &options);
    serde_json::to_string(&view).map_err(|e| e.to_string())
}
