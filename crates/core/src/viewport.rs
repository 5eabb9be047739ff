//! Keeps the host's viewport variables in step with the map.
//!
//! The map widget and the host are behind traits so the same logic drives
//! the terminal viewer, the wasm bridge and the tests.

use thiserror::Error;
use trackmap_protocol::{Bounds, QueryUpdate};

#[derive(Debug, Error)]
pub enum HostError {
    #[error("host is not attached")]
    Detached,
}

/// The interactive map surface.
pub trait MapWidget {
    /// Move and zoom so `bounds` is visible. The widget may widen the box to
    /// its own aspect ratio and zoom steps.
    fn fit_bounds(&mut self, bounds: Bounds, animate: bool);

    /// The box currently on screen.
    fn visible_bounds(&self) -> Bounds;

    /// Re-measure the container after a layout change.
    fn invalidate_size(&mut self);
}

/// Writable query variables of the host application.
pub trait HostVariables {
    fn update(&mut self, update: QueryUpdate) -> Result<(), HostError>;
}

/// Publishes the visible box to the host after fits and user moves.
#[derive(Debug, Clone, Copy)]
pub struct ViewportSync {
    pub publish: bool,
}

impl ViewportSync {
    pub fn new(publish: bool) -> Self {
        Self { publish }
    }

    /// Apply a zoom-to-data request, then publish what the widget actually
    /// shows. Returns the visible box, or `None` when there was no request.
    pub fn fit_to_data(
        &self,
        widget: &mut impl MapWidget,
        host: &mut impl HostVariables,
        request: Option<Bounds>,
    ) -> Option<Bounds> {
        let bounds = request?;
        widget.fit_bounds(bounds, false);
        let visible = widget.visible_bounds();
        self.publish_bounds(host, &visible);
        Some(visible)
    }

    /// Handler for the widget's move-end event.
    pub fn on_move_end(
        &self,
        widget: &mut impl MapWidget,
        host: &mut impl HostVariables,
    ) -> Bounds {
        widget.invalidate_size();
        let visible = widget.visible_bounds();
        self.publish_bounds(host, &visible);
        visible
    }

    fn publish_bounds(&self, host: &mut impl HostVariables, bounds: &Bounds) {
        if !self.publish {
            return;
        }
        log::debug!(
            "publishing viewport [{}, {}] - [{}, {}]",
            bounds.min_lat,
            bounds.min_lon,
            bounds.max_lat,
            bounds.max_lon
        );
        if let Err(e) = host.update(QueryUpdate::viewport(bounds)) {
            log::warn!("viewport not published: {e}");
        }
    }
}
