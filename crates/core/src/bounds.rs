//! Data extent and the zoom-to-data request.

use trackmap_protocol::Bounds;

use crate::model::{Track, TrackSet};
use crate::options::{TrackMapOptions, ViewType};
use crate::views::is_assigned;

/// Smallest box containing every valid position of `tracks`.
///
/// Falls back to [`Bounds::WORLD`] when none of them has a coordinate.
pub fn bounds_of<'a>(tracks: impl IntoIterator<Item = &'a Track>) -> Bounds {
    let mut coords = tracks
        .into_iter()
        .flat_map(|t| t.valid_positions().map(|(c, _)| c));
    let Some(first) = coords.next() else {
        return Bounds::WORLD;
    };
    let mut bounds = Bounds::from_point(first);
    for c in coords {
        bounds.extend(c);
    }
    bounds
}

/// The box the map should zoom to, if any view asks for it.
///
/// A track qualifies when it is assigned to the marker or ant view and that
/// view has zoom-to-data enabled. The result covers all qualifying tracks
/// together; `None` means no view wants a fit.
pub fn fit_request(tracks: &TrackSet, options: &TrackMapOptions) -> Option<Bounds> {
    let fitting: Vec<ViewType> = [ViewType::Marker, ViewType::Ant]
        .into_iter()
        .filter(|v| options.zooms_to_data(*v))
        .collect();

    let mut qualifying = tracks
        .iter()
        .filter(|t| fitting.iter().any(|v| is_assigned(t, *v, options)))
        .peekable();
    qualifying.peek()?;
    let bounds = bounds_of(qualifying);
    log::debug!("fit to data requested: {bounds:?}");
    Some(bounds)
}
