use trackmap_protocol::{HeatPoint, HeatmapDataset};

use super::ProjectionContext;
use crate::options::ViewType;

/// Project assigned tracks into `(lat, lon, intensity)` heat points.
///
/// Intensity comes from the sample's intensity column; samples without one
/// carry `None` and the renderer applies its own default weight.
pub fn project_heatmap(ctx: &ProjectionContext<'_>) -> HeatmapDataset {
    let opts = &ctx.options.heat;
    let points = ctx
        .assigned(ViewType::Heat)
        .flat_map(|(_, track)| {
            track
                .valid_positions()
                .map(|(c, p)| HeatPoint(c.lat, c.lon, p.intensity))
        })
        .collect();

    HeatmapDataset {
        points,
        fit_bounds_on_load: opts.fit_bounds_on_load,
        fit_bounds_on_update: opts.fit_bounds_on_update,
    }
}
