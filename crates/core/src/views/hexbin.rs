use trackmap_protocol::{
    HexFeature, HexFeatureCollection, HexbinDataset, HexbinOptions, PointGeometry, SharedStr,
};

use super::ProjectionContext;
use crate::options::ViewType;

/// Project assigned tracks into a GeoJSON point collection.
///
/// Binning is left to the hexbin layer; each feature only records which
/// track it came from.
pub fn project_hexbin(ctx: &ProjectionContext<'_>) -> HexbinDataset {
    let opts = &ctx.options.hex;
    let features = ctx
        .assigned(ViewType::Hex)
        .flat_map(|(index, track)| {
            track.valid_positions().map(move |(c, _)| HexFeature {
                id: index,
                geometry: PointGeometry::from_lat_lng(c),
            })
        })
        .collect();

    HexbinDataset {
        data: HexFeatureCollection { features },
        options: HexbinOptions {
            opacity: opts.opacity,
            color_range: [
                SharedStr::from(opts.color_range_from.as_str()),
                SharedStr::from(opts.color_range_to.as_str()),
            ],
            radius_range: [opts.radius_range_from, opts.radius_range_to],
            color_scale_extent: [Some(1.0), None],
            radius_scale_extent: [Some(1.0), None],
        },
    }
}
