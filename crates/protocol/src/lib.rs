pub mod datasets;
pub mod frame;
pub mod host;
pub mod shared_str;
pub mod types;

pub use datasets::{
    AntPath, AntPathSet, AntPathStyle, HeatPoint, HeatmapDataset, HexFeature,
    HexFeatureCollection, HexbinDataset, HexbinOptions, MapView, MarkerRecord, MarkerSet,
    PointGeometry, TrackMapView,
};
pub use frame::{Field, FieldValue, Frame, Labels};
pub use host::QueryUpdate;
pub use shared_str::SharedStr;
pub use types::{Bounds, Color, LatLng};
