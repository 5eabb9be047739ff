pub mod track;
pub mod track_set;

pub use track::{Keying, Position, Track};
pub use track_set::TrackSet;
