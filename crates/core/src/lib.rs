//! Track aggregation and view projection for the trackmap panel.
//!
//! ```text
//!   frames ─▶ extract ─▶ builder ─▶ TrackSet ─┬─▶ liveness
//!                                             ├─▶ views::*   ─▶ datasets
//!                                             └─▶ bounds     ─▶ fit request
//! ```
//!
//! [`pipeline::run`] drives one full pass; [`viewport`] handles the map's
//! events after rendering.

pub mod bounds;
pub mod builder;
pub mod extract;
pub mod liveness;
pub mod model;
pub mod options;
pub mod overrides;
pub mod pipeline;
pub mod viewport;
pub mod views;

pub use options::{TrackMapOptions, ViewType};
pub use pipeline::{run, run_json};
