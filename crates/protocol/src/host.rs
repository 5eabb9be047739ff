use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::Bounds;

pub const VAR_MIN_LAT: &str = "var-minLat";
pub const VAR_MIN_LON: &str = "var-minLon";
pub const VAR_MAX_LAT: &str = "var-maxLat";
pub const VAR_MAX_LON: &str = "var-maxLon";

/// Partial update of the host's URL/query state.
///
/// `partial` tells the host to merge rather than replace its whole query;
/// `replace` asks it not to push a new history entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryUpdate {
    pub query: IndexMap<String, f64>,
    pub partial: bool,
    pub replace: bool,
}

impl QueryUpdate {
    /// The four viewport variables for a visible box (south-west and
    /// north-east corners).
    pub fn viewport(bounds: &Bounds) -> Self {
        Self {
            query: IndexMap::from([
                (VAR_MIN_LAT.to_string(), bounds.min_lat),
                (VAR_MAX_LAT.to_string(), bounds.max_lat),
                (VAR_MIN_LON.to_string(), bounds.min_lon),
                (VAR_MAX_LON.to_string(), bounds.max_lon),
            ]),
            partial: true,
            replace: true,
        }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.query.get(key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_update_is_partial() {
        let update = QueryUpdate::viewport(&Bounds::new(1.0, 2.0, 3.0, 4.0));
        assert!(update.partial);
        assert!(update.replace);
        assert_eq!(update.get(VAR_MIN_LAT), Some(1.0));
        assert_eq!(update.get(VAR_MIN_LON), Some(2.0));
        assert_eq!(update.get(VAR_MAX_LAT), Some(3.0));
        assert_eq!(update.get(VAR_MAX_LON), Some(4.0));
        assert_eq!(update.get("var-other"), None);
    }

    #[test]
    fn query_serializes_as_named_variables() {
        let update = QueryUpdate::viewport(&Bounds::new(1.0, 2.0, 3.0, 4.0));
        let value = serde_json::to_value(&update).unwrap();
        assert!(value["query"].is_object());
        assert_eq!(value["query"]["var-minLat"], 1.0);
        assert_eq!(value["query"]["var-maxLon"], 4.0);
        assert_eq!(value["partial"], true);

        let back: QueryUpdate = serde_json::from_value(value).unwrap();
        assert_eq!(back, update);
    }
}
