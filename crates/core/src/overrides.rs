//! Per-track style overrides.
//!
//! Each table maps a selector (a query name or a label value) to a style
//! value. Tables are built once per pipeline run from the options and
//! handed to the view projectors; lookups are exact-match.

use indexmap::IndexMap;
use trackmap_protocol::SharedStr;

use crate::options::{ColorOverride, TrackMapOptions};

/// Selector → value map. When a selector is registered twice the later
/// entry replaces the earlier one.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideTable<V> {
    entries: IndexMap<SharedStr, V>,
}

impl<V> Default for OverrideTable<V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<V> OverrideTable<V> {
    /// Build from `(selector, value)` pairs, dropping pairs with an empty
    /// selector and pairs `accept` rejects.
    pub fn build<'a, I>(entries: I, accept: impl Fn(&V) -> bool) -> Self
    where
        I: IntoIterator<Item = (&'a str, V)>,
    {
        let mut table = Self::default();
        for (selector, value) in entries {
            let selector = selector.trim();
            if selector.is_empty() || !accept(&value) {
                log::trace!("ignoring malformed override for {selector:?}");
                continue;
            }
            table.entries.insert(SharedStr::from(selector), value);
        }
        table
    }

    pub fn get(&self, selector: &str) -> Option<&V> {
        self.entries.get(selector)
    }

    /// Lookup with an optional selector; a missing selector is a miss.
    pub fn lookup(&self, selector: Option<&str>) -> Option<&V> {
        selector.and_then(|s| self.get(s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Every override table the views consult, derived from one options value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleOverrides {
    pub marker_color_by_query: OverrideTable<SharedStr>,
    pub marker_size_by_query: OverrideTable<f64>,
    pub marker_html_by_label: OverrideTable<SharedStr>,
    pub ant_color_by_query: OverrideTable<SharedStr>,
    pub ant_color_by_label: OverrideTable<SharedStr>,
}

impl StyleOverrides {
    pub fn from_options(options: &TrackMapOptions) -> Self {
        let non_blank = |s: &SharedStr| !s.trim().is_empty();
        let colors = |list: &[ColorOverride]| {
            OverrideTable::build(
                list.iter()
                    .map(|o| (o.label.as_str(), SharedStr::from(o.color.as_str()))),
                non_blank,
            )
        };

        Self {
            marker_color_by_query: colors(&options.marker.color_overrides_by_query),
            marker_size_by_query: OverrideTable::build(
                options
                    .marker
                    .size_overrides_by_query
                    .iter()
                    .map(|o| (o.label.as_str(), o.size)),
                |size| size.is_finite() && *size > 0.0,
            ),
            marker_html_by_label: OverrideTable::build(
                options
                    .marker
                    .html_overrides_by_label
                    .iter()
                    .map(|o| (o.label.as_str(), SharedStr::from(o.html.as_str()))),
                non_blank,
            ),
            ant_color_by_query: colors(&options.ant.color_overrides_by_query),
            ant_color_by_label: colors(&options.ant.color_overrides_by_label),
        }
    }
}
