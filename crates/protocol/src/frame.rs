use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::shared_str::SharedStr;

/// Key-value labels attached to a frame or a field (e.g. `{track: "vehicle-7"}`).
pub type Labels = BTreeMap<String, String>;

/// One input series as delivered by the host.
///
/// ```text
///   { "refId": "A", "labels": {"track": "bus-1"},
///     "fields": [ { "name": "latitude", "values": [56.1, null, 56.2] }, ... ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    /// Query identifier this frame was produced by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<SharedStr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: Labels,
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// A named column. All fields of a frame are expected to share one length,
/// but nothing downstream relies on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: Labels,
    #[serde(default)]
    pub values: Vec<FieldValue>,
}

/// A single cell. `null` marks an alignment gap in a regular time grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(SharedStr),
    Bool(bool),
    #[default]
    Null,
}

impl FieldValue {
    /// Finite numeric view of the value. Numeric strings are accepted since
    /// some data sources stringify every column.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
            Self::Bool(_) | Self::Null => None,
        }
        .filter(|v| v.is_finite())
    }

    /// Text view of the value. Numbers are rendered the way `Display` shows them.
    pub fn as_text(&self) -> Option<SharedStr> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::Number(n) => Some(SharedStr::from(n.to_string())),
            Self::Bool(b) => Some(SharedStr::from(b.to_string())),
            Self::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Text(SharedStr::from(v))
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl Field {
    pub fn new(name: impl Into<String>, values: Vec<FieldValue>) -> Self {
        Self {
            name: name.into(),
            labels: Labels::new(),
            values,
        }
    }

    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }
}

impl Frame {
    pub fn new(ref_id: impl Into<SharedStr>) -> Self {
        Self {
            ref_id: Some(ref_id.into()),
            ..Self::default()
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Longest column length.
    pub fn len(&self) -> usize {
        self.fields.iter().map(|f| f.values.len()).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
