//! Field extraction: probe frames for the columns the pipeline understands
//! and zip them into explicit per-sample rows.
//!
//! Nothing here fails. A missing column reads as `None` for every row and a
//! frame without any usable column yields zero rows.

use trackmap_protocol::{Field, FieldValue, Frame, Labels, SharedStr};

/// Label (on the frame or its coordinate fields) that names the track.
pub const TRACK_LABEL: &str = "track";

/// A logical column, matched against field names through its aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Track,
    Latitude,
    Longitude,
    Timestamp,
    Intensity,
    Popup,
    Tooltip,
}

impl Column {
    /// Accepted field names, compared case-insensitively.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Track => &["track"],
            Self::Latitude => &["latitude", "lat"],
            Self::Longitude => &["longitude", "lon", "lng"],
            Self::Timestamp => &["timestamp", "time", "ts"],
            Self::Intensity => &["intensity", "value", "weight"],
            Self::Popup => &["popup"],
            Self::Tooltip => &["tooltip"],
        }
    }
}

/// First field in frame order whose name matches one of the column's aliases.
pub fn find_field(frame: &Frame, column: Column) -> Option<&Field> {
    let aliases = column.aliases();
    frame
        .fields
        .iter()
        .find(|f| aliases.iter().any(|a| f.name.eq_ignore_ascii_case(a)))
}

/// Values of a column in original order, nulls included. `None` when the
/// frame has no such column.
pub fn column_values(frame: &Frame, column: Column) -> Option<&[FieldValue]> {
    find_field(frame, column).map(|f| f.values.as_slice())
}

/// One sample of a frame with every known column resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub track: Option<SharedStr>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timestamp: Option<f64>,
    pub intensity: Option<f64>,
    pub popup: Option<SharedStr>,
    pub tooltip: Option<SharedStr>,
}

/// The rows of one frame together with its identifying metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRows {
    pub frame_index: usize,
    pub ref_id: Option<SharedStr>,
    pub name: Option<String>,
    /// Frame labels merged with the labels of its coordinate fields; frame
    /// labels win on conflicts.
    pub labels: Labels,
    /// Value of the `track` label, if any.
    pub track_label: Option<SharedStr>,
    /// Whether the frame carries a per-sample `track` column.
    pub has_track_column: bool,
    pub rows: Vec<Row>,
}

/// Zip the known columns of `frame` into rows.
///
/// The row count is the length of the longest present column; shorter
/// columns read as null past their end.
pub fn extract_rows(frame_index: usize, frame: &Frame) -> FrameRows {
    let track = column_values(frame, Column::Track);
    let latitude = column_values(frame, Column::Latitude);
    let longitude = column_values(frame, Column::Longitude);
    let timestamp = column_values(frame, Column::Timestamp);
    let intensity = column_values(frame, Column::Intensity);
    let popup = column_values(frame, Column::Popup);
    let tooltip = column_values(frame, Column::Tooltip);

    let columns = [track, latitude, longitude, timestamp, intensity, popup, tooltip];
    let len = columns.iter().flatten().map(|c| c.len()).max().unwrap_or(0);

    let rows = (0..len)
        .map(|i| Row {
            track: text(track, i),
            latitude: number(latitude, i),
            longitude: number(longitude, i),
            timestamp: number(timestamp, i),
            intensity: number(intensity, i),
            popup: text(popup, i),
            tooltip: text(tooltip, i),
        })
        .collect();

    let labels = merged_labels(frame);
    let track_label = labels.get(TRACK_LABEL).map(|v| SharedStr::from(v.as_str()));

    log::trace!(
        "frame {frame_index} ({:?}): {len} rows, track column: {}, track label: {:?}",
        frame.ref_id,
        track.is_some(),
        track_label
    );

    FrameRows {
        frame_index,
        ref_id: frame.ref_id.clone(),
        name: frame.name.clone(),
        labels,
        track_label,
        has_track_column: track.is_some(),
        rows,
    }
}

/// Extract every frame independently, in input order.
pub fn extract_all(frames: &[Frame]) -> Vec<FrameRows> {
    frames
        .iter()
        .enumerate()
        .map(|(i, f)| extract_rows(i, f))
        .collect()
}

fn number(column: Option<&[FieldValue]>, i: usize) -> Option<f64> {
    column.and_then(|c| c.get(i)).and_then(FieldValue::as_f64)
}

fn text(column: Option<&[FieldValue]>, i: usize) -> Option<SharedStr> {
    column.and_then(|c| c.get(i)).and_then(FieldValue::as_text)
}

fn merged_labels(frame: &Frame) -> Labels {
    let mut labels = Labels::new();
    for column in [Column::Longitude, Column::Latitude] {
        if let Some(field) = find_field(frame, column) {
            labels.extend(field.labels.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }
    labels.extend(frame.labels.iter().map(|(k, v)| (k.clone(), v.clone())));
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nums(values: &[Option<f64>]) -> Vec<FieldValue> {
        values.iter().map(|v| FieldValue::from(*v)).collect()
    }

    #[test]
    fn aliases_are_case_insensitive() {
        let frame = Frame::new("A")
            .with_field(Field::new("Lat", nums(&[Some(1.0)])))
            .with_field(Field::new("LNG", nums(&[Some(2.0)])));
        assert!(find_field(&frame, Column::Latitude).is_some());
        assert!(find_field(&frame, Column::Longitude).is_some());
        assert!(column_values(&frame, Column::Timestamp).is_none());
    }

    #[test]
    fn first_matching_field_wins() {
        let frame = Frame::new("A")
            .with_field(Field::new("lat", nums(&[Some(1.0)])))
            .with_field(Field::new("latitude", nums(&[Some(9.0)])));
        let values = column_values(&frame, Column::Latitude).unwrap();
        assert_eq!(values[0].as_f64(), Some(1.0));
    }

    #[test]
    fn rows_keep_nulls_in_place() {
        let frame = Frame::new("A")
            .with_field(Field::new("latitude", nums(&[Some(1.0), None, Some(3.0)])))
            .with_field(Field::new("longitude", nums(&[Some(4.0), None, Some(6.0)])))
            .with_field(Field::new("timestamp", nums(&[Some(10.0), Some(20.0), Some(30.0)])));
        let fr = extract_rows(0, &frame);
        assert_eq!(fr.rows.len(), 3);
        assert_eq!(fr.rows[1].latitude, None);
        assert_eq!(fr.rows[1].timestamp, Some(20.0));
        assert_eq!(fr.rows[2].longitude, Some(6.0));
        assert!(!fr.has_track_column);
    }

    #[test]
    fn short_columns_pad_with_null() {
        let frame = Frame::new("A")
            .with_field(Field::new("latitude", nums(&[Some(1.0), Some(2.0)])))
            .with_field(Field::new("longitude", nums(&[Some(4.0)])));
        let fr = extract_rows(0, &frame);
        assert_eq!(fr.rows.len(), 2);
        assert_eq!(fr.rows[1].longitude, None);
        assert_eq!(fr.rows[1].intensity, None);
    }

    #[test]
    fn frame_without_known_columns_has_no_rows() {
        let frame = Frame::new("A").with_field(Field::new("speed", nums(&[Some(1.0)])));
        let fr = extract_rows(3, &frame);
        assert!(fr.rows.is_empty());
        assert_eq!(fr.frame_index, 3);
    }

    #[test]
    fn track_label_from_field_labels() {
        let mut field_labels = Labels::new();
        field_labels.insert("track".into(), "bus-9".into());
        field_labels.insert("line".into(), "5A".into());
        let frame = Frame::new("A")
            .with_label("line", "6B")
            .with_field(Field::new("latitude", nums(&[Some(1.0)])).with_labels(field_labels));
        let fr = extract_rows(0, &frame);
        assert_eq!(fr.track_label.as_deref(), Some("bus-9"));
        assert_eq!(fr.labels.get("line").map(String::as_str), Some("6B"));
    }

    #[test]
    fn text_columns_resolve() {
        let frame = Frame::new("A")
            .with_field(Field::new("track", vec!["t1".into(), FieldValue::Number(2.0)]))
            .with_field(Field::new("popup", vec!["hello".into(), FieldValue::Null]));
        let fr = extract_rows(0, &frame);
        assert_eq!(fr.rows[0].track.as_deref(), Some("t1"));
        assert_eq!(fr.rows[1].track.as_deref(), Some("2"));
        assert_eq!(fr.rows[0].popup.as_deref(), Some("hello"));
        assert_eq!(fr.rows[1].popup, None);
        assert!(fr.has_track_column);
    }
}
