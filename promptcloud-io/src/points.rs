//! JSON point array codec
//!
//! Points travel as arrays of either three coordinates `[x, y, z]` or three
//! coordinates followed by three color channels `[x, y, z, r, g, b]`.

use crate::error::IoError;
use crate::Result;
use promptcloud_core::{ColoredPoint3f, ColoredPointCloud3f};
use std::io::Write;

/// Parse a raw JSON `Point[]` document
pub fn parse_points(bytes: &[u8]) -> Result<ColoredPointCloud3f> {
    let rows: Vec<Vec<f64>> = serde_json::from_slice(bytes).map_err(|e| IoError::ParseError {
        message: format!("expected an array of points: {e}"),
    })?;
    points_from_rows(&rows)
}

/// Convert already-deserialized rows into a point cloud
pub fn points_from_rows(rows: &[Vec<f64>]) -> Result<ColoredPointCloud3f> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| point_from_row(index, row))
        .collect()
}

/// Convert a point cloud back into rows, emitting color channels where present
pub fn points_to_rows(cloud: &ColoredPointCloud3f) -> Vec<Vec<f64>> {
    cloud
        .iter()
        .map(|p| {
            let mut row = vec![p.position.x as f64, p.position.y as f64, p.position.z as f64];
            if let Some([r, g, b]) = p.color {
                row.extend([r as f64, g as f64, b as f64]);
            }
            row
        })
        .collect()
}

/// Serialize a point cloud as a JSON `Point[]` document
pub fn write_points<W: Write>(cloud: &ColoredPointCloud3f, writer: W) -> Result<()> {
    serde_json::to_writer(writer, &points_to_rows(cloud))?;
    Ok(())
}

fn point_from_row(index: usize, row: &[f64]) -> Result<ColoredPoint3f> {
    let invalid = |message: String| IoError::InvalidPoint { index, message };

    match row {
        [x, y, z] => Ok(ColoredPoint3f::new(*x as f32, *y as f32, *z as f32)),
        [x, y, z, r, g, b] => {
            let mut color = [0u8; 3];
            for (slot, channel) in color.iter_mut().zip([r, g, b]) {
                if channel.fract() != 0.0 || !(0.0..=255.0).contains(channel) {
                    return Err(invalid(format!("color channel {channel} is not an integer in 0..=255")));
                }
                *slot = *channel as u8;
            }
            Ok(ColoredPoint3f::with_color(*x as f32, *y as f32, *z as f32, color))
        }
        other => Err(invalid(format!(
            "expected 3 or 6 values, found {}",
            other.len()
        ))),
    }
}

/// Convenience serialization for point clouds
pub trait PointsExt {
    /// Render the cloud as a JSON `Point[]` string
    fn to_json(&self) -> Result<String>;
}

impl PointsExt for ColoredPointCloud3f {
    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&points_to_rows(self))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_plain_and_colored_points() {
        let cloud = parse_points(br#"[[0, 0, 0, 255, 0, 0], [1.5, -2, 3.25]]"#).unwrap();

        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud[0].color, Some([255, 0, 0]));
        assert!(cloud[1].color.is_none());
        assert_relative_eq!(cloud[1].position.z, 3.25);
    }

    #[test]
    fn test_partial_color_rejected() {
        let err = parse_points(b"[[0, 0, 0, 255, 0]]").unwrap_err();
        assert!(matches!(err, IoError::InvalidPoint { index: 0, .. }));
    }

    #[test]
    fn test_out_of_range_channel_rejected() {
        let err = parse_points(b"[[0, 0, 0], [1, 1, 1, 256, 0, 0]]").unwrap_err();
        assert!(matches!(err, IoError::InvalidPoint { index: 1, .. }));

        let err = parse_points(b"[[1, 1, 1, 0.5, 0, 0]]").unwrap_err();
        assert!(matches!(err, IoError::InvalidPoint { index: 0, .. }));
    }

    #[test]
    fn test_non_array_document_is_parse_error() {
        let err = parse_points(br#"{"points": []}"#).unwrap_err();
        assert!(matches!(err, IoError::ParseError { .. }));
    }

    #[test]
    fn test_json_output_keeps_color_arity() {
        let cloud = ColoredPointCloud3f::from_points(vec![
            ColoredPoint3f::with_color(0.0, 1.0, 2.0, [10, 20, 30]),
            ColoredPoint3f::new(3.0, 4.0, 5.0),
        ]);

        let json = cloud.to_json().unwrap();
        assert_eq!(json, "[[0.0,1.0,2.0,10.0,20.0,30.0],[3.0,4.0,5.0]]");
    }
}
