//! Point types and related functionality

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A point that may carry an RGB color
///
/// The color is either fully present or absent; a point with only some of
/// its channels cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColoredPoint3f {
    pub position: Point3f,
    pub color: Option<[u8; 3]>,
}

impl ColoredPoint3f {
    /// Create an uncolored point
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Point3f::new(x, y, z),
            color: None,
        }
    }

    /// Create a point with RGB color channels
    pub fn with_color(x: f32, y: f32, z: f32, color: [u8; 3]) -> Self {
        Self {
            position: Point3f::new(x, y, z),
            color: Some(color),
        }
    }

    /// Whether the point carries color channels
    pub fn is_colored(&self) -> bool {
        self.color.is_some()
    }

    /// Whether every coordinate is finite
    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|c| c.is_finite())
    }
}

impl Default for ColoredPoint3f {
    fn default() -> Self {
        Self {
            position: Point3f::origin(),
            color: None,
        }
    }
}

impl From<Point3f> for ColoredPoint3f {
    fn from(position: Point3f) -> Self {
        Self { position, color: None }
    }
}

impl From<ColoredPoint3f> for Point3f {
    fn from(point: ColoredPoint3f) -> Self {
        point.position
    }
}
