//! Point cloud data structures and functionality

use crate::point::*;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// A generic point cloud container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointCloud<T> {
    pub points: Vec<T>,
}

/// A point cloud with bare 3D points
pub type PointCloud3f = PointCloud<Point3f>;

/// A point cloud whose points may carry colors
pub type ColoredPointCloud3f = PointCloud<ColoredPoint3f>;

impl<T> PointCloud<T> {
    /// Create a new empty point cloud
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
        }
    }

    /// Create a new point cloud with specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Create a point cloud from a vector of points
    pub fn from_points(points: Vec<T>) -> Self {
        Self { points }
    }

    /// Get the number of points in the cloud
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the point cloud is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Add a point to the cloud
    pub fn push(&mut self, point: T) {
        self.points.push(point);
    }

    /// Get an iterator over the points
    pub fn iter(&self) -> std::slice::Iter<T> {
        self.points.iter()
    }

}

impl<T> Default for PointCloud<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for PointCloud<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl<T> IntoIterator for PointCloud<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a PointCloud<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl<T> Extend<T> for PointCloud<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}

impl<T> FromIterator<T> for PointCloud<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            points: Vec::from_iter(iter),
        }
    }
}

impl PointCloud<Point3f> {
    /// Lift every point into an uncolored [`ColoredPoint3f`]
    pub fn into_colored(self) -> PointCloud<ColoredPoint3f> {
        self.points.into_iter().map(ColoredPoint3f::from).collect()
    }
}

impl PointCloud<ColoredPoint3f> {
    /// True when every point carries color channels
    ///
    /// An empty cloud is not considered colored.
    pub fn is_fully_colored(&self) -> bool {
        !self.is_empty() && self.points.iter().all(ColoredPoint3f::is_colored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_and_order_preserved() {
        let mut cloud = PointCloud::new();
        cloud.push(Point3f::new(1.0, 0.0, 0.0));
        cloud.push(Point3f::new(1.0, 0.0, 0.0));
        cloud.push(Point3f::new(0.0, 1.0, 0.0));

        cloud.extend([Point3f::new(0.0, 0.0, 1.0)]);

        assert_eq!(cloud.len(), 4);
        assert_eq!(cloud[0], cloud[1]);
        assert_eq!(cloud[2], Point3f::new(0.0, 1.0, 0.0));
        assert_eq!(cloud.iter().last(), Some(&Point3f::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_fully_colored() {
        let mut cloud = ColoredPointCloud3f::new();
        assert!(!cloud.is_fully_colored());

        cloud.push(ColoredPoint3f::with_color(0.0, 0.0, 0.0, [255, 0, 0]));
        assert!(cloud.is_fully_colored());

        cloud.push(ColoredPoint3f::new(1.0, 1.0, 1.0));
        assert!(!cloud.is_fully_colored());
    }

    #[test]
    fn test_into_colored_keeps_positions() {
        let cloud = PointCloud3f::from_points(vec![Point3f::new(0.5, 0.5, 0.5)]);
        let colored = cloud.into_colored();
        assert_eq!(colored.len(), 1);
        assert_eq!(colored[0].position, Point3f::new(0.5, 0.5, 0.5));
        assert!(colored[0].color.is_none());
    }
}
