//! Core traits for promptcloud

use crate::{point::*, point_cloud::*};

/// Geometry that can be framed in a plot
pub trait Drawable {
    fn bounding_box(&self) -> (Point3f, Point3f);

    fn center(&self) -> Point3f;
}

impl<T> Drawable for PointCloud<T>
where
    T: Copy,
    Point3f: From<T>,
{
    /// Axis-aligned bounds; both corners sit at the origin for an empty cloud
    fn bounding_box(&self) -> (Point3f, Point3f) {
        let mut positions = self.iter().map(|&p| Point3f::from(p));
        let Some(first) = positions.next() else {
            return (Point3f::origin(), Point3f::origin());
        };

        positions.fold((first, first), |(min, max), p| (min.inf(&p), max.sup(&p)))
    }

    fn center(&self) -> Point3f {
        let (min, max) = self.bounding_box();
        nalgebra::center(&min, &max)
    }
}
