//! Synthetic point clouds for placeholder visuals
//!
//! Each generator draws points independently and uniformly over its
//! parameter domain. Apart from the sphere (which uses the `acos(2u - 1)`
//! polar measure) the result is not area- or volume-uniform on the final
//! surface.

use crate::error::ValidationError;
use crate::point::Point3f;
use crate::point_cloud::PointCloud;
use rand::Rng;
use std::collections::BTreeMap;
use std::f32::consts::TAU;
use std::fmt;
use std::str::FromStr;

/// Number of points in each placeholder cloud
pub const DEFAULT_POINT_COUNT: usize = 1000;

/// Geometric primitives the synthesizer can sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shape {
    Sphere,
    Cube,
    Torus,
    Cylinder,
    Pyramid,
}

impl Shape {
    pub const ALL: [Shape; 5] = [
        Shape::Sphere,
        Shape::Cube,
        Shape::Torus,
        Shape::Cylinder,
        Shape::Pyramid,
    ];

    /// Placeholder slot id (1-based) used by the fallback table
    pub fn slot(self) -> u8 {
        match self {
            Shape::Sphere => 1,
            Shape::Cube => 2,
            Shape::Torus => 3,
            Shape::Cylinder => 4,
            Shape::Pyramid => 5,
        }
    }

    pub fn from_slot(slot: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|shape| shape.slot() == slot)
    }

    pub fn name(self) -> &'static str {
        match self {
            Shape::Sphere => "sphere",
            Shape::Cube => "cube",
            Shape::Torus => "torus",
            Shape::Cylinder => "cylinder",
            Shape::Pyramid => "pyramid",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shape {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|shape| shape.name() == lowered)
            .ok_or_else(|| ValidationError::UnknownShape(s.to_string()))
    }
}

/// Sample `count` points approximating `shape` using the thread-local RNG
pub fn generate(shape: Shape, count: usize) -> PointCloud<Point3f> {
    generate_with(&mut rand::thread_rng(), shape, count)
}

/// Sample `count` points approximating `shape` from the given RNG
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, shape: Shape, count: usize) -> PointCloud<Point3f> {
    let mut cloud = PointCloud::with_capacity(count);
    for _ in 0..count {
        let point = match shape {
            Shape::Sphere => sample_sphere(rng),
            Shape::Cube => sample_cube(rng),
            Shape::Torus => sample_torus(rng),
            Shape::Cylinder => sample_cylinder(rng),
            Shape::Pyramid => sample_pyramid(rng),
        };
        cloud.push(point);
    }
    cloud
}

/// Build the five placeholder clouds keyed by their slot id
pub fn precomputed_clouds(count: usize) -> BTreeMap<u8, PointCloud<Point3f>> {
    let mut rng = rand::thread_rng();
    Shape::ALL
        .into_iter()
        .map(|shape| (shape.slot(), generate_with(&mut rng, shape, count)))
        .collect()
}

fn sample_sphere<R: Rng + ?Sized>(rng: &mut R) -> Point3f {
    let theta = rng.gen_range(0.0..TAU);
    let u: f32 = rng.gen();
    let phi = (2.0 * u - 1.0).acos();
    let r = 1.0;

    Point3f::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

fn sample_cube<R: Rng + ?Sized>(rng: &mut R) -> Point3f {
    Point3f::new(
        rng.gen_range(-1.0..=1.0),
        rng.gen_range(-1.0..=1.0),
        rng.gen_range(-1.0..=1.0),
    )
}

fn sample_torus<R: Rng + ?Sized>(rng: &mut R) -> Point3f {
    const MAJOR: f32 = 1.0;
    const MINOR: f32 = 0.3;

    let theta = rng.gen_range(0.0..TAU);
    let phi = rng.gen_range(0.0..TAU);
    let ring = MAJOR + MINOR * phi.cos();

    Point3f::new(ring * theta.cos(), ring * theta.sin(), MINOR * phi.sin())
}

fn sample_cylinder<R: Rng + ?Sized>(rng: &mut R) -> Point3f {
    const RADIUS: f32 = 0.5;
    const HEIGHT: f32 = 2.0;

    let theta = rng.gen_range(0.0..TAU);
    let z = rng.gen_range(-HEIGHT / 2.0..=HEIGHT / 2.0);

    Point3f::new(RADIUS * theta.cos(), RADIUS * theta.sin(), z)
}

fn sample_pyramid<R: Rng + ?Sized>(rng: &mut R) -> Point3f {
    const SIZE: f32 = 2.0;

    let x = rng.gen_range(-SIZE / 2.0..SIZE / 2.0);
    let y = rng.gen_range(-SIZE / 2.0..SIZE / 2.0);
    let z = rng.gen_range(0.0..SIZE);

    // Corners beyond the unit base radius get a negative scale and fold below z = 0.
    let dist_from_center = (x * x + y * y).sqrt();
    let scale = 1.0 - dist_from_center / (SIZE / 2.0);

    Point3f::new(x, y, z * scale)
}
