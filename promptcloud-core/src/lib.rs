//! Core data structures for promptcloud
//! 
//! This crate provides the fundamental types shared by the client and the
//! renderer: points (optionally colored), point clouds, user instructions,
//! and the synthetic shape generators used as placeholder visuals.

pub mod point;
pub mod point_cloud;
pub mod instruction;
pub mod notice;
pub mod synth;
pub mod traits;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use instruction::*;
pub use notice::*;
pub use synth::{generate, generate_with, precomputed_clouds, Shape, DEFAULT_POINT_COUNT};
pub use traits::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};

// Type aliases for easier imports
pub type Point = Point3f;
