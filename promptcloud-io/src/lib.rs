//! Wire formats and media locations for promptcloud
//! 
//! This crate converts between the JSON point arrays exchanged with the
//! inference backend and the core point cloud types, decodes inline debug
//! images, and builds the URLs of precomputed media resources.

pub mod points;
pub mod image;
pub mod media;
pub mod error;

pub use error::*;
pub use points::{parse_points, points_from_rows, points_to_rows, write_points, PointsExt};
pub use image::{ImageFormat, ImageSource};
pub use media::{join_url, MediaKind, MediaLocator};

/// Result type for wire decoding
pub type Result<T> = std::result::Result<T, IoError>;
