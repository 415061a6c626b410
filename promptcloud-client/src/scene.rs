//! The scene currently on display

use crate::page::IMAGE_SLOTS;
use promptcloud_core::{ColoredPointCloud3f, Drawable, Point3f};
use promptcloud_io::ImageSource;

/// Where the displayed cloud came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneOrigin {
    Empty,
    /// Returned by the inference backend
    Response,
    /// Precomputed cloud loaded after a failed request
    Fallback,
    /// Precomputed cloud loaded for a newly selected task or configuration
    Defaults,
}

/// Last point cloud handed to the renderer plus its side-channel artifacts
///
/// Overwritten in place on every successful render.
#[derive(Debug, Clone)]
pub struct RenderedScene {
    pub origin: SceneOrigin,
    pub cloud: ColoredPointCloud3f,
    pub generated_code: Option<String>,
    pub images: [Option<ImageSource>; IMAGE_SLOTS],
}

impl Default for RenderedScene {
    fn default() -> Self {
        Self {
            origin: SceneOrigin::Empty,
            cloud: ColoredPointCloud3f::new(),
            generated_code: None,
            images: [None, None],
        }
    }
}

impl RenderedScene {
    pub fn summary(&self) -> SceneSummary {
        SceneSummary {
            origin: self.origin,
            points: self.cloud.len(),
            bounds: self.cloud.bounding_box(),
            has_code: self.generated_code.is_some(),
            images: self.images.iter().filter(|image| image.is_some()).count(),
        }
    }
}

/// Lightweight description of a scene, returned from submissions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneSummary {
    pub origin: SceneOrigin,
    pub points: usize,
    pub bounds: (Point3f, Point3f),
    pub has_code: bool,
    pub images: usize,
}
