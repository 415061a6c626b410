//! The external scatter-plot capability

use crate::trace::{PlotLayout, ScatterTrace};
use thiserror::Error;

/// Failure raised by the plotting library while drawing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct BackendError(pub String);

/// A 3D scatter-plot capability that may finish loading after the page
#[cfg_attr(test, mockall::automock)]
pub trait PlotBackend: Send + Sync {
    /// Whether the library has loaded and can draw
    fn is_ready(&self) -> bool;

    /// Replace the contents of `viewport` with a single scatter trace
    fn scatter3d(&self, viewport: &str, trace: &ScatterTrace, layout: &PlotLayout) -> Result<(), BackendError>;
}
