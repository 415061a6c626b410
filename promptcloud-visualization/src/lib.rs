//! Visualization of point clouds through an external plotting capability
//! 
//! The plotting library itself is a collaborator behind [`PlotBackend`].
//! This crate provides:
//! - Scatter trace and layout construction in the plotly JSON shape
//! - A bounded readiness poller for late-loading plotting libraries
//! - [`PlotRenderer`], which ties both together and reports failures

pub mod backend;
pub mod trace;
pub mod readiness;
pub mod renderer;

pub use backend::*;
pub use trace::*;
pub use readiness::*;
pub use renderer::*;
