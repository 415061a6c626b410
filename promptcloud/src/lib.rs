//! # promptcloud
//!
//! Turn natural-language instructions into 3D point clouds served by an
//! inference backend, and show them as interactive scatter plots.
//!
//! This is the umbrella crate that provides convenient access to all promptcloud
//! functionality. Use the individual crates for more granular control over
//! dependencies.
//!
//! ## Features
//!
//! - **Core**: Point and point cloud types, instructions, notices, shape synthesis
//! - **I/O**: JSON point arrays, inline debug images, media URLs
//! - **Visualization**: Scatter traces and a readiness-aware plot renderer
//! - **Client**: Single-flight request coordination, page events, artifact refresh
//!
//! ## Quick Start
//!
//! ```rust
//! use promptcloud::prelude::*;
//!
//! // Synthesize one of the precomputed shapes
//! let cloud = generate(Shape::Torus, 200);
//! assert_eq!(cloud.len(), 200);
//!
//! // Instructions are trimmed and must not be empty
//! assert!(Instruction::parse("   ").is_err());
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables io, visualization and client
//! - `io`: Wire formats and media locations
//! - `visualization`: Plot renderer
//! - `client`: Request coordinator and UI controller (implies io and visualization)
//! - `all`: Enables all features

// Re-export core functionality
pub use promptcloud_core::*;

// Re-export sub-crates
#[cfg(feature = "io")]
pub use promptcloud_io as io;

#[cfg(feature = "visualization")]
pub use promptcloud_visualization as visualization;

#[cfg(feature = "client")]
pub use promptcloud_client as client;

/// Convenient imports for common use cases
pub mod prelude {
    pub use promptcloud_core::*;

    #[cfg(feature = "io")]
    pub use promptcloud_io::{parse_points, write_points, ImageSource, MediaLocator, PointsExt};

    #[cfg(feature = "visualization")]
    pub use promptcloud_visualization::{PlotBackend, PlotRenderer, RenderConfig, ScatterTrace};

    #[cfg(feature = "client")]
    pub use promptcloud_client::{
        ArtifactRefresher, ClientConfig, HttpTransport, Page, RequestCoordinator, ReqwestTransport,
        SubmitOutcome, TaskCatalog, TaskSpec, UiController, UiEvent,
    };
}
