//! Request coordination for the promptcloud demo client
//! 
//! This crate drives the instruction → point cloud round trip:
//! - [`RequestCoordinator`]: single-flight submission with timeout,
//!   cancellation and fallback recovery
//! - [`UiController`]: maps page events onto coordinator calls
//! - [`ArtifactRefresher`]: periodic refresh of debug artifacts
//! - [`HttpTransport`]: the HTTP seam, with a reqwest implementation

pub mod api;
pub mod config;
pub mod controller;
pub mod coordinator;
pub mod error;
pub mod notify;
pub mod page;
pub mod refresh;
pub mod scene;
pub mod tasks;
pub mod transport;

pub use api::*;
pub use config::*;
pub use controller::*;
pub use coordinator::*;
pub use error::*;
pub use notify::*;
pub use page::*;
pub use refresh::*;
pub use scene::*;
pub use tasks::*;
pub use transport::*;
