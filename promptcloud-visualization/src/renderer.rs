//! Rendering point clouds through a [`PlotBackend`]

use crate::backend::PlotBackend;
use crate::readiness::{Readiness, ReadinessPoller};
use crate::trace::{MarkerStyle, PlotLayout, ScatterTrace};
use promptcloud_core::{ColoredPointCloud3f, Notice, Notifier};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::OnceCell;

/// Errors surfaced by [`PlotRenderer::render`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("plotting library unavailable after {attempts} attempts")]
    Unavailable { attempts: u32 },

    #[error("error visualizing point cloud: {0}")]
    Backend(String),
}

/// Renderer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Viewport element the main point cloud is drawn into
    pub viewport: String,
    /// Delay between readiness checks, in milliseconds
    pub poll_interval_ms: u64,
    pub max_poll_attempts: u32,
    pub marker: MarkerStyle,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            viewport: "visualization".to_string(),
            poll_interval_ms: 500,
            max_poll_attempts: 20,
            marker: MarkerStyle::default(),
        }
    }
}

impl RenderConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Draws point clouds once the plotting library is available
///
/// Readiness is established once. Renders racing on first use share a single
/// poll; after it is exhausted every render fails fast without polling again.
pub struct PlotRenderer {
    backend: Arc<dyn PlotBackend>,
    notifier: Arc<dyn Notifier>,
    config: RenderConfig,
    layout: PlotLayout,
    readiness: OnceCell<Readiness>,
}

impl PlotRenderer {
    pub fn new(backend: Arc<dyn PlotBackend>, notifier: Arc<dyn Notifier>, config: RenderConfig) -> Self {
        Self {
            backend,
            notifier,
            config,
            layout: PlotLayout::default(),
            readiness: OnceCell::new(),
        }
    }

    pub fn with_layout(mut self, layout: PlotLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Draw into the configured default viewport
    pub async fn render_default(&self, cloud: &ColoredPointCloud3f) -> Result<(), RenderError> {
        let viewport = self.config.viewport.clone();
        self.render(&viewport, cloud).await
    }

    /// Draw `cloud` into `viewport`
    pub async fn render(&self, viewport: &str, cloud: &ColoredPointCloud3f) -> Result<(), RenderError> {
        self.ensure_ready().await?;

        let trace = ScatterTrace::from_cloud(cloud, &self.config.marker);
        match self.backend.scatter3d(viewport, &trace, &self.layout) {
            Ok(()) => {
                tracing::debug!(viewport, points = trace.len(), "rendered point cloud");
                Ok(())
            }
            Err(e) => {
                tracing::error!(viewport, error = %e, "plot backend failed");
                let err = RenderError::Backend(e.to_string());
                self.notifier.notify(Notice::error(format!("Error visualizing point cloud: {e}")));
                Err(err)
            }
        }
    }

    async fn ensure_ready(&self) -> Result<(), RenderError> {
        let state = *self
            .readiness
            .get_or_init(|| async {
                let backend = Arc::clone(&self.backend);
                let mut poller = ReadinessPoller::new(self.config.poll_interval(), self.config.max_poll_attempts);
                let state = poller.wait(move || backend.is_ready()).await;

                if let Readiness::Exhausted { attempts } = state {
                    tracing::error!(attempts, "plotting library failed to load");
                    self.notifier.notify(Notice::fatal(
                        "Plotting library failed to load. Please refresh the page.",
                    ));
                }
                state
            })
            .await;

        match state {
            Readiness::Exhausted { attempts } => Err(RenderError::Unavailable { attempts }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, MockPlotBackend};
    use parking_lot::Mutex;
    use promptcloud_core::{ColoredPoint3f, Severity};

    #[derive(Default)]
    struct Notices(Mutex<Vec<Notice>>);

    impl Notifier for Notices {
        fn notify(&self, notice: Notice) {
            self.0.lock().push(notice);
        }
    }

    fn red_origin() -> ColoredPointCloud3f {
        ColoredPointCloud3f::from_points(vec![ColoredPoint3f::with_color(0.0, 0.0, 0.0, [255, 0, 0])])
    }

    #[tokio::test(start_paused = true)]
    async fn test_renders_colored_point() {
        let mut backend = MockPlotBackend::new();
        backend.expect_is_ready().return_const(true);
        backend
            .expect_scatter3d()
            .withf(|viewport, trace, _| {
                viewport == "visualization"
                    && trace.len() == 1
                    && trace.css_colors() == Some(&["rgb(255,0,0)".to_string()][..])
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let notices = Arc::new(Notices::default());
        let renderer = PlotRenderer::new(Arc::new(backend), notices.clone(), RenderConfig::default());

        renderer.render_default(&red_origin()).await.unwrap();
        assert!(notices.0.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_backend_failure_is_non_fatal_notice() {
        let mut backend = MockPlotBackend::new();
        backend.expect_is_ready().return_const(true);
        backend
            .expect_scatter3d()
            .returning(|_, _, _| Err(BackendError("WebGL context lost".to_string())));

        let notices = Arc::new(Notices::default());
        let renderer = PlotRenderer::new(Arc::new(backend), notices.clone(), RenderConfig::default());

        let err = renderer.render_default(&red_origin()).await.unwrap_err();
        assert_eq!(err, RenderError::Backend("WebGL context lost".to_string()));

        let notices = notices.0.lock();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].severity, Severity::Error);
        assert!(notices[0].message.contains("WebGL context lost"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unavailable_backend_is_fatal_once() {
        let mut backend = MockPlotBackend::new();
        backend.expect_is_ready().times(3).return_const(false);
        backend.expect_scatter3d().never();

        let notices = Arc::new(Notices::default());
        let config = RenderConfig {
            max_poll_attempts: 3,
            ..RenderConfig::default()
        };
        let renderer = PlotRenderer::new(Arc::new(backend), notices.clone(), config);

        let err = renderer.render_default(&red_origin()).await.unwrap_err();
        assert_eq!(err, RenderError::Unavailable { attempts: 3 });

        // Second render fails fast without polling again
        let err = renderer.render_default(&red_origin()).await.unwrap_err();
        assert_eq!(err, RenderError::Unavailable { attempts: 3 });

        let notices = notices.0.lock();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].severity, Severity::Fatal);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_first_renders_poll_once() {
        let mut backend = MockPlotBackend::new();
        backend.expect_is_ready().times(3).return_const(false);
        backend.expect_scatter3d().never();

        let notices = Arc::new(Notices::default());
        let config = RenderConfig {
            max_poll_attempts: 3,
            ..RenderConfig::default()
        };
        let renderer = PlotRenderer::new(Arc::new(backend), notices.clone(), config);
        let cloud = red_origin();

        let (first, second) = tokio::join!(renderer.render_default(&cloud), renderer.render_default(&cloud));
        assert_eq!(first, Err(RenderError::Unavailable { attempts: 3 }));
        assert_eq!(second, Err(RenderError::Unavailable { attempts: 3 }));

        let notices = notices.0.lock();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].severity, Severity::Fatal);
    }
}
