//! Single-flight submission of instructions
//!
//! A submission moves the coordinator from `Idle` to `Submitting`, races the
//! generation request against its deadline and a cancel signal, then either
//! renders the response or recovers by rendering a precomputed cloud. The
//! `Submitting` effects (in-flight flag, disabled input, busy indicator) are
//! owned by a [`Session`] guard and undone when it drops, whichever way the
//! submission ends.

use crate::api::{ErrorBody, GenerateRequest, GenerateResponse};
use crate::config::ClientConfig;
use crate::error::{FallbackError, RequestError, GENERIC_FAILURE};
use crate::page::{Page, IMAGE_SLOTS};
use crate::scene::{RenderedScene, SceneOrigin, SceneSummary};
use crate::tasks::Selection;
use crate::transport::{HttpResponse, HttpTransport, TransportError};
use parking_lot::Mutex;
use promptcloud_core::{ColoredPointCloud3f, Instruction, Notice, Notifier, ValidationError};
use promptcloud_io::{join_url, parse_points, points_from_rows, ImageSource, MediaLocator};
use promptcloud_visualization::{PlotBackend, PlotRenderer, RenderError};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Coarse state of the coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
}

/// How a call to [`RequestCoordinator::submit`] ended
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Rejected before any network activity
    Rejected(ValidationError),
    /// Another submission was in flight; nothing happened
    Skipped,
    /// The response was rendered
    Completed(SceneSummary),
    /// The response arrived but the plot backend failed to draw it
    RenderFailed(RenderError),
    /// The request failed and the fallback cloud is on display
    Recovered { cause: RequestError, summary: SceneSummary },
    /// The request failed and so did the fallback
    Unrecovered { cause: RequestError, fallback: FallbackError },
}

impl SubmitOutcome {
    /// The request failure, if the submission got as far as the network
    pub fn request_error(&self) -> Option<&RequestError> {
        match self {
            SubmitOutcome::Recovered { cause, .. } | SubmitOutcome::Unrecovered { cause, .. } => Some(cause),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Completed(_))
    }
}

/// Decoded successful response
struct Generation {
    cloud: ColoredPointCloud3f,
    code: Option<String>,
    images: Option<BTreeMap<String, String>>,
}

/// Drives instruction submissions against the inference backend
pub struct RequestCoordinator {
    config: ClientConfig,
    media: MediaLocator,
    transport: Arc<dyn HttpTransport>,
    renderer: PlotRenderer,
    page: Arc<dyn Page>,
    notifier: Arc<dyn Notifier>,
    in_flight: AtomicBool,
    cancel: Mutex<Option<Arc<Notify>>>,
    scene: Mutex<RenderedScene>,
}

impl RequestCoordinator {
    pub fn new(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
        backend: Arc<dyn PlotBackend>,
        page: Arc<dyn Page>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let renderer = PlotRenderer::new(backend, Arc::clone(&notifier), config.render.clone());
        Self {
            media: MediaLocator::new(config.media_base.clone()),
            config,
            transport,
            renderer,
            page,
            notifier,
            in_flight: AtomicBool::new(false),
            cancel: Mutex::new(None),
            scene: Mutex::new(RenderedScene::default()),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn media(&self) -> &MediaLocator {
        &self.media
    }

    pub fn is_processing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn phase(&self) -> Phase {
        if self.is_processing() {
            Phase::Submitting
        } else {
            Phase::Idle
        }
    }

    /// Snapshot of the scene on display
    pub fn scene(&self) -> RenderedScene {
        self.scene.lock().clone()
    }

    /// Abort the in-flight generation request, if any
    ///
    /// Returns whether there was a request to cancel. The submission then
    /// fails with [`RequestError::Cancelled`] and recovers like any other
    /// failure.
    pub fn cancel(&self) -> bool {
        match self.cancel.lock().as_ref() {
            Some(signal) => {
                tracing::info!("cancelling in-flight request");
                signal.notify_one();
                true
            }
            None => false,
        }
    }

    /// Submit an instruction for the selected task and configuration
    pub async fn submit(&self, text: &str, task: Option<&str>, config: Option<&str>) -> SubmitOutcome {
        let instruction = match Instruction::parse(text) {
            Ok(instruction) => instruction,
            Err(e) => return self.reject(e),
        };
        let selection = match self.config.tasks.select(task, config) {
            Ok(selection) => selection,
            Err(e) => return self.reject(e),
        };

        let Some(session) = Session::begin(self) else {
            tracing::debug!("request already in flight, ignoring submission");
            return SubmitOutcome::Skipped;
        };

        tracing::info!(
            instruction = %instruction,
            endpoint = %selection.endpoint,
            task = ?selection.task,
            config = ?selection.config,
            "submitting instruction"
        );

        let outcome = match self.generate(&instruction, &selection, &session.cancel).await {
            Ok(generation) => self.show_generation(generation).await,
            Err(cause) => self.recover(cause, &selection).await,
        };

        drop(session);
        outcome
    }

    /// Show the precomputed cloud, code and images of a selection without
    /// submitting anything
    pub async fn load_defaults(&self, selection: &Selection) -> Result<SceneSummary, FallbackError> {
        let shown = self.show_precomputed(selection, SceneOrigin::Defaults).await;
        if let Err(e) = &shown {
            tracing::warn!(error = %e, "default point cloud unavailable");
        }
        self.refresh_artifacts(selection, None).await;
        shown
    }

    /// Re-fetch the generated code and re-point the image slots
    ///
    /// `cache_bust` is appended to the image URLs so the page reloads them.
    /// Failures are logged and leave the previous artifacts in place.
    pub async fn refresh_artifacts(&self, selection: &Selection, cache_bust: Option<u64>) {
        let task = selection.task.as_deref();
        let config = selection.config.as_deref();

        let code_url = self.media.code_url(task, config);
        match self.fetch(&code_url).await {
            Ok(response) => {
                let code = response.text();
                self.page.show_code(&code);
                self.scene.lock().generated_code = Some(code);
            }
            Err(e) => tracing::warn!(url = %code_url, error = %e, "generated code unavailable"),
        }

        for slot in 0..IMAGE_SLOTS {
            let image = ImageSource::Url(self.media.image_url(slot, task, config, cache_bust));
            self.page.show_image(slot, &image);
            self.scene.lock().images[slot] = Some(image);
        }
    }

    fn reject(&self, error: ValidationError) -> SubmitOutcome {
        tracing::debug!(error = %error, "submission rejected");
        self.notifier.notify(Notice::warning(error.to_string()));
        SubmitOutcome::Rejected(error)
    }

    async fn generate(
        &self,
        instruction: &Instruction,
        selection: &Selection,
        cancel: &Notify,
    ) -> Result<Generation, RequestError> {
        let url = join_url(&self.config.api_base, &[selection.endpoint.as_str()]);
        let body = GenerateRequest {
            instruction: instruction.to_string(),
            task: selection.task.clone(),
            config: selection.config.clone(),
        };
        let body = serde_json::to_value(&body)
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        let deadline = self.config.timeout();
        let response = tokio::select! {
            biased;
            _ = cancel.notified() => return Err(RequestError::Cancelled),
            result = tokio::time::timeout(deadline, self.transport.post_json(&url, &body)) => {
                result.map_err(|_| RequestError::Timeout(deadline))??
            }
        };

        decode_generation(response)
    }

    async fn show_generation(&self, generation: Generation) -> SubmitOutcome {
        let Generation { cloud, code, images } = generation;

        if let Some(code) = code {
            self.page.show_code(&code);
            self.scene.lock().generated_code = Some(code);
        }
        if let Some(images) = images {
            for (slot, image) in decode_images(&images).into_iter().enumerate() {
                if let Some(image) = image {
                    self.page.show_image(slot, &image);
                    self.scene.lock().images[slot] = Some(image);
                }
            }
        }

        match self.renderer.render_default(&cloud).await {
            Ok(()) => {
                let mut scene = self.scene.lock();
                scene.cloud = cloud;
                scene.origin = SceneOrigin::Response;
                let summary = scene.summary();
                tracing::info!(points = summary.points, "rendered generated point cloud");
                SubmitOutcome::Completed(summary)
            }
            Err(e) => SubmitOutcome::RenderFailed(e),
        }
    }

    async fn recover(&self, cause: RequestError, selection: &Selection) -> SubmitOutcome {
        tracing::warn!(error = %cause, "generation request failed, loading fallback");
        self.notifier.notify(Notice::error(cause.user_message()));

        match self.show_precomputed(selection, SceneOrigin::Fallback).await {
            Ok(summary) => SubmitOutcome::Recovered { cause, summary },
            Err(fallback) => {
                tracing::error!(error = %fallback, "fallback point cloud failed");
                self.notifier
                    .notify(Notice::error(format!("Failed to load fallback point cloud: {fallback}")));
                SubmitOutcome::Unrecovered { cause, fallback }
            }
        }
    }

    async fn show_precomputed(&self, selection: &Selection, origin: SceneOrigin) -> Result<SceneSummary, FallbackError> {
        let url = self.media.pcd_url(selection.task.as_deref(), selection.config.as_deref());
        let response = self.fetch(&url).await?;
        let cloud = parse_points(&response.body)?;
        self.renderer.render_default(&cloud).await?;

        let mut scene = self.scene.lock();
        scene.cloud = cloud;
        scene.origin = origin;
        Ok(scene.summary())
    }

    async fn fetch(&self, url: &str) -> Result<HttpResponse, FallbackError> {
        let deadline = self.config.timeout();
        let response = tokio::time::timeout(deadline, self.transport.get(url))
            .await
            .map_err(|_| FallbackError::Timeout(deadline))??;
        if !response.is_success() {
            return Err(FallbackError::Http { status: response.status });
        }
        Ok(response)
    }
}

/// Guard for the `Submitting` phase
struct Session<'a> {
    owner: &'a RequestCoordinator,
    cancel: Arc<Notify>,
}

impl<'a> Session<'a> {
    /// Claim the in-flight flag; `None` if another session holds it
    fn begin(owner: &'a RequestCoordinator) -> Option<Self> {
        owner
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;

        let cancel = Arc::new(Notify::new());
        *owner.cancel.lock() = Some(Arc::clone(&cancel));
        owner.page.set_input_enabled(false);
        owner.page.set_busy(true);

        Some(Self { owner, cancel })
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        self.owner.cancel.lock().take();
        self.owner.in_flight.store(false, Ordering::Release);
        self.owner.page.set_input_enabled(true);
        self.owner.page.set_busy(false);
    }
}

fn decode_generation(response: HttpResponse) -> Result<Generation, RequestError> {
    if !response.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&response.body)
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| GENERIC_FAILURE.to_string());
        return Err(RequestError::Server {
            status: response.status,
            message,
        });
    }

    let body: GenerateResponse = serde_json::from_slice(&response.body)
        .map_err(|e| RequestError::InvalidResponse(e.to_string()))?;
    let cloud = points_from_rows(&body.points).map_err(|e| RequestError::InvalidResponse(e.to_string()))?;

    Ok(Generation {
        cloud,
        code: body.generated_code,
        images: body.detection_images,
    })
}

/// First images by key order, one per slot; undecodable payloads leave their slot empty
fn decode_images(images: &BTreeMap<String, String>) -> Vec<Option<ImageSource>> {
    images
        .iter()
        .take(IMAGE_SLOTS)
        .map(|(name, payload)| match ImageSource::from_payload(payload) {
            Ok(image) => Some(image),
            Err(e) => {
                tracing::warn!(image = %name, error = %e, "skipping undecodable detection image");
                None
            }
        })
        .collect()
}
