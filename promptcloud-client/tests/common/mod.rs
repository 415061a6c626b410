//! In-memory collaborators for the client integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use promptcloud_client::*;
use promptcloud_core::{Notice, Notifier, Severity};
use promptcloud_io::ImageSource;
use promptcloud_visualization::{BackendError, PlotBackend, PlotLayout, ScatterTrace};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// How the fake answers generation requests
#[derive(Clone)]
pub enum PostReply {
    Respond(HttpResponse),
    /// Never resolves
    Hang,
    /// Resolves with the response once [`FakeTransport::release`] is called
    Gated(HttpResponse),
    Fail(TransportError),
}

/// Transport that records every call and answers from fixed routes
pub struct FakeTransport {
    reply: Mutex<PostReply>,
    routes: Mutex<HashMap<String, HttpResponse>>,
    gate: Notify,
    calls: Mutex<Vec<String>>,
    bodies: Mutex<Vec<serde_json::Value>>,
}

impl FakeTransport {
    pub fn new(reply: PostReply) -> Self {
        Self {
            reply: Mutex::new(reply),
            routes: Mutex::new(HashMap::new()),
            gate: Notify::new(),
            calls: Mutex::new(Vec::new()),
            bodies: Mutex::new(Vec::new()),
        }
    }

    pub fn set_reply(&self, reply: PostReply) {
        *self.reply.lock() = reply;
    }

    /// Serve `body` with status 200 for GET `url`; unknown URLs get a 404
    pub fn route(&self, url: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.routes.lock().insert(url.into(), HttpResponse::new(200, body));
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }

    /// Calls in order, as `"POST url"` or `"GET url"`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn posts(&self) -> usize {
        self.calls().iter().filter(|call| call.starts_with("POST ")).count()
    }

    pub fn gets_of(&self, url: &str) -> usize {
        let call = format!("GET {url}");
        self.calls().iter().filter(|c| **c == call).count()
    }

    pub fn bodies(&self) -> Vec<serde_json::Value> {
        self.bodies.lock().clone()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<HttpResponse, TransportError> {
        self.calls.lock().push(format!("POST {url}"));
        self.bodies.lock().push(body.clone());

        let reply = self.reply.lock().clone();
        match reply {
            PostReply::Respond(response) => Ok(response),
            PostReply::Hang => std::future::pending().await,
            PostReply::Gated(response) => {
                self.gate.notified().await;
                Ok(response)
            }
            PostReply::Fail(err) => Err(err),
        }
    }

    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.calls.lock().push(format!("GET {url}"));
        let response = self.routes.lock().get(url).cloned();
        Ok(response.unwrap_or_else(|| HttpResponse::new(404, "not found")))
    }
}

/// Page that remembers the state of every control
pub struct FakePage {
    pub input_history: Mutex<Vec<bool>>,
    pub busy_history: Mutex<Vec<bool>>,
    pub instruction: Mutex<String>,
    pub choices: Mutex<Vec<String>>,
    pub free_text: AtomicBool,
    pub code: Mutex<Option<String>>,
    pub images: Mutex<[Option<ImageSource>; IMAGE_SLOTS]>,
}

impl Default for FakePage {
    fn default() -> Self {
        Self {
            input_history: Mutex::new(Vec::new()),
            busy_history: Mutex::new(Vec::new()),
            instruction: Mutex::new(String::new()),
            choices: Mutex::new(Vec::new()),
            free_text: AtomicBool::new(false),
            code: Mutex::new(None),
            images: Mutex::new([None, None]),
        }
    }
}

impl FakePage {
    pub fn input_enabled(&self) -> bool {
        self.input_history.lock().last().copied().unwrap_or(true)
    }

    pub fn busy(&self) -> bool {
        self.busy_history.lock().last().copied().unwrap_or(false)
    }

    pub fn image(&self, slot: usize) -> Option<ImageSource> {
        self.images.lock()[slot].clone()
    }
}

impl Page for FakePage {
    fn set_input_enabled(&self, enabled: bool) {
        self.input_history.lock().push(enabled);
    }

    fn set_busy(&self, busy: bool) {
        self.busy_history.lock().push(busy);
    }

    fn set_instruction(&self, text: &str) {
        *self.instruction.lock() = text.to_string();
    }

    fn set_instruction_choices(&self, choices: &[String]) {
        *self.choices.lock() = choices.to_vec();
    }

    fn set_free_text(&self, enabled: bool) {
        self.free_text.store(enabled, Ordering::SeqCst);
    }

    fn show_code(&self, code: &str) {
        *self.code.lock() = Some(code.to_string());
    }

    fn show_image(&self, slot: usize, image: &ImageSource) {
        self.images.lock()[slot] = Some(image.clone());
    }
}

/// Plot backend that keeps every trace it was asked to draw
pub struct FakeBackend {
    pub ready: AtomicBool,
    pub failure: Mutex<Option<String>>,
    pub drawn: Mutex<Vec<(String, ScatterTrace)>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(true),
            failure: Mutex::new(None),
            drawn: Mutex::new(Vec::new()),
        }
    }
}

impl FakeBackend {
    pub fn last_trace(&self) -> Option<ScatterTrace> {
        self.drawn.lock().last().map(|(_, trace)| trace.clone())
    }

    pub fn draws(&self) -> usize {
        self.drawn.lock().len()
    }
}

impl PlotBackend for FakeBackend {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    fn scatter3d(&self, viewport: &str, trace: &ScatterTrace, _layout: &PlotLayout) -> Result<(), BackendError> {
        if let Some(message) = self.failure.lock().clone() {
            return Err(BackendError(message));
        }
        self.drawn.lock().push((viewport.to_string(), trace.clone()));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    pub fn of(&self, severity: Severity) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter(|notice| notice.severity == severity)
            .map(|notice| notice.message)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}

/// A coordinator wired to fakes
pub struct Harness {
    pub coordinator: Arc<RequestCoordinator>,
    pub transport: Arc<FakeTransport>,
    pub page: Arc<FakePage>,
    pub backend: Arc<FakeBackend>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Harness {
    pub fn new(config: ClientConfig, reply: PostReply) -> Self {
        let transport = Arc::new(FakeTransport::new(reply));
        let page = Arc::new(FakePage::default());
        let backend = Arc::new(FakeBackend::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let coordinator = Arc::new(RequestCoordinator::new(
            config,
            transport.clone(),
            backend.clone(),
            page.clone(),
            notifier.clone(),
        ));
        Self {
            coordinator,
            transport,
            page,
            backend,
            notifier,
        }
    }

    pub fn with_reply(reply: PostReply) -> Self {
        Self::new(ClientConfig::legacy(), reply)
    }

    pub fn controller(&self) -> UiController {
        UiController::new(self.coordinator.clone(), self.page.clone(), self.notifier.clone())
    }

    /// Serve `body` as the unscoped precomputed cloud
    pub fn serve_fallback(&self, body: &str) {
        let url = self.coordinator.media().pcd_url(None, None);
        self.transport.route(url, body);
    }

    /// The coordinator is idle and the page controls are usable again
    pub fn assert_idle(&self) {
        assert!(!self.coordinator.is_processing());
        assert_eq!(self.coordinator.phase(), Phase::Idle);
        assert!(self.page.input_enabled());
        assert!(!self.page.busy());
    }
}

pub fn ok(body: &str) -> PostReply {
    PostReply::Respond(HttpResponse::new(200, body))
}

pub fn status(code: u16, body: &str) -> PostReply {
    PostReply::Respond(HttpResponse::new(code, body))
}

/// Two tasks, the second with preset configurations
pub fn two_task_config() -> ClientConfig {
    ClientConfig {
        tasks: TaskCatalog::new(vec![
            TaskSpec::new("pick_place", "/generate")
                .with_instructions(["pick up the red cube", "stack the blocks"]),
            TaskSpec::new("battery", "/generate_battery")
                .with_instructions(["remove the battery"])
                .with_configs(["config_1", "config_2"])
                .with_default_config("config_2"),
        ]),
        ..ClientConfig::default()
    }
}
