//! Page event wiring

use crate::coordinator::{RequestCoordinator, SubmitOutcome};
use crate::page::Page;
use crate::scene::SceneSummary;
use crate::error::FallbackError;
use crate::tasks::{Selection, CUSTOM_INSTRUCTION};
use parking_lot::Mutex;
use promptcloud_core::{Notice, Notifier, ValidationError};
use std::sync::Arc;

/// Keys the instruction field reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
    Other,
}

/// Events raised by the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Key press in the instruction field, with the field's current text
    KeyPress { key: Key, text: String },
    /// An entry of the example-instruction selector was chosen
    ExampleSelected(String),
    TaskSelected(String),
    ConfigSelected(String),
}

/// What handling an event did
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    Ignored,
    Submitted(SubmitOutcome),
    /// The custom sentinel was chosen; the field now takes free text
    FreeTextEnabled,
    /// Task or configuration changed and its defaults were (re)loaded
    SelectionChanged {
        selection: Selection,
        defaults: Result<SceneSummary, FallbackError>,
    },
    Rejected(ValidationError),
}

#[derive(Debug, Clone, Default)]
struct Selected {
    task: Option<String>,
    config: Option<String>,
}

/// Translates page events into coordinator calls
pub struct UiController {
    coordinator: Arc<RequestCoordinator>,
    page: Arc<dyn Page>,
    notifier: Arc<dyn Notifier>,
    selected: Mutex<Selected>,
}

impl UiController {
    pub fn new(coordinator: Arc<RequestCoordinator>, page: Arc<dyn Page>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            coordinator,
            page,
            notifier,
            selected: Mutex::new(Selected::default()),
        }
    }

    pub fn coordinator(&self) -> &Arc<RequestCoordinator> {
        &self.coordinator
    }

    /// Current task and configuration selectors
    pub fn selection(&self) -> Result<Selection, ValidationError> {
        let selected = self.selected.lock().clone();
        self.coordinator
            .config()
            .tasks
            .select(selected.task.as_deref(), selected.config.as_deref())
    }

    /// Populate the selectors for the default task and show its defaults
    pub async fn initialize(&self) -> UiAction {
        let default_task = self
            .coordinator
            .config()
            .tasks
            .default_spec()
            .map(|spec| spec.id.clone());
        match default_task {
            Some(task) => self.select_task(&task).await,
            None => UiAction::Ignored,
        }
    }

    pub async fn handle(&self, event: UiEvent) -> UiAction {
        match event {
            UiEvent::KeyPress { key: Key::Enter, text } => self.submit(&text).await,
            UiEvent::KeyPress { .. } => UiAction::Ignored,
            UiEvent::ExampleSelected(choice) if choice == CUSTOM_INSTRUCTION => {
                self.page.set_instruction("");
                self.page.set_free_text(true);
                UiAction::FreeTextEnabled
            }
            UiEvent::ExampleSelected(choice) => {
                self.page.set_free_text(false);
                self.page.set_instruction(&choice);
                self.submit(&choice).await
            }
            UiEvent::TaskSelected(task) => self.select_task(&task).await,
            UiEvent::ConfigSelected(config) => self.select_config(&config).await,
        }
    }

    async fn submit(&self, text: &str) -> UiAction {
        let selected = self.selected.lock().clone();
        let outcome = self
            .coordinator
            .submit(text, selected.task.as_deref(), selected.config.as_deref())
            .await;
        UiAction::Submitted(outcome)
    }

    async fn select_task(&self, task: &str) -> UiAction {
        let tasks = &self.coordinator.config().tasks;
        let Some(spec) = tasks.get(task) else {
            return self.reject(ValidationError::UnknownTask(task.to_string()));
        };

        let config = spec.initial_config().map(str::to_string);
        self.page.set_instruction_choices(&spec.instruction_choices());
        self.page.set_instruction("");
        *self.selected.lock() = Selected {
            task: Some(spec.id.clone()),
            config,
        };
        tracing::info!(task = %spec.id, "task selected");

        self.reload_defaults().await
    }

    async fn select_config(&self, config: &str) -> UiAction {
        let previous = self.selected.lock().clone();
        let candidate = Selected {
            task: previous.task.clone(),
            config: Some(config.to_string()),
        };
        if let Err(e) = self
            .coordinator
            .config()
            .tasks
            .select(candidate.task.as_deref(), candidate.config.as_deref())
        {
            return self.reject(e);
        }

        *self.selected.lock() = candidate;
        tracing::info!(config, "configuration selected");
        self.reload_defaults().await
    }

    async fn reload_defaults(&self) -> UiAction {
        let selection = match self.selection() {
            Ok(selection) => selection,
            Err(e) => return self.reject(e),
        };
        let defaults = self.coordinator.load_defaults(&selection).await;
        UiAction::SelectionChanged { selection, defaults }
    }

    fn reject(&self, error: ValidationError) -> UiAction {
        self.notifier.notify(Notice::warning(error.to_string()));
        UiAction::Rejected(error)
    }
}
