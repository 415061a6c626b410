//! Backend scenarios and their preset configurations

use promptcloud_core::ValidationError;
use serde::{Deserialize, Serialize};

/// Sentinel choice that switches the instruction field to free text
pub const CUSTOM_INSTRUCTION: &str = "custom";

/// Endpoint used when no task selector exists
pub const DEFAULT_ENDPOINT: &str = "/generate";

/// A backend scenario the user can target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    /// Path appended to the API base
    pub endpoint: String,
    /// Example instructions offered in the selector
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Preset scene configurations; empty when the task has none
    #[serde(default)]
    pub configs: Vec<String>,
    #[serde(default)]
    pub default_config: Option<String>,
}

impl TaskSpec {
    pub fn new(id: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            endpoint: endpoint.into(),
            instructions: Vec::new(),
            configs: Vec::new(),
            default_config: None,
        }
    }

    pub fn with_instructions<I, S>(mut self, instructions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.instructions = instructions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_configs<I, S>(mut self, configs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.configs = configs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_default_config(mut self, config: impl Into<String>) -> Self {
        self.default_config = Some(config.into());
        self
    }

    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }

    /// Configuration used when none is selected
    pub fn initial_config(&self) -> Option<&str> {
        self.default_config
            .as_deref()
            .or_else(|| self.configs.first().map(String::as_str))
    }

    /// Choices for the example-instruction selector, ending with the custom sentinel
    pub fn instruction_choices(&self) -> Vec<String> {
        let mut choices = self.instructions.clone();
        choices.push(CUSTOM_INSTRUCTION.to_string());
        choices
    }
}

/// Resolved target of a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub endpoint: String,
    /// Task id to send and to scope media by; `None` when the page has no task selector
    pub task: Option<String>,
    pub config: Option<String>,
}

/// The set of tasks offered by the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCatalog {
    pub tasks: Vec<TaskSpec>,
    #[serde(default)]
    pub default_task: Option<String>,
}

impl Default for TaskCatalog {
    fn default() -> Self {
        Self::single(DEFAULT_ENDPOINT)
    }
}

impl TaskCatalog {
    /// One anonymous task behind `endpoint`, as on pages without selectors
    pub fn single(endpoint: impl Into<String>) -> Self {
        Self {
            tasks: vec![TaskSpec::new("default", endpoint)],
            default_task: None,
        }
    }

    pub fn new(tasks: Vec<TaskSpec>) -> Self {
        Self {
            tasks,
            default_task: None,
        }
    }

    /// Whether the page offers a task selector
    pub fn has_selector(&self) -> bool {
        self.tasks.len() > 1
    }

    pub fn get(&self, id: &str) -> Option<&TaskSpec> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn default_spec(&self) -> Option<&TaskSpec> {
        self.default_task
            .as_deref()
            .and_then(|id| self.get(id))
            .or_else(|| self.tasks.first())
    }

    /// Find a task, falling back to the default when `task` is `None`
    pub fn task(&self, task: Option<&str>) -> Result<&TaskSpec, ValidationError> {
        match task {
            Some(id) => self.get(id).ok_or_else(|| ValidationError::UnknownTask(id.to_string())),
            None => self
                .default_spec()
                .ok_or_else(|| ValidationError::UnknownTask("<none>".to_string())),
        }
    }

    /// Resolve the endpoint and the selectors sent along with a request
    pub fn select(&self, task: Option<&str>, config: Option<&str>) -> Result<Selection, ValidationError> {
        let spec = self.task(task)?;

        let config = match config {
            Some(config) if !spec.configs.is_empty() && !spec.configs.iter().any(|c| c == config) => {
                return Err(ValidationError::UnknownConfig {
                    task: spec.id.clone(),
                    config: config.to_string(),
                });
            }
            Some(config) => Some(config.to_string()),
            None => spec.initial_config().map(str::to_string),
        };

        // pages without a task selector send no task id and use the unscoped media tree
        let task = self.has_selector().then(|| spec.id.clone());

        Ok(Selection {
            endpoint: spec.endpoint.clone(),
            task,
            config,
        })
    }
}
