//! Client configuration

use crate::tasks::TaskCatalog;
use promptcloud_visualization::RenderConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Request deadline used by current deployments
pub const DEFAULT_TIMEOUT_SECS: u64 = 3600;

/// Request deadline of the first single-task page
pub const LEGACY_TIMEOUT_SECS: u64 = 30;

/// Configuration for the request coordinator and its collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL the task endpoints are appended to
    pub api_base: String,
    /// Base URL of the precomputed media tree
    pub media_base: String,
    /// Deadline for the generation request and for fallback fetches
    pub timeout_secs: u64,
    /// Period of the artifact refresh loop, in milliseconds
    pub refresh_interval_ms: u64,
    pub tasks: TaskCatalog,
    pub render: RenderConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:8080".to_string(),
            media_base: "/media".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            refresh_interval_ms: 2000,
            tasks: TaskCatalog::default(),
            render: RenderConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Settings of the single-task page: one endpoint, 30 s deadline
    pub fn legacy() -> Self {
        Self {
            timeout_secs: LEGACY_TIMEOUT_SECS,
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }
}
