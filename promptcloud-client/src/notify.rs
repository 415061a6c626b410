//! Notifier that reports through `tracing`

use promptcloud_core::{Notice, Notifier, Severity};

/// Logs each notice at a level matching its severity
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.severity {
            Severity::Info => tracing::info!(message = %notice.message, "notice"),
            Severity::Warning => tracing::warn!(message = %notice.message, "notice"),
            Severity::Error | Severity::Fatal => {
                tracing::error!(severity = ?notice.severity, message = %notice.message, "notice")
            }
        }
    }
}
