//! Deferred navigation handles

use tokio::task::JoinHandle;

/// A navigation scheduled to run after a delay
///
/// Dropping the handle does not cancel the navigation; call
/// [`cancel`](Self::cancel).
#[derive(Debug)]
pub struct DeferredNavigation {
    handle: Option<JoinHandle<()>>,
}

impl DeferredNavigation {
    pub(crate) fn new(handle: JoinHandle<()>) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    /// A handle for a navigation that was never scheduled
    pub(crate) fn noop() -> Self {
        Self { handle: None }
    }

    /// Whether a task was actually scheduled
    pub fn is_scheduled(&self) -> bool {
        self.handle.is_some()
    }

    /// Cancel the navigation if it has not fired yet
    pub fn cancel(&self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }

    /// Whether the navigation fired, was cancelled, or was never scheduled
    pub fn is_finished(&self) -> bool {
        self.handle
            .as_ref()
            .map(JoinHandle::is_finished)
            .unwrap_or(true)
    }

    /// Wait for the task. Returns `true` if it ran to completion, `false`
    /// if it was cancelled or never scheduled.
    pub async fn wait(self) -> bool {
        match self.handle {
            Some(handle) => handle.await.is_ok(),
            None => false,
        }
    }
}
