//! Application-wide status bar indicator

use crate::page::StatusBarStyle;
use std::sync::Arc;
use tokio::sync::watch;

/// Shared status bar indicator
///
/// Clones observe and drive the same value. Stack managers created with
/// status bar support write to it; the host platform subscribes and applies
/// the style.
#[derive(Debug, Clone)]
pub struct StatusBar {
    tx: Arc<watch::Sender<StatusBarStyle>>,
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new(StatusBarStyle::default())
    }
}

impl StatusBar {
    /// Create an indicator showing `initial`
    pub fn new(initial: StatusBarStyle) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Current style
    pub fn style(&self) -> StatusBarStyle {
        *self.tx.borrow()
    }

    /// Show `style`. Subscribers are only woken when the value changes.
    pub fn set(&self, style: StatusBarStyle) {
        self.tx.send_if_modified(|current| {
            if *current == style {
                false
            } else {
                tracing::debug!(?style, "status bar style changed");
                *current = style;
                true
            }
        });
    }

    /// Subscribe to style changes
    pub fn subscribe(&self) -> watch::Receiver<StatusBarStyle> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let bar = StatusBar::default();
        let other = bar.clone();
        assert_eq!(bar.style(), StatusBarStyle::Dark);

        other.set(StatusBarStyle::Light);
        assert_eq!(bar.style(), StatusBarStyle::Light);
    }

    #[test]
    fn test_subscriber_sees_changes_only() {
        let bar = StatusBar::new(StatusBarStyle::Light);
        let mut rx = bar.subscribe();

        bar.set(StatusBarStyle::Light);
        assert!(!rx.has_changed().unwrap());

        bar.set(StatusBarStyle::Dark);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), StatusBarStyle::Dark);
    }
}
