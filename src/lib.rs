//! DefinedElements
//!
//! Declarative component support with a page/view-stack navigation engine.
//! This crate re-exports the public surface of the workspace:
//!
//! - [`elements`] - Motion tokens and status-driven configuration
//! - [`page_stack`] - Single-stack state machine (pages, offsets, transitions)
//! - [`navigation`] - Navigation context, element graph, handles, pool
//!
//! # Example
//!
//! ```rust
//! use defined_elements::{NavigationContext, PageDescriptor, StatusBarStyle};
//!
//! let ctx = NavigationContext::default();
//! let root = ctx.mount_root(PageDescriptor::new("home"));
//! root.top()
//!     .link(PageDescriptor::new("profile").status_bar_style(StatusBarStyle::Light))
//!     .unwrap();
//! assert_eq!(ctx.status_bar().style(), StatusBarStyle::Light);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use elements;
pub use navigation;
pub use page_stack;

pub use elements::{ElementStatus, StatusConfiguration};
pub use navigation::{
    DeferredNavigation, NavigationConfig, NavigationContext, NavigationError, NavigationEvent,
    PageHandle, StackHandle, StackKey,
};
pub use page_stack::{
    PageDescriptor, PageId, StackConfig, StackManager, StatusBar, StatusBarStyle, Transition,
    TransitionKind, Viewport,
};

use tracing_subscriber::EnvFilter;

/// Install a global `tracing` subscriber
///
/// `RUST_LOG` takes precedence over `default_filter`. Returns `false` if a
/// subscriber was already installed.
pub fn init_tracing(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!(default_filter, "tracing initialized");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_installs_once() {
        init_tracing("debug");
        assert!(!init_tracing("debug"));
    }
}
