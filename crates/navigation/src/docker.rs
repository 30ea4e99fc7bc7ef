//! Docker: binds a stack handle to its concrete manager
//!
//! The element graph talks to stacks only through this type, so it never
//! needs to lock or inspect a [`StackManager`] directly.

use crate::error::{NavigationError, Result};
use crate::pool::SharedStackManager;
use page_stack::{
    DragEnd, PageDescriptor, PageId, StackManager, StatusBarStyle, Transition, Viewport,
};

/// Forwarding layer in front of one stack manager
#[derive(Debug, Clone)]
pub struct Docker {
    manager: SharedStackManager,
}

impl Docker {
    /// Bind to a manager
    pub fn new(manager: SharedStackManager) -> Self {
        Self { manager }
    }

    /// Push a page
    pub fn link(&self, page: PageDescriptor) -> Result<Transition> {
        Ok(self.manager.lock().push(page)?)
    }

    /// Replace the stack with a new root
    pub fn jump(&self, page: PageDescriptor) -> Transition {
        self.manager.lock().jump(page)
    }

    /// Replace the top page without touching history. Not implemented.
    pub fn swap(&self, page: PageDescriptor) -> Result<Transition> {
        tracing::warn!(page = %page.id(), "swap is not implemented");
        Err(NavigationError::NotImplemented("swap"))
    }

    /// Pop the top page
    pub fn back(&self) -> Result<Transition> {
        Ok(self.manager.lock().pop()?)
    }

    /// Set the visible page's status bar style
    pub fn set_status_bar_style(&self, style: StatusBarStyle) -> Result<()> {
        Ok(self.manager.lock().set_status_bar_style(style)?)
    }

    /// Set the status bar style recorded for one page
    pub fn set_status_bar_style_for(&self, id: PageId, style: StatusBarStyle) -> Result<()> {
        Ok(self.manager.lock().set_status_bar_style_for(id, style)?)
    }

    /// Last viewport reported by the renderer
    pub fn viewport_info(&self) -> Viewport {
        self.manager.lock().viewport()
    }

    /// Record a new viewport
    pub fn set_viewport(&self, viewport: Viewport) {
        self.manager.lock().set_viewport(viewport);
    }

    /// Forward a drag update
    pub fn drag_changed(&self, x: f64) -> bool {
        self.manager.lock().drag_changed(x)
    }

    /// Forward a drag end
    pub fn drag_ended(&self, predicted_dx: f64) -> DragEnd {
        self.manager.lock().drag_ended(predicted_dx)
    }

    /// Run `f` against the manager
    ///
    /// `f` must not navigate; the manager is locked while it runs.
    pub fn read<R>(&self, f: impl FnOnce(&StackManager) -> R) -> R {
        let manager = self.manager.lock();
        f(&*manager)
    }

    pub(crate) fn manager(&self) -> &SharedStackManager {
        &self.manager
    }
}
