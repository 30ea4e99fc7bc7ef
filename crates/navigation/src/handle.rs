//! Page and stack handles
//!
//! Handles are `(context, id)` pairs that re-resolve through the element
//! graph on every call, so a page can navigate "its" stack without holding a
//! reference to it. A handle whose target is gone, or the explicit dummy
//! handle, turns every operation into a logged no-op.

use crate::context::NavigationContext;
use crate::deferred::DeferredNavigation;
use crate::error::{NavigationError, Result};
use crate::graph::StackKey;
use crate::pool::SharedStackManager;
use page_stack::{
    PageDescriptor, PageId, StackManager, StackSnapshot, StatusBarStyle, Transition, Viewport,
};
use std::sync::Arc;
use std::time::Duration;

fn dummy_op<T>(operation: &'static str) -> Result<T> {
    tracing::warn!(operation, "navigation on dummy handle ignored");
    Err(NavigationError::Unresolved)
}

/// Handle to a page in the navigation tree
#[derive(Debug, Clone, Default)]
pub struct PageHandle {
    target: Option<(NavigationContext, PageId)>,
}

impl PageHandle {
    pub(crate) fn new(ctx: NavigationContext, id: PageId) -> Self {
        Self {
            target: Some((ctx, id)),
        }
    }

    /// The shared no-op handle
    pub fn dummy() -> Self {
        Self { target: None }
    }

    /// Check if this is the dummy handle
    pub fn is_dummy(&self) -> bool {
        self.target.is_none()
    }

    /// Page id (none for the dummy)
    pub fn id(&self) -> Option<PageId> {
        self.target.as_ref().map(|(_, id)| *id)
    }

    /// Check whether the page is still in the graph
    pub fn is_registered(&self) -> bool {
        self.target
            .as_ref()
            .is_some_and(|(ctx, id)| ctx.contains_page(*id))
    }

    /// Push `page` onto this page's stack
    pub fn link(&self, page: PageDescriptor) -> Result<Transition> {
        match &self.target {
            Some((ctx, id)) => ctx.link(*id, page),
            None => dummy_op("link"),
        }
    }

    /// Replace this page's stack with `page`
    pub fn jump(&self, page: PageDescriptor) -> Result<Transition> {
        match &self.target {
            Some((ctx, id)) => ctx.jump(*id, page),
            None => dummy_op("jump"),
        }
    }

    /// Replace the top page without touching history. Not implemented.
    pub fn swap(&self, page: PageDescriptor) -> Result<Transition> {
        match &self.target {
            Some((ctx, id)) => ctx.swap(*id, page),
            None => dummy_op("swap"),
        }
    }

    /// Pop the top page of this page's stack
    pub fn back(&self) -> Result<Transition> {
        match &self.target {
            Some((ctx, id)) => ctx.back(*id),
            None => dummy_op("back"),
        }
    }

    /// Record this page's status bar style
    pub fn set_status_bar_style(&self, style: StatusBarStyle) -> Result<()> {
        match &self.target {
            Some((ctx, id)) => ctx.set_status_bar_style(*id, style),
            None => dummy_op("set_status_bar_style"),
        }
    }

    /// [`link`](Self::link) after `delay`
    pub fn link_after(&self, page: PageDescriptor, delay: Duration) -> DeferredNavigation {
        match &self.target {
            Some((ctx, id)) => ctx.link_after(*id, page, delay),
            None => {
                let _ = dummy_op::<()>("link_after");
                DeferredNavigation::noop()
            }
        }
    }

    /// [`jump`](Self::jump) after `delay`
    pub fn jump_after(&self, page: PageDescriptor, delay: Duration) -> DeferredNavigation {
        match &self.target {
            Some((ctx, id)) => ctx.jump_after(*id, page, delay),
            None => {
                let _ = dummy_op::<()>("jump_after");
                DeferredNavigation::noop()
            }
        }
    }

    /// Stack this page sits on
    pub fn stack(&self) -> StackHandle {
        let Some((ctx, id)) = &self.target else {
            return StackHandle::dummy();
        };
        match ctx.parent_stack_of(*id) {
            Some(key) => StackHandle::new(ctx.clone(), key),
            None => StackHandle::dummy(),
        }
    }

    /// Stacks hosted inside this page
    pub fn child_stacks(&self) -> Vec<StackHandle> {
        let Some((ctx, id)) = &self.target else {
            return Vec::new();
        };
        ctx.child_stacks_of(*id)
            .into_iter()
            .map(|key| StackHandle::new(ctx.clone(), key))
            .collect()
    }

    /// Get or create a nested stack named `name` inside this page
    ///
    /// `root` becomes the stack's first page on creation and is dropped if
    /// the stack already exists. `uses_status_bar` only applies on creation.
    pub fn mount_stack(
        &self,
        name: &str,
        uses_status_bar: bool,
        root: PageDescriptor,
    ) -> Result<StackHandle> {
        match &self.target {
            Some((ctx, id)) => ctx
                .mount_stack(*id, name, uses_status_bar, root, false)
                .map(|key| StackHandle::new(ctx.clone(), key)),
            None => dummy_op("mount_stack"),
        }
    }

    /// Tear down the nested stack `name`, if any, and mount a fresh one
    pub fn rebuild_stack(
        &self,
        name: &str,
        uses_status_bar: bool,
        root: PageDescriptor,
    ) -> Result<StackHandle> {
        match &self.target {
            Some((ctx, id)) => ctx
                .mount_stack(*id, name, uses_status_bar, root, true)
                .map(|key| StackHandle::new(ctx.clone(), key)),
            None => dummy_op("rebuild_stack"),
        }
    }
}

/// Handle to a stack in the navigation tree
#[derive(Debug, Clone, Default)]
pub struct StackHandle {
    target: Option<(NavigationContext, StackKey)>,
}

impl StackHandle {
    pub(crate) fn new(ctx: NavigationContext, key: StackKey) -> Self {
        Self {
            target: Some((ctx, key)),
        }
    }

    /// The shared unbound handle
    pub fn dummy() -> Self {
        Self { target: None }
    }

    /// Check if this is the dummy handle
    pub fn is_dummy(&self) -> bool {
        self.target.is_none()
    }

    /// Stack key (none for the dummy)
    pub fn key(&self) -> Option<&StackKey> {
        self.target.as_ref().map(|(_, key)| key)
    }

    /// Check whether the stack is still in the graph
    pub fn is_registered(&self) -> bool {
        self.target
            .as_ref()
            .is_some_and(|(ctx, key)| ctx.contains_stack(key))
    }

    /// Push a page on top
    pub fn link(&self, page: PageDescriptor) -> Result<Transition> {
        match &self.target {
            Some((ctx, key)) => ctx.stack_link(key, page),
            None => dummy_op("link"),
        }
    }

    /// Replace every page with `page`
    pub fn jump(&self, page: PageDescriptor) -> Result<Transition> {
        match &self.target {
            Some((ctx, key)) => ctx.stack_jump(key, page),
            None => dummy_op("jump"),
        }
    }

    /// Replace the top page without touching history. Not implemented.
    pub fn swap(&self, page: PageDescriptor) -> Result<Transition> {
        match &self.target {
            Some((ctx, key)) => ctx.docker_for(key)?.swap(page),
            None => dummy_op("swap"),
        }
    }

    /// Pop the top page (never the root)
    pub fn back(&self) -> Result<Transition> {
        match &self.target {
            Some((ctx, key)) => ctx.stack_back(key),
            None => dummy_op("back"),
        }
    }

    /// Set the visible page's status bar style
    pub fn set_status_bar_style(&self, style: StatusBarStyle) -> Result<()> {
        match &self.target {
            Some((ctx, key)) => ctx.docker_for(key)?.set_status_bar_style(style),
            None => dummy_op("set_status_bar_style"),
        }
    }

    /// Last viewport reported by the renderer
    pub fn viewport_info(&self) -> Result<Viewport> {
        match &self.target {
            Some((ctx, key)) => Ok(ctx.docker_for(key)?.viewport_info()),
            None => dummy_op("viewport_info"),
        }
    }

    /// Record the viewport from a layout pass
    pub fn update_viewport(&self, viewport: Viewport) -> Result<()> {
        match &self.target {
            Some((ctx, key)) => {
                ctx.docker_for(key)?.set_viewport(viewport);
                Ok(())
            }
            None => dummy_op("update_viewport"),
        }
    }

    /// Follow an interactive drag. Never changes which pages are on the stack.
    pub fn drag_changed(&self, x: f64) -> Result<bool> {
        match &self.target {
            Some((ctx, key)) => Ok(ctx.docker_for(key)?.drag_changed(x)),
            None => dummy_op("drag_changed"),
        }
    }

    /// Finish a drag: commits [`back`](Self::back) past the threshold,
    /// otherwise snaps back. `None` when no drag was in progress.
    pub fn drag_ended(&self, predicted_dx: f64) -> Result<Option<Transition>> {
        match &self.target {
            Some((ctx, key)) => ctx.drag_ended(key, predicted_dx),
            None => dummy_op("drag_ended"),
        }
    }

    fn read<R>(&self, f: impl FnOnce(&StackManager) -> R) -> Option<R> {
        let (ctx, key) = self.target.as_ref()?;
        ctx.docker_for(key).ok().map(|docker| docker.read(f))
    }

    /// Copy of the stack's visible state. `None` if the stack cannot be resolved.
    pub fn snapshot(&self) -> Option<StackSnapshot> {
        self.read(StackManager::snapshot)
    }

    /// Check whether both handles front the same manager
    pub fn same_manager(&self, other: &StackHandle) -> bool {
        match (self.manager(), other.manager()) {
            (Some(a), Some(b)) => Arc::ptr_eq(&a, &b),
            _ => false,
        }
    }

    fn manager(&self) -> Option<SharedStackManager> {
        let (ctx, key) = self.target.as_ref()?;
        ctx.manager(key)
    }

    /// Number of pages (0 when unresolved)
    pub fn depth(&self) -> usize {
        self.read(StackManager::depth).unwrap_or(0)
    }

    /// Page ids in display order
    pub fn page_ids(&self) -> Vec<PageId> {
        self.read(StackManager::page_ids).unwrap_or_default()
    }

    /// Offsets in display order
    pub fn offsets(&self) -> Vec<f64> {
        self.read(|manager| manager.offsets().to_vec())
            .unwrap_or_default()
    }

    /// Handles for the pages on this stack, bottom to top
    pub fn pages(&self) -> Vec<PageHandle> {
        let Some((ctx, key)) = &self.target else {
            return Vec::new();
        };
        ctx.hierarchy_of(key)
            .into_iter()
            .map(|id| PageHandle::new(ctx.clone(), id))
            .collect()
    }

    /// Handle for the visible page
    pub fn top(&self) -> PageHandle {
        self.pages().pop().unwrap_or_default()
    }

    /// Page hosting this stack (the dummy for the application root stack)
    pub fn owner(&self) -> PageHandle {
        match &self.target {
            Some((ctx, key)) if !key.owner.is_root() => ctx.page(key.owner),
            _ => PageHandle::dummy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NavigationConfig;

    #[test]
    fn test_dummy_handles_are_noops() {
        let page = PageHandle::dummy();
        assert!(page.is_dummy());
        assert!(!page.is_registered());
        assert!(matches!(page.back(), Err(NavigationError::Unresolved)));
        assert!(matches!(
            page.link(PageDescriptor::new("x")),
            Err(NavigationError::Unresolved)
        ));
        assert!(page.stack().is_dummy());
        assert!(page.child_stacks().is_empty());

        let stack = StackHandle::dummy();
        assert_eq!(stack.depth(), 0);
        assert!(stack.page_ids().is_empty());
        assert!(stack.top().is_dummy());
        assert!(matches!(stack.viewport_info(), Err(NavigationError::Unresolved)));
    }

    #[test]
    fn test_root_stack_before_mount_is_dummy() {
        let ctx = NavigationContext::new(NavigationConfig::default());
        assert!(ctx.root_stack().is_dummy());
    }

    #[test]
    fn test_stale_handle_becomes_noop() {
        let ctx = NavigationContext::default();
        let root = ctx.mount_root(PageDescriptor::new("home"));
        root.link(PageDescriptor::new("detail")).unwrap();

        let detail = root.top();
        assert!(detail.is_registered());
        detail.back().unwrap();

        assert!(!detail.is_registered());
        assert!(matches!(detail.back(), Err(NavigationError::PageNotFound(_))));
        assert_eq!(root.depth(), 1);
    }

    #[test]
    fn test_viewport_round_trip() {
        let ctx = NavigationContext::default();
        let root = ctx.mount_root(PageDescriptor::new("home"));
        let viewport = Viewport::new(390.0, 844.0);

        root.update_viewport(viewport).unwrap();
        assert_eq!(root.viewport_info().unwrap(), viewport);
    }

    #[test]
    fn test_nested_stack_owner() {
        let ctx = NavigationContext::default();
        let root = ctx.mount_root(PageDescriptor::new("home"));
        let home = root.top();
        let tabs = home
            .mount_stack("tabs", false, PageDescriptor::new("feed"))
            .unwrap();

        assert_eq!(tabs.owner().id(), home.id());
        assert!(root.owner().is_dummy());
        assert_eq!(home.child_stacks().len(), 1);
        assert_eq!(tabs.top().stack().key(), tabs.key());
    }
}
