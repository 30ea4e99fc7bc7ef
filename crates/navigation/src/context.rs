//! Navigation context
//!
//! The single owner of navigation state for an application: the stack
//! manager pool, the element graph, and pending deferred navigations. Create
//! one at startup and hand clones to pages and controllers.
//!
//! Locking: the context state lock is always taken before any manager lock.
//! User callbacks never run while the context state lock is held.

use crate::config::NavigationConfig;
use crate::deferred::DeferredNavigation;
use crate::docker::Docker;
use crate::error::{NavigationError, Result};
use crate::event::NavigationEvent;
use crate::graph::{NavigationGraph, StackKey, Teardown};
use crate::handle::{PageHandle, StackHandle};
use crate::pool::{SharedStackManager, StackManagerPool};
use page_stack::{
    DragEnd, PageDescriptor, PageId, StackError, StatusBar, StatusBarStyle, Transition,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::AbortHandle;

/// State guarded by the context lock
#[derive(Debug)]
struct ContextState {
    pool: StackManagerPool,
    graph: NavigationGraph,
    deferred: HashMap<PageId, Vec<AbortHandle>>,
}

/// Shared navigation state
///
/// Cheap to clone; all clones see the same stacks.
///
/// # Example
///
/// ```rust
/// use navigation::{NavigationConfig, NavigationContext};
/// use page_stack::PageDescriptor;
///
/// let ctx = NavigationContext::new(NavigationConfig::default());
/// let root = ctx.mount_root(PageDescriptor::new("home"));
///
/// let home = root.top();
/// home.link(PageDescriptor::new("settings")).unwrap();
/// assert_eq!(root.depth(), 2);
///
/// root.top().back().unwrap();
/// assert_eq!(root.depth(), 1);
///
/// // Tapping back on the root does nothing
/// assert!(home.back().is_err());
/// assert_eq!(root.depth(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct NavigationContext {
    state: Arc<Mutex<ContextState>>,
    events: broadcast::Sender<NavigationEvent>,
    status_bar: StatusBar,
    config: Arc<NavigationConfig>,
}

impl Default for NavigationContext {
    fn default() -> Self {
        Self::new(NavigationConfig::default())
    }
}

impl NavigationContext {
    /// Create a context. No stack exists until [`mount_root`](Self::mount_root).
    pub fn new(config: NavigationConfig) -> Self {
        let status_bar = StatusBar::default();
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        let state = ContextState {
            pool: StackManagerPool::new(status_bar.clone(), config.stack.clone()),
            graph: NavigationGraph::new(),
            deferred: HashMap::new(),
        };

        Self {
            state: Arc::new(Mutex::new(state)),
            events,
            status_bar,
            config: Arc::new(config),
        }
    }

    /// Configuration
    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// Application status bar indicator
    pub fn status_bar(&self) -> &StatusBar {
        &self.status_bar
    }

    /// Subscribe to navigation events
    pub fn subscribe(&self) -> broadcast::Receiver<NavigationEvent> {
        self.events.subscribe()
    }

    /// Key of the application root stack
    pub fn root_key(&self) -> StackKey {
        StackKey::root(self.config.root_stack_name.clone())
    }

    // =========================================================================
    // Mounting
    // =========================================================================

    /// Mount the application root stack with `root` as its first page
    ///
    /// Mounting again returns the existing stack and drops `root`.
    pub fn mount_root(&self, root: PageDescriptor) -> StackHandle {
        let name = self.config.root_stack_name.clone();
        let uses_status_bar = self.config.root_uses_status_bar;
        match self.mount_stack(PageId::ROOT, &name, uses_status_bar, root, false) {
            Ok(key) => StackHandle::new(self.clone(), key),
            Err(error) => {
                tracing::warn!(%error, "failed to mount root stack");
                StackHandle::dummy()
            }
        }
    }

    /// Tear down the whole tree and mount a fresh root stack
    pub fn remount_root(&self, root: PageDescriptor) -> StackHandle {
        let name = self.config.root_stack_name.clone();
        let uses_status_bar = self.config.root_uses_status_bar;
        match self.mount_stack(PageId::ROOT, &name, uses_status_bar, root, true) {
            Ok(key) => StackHandle::new(self.clone(), key),
            Err(error) => {
                tracing::warn!(%error, "failed to remount root stack");
                StackHandle::dummy()
            }
        }
    }

    /// Get or create the stack `(owner, name)` and register it in the graph
    pub(crate) fn mount_stack(
        &self,
        owner: PageId,
        name: &str,
        uses_status_bar: bool,
        root: PageDescriptor,
        rebuild: bool,
    ) -> Result<StackKey> {
        let key = StackKey::new(owner, name);
        let parent = (!owner.is_root()).then_some(owner);

        let mut guard = self.state.lock();
        let state = &mut *guard;
        if let Some(parent) = parent {
            if !state.graph.contains_page(parent) {
                tracing::warn!(page = %parent, stack = %key, "cannot mount stack on unknown page");
                return Err(NavigationError::PageNotFound(parent));
            }
        }

        let exists = state.graph.contains_stack(&key);
        if exists && !rebuild {
            return Ok(key);
        }

        // A rebuild may reuse an id from the subtree it replaces
        let root_id = root.id();
        if state.graph.contains_page(root_id)
            && !(exists && state.graph.is_within(root_id, &key))
        {
            tracing::warn!(page = %root_id, stack = %key, "root page already registered elsewhere");
            return Err(StackError::DuplicatePage(root_id).into());
        }

        if exists {
            if let Some(teardown) = state.graph.remove_stack(&key) {
                self.finish_teardown(state, teardown);
            }
        }

        let stale = !state.pool.should_register(name, owner);
        let manager = state.pool.get(name, owner, uses_status_bar, rebuild || stale);
        let transition = manager.lock().push(root)?;
        state
            .graph
            .insert_stack(key.clone(), Some(Docker::new(manager)), parent, root_id);

        tracing::debug!(stack = %key, root = %root_id, "mounted stack");
        self.emit(NavigationEvent::StackRegistered(key.clone()));
        self.emit_transition(&key, &transition);
        Ok(key)
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Handle for the application root stack (the dummy before mounting)
    pub fn root_stack(&self) -> StackHandle {
        self.stack(&self.root_key())
    }

    /// Handle for a page, or the dummy handle if the id is unknown
    pub fn page(&self, id: PageId) -> PageHandle {
        if self.contains_page(id) {
            PageHandle::new(self.clone(), id)
        } else {
            tracing::warn!(page = %id, "unknown page, using dummy handle");
            PageHandle::dummy()
        }
    }

    /// Handle for a stack, or the dummy handle if the key is unknown
    pub fn stack(&self, key: &StackKey) -> StackHandle {
        if self.state.lock().graph.contains_stack(key) {
            StackHandle::new(self.clone(), key.clone())
        } else {
            tracing::warn!(stack = %key, "unknown stack, using dummy handle");
            StackHandle::dummy()
        }
    }

    /// Check whether a page is registered
    pub fn contains_page(&self, id: PageId) -> bool {
        self.state.lock().graph.contains_page(id)
    }

    /// Check whether a stack is registered
    pub fn contains_stack(&self, key: &StackKey) -> bool {
        self.state.lock().graph.contains_stack(key)
    }

    /// Number of registered pages
    pub fn page_count(&self) -> usize {
        self.state.lock().graph.page_count()
    }

    /// Number of registered stacks
    pub fn stack_count(&self) -> usize {
        self.state.lock().graph.stack_count()
    }

    /// Number of stack managers held by the pool
    pub fn manager_count(&self) -> usize {
        self.state.lock().pool.len()
    }

    pub(crate) fn manager(&self, key: &StackKey) -> Option<SharedStackManager> {
        self.docker_for(key).ok().map(|docker| Arc::clone(docker.manager()))
    }

    pub(crate) fn docker_for(&self, key: &StackKey) -> Result<Docker> {
        resolve_stack(&self.state.lock().graph, key)
    }

    pub(crate) fn parent_stack_of(&self, id: PageId) -> Option<StackKey> {
        let state = self.state.lock();
        state.graph.page(id).map(|page| page.parent_stack().clone())
    }

    pub(crate) fn child_stacks_of(&self, id: PageId) -> Vec<StackKey> {
        let state = self.state.lock();
        state
            .graph
            .page(id)
            .map(|page| page.child_stacks().to_vec())
            .unwrap_or_default()
    }

    pub(crate) fn hierarchy_of(&self, key: &StackKey) -> Vec<PageId> {
        let state = self.state.lock();
        state
            .graph
            .stack(key)
            .map(|stack| stack.hierarchy().to_vec())
            .unwrap_or_default()
    }

    // =========================================================================
    // Page operations
    // =========================================================================

    /// Push `page` onto the stack `from` sits on
    pub fn link(&self, from: PageId, page: PageDescriptor) -> Result<Transition> {
        self.with_page_stack(from, |state, key, docker| {
            self.link_locked(state, key, docker, page)
        })
    }

    /// Replace the stack `from` sits on with `page` as its only entry
    pub fn jump(&self, from: PageId, page: PageDescriptor) -> Result<Transition> {
        self.with_page_stack(from, |state, key, docker| {
            self.jump_locked(state, key, docker, page)
        })
    }

    /// Replace the top page without touching history. Not implemented.
    pub fn swap(&self, from: PageId, page: PageDescriptor) -> Result<Transition> {
        self.with_page_stack(from, |_, _, docker| docker.swap(page))
    }

    /// Pop the top page of the stack `from` sits on
    pub fn back(&self, from: PageId) -> Result<Transition> {
        self.with_page_stack(from, |state, key, docker| {
            self.back_locked(state, key, docker)
        })
    }

    /// Record a status bar style for `from`; shown if it is the visible page
    pub fn set_status_bar_style(&self, from: PageId, style: StatusBarStyle) -> Result<()> {
        self.with_page_stack(from, |_, _, docker| {
            docker.set_status_bar_style_for(from, style)
        })
    }

    /// [`link`](Self::link) after `delay`, unless cancelled or `from` is
    /// torn down first. Outside a tokio runtime nothing is scheduled.
    pub fn link_after(
        &self,
        from: PageId,
        page: PageDescriptor,
        delay: Duration,
    ) -> DeferredNavigation {
        self.schedule(from, delay, move |ctx| ctx.link(from, page))
    }

    /// [`jump`](Self::jump) after `delay`, unless cancelled or `from` is
    /// torn down first. Outside a tokio runtime nothing is scheduled.
    pub fn jump_after(
        &self,
        from: PageId,
        page: PageDescriptor,
        delay: Duration,
    ) -> DeferredNavigation {
        self.schedule(from, delay, move |ctx| ctx.jump(from, page))
    }

    fn schedule<F>(&self, from: PageId, delay: Duration, action: F) -> DeferredNavigation
    where
        F: FnOnce(&NavigationContext) -> Result<Transition> + Send + 'static,
    {
        let mut state = self.state.lock();
        if !state.graph.contains_page(from) {
            tracing::warn!(page = %from, "deferred navigation from unknown page ignored");
            return DeferredNavigation::noop();
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(page = %from, "deferred navigation outside a tokio runtime ignored");
            return DeferredNavigation::noop();
        };

        let ctx = self.clone();
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(error) = action(&ctx) {
                tracing::warn!(page = %from, %error, "deferred navigation failed");
            }
        });

        let pending = state.deferred.entry(from).or_default();
        pending.retain(|task| !task.is_finished());
        pending.push(handle.abort_handle());
        DeferredNavigation::new(handle)
    }

    // =========================================================================
    // Stack operations
    // =========================================================================

    pub(crate) fn stack_link(&self, key: &StackKey, page: PageDescriptor) -> Result<Transition> {
        self.with_stack(key, |state, docker| self.link_locked(state, key, docker, page))
    }

    pub(crate) fn stack_jump(&self, key: &StackKey, page: PageDescriptor) -> Result<Transition> {
        self.with_stack(key, |state, docker| self.jump_locked(state, key, docker, page))
    }

    pub(crate) fn stack_back(&self, key: &StackKey) -> Result<Transition> {
        self.with_stack(key, |state, docker| self.back_locked(state, key, docker))
    }

    pub(crate) fn drag_ended(&self, key: &StackKey, predicted_dx: f64) -> Result<Option<Transition>> {
        self.with_stack(key, |state, docker| match docker.drag_ended(predicted_dx) {
            DragEnd::Dismiss => self.back_locked(state, key, docker).map(Some),
            DragEnd::Cancelled(transition) => {
                self.emit_transition(key, &transition);
                Ok(Some(transition))
            }
            DragEnd::Idle => Ok(None),
        })
    }

    fn link_locked(
        &self,
        state: &mut ContextState,
        key: &StackKey,
        docker: &Docker,
        page: PageDescriptor,
    ) -> Result<Transition> {
        let id = page.id();
        if state.graph.contains_page(id) {
            tracing::warn!(page = %id, stack = %key, "page already registered, link ignored");
            return Err(StackError::DuplicatePage(id).into());
        }

        let transition = docker.link(page)?;
        state.graph.push_page(key, id);
        self.emit_transition(key, &transition);
        Ok(transition)
    }

    fn jump_locked(
        &self,
        state: &mut ContextState,
        key: &StackKey,
        docker: &Docker,
        page: PageDescriptor,
    ) -> Result<Transition> {
        let id = page.id();
        if state.graph.contains_page(id) {
            tracing::warn!(page = %id, stack = %key, "page already registered, jump ignored");
            return Err(StackError::DuplicatePage(id).into());
        }

        let transition = docker.jump(page);
        if let Some(teardown) = state.graph.replace_pages(key, id) {
            self.finish_teardown(state, teardown);
        }
        self.emit_transition(key, &transition);
        Ok(transition)
    }

    fn back_locked(
        &self,
        state: &mut ContextState,
        key: &StackKey,
        docker: &Docker,
    ) -> Result<Transition> {
        let depth = state
            .graph
            .stack(key)
            .map(|stack| stack.hierarchy().len())
            .unwrap_or(0);
        if depth <= 1 {
            tracing::warn!(stack = %key, "back at root ignored");
            return Err(StackError::AtRoot.into());
        }

        let transition = docker.back()?;
        if let Some((page, teardown)) = state.graph.pop_page(key) {
            tracing::debug!(stack = %key, page = %page, "page removed by back");
            self.finish_teardown(state, teardown);
        }
        self.emit_transition(key, &transition);
        Ok(transition)
    }

    /// Release everything attached to removed elements
    fn finish_teardown(&self, state: &mut ContextState, teardown: Teardown) {
        for key in teardown.stacks {
            state.pool.remove(&key.name, key.owner);
            self.emit(NavigationEvent::StackRemoved(key));
        }
        for page in teardown.pages {
            if let Some(tasks) = state.deferred.remove(&page) {
                for task in tasks {
                    task.abort();
                }
            }
            self.emit(NavigationEvent::PageRemoved(page));
        }
    }

    fn with_page_stack<R>(
        &self,
        from: PageId,
        f: impl FnOnce(&mut ContextState, &StackKey, &Docker) -> Result<R>,
    ) -> Result<R> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let Some(key) = state.graph.page(from).map(|page| page.parent_stack().clone()) else {
            tracing::warn!(page = %from, "navigation from unknown page, using dummy handle");
            return Err(NavigationError::PageNotFound(from));
        };
        let docker = resolve_stack(&state.graph, &key)?;
        f(state, &key, &docker)
    }

    fn with_stack<R>(
        &self,
        key: &StackKey,
        f: impl FnOnce(&mut ContextState, &Docker) -> Result<R>,
    ) -> Result<R> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let docker = resolve_stack(&state.graph, key)?;
        f(state, &docker)
    }

    fn emit_transition(&self, key: &StackKey, transition: &Transition) {
        self.emit(NavigationEvent::Transitioned {
            stack: key.clone(),
            transition: transition.clone(),
        });
    }

    fn emit(&self, event: NavigationEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

fn resolve_stack(graph: &NavigationGraph, key: &StackKey) -> Result<Docker> {
    let Some(stack) = graph.stack(key) else {
        tracing::warn!(stack = %key, "unknown stack, using dummy handle");
        return Err(NavigationError::StackNotFound(key.clone()));
    };
    stack.docker().cloned().ok_or_else(|| {
        tracing::warn!(stack = %key, "stack has no bound manager, operation skipped");
        NavigationError::Unbound(key.clone())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use page_stack::{TransitionKind, Viewport};

    fn mounted() -> (NavigationContext, StackHandle, PageId) {
        let ctx = NavigationContext::default();
        let root = PageDescriptor::new("home");
        let root_id = root.id();
        let stack = ctx.mount_root(root);
        (ctx, stack, root_id)
    }

    #[test]
    fn test_mount_root_is_idempotent() {
        let (ctx, stack, root_id) = mounted();
        let again = ctx.mount_root(PageDescriptor::new("ignored"));

        assert_eq!(again.key(), stack.key());
        assert_eq!(stack.page_ids(), vec![root_id]);
        assert_eq!(ctx.manager_count(), 1);
    }

    #[test]
    fn test_link_registers_page_element() {
        let (ctx, stack, root_id) = mounted();
        let page = PageDescriptor::new("detail");
        let id = page.id();

        let transition = ctx.link(root_id, page).unwrap();
        assert_eq!(transition.kind, TransitionKind::Push);
        assert!(ctx.contains_page(id));
        assert_eq!(ctx.parent_stack_of(id), stack.key().cloned());
        assert_eq!(stack.page_ids(), ctx.hierarchy_of(&ctx.root_key()));
    }

    #[test]
    fn test_unknown_page_degrades_to_noop() {
        let (ctx, stack, _) = mounted();
        let stranger = PageId::next();

        assert!(matches!(
            ctx.link(stranger, PageDescriptor::new("x")),
            Err(NavigationError::PageNotFound(id)) if id == stranger
        ));
        assert!(matches!(ctx.back(stranger), Err(NavigationError::PageNotFound(_))));
        assert_eq!(stack.depth(), 1);
        assert!(ctx.page(stranger).is_dummy());
    }

    #[test]
    fn test_swap_is_not_implemented() {
        let (ctx, stack, root_id) = mounted();
        assert!(matches!(
            ctx.swap(root_id, PageDescriptor::new("swap")),
            Err(NavigationError::NotImplemented("swap"))
        ));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_link_rejects_id_registered_elsewhere() {
        let (ctx, stack, root_id) = mounted();
        let inner_root = PageDescriptor::new("tab");
        let inner_id = inner_root.id();
        ctx.page(root_id)
            .mount_stack("tabs", false, inner_root)
            .unwrap();

        let result = ctx.link(root_id, PageDescriptor::with_id(inner_id, "dup"));
        assert!(matches!(
            result,
            Err(NavigationError::Stack(StackError::DuplicatePage(id))) if id == inner_id
        ));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_events_are_published() {
        let (ctx, _stack, root_id) = mounted();
        let mut rx = ctx.subscribe();

        let page = PageDescriptor::new("detail");
        let id = page.id();
        ctx.link(root_id, page).unwrap();
        ctx.back(id).unwrap();

        match rx.try_recv().unwrap() {
            NavigationEvent::Transitioned { stack, transition } => {
                assert_eq!(stack, ctx.root_key());
                assert_eq!(transition.kind, TransitionKind::Push);
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert_eq!(rx.try_recv().unwrap(), NavigationEvent::PageRemoved(id));
        assert!(matches!(
            rx.try_recv().unwrap(),
            NavigationEvent::Transitioned { transition, .. } if transition.kind == TransitionKind::Pop
        ));
    }

    #[test]
    fn test_root_status_bar_follows_top_page() {
        let (ctx, _stack, root_id) = mounted();
        let page = PageDescriptor::new("dark-hero").status_bar_style(StatusBarStyle::Light);
        let id = page.id();

        ctx.link(root_id, page).unwrap();
        assert_eq!(ctx.status_bar().style(), StatusBarStyle::Light);

        ctx.set_status_bar_style(id, StatusBarStyle::Dark).unwrap();
        assert_eq!(ctx.status_bar().style(), StatusBarStyle::Dark);

        ctx.set_status_bar_style(root_id, StatusBarStyle::Light).unwrap();
        assert_eq!(ctx.status_bar().style(), StatusBarStyle::Dark);
        ctx.back(id).unwrap();
        assert_eq!(ctx.status_bar().style(), StatusBarStyle::Light);
    }

    #[test]
    fn test_drag_dismiss_goes_through_graph() {
        let (ctx, stack, root_id) = mounted();
        stack.update_viewport(Viewport::new(390.0, 844.0)).unwrap();
        let page = PageDescriptor::new("detail");
        let id = page.id();
        ctx.link(root_id, page).unwrap();

        assert!(stack.drag_changed(180.0).unwrap());
        let transition = stack.drag_ended(400.0).unwrap().unwrap();

        assert_eq!(transition.kind, TransitionKind::Pop);
        assert!(!ctx.contains_page(id));
        assert_eq!(stack.offsets(), vec![0.0]);
    }

    #[test]
    fn test_remount_root_tears_down_tree() {
        let (ctx, _stack, root_id) = mounted();
        let page = PageDescriptor::new("detail");
        let detail_id = page.id();
        ctx.link(root_id, page).unwrap();
        ctx.page(detail_id)
            .mount_stack("tabs", false, PageDescriptor::new("tab"))
            .unwrap();
        assert_eq!(ctx.manager_count(), 2);

        let fresh = PageDescriptor::new("fresh");
        let fresh_id = fresh.id();
        let stack = ctx.remount_root(fresh);

        assert_eq!(stack.page_ids(), vec![fresh_id]);
        assert_eq!(ctx.page_count(), 1);
        assert_eq!(ctx.stack_count(), 1);
        assert_eq!(ctx.manager_count(), 1);
    }
}
