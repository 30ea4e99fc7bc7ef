//! Stack manager
//!
//! Wraps a [`StackContainer`] with everything a navigable surface needs on
//! top of plain storage:
//! - a horizontal offset per page, for the peek effect and interactive drags
//! - status bar propagation from the visible page
//! - push/pop/jump transitions, each returning a [`Transition`] descriptor
//!
//! `offsets` always has one slot per entry once an operation returns.

use crate::config::StackConfig;
use crate::container::StackContainer;
use crate::error::{Result, StackError};
use crate::page::{PageDescriptor, PageId, StatusBarStyle};
use crate::status_bar::StatusBar;
use crate::transition::{Transition, TransitionKind};
use crate::viewport::Viewport;

/// Outcome of finishing a drag gesture
#[derive(Debug, Clone, PartialEq)]
pub enum DragEnd {
    /// Past the threshold. The caller commits the back navigation.
    Dismiss,
    /// Below the threshold. Offsets are back to their pre-gesture values.
    Cancelled(Transition),
    /// No drag was in progress
    Idle,
}

/// Point-in-time copy of a [`StackManager`]
#[derive(Debug, Clone, PartialEq)]
pub struct StackSnapshot {
    /// Stack name
    pub name: String,
    /// Whether the stack drives the status bar
    pub uses_status_bar: bool,
    /// Page ids and their status bar styles, bottom to top
    pub pages: Vec<(PageId, StatusBarStyle)>,
    /// Horizontal offset per page
    pub offsets: Vec<f64>,
    /// Last known viewport
    pub viewport: Viewport,
    /// Whether a drag is in progress
    pub dragging: bool,
}

impl StackSnapshot {
    /// Visible page and its style
    pub fn top(&self) -> Option<(PageId, StatusBarStyle)> {
        self.pages.last().copied()
    }

    /// Number of pages
    pub fn depth(&self) -> usize {
        self.pages.len()
    }
}

/// Offsets captured when a drag starts
#[derive(Debug, Clone)]
struct DragState {
    resting: Vec<f64>,
}

/// One navigable stack of pages
#[derive(Debug)]
pub struct StackManager {
    name: String,
    container: StackContainer,
    offsets: Vec<f64>,
    uses_status_bar: bool,
    status_bar: StatusBar,
    viewport: Viewport,
    config: StackConfig,
    drag: Option<DragState>,
}

impl StackManager {
    /// Create an empty manager. The first [`push`](Self::push) sets the root.
    pub fn new(
        name: impl Into<String>,
        uses_status_bar: bool,
        status_bar: StatusBar,
        config: StackConfig,
    ) -> Self {
        Self {
            name: name.into(),
            container: StackContainer::new(),
            offsets: Vec::new(),
            uses_status_bar,
            status_bar,
            viewport: Viewport::default(),
            config,
            drag: None,
        }
    }

    /// Push a page on top
    ///
    /// Rejects a page whose id is already anywhere on the stack.
    pub fn push(&mut self, page: PageDescriptor) -> Result<Transition> {
        if self.container.contains(page.id()) {
            tracing::warn!(stack = %self.name, page = %page.id(), "page already on stack, push ignored");
            return Err(StackError::DuplicatePage(page.id()));
        }
        self.drag = None;

        let id = page.id();
        let style = page.style();
        self.offsets.push(0.0);
        let mut transition = self.transition(TransitionKind::Push);
        self.container.push(page);

        let depth = self.depth();
        if depth > 1 {
            self.offsets[depth - 2] = self.peek_offset();
            transition.affected = vec![depth - 2, depth - 1];
        } else {
            transition.affected = vec![0];
        }
        if self.uses_status_bar {
            self.status_bar.set(style);
        }

        tracing::debug!(stack = %self.name, page = %id, depth, "pushed page");
        Ok(transition)
    }

    /// Pop the top page. The root page is never popped.
    pub fn pop(&mut self) -> Result<Transition> {
        let depth = self.depth();
        if depth <= 1 {
            tracing::warn!(stack = %self.name, "pop at root ignored");
            return Err(StackError::AtRoot);
        }
        self.drag = None;

        let new_top = depth - 2;
        if self.uses_status_bar {
            let style = self.container.snapshot()[new_top].style();
            self.status_bar.set(style);
        }

        let mut transition = self.transition(TransitionKind::Pop);
        self.container.pop();
        self.offsets[new_top] = 0.0;
        self.offsets.pop();
        transition.affected = vec![new_top, new_top + 1];

        tracing::debug!(stack = %self.name, depth = new_top + 1, "popped page");
        Ok(transition)
    }

    /// Replace the whole stack with `page` as the only entry
    pub fn jump(&mut self, page: PageDescriptor) -> Transition {
        let mut transition = self.transition(TransitionKind::Jump);
        self.renew();

        let id = page.id();
        let style = page.style();
        self.container.push(page);
        if self.uses_status_bar {
            self.status_bar.set(style);
        }
        transition.affected = vec![0];

        tracing::debug!(stack = %self.name, page = %id, "jumped to new root");
        transition
    }

    fn renew(&mut self) {
        self.drag = None;
        self.container.clear();
        self.offsets = vec![0.0];
    }

    /// Update the visible page's status bar style
    pub fn set_status_bar_style(&mut self, style: StatusBarStyle) -> Result<()> {
        let top = self.depth().checked_sub(1).ok_or(StackError::Empty)?;
        self.apply_style(top, style);
        Ok(())
    }

    /// Update the status bar style recorded for `id`, wherever it sits
    ///
    /// Only propagates to the indicator when that page is on top.
    pub fn set_status_bar_style_for(&mut self, id: PageId, style: StatusBarStyle) -> Result<()> {
        let index = self.container.position(id).ok_or_else(|| {
            tracing::warn!(stack = %self.name, page = %id, "status bar update for unknown page");
            StackError::PageNotFound(id)
        })?;
        self.apply_style(index, style);
        Ok(())
    }

    fn apply_style(&mut self, index: usize, style: StatusBarStyle) {
        let is_top = index + 1 == self.depth();
        if let Some(entry) = self.container.get_mut(index) {
            entry.set_style(style);
        }
        if is_top && self.uses_status_bar {
            self.status_bar.set(style);
        }
    }

    // =========================================================================
    // Interactive drag
    // =========================================================================

    /// Follow a drag with horizontal translation `x`
    ///
    /// Moves the top two offsets only; the container is never touched.
    /// Returns `false` when there is nothing to drag back to.
    pub fn drag_changed(&mut self, x: f64) -> bool {
        let depth = self.depth();
        if depth < 2 {
            return false;
        }

        let resting = &self
            .drag
            .get_or_insert_with(|| DragState {
                resting: self.offsets.clone(),
            })
            .resting;
        let below_rest = resting[depth - 2];

        let x = x.max(0.0);
        self.offsets[depth - 1] = x;
        self.offsets[depth - 2] = (below_rest + x * self.config.peek_fraction).min(0.0);
        true
    }

    /// Finish a drag with the gesture's predicted horizontal travel
    pub fn drag_ended(&mut self, predicted_dx: f64) -> DragEnd {
        let Some(drag) = self.drag.take() else {
            return DragEnd::Idle;
        };

        let depth = self.depth();
        if depth > 1 && predicted_dx > self.config.dismiss_threshold {
            tracing::debug!(stack = %self.name, predicted_dx, "drag dismisses top page");
            return DragEnd::Dismiss;
        }

        if drag.resting.len() == self.offsets.len() {
            self.offsets = drag.resting;
        }
        let affected = if depth > 1 {
            vec![depth - 2, depth - 1]
        } else {
            vec![0]
        };
        DragEnd::Cancelled(Transition::new(
            TransitionKind::SnapBack,
            self.config.snap_back_duration_ms,
            self.config.easing.clone(),
            affected,
        ))
    }

    /// Check whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Stack name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this stack drives the status bar
    pub fn uses_status_bar(&self) -> bool {
        self.uses_status_bar
    }

    /// Pages in display order
    pub fn entries(&self) -> &[PageDescriptor] {
        self.container.snapshot()
    }

    /// Page ids in display order
    pub fn page_ids(&self) -> Vec<PageId> {
        self.entries().iter().map(PageDescriptor::id).collect()
    }

    /// Horizontal offset per entry
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    /// Visible page
    pub fn top(&self) -> Option<&PageDescriptor> {
        self.container.top()
    }

    /// Number of pages
    pub fn depth(&self) -> usize {
        self.container.len()
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        self.depth() > 1
    }

    /// Last known viewport
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Record the viewport from the latest layout pass
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Motion and gesture settings
    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Status bar indicator this stack writes to
    pub fn status_bar(&self) -> &StatusBar {
        &self.status_bar
    }

    /// Copy of the visible state, safe to hold after the lock is released
    pub fn snapshot(&self) -> StackSnapshot {
        StackSnapshot {
            name: self.name.clone(),
            uses_status_bar: self.uses_status_bar,
            pages: self
                .entries()
                .iter()
                .map(|page| (page.id(), page.style()))
                .collect(),
            offsets: self.offsets.clone(),
            viewport: self.viewport,
            dragging: self.drag.is_some(),
        }
    }

    fn peek_offset(&self) -> f64 {
        -self.config.peek_fraction * self.viewport.usable_width()
    }

    fn transition(&self, kind: TransitionKind) -> Transition {
        Transition::new(
            kind,
            self.config.transition_duration_ms,
            self.config.easing.clone(),
            Vec::new(),
        )
    }
}
