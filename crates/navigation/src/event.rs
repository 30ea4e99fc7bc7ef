//! Navigation events published to the renderer

use crate::graph::StackKey;
use page_stack::{PageId, Transition};

/// Something changed in the navigation tree
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationEvent {
    /// A stack changed and should be redrawn with this transition
    Transitioned {
        /// Stack that changed
        stack: StackKey,
        /// Animation to run
        transition: Transition,
    },
    /// A stack was mounted
    StackRegistered(StackKey),
    /// A stack was torn down with its owning page
    StackRemoved(StackKey),
    /// A page left the graph
    PageRemoved(PageId),
}
