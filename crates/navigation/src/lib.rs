//! Navigation engine for DefinedElements
//!
//! Pages navigate without holding a reference to the stack they live on:
//! every call goes through a [`NavigationContext`], which resolves the page
//! to its stack via the element graph and forwards to that stack's manager.
//!
//! # Modules
//!
//! - [`context`] - The navigation context and all navigation entry points
//! - [`handle`] - Page and stack handles, including the dummy fallback
//! - [`graph`] - Arena of page and stack elements with cascading teardown
//! - [`pool`] - Stack managers keyed by owning page and stack name
//! - [`docker`] - Binding between a stack element and its manager
//! - [`deferred`] - Delayed, cancellable navigation
//! - [`event`] - Events published to the renderer
//! - [`config`] - Navigation configuration
//!
//! # Example
//!
//! ```rust
//! use navigation::NavigationContext;
//! use page_stack::PageDescriptor;
//!
//! let ctx = NavigationContext::default();
//! let root = ctx.mount_root(PageDescriptor::new("home"));
//!
//! // A page hosting its own tab stack
//! let home = root.top();
//! let tabs = home.mount_stack("tabs", false, PageDescriptor::new("feed")).unwrap();
//! tabs.top().link(PageDescriptor::new("post")).unwrap();
//! assert_eq!(tabs.depth(), 2);
//!
//! // Replacing the root stack tears the tab stack down with its host page
//! root.jump(PageDescriptor::new("login")).unwrap();
//! assert!(!tabs.is_registered());
//! assert_eq!(ctx.manager_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod context;
pub mod deferred;
pub mod docker;
pub mod error;
pub mod event;
pub mod graph;
pub mod handle;
pub mod pool;

pub use config::NavigationConfig;
pub use context::NavigationContext;
pub use deferred::DeferredNavigation;
pub use docker::Docker;
pub use error::{NavigationError, Result};
pub use event::NavigationEvent;
pub use graph::{NavigationElement, NavigationGraph, NavigationRootElement, StackKey, Teardown};
pub use handle::{PageHandle, StackHandle};
pub use pool::{SharedStackManager, StackManagerPool};
