//! Page stacks for DefinedElements
//!
//! This crate models a single navigable stack of pages, independent of any
//! renderer or of other stacks:
//!
//! - [`page`] - Page identity, descriptors and status bar styles
//! - [`container`] - Ordered, deduplicating page storage
//! - [`manager`] - Push/pop/jump state machine with offsets and drag handling
//! - [`transition`] - Transition descriptors handed to the renderer
//! - [`status_bar`] - Shared status bar indicator
//! - [`viewport`] - Layout information written by the renderer
//! - [`config`] - Motion and gesture settings
//!
//! # Example
//!
//! ```rust
//! use page_stack::{PageDescriptor, StackConfig, StackManager, StatusBar, StatusBarStyle};
//!
//! let status_bar = StatusBar::default();
//! let mut stack = StackManager::new("main", true, status_bar.clone(), StackConfig::default());
//!
//! stack.push(PageDescriptor::new("home")).unwrap();
//! stack
//!     .push(PageDescriptor::new("detail").status_bar_style(StatusBarStyle::Light))
//!     .unwrap();
//! assert_eq!(status_bar.style(), StatusBarStyle::Light);
//!
//! stack.pop().unwrap();
//! assert_eq!(stack.depth(), 1);
//! assert!(stack.pop().is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod container;
pub mod error;
pub mod manager;
pub mod page;
pub mod status_bar;
pub mod transition;
pub mod viewport;

pub use config::StackConfig;
pub use container::StackContainer;
pub use error::{Result, StackError};
pub use manager::{DragEnd, StackManager, StackSnapshot};
pub use page::{PageDescriptor, PageId, StatusBarStyle};
pub use status_bar::StatusBar;
pub use transition::{Transition, TransitionKind};
pub use viewport::{EdgeInsets, Viewport};
