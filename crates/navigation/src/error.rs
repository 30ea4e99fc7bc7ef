//! Navigation errors

use crate::graph::StackKey;
use page_stack::{PageId, StackError};
use thiserror::Error;

/// Navigation errors
///
/// None of these leave partial state behind. Callers that ignore them see a
/// navigation call that did nothing.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// Page is not registered in the element graph
    #[error("Page not found: {0}")]
    PageNotFound(PageId),

    /// Stack is not registered in the element graph
    #[error("Stack not found: {0}")]
    StackNotFound(StackKey),

    /// Stack has no manager bound to it
    #[error("Stack has no bound manager: {0}")]
    Unbound(StackKey),

    /// Operation called on the dummy handle
    #[error("Navigation handle is not attached to any page or stack")]
    Unresolved,

    /// Operation exists but has no behavior yet
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    /// Stack guard failure
    #[error("Stack error: {0}")]
    Stack(#[from] StackError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// I/O error while loading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for navigation operations
pub type Result<T> = std::result::Result<T, NavigationError>;
