//! Stack errors

use crate::page::PageId;
use thiserror::Error;

/// Guard failures raised by stack operations
///
/// Every variant leaves the stack exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    /// A page with this id is already on the stack
    #[error("Page already on stack: {0}")]
    DuplicatePage(PageId),

    /// Only the root page is left
    #[error("Cannot pop the root page")]
    AtRoot,

    /// The stack holds no pages
    #[error("Stack is empty")]
    Empty,

    /// Page id not found on this stack
    #[error("Page not on stack: {0}")]
    PageNotFound(PageId),
}

/// Result type for stack operations
pub type Result<T> = std::result::Result<T, StackError>;
