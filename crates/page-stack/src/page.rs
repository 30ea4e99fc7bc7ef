//! Page identity and descriptors

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Next id handed out by [`PageId::next`]. Zero is reserved for [`PageId::ROOT`].
static NEXT_PAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Globally unique page identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(u64);

impl PageId {
    /// Owner of the application-wide root stack. Never assigned to a page.
    pub const ROOT: PageId = PageId(0);

    /// Allocate a fresh id
    pub fn next() -> Self {
        PageId(NEXT_PAGE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Wrap an externally assigned id
    pub const fn from_raw(raw: u64) -> Self {
        PageId(raw)
    }

    /// Raw numeric value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Check if this is the reserved root owner id
    pub fn is_root(&self) -> bool {
        *self == PageId::ROOT
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page#{}", self.0)
    }
}

/// Status bar appearance requested by a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusBarStyle {
    /// Light content, for dark backgrounds
    Light,
    /// Dark content, for light backgrounds
    #[default]
    Dark,
}

/// A page on a stack: identity, content and status bar preference
///
/// Equality is by id only. The descriptor owns its content for as long as
/// it sits in a stack.
pub struct PageDescriptor {
    id: PageId,
    content: Box<dyn Any + Send + Sync>,
    status_bar_style: StatusBarStyle,
}

impl PageDescriptor {
    /// Create a descriptor with a freshly allocated id
    pub fn new(content: impl Any + Send + Sync) -> Self {
        Self::with_id(PageId::next(), content)
    }

    /// Create a descriptor with an assigned id
    pub fn with_id(id: PageId, content: impl Any + Send + Sync) -> Self {
        Self {
            id,
            content: Box::new(content),
            status_bar_style: StatusBarStyle::default(),
        }
    }

    /// Set the initial status bar style
    pub fn status_bar_style(mut self, style: StatusBarStyle) -> Self {
        self.status_bar_style = style;
        self
    }

    /// Page id
    pub fn id(&self) -> PageId {
        self.id
    }

    /// Currently recorded status bar style
    pub fn style(&self) -> StatusBarStyle {
        self.status_bar_style
    }

    pub(crate) fn set_style(&mut self, style: StatusBarStyle) {
        self.status_bar_style = style;
    }

    /// Borrow the content if it is a `T`
    pub fn content<T: Any>(&self) -> Option<&T> {
        self.content.downcast_ref::<T>()
    }
}

impl PartialEq for PageDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PageDescriptor {}

impl fmt::Debug for PageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageDescriptor")
            .field("id", &self.id)
            .field("status_bar_style", &self.status_bar_style)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = PageId::next();
        let b = PageId::next();
        assert_ne!(a, b);
        assert!(!a.is_root());
        assert!(PageId::ROOT.is_root());
    }

    #[test]
    fn test_equality_is_by_id() {
        let id = PageId::from_raw(42);
        let a = PageDescriptor::with_id(id, "first");
        let b = PageDescriptor::with_id(id, 17_u32).status_bar_style(StatusBarStyle::Light);
        assert_eq!(a, b);
        assert_ne!(a, PageDescriptor::new("first"));
    }

    #[test]
    fn test_default_style_is_dark() {
        let page = PageDescriptor::new(());
        assert_eq!(page.style(), StatusBarStyle::Dark);
    }

    #[test]
    fn test_content_downcast() {
        let page = PageDescriptor::new(String::from("settings"));
        assert_eq!(page.content::<String>().map(String::as_str), Some("settings"));
        assert!(page.content::<u32>().is_none());
    }

    #[test]
    fn test_style_serialization() {
        assert_eq!(serde_json::to_string(&StatusBarStyle::Light).unwrap(), "\"light\"");
        assert_eq!(serde_json::to_string(&PageId::from_raw(7)).unwrap(), "7");
    }
}
