//! Navigation element graph
//!
//! An arena of page elements and stack elements linked by id. A page knows
//! the stack it sits on and the stacks it hosts; a stack knows its owning
//! page, its docker, and one page element per entry. Ids are the only links,
//! so removal is an explicit depth-first walk rather than reference drops.

use crate::docker::Docker;
use page_stack::PageId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Identity of a stack: the page hosting it plus its name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StackKey {
    /// Hosting page ([`PageId::ROOT`] for the application root stack)
    pub owner: PageId,
    /// Stack name, unique per owner
    pub name: String,
}

impl StackKey {
    /// Create a key
    pub fn new(owner: PageId, name: impl Into<String>) -> Self {
        Self {
            owner,
            name: name.into(),
        }
    }

    /// Key of the application root stack
    pub fn root(name: impl Into<String>) -> Self {
        Self::new(PageId::ROOT, name)
    }
}

impl fmt::Display for StackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Page element: one per live page
#[derive(Debug, Clone)]
pub struct NavigationElement {
    id: PageId,
    parent_stack: StackKey,
    child_stacks: Vec<StackKey>,
}

impl NavigationElement {
    /// Page id
    pub fn id(&self) -> PageId {
        self.id
    }

    /// Stack this page sits on
    pub fn parent_stack(&self) -> &StackKey {
        &self.parent_stack
    }

    /// Stacks hosted inside this page
    pub fn child_stacks(&self) -> &[StackKey] {
        &self.child_stacks
    }
}

/// Stack element: one per live stack
#[derive(Debug, Clone)]
pub struct NavigationRootElement {
    key: StackKey,
    docker: Option<Docker>,
    hierarchy: Vec<PageId>,
    parent: Option<PageId>,
}

impl NavigationRootElement {
    /// Stack key
    pub fn key(&self) -> &StackKey {
        &self.key
    }

    /// Bound docker
    pub fn docker(&self) -> Option<&Docker> {
        self.docker.as_ref()
    }

    /// Page ids on this stack, bottom to top
    pub fn hierarchy(&self) -> &[PageId] {
        &self.hierarchy
    }

    /// Hosting page element, absent for the application root stack
    pub fn parent(&self) -> Option<PageId> {
        self.parent
    }
}

/// Everything removed by one teardown
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Teardown {
    /// Removed page ids, children before parents
    pub pages: Vec<PageId>,
    /// Removed stacks, innermost first
    pub stacks: Vec<StackKey>,
}

impl Teardown {
    fn absorb(&mut self, other: Teardown) {
        self.pages.extend(other.pages);
        self.stacks.extend(other.stacks);
    }
}

/// Arena of page and stack elements
#[derive(Debug, Default)]
pub struct NavigationGraph {
    pages: HashMap<PageId, NavigationElement>,
    stacks: HashMap<StackKey, NavigationRootElement>,
}

impl NavigationGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a page element
    pub fn page(&self, id: PageId) -> Option<&NavigationElement> {
        self.pages.get(&id)
    }

    /// Look up a stack element
    pub fn stack(&self, key: &StackKey) -> Option<&NavigationRootElement> {
        self.stacks.get(key)
    }

    /// Check if a page is registered
    pub fn contains_page(&self, id: PageId) -> bool {
        self.pages.contains_key(&id)
    }

    /// Check if a stack is registered
    pub fn contains_stack(&self, key: &StackKey) -> bool {
        self.stacks.contains_key(key)
    }

    /// Number of page elements
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of stack elements
    pub fn stack_count(&self) -> usize {
        self.stacks.len()
    }

    /// Check whether `page` sits on `stack` or anywhere nested inside it
    pub fn is_within(&self, page: PageId, stack: &StackKey) -> bool {
        let mut current = page;
        while let Some(element) = self.pages.get(&current) {
            let key = element.parent_stack();
            if key == stack {
                return true;
            }
            match self.stacks.get(key).and_then(NavigationRootElement::parent) {
                Some(owner) => current = owner,
                None => return false,
            }
        }
        false
    }

    /// Register a stack with its root page, under `parent`'s child stacks
    ///
    /// Returns `false` without changes if the stack or root page already
    /// exists, or if `parent` is given but not registered.
    pub fn insert_stack(
        &mut self,
        key: StackKey,
        docker: Option<Docker>,
        parent: Option<PageId>,
        root: PageId,
    ) -> bool {
        if self.stacks.contains_key(&key) || self.pages.contains_key(&root) {
            return false;
        }
        if let Some(parent) = parent {
            match self.pages.get_mut(&parent) {
                Some(element) => element.child_stacks.push(key.clone()),
                None => return false,
            }
        }

        self.pages.insert(
            root,
            NavigationElement {
                id: root,
                parent_stack: key.clone(),
                child_stacks: Vec::new(),
            },
        );
        self.stacks.insert(
            key.clone(),
            NavigationRootElement {
                key,
                docker,
                hierarchy: vec![root],
                parent,
            },
        );
        true
    }

    /// Register a page pushed onto `stack`
    pub fn push_page(&mut self, stack: &StackKey, page: PageId) -> bool {
        if self.pages.contains_key(&page) {
            return false;
        }
        let Some(element) = self.stacks.get_mut(stack) else {
            return false;
        };

        element.hierarchy.push(page);
        self.pages.insert(
            page,
            NavigationElement {
                id: page,
                parent_stack: stack.clone(),
                child_stacks: Vec::new(),
            },
        );
        true
    }

    /// Remove the top page of `stack` and everything below it in the tree
    ///
    /// The root page stays: returns `None` when only one page is left.
    pub fn pop_page(&mut self, stack: &StackKey) -> Option<(PageId, Teardown)> {
        let element = self.stacks.get_mut(stack)?;
        if element.hierarchy.len() <= 1 {
            return None;
        }
        let page = element.hierarchy.pop()?;
        Some((page, self.unregister(page)))
    }

    /// Make `root` the only page of `stack`, tearing down the previous ones
    pub fn replace_pages(&mut self, stack: &StackKey, root: PageId) -> Option<Teardown> {
        if self.pages.contains_key(&root) {
            return None;
        }
        let element = self.stacks.get_mut(stack)?;
        let previous = std::mem::replace(&mut element.hierarchy, vec![root]);

        let mut teardown = Teardown::default();
        for page in previous.into_iter().rev() {
            teardown.absorb(self.unregister(page));
        }
        self.pages.insert(
            root,
            NavigationElement {
                id: root,
                parent_stack: stack.clone(),
                child_stacks: Vec::new(),
            },
        );
        Some(teardown)
    }

    /// Remove a page element and, depth first, every stack it hosts with
    /// all of their pages
    pub fn unregister(&mut self, page: PageId) -> Teardown {
        let mut teardown = Teardown::default();
        let Some(element) = self.pages.remove(&page) else {
            return teardown;
        };

        for child in element.child_stacks {
            if let Some(stack) = self.stacks.remove(&child) {
                for nested in stack.hierarchy.into_iter().rev() {
                    teardown.absorb(self.unregister(nested));
                }
                teardown.stacks.push(child);
            }
        }
        teardown.pages.push(page);
        teardown
    }

    /// Remove a stack and its pages, detaching it from its parent page
    pub fn remove_stack(&mut self, key: &StackKey) -> Option<Teardown> {
        let stack = self.stacks.remove(key)?;
        if let Some(parent) = stack.parent.and_then(|id| self.pages.get_mut(&id)) {
            parent.child_stacks.retain(|child| child != key);
        }

        let mut teardown = Teardown::default();
        for page in stack.hierarchy.into_iter().rev() {
            teardown.absorb(self.unregister(page));
        }
        teardown.stacks.push(key.clone());
        Some(teardown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<const N: usize>() -> [PageId; N] {
        std::array::from_fn(|_| PageId::next())
    }

    #[test]
    fn test_insert_and_push() {
        let mut graph = NavigationGraph::new();
        let root_key = StackKey::root("root");
        let [a, b] = ids();

        assert!(graph.insert_stack(root_key.clone(), None, None, a));
        assert!(!graph.insert_stack(root_key.clone(), None, None, b));
        assert!(graph.push_page(&root_key, b));
        assert!(!graph.push_page(&root_key, b));

        assert_eq!(graph.stack(&root_key).unwrap().hierarchy(), &[a, b]);
        assert_eq!(graph.page(b).unwrap().parent_stack(), &root_key);
    }

    #[test]
    fn test_is_within_follows_nesting() {
        let mut graph = NavigationGraph::new();
        let root_key = StackKey::root("root");
        let [home, feed, post, other] = ids();
        graph.insert_stack(root_key.clone(), None, None, home);
        graph.push_page(&root_key, other);
        let tabs = StackKey::new(home, "tabs");
        graph.insert_stack(tabs.clone(), None, Some(home), feed);
        let inner = StackKey::new(feed, "inner");
        graph.insert_stack(inner.clone(), None, Some(feed), post);

        assert!(graph.is_within(post, &inner));
        assert!(graph.is_within(post, &tabs));
        assert!(graph.is_within(post, &root_key));
        assert!(graph.is_within(feed, &tabs));
        assert!(!graph.is_within(home, &tabs));
        assert!(!graph.is_within(other, &tabs));
        assert!(!graph.is_within(PageId::next(), &root_key));
    }

    #[test]
    fn test_nested_stack_requires_parent() {
        let mut graph = NavigationGraph::new();
        let [orphan_parent, root] = ids();
        let key = StackKey::new(orphan_parent, "tabs");
        assert!(!graph.insert_stack(key.clone(), None, Some(orphan_parent), root));
        assert!(!graph.contains_stack(&key));
        assert!(!graph.contains_page(root));
    }

    #[test]
    fn test_pop_cascades_into_nested_stacks() {
        let mut graph = NavigationGraph::new();
        let root_key = StackKey::root("root");
        let [home, a, b, c] = ids();

        graph.insert_stack(root_key.clone(), None, None, home);
        graph.push_page(&root_key, a);
        let nested = StackKey::new(a, "inner");
        assert!(graph.insert_stack(nested.clone(), None, Some(a), b));
        graph.push_page(&nested, c);
        assert_eq!(graph.page(a).unwrap().child_stacks(), &[nested.clone()]);

        let (popped, teardown) = graph.pop_page(&root_key).unwrap();
        assert_eq!(popped, a);
        assert_eq!(teardown.pages, vec![c, b, a]);
        assert_eq!(teardown.stacks, vec![nested.clone()]);

        assert!(!graph.contains_stack(&nested));
        for id in [a, b, c] {
            assert!(!graph.contains_page(id));
        }
        assert_eq!(graph.page_count(), 1);
        assert_eq!(graph.stack_count(), 1);
    }

    #[test]
    fn test_pop_keeps_root() {
        let mut graph = NavigationGraph::new();
        let key = StackKey::root("root");
        let root = PageId::next();
        graph.insert_stack(key.clone(), None, None, root);

        assert!(graph.pop_page(&key).is_none());
        assert!(graph.contains_page(root));
    }

    #[test]
    fn test_replace_pages() {
        let mut graph = NavigationGraph::new();
        let key = StackKey::root("root");
        let [a, b, d] = ids();
        graph.insert_stack(key.clone(), None, None, a);
        graph.push_page(&key, b);

        let teardown = graph.replace_pages(&key, d).unwrap();
        assert_eq!(teardown.pages, vec![b, a]);
        assert_eq!(graph.stack(&key).unwrap().hierarchy(), &[d]);
        assert_eq!(graph.page_count(), 1);
    }

    #[test]
    fn test_unregister_twice_is_harmless() {
        let mut graph = NavigationGraph::new();
        let key = StackKey::root("root");
        let root = PageId::next();
        graph.insert_stack(key, None, None, root);

        assert_eq!(graph.unregister(root).pages, vec![root]);
        assert_eq!(graph.unregister(root), Teardown::default());
    }

    #[test]
    fn test_remove_stack_detaches_from_parent() {
        let mut graph = NavigationGraph::new();
        let root_key = StackKey::root("root");
        let [home, inner_root] = ids();
        graph.insert_stack(root_key, None, None, home);
        let nested = StackKey::new(home, "tabs");
        graph.insert_stack(nested.clone(), None, Some(home), inner_root);

        let teardown = graph.remove_stack(&nested).unwrap();
        assert_eq!(teardown.pages, vec![inner_root]);
        assert!(graph.page(home).unwrap().child_stacks().is_empty());
    }
}
