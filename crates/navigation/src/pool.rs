//! Stack manager pool
//!
//! Looks up the [`StackManager`] for an `(owner page, stack name)` pair,
//! creating it on first use. One page can host several independently named
//! stacks (tabs, split panes).

use page_stack::{PageId, StackConfig, StackManager, StatusBar};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// A stack manager shared between the pool and the docker fronting it
pub type SharedStackManager = Arc<Mutex<StackManager>>;

/// Registry of stack managers keyed by owner page, then stack name
#[derive(Debug)]
pub struct StackManagerPool {
    managers: HashMap<PageId, HashMap<String, SharedStackManager>>,
    status_bar: StatusBar,
    config: StackConfig,
}

impl StackManagerPool {
    /// Create an empty pool. Managers it builds share `status_bar` and `config`.
    pub fn new(status_bar: StatusBar, config: StackConfig) -> Self {
        Self {
            managers: HashMap::new(),
            status_bar,
            config,
        }
    }

    /// Get the manager for `(owner, name)`, building it if absent or if
    /// `force_rebuild` is set
    ///
    /// `uses_status_bar` only applies when a manager is built. An existing
    /// manager keeps the flag it was created with.
    pub fn get(
        &mut self,
        name: &str,
        owner: PageId,
        uses_status_bar: bool,
        force_rebuild: bool,
    ) -> SharedStackManager {
        let stacks = self.managers.entry(owner).or_default();
        if !force_rebuild {
            if let Some(existing) = stacks.get(name) {
                return Arc::clone(existing);
            }
        }

        tracing::debug!(stack = name, owner = %owner, uses_status_bar, force_rebuild, "building stack manager");
        let manager = Arc::new(Mutex::new(StackManager::new(
            name,
            uses_status_bar,
            self.status_bar.clone(),
            self.config.clone(),
        )));
        stacks.insert(name.to_string(), Arc::clone(&manager));
        manager
    }

    /// Check whether `(owner, name)` still needs its first-time setup
    pub fn should_register(&self, name: &str, owner: PageId) -> bool {
        !self
            .managers
            .get(&owner)
            .is_some_and(|stacks| stacks.contains_key(name))
    }

    /// Drop the manager for `(owner, name)`
    pub fn remove(&mut self, name: &str, owner: PageId) -> Option<SharedStackManager> {
        let stacks = self.managers.get_mut(&owner)?;
        let removed = stacks.remove(name);
        if stacks.is_empty() {
            self.managers.remove(&owner);
        }
        removed
    }

    /// Drop every manager owned by `owner`, returning how many were removed
    pub fn remove_owner(&mut self, owner: PageId) -> usize {
        self.managers
            .remove(&owner)
            .map(|stacks| stacks.len())
            .unwrap_or(0)
    }

    /// Number of managers across all owners
    pub fn len(&self) -> usize {
        self.managers.values().map(HashMap::len).sum()
    }

    /// Check if the pool holds no managers
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Status bar shared by managers built here
    pub fn status_bar(&self) -> &StatusBar {
        &self.status_bar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> StackManagerPool {
        StackManagerPool::new(StatusBar::default(), StackConfig::default())
    }

    #[test]
    fn test_get_is_idempotent() {
        let mut pool = pool();
        let owner = PageId::from_raw(7);

        let first = pool.get("main", owner, true, false);
        let second = pool.get("main", owner, false, false);

        assert!(Arc::ptr_eq(&first, &second));
        assert!(second.lock().uses_status_bar());
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_force_rebuild_replaces_manager() {
        let mut pool = pool();
        let owner = PageId::from_raw(8);

        let first = pool.get("main", owner, true, false);
        let rebuilt = pool.get("main", owner, false, true);

        assert!(!Arc::ptr_eq(&first, &rebuilt));
        assert!(!rebuilt.lock().uses_status_bar());
        assert!(Arc::ptr_eq(&rebuilt, &pool.get("main", owner, true, false)));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_should_register() {
        let mut pool = pool();
        let owner = PageId::from_raw(9);

        assert!(pool.should_register("main", owner));
        pool.get("main", owner, false, false);
        assert!(!pool.should_register("main", owner));
        assert!(pool.should_register("side", owner));
        assert!(pool.should_register("main", PageId::from_raw(10)));
    }

    #[test]
    fn test_names_are_scoped_per_owner() {
        let mut pool = pool();
        let a = pool.get("tabs", PageId::from_raw(1), false, false);
        let b = pool.get("tabs", PageId::from_raw(2), false, false);
        let c = pool.get("detail", PageId::from_raw(1), false, false);

        assert!(!Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn test_remove() {
        let mut pool = pool();
        let owner = PageId::from_raw(11);
        pool.get("a", owner, false, false);
        pool.get("b", owner, false, false);

        assert!(pool.remove("a", owner).is_some());
        assert!(pool.remove("a", owner).is_none());
        assert!(pool.should_register("a", owner));
        assert_eq!(pool.remove_owner(owner), 1);
        assert!(pool.is_empty());
    }
}
