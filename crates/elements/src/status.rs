//! Status-driven configuration
//!
//! Components expose a single status value and look up their styling through a
//! [`StatusConfiguration`] instead of branching on loading/disabled flags in
//! every draw path.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Interaction status of an element
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ElementStatus {
    /// Idle, nothing in flight
    #[default]
    Default,
    /// Work in progress
    Loading,
    /// Selected / pressed
    Active,
    /// Work finished successfully
    Done,
    /// Work failed
    Error,
    /// Not interactive
    Disabled,
}

impl ElementStatus {
    /// Get all statuses in order
    pub fn all() -> [ElementStatus; 6] {
        [
            ElementStatus::Default,
            ElementStatus::Loading,
            ElementStatus::Active,
            ElementStatus::Done,
            ElementStatus::Error,
            ElementStatus::Disabled,
        ]
    }

    /// Whether the element accepts user interaction in this status
    pub fn is_interactive(&self) -> bool {
        !matches!(self, ElementStatus::Loading | ElementStatus::Disabled)
    }
}

/// A value that varies with [`ElementStatus`]
///
/// Holds a default plus optional per-status overrides. Lookups for a status
/// without an override fall back to the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusConfiguration<T> {
    default: T,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    overrides: BTreeMap<ElementStatus, T>,
}

impl<T: Default> Default for StatusConfiguration<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> StatusConfiguration<T> {
    /// Create a configuration with only a default value
    pub fn new(default: T) -> Self {
        Self {
            default,
            overrides: BTreeMap::new(),
        }
    }

    /// Add an override for a status
    pub fn with(mut self, status: ElementStatus, value: T) -> Self {
        self.set(status, value);
        self
    }

    /// Set the value for a status (setting `Default` replaces the fallback)
    pub fn set(&mut self, status: ElementStatus, value: T) {
        match status {
            ElementStatus::Default => self.default = value,
            other => {
                self.overrides.insert(other, value);
            }
        }
    }

    /// Remove an override, returning it if present
    pub fn clear(&mut self, status: ElementStatus) -> Option<T> {
        self.overrides.remove(&status)
    }

    /// Resolve the value for a status
    pub fn resolve(&self, status: ElementStatus) -> &T {
        self.overrides.get(&status).unwrap_or(&self.default)
    }

    /// Check whether a status has its own value
    pub fn has_override(&self, status: ElementStatus) -> bool {
        self.overrides.contains_key(&status)
    }

    /// Transform every value, keeping the override layout
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> StatusConfiguration<U> {
        StatusConfiguration {
            default: f(self.default),
            overrides: self
                .overrides
                .into_iter()
                .map(|(status, value)| (status, f(value)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_falls_back_to_default() {
        let config = StatusConfiguration::new("idle").with(ElementStatus::Loading, "spinner");

        assert_eq!(*config.resolve(ElementStatus::Loading), "spinner");
        for status in ElementStatus::all() {
            if status != ElementStatus::Loading {
                assert_eq!(*config.resolve(status), "idle");
            }
        }
    }

    #[test]
    fn test_set_default_replaces_fallback() {
        let mut config = StatusConfiguration::new(1u8).with(ElementStatus::Error, 9);
        config.set(ElementStatus::Default, 2);

        assert_eq!(*config.resolve(ElementStatus::Done), 2);
        assert_eq!(*config.resolve(ElementStatus::Error), 9);
        assert!(!config.has_override(ElementStatus::Default));
    }

    #[test]
    fn test_clear_override() {
        let mut config = StatusConfiguration::new(0).with(ElementStatus::Active, 5);
        assert_eq!(config.clear(ElementStatus::Active), Some(5));
        assert_eq!(config.clear(ElementStatus::Active), None);
        assert_eq!(*config.resolve(ElementStatus::Active), 0);
    }

    #[test]
    fn test_map_keeps_overrides() {
        let config = StatusConfiguration::new(1.0_f32)
            .with(ElementStatus::Disabled, 0.5)
            .map(|opacity| (opacity * 100.0) as u32);

        assert_eq!(*config.resolve(ElementStatus::Default), 100);
        assert_eq!(*config.resolve(ElementStatus::Disabled), 50);
    }

    #[test]
    fn test_interactive_statuses() {
        assert!(ElementStatus::Default.is_interactive());
        assert!(ElementStatus::Error.is_interactive());
        assert!(!ElementStatus::Loading.is_interactive());
        assert!(!ElementStatus::Disabled.is_interactive());
    }

    #[test]
    fn test_serialization() {
        let config = StatusConfiguration::new(String::from("gray"))
            .with(ElementStatus::Error, String::from("red"));
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"error\":\"red\""));

        let parsed: StatusConfiguration<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);

        let bare: StatusConfiguration<String> =
            serde_json::from_str(r#"{"default":"blue"}"#).unwrap();
        assert_eq!(bare.resolve(ElementStatus::Done), "blue");
    }
}
