//! Navigation configuration

use crate::error::{NavigationError, Result};
use page_stack::StackConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for a [`NavigationContext`](crate::NavigationContext)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Name of the application-wide root stack
    pub root_stack_name: String,
    /// Whether the root stack drives the status bar
    pub root_uses_status_bar: bool,
    /// Buffered navigation events per subscriber
    pub event_capacity: usize,
    /// Settings applied to every stack manager
    pub stack: StackConfig,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            root_stack_name: "root".to_string(),
            root_uses_status_bar: true,
            event_capacity: 64,
            stack: StackConfig::default(),
        }
    }
}

impl NavigationConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check values that would make the context unusable
    pub fn validate(&self) -> Result<()> {
        if self.root_stack_name.is_empty() {
            return Err(NavigationError::Config(
                "root_stack_name must not be empty".to_string(),
            ));
        }
        if self.event_capacity == 0 {
            return Err(NavigationError::Config(
                "event_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the root stack name
    pub fn root_stack_name(mut self, name: impl Into<String>) -> Self {
        self.root_stack_name = name.into();
        self
    }

    /// Enable or disable status bar handling on the root stack
    pub fn root_uses_status_bar(mut self, enabled: bool) -> Self {
        self.root_uses_status_bar = enabled;
        self
    }

    /// Set the per-stack settings
    pub fn stack(mut self, stack: StackConfig) -> Self {
        self.stack = stack;
        self
    }
}
