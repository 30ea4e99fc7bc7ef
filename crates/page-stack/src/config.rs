//! Stack timing and gesture configuration

use elements::tokens::{duration, easing, gesture};
use serde::{Deserialize, Serialize};

/// Per-stack motion and gesture settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    /// Duration of push/pop/jump transitions in milliseconds
    pub transition_duration_ms: u32,
    /// Duration of the snap-back after a cancelled drag in milliseconds
    pub snap_back_duration_ms: u32,
    /// Fraction of the width the page under the top one rests to the left
    pub peek_fraction: f64,
    /// Predicted drag distance that commits a back navigation
    pub dismiss_threshold: f64,
    /// Easing curve for transitions
    pub easing: String,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            transition_duration_ms: duration::SLOW,
            snap_back_duration_ms: duration::MODERATE,
            peek_fraction: gesture::PEEK_FRACTION,
            dismiss_threshold: gesture::DISMISS_THRESHOLD,
            easing: easing::DEFAULT.to_string(),
        }
    }
}

impl StackConfig {
    /// Set the transition duration in milliseconds
    pub fn transition_duration_ms(mut self, ms: u32) -> Self {
        self.transition_duration_ms = ms;
        self
    }

    /// Set the snap-back duration in milliseconds
    pub fn snap_back_duration_ms(mut self, ms: u32) -> Self {
        self.snap_back_duration_ms = ms;
        self
    }

    /// Set the peek fraction (clamped to `0.0..=1.0`)
    pub fn peek_fraction(mut self, fraction: f64) -> Self {
        self.peek_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    /// Set the dismiss threshold
    pub fn dismiss_threshold(mut self, threshold: f64) -> Self {
        self.dismiss_threshold = threshold;
        self
    }

    /// Set the easing curve
    pub fn easing(mut self, easing: impl Into<String>) -> Self {
        self.easing = easing.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_tokens() {
        let config = StackConfig::default();
        assert_eq!(config.transition_duration_ms, 300);
        assert_eq!(config.dismiss_threshold, 150.0);
        assert_eq!(config.easing, easing::DEFAULT);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: StackConfig = serde_json::from_str(r#"{"peek_fraction":0.5}"#).unwrap();
        assert_eq!(config.peek_fraction, 0.5);
        assert_eq!(config.snap_back_duration_ms, duration::MODERATE);
    }

    #[test]
    fn test_builder_clamps_peek() {
        let config = StackConfig::default().peek_fraction(3.0).transition_duration_ms(0);
        assert_eq!(config.peek_fraction, 1.0);
        assert_eq!(config.transition_duration_ms, 0);
    }
}
