//! Motion and gesture tokens
//!
//! Timing and threshold constants shared by components and the navigation
//! engine. Pixel values are device-independent.

// =============================================================================
// Duration Tokens
// =============================================================================

/// Animation durations in milliseconds
pub mod duration {
    /// Instant (0ms)
    pub const INSTANT: u32 = 0;
    /// Fast (100ms)
    pub const FAST: u32 = 100;
    /// Normal (150ms)
    pub const NORMAL: u32 = 150;
    /// Moderate (200ms), used for snap-back after a cancelled drag
    pub const MODERATE: u32 = 200;
    /// Slow (300ms), used for page push/pop/jump
    pub const SLOW: u32 = 300;
    /// Extra slow (500ms)
    pub const EXTRA_SLOW: u32 = 500;
}

// =============================================================================
// Easing Tokens
// =============================================================================

/// Easing curves
pub mod easing {
    /// Default easing curve (cubic-bezier)
    pub const DEFAULT: &str = "cubic-bezier(0.17, 0.73, 0.14, 1)";
    /// Linear
    pub const LINEAR: &str = "linear";
    /// Ease out
    pub const EASE_OUT: &str = "cubic-bezier(0, 0, 0.2, 1)";
    /// Ease in out
    pub const EASE_IN_OUT: &str = "cubic-bezier(0.4, 0, 0.2, 1)";
}

// =============================================================================
// Gesture Tokens
// =============================================================================

/// Interactive gesture constants
pub mod gesture {
    /// Predicted horizontal travel past which a drag commits a back navigation
    pub const DISMISS_THRESHOLD: f64 = 150.0;
    /// Fraction of the viewport width the page under the top one is shifted left
    pub const PEEK_FRACTION: f64 = 0.3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_durations_are_ordered() {
        assert!(duration::INSTANT < duration::FAST);
        assert!(duration::FAST < duration::NORMAL);
        assert!(duration::NORMAL < duration::MODERATE);
        assert!(duration::MODERATE < duration::SLOW);
        assert!(duration::SLOW < duration::EXTRA_SLOW);
    }

    #[test]
    fn test_peek_fraction_is_a_fraction() {
        assert!(gesture::PEEK_FRACTION > 0.0 && gesture::PEEK_FRACTION < 1.0);
        assert!(gesture::DISMISS_THRESHOLD > 0.0);
    }
}
