//! Viewport geometry reported by the renderer

use serde::{Deserialize, Serialize};

/// Safe area insets in device-independent pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeInsets {
    /// Top inset
    pub top: f64,
    /// Leading inset
    pub leading: f64,
    /// Bottom inset
    pub bottom: f64,
    /// Trailing inset
    pub trailing: f64,
}

/// Last known size of a stack's drawing area
///
/// Written by the rendering layer on every layout pass, read by navigation
/// for gesture math.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
    /// Safe area insets
    pub safe_area: EdgeInsets,
}

impl Viewport {
    /// Create a viewport without insets
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            safe_area: EdgeInsets::default(),
        }
    }

    /// Set safe area insets
    pub fn with_safe_area(mut self, safe_area: EdgeInsets) -> Self {
        self.safe_area = safe_area;
        self
    }

    /// Width minus horizontal insets
    pub fn usable_width(&self) -> f64 {
        (self.width - self.safe_area.leading - self.safe_area.trailing).max(0.0)
    }
}
