//! Transition descriptors
//!
//! Stack mutations do not animate anything themselves. They return a
//! [`Transition`] describing what changed; the renderer drives the animation.

use serde::{Deserialize, Serialize};

/// What kind of change a transition animates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    /// A page slid in on top
    Push,
    /// The top page slid out
    Pop,
    /// The whole stack was replaced by a new root
    Jump,
    /// An uncommitted drag returned to rest
    SnapBack,
}

/// Animation request for one stack change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Kind of change
    pub kind: TransitionKind,
    /// Duration in milliseconds
    pub duration_ms: u32,
    /// Easing curve
    pub easing: String,
    /// Entry indices whose offset or presence changed
    pub affected: Vec<usize>,
}

impl Transition {
    /// Create a transition
    pub fn new(
        kind: TransitionKind,
        duration_ms: u32,
        easing: impl Into<String>,
        affected: Vec<usize>,
    ) -> Self {
        Self {
            kind,
            duration_ms,
            easing: easing.into(),
            affected,
        }
    }
}
