//! Shared building blocks for DefinedElements components
//!
//! This crate holds the pieces every component reaches for regardless of
//! what it draws:
//!
//! - [`tokens`] - Motion and gesture tokens (durations, easing, thresholds)
//! - [`status`] - Status-driven configuration (`default`, `loading`, `active`,
//!   `done`, `error`, `disabled`)
//!
//! # Example
//!
//! ```rust
//! use elements::{ElementStatus, StatusConfiguration};
//!
//! let opacity = StatusConfiguration::new(1.0_f32).with(ElementStatus::Disabled, 0.7);
//!
//! assert_eq!(*opacity.resolve(ElementStatus::Default), 1.0);
//! assert_eq!(*opacity.resolve(ElementStatus::Disabled), 0.7);
//! assert_eq!(*opacity.resolve(ElementStatus::Loading), 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod status;
pub mod tokens;

pub use status::{ElementStatus, StatusConfiguration};
pub use tokens::{duration, easing, gesture};
