//! Core of the step ring watch face.
//!
//! This crate contains everything that does not depend on a host platform:
//!
//! - [`colors`]: RGB565 color constants
//! - [`config`]: Display shapes and layout constants
//! - [`health`]: Step samples, the health provider trait and a rolling history
//! - [`pace`]: On-track/behind classification and ring colors
//! - [`ring`]: Progress ring, goal marker and guide dot rendering
//! - [`progress`]: The per-frame progress layer draw
//! - [`clock`]: Time, weekday and date text and tick change masks
//! - [`text`]: Number formatting into fixed-capacity strings
//! - [`styles`]: Pre-computed text styles
//! - [`face`]: The watch face and its host callbacks
//!
//! # no_std Compatibility
//!
//! Outside of tests this crate is `no_std` and allocation-free. Trigonometry goes
//! through `micromath` and all text lives in `heapless` strings.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod clock;
pub mod colors;
pub mod config;
pub mod face;
pub mod health;
pub mod pace;
pub mod progress;
pub mod ring;
pub mod styles;
pub mod text;

#[cfg(test)]
mod test_display;

// Re-export commonly used items
pub use clock::{ClockStyle, TimeUnits};
pub use config::DisplayShape;
pub use face::{StepRingFace, WatchFace};
pub use health::{HealthProvider, StepHistory, StepSample};
