//! Pace thresholds and the ring color scheme.
//!
//! The ring color is a pure function of the current step sample: the wearer is
//! "on track" once today's count reaches the average count for this time of day.
//! There is no hysteresis and no memory of earlier frames.

use embedded_graphics::pixelcolor::Rgb565;

use crate::colors::{JAEGER_GREEN, PICTON_BLUE, YELLOW};
use crate::health::StepSample;

/// Ring color while on or ahead of pace.
pub const ON_TRACK_COLOR: Rgb565 = JAEGER_GREEN;

/// Ring color while behind pace.
pub const BEHIND_COLOR: Rgb565 = PICTON_BLUE;

/// Goal marker color, independent of pace.
pub const GOAL_COLOR: Rgb565 = YELLOW;

/// Whether the wearer has reached the time-of-day baseline.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PaceStatus {
    /// `current_steps >= current_average`.
    OnTrack,
    /// `current_steps < current_average`.
    Behind,
}

impl PaceStatus {
    /// Classify a sample against its time-of-day average.
    #[inline]
    pub const fn of(sample: &StepSample) -> Self {
        if sample.current_steps >= sample.current_average {
            Self::OnTrack
        } else {
            Self::Behind
        }
    }

    /// Ring color for this status.
    #[inline]
    pub const fn ring_color(self) -> Rgb565 {
        match self {
            Self::OnTrack => ON_TRACK_COLOR,
            Self::Behind => BEHIND_COLOR,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
