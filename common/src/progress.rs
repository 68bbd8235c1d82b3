//! Per-frame progress layer drawing.
//!
//! Turns one [`StepSample`] into the values the ring renderer needs and paints
//! the guide dots, the progress ring and the goal marker, in that order.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::config::{GOAL_LINE_LENGTH, GOAL_LINE_WIDTH};
use crate::health::StepSample;
use crate::pace::{GOAL_COLOR, PaceStatus};
use crate::ring::{RingRenderer, sweep_fraction};

/// Everything decided for one progress frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ProgressFrame {
    /// Steps taken today (ring numerator).
    pub current_steps: u32,
    /// Ring denominator: the day average, raised to `current_steps` if exceeded.
    pub display_max: u32,
    /// Goal marker position (time-of-day average).
    pub goal_steps: u32,
    /// Pace classification driving the ring color.
    pub pace: PaceStatus,
}

impl ProgressFrame {
    /// Derive the frame values from a sample.
    pub fn from_sample(sample: &StepSample) -> Self {
        // The provider may lag behind a record day; the count is the better maximum then
        let display_max = if sample.current_steps > sample.day_average {
            log::debug!(
                "Steps {} exceed day average {}, raising ring maximum",
                sample.current_steps,
                sample.day_average
            );
            sample.current_steps
        } else {
            sample.day_average
        };

        Self {
            current_steps: sample.current_steps,
            display_max,
            goal_steps: sample.current_average,
            pace: PaceStatus::of(sample),
        }
    }

    /// Fraction of the ring to fill.
    #[inline]
    pub fn ring_fraction(&self) -> f32 { sweep_fraction(self.current_steps, self.display_max) }

    /// Fraction at which the goal marker sits.
    #[inline]
    pub fn goal_fraction(&self) -> f32 { sweep_fraction(self.goal_steps, self.display_max) }

    /// Ring color for this frame.
    #[inline]
    pub const fn ring_color(&self) -> Rgb565 { self.pace.ring_color() }
}

/// Draw the progress layer for `sample` inside `bounds`.
///
/// Returns the frame values that were drawn.
pub fn draw_progress<D>(
    display: &mut D,
    renderer: &RingRenderer,
    bounds: &Rectangle,
    sample: &StepSample,
) -> ProgressFrame
where
    D: DrawTarget<Color = Rgb565>,
{
    let frame = ProgressFrame::from_sample(sample);
    let thickness = renderer.shape().ring_thickness(bounds);

    renderer.draw_outer_dots(display, bounds);
    renderer.fill_outer_ring(
        display,
        frame.current_steps,
        thickness,
        bounds,
        frame.ring_color(),
        frame.display_max,
    );
    renderer.fill_goal_line(
        display,
        frame.goal_steps,
        GOAL_LINE_LENGTH,
        GOAL_LINE_WIDTH,
        bounds,
        GOAL_COLOR,
        frame.display_max,
    );

    frame
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::DARK_GRAY;
    use crate::config::DisplayShape;
    use crate::pace::{BEHIND_COLOR, ON_TRACK_COLOR};
    use crate::ring::RingPath;
    use crate::test_display::FrameRecorder;

    fn sample(
        current_steps: u32,
        day_average: u32,
        current_average: u32,
    ) -> StepSample {
        StepSample {
            current_steps,
            day_average,
            current_average,
        }
    }

    #[test]
    fn test_behind_pace_scenario() {
        let frame = ProgressFrame::from_sample(&sample(4000, 10_000, 5000));
        assert_eq!(frame.display_max, 10_000);
        assert!((frame.ring_fraction() - 0.4).abs() < 1e-6);
        assert!((frame.goal_fraction() - 0.5).abs() < 1e-6);
        assert_eq!(frame.pace, PaceStatus::Behind);
        assert_eq!(frame.ring_color(), BEHIND_COLOR);
    }

    #[test]
    fn test_record_day_raises_maximum() {
        let frame = ProgressFrame::from_sample(&sample(12_000, 10_000, 5000));
        assert_eq!(frame.display_max, 12_000);
        assert_eq!(frame.ring_fraction(), 1.0);
        assert!((frame.goal_fraction() - 5000.0 / 12_000.0).abs() < 1e-4);
        assert_eq!(frame.ring_color(), ON_TRACK_COLOR);
    }

    #[test]
    fn test_all_zero_scenario() {
        let frame = ProgressFrame::from_sample(&sample(0, 0, 0));
        assert_eq!(frame.display_max, 0);
        assert_eq!(frame.ring_fraction(), 0.0);
        assert_eq!(frame.goal_fraction(), 0.0);
    }

    #[test]
    fn test_maximum_never_below_steps() {
        for (steps, average) in [(0, 0), (1, 0), (500, 499), (500, 501), (u32::MAX, 3)] {
            let frame = ProgressFrame::from_sample(&sample(steps, average, 0));
            assert!(frame.display_max >= frame.current_steps);
            assert_eq!(frame.display_max, steps.max(average));
        }
    }

    #[test]
    fn test_draw_progress_uses_pace_color() {
        let shape = DisplayShape::Round;
        let bounds = shape.screen_bounds();
        let renderer = RingRenderer::new(shape);

        let mut behind = FrameRecorder::new(shape.screen_size());
        draw_progress(&mut behind, &renderer, &bounds, &sample(4000, 10_000, 5000));
        assert!(behind.count(BEHIND_COLOR) > 0);
        assert_eq!(behind.count(ON_TRACK_COLOR), 0);
        assert!(behind.count(GOAL_COLOR) > 0);

        let mut ahead = FrameRecorder::new(shape.screen_size());
        draw_progress(&mut ahead, &renderer, &bounds, &sample(12_000, 10_000, 5000));
        assert!(ahead.count(ON_TRACK_COLOR) > 0);
        assert_eq!(ahead.count(BEHIND_COLOR), 0);
    }

    #[test]
    fn test_draw_progress_goal_marker_position() {
        let shape = DisplayShape::Round;
        let bounds = shape.screen_bounds();
        let mut display = FrameRecorder::new(shape.screen_size());
        draw_progress(&mut display, &RingRenderer::new(shape), &bounds, &sample(4000, 10_000, 5000));

        let goal = RingPath::new(shape, &bounds, GOAL_LINE_LENGTH)
            .unwrap()
            .point_at(0.5)
            .position();
        assert_eq!(display.pixel(goal), Some(GOAL_COLOR));
    }

    #[test]
    fn test_draw_progress_zero_sample_only_dots() {
        let shape = DisplayShape::Rect;
        let mut display = FrameRecorder::new(shape.screen_size());
        let frame = draw_progress(
            &mut display,
            &RingRenderer::new(shape),
            &shape.screen_bounds(),
            &StepSample::default(),
        );
        assert_eq!(frame.ring_fraction(), 0.0);
        assert!(display.count(DARK_GRAY) > 0);
        assert_eq!(display.count(ON_TRACK_COLOR), 0);
        assert_eq!(display.count(GOAL_COLOR), 0);
    }
}
