//! Progress ring rendering.
//!
//! Maps a value and a reference maximum onto a sweep around the edge of a frame:
//!
//! - Round displays sweep a circle, starting at 12 o'clock and running clockwise.
//! - Rectangular displays sweep the perimeter of a rounded rectangle, starting at
//!   top-center and running clockwise. The fraction is a fraction of path length.
//!
//! The renderer holds no state between calls. Out-of-range input is clamped and a
//! zero maximum draws nothing, so none of these functions can fail.

use core::f32::consts::PI;

use embedded_graphics::geometry::Angle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Arc, Circle, Line, PrimitiveStyle, Rectangle};

use crate::colors::DARK_GRAY;
use crate::config::{
    DisplayShape,
    GUIDE_DOT_COUNT,
    GUIDE_DOT_DIAMETER,
    RECT_CORNER_RADIUS,
    RING_EDGE_INSET,
};

/// Sweep start, 12 o'clock. Screen angles grow clockwise from 3 o'clock.
const START_DEGREES: f32 = -90.0;

/// Fraction of the full sweep covered by `value` out of `max`.
///
/// Always in `[0, 1]`. A zero maximum gives 0.
#[inline]
pub fn sweep_fraction(
    value: u32,
    max: u32,
) -> f32 {
    if max == 0 {
        return 0.0;
    }
    value.min(max) as f32 / max as f32
}

#[inline]
fn round_i32(v: f32) -> i32 { if v >= 0.0 { (v + 0.5) as i32 } else { (v - 0.5) as i32 } }

#[inline]
fn sin_cos_degrees(degrees: f32) -> (f32, f32) {
    let radians = micromath::F32(degrees * PI / 180.0);
    (radians.sin().0, radians.cos().0)
}

// =============================================================================
// Ring Path
// =============================================================================

/// A point on the ring path with its outward unit normal.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PathPoint {
    pub x: f32,
    pub y: f32,
    pub normal_x: f32,
    pub normal_y: f32,
}

impl PathPoint {
    /// Nearest pixel.
    #[inline]
    pub fn position(&self) -> Point { Point::new(round_i32(self.x), round_i32(self.y)) }

    /// Nearest pixel after moving `distance` along the outward normal.
    #[inline]
    pub fn offset(
        &self,
        distance: f32,
    ) -> Point {
        Point::new(
            round_i32(self.x + self.normal_x * distance),
            round_i32(self.y + self.normal_y * distance),
        )
    }
}

#[derive(Clone, Copy, Debug)]
enum Segment {
    /// Straight edge between two points.
    Straight {
        from: (f32, f32),
        to: (f32, f32),
        normal: (f32, f32),
    },
    /// Quarter circle of the path's corner radius, clockwise from `start_degrees`.
    Corner { center: (f32, f32), start_degrees: f32 },
}

#[derive(Clone, Copy, Debug)]
enum PathKind {
    Circle {
        center: (f32, f32),
        radius: f32,
    },
    RoundedRect {
        segments: [Segment; 9],
        corner_radius: f32,
        length: f32,
    },
}

/// Centerline of a ring stroke of a given thickness inside a frame.
#[derive(Clone, Copy, Debug)]
pub struct RingPath {
    kind: PathKind,
}

impl RingPath {
    /// Path for a stroke of `thickness` whose outer edge sits [`RING_EDGE_INSET`]
    /// inside `frame`.
    ///
    /// Returns `None` when the frame is too small to hold the stroke.
    pub fn new(
        shape: DisplayShape,
        frame: &Rectangle,
        thickness: u32,
    ) -> Option<Self> {
        let inset = RING_EDGE_INSET as f32 + thickness as f32 / 2.0;
        let left = frame.top_left.x as f32 + inset;
        let top = frame.top_left.y as f32 + inset;
        let right = (frame.top_left.x + frame.size.width as i32 - 1) as f32 - inset;
        let bottom = (frame.top_left.y + frame.size.height as i32 - 1) as f32 - inset;
        if right - left < 1.0 || bottom - top < 1.0 {
            return None;
        }

        let center = ((left + right) / 2.0, (top + bottom) / 2.0);
        let half_min = (right - left).min(bottom - top) / 2.0;

        let kind = match shape {
            // Circle primitives center on a pixel, so the path does too
            DisplayShape::Round => PathKind::Circle {
                center: (round_i32(center.0) as f32, round_i32(center.1) as f32),
                radius: half_min,
            },
            DisplayShape::Rect => {
                let c = (RECT_CORNER_RADIUS as f32 - thickness as f32 / 2.0).max(1.0).min(half_min);
                let segments = [
                    Segment::Straight {
                        from: (center.0, top),
                        to: (right - c, top),
                        normal: (0.0, -1.0),
                    },
                    Segment::Corner {
                        center: (right - c, top + c),
                        start_degrees: -90.0,
                    },
                    Segment::Straight {
                        from: (right, top + c),
                        to: (right, bottom - c),
                        normal: (1.0, 0.0),
                    },
                    Segment::Corner {
                        center: (right - c, bottom - c),
                        start_degrees: 0.0,
                    },
                    Segment::Straight {
                        from: (right - c, bottom),
                        to: (left + c, bottom),
                        normal: (0.0, 1.0),
                    },
                    Segment::Corner {
                        center: (left + c, bottom - c),
                        start_degrees: 90.0,
                    },
                    Segment::Straight {
                        from: (left, bottom - c),
                        to: (left, top + c),
                        normal: (-1.0, 0.0),
                    },
                    Segment::Corner {
                        center: (left + c, top + c),
                        start_degrees: 180.0,
                    },
                    Segment::Straight {
                        from: (left + c, top),
                        to: (center.0, top),
                        normal: (0.0, -1.0),
                    },
                ];
                let length = segments.iter().map(|s| s.length(c)).sum();
                PathKind::RoundedRect {
                    segments,
                    corner_radius: c,
                    length,
                }
            }
        };

        Some(Self { kind })
    }

    /// Point at `fraction` of the way around the path (clamped to `[0, 1]`).
    pub fn point_at(
        &self,
        fraction: f32,
    ) -> PathPoint {
        let fraction = fraction.clamp(0.0, 1.0);
        match self.kind {
            PathKind::Circle { center, radius } => {
                let (sin, cos) = sin_cos_degrees(START_DEGREES + 360.0 * fraction);
                PathPoint {
                    x: center.0 + radius * cos,
                    y: center.1 + radius * sin,
                    normal_x: cos,
                    normal_y: sin,
                }
            }
            PathKind::RoundedRect {
                segments,
                corner_radius,
                length,
            } => {
                let mut remaining = fraction * length;
                for segment in &segments {
                    let segment_length = segment.length(corner_radius);
                    if remaining <= segment_length {
                        return segment.point_at(remaining, corner_radius);
                    }
                    remaining -= segment_length;
                }
                let last = &segments[segments.len() - 1];
                last.point_at(last.length(corner_radius), corner_radius)
            }
        }
    }

    /// Stroke the first `fraction` of the path.
    pub fn draw_sweep<D>(
        &self,
        display: &mut D,
        fraction: f32,
        style: PrimitiveStyle<Rgb565>,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        if fraction <= 0.0 {
            return;
        }
        let fraction = fraction.min(1.0);

        match self.kind {
            PathKind::Circle { center, radius } => {
                let center = Point::new(round_i32(center.0), round_i32(center.1));
                // Odd diameters keep the primitive's center on `center`
                let diameter = round_i32(2.0 * radius).max(1) as u32 | 1;
                if fraction >= 1.0 {
                    Circle::with_center(center, diameter)
                        .into_styled(style)
                        .draw(display)
                        .ok();
                } else {
                    Arc::with_center(
                        center,
                        diameter,
                        Angle::from_degrees(START_DEGREES),
                        Angle::from_degrees(360.0 * fraction),
                    )
                    .into_styled(style)
                    .draw(display)
                    .ok();
                }
            }
            PathKind::RoundedRect {
                segments,
                corner_radius,
                length,
            } => {
                let mut remaining = fraction * length;
                for segment in &segments {
                    if remaining <= 0.0 {
                        break;
                    }
                    let segment_length = segment.length(corner_radius);
                    segment.draw_partial(display, remaining.min(segment_length), corner_radius, style);
                    remaining -= segment_length;
                }
            }
        }
    }
}

impl Segment {
    fn length(
        &self,
        corner_radius: f32,
    ) -> f32 {
        match *self {
            Self::Straight { from, to, .. } => (to.0 - from.0).abs() + (to.1 - from.1).abs(),
            Self::Corner { .. } => PI * corner_radius / 2.0,
        }
    }

    fn point_at(
        &self,
        distance: f32,
        corner_radius: f32,
    ) -> PathPoint {
        let length = self.length(corner_radius);
        let t = if length > 0.0 { (distance / length).clamp(0.0, 1.0) } else { 0.0 };
        match *self {
            Self::Straight { from, to, normal } => PathPoint {
                x: from.0 + (to.0 - from.0) * t,
                y: from.1 + (to.1 - from.1) * t,
                normal_x: normal.0,
                normal_y: normal.1,
            },
            Self::Corner { center, start_degrees } => {
                let (sin, cos) = sin_cos_degrees(start_degrees + 90.0 * t);
                PathPoint {
                    x: center.0 + corner_radius * cos,
                    y: center.1 + corner_radius * sin,
                    normal_x: cos,
                    normal_y: sin,
                }
            }
        }
    }

    fn draw_partial<D>(
        &self,
        display: &mut D,
        distance: f32,
        corner_radius: f32,
        style: PrimitiveStyle<Rgb565>,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let length = self.length(corner_radius);
        if length < 0.5 {
            return;
        }
        match *self {
            Self::Straight { .. } => {
                let start = self.point_at(0.0, corner_radius).position();
                let end = self.point_at(distance, corner_radius).position();
                if start == end {
                    return;
                }
                Line::new(start, end).into_styled(style).draw(display).ok();
            }
            Self::Corner { center, start_degrees } => {
                let center = Point::new(round_i32(center.0), round_i32(center.1));
                let diameter = round_i32(2.0 * corner_radius).max(1) as u32 | 1;
                Arc::with_center(
                    center,
                    diameter,
                    Angle::from_degrees(start_degrees),
                    Angle::from_degrees(90.0 * distance / length),
                )
                .into_styled(style)
                .draw(display)
                .ok();
            }
        }
    }
}

// =============================================================================
// Ring Renderer
// =============================================================================

/// Draws the progress ring, goal marker and guide dots for one display shape.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RingRenderer {
    shape: DisplayShape,
}

impl RingRenderer {
    pub const fn new(shape: DisplayShape) -> Self { Self { shape } }

    #[inline]
    pub const fn shape(&self) -> DisplayShape { self.shape }

    /// Draw [`GUIDE_DOT_COUNT`] evenly spaced dots along the outer edge of `frame`.
    pub fn draw_outer_dots<D>(
        &self,
        display: &mut D,
        frame: &Rectangle,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(path) = RingPath::new(self.shape, frame, GUIDE_DOT_DIAMETER) else {
            return;
        };
        let style = PrimitiveStyle::with_fill(DARK_GRAY);
        for i in 0..GUIDE_DOT_COUNT {
            let point = path.point_at(i as f32 / GUIDE_DOT_COUNT as f32);
            Circle::with_center(point.position(), GUIDE_DOT_DIAMETER)
                .into_styled(style)
                .draw(display)
                .ok();
        }
    }

    /// Stroke the ring for `current_value` out of `max_value`.
    ///
    /// Nothing is drawn for a zero fraction or a zero maximum. Values above the
    /// maximum draw a closed ring.
    pub fn fill_outer_ring<D>(
        &self,
        display: &mut D,
        current_value: u32,
        thickness: u32,
        frame: &Rectangle,
        color: Rgb565,
        max_value: u32,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let fraction = sweep_fraction(current_value, max_value);
        if fraction <= 0.0 || thickness == 0 {
            return;
        }
        if let Some(path) = RingPath::new(self.shape, frame, thickness) {
            path.draw_sweep(display, fraction, PrimitiveStyle::with_stroke(color, thickness));
        }
    }

    /// Draw a tick at `goal_value` out of `max_value`, running `length` pixels
    /// inward from the ring's outer edge.
    ///
    /// Nothing is drawn for a zero maximum. Goals above the maximum sit at the
    /// end of the sweep.
    #[allow(clippy::too_many_arguments)]
    pub fn fill_goal_line<D>(
        &self,
        display: &mut D,
        goal_value: u32,
        length: u32,
        width: u32,
        frame: &Rectangle,
        color: Rgb565,
        max_value: u32,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        if max_value == 0 || length == 0 || width == 0 {
            return;
        }
        let Some(path) = RingPath::new(self.shape, frame, length) else {
            return;
        };
        let point = path.point_at(sweep_fraction(goal_value, max_value));
        let half = length as f32 / 2.0;
        Line::new(point.offset(half), point.offset(-half))
            .into_styled(PrimitiveStyle::with_stroke(color, width))
            .draw(display)
            .ok();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
