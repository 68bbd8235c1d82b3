//! Display shape and layout configuration constants.
//!
//! The watch ships in a round and a rectangular variant. Every layout value that
//! differs between them is resolved through [`DisplayShape`], so the face and the
//! ring renderer never branch on screen size directly.

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::primitives::Rectangle;

// =============================================================================
// Display Configuration
// =============================================================================

/// Round display diameter in pixels.
pub const ROUND_SCREEN_SIZE: u32 = 180;

/// Rectangular display width in pixels.
pub const RECT_SCREEN_WIDTH: u32 = 144;

/// Rectangular display height in pixels.
pub const RECT_SCREEN_HEIGHT: u32 = 168;

// =============================================================================
// Ring Configuration
// =============================================================================

/// Inset used to derive the round ring thickness from the layer bounds.
pub const ROUND_RING_INSET: u32 = 12;

/// Ring thickness on rectangular displays.
pub const RECT_RING_THICKNESS: u32 = 8;

/// Gap between the frame edge and the outer edge of the ring.
pub const RING_EDGE_INSET: u32 = 2;

/// Corner radius of the rounded-rectangle ring (outer edge).
pub const RECT_CORNER_RADIUS: u32 = 18;

/// Number of guide dots drawn around the ring path.
pub const GUIDE_DOT_COUNT: u32 = 12;

/// Diameter of each guide dot.
pub const GUIDE_DOT_DIAMETER: u32 = 3;

/// Goal marker length, measured inward from the ring's outer edge.
pub const GOAL_LINE_LENGTH: u32 = 8;

/// Goal marker stroke width.
pub const GOAL_LINE_WIDTH: u32 = 4;

const _: () = assert!(GOAL_LINE_WIDTH < GOAL_LINE_LENGTH);
const _: () = assert!(RECT_RING_THICKNESS < RECT_CORNER_RADIUS);
const _: () = assert!(2 * ROUND_RING_INSET < ROUND_SCREEN_SIZE);

// =============================================================================
// Label Heights
// =============================================================================

/// Height of the time label.
pub const TIME_LABEL_HEIGHT: u32 = 50;

/// Height of the weekday label.
pub const WEEKDAY_LABEL_HEIGHT: u32 = 30;

/// Height of the date and step labels.
pub const SMALL_LABEL_HEIGHT: u32 = 25;

// =============================================================================
// Display Shape
// =============================================================================

/// Physical shape of the watch display.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum DisplayShape {
    /// Round 180x180 display. The ring is a circle.
    #[default]
    Round,
    /// Rectangular 144x168 display. The ring follows a rounded rectangle.
    Rect,
}

impl DisplayShape {
    /// Full screen size for this shape.
    pub const fn screen_size(self) -> Size {
        match self {
            Self::Round => Size::new(ROUND_SCREEN_SIZE, ROUND_SCREEN_SIZE),
            Self::Rect => Size::new(RECT_SCREEN_WIDTH, RECT_SCREEN_HEIGHT),
        }
    }

    /// Full screen bounds for this shape.
    pub const fn screen_bounds(self) -> Rectangle { Rectangle::new(Point::zero(), self.screen_size()) }

    /// Ring stroke thickness for a progress layer with the given bounds.
    ///
    /// On round displays the ring fills the band between the screen edge and the
    /// bounds inset by [`ROUND_RING_INSET`].
    pub const fn ring_thickness(
        self,
        bounds: &Rectangle,
    ) -> u32 {
        match self {
            Self::Rect => RECT_RING_THICKNESS,
            Self::Round => {
                let inset_height = bounds.size.height.saturating_sub(2 * ROUND_RING_INSET);
                ROUND_SCREEN_SIZE.saturating_sub(inset_height) / 2
            }
        }
    }

    /// Vertical positions of the labels for this shape.
    pub const fn label_rows(self) -> LabelRows {
        match self {
            Self::Round => LabelRows {
                weekday_y: 30,
                time_y: 58,
                date_y: 115,
                steps_y: 138,
            },
            Self::Rect => LabelRows {
                weekday_y: 22,
                time_y: 42,
                date_y: 90,
                steps_y: 115,
            },
        }
    }

    /// Parse a shape name (`round` or `rect`), case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("round") {
            Some(Self::Round)
        } else if name.eq_ignore_ascii_case("rect") || name.eq_ignore_ascii_case("rectangular") {
            Some(Self::Rect)
        } else {
            None
        }
    }

    /// Short display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Round => "round",
            Self::Rect => "rect",
        }
    }
}

/// Top edge of each text label, in pixels from the top of the screen.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LabelRows {
    pub weekday_y: i32,
    pub time_y: i32,
    pub date_y: i32,
    pub steps_y: i32,
}

// =============================================================================
// Unit Tests
// =============================================================================
