//! Color constants for the step ring watchface.
//!
//! The palette follows the 64-color set of the watch platform, converted
//! to RGB565 by dropping the low bits of each 8-bit channel (`r >> 3`, `g >> 2`, `b >> 3`).
//!
//! ## Rgb565 Color Format
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! - Red: 0-31 (5 bits)
//! - Green: 0-63 (6 bits)
//! - Blue: 0-31 (5 bits)

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black (0, 0, 0). Window background.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31). All label text.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure yellow (31, 63, 0). Goal marker on the progress ring.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

// =============================================================================
// Custom Colors (application-specific)
// =============================================================================

/// Jaeger green (0x00AA55). Ring color when the wearer is on or ahead of pace.
pub const JAEGER_GREEN: Rgb565 = Rgb565::new(0, 42, 10);

/// Picton blue (0x55AAFF). Ring color when the wearer is behind pace.
pub const PICTON_BLUE: Rgb565 = Rgb565::new(10, 42, 31);

/// Dark gray (0x555555). Guide dots under the ring.
pub const DARK_GRAY: Rgb565 = Rgb565::new(10, 21, 10);
