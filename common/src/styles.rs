//! Pre-computed text styles.
//!
//! All label styles are `const` so nothing is rebuilt per frame.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::{FONT_9X15, FONT_10X20};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::text::{Alignment, Baseline, TextStyle, TextStyleBuilder};
use profont::PROFONT_24_POINT;

use crate::colors::WHITE;

/// Horizontally centered, positioned by the top edge of the glyphs.
pub const CENTERED_TOP: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Top)
    .build();

/// Large white time text (`ProFont` 24pt).
pub const TIME_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_24_POINT, WHITE);

/// Medium white text for weekday and date (10x20 pixels).
pub const DAY_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_10X20, WHITE);

/// Small white text for the step count (9x15 pixels).
pub const STEPS_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_9X15, WHITE);
