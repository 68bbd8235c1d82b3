//! The step ring watch face and its host boundary.
//!
//! The host owns the event loop and calls into the face through [`WatchFace`]:
//! `load` once, then a tick per minute, health events as they arrive and a
//! render whenever [`WatchFace::needs_redraw`] reports pending changes. All
//! per-window state lives in [`FaceLayers`], created on load and dropped on unload.
//!
//! # Layers
//!
//! Drawn back to front: weekday, date, progress ring, steps, time.

use chrono::NaiveDateTime;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Text;
use heapless::String;

use crate::clock::{ClockStyle, TimeUnits, format_date, format_time, format_weekday};
use crate::colors::BLACK;
use crate::config::{DisplayShape, SMALL_LABEL_HEIGHT, TIME_LABEL_HEIGHT, WEEKDAY_LABEL_HEIGHT};
use crate::health::HealthProvider;
use crate::progress::{ProgressFrame, draw_progress};
use crate::ring::RingRenderer;
use crate::styles::{CENTERED_TOP, DAY_STYLE, STEPS_STYLE, TIME_STYLE};
use crate::text::format_steps;

/// Capacity of every text label.
pub const LABEL_TEXT_LEN: usize = 16;

// =============================================================================
// Host Boundary
// =============================================================================

/// Callbacks a host delivers to a watch face, one at a time.
pub trait WatchFace {
    /// Create the face's layers for a window with `bounds`.
    fn load(
        &mut self,
        bounds: Rectangle,
        now: &NaiveDateTime,
    );

    /// Drop all layers.
    fn unload(&mut self);

    /// Once-per-minute tick with the units that changed since the last one.
    fn minute_tick(
        &mut self,
        now: &NaiveDateTime,
        changed: TimeUnits,
    );

    /// The health service signalled new data.
    fn health_event(&mut self);

    /// Whether anything changed since the last render.
    fn needs_redraw(&self) -> bool;

    /// Paint the full face and clear pending changes.
    fn render<D>(
        &mut self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>;
}

// =============================================================================
// Layers
// =============================================================================

/// One line of centered text spanning the window width.
pub struct TextLabel {
    text: String<LABEL_TEXT_LEN>,
    top: i32,
    height: u32,
    style: MonoTextStyle<'static, Rgb565>,
}

impl TextLabel {
    pub const fn new(
        top: i32,
        height: u32,
        style: MonoTextStyle<'static, Rgb565>,
    ) -> Self {
        Self {
            text: String::new(),
            top,
            height,
            style,
        }
    }

    /// Replace the label text, truncating to [`LABEL_TEXT_LEN`].
    pub fn set_text(
        &mut self,
        text: &str,
    ) {
        self.text.clear();
        for c in text.chars() {
            if self.text.push(c).is_err() {
                break;
            }
        }
    }

    #[inline]
    pub fn text(&self) -> &str { &self.text }

    /// Label frame: full width of `bounds`, `height` rows from `top`.
    fn frame(
        &self,
        bounds: &Rectangle,
    ) -> Rectangle {
        Rectangle::new(
            Point::new(bounds.top_left.x, self.top),
            Size::new(bounds.size.width, self.height),
        )
    }

    /// Draw centered in `bounds`, clipped to the label frame.
    fn draw<D>(
        &self,
        display: &mut D,
        bounds: &Rectangle,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.text.is_empty() {
            return;
        }
        let frame = self.frame(bounds);
        Text::with_text_style(&self.text, Point::new(frame.center().x, self.top), self.style, CENTERED_TOP)
            .draw(&mut display.clipped(&frame))
            .ok();
    }
}

/// Everything the face owns while loaded.
pub struct FaceLayers {
    bounds: Rectangle,
    weekday: TextLabel,
    date: TextLabel,
    steps: TextLabel,
    time: TextLabel,
    progress_dirty: bool,
    text_dirty: bool,
}

impl FaceLayers {
    fn new(
        shape: DisplayShape,
        bounds: Rectangle,
    ) -> Self {
        let rows = shape.label_rows();
        let top = bounds.top_left.y;
        Self {
            bounds,
            weekday: TextLabel::new(top + rows.weekday_y, WEEKDAY_LABEL_HEIGHT, DAY_STYLE),
            date: TextLabel::new(top + rows.date_y, SMALL_LABEL_HEIGHT, DAY_STYLE),
            steps: TextLabel::new(top + rows.steps_y, SMALL_LABEL_HEIGHT, STEPS_STYLE),
            time: TextLabel::new(top + rows.time_y, TIME_LABEL_HEIGHT, TIME_STYLE),
            progress_dirty: true,
            text_dirty: true,
        }
    }

    #[inline]
    pub const fn weekday(&self) -> &TextLabel { &self.weekday }

    #[inline]
    pub const fn date(&self) -> &TextLabel { &self.date }

    #[inline]
    pub const fn steps(&self) -> &TextLabel { &self.steps }

    #[inline]
    pub const fn time(&self) -> &TextLabel { &self.time }

    /// Whether the progress ring must be repainted.
    #[inline]
    pub const fn progress_dirty(&self) -> bool { self.progress_dirty }
}

// =============================================================================
// Step Ring Face
// =============================================================================

/// Watch face showing time, weekday, date and a step progress ring.
pub struct StepRingFace<H: HealthProvider> {
    renderer: RingRenderer,
    clock_style: ClockStyle,
    health: H,
    layers: Option<FaceLayers>,
    last_frame: Option<ProgressFrame>,
}

impl<H: HealthProvider> StepRingFace<H> {
    pub const fn new(
        shape: DisplayShape,
        clock_style: ClockStyle,
        health: H,
    ) -> Self {
        Self {
            renderer: RingRenderer::new(shape),
            clock_style,
            health,
            layers: None,
            last_frame: None,
        }
    }

    #[inline]
    pub const fn shape(&self) -> DisplayShape { self.renderer.shape() }

    #[inline]
    pub const fn health(&self) -> &H { &self.health }

    /// Mutable access for the host to feed the provider.
    #[inline]
    pub fn health_mut(&mut self) -> &mut H { &mut self.health }

    /// Layers while loaded.
    #[inline]
    pub const fn layers(&self) -> Option<&FaceLayers> { self.layers.as_ref() }

    /// Progress values drawn by the most recent render.
    #[inline]
    pub const fn last_frame(&self) -> Option<ProgressFrame> { self.last_frame }

    fn update_time(
        layers: &mut FaceLayers,
        style: ClockStyle,
        now: &NaiveDateTime,
    ) {
        layers.time.set_text(&format_time(now, style));
        layers.text_dirty = true;
    }

    fn update_day(
        layers: &mut FaceLayers,
        now: &NaiveDateTime,
    ) {
        let date = now.date();
        layers.weekday.set_text(&format_weekday(&date));
        layers.date.set_text(&format_date(&date));
        layers.text_dirty = true;
    }

    fn update_steps(
        layers: &mut FaceLayers,
        steps: u32,
    ) {
        layers.steps.set_text(&format_steps(steps));
        layers.text_dirty = true;
        layers.progress_dirty = true;
    }
}

impl<H: HealthProvider> WatchFace for StepRingFace<H> {
    fn load(
        &mut self,
        bounds: Rectangle,
        now: &NaiveDateTime,
    ) {
        let mut layers = FaceLayers::new(self.shape(), bounds);
        Self::update_time(&mut layers, self.clock_style, now);
        Self::update_day(&mut layers, now);
        // Pending data is shown on load, so the flag is consumed here
        self.health.take_update();
        Self::update_steps(&mut layers, self.health.current_steps());
        self.layers = Some(layers);

        log::info!(
            "Step ring face loaded: {} display, {}x{}",
            self.shape().name(),
            bounds.size.width,
            bounds.size.height
        );
    }

    fn unload(&mut self) {
        if self.layers.take().is_some() {
            self.last_frame = None;
            log::info!("Step ring face unloaded");
        }
    }

    fn minute_tick(
        &mut self,
        now: &NaiveDateTime,
        changed: TimeUnits,
    ) {
        let Some(layers) = self.layers.as_mut() else {
            return;
        };

        Self::update_time(layers, self.clock_style, now);

        if self.health.take_update() {
            let steps = self.health.current_steps();
            log::debug!("Health update: {steps} steps");
            Self::update_steps(layers, steps);
        }

        if changed.contains(TimeUnits::DAY) {
            log::debug!("Day changed to {}", now.date());
            Self::update_day(layers, now);
        }
    }

    fn health_event(&mut self) {
        let Some(layers) = self.layers.as_mut() else {
            return;
        };
        if self.health.take_update() {
            let steps = self.health.current_steps();
            log::debug!("Health update: {steps} steps");
            Self::update_steps(layers, steps);
        }
    }

    fn needs_redraw(&self) -> bool {
        self.layers
            .as_ref()
            .is_some_and(|layers| layers.text_dirty || layers.progress_dirty)
    }

    fn render<D>(
        &mut self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(layers) = self.layers.as_mut() else {
            return;
        };

        let bounds = layers.bounds;
        display.clear(BLACK).ok();

        layers.weekday.draw(display, &bounds);
        layers.date.draw(display, &bounds);
        let sample = self.health.sample();
        self.last_frame = Some(draw_progress(display, &self.renderer, &bounds, &sample));
        layers.steps.draw(display, &bounds);
        layers.time.draw(display, &bounds);

        layers.text_dirty = false;
        layers.progress_dirty = false;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
