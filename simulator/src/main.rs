//! Step ring watch face simulator for desktop.
//!
//! Hosts the face the way the watch platform would: load, a tick per minute,
//! health updates and a render whenever the face asks for one. Runs headless by
//! default and writes PNG snapshots; build with `--features window` for a live
//! SDL window.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

mod config;
mod health;
mod timing;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Timelike;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics_simulator::{OutputSettings, OutputSettingsBuilder, SimulatorDisplay};
use stepring_common::{HealthProvider, StepRingFace, WatchFace};

use crate::config::SimConfig;
use crate::health::SimulatedHealth;
use crate::timing::SimClock;

type Face = StepRingFace<SimulatedHealth>;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SimConfig::from_env().context("reading simulator configuration")?;
    log::info!(
        "Step ring simulator: {} display, {:?}",
        config.shape.name(),
        config.clock_style
    );

    let mut clock = SimClock::starting_at(chrono::Local::now().naive_local());
    let mut face = StepRingFace::new(config.shape, config.clock_style, SimulatedHealth::seeded(&clock.now()));
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(config.shape.screen_size());

    face.load(config.shape.screen_bounds(), &clock.now());
    let result = run(&mut face, &mut display, &mut clock, &config);
    face.unload();
    result
}

#[cfg(not(feature = "window"))]
fn run(
    face: &mut Face,
    display: &mut SimulatorDisplay<Rgb565>,
    clock: &mut SimClock,
    config: &SimConfig,
) -> Result<()> {
    run_headless(face, display, clock, config)?;
    Ok(())
}

#[cfg(feature = "window")]
fn run(
    face: &mut Face,
    display: &mut SimulatorDisplay<Rgb565>,
    clock: &mut SimClock,
    _config: &SimConfig,
) -> Result<()> {
    run_window(face, display, clock);
    Ok(())
}

fn output_settings() -> OutputSettings { OutputSettingsBuilder::new().scale(2).build() }

/// One simulated minute: health first, then the face's tick.
fn advance_minute(
    face: &mut Face,
    clock: &mut SimClock,
) {
    let changed = clock.advance();
    let now = clock.now();
    face.health_mut().advance(&now, changed);
    face.minute_tick(&now, changed);
}

#[cfg_attr(feature = "window", allow(dead_code))]
fn snapshot_path(
    config: &SimConfig,
    index: u32,
    clock: &SimClock,
) -> PathBuf {
    let now = clock.now();
    config.out_dir.join(format!(
        "{}-{index:04}-{:02}{:02}.png",
        config.shape.name(),
        now.hour(),
        now.minute()
    ))
}

#[cfg_attr(feature = "window", allow(dead_code))]
fn save_snapshot(
    display: &SimulatorDisplay<Rgb565>,
    path: &Path,
) -> Result<()> {
    display
        .to_rgb_output_image(&output_settings())
        .save_png(path)
        .with_context(|| format!("writing snapshot {}", path.display()))
}

/// Run `config.minutes` simulated minutes and write a PNG every `config.snapshot_every`.
#[cfg_attr(feature = "window", allow(dead_code))]
fn run_headless(
    face: &mut Face,
    display: &mut SimulatorDisplay<Rgb565>,
    clock: &mut SimClock,
    config: &SimConfig,
) -> Result<u32> {
    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("creating output directory {}", config.out_dir.display()))?;

    face.render(display);
    let mut written = 0;
    save_snapshot(display, &snapshot_path(config, written, clock))?;
    written += 1;

    for minute in 1..=config.minutes {
        advance_minute(face, clock);
        if face.needs_redraw() {
            face.render(display);
        }
        if minute % config.snapshot_every == 0 {
            save_snapshot(display, &snapshot_path(config, written, clock))?;
            written += 1;
        }
    }

    log::info!(
        "Wrote {written} snapshots to {}, final count {} steps",
        config.out_dir.display(),
        face.health().current_steps()
    );
    Ok(written)
}

#[cfg(feature = "window")]
fn run_window(
    face: &mut Face,
    display: &mut SimulatorDisplay<Rgb565>,
    clock: &mut SimClock,
) {
    use std::thread;
    use std::time::Instant;

    use embedded_graphics_simulator::{SimulatorEvent, Window};

    use crate::timing::{FRAME_TIME, MINUTES_PER_FRAME};

    let mut window = Window::new("Step Ring", &output_settings());
    face.render(display);
    window.update(display);

    loop {
        let frame_start = Instant::now();

        if window.events().any(|ev| matches!(ev, SimulatorEvent::Quit)) {
            return;
        }

        for _ in 0..MINUTES_PER_FRAME {
            advance_minute(face, clock);
        }
        if face.needs_redraw() {
            face.render(display);
        }
        window.update(display);

        if let Some(rest) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use stepring_common::{ClockStyle, DisplayShape};

    fn face_at(
        shape: DisplayShape,
        h: u32,
        mi: u32,
    ) -> (Face, SimClock) {
        let start = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap();
        let clock = SimClock::starting_at(start);
        let mut face = StepRingFace::new(shape, ClockStyle::TwentyFourHour, SimulatedHealth::seeded(&start));
        face.load(shape.screen_bounds(), &start);
        (face, clock)
    }

    #[test]
    fn test_advance_minute_updates_time_and_steps() {
        let (mut face, mut clock) = face_at(DisplayShape::Round, 8, 10);
        let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(DisplayShape::Round.screen_size());
        face.render(&mut display);
        let before = face.health().current_steps();

        advance_minute(&mut face, &mut clock);
        let layers = face.layers().unwrap();
        assert_eq!(layers.time().text(), "08:11");
        assert!(face.health().current_steps() > before);
        assert!(layers.progress_dirty());
    }

    #[test]
    fn test_advance_minute_over_midnight() {
        let (mut face, mut clock) = face_at(DisplayShape::Rect, 23, 59);
        advance_minute(&mut face, &mut clock);
        let layers = face.layers().unwrap();
        assert_eq!(layers.weekday().text(), "Tuesday");
        assert_eq!(layers.date().text(), "2026-10-20");
        assert_eq!(layers.steps().text(), "0");
    }

    #[test]
    fn test_headless_run_writes_snapshots() {
        let out_dir = std::env::temp_dir().join(format!("stepring-sim-test-{}", std::process::id()));
        let config = SimConfig {
            shape: DisplayShape::Round,
            minutes: 30,
            snapshot_every: 10,
            out_dir: out_dir.clone(),
            ..SimConfig::default()
        };
        let (mut face, mut clock) = face_at(config.shape, 12, 0);
        let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(config.shape.screen_size());

        let written = run_headless(&mut face, &mut display, &mut clock, &config).unwrap();
        assert_eq!(written, 4);
        let files = fs::read_dir(&out_dir).unwrap().count();
        assert_eq!(files, 4);
        assert!(out_dir.join("round-0000-1200.png").exists());
        assert!(out_dir.join("round-0003-1230.png").exists());

        fs::remove_dir_all(&out_dir).ok();
    }
}
