//! Simulator options read from environment variables.

use std::env::VarError;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use stepring_common::{ClockStyle, DisplayShape};

pub const SHAPE_VAR: &str = "STEPRING_SHAPE";
pub const CLOCK_24H_VAR: &str = "STEPRING_24H";
pub const MINUTES_VAR: &str = "STEPRING_MINUTES";
pub const SNAPSHOT_EVERY_VAR: &str = "STEPRING_SNAPSHOT_EVERY";
pub const OUT_DIR_VAR: &str = "STEPRING_OUT";

/// Runtime options for one simulator run.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SimConfig {
    pub shape: DisplayShape,
    pub clock_style: ClockStyle,
    /// Simulated minutes to run headless.
    pub minutes: u32,
    /// Write a snapshot every this many simulated minutes.
    pub snapshot_every: u32,
    pub out_dir: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            shape: DisplayShape::Round,
            clock_style: ClockStyle::TwentyFourHour,
            minutes: 24 * 60,
            snapshot_every: 60,
            out_dir: PathBuf::from("snapshots"),
        }
    }
}

impl SimConfig {
    /// Read options from the process environment.
    pub fn from_env() -> Result<Self> { Self::from_lookup(|name| std::env::var(name)) }

    /// Read options through `lookup`, falling back to defaults for unset variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let defaults = Self::default();

        let shape = match optional(&lookup, SHAPE_VAR)? {
            Some(raw) => DisplayShape::from_name(raw.trim()).ok_or_else(|| anyhow!("{SHAPE_VAR} must be round or rect"))?,
            None => defaults.shape,
        };

        let is_24h = match optional(&lookup, CLOCK_24H_VAR)?.as_deref() {
            Some("1") => true,
            Some("0") => false,
            Some(_) => return Err(anyhow!("{CLOCK_24H_VAR} must be 0 or 1")),
            None => defaults.clock_style == ClockStyle::TwentyFourHour,
        };

        let minutes = parse_u32(&lookup, MINUTES_VAR, defaults.minutes)?;
        let snapshot_every = parse_u32(&lookup, SNAPSHOT_EVERY_VAR, defaults.snapshot_every)?;
        if snapshot_every == 0 {
            return Err(anyhow!("{SNAPSHOT_EVERY_VAR} must be at least 1"));
        }

        let out_dir = optional(&lookup, OUT_DIR_VAR)?.map_or(defaults.out_dir, PathBuf::from);

        Ok(Self {
            shape,
            clock_style: ClockStyle::from_24h(is_24h),
            minutes,
            snapshot_every,
            out_dir,
        })
    }
}

fn optional<F>(
    lookup: &F,
    name: &str,
) -> Result<Option<String>>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match lookup(name) {
        Ok(raw) => Ok(Some(raw)),
        Err(VarError::NotPresent) => Ok(None),
        Err(err) => Err(anyhow!("{name} invalid: {err}")),
    }
}

fn parse_u32<F>(
    lookup: &F,
    name: &str,
    default: u32,
) -> Result<u32>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match optional(lookup, name)? {
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .with_context(|| format!("{name} must be an unsigned integer")),
        None => Ok(default),
    }
}

// =============================================================================
// Tests
// =============================================================================
