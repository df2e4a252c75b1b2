use std::env;
use std::time::Duration;

use log::debug;

use crate::error::ConfigError;
use crate::sorter::Algorithm;

/// Per-step delay at speed 0; the speed setting is subtracted from it.
pub const BASE_DELAY_MS: u64 = 200;
pub const PAUSE_POLL_MS: u64 = 50;
/// Merge's "sorted" sweep runs at a fixed pace, independent of speed.
pub const SWEEP_DELAY_MS: u64 = 30;

pub const CANVAS_WIDTH: usize = 120;
pub const MIN_BAR_WIDTH: usize = 3;
pub const CANVAS_HEIGHT: usize = 20;

pub const DEFAULT_SIZE: usize = 20;
pub const DEFAULT_MAX_VALUE: u32 = 300;
pub const DEFAULT_SPEED: u64 = 100;

const _: () = {
    assert!(MIN_BAR_WIDTH > 0, "MIN_BAR_WIDTH must be positive");
    assert!(CANVAS_WIDTH >= MIN_BAR_WIDTH, "canvas narrower than a single bar");
    assert!(CANVAS_HEIGHT > 0, "CANVAS_HEIGHT must be positive");
    assert!(SWEEP_DELAY_MS <= BASE_DELAY_MS);
};

/// Timing a run applies between steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub step_delay: Duration,
    pub sweep_delay: Duration,
    pub poll_interval: Duration,
}

impl Pacing {
    /// `delay = BASE_DELAY_MS - speed`, clamped at zero.
    pub fn from_speed(speed: u64) -> Pacing {
        Pacing {
            step_delay: Duration::from_millis(BASE_DELAY_MS.saturating_sub(speed)),
            sweep_delay: Duration::from_millis(SWEEP_DELAY_MS),
            poll_interval: Duration::from_millis(PAUSE_POLL_MS),
        }
    }

    /// No artificial delays at all. Pausing still polls, just faster.
    pub fn instant() -> Pacing {
        Pacing {
            step_delay: Duration::ZERO,
            sweep_delay: Duration::ZERO,
            poll_interval: Duration::from_millis(1),
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing::from_speed(DEFAULT_SPEED)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub algorithm: Algorithm,
    pub size: usize,
    pub max_value: u32,
    pub speed: u64,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            algorithm: Algorithm::Bubble,
            size: DEFAULT_SIZE,
            max_value: DEFAULT_MAX_VALUE,
            speed: DEFAULT_SPEED,
            seed: None,
        }
    }
}

impl Config {
    /// Parses `<algorithm> [size] [max_value] [speed]`. Missing trailing
    /// arguments keep their defaults. The seed comes from `SEED` if set.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Config, ConfigError> {
        let mut config = Config::default();
        let mut args = args.into_iter();

        if let Some(arg) = args.next() {
            config.algorithm = arg.parse()?;
        }
        if let Some(arg) = args.next() {
            config.size = parse_number("size", &arg)?;
        }
        if let Some(arg) = args.next() {
            config.max_value = parse_number("max value", &arg)?;
        }
        if let Some(arg) = args.next() {
            config.speed = parse_number("speed", &arg)?;
        }

        config.seed = match env::var("SEED") {
            Ok(value) => Some(parse_number("seed", &value)?),
            Err(_) => None,
        };

        config.validate()?;
        debug!("Config: {:?}", config);
        Ok(config)
    }

    /// A size of zero is allowed and yields an empty run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_value == 0 {
            return Err(ConfigError::ZeroMaxValue);
        }
        Ok(())
    }

    pub fn pacing(&self) -> Pacing {
        Pacing::from_speed(self.speed)
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        name,
        value: value.to_string(),
    })
}
