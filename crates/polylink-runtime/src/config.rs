#![forbid(unsafe_code)]

//! Playback configuration.
//!
//! # Environment Variables
//!
//! | Variable | Field | Format |
//! |----------|-------|--------|
//! | `POLYLINK_STEP_DELAY_MS` | [`PlaybackConfig::step_delay`] | non-negative integer milliseconds |
//! | `POLYLINK_SPEED` | [`PlaybackConfig::initial_speed`] | positive finite number |
//!
//! Values that fail to parse are ignored (the default is kept) and a
//! warning is logged.

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::speed::SpeedFactor;

/// Base delay between steps during continuous play, before speed scaling.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(1200);

const ENV_STEP_DELAY_MS: &str = "POLYLINK_STEP_DELAY_MS";
const ENV_SPEED: &str = "POLYLINK_SPEED";

/// Configuration for a [`PlaybackController`](crate::PlaybackController).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackConfig {
    /// Pause between consecutive steps at speed 1.0.
    pub step_delay: Duration,
    /// Speed factor in effect until changed.
    pub initial_speed: SpeedFactor,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            step_delay: DEFAULT_STEP_DELAY,
            initial_speed: SpeedFactor::DEFAULT,
        }
    }
}

impl PlaybackConfig {
    /// No pacing delay: steps run back to back, gated only by the renderer.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            step_delay: Duration::ZERO,
            ..Default::default()
        }
    }

    /// Defaults overridden by `POLYLINK_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_STEP_DELAY_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.step_delay = Duration::from_millis(ms),
                Err(_) => warn!(var = ENV_STEP_DELAY_MS, value = %raw, "ignoring invalid step delay"),
            }
        }

        if let Some(raw) = lookup(ENV_SPEED) {
            match raw.trim().parse::<f64>().ok().and_then(SpeedFactor::new) {
                Some(speed) => config.initial_speed = speed,
                None => warn!(var = ENV_SPEED, value = %raw, "ignoring invalid speed factor"),
            }
        }

        config
    }

    /// Set the base step delay.
    #[must_use]
    pub fn with_step_delay(mut self, step_delay: Duration) -> Self {
        self.step_delay = step_delay;
        self
    }

    /// Set the initial speed. Invalid factors leave the config unchanged.
    #[must_use]
    pub fn with_speed(mut self, factor: f64) -> Self {
        if let Some(speed) = SpeedFactor::new(factor) {
            self.initial_speed = speed;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = PlaybackConfig::default();
        assert_eq!(config.step_delay, Duration::from_millis(1200));
        assert_eq!(config.initial_speed, SpeedFactor::DEFAULT);
        assert_eq!(PlaybackConfig::instant().step_delay, Duration::ZERO);
    }

    #[test]
    fn env_overrides() {
        let config = PlaybackConfig::from_lookup(lookup(&[
            ("POLYLINK_STEP_DELAY_MS", "250"),
            ("POLYLINK_SPEED", " 3 "),
        ]));
        assert_eq!(config.step_delay, Duration::from_millis(250));
        assert_eq!(config.initial_speed.get(), 3.0);
    }

    #[test]
    fn invalid_env_values_keep_defaults() {
        let config = PlaybackConfig::from_lookup(lookup(&[
            ("POLYLINK_STEP_DELAY_MS", "soon"),
            ("POLYLINK_SPEED", "-2"),
        ]));
        assert_eq!(config, PlaybackConfig::default());
    }

    #[test]
    fn builders() {
        let config = PlaybackConfig::default()
            .with_step_delay(Duration::from_millis(10))
            .with_speed(0.0)
            .with_speed(4.0);
        assert_eq!(config.step_delay, Duration::from_millis(10));
        assert_eq!(config.initial_speed.get(), 4.0);
    }
}
