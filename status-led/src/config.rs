use embassy_time::Duration;

use crate::output::StateColors;
use crate::policy::{ConfigError, ThresholdPolicy};

/// Thresholds used when the board doesn't set any
pub const DEFAULT_POLICY: ThresholdPolicy = match ThresholdPolicy::validate(20, 95) {
    Ok(p) => p,
    Err(_) => panic!("default thresholds are invalid"),
};

/// Runtime configuration of the status LEDs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusLedConfig {
    pub policy: ThresholdPolicy,
    pub colors: StateColors,
    /// Blink the low battery line with this half period, steady when `None`
    pub low_battery_blink: Option<Duration>,
    /// Re-read battery and USB state at this interval, disabled when `None`
    pub refresh_interval: Option<Duration>,
}

impl StatusLedConfig {
    pub fn new(policy: ThresholdPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    /// Configuration from the board's `status_led.toml`, validated again at startup
    pub fn from_board() -> Result<Self, ConfigError> {
        let policy = ThresholdPolicy::from_board()?;
        Ok(Self {
            policy,
            colors: StateColors::from_board(),
            low_battery_blink: (crate::LOW_BATTERY_BLINK_MS > 0)
                .then(|| Duration::from_millis(crate::LOW_BATTERY_BLINK_MS)),
            refresh_interval: (crate::REFRESH_INTERVAL_SECS > 0)
                .then(|| Duration::from_secs(crate::REFRESH_INTERVAL_SECS)),
        })
    }
}

impl Default for StatusLedConfig {
    fn default() -> Self {
        Self {
            policy: DEFAULT_POLICY,
            colors: StateColors::default(),
            low_battery_blink: None,
            refresh_interval: None,
        }
    }
}
