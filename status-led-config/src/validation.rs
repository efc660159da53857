//! Validation of `status_led.toml`
//!
//! The threshold rules match the ones the firmware enforces again at startup, so a board
//! file that passes here never fails `ThresholdPolicy::validate`.

use crate::defaults;
use crate::error::{ConfigError, ConfigResult};
use crate::{BehaviorConfig, EventChannelConfig, StatusLedTomlConfig, ThresholdsConfig};

/// Validates the entire status LED configuration
pub fn validate_config(config: &StatusLedTomlConfig) -> ConfigResult<()> {
    validate_thresholds(&config.thresholds)?;
    validate_behavior(&config.behavior)?;
    validate_event_channel(&config.event)?;
    Ok(())
}

/// Validates the [thresholds] section
fn validate_thresholds(thresholds: &ThresholdsConfig) -> ConfigResult<()> {
    if !(defaults::LOW_THRESHOLD_MIN..=defaults::LOW_THRESHOLD_MAX).contains(&thresholds.low) {
        return Err(ConfigError::InvalidValue {
            field: "thresholds.low".to_string(),
            value: thresholds.low.to_string(),
            expected: format!(
                "{}% to {}%",
                defaults::LOW_THRESHOLD_MIN,
                defaults::LOW_THRESHOLD_MAX
            ),
        });
    }

    if thresholds.full < thresholds.low + defaults::MIN_THRESHOLD_GAP {
        return Err(ConfigError::Validation {
            field: "thresholds".to_string(),
            message: format!(
                "full ({}%) must be at least {}% above low ({}%)",
                thresholds.full,
                defaults::MIN_THRESHOLD_GAP,
                thresholds.low
            ),
        });
    }

    if !(defaults::FULL_THRESHOLD_MIN..=defaults::FULL_THRESHOLD_MAX).contains(&thresholds.full) {
        return Err(ConfigError::InvalidValue {
            field: "thresholds.full".to_string(),
            value: thresholds.full.to_string(),
            expected: format!(
                "{}% to {}%",
                defaults::FULL_THRESHOLD_MIN,
                defaults::FULL_THRESHOLD_MAX
            ),
        });
    }

    Ok(())
}

/// Validates the [behavior] section
fn validate_behavior(behavior: &BehaviorConfig) -> ConfigResult<()> {
    if let Some(blink) = behavior.low_battery_blink_ms {
        if !(defaults::BLINK_MS_MIN..=defaults::BLINK_MS_MAX).contains(&blink) {
            return Err(ConfigError::InvalidValue {
                field: "behavior.low_battery_blink_ms".to_string(),
                value: blink.to_string(),
                expected: format!("{} to {}", defaults::BLINK_MS_MIN, defaults::BLINK_MS_MAX),
            });
        }
    }

    if behavior.refresh_interval_secs == Some(0) {
        return Err(ConfigError::InvalidValue {
            field: "behavior.refresh_interval_secs".to_string(),
            value: "0".to_string(),
            expected: "at least 1, or remove the field to disable refreshing".to_string(),
        });
    }

    Ok(())
}

/// Validates the [event] section
fn validate_event_channel(event: &EventChannelConfig) -> ConfigResult<()> {
    for (field, value) in [
        ("event.channel_size", event.channel_size),
        ("event.subs", event.subs),
        ("event.pubs", event.pubs),
    ] {
        if value == 0 {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                value: value.to_string(),
                expected: "a positive number".to_string(),
            });
        }
    }
    Ok(())
}
