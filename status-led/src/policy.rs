//! Battery percentage thresholds.
//!
//! The thresholds are read from the board configuration and validated once at startup.
//! A [`ThresholdPolicy`] can only be obtained through [`ThresholdPolicy::validate`], so every
//! policy reaching the evaluator satisfies:
//!
//! - `5 <= low <= 40`
//! - `60 <= full <= 100`
//! - `full >= low + 10`

use core::fmt;

// Same limits as `status_led_config::defaults`, which checks the board file at build time
/// Lowest allowed low-battery threshold
pub const LOW_THRESHOLD_MIN: u8 = 5;
/// Highest allowed low-battery threshold
pub const LOW_THRESHOLD_MAX: u8 = 40;
/// Lowest allowed fully-charged threshold
pub const FULL_THRESHOLD_MIN: u8 = 60;
/// Highest allowed fully-charged threshold
pub const FULL_THRESHOLD_MAX: u8 = 100;
/// Minimum distance between the two thresholds
pub const MIN_THRESHOLD_GAP: u8 = 10;

/// Which threshold an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Threshold {
    Low,
    Full,
}

/// Errors of the status LED configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A threshold is outside its allowed range
    OutOfRange { threshold: Threshold, value: u8, min: u8, max: u8 },
    /// `full` is less than 10 points above `low`
    InsufficientGap { low: u8, full: u8 },
    /// Two output lines are assigned to the same color
    DuplicateLine,
    /// No output line is assigned at all
    NoLines,
    /// More lines than the controller can drive
    TooManyLines,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::OutOfRange {
                threshold,
                value,
                min,
                max,
            } => {
                let name = match threshold {
                    Threshold::Low => "low",
                    Threshold::Full => "full",
                };
                write!(f, "{name} threshold {value}% is out of range, expected {min}% to {max}%")
            }
            ConfigError::InsufficientGap { low, full } => write!(
                f,
                "full threshold {full}% must be at least {MIN_THRESHOLD_GAP}% above low threshold {low}%"
            ),
            ConfigError::DuplicateLine => write!(f, "an indicator color is assigned to more than one line"),
            ConfigError::NoLines => write!(f, "no indicator line is assigned"),
            ConfigError::TooManyLines => write!(f, "too many indicator lines"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Validated pair of battery percentage thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThresholdPolicy {
    low: u8,
    full: u8,
}

impl ThresholdPolicy {
    /// Validate the thresholds.
    ///
    /// `low` is range checked first, then the gap, then `full`. A `full` below `low` is
    /// therefore reported as [`ConfigError::InsufficientGap`].
    ///
    /// This is a `const fn`, so a board which hard-codes its thresholds can reject them at
    /// compile time:
    ///
    /// ```rust,ignore
    /// const POLICY: ThresholdPolicy = match ThresholdPolicy::validate(20, 95) {
    ///     Ok(p) => p,
    ///     Err(_) => panic!("invalid thresholds"),
    /// };
    /// ```
    pub const fn validate(low: u8, full: u8) -> Result<Self, ConfigError> {
        if low < LOW_THRESHOLD_MIN || low > LOW_THRESHOLD_MAX {
            return Err(ConfigError::OutOfRange {
                threshold: Threshold::Low,
                value: low,
                min: LOW_THRESHOLD_MIN,
                max: LOW_THRESHOLD_MAX,
            });
        }
        if (full as i16) - (low as i16) < MIN_THRESHOLD_GAP as i16 {
            return Err(ConfigError::InsufficientGap { low, full });
        }
        if full < FULL_THRESHOLD_MIN || full > FULL_THRESHOLD_MAX {
            return Err(ConfigError::OutOfRange {
                threshold: Threshold::Full,
                value: full,
                min: FULL_THRESHOLD_MIN,
                max: FULL_THRESHOLD_MAX,
            });
        }
        Ok(Self { low, full })
    }

    /// Thresholds from the board's `status_led.toml`
    pub const fn from_board() -> Result<Self, ConfigError> {
        Self::validate(crate::LOW_THRESHOLD, crate::FULL_THRESHOLD)
    }

    /// Below this percentage, on battery power, the battery is low
    pub const fn low(&self) -> u8 {
        self.low
    }

    /// At or above this percentage, on external power, the battery is fully charged
    pub const fn full(&self) -> u8 {
        self.full
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_examples() {
        let policy = ThresholdPolicy::validate(20, 95).unwrap();
        assert_eq!(policy.low(), 20);
        assert_eq!(policy.full(), 95);

        assert_eq!(
            ThresholdPolicy::validate(41, 95),
            Err(ConfigError::OutOfRange {
                threshold: Threshold::Low,
                value: 41,
                min: 5,
                max: 40
            })
        );
        assert_eq!(
            ThresholdPolicy::validate(20, 25),
            Err(ConfigError::InsufficientGap { low: 20, full: 25 })
        );
        assert_eq!(
            ThresholdPolicy::validate(40, 55),
            Err(ConfigError::OutOfRange {
                threshold: Threshold::Full,
                value: 55,
                min: 60,
                max: 100
            })
        );
        assert_eq!(
            ThresholdPolicy::validate(20, 101),
            Err(ConfigError::OutOfRange {
                threshold: Threshold::Full,
                value: 101,
                min: 60,
                max: 100
            })
        );
        assert_eq!(
            ThresholdPolicy::validate(30, 10),
            Err(ConfigError::InsufficientGap { low: 30, full: 10 })
        );
        assert!(ThresholdPolicy::validate(5, 60).is_ok());
        assert!(ThresholdPolicy::validate(40, 100).is_ok());
    }

    #[test]
    fn test_validate_all_pairs() {
        for low in 0..=u8::MAX {
            for full in 0..=u8::MAX {
                let low_ok = (5..=40).contains(&low);
                let full_ok = (60..=100).contains(&full);
                let gap_ok = full as i16 - low as i16 >= 10;
                let result = ThresholdPolicy::validate(low, full);
                assert_eq!(result.is_ok(), low_ok && full_ok && gap_ok, "low={} full={}", low, full);
                if let Err(e) = result {
                    match e {
                        ConfigError::OutOfRange {
                            threshold: Threshold::Low,
                            ..
                        } => assert!(!low_ok),
                        ConfigError::InsufficientGap { .. } => assert!(low_ok && !gap_ok),
                        ConfigError::OutOfRange {
                            threshold: Threshold::Full,
                            ..
                        } => assert!(low_ok && gap_ok && !full_ok),
                        _ => panic!("unexpected error {:?}", e),
                    }
                }
            }
        }
    }

    #[test]
    fn test_const_validation() {
        const POLICY: ThresholdPolicy = match ThresholdPolicy::validate(10, 90) {
            Ok(p) => p,
            Err(_) => panic!("invalid thresholds"),
        };
        assert_eq!(POLICY.low(), 10);
        assert_eq!(POLICY.full(), 90);
    }

    #[test]
    fn test_board_thresholds_are_valid() {
        assert!(ThresholdPolicy::from_board().is_ok());
    }

    #[test]
    fn test_error_messages() {
        let e = ThresholdPolicy::validate(41, 95).unwrap_err();
        assert_eq!(e.to_string(), "low threshold 41% is out of range, expected 5% to 40%");
        let e = ThresholdPolicy::validate(40, 60).unwrap_err();
        assert_eq!(
            e.to_string(),
            "full threshold 60% must be at least 10% above low threshold 40%"
        );
    }
}
