//! Mapping from battery and USB power state to the indicator state.

use crate::policy::ThresholdPolicy;

/// Battery percentage reported when no battery sensor is present
pub const NO_SENSOR: i8 = -1;
/// Highest valid battery percentage
pub const MAX_PERCENTAGE: i8 = 100;

/// Latest known battery percentage and USB power state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Observation {
    /// Battery level in `[-1, 100]`, `-1` means the sensor is absent or not read yet
    pub battery_percentage: i8,
    pub usb_powered: bool,
}

impl Observation {
    /// Nothing has been reported yet
    pub const UNKNOWN: Self = Self {
        battery_percentage: NO_SENSOR,
        usb_powered: false,
    };

    /// Create an observation, clamping the percentage into `[-1, 100]`
    pub fn new(battery_percentage: i16, usb_powered: bool) -> Self {
        Self {
            battery_percentage: clamp_percentage(battery_percentage),
            usb_powered,
        }
    }
}

impl Default for Observation {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

/// Clamp a reported battery percentage into `[-1, 100]`
pub fn clamp_percentage(value: i16) -> i8 {
    value.clamp(NO_SENSOR as i16, MAX_PERCENTAGE as i16) as i8
}

/// The single visual output selected for an observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndicatorState {
    /// On battery power and the battery is fine, nothing is lit
    Off,
    /// On battery power and below the low threshold
    LowBattery,
    /// On USB power and below the full threshold
    Charging,
    /// On USB power and at or above the full threshold
    FullyCharged,
    /// The battery level is unknown
    NoSensor,
}

/// Select the indicator state for `obs`.
///
/// | battery_percentage | usb_powered | state          |
/// |--------------------|-------------|----------------|
/// | `-1`               | any         | `NoSensor`     |
/// | `< low`            | `false`     | `LowBattery`   |
/// | `>= low`           | `false`     | `Off`          |
/// | `< full`           | `true`      | `Charging`     |
/// | `>= full`          | `true`      | `FullyCharged` |
///
/// Percentages outside `[-1, 100]` are clamped first.
pub fn evaluate(policy: &ThresholdPolicy, obs: Observation) -> IndicatorState {
    let level = clamp_percentage(obs.battery_percentage as i16);
    if level == NO_SENSOR {
        return IndicatorState::NoSensor;
    }

    // `level` is in [0, 100] from here
    let level = level as u8;
    match obs.usb_powered {
        false if level < policy.low() => IndicatorState::LowBattery,
        false => IndicatorState::Off,
        true if level < policy.full() => IndicatorState::Charging,
        true => IndicatorState::FullyCharged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> ThresholdPolicy {
        ThresholdPolicy::validate(20, 95).unwrap()
    }

    fn eval(level: i8, usb_powered: bool) -> IndicatorState {
        evaluate(
            &policy(),
            Observation {
                battery_percentage: level,
                usb_powered,
            },
        )
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(eval(20, false), IndicatorState::Off);
        assert_eq!(eval(19, false), IndicatorState::LowBattery);
        assert_eq!(eval(94, true), IndicatorState::Charging);
        assert_eq!(eval(95, true), IndicatorState::FullyCharged);
        assert_eq!(eval(-1, true), IndicatorState::NoSensor);
        assert_eq!(eval(-1, false), IndicatorState::NoSensor);
        assert_eq!(eval(0, false), IndicatorState::LowBattery);
        assert_eq!(eval(0, true), IndicatorState::Charging);
        assert_eq!(eval(100, false), IndicatorState::Off);
        assert_eq!(eval(100, true), IndicatorState::FullyCharged);
    }

    #[test]
    fn test_totality() {
        let policy = policy();
        for level in -1..=100 {
            for usb_powered in [false, true] {
                let state = evaluate(
                    &policy,
                    Observation {
                        battery_percentage: level,
                        usb_powered,
                    },
                );
                let expected = if level == -1 {
                    IndicatorState::NoSensor
                } else if !usb_powered {
                    if level < 20 { IndicatorState::LowBattery } else { IndicatorState::Off }
                } else if level < 95 {
                    IndicatorState::Charging
                } else {
                    IndicatorState::FullyCharged
                };
                assert_eq!(state, expected, "level={} usb={}", level, usb_powered);
            }
        }
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        // Values a misbehaving fuel gauge could report
        assert_eq!(eval(i8::MAX, true), IndicatorState::FullyCharged);
        assert_eq!(eval(101, false), IndicatorState::Off);
        assert_eq!(eval(-2, false), IndicatorState::NoSensor);
        assert_eq!(eval(i8::MIN, true), IndicatorState::NoSensor);

        assert_eq!(Observation::new(250, true).battery_percentage, 100);
        assert_eq!(Observation::new(-40, true).battery_percentage, -1);
        assert_eq!(Observation::new(55, false).battery_percentage, 55);
    }

    #[test]
    fn test_unknown_observation() {
        assert_eq!(Observation::default(), Observation::UNKNOWN);
        assert_eq!(evaluate(&policy(), Observation::UNKNOWN), IndicatorState::NoSensor);
    }
}
