//! Default values and limits for `status_led.toml`

/// Battery percentage below which the board reports low battery when running on battery
pub const LOW_THRESHOLD: u8 = 20;
/// Battery percentage at or above which the board reports fully charged when on USB power
pub const FULL_THRESHOLD: u8 = 95;

// Threshold limits, must match `status_led::policy`. `ThresholdPolicy::validate` checks the
// board constants again at startup.
pub const LOW_THRESHOLD_MIN: u8 = 5;
pub const LOW_THRESHOLD_MAX: u8 = 40;
pub const FULL_THRESHOLD_MIN: u8 = 60;
pub const FULL_THRESHOLD_MAX: u8 = 100;
/// Minimum distance between the two thresholds
pub const MIN_THRESHOLD_GAP: u8 = 10;

/// Blink period limits in milliseconds
pub const BLINK_MS_MIN: u64 = 50;
pub const BLINK_MS_MAX: u64 = 10_000;

/// Status event channel defaults
pub const EVENT_CHANNEL_SIZE: usize = 4;
pub const EVENT_SUBS: usize = 2;
pub const EVENT_PUBS: usize = 2;
