//! Board configuration for the status LED engine.
//!
//! The board describes its indicator behavior in a `status_led.toml` file:
//!
//! ```toml
//! [thresholds]
//! low = 20
//! full = 95
//!
//! [states]
//! low_battery = "blue"
//! charging = "red"
//! fully_charged = "green"
//! no_sensor = "green"
//!
//! [behavior]
//! low_battery_blink_ms = 500
//! refresh_interval_secs = 30
//! ```
//!
//! Every section is optional. The firmware crate parses this file in its build script,
//! so an invalid board file fails the build instead of reaching the field.

use std::fs;
use std::path::Path;

use serde_derive::Deserialize;
use serde_inline_default::serde_inline_default;

pub mod defaults;
pub mod error;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use validation::validate_config;

/// Content of `status_led.toml`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusLedTomlConfig {
    #[serde(default)]
    pub thresholds: ThresholdsConfig,
    #[serde(default)]
    pub states: StateColorsConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
    #[serde(default)]
    pub event: EventChannelConfig,
}

impl StatusLedTomlConfig {
    /// Parse config from a TOML string, `path` is only used in error messages
    pub fn from_toml_str(content: &str, path: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::TomlParse {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Read and parse the config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }
}

/// `[thresholds]` section, in battery percent
#[serde_inline_default]
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdsConfig {
    #[serde_inline_default(defaults::LOW_THRESHOLD)]
    pub low: u8,
    #[serde_inline_default(defaults::FULL_THRESHOLD)]
    pub full: u8,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            low: defaults::LOW_THRESHOLD,
            full: defaults::FULL_THRESHOLD,
        }
    }
}

/// LED colors available on the supported shields
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedColorName {
    Red,
    Green,
    Blue,
    Yellow,
}

impl LedColorName {
    /// Name of the matching `LedColor` variant in the firmware crate
    pub fn variant_name(&self) -> &'static str {
        match self {
            LedColorName::Red => "Red",
            LedColorName::Green => "Green",
            LedColorName::Blue => "Blue",
            LedColorName::Yellow => "Yellow",
        }
    }
}

/// `[states]` section: which LED represents each indicator state
#[serde_inline_default]
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateColorsConfig {
    #[serde_inline_default(LedColorName::Blue)]
    pub low_battery: LedColorName,
    #[serde_inline_default(LedColorName::Red)]
    pub charging: LedColorName,
    #[serde_inline_default(LedColorName::Green)]
    pub fully_charged: LedColorName,
    #[serde_inline_default(LedColorName::Green)]
    pub no_sensor: LedColorName,
}

impl Default for StateColorsConfig {
    fn default() -> Self {
        Self {
            low_battery: LedColorName::Blue,
            charging: LedColorName::Red,
            fully_charged: LedColorName::Green,
            no_sensor: LedColorName::Green,
        }
    }
}

/// `[behavior]` section
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BehaviorConfig {
    /// Blink the low battery LED with this half period, steady when unset
    #[serde(default)]
    pub low_battery_blink_ms: Option<u64>,
    /// Re-read battery and USB state periodically, disabled when unset
    #[serde(default)]
    pub refresh_interval_secs: Option<u64>,
}

/// `[event]` section: sizes of the status event channel
#[serde_inline_default]
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventChannelConfig {
    #[serde_inline_default(defaults::EVENT_CHANNEL_SIZE)]
    pub channel_size: usize,
    #[serde_inline_default(defaults::EVENT_SUBS)]
    pub subs: usize,
    #[serde_inline_default(defaults::EVENT_PUBS)]
    pub pubs: usize,
}

impl Default for EventChannelConfig {
    fn default() -> Self {
        Self {
            channel_size: defaults::EVENT_CHANNEL_SIZE,
            subs: defaults::EVENT_SUBS,
            pubs: defaults::EVENT_PUBS,
        }
    }
}
