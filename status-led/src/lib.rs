//! Battery and charging status LEDs for keyboards.
//!
//! The crate turns battery level and USB power events into exactly one lit indicator LED:
//!
//! | battery         | USB powered   | on battery    |
//! |-----------------|---------------|---------------|
//! | unknown         | no sensor     | no sensor     |
//! | `< low`         | charging      | low battery   |
//! | `low .. full`   | charging      | off           |
//! | `>= full`       | fully charged | off           |
//!
//! Thresholds, colors and timing are read from the board's `status_led.toml` at build time,
//! see `STATUS_LED_TOML_PATH`.
//!
//! ## Feature flags
#![doc = document_features::document_features!()]
#![cfg_attr(not(test), no_std)]
#![allow(async_fn_in_trait)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod blink;
pub mod config;
pub mod controller;
pub mod driver;
pub mod evaluator;
pub mod event;
pub mod output;
pub mod policy;
pub mod readiness;

pub use config::StatusLedConfig;
pub use controller::{Controller, InitError, PowerStatus, StatusLedController};
pub use driver::{DriverError, GpioLine, IndicatorLine, probe_line};
pub use evaluator::{IndicatorState, Observation, evaluate};
pub use event::{
    BatteryStateChangedEvent, Propagation, StatusEvent, UsbConnState, UsbConnStateChangedEvent, publish_status_event,
    status_event_subscriber,
};
pub use output::{IndicatorOutput, LedColor, LineAssignment, StateColors};
pub use policy::{ConfigError, ThresholdPolicy};

pub(crate) type RawMutex = embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

// Board constants generated by build.rs
include!(concat!(env!("OUT_DIR"), "/constants.rs"));
