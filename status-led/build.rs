use std::path::Path;
use std::{env, fs};

use status_led_config::{StatusLedTomlConfig, validate_config};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=STATUS_LED_TOML_PATH");

    // Read status_led.toml if it's present, otherwise every field takes its default
    let user_config = if let Ok(toml_path) = env::var("STATUS_LED_TOML_PATH") {
        println!("cargo:rerun-if-changed={toml_path}");
        StatusLedTomlConfig::from_file(&toml_path)
    } else {
        Ok(StatusLedTomlConfig::default())
    };

    // An invalid board file must never produce a firmware image
    let config = match user_config.and_then(|c| validate_config(&c).map(|_| c)) {
        Ok(c) => c,
        Err(e) => panic!("Invalid status LED configuration: {e}"),
    };

    let constants = get_constants_str(&config);

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let dest_path = Path::new(&out_dir).join("constants.rs");
    fs::write(&dest_path, constants).expect("Failed to write constants.rs file");
}

fn get_constants_str(config: &StatusLedTomlConfig) -> String {
    let states = &config.states;
    let behavior = &config.behavior;
    let event = &config.event;

    let constant_strs = [
        format!("pub(crate) const LOW_THRESHOLD: u8 = {};", config.thresholds.low),
        format!("pub(crate) const FULL_THRESHOLD: u8 = {};", config.thresholds.full),
        format!(
            "pub(crate) const LOW_BATTERY_COLOR: crate::output::LedColor = crate::output::LedColor::{};",
            states.low_battery.variant_name()
        ),
        format!(
            "pub(crate) const CHARGING_COLOR: crate::output::LedColor = crate::output::LedColor::{};",
            states.charging.variant_name()
        ),
        format!(
            "pub(crate) const FULLY_CHARGED_COLOR: crate::output::LedColor = crate::output::LedColor::{};",
            states.fully_charged.variant_name()
        ),
        format!(
            "pub(crate) const NO_SENSOR_COLOR: crate::output::LedColor = crate::output::LedColor::{};",
            states.no_sensor.variant_name()
        ),
        // Zero disables the feature
        format!(
            "pub(crate) const LOW_BATTERY_BLINK_MS: u64 = {};",
            behavior.low_battery_blink_ms.unwrap_or(0)
        ),
        format!(
            "pub(crate) const REFRESH_INTERVAL_SECS: u64 = {};",
            behavior.refresh_interval_secs.unwrap_or(0)
        ),
        format!("pub(crate) const STATUS_EVENT_CHANNEL_SIZE: usize = {};", event.channel_size),
        format!("pub(crate) const STATUS_EVENT_SUB_SIZE: usize = {};", event.subs),
        format!("pub(crate) const STATUS_EVENT_PUB_SIZE: usize = {};", event.pubs),
    ];

    constant_strs.join("\n") + "\n"
}
