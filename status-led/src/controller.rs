//! Status LED controller
//!
//! [`StatusLedController`] is the event dispatcher of the indicator. It keeps the latest
//! [`Observation`], and on every battery or USB event it re-evaluates the indicator state and
//! pushes it through the [`ReadinessGate`] to the [`IndicatorOutput`].
//!
//! # Usage
//!
//! ```rust,ignore
//! let lines = LineAssignment::new()
//!     .with_line(LedColor::Red, GpioLine::new(red_pin, false))?
//!     .with_line(LedColor::Green, GpioLine::new(green_pin, false))?
//!     .with_line(LedColor::Blue, GpioLine::new(blue_pin, false))?;
//! let mut controller = StatusLedController::new(StatusLedConfig::from_board()?, lines)?;
//!
//! // Subscribe before init, so that no event published after the snapshot is lost
//! let mut sub = status_event_subscriber()?;
//! controller.init(&power_status)?;
//! controller.run(&mut sub, &power_status).await;
//! ```

use core::future::pending;

use embassy_futures::select::{Either, select};
use embassy_time::{Duration, Instant, Timer};

use crate::blink::BlinkScheduler;
use crate::config::StatusLedConfig;
use crate::driver::{DriverError, IndicatorLine};
use crate::evaluator::{IndicatorState, Observation, clamp_percentage, evaluate};
use crate::event::{
    BatteryStateChangedEvent, EventSubscriber, Propagation, StatusEvent, UsbConnStateChangedEvent,
};
use crate::output::{IndicatorOutput, LedColor, LineAssignment, MAX_LINES};
use crate::policy::{ConfigError, ThresholdPolicy};
use crate::readiness::{Applied, ReadinessGate};

/// Source of the current battery and USB state, read at startup and on periodic refresh
pub trait PowerStatus {
    /// Battery level in percent, `-1` when there's no battery sensor
    fn battery_percentage(&self) -> i16;

    /// Whether the board is powered over USB
    fn usb_powered(&self) -> bool;
}

/// This trait provides the interface for event handling controllers.
pub trait Controller {
    /// Type of the received events.
    type Event;

    /// Process the received event.
    ///
    /// Event processing never fails, errors are logged and kept by the controller.
    fn process_event(&mut self, event: Self::Event) -> Propagation;
}

/// Error returned by [`StatusLedController::init`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError {
    Config(ConfigError),
    Driver(DriverError),
}

impl core::fmt::Display for InitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InitError::Config(e) => write!(f, "invalid status LED configuration: {e}"),
            InitError::Driver(e) => write!(f, "status LED initialization failed: {e}"),
        }
    }
}

impl core::error::Error for InitError {}

impl From<ConfigError> for InitError {
    fn from(e: ConfigError) -> Self {
        InitError::Config(e)
    }
}

impl From<DriverError> for InitError {
    fn from(e: DriverError) -> Self {
        InitError::Driver(e)
    }
}

pub struct StatusLedController<L: IndicatorLine> {
    policy: ThresholdPolicy,
    output: IndicatorOutput<L>,
    gate: ReadinessGate,
    observation: Observation,
    /// Last state shown on the lines
    current: Option<IndicatorState>,
    blink: BlinkScheduler,
    low_battery_blink: Option<Duration>,
    refresh_interval: Option<Duration>,
    last_error: Option<DriverError>,
}

impl<L: IndicatorLine> StatusLedController<L> {
    pub fn new(config: StatusLedConfig, lines: LineAssignment<L>) -> Result<Self, ConfigError> {
        Ok(Self {
            policy: config.policy,
            output: IndicatorOutput::new(lines, config.colors)?,
            gate: ReadinessGate::new(),
            observation: Observation::UNKNOWN,
            current: None,
            blink: BlinkScheduler::new(),
            low_battery_blink: config.low_battery_blink,
            refresh_interval: config.refresh_interval,
            last_error: None,
        })
    }

    /// Configure the lines, open the readiness gate and show the current power status.
    ///
    /// If configuring fails, the gate stays closed and every later event is dropped.
    pub fn init<P: PowerStatus>(&mut self, status: &P) -> Result<(), InitError> {
        let configured = self.output.configure()?;
        self.gate.mark_ready(configured);
        self.refresh(status);
        info!(
            "Status LEDs started, battery: {}%, usb powered: {}",
            self.observation.battery_percentage, self.observation.usb_powered
        );
        Ok(())
    }

    pub fn on_battery_state_changed(&mut self, event: BatteryStateChangedEvent) -> Propagation {
        debug!("Battery state changed: {}%", event.state_of_charge);
        self.observation.battery_percentage = clamp_percentage(event.state_of_charge as i16);
        self.update();
        Propagation::Bubble
    }

    pub fn on_usb_conn_state_changed(&mut self, event: UsbConnStateChangedEvent) -> Propagation {
        debug!("USB connection state changed: {:?}", event.conn_state);
        self.observation.usb_powered = event.conn_state.is_powered();
        self.update();
        Propagation::Bubble
    }

    /// Re-read the power status and show it
    pub fn refresh<P: PowerStatus>(&mut self, status: &P) {
        self.observation = Observation::new(status.battery_percentage(), status.usb_powered());
        self.update();
    }

    /// Advance the low battery blink by half a period
    pub fn toggle_blink(&mut self) {
        let Some((color, lit)) = self.blink.tick() else {
            return;
        };
        if let Err(e) = self.output.set_color(color, lit) {
            error!("Failed to blink {:?} indicator line: {:?}", color, e);
            self.blink.cancel();
            self.current = None;
            self.last_error = Some(e);
        }
    }

    pub fn observation(&self) -> Observation {
        self.observation
    }

    /// The state currently shown, `None` before the first successful apply or after a failure
    pub fn current_state(&self) -> Option<IndicatorState> {
        self.current
    }

    /// Error of the most recent failed apply, cleared by the next successful one
    pub fn last_error(&self) -> Option<DriverError> {
        self.last_error
    }

    pub fn is_ready(&self) -> bool {
        self.gate.is_ready()
    }

    pub fn is_blinking(&self) -> bool {
        self.blink.is_active()
    }

    pub fn line_states(&mut self) -> Result<heapless::Vec<(LedColor, bool), MAX_LINES>, DriverError> {
        self.output.line_states()
    }

    /// Wait for status events, blink and refresh forever
    pub async fn run<S, P>(&mut self, sub: &mut S, status: &P) -> !
    where
        S: EventSubscriber<StatusEvent>,
        P: PowerStatus,
    {
        let mut blink_generation = self.blink.generation();
        let mut last_blink = Instant::now();
        let mut last_refresh = Instant::now();

        loop {
            if self.blink.generation() != blink_generation {
                blink_generation = self.blink.generation();
                last_blink = Instant::now();
            }

            let blink_at = self.blink.half_period().map(|p| last_blink + p);
            let refresh_at = self.refresh_interval.map(|p| last_refresh + p);
            let deadline = match (blink_at, refresh_at) {
                (Some(b), Some(r)) => Some(b.min(r)),
                (b, r) => b.or(r),
            };
            let timer = async {
                match deadline {
                    Some(at) => Timer::at(at).await,
                    None => pending::<()>().await,
                }
            };

            match select(timer, sub.next_event()).await {
                Either::First(_) => {
                    let now = Instant::now();
                    if blink_at.is_some_and(|at| at <= now) {
                        self.toggle_blink();
                        last_blink = now;
                    }
                    if refresh_at.is_some_and(|at| at <= now) {
                        self.refresh(status);
                        last_refresh = now;
                    }
                }
                Either::Second(event) => {
                    self.process_event(event);
                }
            }
        }
    }

    /// Evaluate the observation and show the result
    fn update(&mut self) {
        let state = evaluate(&self.policy, self.observation);
        // The blink owns the line while it runs, re-applying would break its phase
        if state == IndicatorState::LowBattery
            && self.current == Some(IndicatorState::LowBattery)
            && self.blink.is_active()
        {
            return;
        }
        match self.gate.guarded_apply(&mut self.output, state) {
            Ok(Applied::Shown) => {
                if self.current != Some(state) {
                    info!("Indicator state: {:?}", state);
                    self.animate(state);
                }
                self.current = Some(state);
                self.last_error = None;
            }
            Ok(Applied::Suppressed) => {}
            Err(e) => {
                error!("Failed to show {:?}: {:?}", state, e);
                self.blink.cancel();
                self.current = None;
                self.last_error = Some(e);
            }
        }
    }

    fn animate(&mut self, state: IndicatorState) {
        match (state, self.low_battery_blink) {
            (IndicatorState::LowBattery, Some(half_period)) => {
                self.blink.start(self.output.colors().low_battery, half_period);
            }
            _ => {
                if self.blink.cancel() {
                    debug!("Low battery blink stopped");
                }
            }
        }
    }
}

impl<L: IndicatorLine> Controller for StatusLedController<L> {
    type Event = StatusEvent;

    fn process_event(&mut self, event: Self::Event) -> Propagation {
        match event {
            StatusEvent::Battery(e) => self.on_battery_state_changed(e),
            StatusEvent::Usb(e) => self.on_usb_conn_state_changed(e),
        }
    }
}
