//! Indicator output controller.
//!
//! [`IndicatorOutput`] owns every indicator line of the board and guarantees that at most one
//! of them is active at any time: lines are always switched off before the next one is
//! switched on.

use heapless::Vec;

use crate::driver::{DriverError, IndicatorLine};
use crate::evaluator::IndicatorState;
use crate::policy::ConfigError;

/// Maximum number of indicator lines
pub const MAX_LINES: usize = 4;

/// Color of an indicator LED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedColor {
    Red,
    Green,
    Blue,
    Yellow,
}

/// Which color represents each lit indicator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StateColors {
    pub low_battery: LedColor,
    pub charging: LedColor,
    pub fully_charged: LedColor,
    pub no_sensor: LedColor,
}

impl StateColors {
    /// Colors from the board's `status_led.toml`
    pub const fn from_board() -> Self {
        Self {
            low_battery: crate::LOW_BATTERY_COLOR,
            charging: crate::CHARGING_COLOR,
            fully_charged: crate::FULLY_CHARGED_COLOR,
            no_sensor: crate::NO_SENSOR_COLOR,
        }
    }

    /// The color to light for `state`, `None` for [`IndicatorState::Off`]
    pub fn color_of(&self, state: IndicatorState) -> Option<LedColor> {
        match state {
            IndicatorState::Off => None,
            IndicatorState::LowBattery => Some(self.low_battery),
            IndicatorState::Charging => Some(self.charging),
            IndicatorState::FullyCharged => Some(self.fully_charged),
            IndicatorState::NoSensor => Some(self.no_sensor),
        }
    }
}

impl Default for StateColors {
    fn default() -> Self {
        Self {
            low_battery: LedColor::Blue,
            charging: LedColor::Red,
            fully_charged: LedColor::Green,
            no_sensor: LedColor::Green,
        }
    }
}

/// Binding of LED colors to physical lines, each color appears at most once
pub struct LineAssignment<L: IndicatorLine> {
    lines: Vec<(LedColor, L), MAX_LINES>,
}

impl<L: IndicatorLine> LineAssignment<L> {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Bind `line` to `color`
    pub fn with_line(mut self, color: LedColor, line: L) -> Result<Self, ConfigError> {
        if self.lines.iter().any(|(c, _)| *c == color) {
            return Err(ConfigError::DuplicateLine);
        }
        self.lines.push((color, line)).map_err(|_| ConfigError::TooManyLines)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl<L: IndicatorLine> Default for LineAssignment<L> {
    fn default() -> Self {
        Self::new()
    }
}

/// Proof that every line of an [`IndicatorOutput`] has been configured
#[derive(Debug)]
pub struct LinesConfigured(());

/// Drives the indicator state onto the board's lines
pub struct IndicatorOutput<L: IndicatorLine> {
    lines: Vec<(LedColor, L), MAX_LINES>,
    colors: StateColors,
}

impl<L: IndicatorLine> IndicatorOutput<L> {
    pub fn new(assignment: LineAssignment<L>, colors: StateColors) -> Result<Self, ConfigError> {
        if assignment.is_empty() {
            return Err(ConfigError::NoLines);
        }
        Ok(Self {
            lines: assignment.lines,
            colors,
        })
    }

    /// Configure every line as an inactive output.
    ///
    /// Stops at the first failing line.
    pub fn configure(&mut self) -> Result<LinesConfigured, DriverError> {
        for (color, line) in self.lines.iter_mut() {
            if !line.is_ready() {
                error!("{:?} indicator line is not ready", color);
                return Err(DriverError::ConfigureFailed);
            }
            if let Err(e) = line.configure() {
                error!("Failed to configure {:?} indicator line: {:?}", color, e);
                return Err(DriverError::ConfigureFailed);
            }
        }
        debug!("{} indicator lines configured", self.lines.len());
        Ok(LinesConfigured(()))
    }

    /// Show `state`.
    ///
    /// All lines are deactivated before the target line is activated. If a line is not
    /// ready nothing is touched. If a write fails midway, every line is switched off again
    /// on a best-effort basis before the error is returned.
    pub fn apply(&mut self, state: IndicatorState) -> Result<(), DriverError> {
        if let Some((color, _)) = self.lines.iter().find(|(_, l)| !l.is_ready()) {
            warn!("{:?} indicator line is not ready, skip {:?}", color, state);
            return Err(DriverError::LineUnavailable);
        }

        let target = self.colors.color_of(state);
        if let Err(e) = self.drive(target) {
            self.all_off();
            return Err(e);
        }
        trace!("Indicator state applied: {:?}", state);
        Ok(())
    }

    /// Drive a single color's line, leaving every other line off
    pub(crate) fn set_color(&mut self, color: LedColor, active: bool) -> Result<(), DriverError> {
        let result = self.drive(active.then_some(color));
        if result.is_err() {
            self.all_off();
        }
        result
    }

    /// Read back the active state of every line
    pub fn line_states(&mut self) -> Result<Vec<(LedColor, bool), MAX_LINES>, DriverError> {
        let mut states = Vec::new();
        for (color, line) in self.lines.iter_mut() {
            // Same capacity as `self.lines`, can't overflow
            let _ = states.push((*color, line.is_active()?));
        }
        Ok(states)
    }

    pub fn colors(&self) -> &StateColors {
        &self.colors
    }

    fn drive(&mut self, target: Option<LedColor>) -> Result<(), DriverError> {
        for (_, line) in self.lines.iter_mut() {
            line.set_active(false)?;
        }

        let Some(target) = target else {
            return Ok(());
        };
        match self.lines.iter_mut().find(|(c, _)| *c == target) {
            Some((_, line)) => line.set_active(true),
            None => {
                warn!("No indicator line for {:?}, all lines off", target);
                Ok(())
            }
        }
    }

    fn all_off(&mut self) {
        for (_, line) in self.lines.iter_mut() {
            line.set_active(false).ok();
        }
    }
}
