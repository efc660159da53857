use embedded_hal::digital::StatefulOutputPin;

use super::{DriverError, IndicatorLine};

/// Indicator line on an embedded-hal output pin.
///
/// Set `low_active` for LEDs wired between the pin and VCC.
pub struct GpioLine<P: StatefulOutputPin> {
    pin: P,
    low_active: bool,
}

impl<P: StatefulOutputPin> GpioLine<P> {
    pub fn new(pin: P, low_active: bool) -> Self {
        Self { pin, low_active }
    }

    fn activate(&mut self) -> Result<(), P::Error> {
        if self.low_active {
            self.pin.set_low()
        } else {
            self.pin.set_high()
        }
    }

    fn deactivate(&mut self) -> Result<(), P::Error> {
        if self.low_active {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        }
    }
}

impl<P: StatefulOutputPin> IndicatorLine for GpioLine<P> {
    fn configure(&mut self) -> Result<(), DriverError> {
        // The HAL has already made it an output, start inactive
        self.deactivate().map_err(|_| DriverError::ConfigureFailed)
    }

    fn set_active(&mut self, active: bool) -> Result<(), DriverError> {
        let result = if active { self.activate() } else { self.deactivate() };
        result.map_err(|_| DriverError::LineUnavailable)
    }

    fn is_active(&mut self) -> Result<bool, DriverError> {
        let result = if self.low_active {
            self.pin.is_set_low()
        } else {
            self.pin.is_set_high()
        };
        result.map_err(|_| DriverError::LineUnavailable)
    }
}
