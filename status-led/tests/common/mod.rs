#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use status_led::{
    BatteryStateChangedEvent, DriverError, IndicatorLine, LedColor, LineAssignment, PowerStatus, StatusLedConfig,
    StatusLedController, UsbConnState, UsbConnStateChangedEvent,
};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

#[derive(Debug)]
pub struct LineState {
    pub active: bool,
    pub ready: bool,
    pub configured: bool,
    pub fail_configure: bool,
    pub fail_writes: bool,
}

/// Indicator line backed by shared state, clone it to keep a handle for assertions
#[derive(Debug, Clone)]
pub struct DummyLine(pub Rc<RefCell<LineState>>);

impl DummyLine {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(LineState {
            active: false,
            ready: true,
            configured: false,
            fail_configure: false,
            fail_writes: false,
        })))
    }

    pub fn active(&self) -> bool {
        self.0.borrow().active
    }

    pub fn set_ready(&self, ready: bool) {
        self.0.borrow_mut().ready = ready;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.0.borrow_mut().fail_writes = fail;
    }
}

impl IndicatorLine for DummyLine {
    fn configure(&mut self) -> Result<(), DriverError> {
        let mut s = self.0.borrow_mut();
        if s.fail_configure {
            return Err(DriverError::ConfigureFailed);
        }
        s.configured = true;
        s.active = false;
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.0.borrow().ready
    }

    fn set_active(&mut self, active: bool) -> Result<(), DriverError> {
        let mut s = self.0.borrow_mut();
        if s.fail_writes {
            return Err(DriverError::LineUnavailable);
        }
        s.active = active;
        Ok(())
    }

    fn is_active(&mut self) -> Result<bool, DriverError> {
        Ok(self.0.borrow().active)
    }
}

/// Red, green and blue dummy lines
pub struct RgbLines {
    pub red: DummyLine,
    pub green: DummyLine,
    pub blue: DummyLine,
}

impl RgbLines {
    pub fn new() -> Self {
        Self {
            red: DummyLine::new(),
            green: DummyLine::new(),
            blue: DummyLine::new(),
        }
    }

    pub fn assignment(&self) -> LineAssignment<DummyLine> {
        LineAssignment::new()
            .with_line(LedColor::Red, self.red.clone())
            .unwrap()
            .with_line(LedColor::Green, self.green.clone())
            .unwrap()
            .with_line(LedColor::Blue, self.blue.clone())
            .unwrap()
    }

    /// Active state of red, green and blue
    pub fn active(&self) -> [bool; 3] {
        [self.red.active(), self.green.active(), self.blue.active()]
    }
}

/// Power status with settable readings
pub struct DummyPowerStatus {
    pub battery_percentage: Cell<i16>,
    pub usb_powered: Cell<bool>,
}

impl DummyPowerStatus {
    pub fn new(battery_percentage: i16, usb_powered: bool) -> Self {
        Self {
            battery_percentage: Cell::new(battery_percentage),
            usb_powered: Cell::new(usb_powered),
        }
    }
}

impl PowerStatus for DummyPowerStatus {
    fn battery_percentage(&self) -> i16 {
        self.battery_percentage.get()
    }

    fn usb_powered(&self) -> bool {
        self.usb_powered.get()
    }
}

pub fn battery(state_of_charge: u8) -> BatteryStateChangedEvent {
    BatteryStateChangedEvent { state_of_charge }
}

pub fn usb(conn_state: UsbConnState) -> UsbConnStateChangedEvent {
    UsbConnStateChangedEvent { conn_state }
}

/// Controller with default config over fresh RGB lines, not initialized
pub fn create_controller(config: StatusLedConfig) -> (StatusLedController<DummyLine>, RgbLines) {
    let lines = RgbLines::new();
    let controller = StatusLedController::new(config, lines.assignment()).unwrap();
    (controller, lines)
}
