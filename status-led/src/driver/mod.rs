//! Output line drivers.
//!
//! [`IndicatorLine`] is the seam between the indicator engine and the hardware. Any
//! `embedded-hal` output pin can be used through [`GpioLine`].

pub mod gpio;

use core::fmt;

pub use gpio::GpioLine;

/// Errors of indicator output lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    /// The line can't be driven right now
    LineUnavailable,
    /// The line couldn't be set up as an output
    ConfigureFailed,
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::LineUnavailable => write!(f, "indicator line unavailable"),
            DriverError::ConfigureFailed => write!(f, "failed to configure indicator line"),
        }
    }
}

impl core::error::Error for DriverError {}

/// A single digital output driving one indicator LED
pub trait IndicatorLine {
    /// Set up the line as an output in the inactive state
    fn configure(&mut self) -> Result<(), DriverError>;

    /// Whether the underlying device is ready to be driven
    fn is_ready(&self) -> bool {
        true
    }

    /// Drive the line
    fn set_active(&mut self, active: bool) -> Result<(), DriverError>;

    /// Read back the driven state
    fn is_active(&mut self) -> Result<bool, DriverError>;
}

/// Return the first candidate which is ready and configures successfully.
///
/// Some shields are wired differently between revisions. This runs once at startup, the
/// returned line is then used for the rest of the session.
pub fn probe_line<L, I>(candidates: I) -> Result<L, DriverError>
where
    L: IndicatorLine,
    I: IntoIterator<Item = L>,
{
    for (idx, mut line) in candidates.into_iter().enumerate() {
        if !line.is_ready() {
            warn!("Indicator line candidate {} is not ready", idx);
            continue;
        }
        match line.configure() {
            Ok(()) => {
                info!("Using indicator line candidate {}", idx);
                return Ok(line);
            }
            Err(e) => warn!("Failed to configure indicator line candidate {}: {:?}", idx, e),
        }
    }
    error!("No indicator line candidate could be configured");
    Err(DriverError::ConfigureFailed)
}
