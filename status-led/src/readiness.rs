//! Readiness gate in front of the output controller.
//!
//! Battery and USB events can be delivered before the indicator lines are configured.
//! Until the gate is open, every request is dropped instead of driving unconfigured GPIOs.

use crate::driver::{DriverError, IndicatorLine};
use crate::evaluator::IndicatorState;
use crate::output::{IndicatorOutput, LinesConfigured};

/// Outcome of [`ReadinessGate::guarded_apply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Applied {
    /// The state is shown on the lines
    Shown,
    /// Outputs are not ready yet, nothing was driven
    Suppressed,
}

#[derive(Debug, Default)]
pub struct ReadinessGate {
    ready: bool,
}

impl ReadinessGate {
    pub const fn new() -> Self {
        Self { ready: false }
    }

    /// Open the gate. Requires the proof returned by [`IndicatorOutput::configure`].
    ///
    /// The gate is never closed again.
    pub fn mark_ready(&mut self, _configured: LinesConfigured) {
        if !self.ready {
            info!("Indicator outputs ready");
        }
        self.ready = true;
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Apply `state` if the outputs are ready, otherwise do nothing
    pub fn guarded_apply<L: IndicatorLine>(
        &self,
        output: &mut IndicatorOutput<L>,
        state: IndicatorState,
    ) -> Result<Applied, DriverError> {
        if !self.ready {
            debug!("Indicator outputs not ready, drop {:?}", state);
            return Ok(Applied::Suppressed);
        }
        output.apply(state)?;
        Ok(Applied::Shown)
    }
}
