//! Cancellable blink animation.
//!
//! The scheduler only keeps the animation state. The controller's run loop owns the timer
//! and calls [`BlinkScheduler::tick`] every half period, so nothing ever sleeps inside an
//! event handler. Starting a new blink or cancelling replaces whatever was running.

use embassy_time::Duration;

use crate::output::LedColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Blink {
    color: LedColor,
    half_period: Duration,
    lit: bool,
}

#[derive(Debug, Default)]
pub struct BlinkScheduler {
    current: Option<Blink>,
    /// Bumped every time a blink is started
    generation: u32,
}

impl BlinkScheduler {
    pub const fn new() -> Self {
        Self {
            current: None,
            generation: 0,
        }
    }

    /// Start blinking `color`, the line is expected to be lit already
    pub fn start(&mut self, color: LedColor, half_period: Duration) {
        self.current = Some(Blink {
            color,
            half_period,
            lit: true,
        });
        self.generation = self.generation.wrapping_add(1);
    }

    /// Stop the running blink, returns whether one was running
    pub fn cancel(&mut self) -> bool {
        self.current.take().is_some()
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Time until the next toggle, `None` when idle
    pub fn half_period(&self) -> Option<Duration> {
        self.current.map(|b| b.half_period)
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Advance the animation, returns the line to drive and its new state
    pub fn tick(&mut self) -> Option<(LedColor, bool)> {
        let blink = self.current.as_mut()?;
        blink.lit = !blink.lit;
        Some((blink.color, blink.lit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle() {
        let mut blink = BlinkScheduler::new();
        assert!(!blink.is_active());
        assert_eq!(blink.half_period(), None);
        assert_eq!(blink.tick(), None);
        assert!(!blink.cancel());
    }

    #[test]
    fn test_toggle() {
        let mut blink = BlinkScheduler::new();
        blink.start(LedColor::Blue, Duration::from_millis(500));
        assert_eq!(blink.half_period(), Some(Duration::from_millis(500)));
        assert_eq!(blink.tick(), Some((LedColor::Blue, false)));
        assert_eq!(blink.tick(), Some((LedColor::Blue, true)));
        assert_eq!(blink.tick(), Some((LedColor::Blue, false)));
    }

    #[test]
    fn test_restart_and_cancel() {
        let mut blink = BlinkScheduler::new();
        blink.start(LedColor::Blue, Duration::from_millis(500));
        let generation = blink.generation();
        blink.tick();

        // Restarting begins lit again
        blink.start(LedColor::Yellow, Duration::from_millis(200));
        assert_ne!(blink.generation(), generation);
        assert_eq!(blink.tick(), Some((LedColor::Yellow, false)));

        assert!(blink.cancel());
        assert!(!blink.is_active());
        assert_eq!(blink.tick(), None);
    }
}
