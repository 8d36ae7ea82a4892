//! Blink schedule for highlighting a settings control after navigation.
//!
//! The host owns the timer and calls [`BlinkSchedule::tick`] on each
//! interval. Every live tick inverts the control once; an even number of
//! ticks leaves it looking as it started.

use std::time::Duration;

/// Blink cycles when no setting overrides it
pub const DEFAULT_BLINK_REPEAT: u32 = 4;

/// Suggested timer interval between ticks
pub const BLINK_INTERVAL: Duration = Duration::from_millis(100);

/// What the host should do on one timer tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlinkStep {
    /// Invert the target's client area now
    pub invert: bool,
    /// Stop the timer after this step
    pub finished: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlinkSchedule {
    remaining: u32,
    finished: bool,
}

impl BlinkSchedule {
    /// `repeat` full on/off cycles, i.e. `2 * repeat` ticks.
    pub fn new(repeat: u32) -> Self {
        let remaining = repeat.saturating_mul(2);
        Self { remaining, finished: remaining == 0 }
    }

    /// Ticks left before the schedule runs out on its own
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance one tick. `visible` is whether the target control can still
    /// be seen; once it cannot, this is the last step.
    pub fn tick(&mut self, visible: bool) -> BlinkStep {
        if self.finished {
            return BlinkStep { invert: false, finished: true };
        }
        self.remaining -= 1;
        if self.remaining == 0 || !visible {
            self.finished = true;
        }
        BlinkStep { invert: true, finished: self.finished }
    }
}

impl Default for BlinkSchedule {
    fn default() -> Self {
        Self::new(DEFAULT_BLINK_REPEAT)
    }
}
