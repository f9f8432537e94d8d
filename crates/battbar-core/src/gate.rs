//! Redraw suppression
//!
//! The widget is resampled on a fixed interval, but most samples repeat the
//! previous value. The gate keeps the last observed percentage so unchanged
//! readings skip the render pass entirely.

use crate::BatteryPercentage;

/// True iff the two readings differ.
pub fn changed(previous: BatteryPercentage, current: BatteryPercentage) -> bool {
    previous != current
}

/// Caller-owned holder for the last observed percentage.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeGate {
    last: Option<BatteryPercentage>,
}

impl ChangeGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an observation. Returns true when a redraw is warranted:
    /// the value differs from the last one, or this is the first reading.
    pub fn observe(&mut self, current: BatteryPercentage) -> bool {
        let trigger = match self.last {
            Some(prev) => changed(prev, current),
            None => true,
        };
        self.last = Some(current);
        trigger
    }

    /// The most recent observation, if any.
    pub fn last(&self) -> Option<BatteryPercentage> {
        self.last
    }
}
