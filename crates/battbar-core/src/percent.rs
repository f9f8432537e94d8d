//! Battery percentage normalization
//!
//! Hosts report charge as a raw `(level, scale)` pair. This module turns
//! that into a validated 0-100 percentage using truncating integer
//! division, guarding the division by zero a raw reading could trigger.

/// A battery charge percentage, guaranteed to be in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BatteryPercentage(u8);

impl BatteryPercentage {
    /// Fully discharged.
    pub const EMPTY: Self = Self(0);

    /// Fully charged.
    pub const FULL: Self = Self(100);

    /// Create from an already-computed percentage. Returns `None` above 100.
    pub fn new(value: u8) -> Option<Self> {
        (value <= 100).then_some(Self(value))
    }

    /// Normalize a raw `(level, scale)` reading.
    ///
    /// Computes `level * 100 / scale` with truncating division. Returns
    /// `None` when `scale` is zero or `level` is negative, since neither is
    /// a meaningful reading. A level above the scale clamps to 100; some
    /// supplies briefly report `charge_now > charge_full` near end of charge.
    pub fn from_level_scale(level: i64, scale: i64) -> Option<Self> {
        if scale <= 0 || level < 0 {
            return None;
        }
        let pct = (level.saturating_mul(100) / scale).min(100);
        Some(Self(pct as u8))
    }

    /// The percentage value.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for BatteryPercentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}
