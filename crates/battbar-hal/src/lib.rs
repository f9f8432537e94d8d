//! Battery sampling backends
//!
//! The widget core only needs a raw `(level, scale)` reading; this crate
//! provides the seam that supplies it. The sysfs backend reads real
//! hardware through `/sys/class/power_supply`, and the mock backend lets
//! tests and desktop development script readings without a battery.
//!
//! # Example
//!
//! ```no_run
//! use battbar_hal::{BatterySampler, SysfsSampler};
//!
//! fn main() -> Result<(), battbar_hal::SamplerError> {
//!     let sampler = SysfsSampler::detect()?;
//!     let snapshot = sampler.sample()?;
//!     println!("raw reading: {}/{}", snapshot.level, snapshot.scale);
//!     Ok(())
//! }
//! ```

pub mod mock;
pub mod sysfs;

pub use mock::MockSampler;
pub use sysfs::SysfsSampler;

use battbar_core::BatteryPercentage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SamplerError {
    #[error("no battery found under {0}")]
    NoBattery(String),

    #[error("unreadable battery attribute: {0}")]
    Unreadable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Sampler result type
pub type Result<T> = std::result::Result<T, SamplerError>;

/// A raw battery reading as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatterySnapshot {
    pub level: i64,
    pub scale: i64,
}

impl BatterySnapshot {
    /// Normalize to a percentage. `None` when the pair is unusable
    /// (zero scale, negative level).
    pub fn percentage(self) -> Option<BatteryPercentage> {
        BatteryPercentage::from_level_scale(self.level, self.scale)
    }
}

/// Source of battery readings.
pub trait BatterySampler: Send {
    fn sample(&self) -> Result<BatterySnapshot>;
}

impl BatterySampler for Box<dyn BatterySampler> {
    fn sample(&self) -> Result<BatterySnapshot> {
        (**self).sample()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_percentage() {
        let snap = BatterySnapshot {
            level: 65,
            scale: 100,
        };
        assert_eq!(snap.percentage().unwrap().value(), 65);
    }

    #[test]
    fn test_snapshot_zero_scale() {
        let snap = BatterySnapshot { level: 65, scale: 0 };
        assert_eq!(snap.percentage(), None);
    }
}
