//! Battery quantization core
//!
//! Pure logic shared by the battbar frontends: normalizing a raw
//! `(level, scale)` battery reading to a percentage, quantizing that
//! percentage into a segmented bar plan, and gating redraws on change.
//! No I/O and no platform dependencies live here.
//!
//! # Example
//!
//! ```
//! use battbar_core::{quantize, BatteryPercentage, TierPolicy, DEFAULT_STEPS};
//!
//! let pct = BatteryPercentage::new(45).unwrap();
//! let plan = quantize(pct, DEFAULT_STEPS, TierPolicy::FillCount);
//! assert_eq!(plan.full_steps(), 4);
//! ```

mod gate;
mod percent;
mod quantize;

pub use gate::{changed, ChangeGate};
pub use percent::BatteryPercentage;
pub use quantize::{quantize, Segment, SegmentPlan, SegmentState, Tier, TierPolicy, DEFAULT_STEPS};
