//! Percentage-to-segment quantization
//!
//! Maps a 0-100 percentage onto a fixed number of bar segments: some full,
//! at most one partial for the remainder, the rest empty. Each segment
//! carries a color tier so a renderer can paint low charge red and high
//! charge green without re-deriving thresholds.

use serde::{Deserialize, Serialize};

use crate::BatteryPercentage;

/// Default segment count. One segment per 10 percentage points.
pub const DEFAULT_STEPS: u8 = 10;

/// Color tier applied to a segment or to the plan as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Mid,
    High,
}

/// Fill state of a single segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentState {
    Empty,
    /// The remainder segment, drawn in a translucent variant of its tier.
    Partial,
    Full,
}

/// One segment of the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub state: SegmentState,
    pub tier: Tier,
}

/// How segments are assigned color tiers.
///
/// Two rules exist in the widget's history and they disagree at the edges,
/// so the choice is explicit rather than merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TierPolicy {
    /// One global tier chosen from how much of the bar is full, by completed
    /// percentage points: above 50 is high, above 30 is mid, else low. The
    /// boundaries are strict: exactly half full is still mid.
    #[default]
    FillCount,
    /// Each segment keeps a fixed tier from its position, by the segment's
    /// upper percentage bound: up to 30 low, up to 60 mid, above that high.
    /// Fill level never changes a segment's color.
    IndexBand,
}

/// The quantized bar: what a renderer paints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentPlan {
    segments: Vec<Segment>,
    tier: Tier,
    percentage: BatteryPercentage,
    full_steps: u8,
    partial: u8,
}

impl SegmentPlan {
    /// Segments in display order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Plan-level tier, used for the text label.
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// The percentage this plan was computed from.
    pub fn percentage(&self) -> BatteryPercentage {
        self.percentage
    }

    /// Number of fully filled segments.
    pub fn full_steps(&self) -> u8 {
        self.full_steps
    }

    /// Percentage points not covered by the full segments. Zero means no
    /// partial segment is shown; otherwise the value is below one segment's
    /// width (`100 / steps`).
    pub fn partial(&self) -> u8 {
        self.partial
    }
}

/// Quantize a percentage into `steps` segments under the given tier policy.
///
/// Pure function of its inputs: same percentage, same plan. `steps` of zero
/// is treated as one segment rather than dividing by zero.
pub fn quantize(percentage: BatteryPercentage, steps: u8, policy: TierPolicy) -> SegmentPlan {
    let steps = steps.max(1);
    let p = percentage.value();

    // Each segment covers 100/steps percentage points, so the full count
    // scales by segment width rather than dividing by the segment count.
    // The two only coincide at steps=10.
    let full_steps = (u16::from(p) * u16::from(steps) / 100) as u8;
    let partial = p - (u16::from(full_steps) * 100 / u16::from(steps)) as u8;

    let fill_tier = tier_for_fill(full_steps, steps);

    let segments = (1..=steps)
        .map(|i| {
            let state = if i <= full_steps {
                SegmentState::Full
            } else if u16::from(i) == u16::from(full_steps) + 1 && partial > 0 {
                SegmentState::Partial
            } else {
                SegmentState::Empty
            };
            let tier = match policy {
                TierPolicy::FillCount => fill_tier,
                TierPolicy::IndexBand => tier_for_index(i, steps),
            };
            Segment { state, tier }
        })
        .collect::<Vec<_>>();

    let tier = match policy {
        TierPolicy::FillCount => fill_tier,
        // Label follows the topmost lit segment; an empty bar reads as low.
        TierPolicy::IndexBand => segments
            .iter()
            .rev()
            .find(|s| s.state != SegmentState::Empty)
            .map(|s| s.tier)
            .unwrap_or(Tier::Low),
    };

    SegmentPlan {
        segments,
        tier,
        percentage,
        full_steps,
        partial,
    }
}

/// Tier from completed fill, in percentage points so any step count lands
/// on the same thresholds. At steps=10 this is the original rule:
/// more than 5 full segments high, more than 3 mid.
fn tier_for_fill(full_steps: u8, steps: u8) -> Tier {
    let completed = u16::from(full_steps) * 100 / u16::from(steps);
    if completed > 50 {
        Tier::High
    } else if completed > 30 {
        Tier::Mid
    } else {
        Tier::Low
    }
}

/// Fixed per-index tier from the segment's upper percentage bound.
fn tier_for_index(index: u8, steps: u8) -> Tier {
    let bound = u16::from(index) * 100 / u16::from(steps);
    if bound <= 30 {
        Tier::Low
    } else if bound <= 60 {
        Tier::Mid
    } else {
        Tier::High
    }
}
