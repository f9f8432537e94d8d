//! End-to-end sampling pipeline: scripted readings through normalization,
//! change gating, and quantization.

use battbar_core::{quantize, BatteryPercentage, ChangeGate, SegmentState, Tier, TierPolicy, DEFAULT_STEPS};
use battbar_hal::{BatterySampler, MockSampler};

fn sample_pct(sampler: &MockSampler) -> BatteryPercentage {
    sampler
        .sample()
        .ok()
        .and_then(|snap| snap.percentage())
        .unwrap_or(BatteryPercentage::EMPTY)
}

#[test]
fn test_discharge_sequence_gates_redraws() {
    let sampler = MockSampler::with_percentage(65);
    let mut gate = ChangeGate::new();

    // first reading always draws
    let pct = sample_pct(&sampler);
    assert!(gate.observe(pct));

    let plan = quantize(pct, DEFAULT_STEPS, TierPolicy::FillCount);
    assert_eq!(plan.full_steps(), 6);
    assert_eq!(plan.partial(), 5);
    assert_eq!(plan.tier(), Tier::High);

    // same level again: suppressed
    assert!(!gate.observe(sample_pct(&sampler)));

    // battery drains a step
    sampler.set_level(64);
    let pct = sample_pct(&sampler);
    assert!(gate.observe(pct));
    assert_eq!(pct.value(), 64);
}

#[test]
fn test_unavailable_source_reads_as_empty_then_recovers() {
    let sampler = MockSampler::with_percentage(42);
    let mut gate = ChangeGate::new();

    sampler.set_unavailable(true);
    let pct = sample_pct(&sampler);
    assert_eq!(pct, BatteryPercentage::EMPTY);
    assert!(gate.observe(pct));

    let plan = quantize(pct, DEFAULT_STEPS, TierPolicy::FillCount);
    assert!(plan
        .segments()
        .iter()
        .all(|s| s.state == SegmentState::Empty));

    // source comes back; the next periodic sample self-corrects
    sampler.set_unavailable(false);
    let pct = sample_pct(&sampler);
    assert!(gate.observe(pct));
    assert_eq!(pct.value(), 42);
}

#[test]
fn test_raw_charge_pair_flows_through() {
    let sampler = MockSampler::default();
    sampler.state().write().unwrap().scale = 3_500_000;
    sampler.set_level(2_450_000);

    let snap = sampler.sample().unwrap();
    let pct = snap.percentage().unwrap();
    assert_eq!(pct.value(), 70);

    let plan = quantize(pct, DEFAULT_STEPS, TierPolicy::FillCount);
    assert_eq!(plan.full_steps(), 7);
    assert_eq!(plan.partial(), 0);
}
