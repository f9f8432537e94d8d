//! Mock sampler for testing without real hardware
//!
//! Shared-state mock in the same shape as the sysfs backend, so the widget
//! loop can be exercised on a desktop. Tests (and the widget's mock mode)
//! hold a handle to the state and script level changes or failures.

use std::sync::{Arc, RwLock};

use crate::{BatterySampler, BatterySnapshot, Result, SamplerError};

/// Scripted battery state.
#[derive(Debug, Clone)]
pub struct MockBatteryState {
    pub level: i64,
    pub scale: i64,
    /// When true, `sample()` fails as if the source disappeared.
    pub unavailable: bool,
}

impl Default for MockBatteryState {
    fn default() -> Self {
        Self {
            level: 80,
            scale: 100,
            unavailable: false,
        }
    }
}

/// Sampler that reads from scripted state.
#[derive(Clone)]
pub struct MockSampler {
    state: Arc<RwLock<MockBatteryState>>,
}

impl MockSampler {
    pub fn new(state: MockBatteryState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Start at the given percentage with a scale of 100.
    pub fn with_percentage(pct: u8) -> Self {
        Self::new(MockBatteryState {
            level: i64::from(pct.min(100)),
            scale: 100,
            unavailable: false,
        })
    }

    /// Handle for manipulating the state from tests.
    pub fn state(&self) -> Arc<RwLock<MockBatteryState>> {
        Arc::clone(&self.state)
    }

    /// Set the reported level, clamped to the scale.
    pub fn set_level(&self, level: i64) {
        if let Ok(mut state) = self.state.write() {
            state.level = level.clamp(0, state.scale);
            tracing::debug!("[MOCK] battery level set to {}/{}", state.level, state.scale);
        }
    }

    /// Nudge the level by a signed delta, clamped to the scale.
    pub fn adjust_level(&self, delta: i64) {
        if let Ok(mut state) = self.state.write() {
            state.level = (state.level + delta).clamp(0, state.scale);
            tracing::debug!("[MOCK] battery level set to {}/{}", state.level, state.scale);
        }
    }

    /// Make subsequent samples fail or succeed.
    pub fn set_unavailable(&self, unavailable: bool) {
        if let Ok(mut state) = self.state.write() {
            state.unavailable = unavailable;
        }
    }
}

impl Default for MockSampler {
    fn default() -> Self {
        Self::new(MockBatteryState::default())
    }
}

impl BatterySampler for MockSampler {
    fn sample(&self) -> Result<BatterySnapshot> {
        let state = self
            .state
            .read()
            .map_err(|_| SamplerError::Unreadable("mock state poisoned".into()))?;

        if state.unavailable {
            return Err(SamplerError::NoBattery("mock".into()));
        }

        Ok(BatterySnapshot {
            level: state.level,
            scale: state.scale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mock_reads_80_percent() {
        let sampler = MockSampler::default();
        let snap = sampler.sample().unwrap();
        assert_eq!(snap.percentage().unwrap().value(), 80);
    }

    #[test]
    fn test_scripted_level_change() {
        let sampler = MockSampler::with_percentage(50);
        sampler.set_level(37);
        assert_eq!(sampler.sample().unwrap().level, 37);

        sampler.adjust_level(5);
        assert_eq!(sampler.sample().unwrap().level, 42);
    }

    #[test]
    fn test_adjust_clamps_to_scale() {
        let sampler = MockSampler::with_percentage(99);
        sampler.adjust_level(50);
        assert_eq!(sampler.sample().unwrap().level, 100);

        sampler.adjust_level(-500);
        assert_eq!(sampler.sample().unwrap().level, 0);
    }

    #[test]
    fn test_unavailable_source_fails() {
        let sampler = MockSampler::default();
        sampler.set_unavailable(true);
        assert!(sampler.sample().is_err());

        sampler.set_unavailable(false);
        assert!(sampler.sample().is_ok());
    }

    #[test]
    fn test_state_handle_shares_mutations() {
        let sampler = MockSampler::default();
        let state = sampler.state();
        state.write().unwrap().level = 5;
        assert_eq!(sampler.sample().unwrap().level, 5);
    }
}
