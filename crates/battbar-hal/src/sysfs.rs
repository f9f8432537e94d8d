//! Linux sysfs battery backend
//!
//! Reads charge state from `/sys/class/power_supply`. The battery entry is
//! found by reading each supply's `type` file rather than assuming a name,
//! since vendors ship `BAT0`, `battery`, `axp20x-battery` and worse.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{BatterySampler, BatterySnapshot, Result, SamplerError};

const POWER_SUPPLY_DIR: &str = "/sys/class/power_supply";

/// Sampler backed by a sysfs battery directory.
pub struct SysfsSampler {
    battery_path: PathBuf,
}

impl SysfsSampler {
    /// Use a specific battery directory, e.g. `/sys/class/power_supply/BAT0`.
    pub fn new(battery_path: PathBuf) -> Self {
        Self { battery_path }
    }

    /// Auto-detect the battery under the default sysfs root.
    pub fn detect() -> Result<Self> {
        Self::detect_in(Path::new(POWER_SUPPLY_DIR))
    }

    /// Auto-detect the battery under a specific root. Split out so tests
    /// can point at a fake tree.
    pub fn detect_in(root: &Path) -> Result<Self> {
        if !root.exists() {
            return Err(SamplerError::NoBattery(root.display().to_string()));
        }

        for entry in fs::read_dir(root)? {
            let entry = entry?;
            let path = entry.path();

            let type_path = path.join("type");
            if let Ok(psu_type) = fs::read_to_string(&type_path) {
                if psu_type.trim().eq_ignore_ascii_case("battery") {
                    tracing::info!("Found battery at {}", path.display());
                    return Ok(Self::new(path));
                }
            }
        }

        Err(SamplerError::NoBattery(root.display().to_string()))
    }

    /// The battery directory this sampler reads.
    pub fn battery_path(&self) -> &Path {
        &self.battery_path
    }

    fn read_attr(&self, name: &str) -> Option<i64> {
        let path = self.battery_path.join(name);
        fs::read_to_string(path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
    }
}

impl BatterySampler for SysfsSampler {
    fn sample(&self) -> Result<BatterySnapshot> {
        // Prefer the raw charge pair; it carries more resolution than the
        // kernel's precomputed capacity.
        if let (Some(level), Some(scale)) =
            (self.read_attr("charge_now"), self.read_attr("charge_full"))
        {
            return Ok(BatterySnapshot { level, scale });
        }

        // Energy-reporting supplies (µWh instead of µAh)
        if let (Some(level), Some(scale)) =
            (self.read_attr("energy_now"), self.read_attr("energy_full"))
        {
            return Ok(BatterySnapshot { level, scale });
        }

        if let Some(capacity) = self.read_attr("capacity") {
            return Ok(BatterySnapshot {
                level: capacity,
                scale: 100,
            });
        }

        Err(SamplerError::Unreadable(
            self.battery_path.display().to_string(),
        ))
    }
}
