//! Pressure gauge reading for display.
//!
//! The stored pressure is unbounded; the gauge clamps it to 0-100 and
//! marks overflow separately.

use serde::{Deserialize, Serialize};

use crate::labels::pressure_label;
use crate::plan::{PlanState, PressureLevel};

/// Width of the rendered bar in characters.
pub const GAUGE_WIDTH: usize = 30;
/// Text shown instead of the number once pressure passes 100.
pub const OVERFLOW_TEXT: &str = "爆表";

/// Display-ready view of a plan's pressure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GaugeReading {
    /// Pressure clamped to 0-100
    pub value: u8,
    /// Raw pressure exceeded 100
    pub overflow: bool,
    pub level: PressureLevel,
}

impl GaugeReading {
    pub fn new(pressure: i64, level: PressureLevel) -> Self {
        Self {
            value: pressure.clamp(0, 100) as u8,
            overflow: pressure > 100,
            level,
        }
    }

    pub fn from_plan(plan: &PlanState) -> Self {
        Self::new(plan.pressure, plan.pressure_level)
    }

    /// Hex color of the tier.
    pub fn color(&self) -> &'static str {
        match self.level {
            PressureLevel::Easy => "#3b82f6",
            PressureLevel::Medium => "#22c55e",
            PressureLevel::High => "#f97316",
            PressureLevel::Survival => "#ef4444",
        }
    }

    /// Needle angle in degrees, -90 (empty) to 90 (full).
    pub fn needle_degrees(&self) -> f64 {
        f64::from(self.value) / 100.0 * 180.0 - 90.0
    }

    /// Numeric readout, or the overflow text.
    pub fn readout(&self, raw_pressure: i64) -> String {
        if self.overflow {
            OVERFLOW_TEXT.to_string()
        } else {
            raw_pressure.to_string()
        }
    }

    /// Render a one-line ASCII gauge.
    pub fn render_ascii(&self, raw_pressure: i64) -> String {
        let filled = usize::from(self.value) * GAUGE_WIDTH / 100;
        format!(
            "[{}{}] {} ({})",
            "█".repeat(filled),
            "·".repeat(GAUGE_WIDTH - filled),
            self.readout(raw_pressure),
            pressure_label(self.level)
        )
    }
}
