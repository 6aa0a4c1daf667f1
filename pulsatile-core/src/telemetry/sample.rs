//! Telemetry record

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Snapshot of all pressures at one sampling instant
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorSample {
    /// Monotonic time of the sample (ms since boot)
    pub timestamp_ms: u32,
    /// Aortic pressure (mmHg)
    pub aortic_mmhg: f32,
    /// Pulmonary pressure (mmHg)
    pub pulmonary_mmhg: f32,
    /// Regulator feedback pressure (bar)
    pub regulator_bar: f32,
}
