//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::CalibrationBounds;

/// Reasons a configuration is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A phase duration is zero
    ZeroDuration,
    /// A pressure setpoint is NaN or infinite
    NonFinitePressure,
    /// A pressure setpoint is below the regulator's range
    PressureBelowRange,
    /// A pressure setpoint is above the regulator's safety ceiling
    PressureAboveCeiling,
    /// Calibration bounds are degenerate or inconsistent
    InvalidBounds,
    /// Sampling period is zero
    ZeroPeriod,
}

/// Cardiac cycle setpoints
///
/// Read by the pacemaker (durations) and the actuator sequencer
/// (pressures). Units always work on a copied snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SystemConfig {
    /// Regulator target during systole (bar)
    pub systole_pressure_bar: f32,
    /// Regulator target during diastole (bar)
    pub diastole_pressure_bar: f32,
    /// Systole phase length (ms)
    pub systole_duration_ms: u32,
    /// Diastole phase length (ms)
    pub diastole_duration_ms: u32,
}

impl SystemConfig {
    /// 60 BPM, 1.2 bar systole, 0.05 bar diastole
    pub const DEFAULT: Self = Self {
        systole_pressure_bar: 1.2,
        diastole_pressure_bar: 0.05,
        systole_duration_ms: 300,
        diastole_duration_ms: 700,
    };

    /// Full cycle length (ms)
    pub fn cycle_ms(&self) -> u32 {
        self.systole_duration_ms
            .saturating_add(self.diastole_duration_ms)
    }

    /// Beats per minute implied by the phase durations
    pub fn beats_per_minute(&self) -> u32 {
        match self.cycle_ms() {
            0 => 0,
            cycle => 60_000 / cycle,
        }
    }

    /// Validate against the regulator that will execute the setpoints
    pub fn validate(&self, bounds: &CalibrationBounds) -> Result<(), ConfigError> {
        if self.systole_duration_ms == 0 || self.diastole_duration_ms == 0 {
            return Err(ConfigError::ZeroDuration);
        }

        let floor = bounds.min_pressure_bar.min(0.0);
        for bar in [self.systole_pressure_bar, self.diastole_pressure_bar] {
            if !bar.is_finite() {
                return Err(ConfigError::NonFinitePressure);
            }
            if bar < floor {
                return Err(ConfigError::PressureBelowRange);
            }
            if bar > bounds.safe_max_pressure_bar {
                return Err(ConfigError::PressureAboveCeiling);
            }
        }

        Ok(())
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Sampler timing and waveform parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SamplerConfig {
    /// Sampling period (ms)
    pub period_ms: u32,
    /// Regulator feedback above this is classified as systole (bar)
    pub systole_threshold_bar: f32,
    /// Nominal systole length used to normalize the waveform (ms)
    pub nominal_systole_ms: u32,
    /// Nominal diastole length used to normalize the waveform (ms)
    pub nominal_diastole_ms: u32,
    /// Peak amplitude of the synthetic jitter (mmHg); 0 disables it
    pub jitter_mmhg: f32,
}

impl SamplerConfig {
    /// 100 Hz sampling, 0.6 bar threshold, 300/700 ms nominal phases
    pub const DEFAULT: Self = Self {
        period_ms: 10,
        systole_threshold_bar: 0.6,
        nominal_systole_ms: 300,
        nominal_diastole_ms: 700,
        jitter_mmhg: 0.5,
    };

    /// Number of samples spanning a nominal systole
    pub fn systole_ticks(&self) -> f32 {
        self.nominal_systole_ms as f32 / self.period_ms as f32
    }

    /// Number of samples spanning a nominal diastole
    pub fn diastole_ticks(&self) -> f32 {
        self.nominal_diastole_ms as f32 / self.period_ms as f32
    }

    /// Validate timing and waveform parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.period_ms == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        if self.nominal_systole_ms == 0 || self.nominal_diastole_ms == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if !self.systole_threshold_bar.is_finite() || !self.jitter_mmhg.is_finite() {
            return Err(ConfigError::NonFinitePressure);
        }
        if self.jitter_mmhg < 0.0 {
            return Err(ConfigError::PressureBelowRange);
        }
        Ok(())
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
