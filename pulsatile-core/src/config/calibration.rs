//! Regulator calibration bounds
//!
//! A regulator maps its physical pressure range linearly onto a voltage
//! range. The same affine map is used forwards (setpoint) and backwards
//! (feedback).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Physical and electrical limits of one regulator
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalibrationBounds {
    /// Pressure at `min_voltage` (bar)
    pub min_pressure_bar: f32,
    /// Pressure at `max_voltage` (bar)
    pub max_pressure_bar: f32,
    /// Voltage at `min_pressure_bar`
    pub min_voltage: f32,
    /// Voltage at `max_pressure_bar`
    pub max_voltage: f32,
    /// Software ceiling; setpoints above this are rejected (bar)
    pub safe_max_pressure_bar: f32,
}

impl CalibrationBounds {
    /// Festo VPPE 0-2 bar, 0.1-10 V setpoint and feedback
    ///
    /// Pressure = (V - 0.1) * 0.2 + 0.02, i.e. 5 V per bar.
    pub const VPPE_0_2_BAR: Self = Self {
        min_pressure_bar: 0.02,
        max_pressure_bar: 2.0,
        min_voltage: 0.1,
        max_voltage: 10.0,
        safe_max_pressure_bar: 1.5,
    };

    /// Volts per bar
    pub fn scale(&self) -> f32 {
        (self.max_voltage - self.min_voltage) / (self.max_pressure_bar - self.min_pressure_bar)
    }

    /// Convert a pressure to the setpoint voltage
    ///
    /// `V = (bar - min_pressure) * scale + min_voltage`. No clamping is
    /// applied; range checks belong to the caller.
    pub fn bar_to_voltage(&self, bar: f32) -> f32 {
        (bar - self.min_pressure_bar) * self.scale() + self.min_voltage
    }

    /// Convert a feedback voltage back to pressure
    pub fn voltage_to_bar(&self, voltage: f32) -> f32 {
        (voltage - self.min_voltage) / self.scale() + self.min_pressure_bar
    }

    /// Check if a setpoint is within the software safety ceiling
    pub fn is_safe(&self, bar: f32) -> bool {
        bar.is_finite() && bar <= self.safe_max_pressure_bar
    }

    /// Check that the bounds describe a usable, increasing affine map
    pub fn validate(&self) -> Result<(), ConfigError> {
        let values = [
            self.min_pressure_bar,
            self.max_pressure_bar,
            self.min_voltage,
            self.max_voltage,
            self.safe_max_pressure_bar,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::InvalidBounds);
        }

        if self.max_pressure_bar <= self.min_pressure_bar || self.max_voltage <= self.min_voltage {
            return Err(ConfigError::InvalidBounds);
        }

        if self.safe_max_pressure_bar < self.min_pressure_bar
            || self.safe_max_pressure_bar > self.max_pressure_bar
        {
            return Err(ConfigError::InvalidBounds);
        }

        Ok(())
    }
}

impl Default for CalibrationBounds {
    fn default() -> Self {
        Self::VPPE_0_2_BAR
    }
}
