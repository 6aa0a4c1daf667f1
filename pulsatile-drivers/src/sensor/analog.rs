//! Analog pressure transducer
//!
//! Linear voltage-output sensor: mmHg = (V - zero_voltage) * mmhg_per_volt.

use pulsatile_core::traits::{AnalogInput, PeriphError, PressureSensor};

/// Pressure sensor behind an analog input
pub struct AnalogPressureSensor<I> {
    input: I,
    /// Output voltage at 0 mmHg
    zero_voltage: f32,
    /// Sensitivity
    mmhg_per_volt: f32,
}

impl<I> AnalogPressureSensor<I> {
    /// Create a new sensor
    ///
    /// # Arguments
    /// - `input`: Analog channel the transducer is wired to
    /// - `zero_voltage`: Output voltage at atmospheric pressure
    /// - `mmhg_per_volt`: Sensitivity from the datasheet or a two-point fit
    pub fn new(input: I, zero_voltage: f32, mmhg_per_volt: f32) -> Self {
        Self {
            input,
            zero_voltage,
            mmhg_per_volt,
        }
    }

    /// Convert a raw voltage to mmHg
    pub fn voltage_to_mmhg(&self, voltage: f32) -> f32 {
        (voltage - self.zero_voltage) * self.mmhg_per_volt
    }
}

impl<I: AnalogInput> PressureSensor for AnalogPressureSensor<I> {
    fn read_mmhg(&mut self) -> Result<f32, PeriphError> {
        let voltage = self.input.read_voltage()?;
        if !voltage.is_finite() {
            return Err(PeriphError::OutOfRange);
        }
        Ok(self.voltage_to_mmhg(voltage))
    }
}
